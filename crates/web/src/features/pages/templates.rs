//! Server-rendered pages.
//!
//! Every value coming from the database or the request goes through
//! `encode_text` / `encode_double_quoted_attribute` before it lands in markup.

use html_escape::{encode_double_quoted_attribute, encode_text};
use storage::{
    dto::common::PaginationMeta,
    models::{Competition, Sport, Stage},
};

pub const SUPERUSER_PROFILE_MESSAGE: &str =
    "You are superuser! What do you want to see there? (ノಠ益ಠ)ノ彡";

fn layout(title: &str, username: Option<&str>, body: &str) -> String {
    let nav_session = match username {
        Some(name) => format!(
            r#"<a href="/profile/">{}</a> | <a href="/accounts/logout/">Logout</a>"#,
            encode_text(name)
        ),
        None => r#"<a href="/accounts/login/">Login</a> | <a href="/register/">Register</a>"#
            .to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
        body {{ font-family: Arial, sans-serif; max-width: 800px; margin: 30px auto; padding: 0 20px; }}
        nav {{ margin-bottom: 20px; }}
        .form-group {{ margin-bottom: 15px; }}
        label {{ display: block; margin-bottom: 5px; }}
        input {{ width: 100%; padding: 8px; border: 1px solid #ddd; border-radius: 4px; }}
        .errors {{ color: #b00020; }}
        .pagination {{ margin-top: 20px; }}
    </style>
</head>
<body>
    <nav>
        <a href="/">Home</a> | <a href="/competitions/">Competitions</a> |
        <a href="/sports/">Sports</a> | <a href="/stages/">Stages</a> | {nav_session}
    </nav>
    {body}
</body>
</html>
"#,
        title = encode_text(title),
    )
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

fn pagination(base: &str, meta: &PaginationMeta) -> String {
    let mut links = Vec::new();
    if meta.has_previous() {
        links.push(format!(r#"<a href="{base}?page=1">&laquo; first</a>"#));
        links.push(format!(
            r#"<a href="{base}?page={}">previous</a>"#,
            meta.page - 1
        ));
    }
    links.push(format!(
        "<span>Page {} of {}.</span>",
        meta.page, meta.total_pages
    ));
    if meta.has_next() {
        links.push(format!(r#"<a href="{base}?page={}">next</a>"#, meta.page + 1));
        links.push(format!(
            r#"<a href="{base}?page={}">last &raquo;</a>"#,
            meta.total_pages
        ));
    }
    format!(r#"<div class="pagination">{}</div>"#, links.join(" "))
}

fn list_page<T>(
    title: &str,
    base: &str,
    detail: &str,
    items: &[T],
    meta: &PaginationMeta,
    username: Option<&str>,
    describe: impl Fn(&T) -> (String, String),
) -> String {
    let body = if items.is_empty() {
        format!("<h1>{}</h1>\n<p>Nothing here yet.</p>", encode_text(title))
    } else {
        let rows: String = items
            .iter()
            .map(|item| {
                let (id, label) = describe(item);
                format!(
                    r#"<li><a href="{detail}?id={}">{}</a></li>"#,
                    encode_double_quoted_attribute(&id),
                    encode_text(&label)
                )
            })
            .collect();
        format!(
            "<h1>{}</h1>\n<ul>{rows}</ul>\n{}",
            encode_text(title),
            pagination(base, meta)
        )
    };
    layout(title, username, &body)
}

pub fn index(competitions: i64, sports: i64, username: Option<&str>) -> String {
    let body = format!(
        "<h1>Sports competitions</h1>\n\
         <p>Competitions registered: {competitions}</p>\n\
         <p>Sports registered: {sports}</p>"
    );
    layout("Home", username, &body)
}

pub fn competitions(items: &[Competition], meta: &PaginationMeta, username: Option<&str>) -> String {
    list_page(
        "Competitions",
        "/competitions/",
        "/competition/",
        items,
        meta,
        username,
        |c| (c.id.to_string(), c.to_string()),
    )
}

pub fn sports(items: &[Sport], meta: &PaginationMeta, username: Option<&str>) -> String {
    list_page(
        "Sports",
        "/sports/",
        "/sport/",
        items,
        meta,
        username,
        |s| (s.id.to_string(), s.to_string()),
    )
}

pub fn stages(items: &[Stage], meta: &PaginationMeta, username: Option<&str>) -> String {
    list_page(
        "Stages",
        "/stages/",
        "/stage/",
        items,
        meta,
        username,
        |s| (s.id.to_string(), s.to_string()),
    )
}

fn related_links(detail: &str, related: &[(String, String)]) -> String {
    if related.is_empty() {
        return "<p>None.</p>".to_string();
    }
    let items: String = related
        .iter()
        .map(|(id, label)| {
            format!(
                r#"<li><a href="{detail}?id={}">{}</a></li>"#,
                encode_double_quoted_attribute(id),
                encode_text(label)
            )
        })
        .collect();
    format!("<ul>{items}</ul>")
}

pub fn competition(
    competition: &Competition,
    sports: &[(String, String)],
    username: Option<&str>,
) -> String {
    let body = format!(
        "<h1>{}</h1>\n\
         <p>Start: {}</p>\n\
         <p>End: {}</p>\n\
         <h2>Sports</h2>\n{}",
        encode_text(&competition.title),
        or_dash(competition.date_of_start.map(|d| d.to_string())),
        or_dash(competition.date_of_end.map(|d| d.to_string())),
        related_links("/sport/", sports),
    );
    layout(&competition.title, username, &body)
}

pub fn sport(sport: &Sport, competitions: &[(String, String)], username: Option<&str>) -> String {
    let body = format!(
        "<h1>{}</h1>\n\
         <p>{}</p>\n\
         <h2>Competitions</h2>\n{}",
        encode_text(&sport.title),
        encode_text(sport.description.as_deref().unwrap_or("")),
        related_links("/competition/", competitions),
    );
    layout(&sport.title, username, &body)
}

pub fn stage(
    stage: &Stage,
    competition: Option<&Competition>,
    sport: Option<&Sport>,
    username: Option<&str>,
) -> String {
    let competition_line = match competition {
        Some(c) => format!(
            r#"<a href="/competition/?id={}">{}</a>"#,
            c.id,
            encode_text(&c.title)
        ),
        None => "-".to_string(),
    };
    let sport_line = match sport {
        Some(s) => format!(
            r#"<a href="/sport/?id={}">{}</a>"#,
            s.id,
            encode_text(&s.title)
        ),
        None => "-".to_string(),
    };

    let body = format!(
        "<h1>{}</h1>\n\
         <p>Date: {}</p>\n\
         <p>Place: {}</p>\n\
         <p>Competition: {competition_line}</p>\n\
         <p>Sport: {sport_line}</p>",
        encode_text(&stage.title),
        or_dash(stage.date.map(|d| d.to_string())),
        encode_text(stage.place.as_deref().unwrap_or("-")),
    );
    layout(&stage.title, username, &body)
}

/// `pairs` are shown as a definition list; superusers get a single entry
pub fn profile(pairs: &[(&str, String)], username: Option<&str>) -> String {
    let rows: String = pairs
        .iter()
        .map(|(label, value)| {
            format!(
                "<dt>{}</dt><dd>{}</dd>",
                encode_text(label),
                encode_text(value)
            )
        })
        .collect();
    layout("Profile", username, &format!("<h1>Profile</h1>\n<dl>{rows}</dl>"))
}

fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", encode_text(e)))
        .collect();
    format!(r#"<ul class="errors">{items}</ul>"#)
}

/// Values echoed back into the registration form after a failed submit
#[derive(Debug, Default)]
pub struct RegistrationValues<'a> {
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
}

pub fn register(values: &RegistrationValues<'_>, errors: &[String], registered: bool) -> String {
    let notice = if registered {
        r#"<p>Registration complete. You can <a href="/accounts/login/">log in</a> now.</p>"#
    } else {
        ""
    };

    let body = format!(
        r#"<h1>Register</h1>
    {notice}
    {errors}
    <form method="post" action="/register/">
        <div class="form-group">
            <label for="username">Username:</label>
            <input type="text" id="username" name="username" value="{username}" required>
        </div>
        <div class="form-group">
            <label for="first_name">First name:</label>
            <input type="text" id="first_name" name="first_name" value="{first_name}" required>
        </div>
        <div class="form-group">
            <label for="last_name">Last name:</label>
            <input type="text" id="last_name" name="last_name" value="{last_name}" required>
        </div>
        <div class="form-group">
            <label for="email">Email:</label>
            <input type="email" id="email" name="email" value="{email}" required>
        </div>
        <div class="form-group">
            <label for="password1">Password:</label>
            <input type="password" id="password1" name="password1" required>
        </div>
        <div class="form-group">
            <label for="password2">Password confirmation:</label>
            <input type="password" id="password2" name="password2" required>
        </div>
        <button type="submit">Register</button>
    </form>"#,
        errors = error_list(errors),
        username = encode_double_quoted_attribute(values.username),
        first_name = encode_double_quoted_attribute(values.first_name),
        last_name = encode_double_quoted_attribute(values.last_name),
        email = encode_double_quoted_attribute(values.email),
    );
    layout("Register", None, &body)
}

pub fn login(next: &str, error: Option<&str>) -> String {
    let errors: Vec<String> = error.map(str::to_string).into_iter().collect();
    let body = format!(
        r#"<h1>Login</h1>
    {errors}
    <form method="post" action="/accounts/login/">
        <input type="hidden" name="next" value="{next}">
        <div class="form-group">
            <label for="username">Username:</label>
            <input type="text" id="username" name="username" required>
        </div>
        <div class="form-group">
            <label for="password">Password:</label>
            <input type="password" id="password" name="password" required>
        </div>
        <button type="submit">Login</button>
    </form>
    <p>No account yet? <a href="/register/">Register here</a></p>"#,
        errors = error_list(&errors),
        next = encode_double_quoted_attribute(next),
    );
    layout("Login", None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_escaped() {
        let competition = Competition::new("<script>alert(1)</script>", None, None);
        let html = super::competition(&competition, &[], Some("abc"));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn empty_list_has_no_pagination() {
        let meta = PaginationMeta::new(1, 10, 0);
        let html = competitions(&[], &meta, None);
        assert!(html.contains("Nothing here yet."));
        assert!(!html.contains("class=\"pagination\""));
    }

    #[test]
    fn pagination_links_follow_the_page() {
        let meta = PaginationMeta::new(2, 10, 35);
        let html = pagination("/sports/", &meta);
        assert!(html.contains(r#"href="/sports/?page=1""#));
        assert!(html.contains(r#"href="/sports/?page=3""#));
        assert!(html.contains(r#"href="/sports/?page=4""#));
        assert!(html.contains("Page 2 of 4."));
    }

    #[test]
    fn login_form_keeps_next_in_an_attribute() {
        let html = login("/stage/?id=\"x\"", Some("Wrong"));
        assert!(html.contains(r#"value="/stage/?id=&quot;x&quot;""#));
        assert!(html.contains("<li>Wrong</li>"));
    }

    #[test]
    fn anonymous_navigation_offers_login() {
        let html = index(3, 4, None);
        assert!(html.contains("Competitions registered: 3"));
        assert!(html.contains("Sports registered: 4"));
        assert!(html.contains(r#"href="/accounts/login/""#));
    }
}
