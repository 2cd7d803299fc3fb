pub const SESSION_COOKIE: &str = "sessionid";

pub fn build_session_cookie(token: &str, max_age_secs: u64, secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };

    format!(
        "{}={}; HttpOnly{}; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE, token, secure_flag, max_age_secs
    )
}

pub fn build_clear_cookie(secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };

    format!(
        "{}=; HttpOnly{}; SameSite=Lax; Path=/; Max-Age=0",
        SESSION_COOKIE, secure_flag
    )
}

pub fn extract_session_token(cookie_header: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let trimmed = part.trim();
        if let Some(value) = trimmed
            .strip_prefix(SESSION_COOKIE)
            .and_then(|rest| rest.strip_prefix('='))
        {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}
