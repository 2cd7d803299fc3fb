//! Needs Postgres: `TEST_DATABASE_URL=... cargo test -- --ignored`

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{app, body_json, request, send, token_for, unique};

async fn create(app: &axum::Router, uri: &str, body: Value) -> Value {
    let token = token_for(true);
    let response = send(app, request("POST", uri, Some(&token), Some(body))).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {}", uri);
    body_json(response).await
}

struct Linked {
    competition: String,
    sport: String,
    link: String,
}

fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}

/// Competition 2024-05-01..2024-05-10 with one sport linked to it
async fn linked(app: &axum::Router) -> Linked {
    let competition = create(
        app,
        "/api/competitions/",
        json!({
            "title": unique("comp"),
            "date_of_start": "2024-05-01",
            "date_of_end": "2024-05-10"
        }),
    )
    .await;
    let sport = create(app, "/api/sports/", json!({ "title": unique("sport") })).await;
    let link = create(
        app,
        "/api/competition_sport/",
        json!({ "competition": competition["id"], "sport": sport["id"] }),
    )
    .await;

    Linked {
        competition: id_of(&competition),
        sport: id_of(&sport),
        link: id_of(&link),
    }
}

async fn linked_competition(app: &axum::Router) -> String {
    linked(app).await.link
}

async fn status_of(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> StatusCode {
    send(app, request(method, uri, Some(&token_for(true)), body))
        .await
        .status()
}

#[tokio::test]
#[ignore]
async fn competition_round_trip() {
    let (app, _db) = app().await;
    let title = unique("ABCD");

    let created = create(
        &app,
        "/api/competitions/",
        json!({ "title": title, "date_of_start": "2024-01-01", "date_of_end": "2024-01-01" }),
    )
    .await;

    let uri = format!("/api/competitions/{}/", created["id"].as_str().unwrap());
    let response = send(&app, request("GET", &uri, Some(&token_for(false)), None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(response).await;
    assert_eq!(fetched["title"], title.as_str());
    assert_eq!(fetched["date_of_start"], "2024-01-01");
    assert_eq!(fetched["date_of_end"], "2024-01-01");
    assert_eq!(fetched["sports"], json!([]));
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore]
async fn duplicate_titles_are_bad_requests() {
    let (app, _db) = app().await;
    let title = unique("sport");
    create(&app, "/api/sports/", json!({ "title": title })).await;

    let response = send(
        &app,
        request("POST", "/api/sports/", Some(&token_for(true)), Some(json!({ "title": title }))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn sports_list_replaces_links() {
    let (app, _db) = app().await;
    let first = create(&app, "/api/sports/", json!({ "title": unique("s1") })).await;
    let second = create(&app, "/api/sports/", json!({ "title": unique("s2") })).await;

    let competition = create(
        &app,
        "/api/competitions/",
        json!({ "title": unique("comp"), "sports": [first["id"]] }),
    )
    .await;
    assert_eq!(competition["sports"], json!([first["id"]]));

    let uri = format!("/api/competitions/{}/", competition["id"].as_str().unwrap());
    let response = send(
        &app,
        request(
            "PUT",
            &uri,
            Some(&token_for(true)),
            Some(json!({ "title": competition["title"], "sports": [second["id"]] })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["sports"], json!([second["id"]]));
}

#[tokio::test]
#[ignore]
async fn stage_dates_are_bounded_by_the_competition() {
    let (app, _db) = app().await;
    let link = linked_competition(&app).await;
    let token = token_for(true);

    let cases = [
        ("2024-05-11", "Stage's date is after end date of competition!"),
        ("2024-04-30", "Stage's date is before start date of competition!"),
    ];
    for (date, message) in cases {
        let response = send(
            &app,
            request(
                "POST",
                "/api/stages/",
                Some(&token),
                Some(json!({ "title": unique("stage"), "date": date, "competition_sport": link })),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", date);
        assert_eq!(body_json(response).await["detail"], message);
    }

    create(
        &app,
        "/api/stages/",
        json!({ "title": unique("stage"), "date": "2024-05-10", "competition_sport": link }),
    )
    .await;
}

#[tokio::test]
#[ignore]
async fn stage_with_unknown_link_is_a_bad_reference() {
    let (app, _db) = app().await;

    let response = send(
        &app,
        request(
            "POST",
            "/api/stages/",
            Some(&token_for(true)),
            Some(json!({
                "title": unique("stage"),
                "competition_sport": uuid::Uuid::new_v4()
            })),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn delete_then_get_is_not_found() {
    let (app, _db) = app().await;
    let sport = create(&app, "/api/sports/", json!({ "title": unique("gone") })).await;
    let uri = format!("/api/sports/{}/", sport["id"].as_str().unwrap());

    let response = send(&app, request("DELETE", &uri, Some(&token_for(true)), None)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, request("GET", &uri, Some(&token_for(false)), None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn regular_users_can_read_lists() {
    let (app, _db) = app().await;

    for uri in [
        "/api/competitions/",
        "/api/sports/",
        "/api/stages/",
        "/api/competition_sport/",
    ] {
        let response = send(&app, request("GET", uri, Some(&token_for(false)), None)).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        assert!(body_json(response).await.is_array());
    }
}

#[tokio::test]
#[ignore]
async fn competition_sport_pairs_are_unique() {
    let (app, _db) = app().await;
    let fixture = linked(&app).await;

    let response = send(
        &app,
        request(
            "POST",
            "/api/competition_sport/",
            Some(&token_for(true)),
            Some(json!({ "competition": fixture.competition, "sport": fixture.sport })),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["detail"],
        "The fields competition, sport must make a unique set."
    );
}

#[tokio::test]
#[ignore]
async fn stage_titles_are_unique_per_link() {
    let (app, _db) = app().await;
    let first = linked(&app).await;
    let second = linked(&app).await;
    let title = unique("stage");

    create(
        &app,
        "/api/stages/",
        json!({ "title": title, "competition_sport": first.link }),
    )
    .await;
    create(
        &app,
        "/api/stages/",
        json!({ "title": title, "competition_sport": second.link }),
    )
    .await;

    let response = send(
        &app,
        request(
            "POST",
            "/api/stages/",
            Some(&token_for(true)),
            Some(json!({ "title": title, "competition_sport": first.link })),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["detail"],
        "The fields title, competition_sport must make a unique set."
    );
}

#[tokio::test]
#[ignore]
async fn stage_update_outside_the_competition_is_rejected() {
    let (app, _db) = app().await;
    let link = linked_competition(&app).await;
    let title = unique("stage");
    let stage = create(
        &app,
        "/api/stages/",
        json!({ "title": title, "date": "2024-05-05", "competition_sport": link }),
    )
    .await;
    let uri = format!("/api/stages/{}/", id_of(&stage));

    let response = send(
        &app,
        request(
            "PUT",
            &uri,
            Some(&token_for(true)),
            Some(json!({ "title": title, "date": "2024-05-11", "competition_sport": link })),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["detail"],
        "Stage's date is after end date of competition!"
    );

    let response = send(&app, request("GET", &uri, Some(&token_for(false)), None)).await;
    assert_eq!(body_json(response).await["date"], "2024-05-05");
}

#[tokio::test]
#[ignore]
async fn deleting_a_competition_removes_its_links_and_stages() {
    let (app, _db) = app().await;
    let fixture = linked(&app).await;
    let stage = create(
        &app,
        "/api/stages/",
        json!({ "title": unique("stage"), "competition_sport": fixture.link }),
    )
    .await;

    let competition = format!("/api/competitions/{}/", fixture.competition);
    assert_eq!(status_of(&app, "DELETE", &competition, None).await, StatusCode::NO_CONTENT);

    let link = format!("/api/competition_sport/{}/", fixture.link);
    let stage = format!("/api/stages/{}/", id_of(&stage));
    let sport = format!("/api/sports/{}/", fixture.sport);
    assert_eq!(status_of(&app, "GET", &link, None).await, StatusCode::NOT_FOUND);
    assert_eq!(status_of(&app, "GET", &stage, None).await, StatusCode::NOT_FOUND);
    assert_eq!(status_of(&app, "GET", &sport, None).await, StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn deleting_a_sport_removes_its_links_and_stages() {
    let (app, _db) = app().await;
    let fixture = linked(&app).await;
    let stage = create(
        &app,
        "/api/stages/",
        json!({ "title": unique("stage"), "competition_sport": fixture.link }),
    )
    .await;

    let sport = format!("/api/sports/{}/", fixture.sport);
    assert_eq!(status_of(&app, "DELETE", &sport, None).await, StatusCode::NO_CONTENT);

    let link = format!("/api/competition_sport/{}/", fixture.link);
    let stage = format!("/api/stages/{}/", id_of(&stage));
    let competition = format!("/api/competitions/{}/", fixture.competition);
    assert_eq!(status_of(&app, "GET", &link, None).await, StatusCode::NOT_FOUND);
    assert_eq!(status_of(&app, "GET", &stage, None).await, StatusCode::NOT_FOUND);
    assert_eq!(status_of(&app, "GET", &competition, None).await, StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn shrinking_a_competition_past_its_stages_is_rejected() {
    let (app, _db) = app().await;
    let fixture = linked(&app).await;
    create(
        &app,
        "/api/stages/",
        json!({ "title": unique("stage"), "date": "2024-05-09", "competition_sport": fixture.link }),
    )
    .await;

    let uri = format!("/api/competitions/{}/", fixture.competition);
    let response = send(
        &app,
        request(
            "PUT",
            &uri,
            Some(&token_for(true)),
            Some(json!({
                "title": unique("comp"),
                "date_of_start": "2024-05-01",
                "date_of_end": "2024-05-05"
            })),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["detail"],
        "Stage's date is after end date of competition!"
    );

    let response = send(&app, request("GET", &uri, Some(&token_for(false)), None)).await;
    assert_eq!(body_json(response).await["date_of_end"], "2024-05-10");
}

#[tokio::test]
#[ignore]
async fn repointing_a_link_checks_its_stages_against_the_new_competition() {
    let (app, _db) = app().await;
    let fixture = linked(&app).await;
    create(
        &app,
        "/api/stages/",
        json!({ "title": unique("stage"), "date": "2024-05-09", "competition_sport": fixture.link }),
    )
    .await;
    let later = create(
        &app,
        "/api/competitions/",
        json!({
            "title": unique("later"),
            "date_of_start": "2024-06-01",
            "date_of_end": "2024-06-10"
        }),
    )
    .await;

    let uri = format!("/api/competition_sport/{}/", fixture.link);
    let response = send(
        &app,
        request(
            "PUT",
            &uri,
            Some(&token_for(true)),
            Some(json!({ "competition": later["id"], "sport": fixture.sport })),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["detail"],
        "Stage's date is before start date of competition!"
    );

    let response = send(&app, request("GET", &uri, Some(&token_for(false)), None)).await;
    assert_eq!(body_json(response).await["competition"], fixture.competition.as_str());
}
