mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::json;
use uuid::Uuid;

use common::{
    body_json, offline_app, request, send, stale_superuser_token, token_for, token_for_stranger,
};

const COLLECTIONS: [&str; 4] = [
    "/api/competitions/",
    "/api/sports/",
    "/api/stages/",
    "/api/competition_sport/",
];

#[tokio::test]
async fn unauthenticated_list_is_rejected() {
    let app = offline_app();

    let response = send(&app, request("GET", "/api/competitions/", None, None)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["detail"],
        "Authentication credentials were not provided."
    );
}

#[tokio::test]
async fn unauthenticated_writes_are_rejected_everywhere() {
    let app = offline_app();

    for collection in COLLECTIONS {
        let response = send(&app, request("POST", collection, None, Some(json!({})))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", collection);

        let item = format!("{}{}/", collection, Uuid::new_v4());
        let response = send(&app, request("DELETE", &item, None, None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", item);
    }
}

#[tokio::test]
async fn regular_users_cannot_write() {
    let app = offline_app();
    let token = token_for(false);

    for collection in COLLECTIONS {
        let response = send(
            &app,
            request("POST", collection, Some(&token), Some(json!({ "title": "A" }))),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", collection);

        let item = format!("{}{}/", collection, Uuid::new_v4());
        for method in ["PUT", "DELETE"] {
            let response = send(&app, request(method, &item, Some(&token), Some(json!({})))).await;
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{} {}", method, item);
        }
    }
}

#[tokio::test]
async fn slashless_paths_are_gated_too() {
    let app = offline_app();
    let token = token_for(false);

    let response = send(
        &app,
        request("POST", "/api/sports", Some(&token), Some(json!({ "title": "A" }))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn patch_is_refused_even_for_superusers() {
    let app = offline_app();
    let token = token_for(true);
    let item = format!("/api/competitions/{}/", Uuid::new_v4());

    let response = send(&app, request("PATCH", &item, Some(&token), Some(json!({})))).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn forged_tokens_count_as_anonymous() {
    let app = offline_app();

    let response = send(
        &app,
        request("GET", "/api/competitions/", Some("not.a.token"), None),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn superuser_inverted_dates_fail_before_storage() {
    let app = offline_app();
    let token = token_for(true);

    let response = send(
        &app,
        request(
            "POST",
            "/api/competitions/",
            Some(&token),
            Some(json!({
                "title": "X",
                "date_of_start": "2024-01-02",
                "date_of_end": "2024-01-01"
            })),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["detail"],
        "End date must not be set before the start date"
    );
}

#[tokio::test]
async fn superuser_empty_title_is_a_field_error() {
    let app = offline_app();
    let token = token_for(true);

    let response = send(
        &app,
        request("POST", "/api/sports/", Some(&token), Some(json!({ "title": "" }))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["errors"]["title"].is_array());
}

#[tokio::test]
async fn api_root_lists_collections() {
    let app = offline_app();
    let token = token_for(false);

    let response = send(&app, request("GET", "/api/", Some(&token), None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["stages"], "/api/stages/");
    assert_eq!(body["competition_sport"], "/api/competition_sport/");
}

#[tokio::test]
async fn token_endpoint_validates_credentials_shape() {
    let app = offline_app();

    let response = send(
        &app,
        request(
            "POST",
            "/api/token/",
            None,
            Some(json!({ "username": "", "password": "" })),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tokens_of_deleted_users_are_anonymous() {
    let app = offline_app();
    let token = token_for_stranger();

    let response = send(&app, request("GET", "/api/sports/", Some(&token), None)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn demoted_users_lose_write_access_with_old_tokens() {
    let app = offline_app();
    let token = stale_superuser_token();

    let response = send(
        &app,
        request("POST", "/api/sports/", Some(&token), Some(json!({ "title": "A" }))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn missing_required_field_is_a_bad_request() {
    let app = offline_app();
    let token = token_for(true);

    let response = send(
        &app,
        request(
            "POST",
            "/api/competitions/",
            Some(&token),
            Some(json!({ "date_of_start": "2024-01-01" })),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let detail = body_json(response).await["detail"].as_str().unwrap().to_string();
    assert!(detail.contains("title"), "{}", detail);
}

#[tokio::test]
async fn unparsable_date_is_a_bad_request() {
    let app = offline_app();
    let token = token_for(true);

    let response = send(
        &app,
        request(
            "POST",
            "/api/competitions/",
            Some(&token),
            Some(json!({ "title": "X", "date_of_start": "nope" })),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["detail"].is_string());
}

#[tokio::test]
async fn body_without_json_content_type_is_a_bad_request() {
    let app = offline_app();
    let token = token_for(true);

    let request = Request::builder()
        .method("POST")
        .uri("/api/sports/")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(r#"{"title":"A"}"#))
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["detail"].is_string());
}

#[tokio::test]
async fn incomplete_login_form_is_a_bad_request() {
    let app = offline_app();

    let request = Request::builder()
        .method("POST")
        .uri("/accounts/login/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("next=%2F"))
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["detail"].is_string());
}
