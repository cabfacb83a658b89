//! Router-level tests for the announcement endpoints, backed by the in-memory store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use noticeboard_api::{
    build_router,
    db::{announcements::AnnouncementStore, memory::MemoryStore},
    models::announcement::{Announcement, AnnouncementId},
    services::{announcements::AnnouncementService, credentials::CredentialGate},
    AppState,
};

const TEACHER: &str = "mchen";

async fn app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    store.add_teacher(TEACHER, Some("Ms. Chen")).await;
    let state = AppState {
        announcements: AnnouncementService::new(store.clone()),
        credentials: CredentialGate::new(store.clone()),
    };
    (build_router(state), store)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

fn authed(path: &str) -> String {
    format!("{path}?teacher_username={TEACHER}")
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, created) = send(app, with_json("POST", &authed("/announcements"), body)).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    created
}

fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn public_listing_shows_only_active_soonest_first() {
    let (app, _) = app().await;
    create(&app, json!({ "title": "Later", "message": "", "expiration_date": "2099-06-01T00:00:00Z" })).await;
    create(&app, json!({ "title": "Sooner", "message": "", "expiration_date": "2098-01-01" })).await;
    create(&app, json!({ "title": "Expired", "message": "", "expiration_date": "2020-01-01" })).await;
    create(
        &app,
        json!({
            "title": "Not yet",
            "message": "",
            "start_date": "2098-12-01",
            "expiration_date": "2099-01-01"
        }),
    )
    .await;

    let (status, body) = send(&app, get("/announcements")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), ["Sooner", "Later"]);
}

#[tokio::test]
async fn public_listing_survives_corrupt_rows() {
    let (app, store) = app().await;
    store
        .insert_raw(Announcement {
            id: AnnouncementId(uuid_like(1)),
            title: "Corrupt".into(),
            message: String::new(),
            start_date: Some("whenever".into()),
            expiration_date: Some("not-a-date".into()),
            created_at: "2024-01-01T00:00:00+00:00".into(),
        })
        .await;
    create(&app, json!({ "title": "Fine", "message": "", "expiration_date": "2099-01-01" })).await;

    let (status, body) = send(&app, get("/announcements")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), ["Fine"]);

    let (status, body) = send(&app, get(&authed("/announcements/all"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), ["Fine", "Corrupt"]);
}

#[tokio::test]
async fn empty_public_listing_is_ok() {
    let (app, _) = app().await;
    let (status, body) = send(&app, get("/announcements")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn management_routes_require_known_teacher() {
    let (app, _) = app().await;

    let (status, body) = send(&app, get("/announcements/all")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication required");

    let (status, body) = send(&app, get("/announcements/all?teacher_username=ghost")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid teacher credentials");

    let req = Request::get("/announcements/all")
        .header("X-Teacher-Username", TEACHER)
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        with_json(
            "POST",
            "/announcements",
            json!({ "title": "x", "message": "", "expiration_date": "2099-01-01" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_returns_record_with_id_and_created_at() {
    let (app, _) = app().await;
    let created = create(
        &app,
        json!({
            "title": "Science fair",
            "message": "Gym, 3pm",
            "start_date": "2024-05-01",
            "expiration_date": "2099-05-10T15:00:00-04:00"
        }),
    )
    .await;

    assert!(created["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(created["expiration_date"], "2099-05-10T15:00:00-04:00");
    assert_eq!(created["start_date"], "2024-05-01");
    assert!(created["created_at"].as_str().unwrap().ends_with("+00:00"));
}

#[tokio::test]
async fn create_rejects_bad_dates_without_storing() {
    let (app, store) = app().await;

    let (status, body) = send(
        &app,
        with_json(
            "POST",
            &authed("/announcements"),
            json!({ "title": "x", "message": "", "expiration_date": "not-a-date" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("expiration_date"));

    let (status, _) = send(
        &app,
        with_json(
            "POST",
            &authed("/announcements"),
            json!({ "title": "x", "message": "", "expiration_date": "2099-01-01", "start_date": "eventually" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        with_json("POST", &authed("/announcements"), json!({ "title": "x", "message": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_bodies_get_json_errors() {
    let (app, store) = app().await;

    let (status, body) = send(
        &app,
        with_json(
            "POST",
            &authed("/announcements"),
            json!({ "title": 5, "message": "", "expiration_date": "2099-01-01" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");

    let no_content_type = Request::post(authed("/announcements"))
        .body(Body::from(r#"{"title":"x","message":"","expiration_date":"2099-01-01"}"#))
        .unwrap();
    let (status, body) = send(&app, no_content_type).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");

    let created = create(
        &app,
        json!({ "title": "Bake sale", "message": "", "expiration_date": "2099-01-01" }),
    )
    .await;
    let id = created["id"].as_str().unwrap();
    let truncated = Request::put(authed(&format!("/announcements/{id}")))
        .header("content-type", "application/json")
        .body(Body::from(r#"{"title": "#))
        .unwrap();
    let (status, body) = send(&app, truncated).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");

    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_returns_full_record() {
    let (app, _) = app().await;
    let created = create(
        &app,
        json!({ "title": "Bake sale", "message": "Friday", "expiration_date": "2099-01-01" }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        with_json("PUT", &authed(&format!("/announcements/{id}")), json!({ "message": "Moved to Monday" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["title"], "Bake sale");
    assert_eq!(body["message"], "Moved to Monday");
    assert_eq!(body["created_at"], created["created_at"]);
}

#[tokio::test]
async fn update_error_cases_are_distinct() {
    let (app, _) = app().await;
    let created = create(&app, json!({ "title": "A", "message": "", "expiration_date": "2099-01-01" })).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(&app, with_json("PUT", &authed(&format!("/announcements/{id}")), json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No fields to update");

    let (status, body) = send(
        &app,
        with_json("PUT", &authed(&format!("/announcements/{id}")), json!({ "start_date": "tbd" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("start_date"));

    let (status, body) = send(
        &app,
        with_json("PUT", &authed("/announcements/12345"), json!({ "title": "B" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid id");

    let (status, body) = send(
        &app,
        with_json("PUT", &authed(&format!("/announcements/{}", uuid_like(7))), json!({ "title": "B" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Announcement not found");
}

#[tokio::test]
async fn delete_never_created_is_not_found() {
    let (app, _) = app().await;

    let (status, _) = send(&app, delete(&authed(&format!("/announcements/{}", uuid_like(9))))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, delete(&authed("/announcements/not-an-id"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_record() {
    let (app, _) = app().await;
    let created = create(&app, json!({ "title": "A", "message": "", "expiration_date": "2099-01-01" })).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(&app, delete(&authed(&format!("/announcements/{id}")))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Deleted");

    let (_, body) = send(&app, get("/announcements")).await;
    assert_eq!(body, json!([]));

    let (status, _) = send(&app, delete(&authed(&format!("/announcements/{id}")))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_and_metrics_respond() {
    let (app, _) = app().await;
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    send(&app, get("/announcements")).await;
    let resp = app.clone().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let text = resp.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&text).contains("announcements_active"));
}

fn uuid_like(n: u8) -> String {
    format!("00000000-0000-4000-8000-{:012x}", n)
}
