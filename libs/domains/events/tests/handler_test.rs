//! Handler tests for the events domain
//!
//! Drive the domain router with `oneshot` over the in-memory repository:
//! - request parsing (envelope body, query parameters)
//! - response envelope and status codes
//! - error bodies

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_events::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

fn app() -> (Router, Arc<MemoryAuditSink>) {
    let sink = Arc::new(MemoryAuditSink::new());
    let service = EventService::new(InMemoryEventRepository::new()).with_audit_sink(sink.clone());
    (handlers::router(service), sink)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
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

fn put(uri: &str) -> Request<Body> {
    Request::put(uri).body(Body::empty()).unwrap()
}

fn post_json(body: Value) -> Request<Body> {
    Request::post("/")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn payload(author: &str, location: &str) -> Value {
    json!({
        "data": {
            "authorId": author,
            "locationId": location,
            "dateStart": "2024-01-01",
            "dateEnd": "2024-01-02"
        }
    })
}

async fn create(app: &Router, author: &str) -> String {
    let (status, body) = send(app, post_json(payload(author, "loc1"))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_returns_201_with_planned_event() {
    let (app, sink) = app();
    let builder = TestDataBuilder::from_test_name("handler_create_201");
    let author = builder.user_id();

    let (status, body) = send(&app, post_json(payload(&author, "loc1"))).await;

    assert_eq!(status, StatusCode::CREATED);
    let event = &body["data"];
    assert!(!event["_id"].as_str().unwrap().is_empty());
    assert_eq!(event["status"], "PLANNED");
    assert_eq!(event["authorId"], author.as_str());
    assert_eq!(event["memberIds"], json!([]));
    assert_eq!(event["isPublic"], false);
    assert_eq!(event["title"], Value::Null);
    assert_eq!(event["dateCreated"], event["dateModified"]);
    assert_eq!(sink.operations(), vec!["createEvent"]);
}

#[tokio::test]
async fn test_create_rejects_empty_author() {
    let (app, sink) = app();

    let (status, body) = send(&app, post_json(payload("", "loc1"))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"].is_object());
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn test_create_rejects_malformed_body() {
    let (app, _) = app();

    let (status, body) = send(&app, post_json(json!({ "data": { "authorId": "u1" } }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_get_returns_event_envelope() {
    let (app, _) = app();
    let id = create(&app, "u1").await;

    let (status, body) = send(&app, get(&format!("/{id}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["_id"], id.as_str());
    assert_eq!(body["data"]["locationId"], "loc1");
}

#[tokio::test]
async fn test_get_missing_is_404() {
    let (app, _) = app();

    let (status, body) = send(&app, get("/missing-1")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["message"], "event 'missing-1' not found");
}

#[tokio::test]
async fn test_list_filters_by_author_and_pages() {
    let (app, sink) = app();
    let mut mine = Vec::new();
    for _ in 0..3 {
        mine.push(create(&app, "u1").await);
    }
    create(&app, "u2").await;

    let (status, body) = send(&app, get("/?authorId=u1")).await;
    assert_eq!(status, StatusCode::OK);
    let events = body["data"].as_array().unwrap();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e["authorId"] == "u1"));

    let (_, body) = send(&app, get("/?authorId=u1&offset=1&limit=1")).await;
    let page = body["data"].as_array().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["_id"], mine[1].as_str());

    let (_, body) = send(&app, get("/?limit=0")).await;
    assert_eq!(body["data"], json!([]));

    let last = sink.records().pop().unwrap();
    assert_eq!(last.operation, "findEvents");
    assert_eq!(last.params["limit"], 0);
}

#[tokio::test]
async fn test_list_defaults_to_ten() {
    let (app, _) = app();
    for _ in 0..12 {
        create(&app, "u1").await;
    }

    let (_, body) = send(&app, get("/")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_list_by_members_and_date_range() {
    let (app, _) = app();
    let id = create(&app, "u1").await;
    create(&app, "u1").await;
    send(&app, put(&format!("/{id}?add=m2&dateStart=2024-03-01"))).await;

    let (_, body) = send(&app, get("/?memberIds=m1,m2")).await;
    let events = body["data"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["_id"], id.as_str());

    let (_, body) = send(&app, get("/?dateFrom=2024-02-01&dateUntil=2024-03-01")).await;
    let events = body["data"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["_id"], id.as_str());
}

#[tokio::test]
async fn test_list_rejects_bad_query() {
    let (app, _) = app();

    let (status, body) = send(&app, get("/?limit=ten")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_QUERY");
}

#[tokio::test]
async fn test_put_applies_each_present_parameter() {
    let (app, sink) = app();
    let id = create(&app, "u1").await;
    let before = sink.records().len();

    let uri = format!(
        "/{id}?title=Standup&add=m1&isPublic=true&location=loc2&dateStart=2024-05-01T09:00:00Z&dateEnd=2024-05-01"
    );
    let (status, _) = send(&app, put(&uri)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get(&format!("/{id}"))).await;
    let event = &body["data"];
    assert_eq!(event["title"], "Standup");
    assert_eq!(event["memberIds"], json!(["m1"]));
    assert_eq!(event["isPublic"], true);
    assert_eq!(event["locationId"], "loc2");
    assert_eq!(event["dateStart"], "2024-05-01T09:00:00Z");
    assert_eq!(event["dateEnd"], "2024-05-01T00:00:00Z");

    let operations = sink.operations();
    assert_eq!(
        operations[before..before + 6],
        vec![
            "updateEventTitle",
            "addEventMember",
            "updateEventIsPublic",
            "updateEventLocation",
            "updateEventStart",
            "updateEventEnd",
        ]
    );
}

#[tokio::test]
async fn test_put_add_then_drop_removes_member() {
    let (app, _) = app();
    let id = create(&app, "u1").await;

    send(&app, put(&format!("/{id}?add=m1"))).await;
    send(&app, put(&format!("/{id}?add=m1"))).await;
    let (status, _) = send(&app, put(&format!("/{id}?drop=m1"))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get(&format!("/{id}"))).await;
    assert_eq!(body["data"]["memberIds"], json!([]));
}

#[tokio::test]
async fn test_put_missing_event_is_404() {
    let (app, sink) = app();

    let (status, body) = send(&app, put("/missing-1?title=New")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "event 'missing-1' not found");
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn test_put_rejects_invalid_flag() {
    let (app, _) = app();
    let id = create(&app, "u1").await;

    let (status, body) = send(&app, put(&format!("/{id}?isPublic=maybe"))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_QUERY");
}

#[tokio::test]
async fn test_put_ignores_blank_flag() {
    let (app, sink) = app();
    let id = create(&app, "u1").await;
    let before = sink.records().len();

    let (status, _) = send(&app, put(&format!("/{id}?isPublic=&title=Retro"))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get(&format!("/{id}"))).await;
    assert_eq!(body["data"]["title"], "Retro");
    assert_eq!(body["data"]["isPublic"], false);
    assert_eq!(sink.operations()[before..before + 1], ["updateEventTitle"]);
}

#[tokio::test]
async fn test_list_ignores_blank_paging_and_filters() {
    let (app, _) = app();
    for _ in 0..12 {
        create(&app, "u1").await;
    }

    let (status, body) = send(&app, get("/?offset=&limit=&authorId=&isPublic=")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_delete_cancels_and_is_repeatable() {
    let (app, _) = app();
    let id = create(&app, "u1").await;
    let uri = format!("/{id}");

    for _ in 0..2 {
        let request = Request::delete(&uri).body(Body::empty()).unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, get(&uri)).await;
    assert_eq!(body["data"]["status"], "CANCELLED");
}

#[tokio::test]
async fn test_delete_missing_is_404() {
    let (app, _) = app();

    let request = Request::delete("/missing-1").body(Body::empty()).unwrap();
    let (status, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
