#![cfg(feature = "http_api")]

use axum::{
    body::{self, Body},
    http::{Request, StatusCode, header},
};
use class_schedule_ics::{ColumnLayout, http_api};
use serde_json::{Value, json};
use tower::util::ServiceExt;

const SCHEDULE_CSV: &str = "Start,End,Group,Type,Subject,Code,Kind,Teacher,Notes,Id,Room\n\
                            24.03.2025 09:00,24.03.2025 10:30,,,Databases,,Lecture,,,,A1\n\
                            25.03.2025 09:00,25.03.2025 10:30,,,,,,,,,\n";

fn new_router() -> axum::Router {
    let state = http_api::AppState::new(ColumnLayout::default());
    http_api::router(state)
}

fn upload(uri: &str, body: &'static [u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::from(body))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn convert_returns_calendar_download() {
    let response = new_router()
        .oneshot(upload("/convert?filename=plan.csv", SCHEDULE_CSV.as_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers().clone();
    assert_eq!(headers[header::CONTENT_TYPE], "text/calendar; charset=utf-8");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"class_schedule.ics\""
    );
    assert_eq!(headers["x-skipped-rows"], "1");

    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert_eq!(text.matches("BEGIN:VEVENT").count(), 1);
    assert!(text.contains("LOCATION:A1"));
}

#[tokio::test]
async fn convert_report_lists_skipped_rows() {
    let response = new_router()
        .oneshot(upload("/convert/report?filename=plan.csv", SCHEDULE_CSV.as_bytes()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(report["file_name"], "class_schedule.ics");
    assert_eq!(report["event_count"], 1);
    assert_eq!(report["rows_examined"], 2);
    assert_eq!(report["skipped"], json!([{ "row": 2, "missing": ["summary"] }]));
}

#[tokio::test]
async fn corrupt_upload_is_a_bad_request() {
    let response = new_router()
        .oneshot(upload("/convert", b"not a workbook"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn unknown_extension_is_unsupported() {
    let response = new_router()
        .oneshot(upload("/convert?filename=plan.pdf", b"%PDF"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn layout_update_applies_to_later_conversions() {
    let app = new_router();
    let mut layout = ColumnLayout::default();
    layout.summary_col = 3;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/layout")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&layout).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stored: ColumnLayout = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(stored, layout);

    let response = app
        .clone()
        .oneshot(upload("/convert?filename=plan.csv", SCHEDULE_CSV.as_bytes()))
        .await
        .unwrap();
    assert_eq!(response.headers()["x-skipped-rows"], "2");
}

#[tokio::test]
async fn layout_accepts_far_columns() {
    let mut layout = ColumnLayout::default();
    layout.start_col = usize::MAX;

    let response = new_router()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/layout")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&layout).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stored: ColumnLayout = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(stored.start_col, usize::MAX);
}

#[tokio::test]
async fn health_reports_ok() {
    let response = new_router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
