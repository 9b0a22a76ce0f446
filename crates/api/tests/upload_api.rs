//! HTTP-level tests for image uploads, using an in-memory uploader.

mod common;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use common::body_json;
use sqlx::PgPool;
use tablehost_api::media::{MediaError, MediaUploader};
use tablehost_core::api_keys::API_KEY_HEADER;
use tower::ServiceExt;

const BOUNDARY: &str = "tablehost-test-boundary";

/// Records every upload and answers with a fixed CDN url.
#[derive(Default)]
struct RecordingUploader {
    uploads: Mutex<Vec<(String, String, usize)>>,
}

#[async_trait]
impl MediaUploader for RecordingUploader {
    async fn upload(&self, bytes: Vec<u8>, filename: &str, content_type: &str) -> Result<String, MediaError> {
        self.uploads
            .lock()
            .unwrap()
            .push((filename.to_string(), content_type.to_string(), bytes.len()));
        Ok(format!("https://cdn.example.com/{filename}"))
    }
}

/// Always answers with a rejection from the media API.
struct FailingUploader;

#[async_trait]
impl MediaUploader for FailingUploader {
    async fn upload(&self, _: Vec<u8>, _: &str, _: &str) -> Result<String, MediaError> {
        Err(MediaError::Rejected {
            status: 503,
            body: "maintenance".into(),
        })
    }
}

fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n").as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(app: Router, body: Vec<u8>) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/uploads")
        .header(API_KEY_HEADER, common::TEST_API_KEY)
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-data";

#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_image(pool: PgPool) {
    let uploader = Arc::new(RecordingUploader::default());
    let app = common::build_test_app_with_media(pool, uploader.clone());

    let response = upload(app, multipart_body("file", "table.png", "image/png", PNG_BYTES)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["url"], "https://cdn.example.com/table.png");

    let uploads = uploader.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0], ("table.png".to_string(), "image/png".to_string(), PNG_BYTES.len()));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_image_is_rejected(pool: PgPool) {
    let uploader = Arc::new(RecordingUploader::default());
    let app = common::build_test_app_with_media(pool, uploader.clone());

    let response = upload(app, multipart_body("file", "menu.pdf", "application/pdf", b"%PDF-1.7")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(uploader.uploads.lock().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_file_field_is_rejected(pool: PgPool) {
    let app = common::build_test_app_with_media(pool, Arc::new(RecordingUploader::default()));

    let response = upload(app, multipart_body("picture", "table.png", "image/png", PNG_BYTES)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["errorMessage"].as_str().unwrap().contains("file"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_file_is_rejected(pool: PgPool) {
    let app = common::build_test_app_with_media(pool, Arc::new(RecordingUploader::default()));
    let response = upload(app, multipart_body("file", "table.png", "image/png", b"")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unconfigured_media_returns_500(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = upload(app, multipart_body("file", "table.png", "image/png", PNG_BYTES)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["message"], "INTERNAL_ERROR");
    assert_eq!(json["errorMessage"], "An internal error occurred");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_media_api_failure_is_sanitized(pool: PgPool) {
    let app = common::build_test_app_with_media(pool, Arc::new(FailingUploader));

    let response = upload(app, multipart_body("file", "table.png", "image/png", PNG_BYTES)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(!json["errorMessage"].as_str().unwrap().contains("maintenance"));
}
