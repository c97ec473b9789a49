//! Integration tests for the HTTP endpoints
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use filedeck::http::server::FileDeckServer;
use filedeck::{FileDeckService, ResolutionMode, ServiceConfig};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn test_router() -> (TempDir, PathBuf, Router) {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().canonicalize().unwrap();
    let config = ServiceConfig {
        root_dir: base.clone(),
        mode: ResolutionMode::SingleRoot,
        ..Default::default()
    };
    let service = Arc::new(FileDeckService::new(config).unwrap());
    let router = FileDeckServer::new(service, "localhost", 0).create_router();
    (temp_dir, base, router)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn status_reports_mode_and_version() {
    let (_guard, base, router) = test_router();

    let response = router
        .oneshot(Request::get("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "running");
    assert_eq!(json["data"]["mode"], "single-root");
    assert_eq!(json["data"]["roots"][0], base.to_string_lossy().as_ref());
}

#[tokio::test]
async fn drives_lists_the_confinement_base_in_single_root_mode() {
    let (_guard, base, router) = test_router();

    let response = router
        .oneshot(Request::get("/api/drives").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"], serde_json::json!([base.to_string_lossy()]));
}

#[tokio::test]
async fn browse_returns_sorted_entries() {
    let (_guard, base, router) = test_router();
    fs::write(base.join("B.txt"), "b").unwrap();
    fs::write(base.join("a.txt"), "a").unwrap();
    fs::create_dir(base.join("Sub")).unwrap();

    let response = router
        .oneshot(Request::get("/api/browse?path=").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Sub", "a.txt", "B.txt"]);
    assert_eq!(json["data"][0]["isDir"], true);
    assert!(json["data"][0]["size"].is_null());
}

#[tokio::test]
async fn browse_traversal_is_forbidden() {
    let (_guard, _base, router) = test_router();

    let response = router
        .oneshot(
            Request::get("/api/browse?path=../../../etc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn upload_saves_files_and_rejects_traversal_items_independently() {
    let (_guard, base, router) = test_router();
    fs::create_dir(base.join("up")).unwrap();

    let boundary = "----filedecktestboundary";
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"files\"; filename=\"hello.txt\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         hello world\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"files\"; filename=\"../../evil.sh\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         #!/bin/sh\r\n\
         --{b}--\r\n",
        b = boundary
    );

    let uri = format!("/api/upload?path={}/up", base.display());
    let response = router
        .oneshot(
            Request::post(uri)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["saved"], serde_json::json!(["hello.txt"]));
    assert_eq!(json["data"]["rejected"][0]["name"], "../../evil.sh");

    assert_eq!(
        fs::read_to_string(base.join("up/hello.txt")).unwrap(),
        "hello world"
    );
    assert!(!base.join("evil.sh").exists());
}

#[tokio::test]
async fn upload_without_a_path_is_a_bad_request() {
    let (_guard, _base, router) = test_router();

    let boundary = "----filedecktestboundary";
    let response = router
        .oneshot(
            Request::post("/api/upload")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .body(Body::from(format!("--{b}--\r\n", b = boundary)))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn download_streams_the_file_as_an_attachment() {
    let (_guard, base, router) = test_router();
    fs::write(base.join("report.txt"), "quarterly numbers").unwrap();

    let uri = format!("/api/download?path={}/report.txt", base.display());
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(disposition, "attachment; filename=\"report.txt\"");

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"quarterly numbers");
}

#[tokio::test]
async fn download_of_a_directory_is_not_found() {
    let (_guard, base, router) = test_router();
    fs::create_dir(base.join("dir")).unwrap();

    let uri = format!("/api/download?path={}/dir", base.display());
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_target() {
    let (_guard, base, router) = test_router();
    fs::write(base.join("doomed.txt"), "x").unwrap();

    let payload = serde_json::json!({
        "path": base.join("doomed.txt").to_string_lossy()
    });
    let response = router
        .oneshot(
            Request::delete("/api/delete")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["wasDir"], false);
    assert!(!base.join("doomed.txt").exists());
}

#[tokio::test]
async fn delete_outside_the_base_is_forbidden() {
    let (_guard, _base, router) = test_router();
    let outside = TempDir::new().unwrap();
    fs::write(outside.path().join("victim.txt"), "x").unwrap();

    let payload = serde_json::json!({
        "path": outside.path().join("victim.txt").to_string_lossy()
    });
    let response = router
        .oneshot(
            Request::delete("/api/delete")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(outside.path().join("victim.txt").exists());
}

#[tokio::test]
async fn root_serves_the_embedded_front_end() {
    let (_guard, _base, router) = test_router();

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/html; charset=utf-8"
    );
}
