//! HTTP front end for typin (made by FontLab https://www.fontlab.com/)
//!
//! The original consumer of these operations was a web application, so the
//! CLI can also park itself behind a socket: a tiny axum router exposing
//! activate, deactivate and list to HTTP callers. Same fail-soft contract as
//! the command line — an operation that fails still answers 200 with
//! `success: false`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::task;

use typin_core::manage::FontManager;
use typin_core::output::{FontListing, OperationReport};
use typin_core::platform::Platform;

/// Body for the activate/deactivate endpoints.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FontRequest {
    pub font_path: Option<PathBuf>,
}

/// Run the HTTP server on a fresh runtime until shutdown.
pub fn serve_blocking(bind: &str) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(serve(bind))
}

pub async fn serve(bind: &str) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding HTTP server to {bind}"))?;

    axum::serve(listener, router()).await.context("serving HTTP")?;
    Ok(())
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/activate", post(activate_handler))
        .route("/deactivate", post(deactivate_handler))
        .route("/fonts", get(list_handler))
}

async fn activate_handler(
    Json(req): Json<FontRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let font_path = require_font_path(req)?;

    let report = task::spawn_blocking(move || {
        let manager = FontManager::new(Platform::detect());
        match manager.activate(&font_path) {
            Ok(()) => OperationReport::ok(),
            Err(err) => OperationReport::failed(format!("{err:#}")),
        }
    })
    .await
    .map_err(join_error)?;

    Ok(Json(report))
}

async fn deactivate_handler(
    Json(req): Json<FontRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let font_path = require_font_path(req)?;

    let report = task::spawn_blocking(move || {
        let manager = FontManager::new(Platform::detect());
        match manager.deactivate(&font_path) {
            Ok(()) => OperationReport::ok(),
            Err(err) => OperationReport::failed(format!("{err:#}")),
        }
    })
    .await
    .map_err(join_error)?;

    Ok(Json(report))
}

async fn list_handler() -> Result<impl IntoResponse, (StatusCode, String)> {
    let listing = task::spawn_blocking(|| {
        let manager = FontManager::new(Platform::detect());
        manager.list().map(|fonts| FontListing { fonts })
    })
    .await
    .map_err(join_error)?
    .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, format!("{err:#}")))?;

    Ok(Json(listing))
}

fn require_font_path(req: FontRequest) -> Result<PathBuf, (StatusCode, String)> {
    req.font_path
        .ok_or((StatusCode::BAD_REQUEST, "font_path is required".to_string()))
}

fn join_error(err: task::JoinError) -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("task join error: {err}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::json;
    use std::env;
    use std::fs;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let app = router();
        let request = Request::get("/health").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body.as_ref(), b"ok");
    }

    #[tokio::test]
    async fn activate_requires_a_font_path() {
        let app = router();
        let request = Request::post("/activate")
            .header("content-type", "application/json")
            .body(Body::from(json!({}).to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).expect("utf8 body");
        assert!(text.contains("font_path is required"), "body: {text}");
    }

    #[tokio::test]
    async fn deactivate_requires_a_font_path() {
        let app = router();
        let request = Request::post("/deactivate")
            .header("content-type", "application/json")
            .body(Body::from(json!({}).to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn fonts_endpoint_lists_the_user_directory() {
        let _guard = crate::TEST_ENV_LOCK
            .lock()
            .unwrap_or_else(|e| e.into_inner());

        let fonts = tempfile::tempdir().expect("tempdir");
        fs::write(fonts.path().join("Sample.ttf"), b"").expect("touch font");
        fs::write(fonts.path().join("notes.txt"), b"").expect("touch decoy");

        env::set_var("TYPIN_FONTS_DIR", fonts.path());
        let app = router();
        let request = Request::get("/fonts").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        env::remove_var("TYPIN_FONTS_DIR");

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let parsed: FontListing = serde_json::from_slice(&body).expect("parse listing");
        assert_eq!(parsed.fonts.len(), 1);
        assert!(parsed.fonts[0].ends_with("Sample.ttf"));
    }
}
