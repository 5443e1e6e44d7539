pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::session::handlers;
use crate::state::AppState;

/// Headroom over the raw image limit for multipart framing.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/images/:slot",
            put(handlers::handle_upload_image).delete(handlers::handle_remove_image),
        )
        .route(
            "/api/v1/sessions/:id/swap",
            post(handlers::handle_swap_images),
        )
        .route(
            "/api/v1/sessions/:id/config",
            put(handlers::handle_update_config),
        )
        .route(
            "/api/v1/sessions/:id/preview",
            get(handlers::handle_get_preview),
        )
        .route(
            "/api/v1/sessions/:id/preview/pointer",
            post(handlers::handle_pointer_event),
        )
        .route(
            "/api/v1/sessions/:id/export",
            get(handlers::handle_download_export).post(handlers::handle_store_export),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::artifact::ArtifactGenerator;
    use crate::config::Config;
    use crate::session::{DirectorySink, SessionStore};

    const BOUNDARY: &str = "slider-test-boundary";
    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn test_state(export_dir: Option<&std::path::Path>) -> AppState {
        let config = Config {
            export_dir: export_dir.map(|p| p.to_path_buf()),
            ..Config::default()
        };
        AppState {
            sessions: SessionStore::default(),
            generator: Arc::new(ArtifactGenerator::default()),
            sink: export_dir
                .map(|p| Arc::new(DirectorySink::new(p)) as Arc<dyn crate::session::ArtifactSink>),
            config,
        }
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>, header::HeaderMap) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec(), headers)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn upload_request(uri: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn create_session(app: &Router, config: Value) -> String {
        let (status, body, _) = send(
            app,
            json_request(Method::POST, "/api/v1/sessions", json!({ "config": config })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let summary: Value = serde_json::from_slice(&body).unwrap();
        summary["id"].as_str().unwrap().to_string()
    }

    async fn upload_both(app: &Router, id: &str) {
        for slot in ["before", "after"] {
            let uri = format!("/api/v1/sessions/{id}/images/{slot}");
            let (status, _, _) = send(app, upload_request(&uri, "shot.png", "image/png", PNG_MAGIC)).await;
            assert_eq!(status, StatusCode::OK, "upload {slot}");
        }
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(None));
        let (status, body, _) = send(&app, empty_request(Method::GET, "/health")).await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_without_body_uses_defaults() {
        let app = build_router(test_state(None));
        let (status, body, _) = send(&app, empty_request(Method::POST, "/api/v1/sessions")).await;
        assert_eq!(status, StatusCode::CREATED);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["config"]["orientation"], "horizontal");
        assert_eq!(json["config"]["slider_color"], "#3b82f6");
        assert_eq!(json["ready_to_export"], false);
    }

    #[tokio::test]
    async fn test_create_with_invalid_config_is_rejected() {
        let app = build_router(test_state(None));
        for body in [
            json!({ "config": { "orientation": "diagonal" } }),
            json!({ "config": { "initial_position": "abc" } }),
        ] {
            let (status, response, _) =
                send(&app, json_request(Method::POST, "/api/v1/sessions", body.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            let json: Value = serde_json::from_slice(&response).unwrap();
            assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn test_create_with_malformed_json_is_rejected() {
        let app = build_router(test_state(None));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/sessions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"config\":"))
            .unwrap();
        let (status, _, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_before_upload_is_conflict() {
        let app = build_router(test_state(None));
        let id = create_session(&app, json!({})).await;
        let (status, body, _) =
            send(&app, empty_request(Method::GET, &format!("/api/v1/sessions/{id}/export"))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "MISSING_IMAGE");
    }

    #[tokio::test]
    async fn test_upload_then_download_export() {
        let app = build_router(test_state(None));
        let id = create_session(&app, json!({ "after_label": "After", "initial_position": 150 })).await;
        upload_both(&app, &id).await;

        let (status, body, headers) =
            send(&app, empty_request(Method::GET, &format!("/api/v1/sessions/{id}/export"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"notion-avant-apres.html\""
        );

        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("src=\"data:image/png;base64,iVBORw0KGgo=\" class=\"img-base\""));
        assert!(html.contains("updateSlider(100);"));
        assert_eq!(html.matches("class=\"label label-after\"").count(), 1);
    }

    #[tokio::test]
    async fn test_upload_rejects_non_image() {
        let app = build_router(test_state(None));
        let id = create_session(&app, json!({})).await;
        let uri = format!("/api/v1/sessions/{id}/images/before");
        let (status, _, _) = send(&app, upload_request(&uri, "notes.txt", "text/plain", b"hi")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_to_unknown_session_is_not_found() {
        let app = build_router(test_state(None));
        let uri = format!("/api/v1/sessions/{}/images/after", uuid::Uuid::new_v4());
        let (status, _, _) = send(&app, upload_request(&uri, "a.png", "image/png", PNG_MAGIC)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_pointer_drag_through_http() {
        let app = build_router(test_state(None));
        let id = create_session(&app, json!({ "orientation": "vertical" })).await;
        let uri = format!("/api/v1/sessions/{id}/preview/pointer");
        let bounds = json!({ "x": 0.0, "y": 100.0, "width": 300.0, "height": 200.0 });

        let (status, body, _) = send(
            &app,
            json_request(
                Method::POST,
                &uri,
                json!({ "event": { "kind": "down", "point": { "x": 10.0, "y": 150.0 } }, "bounds": bounds.clone() }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let view: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(view["position"], 25.0);
        assert_eq!(view["dragging"], true);

        let (_, body, _) = send(
            &app,
            json_request(
                Method::POST,
                &uri,
                json!({ "event": { "kind": "move", "point": { "x": 10.0, "y": -40.0 } }, "bounds": bounds.clone() }),
            ),
        )
        .await;
        let view: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(view["position"], 0.0);
        assert_eq!(view["clip_css"], "inset(0 0 100% 0)");
        assert_eq!(view["before_label_visible"], false);

        let (_, body, _) = send(
            &app,
            json_request(Method::POST, &uri, json!({ "event": { "kind": "up" } })),
        )
        .await;
        let view: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(view["dragging"], false);
        assert_eq!(view["position"], 0.0);
    }

    #[tokio::test]
    async fn test_pointer_move_without_bounds_is_rejected() {
        let app = build_router(test_state(None));
        let id = create_session(&app, json!({})).await;
        let (status, _, _) = send(
            &app,
            json_request(
                Method::POST,
                &format!("/api/v1/sessions/{id}/preview/pointer"),
                json!({ "event": { "kind": "move", "point": { "x": 1.0, "y": 1.0 } } }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_swap_changes_exported_base_image() {
        let app = build_router(test_state(None));
        let id = create_session(&app, json!({})).await;
        let before_uri = format!("/api/v1/sessions/{id}/images/before");
        let after_uri = format!("/api/v1/sessions/{id}/images/after");
        send(&app, upload_request(&before_uri, "b.gif", "image/gif", b"GIF89a")).await;
        send(&app, upload_request(&after_uri, "a.png", "image/png", PNG_MAGIC)).await;

        let (status, _, _) =
            send(&app, empty_request(Method::POST, &format!("/api/v1/sessions/{id}/swap"))).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body, _) =
            send(&app, empty_request(Method::GET, &format!("/api/v1/sessions/{id}/export"))).await;
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("src=\"data:image/gif;base64,R0lGODlh\" class=\"img-base\""));
    }

    #[tokio::test]
    async fn test_store_export_disabled_without_dir() {
        let app = build_router(test_state(None));
        let id = create_session(&app, json!({})).await;
        upload_both(&app, &id).await;
        let (status, _, _) =
            send(&app, empty_request(Method::POST, &format!("/api/v1/sessions/{id}/export"))).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn test_store_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(Some(dir.path())));
        let id = create_session(&app, json!({})).await;
        upload_both(&app, &id).await;

        let (status, body, _) =
            send(&app, empty_request(Method::POST, &format!("/api/v1/sessions/{id}/export"))).await;
        assert_eq!(status, StatusCode::CREATED);
        let stored: Value = serde_json::from_slice(&body).unwrap();
        let path = stored["path"].as_str().unwrap();
        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(path.ends_with("notion-avant-apres.html"));
    }

    #[tokio::test]
    async fn test_config_update_resets_preview() {
        let app = build_router(test_state(None));
        let id = create_session(&app, json!({})).await;
        let (status, body, _) = send(
            &app,
            json_request(
                Method::PUT,
                &format!("/api/v1/sessions/{id}/config"),
                json!({ "initial_position": -20, "orientation": "vertical" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let summary: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(summary["preview"]["position"], 0.0);
        assert_eq!(summary["preview"]["handle"]["offset_property"], "top");
    }

    #[tokio::test]
    async fn test_delete_session() {
        let app = build_router(test_state(None));
        let id = create_session(&app, json!({})).await;
        let uri = format!("/api/v1/sessions/{id}");
        let (status, _, _) = send(&app, empty_request(Method::DELETE, &uri)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _, _) = send(&app, empty_request(Method::GET, &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
