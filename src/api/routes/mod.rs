pub mod domains;
pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::middleware::request_logger;
use crate::api::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = build_cors(&state.config.cors.allowed_origins);
    let body_limit = state.config.uploads.max_body_bytes;

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/domain", domain_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_logger))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(origins)
    }
}

fn domain_routes() -> Router<AppState> {
    Router::new()
        .route("/createDomain", post(domains::create_domain))
        .route("/getDomain/{id}", get(domains::get_domain))
        .route("/getAllDomains", get(domains::get_all_domains))
        .route("/updateDomain", put(domains::update_domain))
        .route("/deleteDomain/{id}", delete(domains::delete_domain))
        .route("/downloadMapper/{id}", get(domains::download_mapper))
        .route("/renderImage/{id}", get(domains::render_image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use serde_json::Value;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::application::DomainManager;
    use crate::infrastructure::{AppConfig, InMemoryDomainStore, LocalFileStore};

    const BOUNDARY: &str = "domain-registry-test-boundary";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a [u8]),
    }

    fn multipart_body(parts: &[Part]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                            .as_bytes(),
                    );
                }
                Part::File(name, file_name, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(method: Method, uri: &str, parts: &[Part]) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn test_app() -> (TempDir, Router) {
        let temp = TempDir::new().unwrap();
        let files = Arc::new(
            LocalFileStore::new(temp.path().join("uploads"))
                .await
                .unwrap(),
        );
        let manager = DomainManager::new(Arc::new(InMemoryDomainStore::new()), files);
        let app = create_router(AppState::new(manager, AppConfig::default()));
        (temp, app)
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create_acme(app: &Router) -> Value {
        let response = send(
            app,
            multipart_request(
                Method::POST,
                "/domain/createDomain",
                &[
                    Part::Text("title", "Acme"),
                    Part::Text("url", "https://acme.test"),
                    Part::Text("description", "Acme mappings"),
                    Part::File("file", "mapper.xlsx", b"sheet"),
                    Part::File("image", "acme.png", b"png-bytes"),
                ],
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await
    }

    #[tokio::test]
    async fn test_health() {
        let (_temp, app) = test_app().await;

        let response = send(&app, empty_request(Method::GET, "/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "healthy");

        let response = send(&app, empty_request(Method::GET, "/ready")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["database"], "connected");
    }

    #[tokio::test]
    async fn test_create_get_and_list() {
        let (_temp, app) = test_app().await;

        let created = create_acme(&app).await;
        assert_eq!(created["status"], "success");
        assert_eq!(created["message"], "Domain created successfully");
        let id = created["domain"]["id"].as_str().unwrap().to_string();

        let response = send(&app, empty_request(Method::GET, &format!("/domain/getDomain/{id}"))).await;
        let body = json_body(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["domain"]["title"], "Acme");
        assert_eq!(body["domain"]["fileName"], "Acme_mapper");

        let response = send(&app, empty_request(Method::GET, "/domain/getAllDomains")).await;
        let body = json_body(response).await;
        assert_eq!(body["domains"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failures_are_reported_with_ok_status() {
        let (_temp, app) = test_app().await;
        create_acme(&app).await;

        let duplicate = send(
            &app,
            multipart_request(
                Method::POST,
                "/domain/createDomain",
                &[
                    Part::Text("title", "Acme"),
                    Part::Text("url", "https://acme.test"),
                    Part::Text("description", "again"),
                    Part::File("file", "other.xlsx", b"x"),
                    Part::File("image", "other.png", b"x"),
                ],
            ),
        )
        .await;
        assert_eq!(duplicate.status(), StatusCode::OK);
        let body = json_body(duplicate).await;
        assert_eq!(body["status"], "failed");
        assert_eq!(body["error"], "conflict_error");

        let missing_files = send(
            &app,
            multipart_request(
                Method::POST,
                "/domain/createDomain",
                &[
                    Part::Text("title", "Globex"),
                    Part::Text("url", "https://globex.test"),
                    Part::Text("description", "no files"),
                ],
            ),
        )
        .await;
        let body = json_body(missing_files).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "Both mapper file and image are required");

        let not_multipart = send(&app, empty_request(Method::POST, "/domain/createDomain")).await;
        assert_eq!(not_multipart.status(), StatusCode::OK);
        assert_eq!(json_body(not_multipart).await["error"], "validation_error");

        let unknown = send(
            &app,
            empty_request(
                Method::GET,
                &format!("/domain/getDomain/{}", uuid::Uuid::new_v4()),
            ),
        )
        .await;
        assert_eq!(json_body(unknown).await["error"], "not_found_error");
    }

    #[tokio::test]
    async fn test_download_and_render_headers() {
        let (_temp, app) = test_app().await;
        let created = create_acme(&app).await;
        let id = created["domain"]["id"].as_str().unwrap();

        let response = send(
            &app,
            empty_request(Method::GET, &format!("/domain/downloadMapper/{id}")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Acme_mapper.xlsx\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"sheet");

        let response = send(
            &app,
            empty_request(Method::GET, &format!("/domain/renderImage/{id}")),
        )
        .await;
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "inline; filename=\"acme.png\""
        );
    }

    #[tokio::test]
    async fn test_render_missing_image_reports_file_missing() {
        let (_temp, app) = test_app().await;
        let created = create_acme(&app).await;
        let id = created["domain"]["id"].as_str().unwrap();
        std::fs::remove_file(created["domain"]["imagePath"].as_str().unwrap()).unwrap();

        let response = send(
            &app,
            empty_request(Method::GET, &format!("/domain/renderImage/{id}")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "failed");
        assert_eq!(body["error"], "file_missing_error");
    }

    #[tokio::test]
    async fn test_update_then_delete() {
        let (_temp, app) = test_app().await;
        let created = create_acme(&app).await;
        let id = created["domain"]["id"].as_str().unwrap().to_string();

        let response = send(
            &app,
            multipart_request(
                Method::PUT,
                "/domain/updateDomain",
                &[
                    Part::Text("id", &id),
                    Part::Text("description", "Revised"),
                    Part::File("file", "", b""),
                ],
            ),
        )
        .await;
        let body = json_body(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["domain"]["description"], "Revised");
        assert_eq!(body["domain"]["title"], "Acme");
        assert_eq!(
            body["domain"]["mapperFileUrl"],
            created["domain"]["mapperFileUrl"]
        );

        let response = send(
            &app,
            empty_request(Method::DELETE, &format!("/domain/deleteDomain/{id}")),
        )
        .await;
        let body = json_body(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Domain deleted successfully");

        let response = send(&app, empty_request(Method::GET, &format!("/domain/getDomain/{id}"))).await;
        assert_eq!(json_body(response).await["error"], "not_found_error");
    }
}
