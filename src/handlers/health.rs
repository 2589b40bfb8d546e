use crate::error::{HealthResponse, UnhealthyResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /health handler - Health check endpoint
///
/// Reads the route store strictly. Returns 200 OK with the route count when
/// the file is absent or well-formed, 503 Service Unavailable otherwise.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Route store is unreadable", body = UnhealthyResponse)
    ),
    tag = "health"
)]
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<HealthResponse>), (StatusCode, Json<UnhealthyResponse>)> {
    match state.store.load_strict().await {
        Ok(routes) => {
            tracing::debug!("Health check passed");
            Ok((
                StatusCode::OK,
                Json(HealthResponse {
                    status: "healthy".to_string(),
                    routes: routes.len(),
                }),
            ))
        }
        Err(e) => {
            tracing::error!("Health check failed: {:#}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnhealthyResponse {
                    status: "unhealthy".to_string(),
                    error: format!("Cannot read route store: {:#}", e),
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn setup_test_app() -> (TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            routes_file: dir.path().join("routes.json"),
            word_bank_file: None,
            service_port: 3000,
            service_host: "0.0.0.0".to_string(),
        };

        let app = Router::new()
            .route(crate::routes::HEALTH, get(health_handler))
            .with_state(AppState::from_config(config));
        (dir, app)
    }

    async fn get_health(app: Router) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint_healthy() {
        let (dir, app) = setup_test_app();
        std::fs::write(
            dir.path().join("routes.json"),
            r#"[{"path": "/a", "redirect_url": "https://a.example"}]"#,
        )
        .unwrap();

        let (status, body) = get_health(app).await;

        assert_eq!(status, StatusCode::OK);
        let response: HealthResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.status, "healthy");
        assert_eq!(response.routes, 1);
    }

    #[tokio::test]
    async fn test_health_endpoint_without_store_file() {
        let (_dir, app) = setup_test_app();

        let (status, body) = get_health(app).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["routes"], 0);
    }

    #[tokio::test]
    async fn test_health_endpoint_unhealthy() {
        let (dir, app) = setup_test_app();
        std::fs::write(dir.path().join("routes.json"), "garbage").unwrap();

        let (status, body) = get_health(app).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let response: UnhealthyResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.status, "unhealthy");
        assert!(response.error.contains("Cannot read route store"));
    }
}
