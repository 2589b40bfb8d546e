use crate::render::{interstitial_page, landing_page, not_found_page};
use crate::resolver::RenderPlan;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};

/// Fallback handler - Serve configured routes to visitors
///
/// Every path not claimed by the service's own endpoints lands here. The
/// root shows the landing page, a stored route shows its interstitial and
/// anything else is a 404 page.
pub async fn public_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let target = uri
        .path_and_query()
        .map(|path_and_query| path_and_query.as_str())
        .unwrap_or("/");

    let plan = state.resolver.resolve(target).await;
    let immediate = plan.redirects_immediately();

    match plan {
        RenderPlan::Landing => Html(landing_page()).into_response(),
        RenderPlan::NotFound => {
            tracing::debug!("No route for {}", uri.path());
            (StatusCode::NOT_FOUND, Html(not_found_page())).into_response()
        }
        RenderPlan::Interstitial {
            image_url,
            wait_seconds,
            redirect_url,
            note,
        } => {
            tracing::info!(
                "Serving route {} -> {} (wait {}s, immediate: {})",
                uri.path(),
                redirect_url,
                wait_seconds,
                immediate
            );
            Html(interstitial_page(&image_url, wait_seconds, &redirect_url, &note)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::RouteInput;
    use crate::config::Config;
    use axum::{body::Body, http::Request, Router};
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn setup_test_app() -> (TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            routes_file: dir.path().join("routes.json"),
            word_bank_file: None,
            service_port: 3000,
            service_host: "0.0.0.0".to_string(),
        };

        let state = AppState::from_config(config);
        state
            .admin
            .create(RouteInput {
                path: "/@go".to_string(),
                image_url: "https://cdn.example.com/banner.png".to_string(),
                wait_seconds: Some(3),
                redirect_url: "https://example.com".to_string(),
                note: "see you there".to_string(),
            })
            .await
            .unwrap();
        state
            .admin
            .create(RouteInput {
                path: "/now".to_string(),
                wait_seconds: Some(0),
                redirect_url: "https://now.example.com".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let app = Router::new().fallback(public_handler).with_state(state);
        (dir, app)
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_root_serves_landing() {
        let (_dir, app) = setup_test_app().await;

        let (status, body) = fetch(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Open the back office"));
    }

    #[tokio::test]
    async fn test_route_serves_interstitial() {
        let (_dir, app) = setup_test_app().await;

        let (status, body) = fetch(app, "/@go").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"content="3;url=https://example.com""#));
        assert!(body.contains("https://cdn.example.com/banner.png"));
        assert!(body.contains("see you there"));
        assert!(body.contains("Go now"));
    }

    #[tokio::test]
    async fn test_route_matches_encoded_trailing_slash_and_query() {
        let (_dir, app) = setup_test_app().await;

        let (status, body) = fetch(app, "/%40go/?utm_source=qr").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("const wait = 3;"));
    }

    #[tokio::test]
    async fn test_zero_wait_redirects_immediately() {
        let (_dir, app) = setup_test_app().await;

        let (status, body) = fetch(app, "/now").await;

        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("http-equiv=\"refresh\""));
        assert!(body.contains("const wait = 0;"));
        assert!(body.contains("https://now.example.com"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (_dir, app) = setup_test_app().await;

        let (status, body) = fetch(app, "/missing").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("404 Not Found"));
    }
}
