use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers::{
    admin_page_handler, admin_submit_handler, health_handler, list_handler, public_handler,
};
use crate::routes;
use crate::state::AppState;

/// Build the full service router
///
/// The service's own endpoints are matched first; every other path is handed
/// to the public route resolver, for GET and HEAD only.
pub fn build_app(state: AppState) -> Router {
    let admin = get(admin_page_handler).post(admin_submit_handler);

    Router::new()
        .route(routes::HEALTH, get(health_handler))
        .route(routes::API_ROUTES, get(list_handler))
        .route(routes::ADMIN, admin.clone())
        .route(&format!("{}/", routes::ADMIN), admin)
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .fallback(get(public_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
