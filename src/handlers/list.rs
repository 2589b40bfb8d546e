use crate::error::{ApiError, ErrorResponse};
use crate::models::RouteListResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /api/routes handler - List all configured routes
///
/// Returns the stored routes in insertion order. Unlike the HTML pages this
/// endpoint does not paper over a malformed store file; it answers 500.
#[utoipa::path(
    get,
    path = routes::API_ROUTES,
    responses(
        (status = 200, description = "All configured routes", body = RouteListResponse),
        (status = 500, description = "Route store is unreadable", body = ErrorResponse)
    ),
    tag = "routes"
)]
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<RouteListResponse>), ApiError> {
    let data = state.store.load_strict().await?;

    let response = RouteListResponse {
        total_count: data.len(),
        data,
    };

    tracing::info!("Listed {} routes", response.total_count);

    Ok((StatusCode::OK, Json(response)))
}
