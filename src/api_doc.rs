use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::RouteListResponse;
use crate::store::Route;

/// OpenAPI documentation for the JSON endpoints
#[derive(OpenApi)]
#[openapi(
    info(
        title = "redirect-routes API",
        version = "1.0.0",
        description = "Read-only view of the configured redirect routes"
    ),
    paths(
        handlers::health::health_handler,
        handlers::list::list_handler
    ),
    components(
        schemas(
            Route,
            RouteListResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "routes", description = "Redirect route listing")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_json_endpoints() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(crate::routes::HEALTH));
        assert!(doc.paths.paths.contains_key(crate::routes::API_ROUTES));
    }
}
