// Route path constants - single source of truth for all service paths

pub const HEALTH: &str = "/health";
pub const ADMIN: &str = "/admin";
pub const API_ROUTES: &str = "/api/routes";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
