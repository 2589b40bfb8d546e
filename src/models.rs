use serde::{Deserialize, Serialize};

use crate::admin::{parse_wait_seconds, RouteInput, ValidationError};
use crate::store::Route;

/// Form body posted by the admin page
///
/// One form type covers create, update and delete; `action` says which, and
/// the fields an action does not use are simply left blank.
#[derive(Debug, Default, Deserialize)]
pub struct AdminForm {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub wait_seconds: String,
    #[serde(default)]
    pub redirect_url: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub original_path: String,
    #[serde(default)]
    pub target_path: String,
}

impl AdminForm {
    pub fn route_input(&self) -> Result<RouteInput, ValidationError> {
        Ok(RouteInput {
            path: self.path.clone(),
            image_url: self.image_url.clone(),
            wait_seconds: parse_wait_seconds(&self.wait_seconds)?,
            redirect_url: self.redirect_url.clone(),
            note: self.note.clone(),
        })
    }
}

/// Query parameters for the admin page
#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    pub edit: Option<String>,
}

/// Response type for the route listing endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct RouteListResponse {
    pub data: Vec<Route>,
    pub total_count: usize,
}
