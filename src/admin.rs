use thiserror::Error;
use url::Url;

use crate::normalize::normalize;
use crate::store::{find_index, Route, RouteStore, DEFAULT_WAIT_SECONDS};

/// A malformed field in a create or update submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty path")]
    EmptyPath,
    #[error("invalid redirect url")]
    InvalidRedirectUrl,
    #[error("invalid image url")]
    InvalidImageUrl,
    #[error("negative wait")]
    NegativeWait,
    #[error("invalid wait")]
    InvalidWait,
}

/// Everything that can stop an admin operation
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("path exists")]
    Conflict,
    #[error("route not found")]
    NotFound,
    #[error("route storage failed: {0:#}")]
    Storage(anyhow::Error),
}

impl AdminError {
    /// Text shown to the operator on the next admin page
    pub fn status_message(&self) -> String {
        match self {
            AdminError::Validation(ValidationError::EmptyPath) => {
                "Route path must not be empty.".to_string()
            }
            AdminError::Validation(ValidationError::InvalidRedirectUrl) => {
                "Redirect URL is invalid.".to_string()
            }
            AdminError::Validation(ValidationError::InvalidImageUrl) => {
                "Image URL is invalid.".to_string()
            }
            AdminError::Validation(ValidationError::NegativeWait)
            | AdminError::Validation(ValidationError::InvalidWait) => {
                "Wait time must be a non-negative integer.".to_string()
            }
            AdminError::Conflict => "A route with this path already exists.".to_string(),
            AdminError::NotFound => "The route to update was not found.".to_string(),
            AdminError::Storage(_) => "Route storage failed, nothing was changed.".to_string(),
        }
    }
}

/// Successful result of an admin operation, carrying the normalized path it touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminSuccess {
    Created(String),
    Updated(String),
    Deleted(String),
    /// Delete of a path that was not stored
    Unchanged,
}

impl AdminSuccess {
    pub fn status_message(&self) -> Option<String> {
        match self {
            AdminSuccess::Created(path) => Some(format!("Created route {}", path)),
            AdminSuccess::Updated(path) => Some(format!("Updated route {}", path)),
            AdminSuccess::Deleted(path) => Some(format!("Deleted route {}", path)),
            AdminSuccess::Unchanged => None,
        }
    }
}

/// Raw route fields as submitted by the operator
#[derive(Debug, Clone, Default)]
pub struct RouteInput {
    pub path: String,
    pub image_url: String,
    /// `None` selects [`DEFAULT_WAIT_SECONDS`]
    pub wait_seconds: Option<i64>,
    pub redirect_url: String,
    pub note: String,
}

impl RouteInput {
    /// Validate the fields and build the record that would be stored
    ///
    /// Checks run in a fixed order (path, redirect URL, image URL, wait) and
    /// the first failure wins.
    pub fn validate(&self) -> Result<Route, ValidationError> {
        let path = normalize(&self.path);
        if path == "/" {
            return Err(ValidationError::EmptyPath);
        }

        let redirect_url = self.redirect_url.trim();
        if !is_absolute_url(redirect_url) {
            return Err(ValidationError::InvalidRedirectUrl);
        }

        let image_url = self.image_url.trim();
        if !image_url.is_empty() && !is_absolute_url(image_url) {
            return Err(ValidationError::InvalidImageUrl);
        }

        let wait_seconds = self.wait_seconds.unwrap_or(DEFAULT_WAIT_SECONDS);
        if wait_seconds < 0 {
            return Err(ValidationError::NegativeWait);
        }

        Ok(Route {
            path,
            image_url: image_url.to_string(),
            wait_seconds,
            redirect_url: redirect_url.to_string(),
            note: self.note.trim().to_string(),
        })
    }
}

/// Parse a submitted wait value; blank means "use the default"
pub fn parse_wait_seconds(raw: &str) -> Result<Option<i64>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| ValidationError::InvalidWait)
}

/// An absolute URL parses on its own and names a host
pub fn is_absolute_url(value: &str) -> bool {
    Url::parse(value).map(|url| url.has_host()).unwrap_or(false)
}

/// Validated create, update and delete over the route store
///
/// Each operation takes the store's write lock, loads the current list,
/// applies its change and saves before releasing the lock.
#[derive(Clone)]
pub struct AdminService {
    store: RouteStore,
}

impl AdminService {
    pub fn new(store: RouteStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<Route> {
        self.store.load().await
    }

    pub async fn create(&self, input: RouteInput) -> Result<AdminSuccess, AdminError> {
        let route = input.validate()?;

        let guard = self.store.lock_for_write().await;
        let mut routes = guard.load().await.map_err(AdminError::Storage)?;
        if find_index(&routes, &route.path).is_some() {
            tracing::info!("Rejected create of existing route {}", route.path);
            return Err(AdminError::Conflict);
        }

        let path = route.path.clone();
        routes.push(route);
        guard.save(&routes).await.map_err(AdminError::Storage)?;

        tracing::info!("Created route {}", path);
        Ok(AdminSuccess::Created(path))
    }

    pub async fn update(
        &self,
        original_path: &str,
        input: RouteInput,
    ) -> Result<AdminSuccess, AdminError> {
        let route = input.validate()?;
        let original_path = normalize(original_path);

        let guard = self.store.lock_for_write().await;
        let mut routes = guard.load().await.map_err(AdminError::Storage)?;
        let Some(index) = find_index(&routes, &original_path) else {
            tracing::info!("Rejected update of missing route {}", original_path);
            return Err(AdminError::NotFound);
        };

        if route.path != original_path && find_index(&routes, &route.path).is_some() {
            tracing::info!(
                "Rejected update of {}: {} is already taken",
                original_path,
                route.path
            );
            return Err(AdminError::Conflict);
        }

        let path = route.path.clone();
        routes[index] = route;
        guard.save(&routes).await.map_err(AdminError::Storage)?;

        tracing::info!("Updated route {} (was {})", path, original_path);
        Ok(AdminSuccess::Updated(path))
    }

    /// Remove the route at `target_path`; deleting a missing path is a no-op
    pub async fn delete(&self, target_path: &str) -> Result<AdminSuccess, AdminError> {
        let target_path = normalize(target_path);

        let guard = self.store.lock_for_write().await;
        let mut routes = guard.load().await.map_err(AdminError::Storage)?;
        let Some(index) = find_index(&routes, &target_path) else {
            tracing::debug!("Delete of {} ignored, no such route", target_path);
            return Ok(AdminSuccess::Unchanged);
        };

        routes.remove(index);
        guard.save(&routes).await.map_err(AdminError::Storage)?;

        tracing::info!("Deleted route {}", target_path);
        Ok(AdminSuccess::Deleted(target_path))
    }
}
