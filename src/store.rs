use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::config::Config;

/// Default wait before redirecting when the operator leaves it unset
pub const DEFAULT_WAIT_SECONDS: i64 = 5;

/// A single persisted redirect route
///
/// Field names match the on-disk JSON records. Fields missing from a record
/// fall back to their defaults so hand-edited files still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Route {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub wait_seconds: i64,
    #[serde(default)]
    pub redirect_url: String,
    #[serde(default)]
    pub note: String,
}

/// File-backed route list
///
/// The store keeps no copy of the routes in memory: every `load` reads the
/// file again and every `save` replaces it completely. Saves go through a
/// temp file in the same directory followed by a rename, so readers observe
/// either the old or the new list and never a torn one. Writers inside this
/// process are additionally serialized by an exclusive lock.
#[derive(Clone)]
pub struct RouteStore {
    path: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

/// Exclusive write access to a [`RouteStore`]
///
/// Holding the guard across load, mutate and save makes the whole cycle one
/// critical section with respect to other writers.
pub struct WriteGuard<'a> {
    store: &'a RouteStore,
    _guard: MutexGuard<'a, ()>,
}

impl RouteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.routes_file.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full route list
    ///
    /// A missing file reads as an empty list and is initialized to `[]`.
    /// An unreadable or malformed file also reads as an empty list; that
    /// fallback is logged at warn level rather than reported to the caller.
    pub async fn load(&self) -> Vec<Route> {
        match self.read().await {
            Some(routes) => routes,
            None => {
                self.initialize().await;
                Vec::new()
            }
        }
    }

    /// Load without the lenient fallback
    ///
    /// A missing file is still an empty list, but unreadable or malformed
    /// contents are reported. Used where a broken store must be visible.
    pub async fn load_strict(&self) -> Result<Vec<Route>> {
        let contents = match tokio::fs::read_to_string(self.path.as_path()).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    /// Persist `routes`, replacing whatever the file held before
    pub async fn save(&self, routes: &[Route]) -> Result<()> {
        self.lock_for_write().await.save(routes).await
    }

    /// Acquire the exclusive write lock
    pub async fn lock_for_write(&self) -> WriteGuard<'_> {
        WriteGuard {
            store: self,
            _guard: self.write_lock.lock().await,
        }
    }

    /// Read the file; `None` when it does not exist yet
    async fn read(&self) -> Option<Vec<Route>> {
        let contents = match tokio::fs::read_to_string(self.path.as_path()).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(
                    "Could not read route store {}, treating it as empty: {}",
                    self.path.display(),
                    e
                );
                return Some(Vec::new());
            }
        };

        Some(parse_routes(&contents, &self.path))
    }

    async fn initialize(&self) {
        let guard = self.lock_for_write().await;
        if tokio::fs::try_exists(self.path.as_path()).await.unwrap_or(false) {
            return;
        }

        match guard.save(&[]).await {
            Ok(()) => tracing::info!("Initialized empty route store at {}", self.path.display()),
            Err(e) => tracing::warn!("Failed to initialize route store: {:#}", e),
        }
    }
}

impl WriteGuard<'_> {
    /// Load the current list for a mutation
    ///
    /// Reads strictly: a corrupt file is an error here, so a write never
    /// replaces routes it could not parse.
    pub async fn load(&self) -> Result<Vec<Route>> {
        self.store.load_strict().await
    }

    pub async fn save(&self, routes: &[Route]) -> Result<()> {
        write_routes((*self.store.path).clone(), routes).await?;
        tracing::debug!(
            "Saved {} routes to {}",
            routes.len(),
            self.store.path.display()
        );
        Ok(())
    }
}

/// Position of the first route whose path equals `normalized_path`
pub fn find_index(routes: &[Route], normalized_path: &str) -> Option<usize> {
    routes.iter().position(|route| route.path == normalized_path)
}

fn parse_routes(contents: &str, path: &Path) -> Vec<Route> {
    if contents.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str(contents) {
        Ok(routes) => routes,
        Err(e) => {
            tracing::warn!(
                "Route store {} is malformed, treating it as empty: {}",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}

async fn write_routes(path: PathBuf, routes: &[Route]) -> Result<()> {
    let encoded = serde_json::to_vec_pretty(routes).context("Failed to serialize routes")?;

    tokio::task::spawn_blocking(move || write_atomic(&path, &encoded))
        .await
        .context("Route store writer task failed")?
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(contents)
        .context("Failed to write routes to temp file")?;
    tmp.as_file()
        .sync_all()
        .context("Failed to flush routes to disk")?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    Ok(())
}
