use crate::normalize::normalize_request_path;
use crate::store::{find_index, Route, RouteStore};

/// What the public handler should render for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderPlan {
    /// The reserved root path
    Landing,
    NotFound,
    Interstitial {
        image_url: String,
        wait_seconds: u64,
        redirect_url: String,
        note: String,
    },
}

impl RenderPlan {
    /// A matched route with no wait sends the visitor on without a countdown
    pub fn redirects_immediately(&self) -> bool {
        matches!(self, RenderPlan::Interstitial { wait_seconds: 0, .. })
    }
}

/// Map a raw request target onto the given route snapshot
pub fn resolve(routes: &[Route], request_path: &str) -> RenderPlan {
    let path = normalize_request_path(request_path);
    if path == "/" {
        return RenderPlan::Landing;
    }

    match find_index(routes, &path) {
        Some(index) => {
            let route = &routes[index];
            RenderPlan::Interstitial {
                image_url: route.image_url.clone(),
                wait_seconds: route.wait_seconds.max(0).unsigned_abs(),
                redirect_url: route.redirect_url.clone(),
                note: route.note.clone(),
            }
        }
        None => RenderPlan::NotFound,
    }
}

/// Resolves requests against a fresh load of the route store
#[derive(Clone)]
pub struct Resolver {
    store: RouteStore,
}

impl Resolver {
    pub fn new(store: RouteStore) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, request_path: &str) -> RenderPlan {
        let routes = self.store.load().await;
        let plan = resolve(&routes, request_path);
        tracing::debug!("Resolved {} to {:?}", request_path, plan);
        plan
    }
}
