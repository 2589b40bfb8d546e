use crate::admin::AdminService;
use crate::config::Config;
use crate::flash::FlashMessages;
use crate::resolver::Resolver;
use crate::store::RouteStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: RouteStore,
    pub admin: AdminService,
    pub resolver: Resolver,
    pub flash: FlashMessages,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn from_config(config: Config) -> Self {
        let store = RouteStore::from_config(&config);
        Self {
            admin: AdminService::new(store.clone()),
            resolver: Resolver::new(store.clone()),
            store,
            flash: FlashMessages::new(),
            config: Arc::new(config),
        }
    }
}
