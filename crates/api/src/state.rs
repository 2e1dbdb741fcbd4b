use std::sync::Arc;

use crate::config::ServerConfig;

/// Handler state. Cloned per request; both fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub pool: buildboard_db::DbPool,
    /// The auth extractors read the JWT settings from here.
    pub config: Arc<ServerConfig>,
}
