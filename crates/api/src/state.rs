use std::sync::Arc;

use tradepost_store::Directory;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The storage core: credential store, session registry, listing store.
    pub directory: Arc<Directory>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
