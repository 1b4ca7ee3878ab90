use std::sync::Arc;

use arcade_core::progression::{DailyCapSweeper, ProgressionEngine};
use arcade_db::repositories::PgProgressionStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: arcade_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// XP award service over the PostgreSQL store.
    pub engine: ProgressionEngine,
    /// Daily cap sweeper, shared by the scheduled job and the operator endpoint.
    pub sweeper: Arc<DailyCapSweeper>,
}

impl AppState {
    /// Wire the progression services onto `pool`.
    pub fn new(pool: arcade_db::DbPool, config: ServerConfig) -> Self {
        let store = Arc::new(PgProgressionStore::new(pool.clone()));
        Self {
            engine: ProgressionEngine::new(store.clone()),
            sweeper: Arc::new(DailyCapSweeper::new(store)),
            pool,
            config: Arc::new(config),
        }
    }
}
