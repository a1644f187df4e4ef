use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::slider_core::Availability;
use crate::shared::config::Config;
use crate::shared::term_meta::{SqliteTermMetaStore, TermMetaStore};

/// Shared state handed to every handler through axum `State`
#[derive(Clone)]
pub struct AppState {
    pub conn: DatabaseConnection,
    pub config: Arc<Config>,
    pub meta: Arc<dyn TermMetaStore>,
    pub availability: Availability,
}

impl AppState {
    pub fn new(config: Config, conn: DatabaseConnection) -> anyhow::Result<Self> {
        let meta: Arc<dyn TermMetaStore> = Arc::new(SqliteTermMetaStore::new(conn.clone()));
        let availability = Availability::detect(&config, &conn, meta.clone())?;
        Ok(Self {
            conn,
            config: Arc::new(config),
            meta,
            availability,
        })
    }
}
