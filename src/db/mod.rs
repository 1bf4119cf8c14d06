//! Persistence module for the user/leaderboard document.
//!
//! Handlers see the document only through [`DocumentStore`]; every request
//! loads it fresh and saves it whole after a mutation.

mod json_file;
mod memory;
mod sqlite;

pub use json_file::*;
pub use memory::*;
pub use sqlite::*;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Config, StoreBackend};
use crate::errors::AppError;
use crate::models::Datastore;

/// Load/save interface over the durable document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the whole document. A store that has never been written yields
    /// [`Datastore::default`]; unreadable contents are an [`AppError::Storage`].
    async fn load(&self) -> Result<Datastore, AppError>;

    /// Overwrite the whole document. Last writer wins.
    async fn save(&self, document: &Datastore) -> Result<(), AppError>;
}

/// Open the backend selected by the configuration.
pub async fn open_store(config: &Config) -> Result<Arc<dyn DocumentStore>, AppError> {
    let store: Arc<dyn DocumentStore> = match config.store_backend {
        StoreBackend::Json => Arc::new(JsonFileStore::new(&config.data_file)),
        StoreBackend::Sqlite => Arc::new(SqliteStore::open(&config.db_path).await?),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}
