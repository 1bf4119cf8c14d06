//! In-memory document store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::DocumentStore;
use crate::errors::AppError;
use crate::models::Datastore;

/// Keeps the document in process memory; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RwLock<Option<Datastore>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing document instead of the empty default.
    pub fn with_document(document: Datastore) -> Self {
        Self {
            document: RwLock::new(Some(document)),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self) -> Result<Datastore, AppError> {
        Ok(self.document.read().await.clone().unwrap_or_default())
    }

    async fn save(&self, document: &Datastore) -> Result<(), AppError> {
        *self.document.write().await = Some(document.clone());
        Ok(())
    }
}
