use async_trait::async_trait;
use thiserror::Error;

use crate::todo::{Todo, TodoTitle};

/// Durable holder of todo rows.
///
/// Every operation maps to a single statement against the backing store, so
/// each call either fully succeeds or fully fails.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Creates the backing table when absent. Safe to call repeatedly.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Appends a row; the store assigns the id.
    async fn insert(&self, title: &TodoTitle) -> Result<(), StoreError>;

    /// Returns every row, most recently created first.
    async fn list_all(&self) -> Result<Vec<Todo>, StoreError>;

    /// Name of the backend, used in logs.
    fn kind(&self) -> &'static str;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
