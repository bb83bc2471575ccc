use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::store::{StoreError, TodoStore};
use crate::todo::{Todo, TodoId, TodoTitle};

/// Process-local store with the same id and ordering rules as the SQL table.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    rows: Vec<Todo>,
    last_id: i32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert(&self, title: &TodoTitle) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        state.last_id += 1;
        let id = TodoId::new(state.last_id);
        state.rows.push(Todo::new(id, title.as_str()));
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Todo>, StoreError> {
        let state = self.lock()?;
        Ok(state.rows.iter().rev().cloned().collect())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}
