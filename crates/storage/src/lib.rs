use async_trait::async_trait;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool, Row,
};
use thiserror::Error;
use tracing::debug;

use todo_board_core::{StoreError, Todo, TodoId, TodoStore, TodoTitle};
use todo_board_util::DatabaseConfig;

const CREATE_TODOS_TABLE: &str = "CREATE TABLE IF NOT EXISTS todos (\
     id SERIAL PRIMARY KEY, \
     title TEXT NOT NULL\
     )";

/// Top-level database handle that owns the PostgreSQL connection pool.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Establishes a connection pool using the provided settings.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(StorageError::Connect)?;

        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `todos` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        self.todos().ensure_schema_raw().await
    }

    /// Returns a handle to interact with the `todos` table.
    pub fn todos(&self) -> TodoRepository {
        TodoRepository {
            pool: self.pool.clone(),
        }
    }
}

/// General storage level errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to connect to postgres: {0}")]
    Connect(sqlx::Error),
    #[error("failed to create schema: {0}")]
    Schema(sqlx::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Repository responsible for the `todos` table.
#[derive(Clone)]
pub struct TodoRepository {
    pool: PgPool,
}

impl TodoRepository {
    async fn ensure_schema_raw(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_TODOS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Schema)?;
        Ok(())
    }

    async fn insert_raw(&self, title: &TodoTitle) -> Result<(), StorageError> {
        sqlx::query("INSERT INTO todos (title) VALUES ($1)")
            .bind(title.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_all_raw(&self) -> Result<Vec<Todo>, StorageError> {
        let rows = sqlx::query("SELECT id, title FROM todos ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;

        let mut todos = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i32 = row.try_get("id")?;
            let title: String = row.try_get("title")?;
            todos.push(Todo::new(TodoId::new(id), title));
        }
        debug!(stage = "store", rows = todos.len(), "listed todos");
        Ok(todos)
    }
}

#[async_trait]
impl TodoStore for TodoRepository {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        Ok(self.ensure_schema_raw().await?)
    }

    async fn insert(&self, title: &TodoTitle) -> Result<(), StoreError> {
        Ok(self.insert_raw(title).await?)
    }

    async fn list_all(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.list_all_raw().await?)
    }

    fn kind(&self) -> &'static str {
        "postgres"
    }
}
