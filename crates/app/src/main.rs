mod error;
mod router;
mod telemetry;
mod todos;
mod ui;

use std::{net::SocketAddr, sync::Arc};

use tracing::info;
use todo_board_core::{MemoryStore, TodoStore};
use todo_board_storage::Database;
use todo_board_util::{load_env_file, AppConfig, StoreKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env_file();
    let config = AppConfig::from_env()?;

    telemetry::init_tracing(&config)?;
    let metrics = telemetry::init_metrics()?;

    let store = open_store(&config).await?;
    store.ensure_schema().await?;
    info!(
        stage = "store",
        configured = config.store.as_str(),
        kind = store.kind(),
        "schema ready"
    );

    let state = router::AppState::new(metrics, store);

    let addr: SocketAddr = config.bind_addr;
    info!(stage = "app", %addr, env = %config.environment.as_str(), "starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router::app_router(state))
        .await
        .map_err(|err| err.into())
}

async fn open_store(config: &AppConfig) -> Result<Arc<dyn TodoStore>, Box<dyn std::error::Error>> {
    match config.store {
        StoreKind::Postgres => {
            info!(
                stage = "store",
                host = %config.database.host,
                database = %config.database.database,
                "connecting to postgres"
            );
            let database = Database::connect(&config.database).await?;
            Ok(Arc::new(database.todos()))
        }
        StoreKind::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}
