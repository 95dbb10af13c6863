use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mindchat::config::{Command, Config, StorageBackend};
use mindchat::routes::configure_routes;
use mindchat::seed::seed;
use mindchat::store::{MemoryStore, PostgresConfig, PostgresStore, SharedStore};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

async fn open_store(config: &Config) -> Result<SharedStore, BoxError> {
    match config.storage {
        StorageBackend::Postgres => {
            let pg_config = PostgresConfig::from_connection_string(&config.database_url)?
                .with_max_pool_size(config.pool_size);
            tracing::info!(
                host = %pg_config.host,
                port = pg_config.port,
                database = %pg_config.database,
                "connecting to PostgreSQL"
            );
            let store = PostgresStore::connect(&pg_config).await?;
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    // Startup fails here if the store is unreachable
    let store = open_store(&config).await?;

    match config.command() {
        Command::Seed => {
            seed(&*store).await?;
        }
        Command::Serve { seed: load_sample } => {
            if load_sample {
                seed(&*store).await?;
            }

            let addr = config.listen_addr();
            let routes = configure_routes(store.clone());

            tracing::info!("Starting server on http://{}", addr);
            tokio::select! {
                _ = warp::serve(routes).run(addr) => {}
                result = tokio::signal::ctrl_c() => {
                    result?;
                    tracing::info!("shutdown signal received");
                }
            }
        }
    }

    store.close().await;
    tracing::info!("store closed");
    Ok(())
}
