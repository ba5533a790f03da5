use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use companies_api::{
    config::Config,
    db::{ConnectionProvider, MongoCompanyStore},
    routes, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // The client itself connects lazily, on the first request that needs it.
    let provider = ConnectionProvider::shared(&config.mongodb_uri)?;
    let store = MongoCompanyStore::new(provider, &config.database_name, &config.collection_name);
    info!(
        "Serving collection {}.{}",
        config.database_name, config.collection_name
    );

    let state = Arc::new(AppState {
        store: Arc::new(store),
        config: config.clone(),
    });
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    info!("Server starting on {}", config.server_address);

    axum::serve(listener, app).await?;

    Ok(())
}
