use domain_registry::api::{create_router, AppState};
use domain_registry::application::DomainManager;
use domain_registry::infrastructure::{AppConfig, LocalFileStore, LogFormat, MongoDomainStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "domain_registry=debug,api=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(config.logging.format);

    let store = MongoDomainStore::connect(
        &config.database.uri,
        &config.database.name,
        &config.database.collection,
    )
    .await?;
    info!(database = %config.database.name, collection = %config.database.collection, "MongoDB client initialized");

    let files = LocalFileStore::new(&config.uploads.dir).await?;

    let manager = DomainManager::with_policy(
        Arc::new(store),
        Arc::new(files),
        config.uploads.policy.clone(),
    );

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let state = AppState::new(manager, config);
    let app = create_router(state);

    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
