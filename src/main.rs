use tracing_subscriber::EnvFilter;

use clinicals_api::api::{start_api_server, ApiContext};
use clinicals_api::{config, db};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let db_path = config::db_path();
    if let Some(parent) = db_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::error!("Cannot create data directory {}: {e}", parent.display());
            std::process::exit(1);
        }
    }
    // Fail fast if the store is unusable; this also bootstraps the schema
    if let Err(e) = db::open_database(&db_path) {
        tracing::error!("Cannot open database {}: {e}", db_path.display());
        std::process::exit(1);
    }
    tracing::info!("Database ready at {}", db_path.display());

    let ctx = ApiContext::new(db_path);
    let mut server =
        match start_api_server(ctx, config::bind_addr(), &config::allowed_origin()).await {
            Ok(server) => server,
            Err(e) => {
                tracing::error!("Failed to start API server: {e}");
                std::process::exit(1);
            }
        };

    tracing::info!("Listening on http://{}", server.local_addr);

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    server.shutdown();
}
