use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = truckest::config::CONFIG.clone();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        upload_dir = %cfg.upload_dir.display(),
        registry = %cfg.registry_base_url,
        proxy = %cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        loglevel = %cfg.loglevel,
    );

    std::fs::create_dir_all(&cfg.upload_dir)?;

    let db = truckest::db::spawn(&cfg.database_url).await?;

    let listen_addr = cfg.listen_addr.clone();
    let state = truckest::router::TruckestState::new(cfg, db);
    let app = truckest::router::truckest_router(state);

    let listener = TcpListener::bind(&listen_addr).await?;
    info!("HTTP server listening on {}", listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
