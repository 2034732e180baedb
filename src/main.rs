use habit_ledger::{AppState, Config, JsonFileStore, Ledger, router};
use std::net::SocketAddr;
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut ledger = Ledger::open(JsonFileStore::new(&config.data_path)).inspect_err(|err| {
        error!("refusing to start, state file is unreadable: {err}");
    })?;
    let report = ledger.run_migration()?;
    info!(
        path = %ledger.persistence().path().display(),
        days = ledger.state().daily().len(),
        balance = ledger.balance(),
        backfilled = report.backfilled,
        "ledger ready"
    );

    let app = router(AppState::new(ledger));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
    }
    info!("shutting down");
}
