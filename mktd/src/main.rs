use jwt_simple::prelude::HS256Key;
use mkt_axum::start_server;
use mkt_sqlite::Db;
use mktd::{AppConfig, Cli, impls::MarketApp, settle_due};
use tokio::select;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // By convention, we leverage `tracing` to instrument and log various
    // operations throughout this project. Subscribe so the events reach
    // stdio.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI args and extract the JWT key
    let cli = Cli::import()?;
    let key = HS256Key::from_bytes(cli.secret.as_bytes());

    // Create config with proper layering of CLI args
    let AppConfig {
        server,
        database,
        sweep,
    } = AppConfig::load(&cli)?;

    // Open database with config
    let db = Db::open(&database).await?;
    let db2 = db.clone();
    let app = MarketApp { db, key };

    // We always run the server task.
    let server_task = tokio::spawn(async move { start_server(server, app).await });

    // However, we may or may not also run the settlement sweep
    if sweep.every.is_some() {
        let sweep_task = tokio::spawn(async move {
            let f = async move |now: time::OffsetDateTime| settle_due(&db2, now.into()).await;
            sweep.schedule(f).await
        });

        select! {
            r = server_task => r??,
            r = sweep_task => r??,
        }
    } else {
        // Otherwise, we just run the server task to completion
        server_task.await??;
    }

    Ok(())
}
