use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sentinel_common::{Config, IntelTables, Registry};
use sentinel_scout::IntelFetcher;
use sentinel_web::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    info!("Sentinel node monitor starting...");

    let config = Config::from_env()?;
    config.log_summary();

    // One sync at startup; the snapshot is read-only for the rest of the run.
    let fetcher = IntelFetcher::from_config(&config, Arc::new(IntelTables::standard()))
        .context("Failed to build feed client")?;
    let snapshot = fetcher.run_cycle(&Registry::standard()).await;

    let app = router(AppState::new(snapshot));

    let addr = config.bind_addr();
    info!("Sentinel dashboard listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("sentinel=info".parse()?)
        .add_directive("tower_http=info".parse()?);

    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    Ok(())
}
