use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sentinel_common::{Config, IntelSnapshot, IntelTables, Registry, SentinelError};
use sentinel_scout::IntelFetcher;

#[derive(Parser)]
#[command(name = "scout", about = "Run one signal-grid sync and print the result")]
struct Cli {
    /// Skip all feed queries; every node reports fallback text
    #[arg(long)]
    offline: bool,

    /// Print the snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Print a single node
    #[arg(long)]
    node: Option<String>,
}

/// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn init_tracing() -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("sentinel=info".parse()?);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    config.offline |= cli.offline;
    config.log_summary();

    let fetcher = IntelFetcher::from_config(&config, Arc::new(IntelTables::standard()))
        .context("Failed to build feed client")?;
    let snapshot = fetcher.run_cycle(&Registry::standard()).await;

    match cli.node {
        Some(name) => {
            let record = snapshot
                .find(&name)
                .ok_or_else(|| SentinelError::UnknownNode(name.clone()))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(record)?);
            } else {
                println!("{}", render_table(&[record.clone()]));
            }
        }
        None if cli.json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        None => print_snapshot(&snapshot),
    }

    info!("Scout finished");
    Ok(())
}

fn print_snapshot(snapshot: &IntelSnapshot) {
    println!("SYNCED {}", snapshot.synced_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("{}", render_table(snapshot.records()));
}

fn render_table(records: &[sentinel_common::IntelRecord]) -> String {
    let width = records.iter().map(|r| r.name.len()).max().unwrap_or(4).max(4);
    let mut out = format!("{:<width$}  {:>4}  {:<8}  {}\n", "NODE", "RISK", "STATUS", "INTEL");
    for r in records {
        out.push_str(&format!(
            "{:<width$}  {:>4}  {:<8}  {}\n",
            r.name.to_uppercase(),
            r.risk,
            r.status.as_str(),
            r.intel
        ));
    }
    out.trim_end().to_string()
}
