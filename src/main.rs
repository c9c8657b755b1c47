use anyhow::Context;
use clap::Parser;
use tracing::{info, Dispatch};
use tracing_subscriber::EnvFilter;

use drive_mirror::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_sink = init_tracing();
    let report = drive_mirror::run(cli, log_sink.clone())
        .await
        .context("mirroring failed")?;
    tracing::dispatcher::with_default(&log_sink, || info!("done: {}", report));
    Ok(())
}

/// Builds the logging sink; it is handed to the run instead of being
/// installed globally.
fn init_tracing() -> Dispatch {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    Dispatch::new(subscriber)
}
