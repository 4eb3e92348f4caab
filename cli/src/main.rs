mod args;
mod run;

use std::path::Path;

use clap::Parser;
use remotewalk_core::config::WalkConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::Args;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only file paths
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("remotewalk {} starting", VERSION);

    let config_path = args.config.clone().unwrap_or_else(WalkConfig::default_path);
    let config = load_config(&args, &config_path)?;

    let summary = run::run(&args, &config, std::io::stdout().lock()).await?;
    info!(
        "Walk complete: {} files in {} directories ({} skipped)",
        summary.files, summary.directories, summary.skipped
    );
    Ok(())
}

fn load_config(args: &Args, path: &Path) -> anyhow::Result<WalkConfig> {
    let config = args.apply_overrides(WalkConfig::load_from(path)?);
    config.validate()?;
    Ok(config)
}
