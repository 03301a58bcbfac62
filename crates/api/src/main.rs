//! ProfileBox command-line entry point.

use anyhow::Context;
use clap::Parser;
use profilebox_lib::cli::{self, Cli};
use profilebox_lib::utils::logging::init_tracing;
use profilebox_lib::AppContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Read before config so PROFILEBOX_* values in .env are seen.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => profilebox_infra::load_from_file(Some(path.clone()))?,
        None => profilebox_infra::load()?,
    };
    init_tracing(&config.logging);

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) => tracing::debug!(error = %e, "no .env file loaded"),
    }

    let ctx = AppContext::new_with_config(config)
        .await
        .context("failed to initialise ProfileBox storage")?;

    cli::run(&ctx, cli).await
}
