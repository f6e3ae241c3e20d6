//! Main entry point for the `merge` command.

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use merge_files::MergeOptions;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let options = MergeOptions::parse();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned());
    tracing_subscriber::fmt::fmt()
        .with_env_filter(EnvFilter::try_new(&env_filter).context("could not parse RUST_LOG")?)
        .with_writer(std::io::stderr)
        .init();

    let summary = merge_files::merge(&options)?;
    if let Some(backup) = &summary.backup {
        tracing::info!(backup = %backup.display(), "kept the previous output");
    }
    tracing::debug!(files = summary.files.len(), bytes = summary.bytes, "merged");
    println!("created {}", options.output.display());
    Ok(())
}
