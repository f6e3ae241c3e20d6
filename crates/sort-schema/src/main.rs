//! Main entry point for CLI command to start the proxy.

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use sort_schema::LogFormat;
use sort_schema::Opt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| opt.log_level.clone());
    let builder = tracing_subscriber::fmt::fmt()
        .with_env_filter(EnvFilter::try_new(&env_filter).context("could not parse log level")?);
    match opt.log_format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }

    let app = sort_schema::router(&opt).context("could not create the upstream client")?;
    let listener = tokio::net::TcpListener::bind(opt.listen)
        .await
        .with_context(|| format!("could not listen on {}", opt.listen))?;
    tracing::info!(listen = %opt.listen, endpoint = %opt.endpoint, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "could not install the Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
