use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod event;
mod handler;
mod preprocessing;
mod server;
mod storage;

#[derive(Parser, Debug)]
#[command(name = "watermeter-preprocess")]
#[command(about = "Prepares watermeter dial photos for OCR when they land in storage")]
#[command(version)]
pub struct Args {
    /// Host address to bind to
    #[arg(long, env = "WATERMETER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "WATERMETER_PORT", default_value = "8080")]
    pub port: u16,

    /// Directory holding one subdirectory per bucket
    #[arg(long, env = "WATERMETER_STORAGE_ROOT", default_value = "./buckets")]
    pub storage_root: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from(args);

    tracing::info!(
        "Starting watermeter-preprocess v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Writing results to bucket {}", config::OUTPUT_BUCKET);

    server::run(config).await
}
