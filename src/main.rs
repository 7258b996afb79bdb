//! relicdex - JSON item-record browser
//!
//! Entry point for the relicdex server.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use clap::Parser;
use relicdex::server::{init_metrics, init_tracing, App, ServerConfig};
use relicdex::{Catalog, Config, Result};

/// relicdex - browse and search a directory of JSON item records
#[derive(Parser, Debug)]
#[command(name = "relicdex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory holding the JSON records
    #[arg(short, long, env = "RELICDEX_DATA_DIR", default_value = "./Datos")]
    data_dir: std::path::PathBuf,

    /// Front-end directory served at `/`
    #[arg(long, env = "RELICDEX_PUBLIC_DIR", default_value = "./public")]
    public_dir: std::path::PathBuf,

    /// Image directory served at `/Img`
    #[arg(long, env = "RELICDEX_IMAGES_DIR", default_value = "./Img")]
    images_dir: std::path::PathBuf,

    /// Host address to bind to
    #[arg(long, env = "RELICDEX_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "RELICDEX_PORT", default_value = "3000")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RELICDEX_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, env = "RELICDEX_LOG_JSON")]
    log_json: bool,

    /// Record file extension
    #[arg(long, env = "RELICDEX_EXTENSION", default_value = "json")]
    extension: String,

    /// Number of files read concurrently during a search
    #[arg(long, env = "RELICDEX_READ_CONCURRENCY", default_value = "8")]
    read_concurrency: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.log_json);

    tracing::info!("relicdex v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config {
        data_dir: cli.data_dir,
        public_dir: Some(cli.public_dir),
        images_dir: Some(cli.images_dir),
        host: cli.host,
        port: cli.port,
        log_level: cli.log_level,
        extension: cli.extension,
        read_concurrency: cli.read_concurrency,
    };

    tracing::debug!(?config, "Configuration loaded");

    config.validate()?;

    if !config.data_dir.is_dir() {
        tracing::warn!(
            path = %config.data_dir.display(),
            "Data directory does not exist; expected category subfolders such as Characters, Lightcones, Weapons"
        );
    }

    tracing::info!(
        addr = %config.server_addr(),
        data_dir = %config.data_dir.display(),
        "Configuration validated"
    );

    init_metrics();

    let catalog = Catalog::from_config(&config);
    let server_config = ServerConfig {
        host: config.host,
        port: config.port,
        public_dir: config.public_dir,
        images_dir: config.images_dir,
    };

    let app = App::new(server_config, catalog);
    app.run().await
}
