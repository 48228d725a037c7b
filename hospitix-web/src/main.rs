//! Hospitix Web Server
//!
//! Role based hospital management dashboards behind a single session.

use anyhow::Context;
use clap::Parser;
use hospitix_core::{LogFormat, StorageBackend};
use hospitix_web::server::HospitixServerBuilder;
use hospitix_web::{init_logging, WebConfig};
use tracing::info;

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    match value.to_lowercase().as_str() {
        "json" => Ok(LogFormat::Json),
        "pretty" => Ok(LogFormat::Pretty),
        "compact" => Ok(LogFormat::Compact),
        other => Err(format!("unknown log format: {}", other)),
    }
}

/// Hospitix Web Server - role based dashboards for patients and hospital staff
#[derive(Parser)]
#[command(name = "hospitix-web")]
#[command(about = "A web host for the Hospitix dashboards")]
#[command(version)]
struct Args {
    /// Server host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Enable development mode
    #[arg(long)]
    dev: bool,

    /// TOML file with session and assistant settings
    #[arg(short, long)]
    config: Option<String>,

    /// Where the session is persisted (memory, file, sqlite)
    #[arg(long)]
    session_store: Option<StorageBackend>,

    /// Session file path, or database URL for sqlite
    #[arg(long)]
    session_path: Option<String>,

    /// Artificial latency for login and registration, in milliseconds
    #[arg(long)]
    auth_delay_ms: Option<u64>,

    /// Base URL of the health assistant service
    #[arg(long)]
    assistant_url: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log output format (json, pretty, compact)
    #[arg(long, default_value = "compact", value_parser = parse_log_format)]
    log_format: LogFormat,

    /// Write the resolved application configuration to this file and exit
    #[arg(long)]
    write_config: Option<String>,
}

impl Args {
    /// Command line values win over the environment
    fn apply(self, mut config: WebConfig) -> WebConfig {
        config.host = self.host;
        config.port = self.port;
        config.dev_mode = config.dev_mode || self.dev;
        config.config_path = self.config.or(config.config_path);
        config.session_storage = self.session_store.or(config.session_storage);
        config.session_path = self.session_path.or(config.session_path);
        config.auth_delay_ms = self.auth_delay_ms.or(config.auth_delay_ms);
        config.assistant_url = self.assistant_url.or(config.assistant_url);
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.log_format)?;

    // Load environment variables
    dotenvy::dotenv().ok();

    let write_config = args.write_config.clone();
    let config = args.apply(WebConfig::from_env());

    if let Some(path) = write_config {
        let resolved = config.application_config()?;
        resolved
            .save_to_file(&path)
            .with_context(|| format!("failed to write configuration to {}", path))?;
        info!("Configuration written to {}", path);
        return Ok(());
    }

    let server = HospitixServerBuilder::from_config(config)
        .build()
        .await
        .context("failed to build server")?;

    server.start().await?;

    info!("Server shut down");
    Ok(())
}
