use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use nagios_client::NagiosClient;
use nagios_exposition::{MetricsServer, ServerConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nagios_exporter::{config, duration, Collector, NAMESPACE};

#[derive(Parser, Debug)]
#[command(name = "nagios-exporter")]
#[command(version, about = "Prometheus exporter for Nagios XI")]
struct Args {
    /// Address to listen on for telemetry (":port" binds all interfaces)
    #[arg(long = "web.listen-address", default_value = ":9111")]
    listen_address: String,

    /// Path under which to expose metrics
    #[arg(long = "web.telemetry-path", default_value = "/metrics")]
    metrics_path: String,

    /// Nagios XI host (and optional port) to scrape
    #[arg(long = "web.remote-address", default_value = "localhost")]
    remote_address: String,

    /// Scheme used to reach Nagios XI
    #[arg(long = "web.remote-scheme", default_value = "http", value_parser = ["http", "https"])]
    remote_scheme: String,

    /// TOML file holding the Nagios API key (`APIKey = "..."`)
    #[arg(long = "config.path", default_value = "/etc/nagios_exporter/config.toml")]
    config_path: PathBuf,

    /// Timeout for each request to Nagios (e.g., "5s", "1500ms")
    #[arg(long = "nagios.timeout", default_value = "5s")]
    timeout: String,

    /// Log level; RUST_LOG takes precedence when set
    #[arg(long = "log.level", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let api_key = config::load_api_key(&args.config_path)?;
    let timeout = duration::parse_duration(&args.timeout)
        .with_context(|| format!("Invalid --nagios.timeout value {:?}", args.timeout))?;
    let listen_addr = config::listen_address(&args.listen_address)?;

    let client = NagiosClient::builder()
        .endpoint(NagiosClient::base_url(
            &args.remote_scheme,
            &args.remote_address,
        ))
        .api_key(api_key)
        .timeout(timeout)
        .build()
        .context("Failed to build Nagios client")?;
    info!(
        endpoint = client.endpoint(),
        timeout = %duration::format_duration(timeout),
        "Scraping Nagios XI"
    );

    let collector = Arc::new(Collector::new(client, NAMESPACE));
    let server_config = ServerConfig::builder()
        .listen_addr(listen_addr)
        .metrics_path(config::metrics_path(&args.metrics_path))
        .build();
    let server = MetricsServer::new(server_config, collector);

    let listener = server.bind().await?;
    info!(
        addr = %server.config().listen_addr,
        path = %server.config().metrics_path,
        "Listening for scrapes"
    );

    tokio::select! {
        _ = server.serve(listener) => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutting down");
        }
    }

    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
