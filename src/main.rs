//! linkrelay - URL reachability relay for a portfolio page
//!
//! Usage:
//!     linkrelay --config <path>
//!
//! See --help for more options.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use linkrelay::config::{load_config, Config};
use linkrelay::metrics::MetricsCollector;
use linkrelay::portfolio::Portfolio;
use linkrelay::probe::Prober;
use linkrelay::server::{AppState, RelayServer};
use linkrelay::util::{init_logging, ShutdownSignal};

/// A URL reachability relay and portfolio data service written in Rust.
#[derive(Parser, Debug)]
#[command(name = "linkrelay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Validate configuration and exit
    #[arg(long)]
    validate: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config).with_context(|| {
        format!(
            "failed to load configuration from '{}'",
            cli.config.display()
        )
    })?;

    // Determine log level (CLI overrides config)
    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.global.log_level);

    init_logging(log_level, &config.global.log_format);

    // If --validate flag, just validate and exit
    if cli.validate {
        info!("Configuration is valid");
        println!("Configuration is valid.");
        println!("  Listen: {}", config.server.listen);
        println!(
            "  Probe: connect {} / total {}, max {} redirects, verify_tls={}",
            humantime::format_duration(config.probe.connect_timeout),
            humantime::format_duration(config.probe.request_timeout),
            config.probe.max_redirects,
            config.probe.verify_tls
        );
        println!("  Skills file: {}", config.portfolio.skills_file.display());
        println!(
            "  Projects file: {}",
            config.portfolio.projects_file.display()
        );
        return Ok(());
    }

    info!(
        config_path = %cli.config.display(),
        listen = %config.server.listen,
        verify_tls = config.probe.verify_tls,
        "linkrelay starting"
    );

    if !config.probe.verify_tls {
        // Deliberate liveness-only trade-off; make it visible in the logs
        info!("TLS certificate verification is DISABLED for outbound probes");
    }

    run(config)
}

/// Run the relay with the given configuration.
fn run(config: Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    runtime.block_on(async { run_async(config).await })
}

/// Async entry point for the relay.
async fn run_async(config: Config) -> Result<()> {
    let shutdown = ShutdownSignal::new();

    let prober = Arc::new(Prober::new(config.probe.clone()));
    let portfolio = Portfolio::new(config.portfolio.clone(), Arc::clone(&prober));

    let state = Arc::new(AppState {
        prober,
        portfolio,
        metrics: MetricsCollector::new(),
        metrics_config: config.global.metrics.clone(),
    });

    let server = RelayServer::bind(config.server.listen, state)
        .await
        .with_context(|| format!("failed to bind relay server on {}", config.server.listen))?;

    let handle = {
        let shutdown_rx = shutdown.subscribe();
        tokio::spawn(async move {
            server.run(shutdown_rx).await;
        })
    };

    info!("linkrelay is running");
    info!("press Ctrl+C to stop");

    shutdown.shutdown_on_ctrl_c().await;

    let _ = handle.await;

    info!("linkrelay shut down complete");
    Ok(())
}
