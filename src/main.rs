use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use prometheus::Registry;
use tracing::{error, info};

use metrics_server_exporter::{
    app, apply_overrides, check_cluster_api_reachable, load_config, parse_duration,
    shutdown::install_shutdown_handler, ExporterGauges, InflightTracker, MetricsCollector,
    Overrides,
};

/// Republish metrics-server pod and node usage as Prometheus gauges.
#[derive(Parser, Debug)]
#[command(name = "metrics-server-exporter", version, about, long_about = None)]
struct Cli {
    /// Number of workers to use
    #[arg(long)]
    workers: Option<usize>,

    /// Duration at which to collect data from the metrics server api
    #[arg(long, value_parser = parse_duration)]
    interval: Option<Duration>,

    /// How long a worker rests after each job
    #[arg(long, value_parser = parse_duration)]
    job_sleep: Option<Duration>,

    /// Address for the HTTP endpoint
    #[arg(long)]
    listen_addr: Option<SocketAddr>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            workers: self.workers,
            interval: self.interval,
            job_sleep: self.job_sleep,
            listen_addr: self.listen_addr,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let cfg = apply_overrides(load_config()?, &cli.overrides())?;
    info!(
        workers = cfg.workers,
        interval = ?cfg.interval,
        job_sleep = ?cfg.job_sleep,
        job_types = ?cfg.job_types,
        "Loaded configuration"
    );

    info!("Checking kube-api. Searching for config file/service-accounts...");
    if check_cluster_api_reachable().await {
        info!("Kube config verified successfully.");
    } else {
        error!("Unable to verify kube config");
    }

    let registry = Registry::new();
    let gauges = ExporterGauges::new()?;
    gauges.register(&registry)?;
    let inflight = InflightTracker::new()?;
    inflight.register(&registry)?;

    let recorder = Arc::new(MetricsCollector::new(gauges));
    let shutdown = install_shutdown_handler();

    app::run(cfg, registry, recorder, inflight, shutdown).await
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .try_init();
}
