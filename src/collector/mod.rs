use async_trait::async_trait;
use kube::Client;
use tokio::sync::OnceCell;

use crate::error::CollectError;
use crate::kubernetes;
use crate::metrics::{self, ExporterGauges};

/// Collection actions the worker pool dispatches jobs to.
#[async_trait]
pub trait MetricsRecorder: Send + Sync {
    /// Refresh node CPU/memory gauges from the live cluster.
    async fn record_node_metrics(&self) -> Result<(), CollectError>;

    /// Refresh pod CPU/memory gauges from the live cluster.
    async fn record_pod_metrics(&self) -> Result<(), CollectError>;
}

/// Reads metrics-server and publishes the result into `ExporterGauges`.
///
/// The kube client is created on first use and discovery is retried on
/// every call until it succeeds, so the exporter keeps running when the
/// cluster is unreachable at startup.
pub struct MetricsCollector {
    client: OnceCell<Client>,
    gauges: ExporterGauges,
}

impl MetricsCollector {
    pub fn new(gauges: ExporterGauges) -> Self {
        Self {
            client: OnceCell::new(),
            gauges,
        }
    }

    pub fn with_client(client: Client, gauges: ExporterGauges) -> Self {
        Self {
            client: OnceCell::new_with(Some(client)),
            gauges,
        }
    }

    async fn client(&self) -> Result<&Client, CollectError> {
        let client = self.client.get_or_try_init(kubernetes::connect).await?;
        Ok(client)
    }
}

#[async_trait]
impl MetricsRecorder for MetricsCollector {
    async fn record_node_metrics(&self) -> Result<(), CollectError> {
        let client = self.client().await?;
        let items = metrics::list_node_metrics(client).await?;
        let usage = metrics::node_usage(items);
        metrics::publish_node_usage(&self.gauges, &usage);
        Ok(())
    }

    async fn record_pod_metrics(&self) -> Result<(), CollectError> {
        let client = self.client().await?;
        let items = metrics::list_pod_metrics(client).await?;
        let usage = metrics::container_usage(items);
        metrics::publish_pod_usage(&self.gauges, &usage);
        Ok(())
    }
}
