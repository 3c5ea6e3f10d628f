use std::collections::{HashMap, HashSet};

use kube::Client;
use serde::Deserialize;

use crate::error::CollectError;
use crate::parsing::{parse_cpu_cores, parse_memory_bytes};
use crate::types::ContainerUsage;

use super::base::{list_metrics, usage_quantity, ItemMeta};
use super::gauges::ExporterGauges;

#[derive(Debug, Deserialize)]
pub struct ContainerMetrics {
    pub name: String,
    #[serde(default)]
    pub usage: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct PodMetricsItem {
    pub metadata: ItemMeta,
    #[serde(default)]
    pub containers: Vec<ContainerMetrics>,
}

/// PodMetrics across all namespaces.
pub async fn list_pod_metrics(client: &Client) -> Result<Vec<PodMetricsItem>, CollectError> {
    list_metrics(client, "pods").await
}

pub fn container_usage(items: Vec<PodMetricsItem>) -> Vec<ContainerUsage> {
    let mut out = Vec::new();
    for item in items {
        let pod = match item.metadata.name {
            Some(n) if !n.is_empty() => n,
            _ => continue,
        };
        let namespace = item.metadata.namespace.unwrap_or_default();
        for c in item.containers {
            let object = format!("{}/{}/{}", namespace, pod, c.name);
            let cpu_cores = usage_quantity(&c.usage, "cpu", parse_cpu_cores, &object);
            let memory_bytes = usage_quantity(&c.usage, "memory", parse_memory_bytes, &object);
            out.push(ContainerUsage {
                namespace: namespace.clone(),
                pod: pod.clone(),
                container: c.name,
                cpu_cores,
                memory_bytes,
            });
        }
    }
    out
}

/// Replace the pod gauges with `usage` and record how many distinct pods it
/// covers. Quantities that are `None` get no sample.
pub fn publish_pod_usage(gauges: &ExporterGauges, usage: &[ContainerUsage]) {
    gauges.pod_cpu.reset();
    gauges.pod_memory.reset();
    let mut pods = HashSet::new();
    for c in usage {
        let labels = [c.namespace.as_str(), c.pod.as_str(), c.container.as_str()];
        if let Some(cpu) = c.cpu_cores {
            gauges.pod_cpu.with_label_values(&labels).set(cpu);
        }
        if let Some(memory) = c.memory_bytes {
            gauges.pod_memory.with_label_values(&labels).set(memory);
        }
        pods.insert((c.namespace.as_str(), c.pod.as_str()));
    }
    gauges.pods_observed.set(pods.len() as i64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsList;
    use prometheus::{Encoder, Registry, TextEncoder};

    const POD_METRICS: &str = r#"{
        "kind": "PodMetricsList",
        "items": [
            {"metadata": {"name": "api-0", "namespace": "prod"},
             "containers": [
                {"name": "app", "usage": {"cpu": "120m", "memory": "256Mi"}},
                {"name": "sidecar", "usage": {"cpu": "5000000n", "memory": "16Mi"}}
             ]},
            {"metadata": {"name": "worker-1", "namespace": "batch"},
             "containers": [{"name": "job", "usage": {"cpu": "2"}}]},
            {"metadata": {"namespace": "ghost"},
             "containers": [{"name": "x", "usage": {"cpu": "1"}}]}
        ]
    }"#;

    fn parse_fixture() -> Vec<PodMetricsItem> {
        let list: MetricsList<PodMetricsItem> = serde_json::from_str(POD_METRICS).unwrap();
        list.items
    }

    #[test]
    fn test_container_usage() {
        let usage = container_usage(parse_fixture());
        assert_eq!(usage.len(), 3);

        assert_eq!(usage[0].namespace, "prod");
        assert_eq!(usage[0].pod, "api-0");
        assert_eq!(usage[0].container, "app");
        assert!((usage[0].cpu_cores.unwrap() - 0.12).abs() < 1e-9);
        assert_eq!(usage[0].memory_bytes, Some(256.0 * 1024.0 * 1024.0));

        assert!((usage[1].cpu_cores.unwrap() - 0.005).abs() < 1e-9);

        assert_eq!(usage[2].pod, "worker-1");
        assert_eq!(usage[2].cpu_cores, Some(2.0));
        assert_eq!(usage[2].memory_bytes, None);
    }

    #[test]
    fn test_publish_pod_usage() {
        let gauges = ExporterGauges::new().unwrap();
        publish_pod_usage(&gauges, &container_usage(parse_fixture()));

        assert_eq!(gauges.pods_observed.get(), 2);
        assert_eq!(
            gauges
                .pod_memory
                .with_label_values(&["prod", "api-0", "sidecar"])
                .get(),
            16.0 * 1024.0 * 1024.0
        );

        publish_pod_usage(&gauges, &[]);
        assert_eq!(gauges.pods_observed.get(), 0);
    }

    #[test]
    fn test_malformed_quantities_are_not_exported() {
        let list: MetricsList<PodMetricsItem> = serde_json::from_str(
            r#"{"items": [{"metadata": {"name": "p", "namespace": "default"},
                "containers": [{"name": "c", "usage": {"cpu": "garbage", "memory": "??"}}]}]}"#,
        )
        .unwrap();

        let registry = Registry::new();
        let gauges = ExporterGauges::new().unwrap();
        gauges.register(&registry).unwrap();
        publish_pod_usage(&gauges, &container_usage(list.items));

        let mut buf = Vec::new();
        TextEncoder::new().encode(&registry.gather(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(!text.contains("kube_metrics_server_pods_cpu{"));
        assert!(!text.contains("kube_metrics_server_pods_mem{"));
        // The pod itself was still observed.
        assert!(text.contains("kube_metrics_server_pods_observed 1"));
    }
}
