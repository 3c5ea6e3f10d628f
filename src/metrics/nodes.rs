use std::collections::HashMap;

use kube::Client;
use serde::Deserialize;

use crate::error::CollectError;
use crate::parsing::{parse_cpu_cores, parse_memory_bytes};
use crate::types::NodeUsage;

use super::base::{list_metrics, usage_quantity, ItemMeta};
use super::gauges::ExporterGauges;

#[derive(Debug, Deserialize)]
pub struct NodeMetricsItem {
    pub metadata: ItemMeta,
    #[serde(default)]
    pub usage: HashMap<String, String>,
}

pub async fn list_node_metrics(client: &Client) -> Result<Vec<NodeMetricsItem>, CollectError> {
    list_metrics(client, "nodes").await
}

/// Convert raw NodeMetrics items into numeric usage. Items without a name
/// are dropped.
pub fn node_usage(items: Vec<NodeMetricsItem>) -> Vec<NodeUsage> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let node = match item.metadata.name {
            Some(n) if !n.is_empty() => n,
            _ => continue,
        };
        let cpu_cores = usage_quantity(&item.usage, "cpu", parse_cpu_cores, &node);
        let memory_bytes = usage_quantity(&item.usage, "memory", parse_memory_bytes, &node);
        out.push(NodeUsage {
            node,
            cpu_cores,
            memory_bytes,
        });
    }
    out
}

/// Replace the node gauges with `usage`. Quantities that are `None` get no sample.
pub fn publish_node_usage(gauges: &ExporterGauges, usage: &[NodeUsage]) {
    gauges.node_cpu.reset();
    gauges.node_memory.reset();
    for n in usage {
        if let Some(cpu) = n.cpu_cores {
            gauges.node_cpu.with_label_values(&[&n.node]).set(cpu);
        }
        if let Some(memory) = n.memory_bytes {
            gauges.node_memory.with_label_values(&[&n.node]).set(memory);
        }
    }
    gauges.nodes_observed.set(usage.len() as i64);
}
