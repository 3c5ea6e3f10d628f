// metrics-server reads and the gauges they populate
pub mod base;
pub mod gauges;
pub mod nodes;
pub mod pods;

pub use base::{ItemMeta, MetricsList};
pub use gauges::ExporterGauges;
pub use nodes::{list_node_metrics, node_usage, publish_node_usage, NodeMetricsItem};
pub use pods::{container_usage, list_pod_metrics, publish_pod_usage, PodMetricsItem};
