use std::collections::HashMap;

use kube::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::CollectError;

pub const METRICS_API_PREFIX: &str = "/apis/metrics.k8s.io/v1beta1";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MetricsList<T> {
    // A path default keeps serde from requiring `T: Default`.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// GET a cluster-wide list from the metrics API, e.g. `nodes` or `pods`.
pub async fn list_metrics<T: DeserializeOwned>(
    client: &Client,
    resource: &str,
) -> Result<Vec<T>, CollectError> {
    use http::Request as HttpRequest;
    let path = format!("{}/{}", METRICS_API_PREFIX, resource);
    let req = HttpRequest::builder()
        .method("GET")
        .uri(path)
        .body(Vec::new())?;
    let list: MetricsList<T> = client.request(req).await?;
    Ok(list.items)
}

/// Read one resource quantity from a metrics `usage` map. A missing key or
/// a value `parse` rejects yields `None`, the latter with a debug log.
pub fn usage_quantity(
    usage: &HashMap<String, String>,
    resource: &str,
    parse: fn(&str) -> Option<f64>,
    object: &str,
) -> Option<f64> {
    let raw = usage.get(resource)?;
    let value = parse(raw);
    if value.is_none() {
        debug!(object, resource, value = %raw, "Skipping unparseable quantity");
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{parse_cpu_cores, parse_memory_bytes};

    #[test]
    fn test_usage_quantity() {
        let usage: HashMap<String, String> = [
            ("cpu".to_string(), "250m".to_string()),
            ("memory".to_string(), "??".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(usage_quantity(&usage, "cpu", parse_cpu_cores, "node-a"), Some(0.25));
        assert_eq!(usage_quantity(&usage, "memory", parse_memory_bytes, "node-a"), None);
        assert_eq!(usage_quantity(&usage, "gpu", parse_cpu_cores, "node-a"), None);
    }

    #[test]
    fn test_list_without_items_decodes_empty() {
        #[derive(Debug, Deserialize)]
        struct Item {
            #[allow(dead_code)]
            name: String,
        }
        let list: MetricsList<Item> =
            serde_json::from_str(r#"{"kind": "NodeMetricsList"}"#).unwrap();
        assert!(list.items.is_empty());
    }
}
