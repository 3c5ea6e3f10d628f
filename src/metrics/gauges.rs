use prometheus::{GaugeVec, IntGauge, Opts, Registry};

const NAMESPACE: &str = "kube";
const SUBSYSTEM: &str = "metrics_server";

fn opts(name: &str, help: &str) -> Opts {
    Opts::new(name, help).namespace(NAMESPACE).subsystem(SUBSYSTEM)
}

/// Gauges republished from metrics-server.
///
/// The labelled families only show up in the exposition once they hold a
/// sample; the `*_observed` gauges are always present, starting at zero.
#[derive(Debug, Clone)]
pub struct ExporterGauges {
    pub pod_cpu: GaugeVec,
    pub pod_memory: GaugeVec,
    pub pods_observed: IntGauge,
    pub node_cpu: GaugeVec,
    pub node_memory: GaugeVec,
    pub nodes_observed: IntGauge,
}

impl ExporterGauges {
    pub fn new() -> prometheus::Result<Self> {
        let pod_labels = &["pod_namespace", "pod_name", "pod_container_name"];
        let node_labels = &["node"];
        Ok(Self {
            pod_cpu: GaugeVec::new(
                opts("pods_cpu", "CPU usage of pod containers in cores"),
                pod_labels,
            )?,
            pod_memory: GaugeVec::new(
                opts("pods_mem", "Memory usage of pod containers in bytes"),
                pod_labels,
            )?,
            pods_observed: IntGauge::with_opts(opts(
                "pods_observed",
                "Number of pods returned by the last metrics-server scrape",
            ))?,
            node_cpu: GaugeVec::new(opts("nodes_cpu", "CPU usage of nodes in cores"), node_labels)?,
            node_memory: GaugeVec::new(
                opts("nodes_mem", "Memory usage of nodes in bytes"),
                node_labels,
            )?,
            nodes_observed: IntGauge::with_opts(opts(
                "nodes_observed",
                "Number of nodes returned by the last metrics-server scrape",
            ))?,
        })
    }

    pub fn register(&self, registry: &Registry) -> prometheus::Result<()> {
        registry.register(Box::new(self.pod_cpu.clone()))?;
        registry.register(Box::new(self.pod_memory.clone()))?;
        registry.register(Box::new(self.pods_observed.clone()))?;
        registry.register(Box::new(self.node_cpu.clone()))?;
        registry.register(Box::new(self.node_memory.clone()))?;
        registry.register(Box::new(self.nodes_observed.clone()))?;
        Ok(())
    }
}
