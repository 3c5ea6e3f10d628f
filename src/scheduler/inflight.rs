use prometheus::{IntGaugeVec, Opts, Registry};

use super::job::JobKind;

/// Whether the producer counts the job at `index` in the registry as in
/// flight. Only even indices are tracked and the gauge is never decremented,
/// so the exported value is a per-type count of emitted jobs for those types.
pub fn tracks_index(index: usize) -> bool {
    index % 2 == 0
}

/// Per job type gauge of jobs handed to the queue.
#[derive(Debug, Clone)]
pub struct InflightTracker {
    gauge: IntGaugeVec,
}

impl InflightTracker {
    pub fn new() -> prometheus::Result<Self> {
        let gauge = IntGaugeVec::new(
            Opts::new(
                "metrics_server_exporter_inflight_jobs",
                "Number of jobs in flight for metrics-server-exporter workers",
            )
            .namespace("worker")
            .subsystem("jobs"),
            &["type"],
        )?;
        Ok(Self { gauge })
    }

    pub fn register(&self, registry: &Registry) -> prometheus::Result<()> {
        registry.register(Box::new(self.gauge.clone()))
    }

    pub fn increment(&self, kind: &JobKind) {
        self.gauge.with_label_values(&[kind.as_str()]).inc();
    }

    /// Current value for `kind`. Reading creates the series at zero if the
    /// type was never incremented.
    pub fn get(&self, kind: &JobKind) -> i64 {
        self.gauge.with_label_values(&[kind.as_str()]).get()
    }
}
