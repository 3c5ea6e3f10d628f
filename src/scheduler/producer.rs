use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::counter::IterationCounter;
use super::inflight::{tracks_index, InflightTracker};
use super::job::Job;
use super::queue::{JobSender, QueueClosed};
use super::registry::JobTypeRegistry;

/// Emits one job per registered type every `interval`.
pub struct JobProducer {
    registry: JobTypeRegistry,
    interval: Duration,
    job_sleep: Duration,
    queue: JobSender,
    inflight: InflightTracker,
    cycles: IterationCounter,
}

impl JobProducer {
    pub fn new(
        registry: JobTypeRegistry,
        interval: Duration,
        job_sleep: Duration,
        queue: JobSender,
        inflight: InflightTracker,
    ) -> Self {
        Self {
            registry,
            interval,
            job_sleep,
            queue,
            inflight,
            cycles: IterationCounter::new(),
        }
    }

    /// Counter of fully completed generation passes.
    pub fn cycles(&self) -> IterationCounter {
        self.cycles.clone()
    }

    /// Push one job per registered type, in registry order, waiting on a
    /// full queue. Returns how many jobs were enqueued.
    pub async fn run_cycle(&self) -> Result<usize, QueueClosed> {
        for (index, kind) in self.registry.iter().enumerate() {
            let job = Job::new(kind.clone(), self.job_sleep);
            if tracks_index(index) {
                self.inflight.increment(kind);
            }
            self.queue.push(job).await?;
            debug!(job_type = %kind, queued = self.queue.len(), "Enqueued job");
        }
        self.cycles.increment();
        Ok(self.registry.len())
    }

    /// Generate jobs until `shutdown` fires or the queue is closed.
    pub async fn run(self, shutdown: CancellationToken) {
        info!(
            interval = ?self.interval,
            job_sleep = ?self.job_sleep,
            job_types = self.registry.len(),
            "Starting job producer"
        );
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                res = self.run_cycle() => {
                    if let Err(e) = res {
                        warn!(error = %e, "Stopping job producer");
                        return;
                    }
                }
            }
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
        info!(cycles = self.cycles.get(), "Job producer stopped");
    }
}
