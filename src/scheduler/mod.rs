//! Job scheduling engine: a producer emitting typed scrape jobs into a
//! bounded queue and a fixed pool of workers executing them.

pub mod counter;
pub mod inflight;
pub mod job;
pub mod producer;
pub mod queue;
pub mod registry;
pub mod worker;

pub use counter::IterationCounter;
pub use inflight::InflightTracker;
pub use job::{Job, JobKind};
pub use producer::JobProducer;
pub use queue::{bounded, JobReceiver, JobSender, QueueClosed};
pub use registry::JobTypeRegistry;
pub use worker::{ActiveWorkers, WorkerPool};

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::collector::MetricsRecorder;
use crate::types::Config;

/// Handles to a running producer and worker pool.
pub struct SchedulerHandle {
    pub scrapes: IterationCounter,
    pub cycles: IterationCounter,
    pub active_workers: ActiveWorkers,
    producer: JoinHandle<()>,
    workers: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Wait for both the producer and the pool to finish.
    pub async fn join(self) {
        if let Err(e) = self.producer.await {
            tracing::error!(error = %e, "Job producer task failed");
        }
        if let Err(e) = self.workers.await {
            tracing::error!(error = %e, "Worker pool task failed");
        }
    }
}

/// Wire the queue, producer and worker pool described by `cfg` and spawn
/// them onto the current runtime.
pub fn start(
    cfg: &Config,
    recorder: Arc<dyn MetricsRecorder>,
    inflight: InflightTracker,
    shutdown: CancellationToken,
) -> SchedulerHandle {
    let (tx, rx) = bounded(cfg.queue_capacity);
    let producer = JobProducer::new(
        JobTypeRegistry::from_names(&cfg.job_types),
        cfg.interval,
        cfg.job_sleep,
        tx,
        inflight,
    );
    let scrapes = IterationCounter::new();
    let pool = WorkerPool::new(cfg.workers, rx, recorder, scrapes.clone());

    let cycles = producer.cycles();
    let active_workers = pool.active_workers();
    let workers = tokio::spawn(pool.run(shutdown.clone()));
    let producer = tokio::spawn(producer.run(shutdown));

    SchedulerHandle {
        scrapes,
        cycles,
        active_workers,
        producer,
        workers,
    }
}
