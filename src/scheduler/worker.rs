use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::collector::MetricsRecorder;
use crate::error::CollectError;

use super::counter::IterationCounter;
use super::job::{Job, JobKind};
use super::queue::JobReceiver;

/// Number of worker loops currently running, shared by cloning.
#[derive(Debug, Clone, Default)]
pub struct ActiveWorkers {
    count: Arc<AtomicUsize>,
}

impl ActiveWorkers {
    pub fn get(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    fn enter(&self) -> ActiveGuard {
        self.count.fetch_add(1, Ordering::SeqCst);
        ActiveGuard {
            count: self.count.clone(),
        }
    }
}

struct ActiveGuard {
    count: Arc<AtomicUsize>,
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.count.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Fixed size set of workers draining a shared job queue.
pub struct WorkerPool {
    size: usize,
    queue: JobReceiver,
    recorder: Arc<dyn MetricsRecorder>,
    scrapes: IterationCounter,
    active: ActiveWorkers,
}

impl WorkerPool {
    pub fn new(
        size: usize,
        queue: JobReceiver,
        recorder: Arc<dyn MetricsRecorder>,
        scrapes: IterationCounter,
    ) -> Self {
        Self {
            size,
            queue,
            recorder,
            scrapes,
            active: ActiveWorkers::default(),
        }
    }

    pub fn active_workers(&self) -> ActiveWorkers {
        self.active.clone()
    }

    /// Spawn every worker and wait until all of them have exited, which
    /// only happens on shutdown or once the queue is closed and drained.
    pub async fn run(self, shutdown: CancellationToken) {
        info!("Starting {} workers", self.size);
        let mut workers = JoinSet::new();
        for id in 0..self.size {
            let worker = Worker {
                id,
                queue: self.queue.clone(),
                recorder: self.recorder.clone(),
                scrapes: self.scrapes.clone(),
            };
            let guard = self.active.enter();
            let shutdown = shutdown.clone();
            workers.spawn(async move {
                let _guard = guard;
                worker.run(shutdown).await;
            });
        }

        while let Some(res) = workers.join_next().await {
            if let Err(e) = res {
                error!(error = %e, "Worker task failed");
            }
        }
        info!("All workers stopped");
    }
}

struct Worker {
    id: usize,
    queue: JobReceiver,
    recorder: Arc<dyn MetricsRecorder>,
    scrapes: IterationCounter,
}

impl Worker {
    async fn run(self, shutdown: CancellationToken) {
        debug!(worker_id = self.id, "Worker started");
        loop {
            let job = tokio::select! {
                _ = shutdown.cancelled() => break,
                job = self.queue.pull() => match job {
                    Some(job) => job,
                    None => {
                        debug!(worker_id = self.id, "Job queue closed");
                        break;
                    }
                },
            };

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = self.process(&job) => {}
            }

            debug!(worker_id = self.id, "Sleeping workers for {:?}", job.sleep());
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(job.sleep()) => {}
            }
        }
        debug!(worker_id = self.id, "Worker stopped");
    }

    async fn process(&self, job: &Job) {
        let started = Instant::now();
        let scrape_count = self.scrapes.get();
        let res = match job.kind() {
            JobKind::Nodes => self.recorder.record_node_metrics().await,
            JobKind::Pods => {
                let res = self.recorder.record_pod_metrics().await;
                self.scrapes.increment();
                res
            }
            JobKind::Unknown(name) => {
                debug!(
                    worker_id = self.id,
                    job_type = %name,
                    "Ignoring job with no collection action"
                );
                return;
            }
        };
        self.report(job.kind(), scrape_count, started, res);
    }

    fn report(
        &self,
        kind: &JobKind,
        scrape_count: u64,
        started: Instant,
        res: Result<(), CollectError>,
    ) {
        let elapsed = started.elapsed().as_secs_f64();
        match res {
            Ok(()) => info!(
                scrape_count,
                worker_id = self.id,
                job_type = %kind,
                "Processed job in {:.3} seconds",
                elapsed
            ),
            Err(e) => error!(
                scrape_count,
                worker_id = self.id,
                job_type = %kind,
                error = %e,
                "Job failed after {:.3} seconds",
                elapsed
            ),
        }
    }
}
