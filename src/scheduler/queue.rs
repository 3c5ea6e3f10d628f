use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};

use super::job::Job;

/// Every receiver has been dropped; nothing will ever consume the job.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("job queue closed")]
pub struct QueueClosed;

/// Create a bounded FIFO job queue holding at most `capacity` pending jobs.
///
/// The sender side blocks on `push` while the queue is full. The receiver
/// side is cloneable so several workers can drain the same queue; each job
/// is handed to exactly one of them.
pub fn bounded(capacity: usize) -> (JobSender, JobReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        JobSender { tx },
        JobReceiver {
            rx: Arc::new(Mutex::new(rx)),
        },
    )
}

#[derive(Debug, Clone)]
pub struct JobSender {
    tx: mpsc::Sender<Job>,
}

impl JobSender {
    /// Enqueue a job, waiting for a free slot if the queue is full.
    pub async fn push(&self, job: Job) -> Result<(), QueueClosed> {
        self.tx.send(job).await.map_err(|_| QueueClosed)
    }

    /// Number of jobs currently waiting in the queue.
    pub fn len(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }
}

#[derive(Debug, Clone)]
pub struct JobReceiver {
    rx: Arc<Mutex<mpsc::Receiver<Job>>>,
}

impl JobReceiver {
    /// Wait for the next job. Returns `None` once every sender is gone and
    /// the queue has been drained.
    pub async fn pull(&self) -> Option<Job> {
        let mut rx = self.rx.lock().await;
        rx.recv().await
    }
}
