use thiserror::Error;

/// Failure of a single collection pass. Never fatal to a worker.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("failed to build request: {0}")]
    Request(#[from] http::Error),
}
