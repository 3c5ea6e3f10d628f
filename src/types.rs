use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_WORKERS: usize = 2;
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_JOB_SLEEP: Duration = Duration::from_secs(30);
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;
pub const DEFAULT_JOB_TYPES: &[&str] = &["pods", "nodes"];

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub workers: usize,
    /// Pause between two producer passes over the job types.
    pub interval: Duration,
    /// Pause a worker takes after each job, carried on the job itself.
    pub job_sleep: Duration,
    pub queue_capacity: usize,
    pub job_types: Vec<String>,
    pub listen_addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            interval: DEFAULT_INTERVAL,
            job_sleep: DEFAULT_JOB_SLEEP,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            job_types: DEFAULT_JOB_TYPES.iter().map(|s| s.to_string()).collect(),
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 9100)),
        }
    }
}

/// Usage for one container as reported by metrics-server. A quantity is
/// `None` when metrics-server omitted it or it could not be parsed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ContainerUsage {
    pub namespace: String,
    pub pod: String,
    pub container: String,
    pub cpu_cores: Option<f64>,
    pub memory_bytes: Option<f64>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct NodeUsage {
    pub node: String,
    pub cpu_cores: Option<f64>,
    pub memory_bytes: Option<f64>,
}
