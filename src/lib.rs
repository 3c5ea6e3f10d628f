// Public modules
pub mod app;
pub mod collector;
pub mod config;
pub mod error;
pub mod kubernetes;
pub mod metrics;
pub mod parsing;
pub mod scheduler;
pub mod server;
pub mod shutdown;
pub mod types;

// Re-export commonly used items
pub use collector::{MetricsCollector, MetricsRecorder};
pub use config::{
    apply_overrides, load_config, load_config_with_env, EnvironmentProvider, MockEnvironment,
    Overrides, SystemEnvironment,
};
pub use error::CollectError;
pub use kubernetes::check_cluster_api_reachable;
pub use metrics::ExporterGauges;
pub use parsing::{parse_cpu_cores, parse_duration, parse_memory_bytes};
pub use scheduler::{
    InflightTracker, IterationCounter, Job, JobKind, JobProducer, JobTypeRegistry, WorkerPool,
};
pub use server::create_router;
pub use types::*;
