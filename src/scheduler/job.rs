use std::fmt;
use std::time::Duration;

/// Metric category a job scrapes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobKind {
    Pods,
    Nodes,
    /// A registered type with no collection action. Workers ignore it.
    Unknown(String),
}

impl JobKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "pods" => JobKind::Pods,
            "nodes" => JobKind::Nodes,
            other => JobKind::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobKind::Pods => "pods",
            JobKind::Nodes => "nodes",
            JobKind::Unknown(name) => name,
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single scheduled scrape. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    kind: JobKind,
    sleep: Duration,
}

impl Job {
    pub fn new(kind: JobKind, sleep: Duration) -> Self {
        Self { kind, sleep }
    }

    pub fn kind(&self) -> &JobKind {
        &self.kind
    }

    /// How long the worker pauses after handling this job.
    pub fn sleep(&self) -> Duration {
        self.sleep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_name() {
        assert_eq!(JobKind::from_name("pods"), JobKind::Pods);
        assert_eq!(JobKind::from_name("nodes"), JobKind::Nodes);
        assert_eq!(
            JobKind::from_name("volumes"),
            JobKind::Unknown("volumes".to_string())
        );
        // Names are matched exactly.
        assert_eq!(
            JobKind::from_name("Pods"),
            JobKind::Unknown("Pods".to_string())
        );
    }

    #[test]
    fn test_kind_display_round_trips_name() {
        for name in ["pods", "nodes", "volumes"] {
            assert_eq!(JobKind::from_name(name).to_string(), name);
        }
    }
}
