use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use crate::parsing::parse_duration;
use crate::types::Config;

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Command line values that take precedence over the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub workers: Option<usize>,
    pub interval: Option<Duration>,
    pub job_sleep: Option<Duration>,
    pub listen_addr: Option<SocketAddr>,
}

pub fn load_config() -> Result<Config> {
    load_config_with_env(&SystemEnvironment)
}

pub fn load_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<Config> {
    let defaults = Config::default();

    let workers = match env.get_var("EXPORTER_WORKERS") {
        Some(v) => v.trim().parse::<usize>().context("Invalid EXPORTER_WORKERS")?,
        None => defaults.workers,
    };

    let interval = duration_var(env, "EXPORTER_INTERVAL")?.unwrap_or(defaults.interval);
    let job_sleep = duration_var(env, "EXPORTER_JOB_SLEEP")?.unwrap_or(defaults.job_sleep);

    let queue_capacity = match env.get_var("EXPORTER_QUEUE_CAPACITY") {
        Some(v) => v
            .trim()
            .parse::<usize>()
            .context("Invalid EXPORTER_QUEUE_CAPACITY")?,
        None => defaults.queue_capacity,
    };

    let job_types = match env.get_var("EXPORTER_JOB_TYPES") {
        Some(v) => v
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => defaults.job_types,
    };

    let listen_addr = match env.get_var("EXPORTER_LISTEN_ADDR") {
        Some(v) => v
            .trim()
            .parse::<SocketAddr>()
            .context("Invalid EXPORTER_LISTEN_ADDR")?,
        None => defaults.listen_addr,
    };

    let cfg = Config {
        workers,
        interval,
        job_sleep,
        queue_capacity,
        job_types,
        listen_addr,
    };
    validate(&cfg)?;
    Ok(cfg)
}

/// Apply command line overrides on top of an environment derived config.
pub fn apply_overrides(mut cfg: Config, overrides: &Overrides) -> Result<Config> {
    if let Some(workers) = overrides.workers {
        cfg.workers = workers;
    }
    if let Some(interval) = overrides.interval {
        cfg.interval = interval;
    }
    if let Some(job_sleep) = overrides.job_sleep {
        cfg.job_sleep = job_sleep;
    }
    if let Some(addr) = overrides.listen_addr {
        cfg.listen_addr = addr;
    }
    validate(&cfg)?;
    Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
    if cfg.workers == 0 {
        return Err(anyhow!("EXPORTER_WORKERS must be at least 1"));
    }
    if cfg.queue_capacity == 0 {
        return Err(anyhow!("EXPORTER_QUEUE_CAPACITY must be at least 1"));
    }
    if cfg.interval.is_zero() {
        return Err(anyhow!("EXPORTER_INTERVAL must be greater than zero"));
    }
    if cfg.job_types.is_empty() {
        return Err(anyhow!("EXPORTER_JOB_TYPES must name at least one job type"));
    }
    Ok(())
}

fn duration_var<E: EnvironmentProvider>(env: &E, key: &str) -> Result<Option<Duration>> {
    env.get_var(key)
        .map(|v| parse_duration(&v).map_err(|e| anyhow!("Invalid {}: {}", key, e)))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_loading_defaults() {
        let config = load_config_with_env(&MockEnvironment::new()).unwrap();

        assert_eq!(config.workers, 2);
        assert_eq!(config.interval, Duration::from_secs(30));
        assert_eq!(config.job_sleep, Duration::from_secs(30));
        assert_eq!(config.queue_capacity, 100);
        assert_eq!(config.job_types, vec!["pods", "nodes"]);
        assert_eq!(config.listen_addr.port(), 9100);
    }

    #[test]
    fn test_config_loading_with_env() {
        let env = MockEnvironment::new()
            .with_var("EXPORTER_WORKERS", "4")
            .with_var("EXPORTER_INTERVAL", "1m")
            .with_var("EXPORTER_JOB_SLEEP", "500ms")
            .with_var("EXPORTER_QUEUE_CAPACITY", "10")
            .with_var("EXPORTER_JOB_TYPES", " nodes , pods ,")
            .with_var("EXPORTER_LISTEN_ADDR", "127.0.0.1:9200");

        let config = load_config_with_env(&env).unwrap();

        assert_eq!(config.workers, 4);
        assert_eq!(config.interval, Duration::from_secs(60));
        assert_eq!(config.job_sleep, Duration::from_millis(500));
        assert_eq!(config.queue_capacity, 10);
        assert_eq!(config.job_types, vec!["nodes", "pods"]);
        assert_eq!(config.listen_addr, "127.0.0.1:9200".parse().unwrap());
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let cases = [
            ("EXPORTER_WORKERS", "many"),
            ("EXPORTER_WORKERS", "0"),
            ("EXPORTER_INTERVAL", "soon"),
            ("EXPORTER_INTERVAL", "0s"),
            ("EXPORTER_JOB_SLEEP", "later"),
            ("EXPORTER_QUEUE_CAPACITY", "0"),
            ("EXPORTER_JOB_TYPES", " , ,"),
            ("EXPORTER_LISTEN_ADDR", "nowhere"),
        ];
        for (key, value) in cases {
            let env = MockEnvironment::new().with_var(key, value);
            let err = load_config_with_env(&env).unwrap_err();
            assert!(
                format!("{:#}", err).contains(key),
                "expected error for {}={} to mention the variable, got {:#}",
                key,
                value,
                err
            );
        }
    }

    #[test]
    fn test_overrides_take_precedence() {
        let env = MockEnvironment::new()
            .with_var("EXPORTER_WORKERS", "4")
            .with_var("EXPORTER_INTERVAL", "1m");
        let config = load_config_with_env(&env).unwrap();

        let overrides = Overrides {
            workers: Some(1),
            interval: Some(Duration::from_millis(10)),
            ..Default::default()
        };
        let config = apply_overrides(config, &overrides).unwrap();
        assert_eq!(config.workers, 1);
        assert_eq!(config.interval, Duration::from_millis(10));
        assert_eq!(config.job_sleep, Duration::from_secs(30));

        let zero = Overrides {
            workers: Some(0),
            ..Default::default()
        };
        assert!(apply_overrides(config, &zero).is_err());
    }
}
