use super::job::JobKind;

/// Ordered set of job types the producer cycles through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobTypeRegistry {
    kinds: Vec<JobKind>,
}

impl JobTypeRegistry {
    /// Build a registry from type names, keeping their order. Duplicate
    /// names are kept too; each occurrence produces its own job per cycle.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            kinds: names
                .into_iter()
                .map(|n| JobKind::from_name(n.as_ref()))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &JobKind> {
        self.kinds.iter()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for JobTypeRegistry {
    fn default() -> Self {
        Self::from_names(crate::types::DEFAULT_JOB_TYPES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_order() {
        let registry = JobTypeRegistry::default();
        let kinds: Vec<_> = registry.iter().cloned().collect();
        assert_eq!(kinds, vec![JobKind::Pods, JobKind::Nodes]);
    }

    #[test]
    fn test_registry_preserves_order_and_unknowns() {
        let registry = JobTypeRegistry::from_names(["nodes", "gpu", "pods"]);
        let names: Vec<_> = registry.iter().map(|k| k.as_str().to_string()).collect();
        assert_eq!(names, vec!["nodes", "gpu", "pods"]);
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }
}
