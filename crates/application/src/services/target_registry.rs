use arc_swap::ArcSwap;
use coredns_probe_domain::{EndpointStats, Target};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// A target and the statistics record exclusively associated with it.
#[derive(Debug, Clone)]
pub struct TargetEntry {
    pub target: Target,
    pub stats: Arc<EndpointStats>,
}

impl TargetEntry {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            stats: Arc::new(EndpointStats::new()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryChange {
    pub added: Vec<Target>,
    pub removed: Vec<Target>,
    pub retained: usize,
}

impl RegistryChange {
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Holds the immutable set of targets being probed.
///
/// Readers take a snapshot once per tick or report; a refresh builds a new
/// set and swaps it in atomically, so in-flight probes keep working against
/// the set they started with.
pub struct TargetRegistry {
    current: ArcSwap<Vec<TargetEntry>>,
}

impl TargetRegistry {
    pub fn new(targets: Vec<Target>) -> Self {
        let entries = targets.into_iter().map(TargetEntry::new).collect();
        Self {
            current: ArcSwap::from_pointee(entries),
        }
    }

    pub fn snapshot(&self) -> Arc<Vec<TargetEntry>> {
        self.current.load_full()
    }

    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn targets(&self) -> Vec<Target> {
        self.current
            .load()
            .iter()
            .map(|entry| entry.target.clone())
            .collect()
    }

    pub fn stats_for(&self, target: &Target) -> Option<Arc<EndpointStats>> {
        self.current
            .load()
            .iter()
            .find(|entry| &entry.target == target)
            .map(|entry| Arc::clone(&entry.stats))
    }

    /// Swap in a new target set. Targets present in both sets keep their
    /// statistics record; new targets start from zero.
    ///
    /// Expected to be driven by a single refresher.
    pub fn replace(&self, targets: Vec<Target>) -> RegistryChange {
        let previous = self.current.load_full();
        let mut existing: HashMap<&Target, &Arc<EndpointStats>> = previous
            .iter()
            .map(|entry| (&entry.target, &entry.stats))
            .collect();

        let mut change = RegistryChange::default();
        let mut next = Vec::with_capacity(targets.len());
        for target in targets {
            match existing.remove(&target) {
                Some(stats) => {
                    change.retained += 1;
                    next.push(TargetEntry {
                        target,
                        stats: Arc::clone(stats),
                    });
                }
                None => {
                    change.added.push(target.clone());
                    next.push(TargetEntry::new(target));
                }
            }
        }

        change.removed = previous
            .iter()
            .filter(|entry| existing.contains_key(&entry.target))
            .map(|entry| entry.target.clone())
            .collect();

        if !change.is_unchanged() {
            info!(
                added = change.added.len(),
                removed = change.removed.len(),
                retained = change.retained,
                "Target set replaced"
            );
        }

        self.current.store(Arc::new(next));
        change
    }
}
