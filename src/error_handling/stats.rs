//! Processing statistics tracking.
//!
//! Thread-safe counters for errors, warnings, and informational events seen
//! while URLs are analyzed.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType, WarningType};

/// One atomic counter per variant of `K`, allocated up front.
struct CounterSet<K> {
    counters: HashMap<K, AtomicUsize>,
}

impl<K> CounterSet<K>
where
    K: IntoEnumIterator + Copy + Eq + Hash + Debug,
{
    fn new() -> Self {
        Self {
            counters: K::iter().map(|k| (k, AtomicUsize::new(0))).collect(),
        }
    }

    fn increment(&self, key: K) {
        match self.counters.get(&key) {
            Some(counter) => {
                counter.fetch_add(1, Ordering::Relaxed);
            }
            None => log::error!("Counter for {key:?} is missing from the stats map"),
        }
    }

    fn get(&self, key: K) -> usize {
        self.counters
            .get(&key)
            .map_or(0, |c| c.load(Ordering::SeqCst))
    }

    fn total(&self) -> usize {
        self.counters.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }
}

/// Thread-safe processing statistics tracker.
///
/// Increments never allocate, so one instance is shared across tasks behind
/// an `Arc`.
pub struct ProcessingStats {
    errors: CounterSet<ErrorType>,
    warnings: CounterSet<WarningType>,
    info: CounterSet<InfoType>,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    pub fn new() -> Self {
        ProcessingStats {
            errors: CounterSet::new(),
            warnings: CounterSet::new(),
            info: CounterSet::new(),
        }
    }

    pub fn increment_error(&self, error: ErrorType) {
        self.errors.increment(error);
    }

    pub fn increment_warning(&self, warning: WarningType) {
        self.warnings.increment(warning);
    }

    pub fn increment_info(&self, info_type: InfoType) {
        self.info.increment(info_type);
    }

    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors.get(error)
    }

    pub fn get_warning_count(&self, warning: WarningType) -> usize {
        self.warnings.get(warning)
    }

    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info.get(info_type)
    }

    pub fn total_errors(&self) -> usize {
        self.errors.total()
    }

    pub fn total_warnings(&self) -> usize {
        self.warnings.total()
    }

    pub fn total_info(&self) -> usize {
        self.info.total()
    }
}
