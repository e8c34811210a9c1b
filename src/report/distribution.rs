//! Per-class sample counts for one split.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::dataset::ManifestRecord;

/// Distinct class names seen in `records`, in lexicographic order
pub fn discover_classes(records: &[ManifestRecord]) -> BTreeSet<&str> {
    records.iter().map(|r| r.class_name.as_str()).collect()
}

/// Mapping from class name to sample count.
///
/// Backed by a `BTreeMap`, so iteration is always in lexicographic class
/// order regardless of the order records appeared in the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassDistribution {
    counts: BTreeMap<String, usize>,
}

impl ClassDistribution {
    /// Count records per class
    pub fn from_records(records: &[ManifestRecord]) -> Self {
        let mut counts: BTreeMap<String, usize> = discover_classes(records)
            .into_iter()
            .map(|name| (name.to_string(), 0))
            .collect();

        for record in records {
            if let Some(count) = counts.get_mut(&record.class_name) {
                *count += 1;
            }
        }

        Self { counts }
    }

    /// Count for a class, zero if the class was never seen
    pub fn count(&self, class_name: &str) -> usize {
        self.counts.get(class_name).copied().unwrap_or(0)
    }

    /// Total number of samples
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Largest per-class count, zero when empty
    pub fn max_count(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }

    pub fn num_classes(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Class names in lexicographic order
    pub fn class_names(&self) -> Vec<&str> {
        self.counts.keys().map(String::as_str).collect()
    }

    /// `(class, count)` pairs in lexicographic class order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

/// Length of the text bar for `count`: `floor(count / max_count * width)`.
///
/// Computed in integer arithmetic so the largest class always gets exactly
/// `width` characters. Returns 0 when `max_count` is 0.
pub fn bar_length(count: usize, max_count: usize, width: usize) -> usize {
    if max_count == 0 {
        return 0;
    }
    count * width / max_count
}
