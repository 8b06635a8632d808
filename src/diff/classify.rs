//! Update classification of matched pairs

use crate::diff::matcher::MatchedPair;
use crate::snapshot::model::{Asset, Module, Package};
use serde::{Deserialize, Serialize};

/// How an entity changed between the baseline and the current snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateType {
    /// Present only in the current snapshot
    New,
    /// Present only in the baseline snapshot
    Deleted,
    /// Present on both sides with differing sizes (or version sets)
    Changed,
    /// Present on both sides, identical
    NotChanged,
}

/// Size equality used for change detection, compared field by field
pub trait SizeEq {
    /// Whether both entities report identical sizes
    fn size_eq(&self, other: &Self) -> bool;
}

impl SizeEq for Module {
    fn size_eq(&self, other: &Self) -> bool {
        self.size.source_size == other.size.source_size
            && self.size.parsed_size == other.size.parsed_size
    }
}

impl SizeEq for Asset {
    fn size_eq(&self, other: &Self) -> bool {
        self.size == other.size
    }
}

impl SizeEq for Package {
    fn size_eq(&self, other: &Self) -> bool {
        self.size.source_size == other.size.source_size
            && self.size.parsed_size == other.size.parsed_size
    }
}

/// Classify a matched pair of size-carrying entities.
///
/// One-sided pairs are New/Deleted; both-sided pairs are Changed when any
/// size field differs.
pub fn classify<T: SizeEq>(pair: &MatchedPair<T>) -> UpdateType {
    match (&pair.baseline, &pair.current) {
        (Some(_), None) => UpdateType::Deleted,
        (None, Some(_)) => UpdateType::New,
        (Some(baseline), Some(current)) => {
            if baseline.size_eq(current) {
                UpdateType::NotChanged
            } else {
                UpdateType::Changed
            }
        }
        // The matcher never emits an empty pair
        (None, None) => UpdateType::NotChanged,
    }
}

/// Classify a package group by its version sets.
///
/// Both sides' version lists are sorted and comma-joined; unequal strings
/// mean Changed. Repeated versions within one side stay in the list and are
/// not deduplicated.
pub fn classify_versions(pair: &MatchedPair<Vec<Package>>) -> UpdateType {
    match (&pair.baseline, &pair.current) {
        (Some(_), None) => UpdateType::Deleted,
        (None, Some(_)) => UpdateType::New,
        (Some(baseline), Some(current)) => {
            if version_signature(baseline) == version_signature(current) {
                UpdateType::NotChanged
            } else {
                UpdateType::Changed
            }
        }
        (None, None) => UpdateType::NotChanged,
    }
}

fn version_signature(packages: &[Package]) -> String {
    let mut versions: Vec<&str> = packages.iter().map(|p| p.version.as_str()).collect();
    versions.sort_unstable();
    versions.join(",")
}
