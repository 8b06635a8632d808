//! Package-level diffing
//!
//! Packages are grouped by name only, so one row represents every installed
//! version of a package on a side (duplicate-package findings stay visible
//! as multi-version groups). Group sizes are the per-side sums of parsed
//! sizes across versions; classification compares the version sets.

use crate::diff::classify::{classify_versions, UpdateType};
use crate::diff::key::{package_key, NormalizedKey};
use crate::diff::matcher::{match_entities, DiffWarning, MatchedPair};
use crate::diff::size::{DiffItem, SideValues};
use crate::snapshot::model::Package;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Group a side's packages by name, preserving first-seen order.
///
/// Repeated `(name, version)` entries are kept: the upstream manifests do
/// not deduplicate them, so both their sizes and their version strings stay
/// in the group.
fn group_by_name(
    packages: &[Package],
    warnings: &mut Vec<DiffWarning>,
) -> Vec<(NormalizedKey, Vec<Package>)> {
    let mut order: Vec<NormalizedKey> = Vec::new();
    let mut groups: std::collections::HashMap<NormalizedKey, Vec<Package>> =
        std::collections::HashMap::new();

    for package in packages {
        let key = match package_key(package) {
            Ok(key) => key,
            Err(crate::error::DiffError::InvalidEntity { kind, detail }) => {
                log::warn!("skipping {} without identity: {}", kind, detail);
                warnings.push(DiffWarning::SkippedEntity {
                    entity: kind.to_string(),
                    detail,
                });
                continue;
            }
            Err(_) => continue,
        };
        let group = groups.entry(key.clone()).or_default();
        if group.is_empty() {
            order.push(key);
        }
        group.push(package.clone());
    }

    order
        .into_iter()
        .map(|key| {
            let group = groups.remove(&key).unwrap_or_default();
            (key, group)
        })
        .collect()
}

/// Match both sides' packages into per-name version groups
pub fn diff_packages(
    baseline: &[Package],
    current: &[Package],
) -> (Vec<MatchedPair<Vec<Package>>>, Vec<DiffWarning>) {
    let mut warnings = Vec::new();
    let baseline_groups = group_by_name(baseline, &mut warnings);
    let current_groups = group_by_name(current, &mut warnings);

    // Groups are already unique per name, so the matcher only contributes
    // the union ordering here.
    let (pairs, match_warnings) =
        match_entities(&baseline_groups, &current_groups, |(key, _)| Ok(key.clone()));
    warnings.extend(match_warnings);

    let pairs = pairs
        .into_iter()
        .map(|pair| MatchedPair {
            key: pair.key,
            baseline: pair.baseline.map(|(_, group)| group),
            current: pair.current.map(|(_, group)| group),
        })
        .collect();

    (pairs, warnings)
}

/// Sum of parsed sizes across every version in a group side
pub fn parsed_size_sum(packages: &[Package]) -> u64 {
    packages.iter().map(|p| p.size.parsed_size).sum()
}

/// Aggregate size/count diff for one package group
pub fn group_diff_item(pair: &MatchedPair<Vec<Package>>) -> DiffItem {
    let baseline = pair.baseline.as_deref().unwrap_or(&[]);
    let current = pair.current.as_deref().unwrap_or(&[]);
    DiffItem::between(
        SideValues {
            baseline: parsed_size_sum(baseline),
            current: parsed_size_sum(current),
        },
        SideValues {
            baseline: baseline.len(),
            current: current.len(),
        },
    )
}

/// Pure, non-mutating projection filter over package groups
#[derive(Debug, Clone, Default)]
pub struct PackageFilter {
    /// Case-insensitive name substring to match, if any
    pub name_contains: Option<String>,
    /// Update types to keep; `None` keeps all
    pub update_types: Option<HashSet<UpdateType>>,
}

impl PackageFilter {
    /// Whether a group passes the filter
    pub fn matches(&self, pair: &MatchedPair<Vec<Package>>) -> bool {
        if let Some(needle) = &self.name_contains {
            if !pair
                .key
                .as_str()
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if let Some(types) = &self.update_types {
            if !types.contains(&classify_versions(pair)) {
                return false;
            }
        }
        true
    }

    /// Project the groups passing the filter; the underlying dataset is untouched
    pub fn apply<'a>(
        &self,
        pairs: &'a [MatchedPair<Vec<Package>>],
    ) -> Vec<&'a MatchedPair<Vec<Package>>> {
        pairs.iter().filter(|pair| self.matches(pair)).collect()
    }
}

/// Aggregate counters over classified package groups, for summary badges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSummary {
    /// Groups present only in the current snapshot
    pub new_count: usize,
    /// Groups present only in the baseline snapshot
    pub deleted_count: usize,
    /// Groups whose version sets differ
    pub changed_count: usize,
}

/// Count New/Deleted/Changed groups
pub fn summarize(pairs: &[MatchedPair<Vec<Package>>]) -> PackageSummary {
    let mut summary = PackageSummary::default();
    for pair in pairs {
        match classify_versions(pair) {
            UpdateType::New => summary.new_count += 1,
            UpdateType::Deleted => summary.deleted_count += 1,
            UpdateType::Changed => summary.changed_count += 1,
            UpdateType::NotChanged => {}
        }
    }
    summary
}
