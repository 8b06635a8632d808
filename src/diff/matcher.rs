//! Entity matching across two snapshots
//!
//! Pairs baseline and current entities by [`NormalizedKey`] into
//! [`MatchedPair`] records. Matching is deterministic: baseline keys come
//! first in their original order, then current-only keys in theirs, and the
//! changed-first ordering used by reports is a stable partition. Identical
//! inputs always produce identical output.

use crate::diff::classify::UpdateType;
use crate::diff::key::NormalizedKey;
use crate::error::DiffError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Which snapshot side an observation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The baseline snapshot
    Baseline,
    /// The current snapshot
    Current,
}

/// A non-fatal condition observed while matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum DiffWarning {
    /// Two entities on one side normalized to the same key; the first
    /// occurrence won. Multi-compiler builds legitimately repeat entries.
    DuplicateKey {
        /// The colliding key
        key: NormalizedKey,
        /// Side the duplicate appeared on
        side: Side,
    },
    /// An entity lacked identity fields and was skipped
    SkippedEntity {
        /// Entity kind ("module", "asset", "package")
        entity: String,
        /// Why it was skipped
        detail: String,
    },
}

/// Baseline/current occurrences of one logical entity.
///
/// Invariant: at least one of `baseline`/`current` is present. Pairs are
/// only constructed by [`match_entities`], which upholds this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedPair<T> {
    /// Normalized cross-build key
    pub key: NormalizedKey,
    /// Occurrence in the baseline snapshot, if any
    pub baseline: Option<T>,
    /// Occurrence in the current snapshot, if any
    pub current: Option<T>,
}

/// Pair two ordered entity sequences by normalized key.
///
/// Within each side, duplicate keys are deduplicated first-occurrence-wins
/// and recorded as warnings. Entities whose key cannot be computed are
/// skipped with a warning; the diff proceeds. The output holds every
/// baseline key in original order followed by current-only keys in original
/// order.
pub fn match_entities<T: Clone>(
    baseline: &[T],
    current: &[T],
    mut key_fn: impl FnMut(&T) -> Result<NormalizedKey, DiffError>,
) -> (Vec<MatchedPair<T>>, Vec<DiffWarning>) {
    let mut warnings = Vec::new();
    let baseline_side = dedup_side(baseline, &mut key_fn, Side::Baseline, &mut warnings);
    let current_side = dedup_side(current, &mut key_fn, Side::Current, &mut warnings);

    let mut current_by_key: HashMap<NormalizedKey, T> = current_side
        .iter()
        .map(|(key, entity)| (key.clone(), entity.clone()))
        .collect();

    let mut pairs = Vec::with_capacity(baseline_side.len() + current_side.len());
    for (key, entity) in baseline_side {
        let current_entity = current_by_key.remove(&key);
        pairs.push(MatchedPair {
            key,
            baseline: Some(entity),
            current: current_entity,
        });
    }
    for (key, entity) in current_side {
        if current_by_key.remove(&key).is_some() {
            pairs.push(MatchedPair {
                key,
                baseline: None,
                current: Some(entity),
            });
        }
    }

    (pairs, warnings)
}

fn dedup_side<T: Clone>(
    entities: &[T],
    key_fn: &mut impl FnMut(&T) -> Result<NormalizedKey, DiffError>,
    side: Side,
    warnings: &mut Vec<DiffWarning>,
) -> Vec<(NormalizedKey, T)> {
    let mut seen: HashSet<NormalizedKey> = HashSet::with_capacity(entities.len());
    let mut ordered = Vec::with_capacity(entities.len());

    for entity in entities {
        let key = match key_fn(entity) {
            Ok(key) => key,
            Err(DiffError::InvalidEntity { kind, detail }) => {
                log::warn!("skipping {} without identity: {}", kind, detail);
                warnings.push(DiffWarning::SkippedEntity {
                    entity: kind.to_string(),
                    detail,
                });
                continue;
            }
            // Key functions only fail with InvalidEntity
            Err(_) => continue,
        };
        if !seen.insert(key.clone()) {
            log::warn!("duplicate {:?} key: {}", side, key);
            warnings.push(DiffWarning::DuplicateKey { key, side });
            continue;
        }
        ordered.push((key, entity.clone()));
    }

    ordered
}

/// Stable-partition pairs so Changed/New/Deleted come before NotChanged.
///
/// Both groups preserve their relative input order, so the result is exactly
/// reproducible for a given input.
pub fn sort_changed_first<T>(
    pairs: Vec<MatchedPair<T>>,
    mut classify: impl FnMut(&MatchedPair<T>) -> UpdateType,
) -> Vec<MatchedPair<T>> {
    let mut changed = Vec::with_capacity(pairs.len());
    let mut unchanged = Vec::new();
    for pair in pairs {
        if classify(&pair) == UpdateType::NotChanged {
            unchanged.push(pair);
        } else {
            changed.push(pair);
        }
    }
    changed.extend(unchanged);
    changed
}
