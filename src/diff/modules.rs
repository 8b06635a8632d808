//! Module-level diffing
//!
//! Matches the two snapshots' module graphs and resolves the per-module
//! context the diff tables need: which output assets contain a module on
//! each side, and the lookup keys for retrieving its code text from each
//! snapshot's code map. Code retrieval and rendering stay with the
//! consumer.

use crate::diff::classify::{classify, UpdateType};
use crate::diff::key::module_key;
use crate::diff::matcher::{match_entities, DiffWarning, MatchedPair};
use crate::diff::size::SideValues;
use crate::snapshot::model::{BuildSnapshot, Module, ModuleCode, ModuleId};
use serde::{Deserialize, Serialize};

/// Match both snapshots' modules by normalized key.
///
/// Two physically different files can normalize to the same key after hash
/// stripping; the matcher's first-occurrence-wins rule applies and no
/// disambiguation is attempted.
pub fn diff_modules(
    baseline: &BuildSnapshot,
    current: &BuildSnapshot,
) -> (Vec<MatchedPair<Module>>, Vec<DiffWarning>) {
    match_entities(baseline.modules(), current.modules(), module_key)
}

/// Per-side module ids for code-map lookups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCodeKeys {
    /// Id in the baseline snapshot's code map, when the module exists there
    pub baseline: Option<ModuleId>,
    /// Id in the current snapshot's code map, when the module exists there
    pub current: Option<ModuleId>,
}

impl ModuleCodeKeys {
    /// Resolve the keys against both snapshots' code maps
    pub fn lookup<'a>(
        &self,
        baseline: &'a BuildSnapshot,
        current: &'a BuildSnapshot,
    ) -> SideValues<Option<&'a ModuleCode>> {
        SideValues {
            baseline: self
                .baseline
                .as_deref()
                .and_then(|id| baseline.module_code(id)),
            current: self.current.as_deref().and_then(|id| current.module_code(id)),
        }
    }
}

/// Code-lookup keys for a matched module pair
pub fn code_keys(pair: &MatchedPair<Module>) -> ModuleCodeKeys {
    ModuleCodeKeys {
        baseline: pair.baseline.as_ref().map(|m| m.id.clone()),
        current: pair.current.as_ref().map(|m| m.id.clone()),
    }
}

/// Output assets containing the module on each side.
///
/// Resolved through the module→chunk and chunk→asset relations already
/// present in the chunk graph; the result is sorted and deduplicated so the
/// ordering is reproducible.
pub fn asset_membership(
    pair: &MatchedPair<Module>,
    baseline: &BuildSnapshot,
    current: &BuildSnapshot,
) -> SideValues<Vec<String>> {
    SideValues {
        baseline: side_membership(pair.baseline.as_ref(), baseline),
        current: side_membership(pair.current.as_ref(), current),
    }
}

fn side_membership(module: Option<&Module>, snapshot: &BuildSnapshot) -> Vec<String> {
    let Some(module) = module else {
        return Vec::new();
    };
    let mut assets: Vec<String> = module
        .chunks
        .iter()
        .filter_map(|chunk_id| snapshot.chunk(chunk_id))
        .flat_map(|chunk| chunk.assets.iter().cloned())
        .collect();
    assets.sort_unstable();
    assets.dedup();
    assets
}

/// Aggregate counters over classified module pairs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    /// Modules present only in the current snapshot
    pub new_count: usize,
    /// Modules present only in the baseline snapshot
    pub deleted_count: usize,
    /// Modules whose sizes differ
    pub changed_count: usize,
}

/// Count New/Deleted/Changed module pairs
pub fn summarize(pairs: &[MatchedPair<Module>]) -> ModuleSummary {
    let mut summary = ModuleSummary::default();
    for pair in pairs {
        match classify(pair) {
            UpdateType::New => summary.new_count += 1,
            UpdateType::Deleted => summary.deleted_count += 1,
            UpdateType::Changed => summary.changed_count += 1,
            UpdateType::NotChanged => {}
        }
    }
    summary
}
