//! Diff report assembly
//!
//! [`assemble`] is the engine's single entry point: two snapshots in, one
//! immutable [`DiffReport`] out. It is a pure function with no I/O, so the
//! result is safe to memoize by the `(baseline.hash, current.hash)` pair —
//! [`ReportCache`] does exactly that, decoupled from any rendering
//! lifecycle.

use crate::diff::category::{aggregate_categories, AssetCategory, CategoryDiff};
use crate::diff::classify::{classify, classify_versions};
use crate::diff::matcher::{sort_changed_first, DiffWarning, MatchedPair};
use crate::diff::modules::{diff_modules, ModuleSummary};
use crate::diff::packages::{diff_packages, PackageSummary};
use crate::error::DiffError;
use crate::snapshot::model::{BuildSnapshot, Module, Package};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Aggregate counters for summary badges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    /// Module pair counters
    pub modules: ModuleSummary,
    /// Package group counters
    pub packages: PackageSummary,
}

/// Complete structural diff of two build snapshots.
///
/// Self-contained and JSON-serializable; carries no references into the
/// input snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffReport {
    /// Per-category asset totals (and initial views where they exist)
    pub overview: BTreeMap<AssetCategory, CategoryDiff>,
    /// Matched module pairs, changed entries first
    pub modules: Vec<MatchedPair<Module>>,
    /// Matched package version groups, changed entries first
    pub packages: Vec<MatchedPair<Vec<Package>>>,
    /// Aggregate counters
    pub summary: DiffSummary,
    /// Non-fatal conditions observed while matching
    pub warnings: Vec<DiffWarning>,
}

fn require_graphs(snapshot: &BuildSnapshot) -> Result<(), DiffError> {
    let missing = if snapshot.module_graph.is_none() {
        Some("moduleGraph")
    } else if snapshot.chunk_graph.is_none() {
        Some("chunkGraph")
    } else if snapshot.package_graph.is_none() {
        Some("packageGraph")
    } else {
        None
    };
    match missing {
        Some(missing) => Err(DiffError::MalformedSnapshot {
            hash: snapshot.hash.clone(),
            missing,
        }),
        None => Ok(()),
    }
}

/// Diff two snapshots into a complete report.
///
/// Deterministic: identical inputs always produce identical ordering and
/// classification. Well-formed-but-empty snapshots (zero modules, assets,
/// and packages) produce an all-empty report, never an error.
///
/// # Errors
///
/// Returns [`DiffError::MalformedSnapshot`] when either snapshot lacks one
/// of its top-level graphs; no partial report is produced.
pub fn assemble(
    baseline: &BuildSnapshot,
    current: &BuildSnapshot,
) -> Result<DiffReport, DiffError> {
    require_graphs(baseline)?;
    require_graphs(current)?;

    let mut warnings = Vec::new();

    let (module_pairs, module_warnings) = diff_modules(baseline, current);
    warnings.extend(module_warnings);
    let modules = sort_changed_first(module_pairs, classify);
    let module_summary = crate::diff::modules::summarize(&modules);

    let (package_pairs, package_warnings) = diff_packages(baseline.packages(), current.packages());
    warnings.extend(package_warnings);
    let packages = sort_changed_first(package_pairs, classify_versions);
    let package_summary = crate::diff::packages::summarize(&packages);

    let overview = aggregate_categories(baseline.assets(), current.assets());

    Ok(DiffReport {
        overview,
        modules,
        packages,
        summary: DiffSummary {
            modules: module_summary,
            packages: package_summary,
        },
        warnings,
    })
}

/// Memoization table for assembled reports, keyed by snapshot hash pair.
///
/// Recomputes only when the `(baseline.hash, current.hash)` pair changes;
/// repeated requests for a known pair return the cached report. Entries are
/// dropped via [`ReportCache::invalidate`] when a build is superseded.
#[derive(Default)]
pub struct ReportCache {
    entries: Mutex<HashMap<(String, String), Arc<DiffReport>>>,
}

impl ReportCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble through the cache
    pub fn diff(
        &self,
        baseline: &BuildSnapshot,
        current: &BuildSnapshot,
    ) -> Result<Arc<DiffReport>, DiffError> {
        let key = (baseline.hash.clone(), current.hash.clone());
        if let Some(report) = self.entries.lock().get(&key) {
            log::debug!("report cache hit: {} -> {}", key.0, key.1);
            return Ok(Arc::clone(report));
        }

        let report = Arc::new(assemble(baseline, current)?);
        self.entries.lock().insert(key, Arc::clone(&report));
        Ok(report)
    }

    /// Drop every cached report involving the snapshot hash
    pub fn invalidate(&self, hash: &str) {
        self.entries
            .lock()
            .retain(|(baseline, current), _| baseline != hash && current != hash);
    }

    /// Number of cached reports
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::model::{
        Asset, ChunkGraph, ModuleGraph, ModuleKind, ModuleSize, PackageGraph,
    };

    fn snapshot(hash: &str) -> BuildSnapshot {
        BuildSnapshot {
            hash: hash.to_string(),
            root: "/app".to_string(),
            module_graph: Some(ModuleGraph::default()),
            chunk_graph: Some(ChunkGraph::default()),
            package_graph: Some(PackageGraph::default()),
            module_code_map: HashMap::new(),
        }
    }

    fn module(path: &str, source_size: u64, parsed_size: u64) -> crate::snapshot::model::Module {
        crate::snapshot::model::Module {
            id: path.to_string(),
            path: path.to_string(),
            webpack_id: None,
            size: ModuleSize {
                source_size,
                parsed_size,
            },
            kind: ModuleKind::Normal,
            chunks: vec![],
        }
    }

    #[test]
    fn test_empty_snapshots_yield_empty_report_not_error() {
        let report = assemble(&snapshot("a"), &snapshot("b")).expect("empty diff succeeds");
        assert!(report.overview.is_empty());
        assert!(report.modules.is_empty());
        assert!(report.packages.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(report.summary, DiffSummary::default());
    }

    #[test]
    fn test_missing_module_graph_is_malformed_snapshot() {
        let mut bad = snapshot("bad");
        bad.module_graph = None;

        let err = assemble(&bad, &snapshot("ok")).expect_err("assemble should fail");
        assert!(matches!(
            err,
            DiffError::MalformedSnapshot {
                missing: "moduleGraph",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_graph_on_current_side_is_also_fatal() {
        let mut bad = snapshot("bad");
        bad.package_graph = None;

        let err = assemble(&snapshot("ok"), &bad).expect_err("assemble should fail");
        assert!(matches!(
            err,
            DiffError::MalformedSnapshot {
                missing: "packageGraph",
                ..
            }
        ));
    }

    #[test]
    fn test_changed_modules_sort_ahead_of_unchanged() {
        let mut baseline = snapshot("a");
        baseline.module_graph = Some(ModuleGraph {
            modules: vec![
                module("src/same.js", 10, 10),
                module("src/grown.js", 10, 10),
            ],
        });
        let mut current = snapshot("b");
        current.module_graph = Some(ModuleGraph {
            modules: vec![
                module("src/same.js", 10, 10),
                module("src/grown.js", 20, 10),
            ],
        });

        let report = assemble(&baseline, &current).expect("diff succeeds");
        let keys: Vec<&str> = report.modules.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["src/grown.js", "src/same.js"]);
        assert_eq!(report.summary.modules.changed_count, 1);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut baseline = snapshot("a");
        baseline.chunk_graph = Some(ChunkGraph {
            chunks: vec![],
            assets: vec![Asset {
                path: "main.js".to_string(),
                size: 1000,
                initial: true,
                category: None,
            }],
            entrypoints: vec![],
        });
        let report = assemble(&baseline, &snapshot("b")).expect("diff succeeds");

        let json = serde_json::to_string(&report).expect("report serializes");
        assert!(json.contains("overview"));
        let back: DiffReport = serde_json::from_str(&json).expect("report deserializes");
        assert_eq!(back.overview.len(), report.overview.len());
    }

    #[test]
    fn test_warnings_surface_in_report() {
        let mut baseline = snapshot("a");
        baseline.module_graph = Some(ModuleGraph {
            modules: vec![module("src/a.js", 1, 1), module("src/a.js", 1, 1)],
        });

        let report = assemble(&baseline, &snapshot("b")).expect("diff succeeds");
        assert_eq!(report.warnings.len(), 1);
        // The surviving occurrence still diffs as deleted
        assert_eq!(report.summary.modules.deleted_count, 1);
        assert!(matches!(report.warnings[0], DiffWarning::DuplicateKey { .. }));
    }

    #[test]
    fn test_cache_reuses_report_for_same_hash_pair() {
        let cache = ReportCache::new();
        let baseline = snapshot("a");
        let current = snapshot("b");

        let first = cache.diff(&baseline, &current).expect("diff succeeds");
        let second = cache.diff(&baseline, &current).expect("diff succeeds");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_recomputes_after_invalidate() {
        let cache = ReportCache::new();
        let baseline = snapshot("a");
        let current = snapshot("b");

        let first = cache.diff(&baseline, &current).expect("diff succeeds");
        cache.invalidate("a");
        assert!(cache.is_empty());

        let second = cache.diff(&baseline, &current).expect("diff succeeds");
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_cache_distinguishes_direction() {
        let cache = ReportCache::new();
        let a = snapshot("a");
        let b = snapshot("b");

        cache.diff(&a, &b).expect("diff succeeds");
        cache.diff(&b, &a).expect("diff succeeds");
        assert_eq!(cache.len(), 2);
    }
}
