//! The bundle diff engine
//!
//! Pure transformation from two [`crate::snapshot::model::BuildSnapshot`]s
//! to one [`report::DiffReport`]:
//! - Cross-build identity and hash stripping
//! - Entity matching and deduplication
//! - Size/percent calculation and update classification
//! - Category, package, and module aggregation
//! - Report assembly with hash-pair memoization

pub mod category;
pub mod classify;
pub mod key;
pub mod matcher;
pub mod modules;
pub mod packages;
pub mod report;
pub mod size;

// Public exports for common engine types
pub use category::{aggregate_categories, AssetCategory, CategoryDiff};
pub use classify::{classify, classify_versions, UpdateType};
pub use key::{asset_key, module_key, package_key, strip_content_hashes, NormalizedKey};
pub use matcher::{match_entities, sort_changed_first, DiffWarning, MatchedPair, Side};
pub use modules::{asset_membership, code_keys, diff_modules, ModuleCodeKeys, ModuleSummary};
pub use packages::{diff_packages, group_diff_item, PackageFilter, PackageSummary};
pub use report::{assemble, DiffReport, DiffSummary, ReportCache};
pub use size::{diff_size, DiffItem, SideValues, SizeDiff, SizeState};
