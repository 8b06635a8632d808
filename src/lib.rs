#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! bundle-diff library
//!
//! This library computes structural, quantitative diffs between two bundler
//! build snapshots (webpack/rspack): which assets, modules, and packages
//! appeared, disappeared, or changed, and by how much. It can be used
//! programmatically in addition to the CLI interface.
//!
//! # Basic Example
//!
//! Diffing two snapshots:
//!
//! ```
//! use bundle_diff::diff::assemble;
//! use bundle_diff::snapshot::model::{
//!     BuildSnapshot, ChunkGraph, ModuleGraph, PackageGraph,
//! };
//! use std::collections::HashMap;
//!
//! let empty = |hash: &str| BuildSnapshot {
//!     hash: hash.to_string(),
//!     root: "/app".to_string(),
//!     module_graph: Some(ModuleGraph::default()),
//!     chunk_graph: Some(ChunkGraph::default()),
//!     package_graph: Some(PackageGraph::default()),
//!     module_code_map: HashMap::new(),
//! };
//!
//! let report = assemble(&empty("baseline"), &empty("current")).unwrap();
//! assert!(report.modules.is_empty());
//! assert!(report.overview.is_empty());
//! ```
//!
//! # Advanced Example: Size Diffing
//!
//! The percent/direction calculator is usable on its own:
//!
//! ```
//! use bundle_diff::diff::size::{diff_size, SizeState};
//!
//! let diff = diff_size(1000, 1200);
//! assert_eq!(diff.percent, 20.0);
//! assert_eq!(diff.state, SizeState::Up);
//! ```
//!
//! # Advanced Example: Memoized Reports
//!
//! Reports are deterministic for a given `(baseline.hash, current.hash)`
//! pair, so hosts that re-render views reuse them through a cache:
//!
//! ```
//! use bundle_diff::diff::ReportCache;
//! use bundle_diff::snapshot::model::{
//!     BuildSnapshot, ChunkGraph, ModuleGraph, PackageGraph,
//! };
//! use std::collections::HashMap;
//!
//! let empty = |hash: &str| BuildSnapshot {
//!     hash: hash.to_string(),
//!     root: "/app".to_string(),
//!     module_graph: Some(ModuleGraph::default()),
//!     chunk_graph: Some(ChunkGraph::default()),
//!     package_graph: Some(PackageGraph::default()),
//!     module_code_map: HashMap::new(),
//! };
//!
//! let cache = ReportCache::new();
//! let first = cache.diff(&empty("a"), &empty("b")).unwrap();
//! let second = cache.diff(&empty("a"), &empty("b")).unwrap();
//! assert!(std::sync::Arc::ptr_eq(&first, &second));
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// The diff engine: matching, classification, aggregation, assembly
pub mod diff;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Build snapshot model and acquisition
pub mod snapshot;
