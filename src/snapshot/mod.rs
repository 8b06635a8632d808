//! Build snapshot model and acquisition
//!
//! Defines the immutable [`model::BuildSnapshot`] data model and the
//! [`provider::SnapshotProvider`] seam through which snapshots reach the
//! diff engine.

pub mod model;
pub mod provider;

pub use model::{
    Asset, BuildSnapshot, Chunk, ChunkGraph, ChunkId, Entrypoint, Module, ModuleCode, ModuleGraph,
    ModuleId, ModuleKind, ModuleSize, Package, PackageGraph, PackageSize,
};
pub use provider::{FileSnapshotProvider, SnapshotCache, SnapshotProvider};
