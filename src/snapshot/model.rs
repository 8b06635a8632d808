//! Build snapshot data model
//!
//! A [`BuildSnapshot`] is the serialized output of one bundler build run
//! (webpack/rspack), capturing modules, chunks, assets, and packages with
//! their sizes. Snapshots are immutable once obtained; the diff engine only
//! reads them and always returns freshly constructed output.
//!
//! The three top-level graphs deserialize to `None` when a manifest omits
//! them entirely, which is distinct from a present-but-empty graph: the
//! former is a malformed snapshot the assembler rejects, the latter is a
//! legitimate empty build.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of a module inside one snapshot
pub type ModuleId = String;

/// Identifier of a chunk inside one snapshot
pub type ChunkId = String;

/// Serialized output of one bundler build run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSnapshot {
    /// Content hash identifying this build
    pub hash: String,
    /// Project root the build ran in
    pub root: String,
    /// Module graph of the build; absent in malformed manifests
    #[serde(default)]
    pub module_graph: Option<ModuleGraph>,
    /// Chunk/asset graph of the build; absent in malformed manifests
    #[serde(default)]
    pub chunk_graph: Option<ChunkGraph>,
    /// Installed npm package graph of the build; absent in malformed manifests
    #[serde(default)]
    pub package_graph: Option<PackageGraph>,
    /// Module id to code text lookup
    #[serde(default)]
    pub module_code_map: HashMap<ModuleId, ModuleCode>,
}

/// Modules tracked by the bundler
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleGraph {
    /// All modules, in build emission order
    pub modules: Vec<Module>,
}

/// Chunks, output assets, and entry points of a build
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkGraph {
    /// All chunks, in build emission order
    pub chunks: Vec<Chunk>,
    /// All output assets, in build emission order
    pub assets: Vec<Asset>,
    /// All entry points
    pub entrypoints: Vec<Entrypoint>,
}

/// Installed npm packages of a build
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageGraph {
    /// All installed packages; one entry per installed version
    pub packages: Vec<Package>,
}

/// The smallest compiled unit tracked by the bundler
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Snapshot-local module id
    pub id: ModuleId,
    /// Source path of the module (synthetic for concatenated modules)
    pub path: String,
    /// Bundler-assigned id, stable within one config across rebuilds
    #[serde(default)]
    pub webpack_id: Option<String>,
    /// Source and parsed sizes
    pub size: ModuleSize,
    /// Whether this is a normal or a concatenated module
    #[serde(default)]
    pub kind: ModuleKind,
    /// Ids of the chunks this module was emitted into
    #[serde(default)]
    pub chunks: Vec<ChunkId>,
}

/// Code size of a module before and after bundling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSize {
    /// Size of the source code in bytes
    pub source_size: u64,
    /// Size after bundling, minification, and tree-shaking in bytes
    pub parsed_size: u64,
}

/// Kind of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// One source file
    #[default]
    Normal,
    /// Several source files merged by scope hoisting
    Concatenation,
}

/// A bundler-level grouping of modules emitted together
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Snapshot-local chunk id
    pub id: ChunkId,
    /// Chunk name, when the bundler assigned one
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the chunk is loaded at page start
    #[serde(default)]
    pub initial: bool,
    /// Paths of the output assets this chunk was emitted into
    #[serde(default)]
    pub assets: Vec<String>,
}

/// A build entry point and the chunks it pulls in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entrypoint {
    /// Entry point name
    pub name: String,
    /// Ids of the chunks reachable at page start from this entry
    #[serde(default)]
    pub chunks: Vec<ChunkId>,
}

/// A physical output file produced by a build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    /// Output path of the asset
    pub path: String,
    /// Size in bytes
    pub size: u64,
    /// Whether the asset belongs to an initial chunk
    #[serde(default)]
    pub initial: bool,
    /// Asset category; classified from the file extension when absent
    #[serde(default)]
    pub category: Option<crate::diff::category::AssetCategory>,
}

/// An installed npm dependency; multiple versions may coexist in one build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    /// Package name
    pub name: String,
    /// Installed version
    pub version: String,
    /// Install root of this version
    pub root: String,
    /// Source and parsed sizes aggregated over the package's modules
    pub size: PackageSize,
}

/// Code size of a package before and after bundling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSize {
    /// Size of the source code in bytes
    pub source_size: u64,
    /// Size after bundling, minification, and tree-shaking in bytes
    pub parsed_size: u64,
}

/// Code text of one module, as captured by the build instrumentation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleCode {
    /// Original source text
    #[serde(default)]
    pub source: Option<String>,
    /// Text after loaders/transforms ran
    #[serde(default)]
    pub transformed: Option<String>,
    /// Text as parsed out of the final bundle
    #[serde(default)]
    pub parsed_source: Option<String>,
}

impl BuildSnapshot {
    /// Modules of the build; empty when the module graph is absent
    pub fn modules(&self) -> &[Module] {
        self.module_graph
            .as_ref()
            .map(|g| g.modules.as_slice())
            .unwrap_or(&[])
    }

    /// Output assets of the build; empty when the chunk graph is absent
    pub fn assets(&self) -> &[Asset] {
        self.chunk_graph
            .as_ref()
            .map(|g| g.assets.as_slice())
            .unwrap_or(&[])
    }

    /// Installed packages of the build; empty when the package graph is absent
    pub fn packages(&self) -> &[Package] {
        self.package_graph
            .as_ref()
            .map(|g| g.packages.as_slice())
            .unwrap_or(&[])
    }

    /// Look up a chunk by id
    pub fn chunk(&self, id: &str) -> Option<&Chunk> {
        self.chunk_graph
            .as_ref()?
            .chunks
            .iter()
            .find(|c| c.id == id)
    }

    /// Look up the captured code of a module by id
    pub fn module_code(&self, id: &str) -> Option<&ModuleCode> {
        self.module_code_map.get(id)
    }
}
