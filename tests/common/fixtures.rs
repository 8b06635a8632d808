//! Test fixture helpers for building snapshots
//!
//! Provides builders for realistic build snapshots without repeating the
//! full data-model literals in every test.

#![allow(dead_code)]

use bundle_diff::snapshot::model::{
    Asset, BuildSnapshot, Chunk, ChunkGraph, Module, ModuleGraph, ModuleKind, ModuleSize, Package,
    PackageGraph, PackageSize,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Incrementally builds a [`BuildSnapshot`] for tests
pub struct SnapshotBuilder {
    snapshot: BuildSnapshot,
}

impl SnapshotBuilder {
    /// Start an empty snapshot with the given content hash
    pub fn new(hash: &str) -> Self {
        Self {
            snapshot: BuildSnapshot {
                hash: hash.to_string(),
                root: "/app".to_string(),
                module_graph: Some(ModuleGraph::default()),
                chunk_graph: Some(ChunkGraph::default()),
                package_graph: Some(PackageGraph::default()),
                module_code_map: HashMap::new(),
            },
        }
    }

    /// Add a module with the given path and sizes
    pub fn module(mut self, path: &str, source_size: u64, parsed_size: u64) -> Self {
        let id = format!(
            "{}",
            self.snapshot
                .module_graph
                .as_ref()
                .map_or(0, |g| g.modules.len())
                + 1
        );
        if let Some(graph) = self.snapshot.module_graph.as_mut() {
            graph.modules.push(Module {
                id,
                path: path.to_string(),
                webpack_id: None,
                size: ModuleSize {
                    source_size,
                    parsed_size,
                },
                kind: ModuleKind::Normal,
                chunks: vec![],
            });
        }
        self
    }

    /// Add a module assigned to the given chunks
    pub fn module_in_chunks(mut self, path: &str, parsed_size: u64, chunks: &[&str]) -> Self {
        self = self.module(path, parsed_size, parsed_size);
        if let Some(graph) = self.snapshot.module_graph.as_mut() {
            if let Some(module) = graph.modules.last_mut() {
                module.chunks = chunks.iter().map(|c| c.to_string()).collect();
            }
        }
        self
    }

    /// Add a chunk with its emitted asset paths
    pub fn chunk(mut self, id: &str, initial: bool, assets: &[&str]) -> Self {
        if let Some(graph) = self.snapshot.chunk_graph.as_mut() {
            graph.chunks.push(Chunk {
                id: id.to_string(),
                name: Some(id.to_string()),
                initial,
                assets: assets.iter().map(|a| a.to_string()).collect(),
            });
        }
        self
    }

    /// Add an output asset
    pub fn asset(mut self, path: &str, size: u64, initial: bool) -> Self {
        if let Some(graph) = self.snapshot.chunk_graph.as_mut() {
            graph.assets.push(Asset {
                path: path.to_string(),
                size,
                initial,
                category: None,
            });
        }
        self
    }

    /// Add an installed package version
    pub fn package(mut self, name: &str, version: &str, parsed_size: u64) -> Self {
        if let Some(graph) = self.snapshot.package_graph.as_mut() {
            graph.packages.push(Package {
                name: name.to_string(),
                version: version.to_string(),
                root: format!("node_modules/{}", name),
                size: PackageSize {
                    source_size: parsed_size * 2,
                    parsed_size,
                },
            });
        }
        self
    }

    /// Finish building
    pub fn build(self) -> BuildSnapshot {
        self.snapshot
    }
}

/// Write a snapshot to `<dir>/<name>.json` and return the path
pub fn write_snapshot(dir: &Path, name: &str, snapshot: &BuildSnapshot) -> PathBuf {
    let path = dir.join(format!("{}.json", name));
    let json = serde_json::to_string_pretty(snapshot).expect("snapshot serializes");
    std::fs::write(&path, json).expect("snapshot file writes");
    path
}
