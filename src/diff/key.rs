//! Cross-build entity identity
//!
//! Output filenames and module ids churn between builds because bundlers
//! embed content hashes in them (`main.a1b2c3d4.js` and `main.f00dfeed.js`
//! are the same logical asset). This module produces a [`NormalizedKey`] per
//! entity with those hash segments stripped, so the matcher can pair
//! entities across two snapshots.

use crate::error::DiffError;
use crate::snapshot::model::{Asset, Module, Package};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

static HASH_SEGMENT_RE: OnceLock<Regex> = OnceLock::new();

/// A delimited run of 8+ hex characters: the shape bundlers use for
/// content hashes in filenames and ids.
fn hash_segment_re() -> &'static Regex {
    HASH_SEGMENT_RE.get_or_init(|| {
        Regex::new(r"[./_-][a-fA-F0-9]{8,}([./_-]|$)").expect("hash segment regex is valid")
    })
}

/// Stable cross-build identity of an entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// View the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Remove content-hash segments from a path or id.
///
/// A hash segment is a delimited run of 8 or more hex characters. The
/// segment is removed together with its leading delimiter; stripping repeats
/// until no segment remains, so adjacent hash segments all disappear.
///
/// # Examples
///
/// ```
/// use bundle_diff::diff::key::strip_content_hashes;
///
/// assert_eq!(strip_content_hashes("main.a1b2c3d4.js"), "main.js");
/// assert_eq!(strip_content_hashes("chunk-deadbeef01"), "chunk");
/// assert_eq!(strip_content_hashes("src/index.js"), "src/index.js");
/// ```
pub fn strip_content_hashes(input: &str) -> String {
    let re = hash_segment_re();
    let mut value = input.to_string();
    loop {
        let stripped = re.replace_all(&value, "$1").into_owned();
        if stripped == value {
            return value;
        }
        value = stripped;
    }
}

/// Normalized key of a module.
///
/// Prefers the bundler-assigned `webpack_id` over the path, since it is
/// stable across rebuilds of one config. Concatenation modules carry a
/// synthetic path and normalize on it like any other module; their contained
/// sub-modules are not separately matched.
///
/// # Errors
///
/// Returns [`DiffError::InvalidEntity`] when the module has neither an id
/// nor a path; callers skip the module and record a warning.
pub fn module_key(module: &Module) -> Result<NormalizedKey, DiffError> {
    let identity = module
        .webpack_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .or_else(|| Some(module.path.as_str()).filter(|p| !p.is_empty()))
        .ok_or_else(|| DiffError::InvalidEntity {
            kind: "module",
            detail: "neither webpackId nor path present".to_string(),
        })?;
    Ok(NormalizedKey(strip_content_hashes(identity)))
}

/// Normalized key of an asset (its path with hash segments stripped).
///
/// # Errors
///
/// Returns [`DiffError::InvalidEntity`] when the asset path is empty.
pub fn asset_key(asset: &Asset) -> Result<NormalizedKey, DiffError> {
    if asset.path.is_empty() {
        return Err(DiffError::InvalidEntity {
            kind: "asset",
            detail: "empty path".to_string(),
        });
    }
    Ok(NormalizedKey(strip_content_hashes(&asset.path)))
}

/// Normalized key of a package (its name; versions are grouped, not keyed).
///
/// # Errors
///
/// Returns [`DiffError::InvalidEntity`] when the package name is empty.
pub fn package_key(package: &Package) -> Result<NormalizedKey, DiffError> {
    if package.name.is_empty() {
        return Err(DiffError::InvalidEntity {
            kind: "package",
            detail: "empty name".to_string(),
        });
    }
    Ok(NormalizedKey(package.name.clone()))
}
