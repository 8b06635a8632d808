//! Asset category bucketing and per-bucket diffs

use crate::diff::size::{DiffItem, SideValues};
use crate::snapshot::model::Asset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bucket an output asset falls into, by file type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    /// JavaScript bundles
    Js,
    /// Stylesheets
    Css,
    /// Images
    Imgs,
    /// Web fonts
    Fonts,
    /// Audio and video
    Media,
    /// HTML documents
    Html,
    /// Everything else (source maps, manifests, ...)
    Others,
}

impl AssetCategory {
    /// Classify an asset path by its file extension
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_diff::diff::category::AssetCategory;
    ///
    /// assert_eq!(AssetCategory::from_path("static/js/main.js"), AssetCategory::Js);
    /// assert_eq!(AssetCategory::from_path("logo.svg"), AssetCategory::Imgs);
    /// assert_eq!(AssetCategory::from_path("main.js.map"), AssetCategory::Others);
    /// ```
    pub fn from_path(path: &str) -> Self {
        let extension = path.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
        match extension.as_str() {
            "js" | "mjs" | "cjs" => Self::Js,
            "css" => Self::Css,
            "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" | "ico" | "avif" | "bmp" => Self::Imgs,
            "woff" | "woff2" | "ttf" | "otf" | "eot" => Self::Fonts,
            "mp3" | "mp4" | "webm" | "ogg" | "wav" | "flac" | "aac" | "mov" | "m4a" => Self::Media,
            "html" | "htm" => Self::Html,
            _ => Self::Others,
        }
    }

    /// Whether the category has a notion of an initial (page-start) view.
    /// HTML documents are the page itself, so they have none.
    pub fn supports_initial(self) -> bool {
        !matches!(self, Self::Html)
    }

    /// Lowercase display label
    pub fn label(self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Css => "css",
            Self::Imgs => "imgs",
            Self::Fonts => "fonts",
            Self::Media => "media",
            Self::Html => "html",
            Self::Others => "others",
        }
    }
}

impl Asset {
    /// Declared category, falling back to extension-based classification
    pub fn effective_category(&self) -> AssetCategory {
        self.category
            .unwrap_or_else(|| AssetCategory::from_path(&self.path))
    }
}

/// Diffed views of one asset category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDiff {
    /// All assets of the category
    pub total: DiffItem,
    /// Only assets belonging to initial chunks; absent for categories
    /// without an initial view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<DiffItem>,
}

/// Bucket both snapshots' assets by category and diff each bucket.
///
/// A side with no assets of a category contributes zero size and zero
/// count. Categories with no assets on either side are omitted, so two
/// empty snapshots produce an empty overview.
pub fn aggregate_categories(
    baseline: &[Asset],
    current: &[Asset],
) -> BTreeMap<AssetCategory, CategoryDiff> {
    let mut buckets: BTreeMap<AssetCategory, BucketSums> = BTreeMap::new();

    for asset in baseline {
        buckets
            .entry(asset.effective_category())
            .or_default()
            .add_baseline(asset);
    }
    for asset in current {
        buckets
            .entry(asset.effective_category())
            .or_default()
            .add_current(asset);
    }

    buckets
        .into_iter()
        .map(|(category, sums)| {
            let total = DiffItem::between(sums.total_size, sums.total_count);
            let initial = category
                .supports_initial()
                .then(|| DiffItem::between(sums.initial_size, sums.initial_count));
            (category, CategoryDiff { total, initial })
        })
        .collect()
}

#[derive(Default)]
struct BucketSums {
    total_size: SideValues<u64>,
    total_count: SideValues<usize>,
    initial_size: SideValues<u64>,
    initial_count: SideValues<usize>,
}

impl BucketSums {
    fn add_baseline(&mut self, asset: &Asset) {
        self.total_size.baseline += asset.size;
        self.total_count.baseline += 1;
        if asset.initial {
            self.initial_size.baseline += asset.size;
            self.initial_count.baseline += 1;
        }
    }

    fn add_current(&mut self, asset: &Asset) {
        self.total_size.current += asset.size;
        self.total_count.current += 1;
        if asset.initial {
            self.initial_size.current += asset.size;
            self.initial_count.current += 1;
        }
    }
}
