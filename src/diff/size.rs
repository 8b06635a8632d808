//! Percent change and direction between two sizes
//!
//! Pure arithmetic over fully-materialized numbers; negative or otherwise
//! malformed sizes are a condition the snapshot producer prevents upstream
//! and are not re-validated here (sizes are unsigned throughout).

use serde::{Deserialize, Serialize};

/// Direction of a size change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeState {
    /// Current is larger than baseline
    Up,
    /// Current is smaller than baseline
    Down,
    /// Sizes are equal
    None,
}

/// Percent change and direction between a baseline and a current size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeDiff {
    /// Absolute percent change relative to baseline, rounded to 2 decimals
    pub percent: f64,
    /// Direction of the change
    pub state: SizeState,
}

/// A value observed on both snapshot sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideValues<T> {
    /// Value in the baseline snapshot
    pub baseline: T,
    /// Value in the current snapshot
    pub current: T,
}

/// Sizes, counts, and the computed change for one diffed bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffItem {
    /// Summed size per side in bytes
    pub size: SideValues<u64>,
    /// Absolute percent change of the summed size
    pub percent: f64,
    /// Direction of the size change
    pub state: SizeState,
    /// Entity count per side
    pub count: SideValues<usize>,
}

impl DiffItem {
    /// Build a diff item from per-side sums and counts
    pub fn between(sizes: SideValues<u64>, counts: SideValues<usize>) -> Self {
        let SizeDiff { percent, state } = diff_size(sizes.baseline, sizes.current);
        Self {
            size: sizes,
            percent,
            state,
            count: counts,
        }
    }
}

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute percent change and direction from `baseline` to `current`.
///
/// When the baseline is zero the relative change is undefined; the
/// documented policy is `0` for zero→zero and `100` for zero→anything.
///
/// # Examples
///
/// ```
/// use bundle_diff::diff::size::{diff_size, SizeState};
///
/// let diff = diff_size(1000, 1200);
/// assert_eq!(diff.percent, 20.0);
/// assert_eq!(diff.state, SizeState::Up);
///
/// let diff = diff_size(0, 500);
/// assert_eq!(diff.percent, 100.0);
/// ```
pub fn diff_size(baseline: u64, current: u64) -> SizeDiff {
    let state = if current > baseline {
        SizeState::Up
    } else if current < baseline {
        SizeState::Down
    } else {
        SizeState::None
    };

    let percent = if baseline == 0 {
        if current == 0 {
            0.0
        } else {
            100.0
        }
    } else {
        let delta = current.abs_diff(baseline) as f64;
        round2(delta / baseline as f64 * 100.0)
    };

    SizeDiff { percent, state }
}
