//! Shared formatting utilities for size display and console output

use console::Emoji;

/// Chart emoji for report headers
pub const CHART: Emoji = Emoji("📊", "~");

/// Up arrow for size increases
pub const UP: Emoji = Emoji("🔺", "+");

/// Down arrow for size decreases
pub const DOWN: Emoji = Emoji("🔻", "-");

/// Sparkles emoji for new entities
pub const SPARKLES: Emoji = Emoji("✨", "*");

/// Crossmark emoji for deleted entities
pub const CROSSMARK: Emoji = Emoji("❌", "x");

/// Warning emoji for recorded diff warnings
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Format bytes as human-readable size string
///
/// # Examples
///
/// ```
/// use bundle_diff::fmt::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1_048_576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format percentage with 2 decimal places
///
/// # Examples
///
/// ```
/// use bundle_diff::fmt::format_percent;
///
/// assert_eq!(format_percent(42.567), "42.57%");
/// ```
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Format a signed byte delta, e.g. `+1.50 KB` or `-512 B`
///
/// # Examples
///
/// ```
/// use bundle_diff::fmt::format_delta;
///
/// assert_eq!(format_delta(1000, 1200), "+200 B");
/// assert_eq!(format_delta(1200, 1000), "-200 B");
/// assert_eq!(format_delta(1000, 1000), "±0 B");
/// ```
pub fn format_delta(baseline: u64, current: u64) -> String {
    if current > baseline {
        format!("+{}", format_bytes(current - baseline))
    } else if current < baseline {
        format!("-{}", format_bytes(baseline - current))
    } else {
        "±0 B".to_string()
    }
}
