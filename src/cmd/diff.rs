//! Diff command implementation
//!
//! Handles the `bundle-diff diff` command which compares two build
//! snapshots and reports size changes across assets, packages, and modules

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::diff::classify::{classify, classify_versions, UpdateType};
use crate::diff::packages::{group_diff_item, PackageFilter};
use crate::diff::report::DiffReport;
use crate::diff::size::SizeState;
use crate::diff::{assemble, MatchedPair};
use crate::fmt::{format_bytes, format_delta, format_percent, CHART, CROSSMARK, DOWN, SPARKLES, UP, WARNING};
use crate::snapshot::model::{BuildSnapshot, Module};
use crate::snapshot::provider::{FileSnapshotProvider, SnapshotProvider};

/// Diff two build snapshots and print the report
///
/// # Examples
///
/// ```no_run
/// use bundle_diff::cmd::diff::cmd_diff;
///
/// // Compare the main-branch snapshot with the feature-branch snapshot
/// cmd_diff("baseline.json", "current.json", false, None, false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - Either snapshot file doesn't exist or isn't valid snapshot JSON
/// - Either snapshot is missing a required top-level graph
pub fn cmd_diff(
    baseline: &str,
    current: &str,
    json: bool,
    filter: Option<&str>,
    changed_only: bool,
) -> Result<()> {
    let baseline_path = Path::new(baseline);
    let current_path = Path::new(current);

    // Verify files exist first, baseline before current
    if !baseline_path.exists() {
        anyhow::bail!(
            "Baseline snapshot not found: {}. Run an instrumented build first to capture one.",
            baseline
        );
    }
    if !current_path.exists() {
        anyhow::bail!("Current snapshot not found: {}", current);
    }

    let provider = FileSnapshotProvider::new(".");
    let baseline_snapshot = provider.load(baseline)?;
    let current_snapshot = provider.load(current)?;

    let report = assemble(&baseline_snapshot, &current_snapshot)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    print_report(
        &report,
        &baseline_snapshot,
        &current_snapshot,
        filter,
        changed_only,
    );
    Ok(())
}

fn print_report(
    report: &DiffReport,
    baseline: &BuildSnapshot,
    current: &BuildSnapshot,
    filter: Option<&str>,
    changed_only: bool,
) {
    println!(
        "{} {} Snapshot Diff: {} → {}",
        CHART,
        style("bundle-diff").bold(),
        style(&baseline.hash).dim(),
        style(&current.hash).dim()
    );
    println!();

    print_overview(report);
    print_packages(report, filter);
    print_modules(report, changed_only);
    print_warnings(report);
}

fn state_marker(state: SizeState) -> String {
    match state {
        SizeState::Up => format!("{}", UP),
        SizeState::Down => format!("{}", DOWN),
        SizeState::None => " ".to_string(),
    }
}

fn print_overview(report: &DiffReport) {
    println!("{}", style("Overview by category").bold().underlined());
    if report.overview.is_empty() {
        println!("  (no assets on either side)");
        println!();
        return;
    }

    for (category, diff) in &report.overview {
        let total = &diff.total;
        println!(
            "  {:<8} {:>10} → {:>10}  {:>10}  {} {}",
            category.label(),
            format_bytes(total.size.baseline),
            format_bytes(total.size.current),
            format_delta(total.size.baseline, total.size.current),
            state_marker(total.state),
            format_percent(total.percent),
        );
        if let Some(initial) = &diff.initial {
            if initial.count.baseline > 0 || initial.count.current > 0 {
                println!(
                    "  {:<8} {:>10} → {:>10}  {:>10}  {} {}",
                    "  initial",
                    format_bytes(initial.size.baseline),
                    format_bytes(initial.size.current),
                    format_delta(initial.size.baseline, initial.size.current),
                    state_marker(initial.state),
                    format_percent(initial.percent),
                );
            }
        }
    }
    println!();
}

fn print_packages(report: &DiffReport, filter: Option<&str>) {
    let summary = &report.summary.packages;
    println!(
        "{}  {} new: {}  {} deleted: {}  changed: {}",
        style("Packages").bold().underlined(),
        SPARKLES,
        summary.new_count,
        CROSSMARK,
        summary.deleted_count,
        summary.changed_count,
    );

    let package_filter = PackageFilter {
        name_contains: filter.map(str::to_string),
        update_types: Some(
            [UpdateType::New, UpdateType::Deleted, UpdateType::Changed]
                .into_iter()
                .collect(),
        ),
    };

    for pair in package_filter.apply(&report.packages) {
        let update = classify_versions(pair);
        let item = group_diff_item(pair);
        println!(
            "  {:<24} {:<10} {:>10} → {:>10}  {} {}",
            pair.key.as_str(),
            update_label(update),
            format_bytes(item.size.baseline),
            format_bytes(item.size.current),
            state_marker(item.state),
            format_percent(item.percent),
        );
    }
    println!();
}

fn print_modules(report: &DiffReport, changed_only: bool) {
    let summary = &report.summary.modules;
    println!(
        "{}  {} new: {}  {} deleted: {}  changed: {}",
        style("Modules").bold().underlined(),
        SPARKLES,
        summary.new_count,
        CROSSMARK,
        summary.deleted_count,
        summary.changed_count,
    );

    let visible: Vec<&MatchedPair<Module>> = report
        .modules
        .iter()
        .filter(|pair| !changed_only || classify(pair) != UpdateType::NotChanged)
        .collect();

    for pair in visible {
        let update = classify(pair);
        let baseline_size = pair.baseline.as_ref().map_or(0, |m| m.size.parsed_size);
        let current_size = pair.current.as_ref().map_or(0, |m| m.size.parsed_size);
        println!(
            "  {:<40} {:<10} {:>10} → {:>10}",
            pair.key.as_str(),
            update_label(update),
            format_bytes(baseline_size),
            format_bytes(current_size),
        );
    }
    println!();
}

fn print_warnings(report: &DiffReport) {
    if report.warnings.is_empty() {
        return;
    }
    println!(
        "{} {} warning(s) recorded while matching",
        WARNING,
        report.warnings.len()
    );
}

fn update_label(update: UpdateType) -> String {
    match update {
        UpdateType::New => style("new").green().to_string(),
        UpdateType::Deleted => style("deleted").red().to_string(),
        UpdateType::Changed => style("changed").yellow().to_string(),
        UpdateType::NotChanged => style("unchanged").dim().to_string(),
    }
}
