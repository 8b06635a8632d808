//! Library-level tests of report assembly
//!
//! Exercises the documented engine properties end to end: classification
//! rules, idempotence, symmetry, and category count conservation.

use bundle_diff::diff::classify::{classify, classify_versions, UpdateType};
use bundle_diff::diff::packages::group_diff_item;
use bundle_diff::diff::report::DiffReport;
use bundle_diff::diff::size::SizeState;
use bundle_diff::diff::{assemble, AssetCategory};
use std::collections::HashSet;

mod common;
use common::fixtures::SnapshotBuilder;

fn changed_module_keys(report: &DiffReport) -> HashSet<String> {
    report
        .modules
        .iter()
        .filter(|p| classify(p) == UpdateType::Changed)
        .map(|p| p.key.as_str().to_string())
        .collect()
}

fn module_keys_of(report: &DiffReport, update: UpdateType) -> HashSet<String> {
    report
        .modules
        .iter()
        .filter(|p| classify(p) == update)
        .map(|p| p.key.as_str().to_string())
        .collect()
}

#[test]
fn test_equal_sizes_on_both_sides_classify_not_changed() {
    let baseline = SnapshotBuilder::new("a")
        .module("src/index.js", 100, 80)
        .build();
    let current = SnapshotBuilder::new("b")
        .module("src/index.js", 100, 80)
        .build();

    let report = assemble(&baseline, &current).expect("diff succeeds");
    assert_eq!(report.modules.len(), 1);
    assert_eq!(classify(&report.modules[0]), UpdateType::NotChanged);
}

#[test]
fn test_one_sided_entities_classify_new_and_deleted() {
    let baseline = SnapshotBuilder::new("a")
        .module("src/gone.js", 10, 10)
        .build();
    let current = SnapshotBuilder::new("b")
        .module("src/fresh.js", 10, 10)
        .build();

    let report = assemble(&baseline, &current).expect("diff succeeds");
    assert_eq!(
        module_keys_of(&report, UpdateType::Deleted),
        HashSet::from(["src/gone.js".to_string()])
    );
    assert_eq!(
        module_keys_of(&report, UpdateType::New),
        HashSet::from(["src/fresh.js".to_string()])
    );
}

#[test]
fn test_self_diff_is_idempotent() {
    let snapshot = SnapshotBuilder::new("a")
        .module("src/index.js", 100, 80)
        .module("src/util.js", 50, 40)
        .asset("main.js", 1000, true)
        .package("lodash", "4.17.21", 500)
        .build();

    let report = assemble(&snapshot, &snapshot).expect("self diff succeeds");

    assert!(report
        .modules
        .iter()
        .all(|p| classify(p) == UpdateType::NotChanged));
    assert!(report
        .packages
        .iter()
        .all(|p| classify_versions(p) == UpdateType::NotChanged));
    assert_eq!(report.summary.modules.new_count, 0);
    assert_eq!(report.summary.modules.deleted_count, 0);
    assert_eq!(report.summary.packages.new_count, 0);
    assert_eq!(report.summary.packages.deleted_count, 0);

    for category in report.overview.values() {
        assert_eq!(category.total.state, SizeState::None);
        assert_eq!(category.total.percent, 0.0);
    }
}

#[test]
fn test_diff_is_symmetric_under_swapped_inputs() {
    let a = SnapshotBuilder::new("a")
        .module("src/same.js", 10, 10)
        .module("src/grown.js", 10, 10)
        .module("src/only-in-a.js", 5, 5)
        .build();
    let b = SnapshotBuilder::new("b")
        .module("src/same.js", 10, 10)
        .module("src/grown.js", 20, 10)
        .module("src/only-in-b.js", 5, 5)
        .build();

    let forward = assemble(&a, &b).expect("diff succeeds");
    let backward = assemble(&b, &a).expect("diff succeeds");

    // Changed set is identical in both directions
    assert_eq!(changed_module_keys(&forward), changed_module_keys(&backward));

    // New and Deleted swap
    assert_eq!(
        module_keys_of(&forward, UpdateType::New),
        module_keys_of(&backward, UpdateType::Deleted)
    );
    assert_eq!(
        module_keys_of(&forward, UpdateType::Deleted),
        module_keys_of(&backward, UpdateType::New)
    );
}

#[test]
fn test_category_counts_sum_to_snapshot_asset_counts() {
    let baseline = SnapshotBuilder::new("a")
        .asset("main.js", 100, true)
        .asset("styles.css", 50, true)
        .asset("logo.png", 30, false)
        .asset("index.html", 10, false)
        .build();
    let current = SnapshotBuilder::new("b")
        .asset("main.js", 100, true)
        .asset("report.pdf", 20, false)
        .build();

    let report = assemble(&baseline, &current).expect("diff succeeds");

    let baseline_counted: usize = report
        .overview
        .values()
        .map(|c| c.total.count.baseline)
        .sum();
    let current_counted: usize = report
        .overview
        .values()
        .map(|c| c.total.count.current)
        .sum();

    assert_eq!(baseline_counted, baseline.assets().len());
    assert_eq!(current_counted, current.assets().len());
}

#[test]
fn test_source_size_change_with_equal_parsed_size_is_changed() {
    // Scenario: a.js source 100 -> 120 while parsed stays 80
    let baseline = SnapshotBuilder::new("a").module("a.js", 100, 80).build();
    let current = SnapshotBuilder::new("b").module("a.js", 120, 80).build();

    let report = assemble(&baseline, &current).expect("diff succeeds");
    assert_eq!(classify(&report.modules[0]), UpdateType::Changed);
    assert_eq!(report.summary.modules.changed_count, 1);
}

#[test]
fn test_grown_initial_js_asset_reports_20_percent_up() {
    let baseline = SnapshotBuilder::new("a").asset("main.js", 1000, true).build();
    let current = SnapshotBuilder::new("b").asset("main.js", 1200, true).build();

    let report = assemble(&baseline, &current).expect("diff succeeds");
    let js = report
        .overview
        .get(&AssetCategory::Js)
        .expect("js category present");

    assert_eq!(js.total.percent, 20.0);
    assert_eq!(js.total.state, SizeState::Up);
}

#[test]
fn test_added_package_version_changes_group_and_sums_current_side() {
    let baseline = SnapshotBuilder::new("a")
        .package("lodash", "4.17.20", 500)
        .build();
    let current = SnapshotBuilder::new("b")
        .package("lodash", "4.17.20", 500)
        .package("lodash", "4.17.21", 520)
        .build();

    let report = assemble(&baseline, &current).expect("diff succeeds");
    assert_eq!(report.packages.len(), 1);
    assert_eq!(classify_versions(&report.packages[0]), UpdateType::Changed);

    let item = group_diff_item(&report.packages[0]);
    assert_eq!(item.size.baseline, 500);
    assert_eq!(item.size.current, 1020);
}

#[test]
fn test_deleted_asset_contributes_full_size_to_baseline_only() {
    let baseline = SnapshotBuilder::new("a").asset("old.css", 400, false).build();
    let current = SnapshotBuilder::new("b").build();

    let report = assemble(&baseline, &current).expect("diff succeeds");
    let css = report
        .overview
        .get(&AssetCategory::Css)
        .expect("css category present");

    assert_eq!(css.total.size.baseline, 400);
    assert_eq!(css.total.size.current, 0);
    assert_eq!(css.total.count.baseline, 1);
    assert_eq!(css.total.count.current, 0);
}

#[test]
fn test_report_is_deterministic_across_runs() {
    let baseline = SnapshotBuilder::new("a")
        .module("src/one.js", 1, 1)
        .module("src/two.js", 2, 2)
        .module("src/three.js", 3, 3)
        .asset("main.js", 100, true)
        .package("react", "18.2.0", 300)
        .package("lodash", "4.17.21", 500)
        .build();
    let current = SnapshotBuilder::new("b")
        .module("src/two.js", 2, 2)
        .module("src/three.js", 4, 3)
        .module("src/four.js", 4, 4)
        .asset("main.js", 120, true)
        .package("lodash", "4.17.21", 500)
        .build();

    let first =
        serde_json::to_string(&assemble(&baseline, &current).expect("diff succeeds"))
            .expect("report serializes");
    let second =
        serde_json::to_string(&assemble(&baseline, &current).expect("diff succeeds"))
            .expect("report serializes");
    assert_eq!(first, second);
}
