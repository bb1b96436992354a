#![allow(dead_code)]

use hexbeam::scenario::{self, Scenario};
use hexbeam::Hex;
use std::path::{Path, PathBuf};

/// Scenario files with the given extension, sorted by name.
/// A missing directory yields no files.
pub fn test_files(dir: &str, extension: &str) -> Vec<PathBuf> {
    let dir = Path::new(dir);
    if !dir.is_dir() {
        return Vec::new();
    }
    scenario::scenario_files(dir, extension).expect("scenario directory is readable")
}

/// Run a scenario in all 12 variants (6 rotations, each plain and mirrored)
/// Returns (all_passed, failed_variant_name_if_any, missing_count, extra_count)
pub fn run_test(test_data: &Scenario) -> (bool, Option<String>, usize, usize) {
    match test_data.check_variants() {
        None => (true, None, 0, 0),
        Some((variant, report)) => (false, Some(variant), report.missing.len(), report.extra.len()),
    }
}

/// Every cell within `radius` of `centre`
pub fn disc(centre: Hex, radius: i32) -> Vec<Hex> {
    centre.spiral(radius)
}
