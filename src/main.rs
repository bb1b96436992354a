use hexbeam::config::Config;
use hexbeam::scenario::{self, Scenario, ScenarioError};
use hexbeam::{Hex, HexGrid};
use std::error::Error;
use std::path::Path;

/// Built-in map shown when no layout is given: scattered pillars around an
/// open centre
fn demo_map(radius: i32) -> HexGrid {
    let mut grid = HexGrid::new(radius);
    for hex in grid.cells() {
        if hex.length() >= 2 && (hex.q - 2 * hex.r).rem_euclid(5) == 0 {
            grid.set_blocked(hex, true);
        }
    }
    grid
}

/// Run one scenario in every variant and print the outcome.
/// Returns whether all variants passed.
fn report(name: &str, loaded: Result<Scenario, ScenarioError>) -> bool {
    match loaded {
        Ok(scenario) => match scenario.check_variants() {
            None => {
                println!("✓ {} (all 12 variants pass)", name);
                true
            }
            Some((variant, report)) => {
                println!(
                    "✗ {} [{}] (missing: {}, extra: {})",
                    name,
                    variant,
                    report.missing.len(),
                    report.extra.len()
                );
                false
            }
        },
        Err(e) => {
            println!("✗ {} (load error: {})", name, e);
            false
        }
    }
}

/// Run every scenario with the given extension in `dir`.
/// Returns the names of the failures.
fn run_tests_in(dir: &Path, extension: &str) -> Result<Vec<String>, ScenarioError> {
    println!("Running scenarios from {} (*.{})\n", dir.display(), extension);

    let mut failures = Vec::new();
    let mut passed = 0;
    for path in scenario_files_or_empty(dir, extension)? {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        let loaded = if extension == "json" {
            Scenario::load(&path)
        } else {
            Scenario::load_layout(&path)
        };
        if report(&name, loaded) {
            passed += 1;
        } else {
            failures.push(name);
        }
    }

    println!("\n========================================");
    println!("Results: {} passed, {} failed", passed, failures.len());
    println!("========================================\n");
    Ok(failures)
}

/// A missing directory just means there is nothing to run
fn scenario_files_or_empty(dir: &Path, extension: &str) -> Result<Vec<std::path::PathBuf>, ScenarioError> {
    if !dir.is_dir() {
        log::warn!("no scenario directory at {}", dir.display());
        return Ok(Vec::new());
    }
    scenario::scenario_files(dir, extension)
}

fn run_all_tests(config: &Config) -> Result<(), Box<dyn Error>> {
    let dir = Path::new(&config.test_data.dir);
    let mut failures = run_tests_in(dir, "json")?;
    failures.extend(run_tests_in(&dir.join("standard"), "txt")?);

    if failures.is_empty() {
        return Ok(());
    }
    println!("Failed scenarios:");
    for name in &failures {
        println!("  - {}", name);
    }
    Err(format!("{} scenarios failed", failures.len()).into())
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::load();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();

    // Check command line arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--test" {
        return run_all_tests(&config);
    }

    let layout = args.get(1).cloned().unwrap_or_else(|| config.map.path.clone());
    let (grid, observer) = if layout.is_empty() {
        log::info!("rendering the demo map, radius {}", config.map.radius);
        (demo_map(config.map.radius), Hex::ORIGIN)
    } else {
        log::info!("rendering {}", layout);
        let scenario = Scenario::load_layout(Path::new(&layout))?;
        (scenario.grid(), scenario.observer)
    };

    let visible = grid.field_of_view_within(observer, config.fov.radius);
    print!("{}", scenario::render(&grid, observer, &visible));
    println!(
        "\n{} of {} cells visible from ({}, {})",
        visible.len(),
        grid.cells().len(),
        observer.q,
        observer.r
    );
    Ok(())
}
