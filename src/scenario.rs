use crate::grid::HexGrid;
use crate::hex::Hex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Layout glyphs
pub const OBSERVER: char = 's';
pub const WALL_HIDDEN: char = '■';
pub const WALL_VISIBLE: char = '▣';
pub const VISIBLE: char = 'o';
pub const HIDDEN: char = '□';
pub const NO_CELL: char = ' ';

/// Errors from loading, saving or parsing scenarios
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// The file could not be read or written.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("layout has no grid rows")]
    EmptyLayout,

    /// A map of radius R has 4R + 1 plane rows.
    #[error("layout has {0} rows, which fits no hexagonal map")]
    BadRowCount(usize),

    #[error("unknown glyph '{glyph}' at line {line}, column {column}")]
    UnknownGlyph { glyph: char, line: usize, column: usize },

    /// A cell glyph where the map has no cell.
    #[error("glyph '{glyph}' at line {line}, column {column} is off the map")]
    OffMap { glyph: char, line: usize, column: usize },

    /// A map cell left blank.
    #[error("missing cell at line {line}, column {column}")]
    MissingCell { line: usize, column: usize },

    #[error("no observer '{}' in layout", OBSERVER)]
    MissingObserver,

    #[error("more than one observer in layout")]
    DuplicateObserver,

    #[error("observer {0:?} is off the map")]
    ObserverOffMap(Hex),
}

/// One reproducible visibility case: a map, an observer and what it should see
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub radius: i32,
    pub observer: Hex,
    pub blocked: Vec<Hex>,
    pub expected_visible: Vec<Hex>,
}

/// Difference between expected and computed visibility
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Expected but not computed
    pub missing: Vec<Hex>,
    /// Computed but not expected
    pub extra: Vec<Hex>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

impl Scenario {
    /// Record what `observer` currently sees on `grid`
    pub fn capture(name: &str, grid: &HexGrid, observer: Hex) -> Self {
        let visible = grid.field_of_view(observer);
        Scenario {
            name: name.to_string(),
            radius: grid.radius,
            observer,
            blocked: grid.blocked(),
            expected_visible: sorted(visible),
        }
    }

    /// Load a scenario from JSON file
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let contents = read(path)?;
        let scenario: Scenario = serde_json::from_str(&contents)?;
        if scenario.observer.length() > scenario.radius {
            return Err(ScenarioError::ObserverOffMap(scenario.observer));
        }
        Ok(scenario)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> Result<(), ScenarioError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a text layout, naming the scenario after the file
    pub fn load_layout(path: &Path) -> Result<Self, ScenarioError> {
        let contents = read(path)?;
        let name = path
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or("layout");
        parse_layout(name, &contents)
    }

    pub fn grid(&self) -> HexGrid {
        HexGrid::with_blocked(self.radius, &self.blocked)
    }

    /// The scenario as a text layout, marking the expected visibility
    pub fn to_layout(&self) -> String {
        let visible: HashSet<Hex> = self.expected_visible.iter().copied().collect();
        render(&self.grid(), self.observer, &visible)
    }

    /// Same scenario turned `turns` × 60° clockwise about the map centre
    pub fn rotated(&self, turns: u8) -> Self {
        self.transformed(&format!("{}_rot{}", self.name, turns % 6), |h| h.rotate_cw(turns))
    }

    /// Same scenario reflected across the north-south axis
    pub fn mirrored(&self) -> Self {
        self.transformed(&format!("{}_mirror", self.name), Hex::mirror)
    }

    fn transformed(&self, name: &str, map: impl Fn(Hex) -> Hex) -> Self {
        Scenario {
            name: name.to_string(),
            radius: self.radius,
            observer: map(self.observer),
            blocked: sorted(self.blocked.iter().map(|&h| map(h))),
            expected_visible: sorted(self.expected_visible.iter().map(|&h| map(h))),
        }
    }

    /// All twelve symmetric variants: six rotations, each plain and mirrored
    pub fn variants(&self) -> Vec<Scenario> {
        let mut variants = Vec::with_capacity(12);
        for turns in 0..6 {
            let rotated = self.rotated(turns);
            variants.push(rotated.mirrored());
            variants.push(rotated);
        }
        variants.sort_by(|a, b| a.name.cmp(&b.name));
        variants
    }

    /// Compute the field of view and compare it with the expectation
    pub fn check(&self) -> CheckReport {
        let actual = self.grid().field_of_view(self.observer);
        let expected: HashSet<Hex> = self.expected_visible.iter().copied().collect();

        let report = CheckReport {
            missing: sorted(expected.difference(&actual).copied()),
            extra: sorted(actual.difference(&expected).copied()),
        };
        if !report.passed() {
            log::debug!(
                "{}: missing {:?}, extra {:?}",
                self.name, report.missing, report.extra
            );
        }
        report
    }

    /// Check every variant, returning the first that fails
    pub fn check_variants(&self) -> Option<(String, CheckReport)> {
        self.variants()
            .into_iter()
            .map(|variant| {
                let report = variant.check();
                (variant.name, report)
            })
            .find(|(_, report)| !report.passed())
    }
}

fn sorted(cells: impl IntoIterator<Item = Hex>) -> Vec<Hex> {
    cells.into_iter().collect::<BTreeSet<Hex>>().into_iter().collect()
}

fn read(path: &Path) -> Result<String, ScenarioError> {
    fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Cell shown at layout row `y`, column `q`, if the map has one there
fn layout_cell(radius: i32, q: i32, y: i32) -> Option<Hex> {
    if (y - q).rem_euclid(2) != 0 {
        return None;
    }
    let hex = Hex::new(q, (y - q) / 2);
    (hex.length() <= radius).then_some(hex)
}

/// Draw the map one plane row per line, north at the top.
/// Row `y` runs from `2R` down to `-2R`, column `q` from `-R` to `R`.
pub fn render(grid: &HexGrid, observer: Hex, visible: &HashSet<Hex>) -> String {
    let radius = grid.radius;
    let mut result = String::new();

    for y in (-2 * radius..=2 * radius).rev() {
        let mut line = String::new();
        for q in -radius..=radius {
            let symbol = match layout_cell(radius, q, y) {
                None => NO_CELL,
                Some(hex) if hex == observer => OBSERVER,
                Some(hex) => match (grid.is_blocked(hex), visible.contains(&hex)) {
                    (true, true) => WALL_VISIBLE,
                    (true, false) => WALL_HIDDEN,
                    (false, true) => VISIBLE,
                    (false, false) => HIDDEN,
                },
            };
            line.push(symbol);
        }
        result.push_str(line.trim_end());
        result.push('\n');
    }

    result
}

fn is_glyph(c: char) -> bool {
    matches!(c, OBSERVER | WALL_HIDDEN | WALL_VISIBLE | VISIBLE | HIDDEN | NO_CELL)
}

/// Parse a text layout as drawn by `render`.
///
/// Leading blank lines are skipped and the grid ends at the first blank line
/// or the first line holding anything but layout glyphs, so notes can follow it.
pub fn parse_layout(name: &str, text: &str) -> Result<Scenario, ScenarioError> {
    let rows: Vec<&str> = text
        .lines()
        .skip_while(|line| line.trim().is_empty())
        .take_while(|line| !line.trim().is_empty() && line.chars().all(is_glyph))
        .collect();

    if rows.is_empty() {
        return Err(ScenarioError::EmptyLayout);
    }
    if (rows.len() - 1) % 4 != 0 {
        return Err(ScenarioError::BadRowCount(rows.len()));
    }
    let radius = ((rows.len() - 1) / 4) as i32;

    let mut observer = None;
    let mut blocked = Vec::new();
    let mut expected_visible = Vec::new();

    for (line, row) in rows.iter().enumerate() {
        let y = 2 * radius - line as i32;
        let glyphs: Vec<char> = row.chars().collect();
        let width = glyphs.len().max(2 * radius as usize + 1);

        for column in 0..width {
            let glyph = glyphs.get(column).copied().unwrap_or(NO_CELL);
            let q = column as i32 - radius;
            let Some(hex) = layout_cell(radius, q, y) else {
                if glyph != NO_CELL {
                    return Err(ScenarioError::OffMap { glyph, line, column });
                }
                continue;
            };

            match glyph {
                OBSERVER => {
                    if observer.replace(hex).is_some() {
                        return Err(ScenarioError::DuplicateObserver);
                    }
                    expected_visible.push(hex);
                }
                WALL_HIDDEN => blocked.push(hex),
                WALL_VISIBLE => {
                    blocked.push(hex);
                    expected_visible.push(hex);
                }
                VISIBLE => expected_visible.push(hex),
                HIDDEN => {}
                NO_CELL => return Err(ScenarioError::MissingCell { line, column }),
                _ => return Err(ScenarioError::UnknownGlyph { glyph, line, column }),
            }
        }
    }

    let observer = observer.ok_or(ScenarioError::MissingObserver)?;
    Ok(Scenario {
        name: name.to_string(),
        radius,
        observer,
        blocked: sorted(blocked),
        expected_visible: sorted(expected_visible),
    })
}

/// Files in `dir` with the given extension, sorted by name
pub fn scenario_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, ScenarioError> {
    let entries = fs::read_dir(dir).map_err(|source| ScenarioError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().and_then(|s| s.to_str()) == Some(extension))
        .collect();
    files.sort();
    Ok(files)
}
