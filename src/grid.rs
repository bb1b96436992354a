use crate::fov::field_of_view;
use crate::hex::Hex;
use std::collections::{BTreeSet, HashSet};

/// Hexagonal map of cells within `radius` of `Hex(0, 0)`.
/// Only blocked cells are stored; anything outside the map counts as blocked.
#[derive(Debug, Clone, Default)]
pub struct HexGrid {
    pub radius: i32,
    blocked: BTreeSet<Hex>,
    /// Revision number - incremented whenever a cell changes
    pub revision: u64,
}

impl HexGrid {
    /// Create a map with every cell open
    pub fn new(radius: i32) -> Self {
        HexGrid {
            radius,
            blocked: BTreeSet::new(),
            revision: 0,
        }
    }

    /// Create a map with specific blocked cells. Cells off the map are ignored.
    pub fn with_blocked(radius: i32, blocked: &[Hex]) -> Self {
        let mut grid = Self::new(radius);
        for &hex in blocked {
            if grid.contains(hex) {
                grid.blocked.insert(hex);
            }
        }
        grid
    }

    /// Check whether the cell lies on the map
    pub fn contains(&self, hex: Hex) -> bool {
        hex.length() <= self.radius
    }

    /// Check if a cell is blocked
    pub fn is_blocked(&self, hex: Hex) -> bool {
        if !self.contains(hex) {
            return true; // Off the map is a wall
        }
        self.blocked.contains(&hex)
    }

    /// Block or open a cell, bumping the revision if anything changed
    pub fn set_blocked(&mut self, hex: Hex, blocked: bool) {
        if !self.contains(hex) {
            return;
        }
        let changed = if blocked {
            self.blocked.insert(hex)
        } else {
            self.blocked.remove(&hex)
        };
        if changed {
            self.revision += 1;
        }
    }

    pub fn toggle(&mut self, hex: Hex) {
        let blocked = self.is_blocked(hex);
        self.set_blocked(hex, !blocked);
    }

    /// Blocked cells in ascending order
    pub fn blocked(&self) -> Vec<Hex> {
        self.blocked.iter().copied().collect()
    }

    /// All cells of the map, ring by ring from the centre
    pub fn cells(&self) -> Vec<Hex> {
        Hex::ORIGIN.spiral(self.radius)
    }

    /// Get current grid revision number
    pub fn get_revision(&self) -> u64 {
        self.revision
    }

    /// Cells visible from `observer`, limited to the map.
    ///
    /// The beams reach `2 * radius` so an observer near the rim still sees the
    /// far side of the map.
    pub fn field_of_view(&self, observer: Hex) -> HashSet<Hex> {
        self.field_of_view_within(observer, 2 * self.radius)
    }

    /// Cells visible from `observer` no further than `sight` hexes away
    pub fn field_of_view_within(&self, observer: Hex, sight: i32) -> HashSet<Hex> {
        if !self.contains(observer) {
            log::warn!("observer {:?} is off a map of radius {}", observer, self.radius);
            return HashSet::new();
        }
        field_of_view(observer, sight, |hex| self.is_blocked(hex))
            .into_iter()
            .filter(|&hex| self.contains(hex))
            .collect()
    }
}
