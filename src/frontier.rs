use crate::angle::Angle;
use crate::sector::Sector;
use std::collections::BTreeMap;

/// Cells waiting to be processed at one beam depth, each with the light that
/// reached it so far.
///
/// Several rays can land on the same cell; their sectors are merged with an
/// adjacent union so every cell is stored once.
#[derive(Debug, Default, Clone)]
pub struct Frontier {
    cells: BTreeMap<(i32, i32), Sector>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue light `[begin, end]` for cell (x, y), merging with light already queued there
    pub fn add(&mut self, x: i32, y: i32, begin: Angle, end: Angle) {
        let incoming = Sector::new(begin, end);
        self.cells
            .entry((x, y))
            .and_modify(|stored| {
                stored.adjacent_union(&incoming);
            })
            .or_insert(incoming);
    }

    /// Lowest cell in (x, y) order
    pub fn front(&self) -> Option<(i32, i32, Sector)> {
        self.cells
            .first_key_value()
            .map(|(&(x, y), &sector)| (x, y, sector))
    }

    pub fn pop_front(&mut self) -> Option<(i32, i32, Sector)> {
        self.cells.pop_first().map(|((x, y), sector)| (x, y, sector))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Sector> {
        self.cells.get(&(x, y))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
