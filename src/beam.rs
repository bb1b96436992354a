use crate::angle::Angle;
use crate::frontier::Frontier;
use crate::hex::plane_distance;
use crate::sector::Sector;
use std::collections::HashSet;

/// Tells the beam which cells stop light.
/// Queried in beam plane coordinates with the observer at (0, 0).
pub trait OpacitySource {
    fn is_opaque(&self, x: i32, y: i32) -> bool;
}

impl<F> OpacitySource for F
where
    F: Fn(i32, i32) -> bool,
{
    fn is_opaque(&self, x: i32, y: i32) -> bool {
        self(x, y)
    }
}

/// Receives every cell the beam finds visible, exactly once per cell
pub trait LightSink {
    fn set_lighted(&mut self, x: i32, y: i32);
}

impl<F> LightSink for F
where
    F: FnMut(i32, i32),
{
    fn set_lighted(&mut self, x: i32, y: i32) {
        self(x, y)
    }
}

impl LightSink for Vec<(i32, i32)> {
    fn set_lighted(&mut self, x: i32, y: i32) {
        self.push((x, y));
    }
}

impl LightSink for HashSet<(i32, i32)> {
    fn set_lighted(&mut self, x: i32, y: i32) {
        self.insert((x, y));
    }
}

/// Window corners above a cell, west to east: the cell's three upper edges
/// run t0-t1 (north-west), t1-t2 (north) and t2-t3 (north-east).
const T0: (i32, i32) = (-2, 0);
const T1: (i32, i32) = (-1, 1);
const T2: (i32, i32) = (1, 1);
const T3: (i32, i32) = (2, 0);

/// Plane steps to the cells behind each upper edge
const SLANT_WEST: (i32, i32) = (-3, 1);
const STRAIGHT: (i32, i32) = (0, 2);
const SLANT_EAST: (i32, i32) = (3, 1);

/// Seed cell: the observer's north neighbour
const SEED: (i32, i32) = (0, 2);

/// Which frontier a target lands in, relative to the one being drained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    /// One row further out
    Primary,
    /// Two rows further out
    Secondary,
}

/// One 60° wedge of shadow casting, pointing north (+y) from the observer.
///
/// Cells are visited row by row. A slant step reaches the next row and a
/// straight step the one after, so three frontiers rotate: the row being
/// drained, the next row, and the row after that.
pub struct Beam<O, L> {
    opacity: O,
    sink: L,
    radius: i32,
    /// Frontier arena; `cursor` names the one being drained
    frontiers: [Frontier; 3],
    cursor: usize,
}

impl<O: OpacitySource, L: LightSink> Beam<O, L> {
    /// Create a beam covering cells up to `radius` hexes from the observer.
    /// The seed carries the whole wedge between the rays (-1, 1) and (1, 1).
    pub fn new(opacity: O, sink: L, radius: i32) -> Self {
        let mut beam = Beam {
            opacity,
            sink,
            radius,
            frontiers: Default::default(),
            cursor: 0,
        };
        if radius >= 1 {
            beam.frontiers[0].add(SEED.0, SEED.1, Angle::new(-1, 1), Angle::new(1, 1));
        }
        beam
    }

    /// Drain every frontier, lighting each reachable cell. Returns the sink.
    pub fn calculate(mut self) -> L {
        let mut lighted = 0usize;

        while let Some((x, y, sector)) = self.pop_next() {
            log::trace!("lighted ({}, {}) with [{:?}, {:?}]", x, y, sector.begin(), sector.end());
            self.sink.set_lighted(x, y);
            lighted += 1;

            if self.opacity.is_opaque(x, y) {
                continue;
            }
            self.pass_from(x, y, sector.begin(), sector.end());
        }

        log::debug!("beam finished: {} cells lighted within radius {}", lighted, self.radius);
        self.sink
    }

    /// Next cell of the current row, rotating rows when it runs dry
    fn pop_next(&mut self) -> Option<(i32, i32, Sector)> {
        loop {
            if let Some(next) = self.frontiers[self.cursor].pop_front() {
                return Some(next);
            }
            if self.frontier(Route::Primary).is_empty() && self.frontier(Route::Secondary).is_empty() {
                return None;
            }
            self.rotate();
        }
    }

    /// Current <- primary <- secondary <- (emptied) current
    fn rotate(&mut self) {
        self.cursor = (self.cursor + 1) % 3;
    }

    fn frontier(&self, route: Route) -> &Frontier {
        &self.frontiers[self.slot(route)]
    }

    fn slot(&self, route: Route) -> usize {
        match route {
            Route::Primary => (self.cursor + 1) % 3,
            Route::Secondary => (self.cursor + 2) % 3,
        }
    }

    /// Split light leaving (x, y) across the three cells above it
    fn pass_from(&mut self, x: i32, y: i32, begin: Angle, end: Angle) {
        let corner = |(dx, dy): (i32, i32)| Angle::new(x + dx, y + dy);
        let (t0, t1, t2, t3) = (corner(T0), corner(T1), corner(T2), corner(T3));

        // Edge cells have no neighbour inside the wedge on their outer side
        if x != -y {
            self.forward(x + SLANT_WEST.0, y + SLANT_WEST.1, begin, end, t0, t1, Route::Primary);
        }
        self.forward(x + STRAIGHT.0, y + STRAIGHT.1, begin, end, t1, t2, Route::Secondary);
        if x != y {
            self.forward(x + SLANT_EAST.0, y + SLANT_EAST.1, begin, end, t2, t3, Route::Primary);
        }
    }

    /// Queue the part of [begin, end] that fits through window [w0, w1]
    #[allow(clippy::too_many_arguments)]
    fn forward(&mut self, tx: i32, ty: i32, begin: Angle, end: Angle, w0: Angle, w1: Angle, route: Route) {
        if plane_distance(tx, ty) > self.radius {
            return;
        }
        let mut light = Sector::new(begin, end);
        if light.intersect(&Sector::new(w0, w1)) {
            let slot = self.slot(route);
            self.frontiers[slot].add(tx, ty, light.begin(), light.end());
        }
    }
}
