use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Flat-top hex cell in axial coordinates.
/// `q` grows towards the north-east, `r` towards the north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

/// The six neighbour directions, clockwise from north
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// Number of 60° clockwise turns from north
    pub fn index(self) -> u8 {
        match self {
            Direction::North => 0,
            Direction::NorthEast => 1,
            Direction::SouthEast => 2,
            Direction::South => 3,
            Direction::SouthWest => 4,
            Direction::NorthWest => 5,
        }
    }

    pub fn offset(self) -> Hex {
        Hex::new(0, 1).rotate_cw(self.index())
    }
}

impl Hex {
    pub const ORIGIN: Hex = Hex { q: 0, r: 0 };

    pub fn new(q: i32, r: i32) -> Self {
        Hex { q, r }
    }

    /// Hex distance from the origin
    pub fn length(self) -> i32 {
        (self.q.abs() + self.r.abs() + (self.q + self.r).abs()) / 2
    }

    pub fn distance(self, other: Hex) -> i32 {
        (self - other).length()
    }

    pub fn neighbor(self, direction: Direction) -> Hex {
        self + direction.offset()
    }

    /// Rotate around the origin by `turns` steps of 60° clockwise
    pub fn rotate_cw(self, turns: u8) -> Hex {
        let mut hex = self;
        for _ in 0..turns % 6 {
            hex = Hex::new(hex.q + hex.r, -hex.q);
        }
        hex
    }

    /// Reflect across the north-south axis through the origin
    pub fn mirror(self) -> Hex {
        Hex::new(-self.q, self.r + self.q)
    }

    /// Centre of the cell in beam plane units.
    /// Corners sit at (±2, 0) and (±1, ±1) around it.
    pub fn to_plane(self) -> (i32, i32) {
        (3 * self.q, 2 * self.r + self.q)
    }

    /// Inverse of `to_plane` for cell centres
    pub fn from_plane(x: i32, y: i32) -> Hex {
        let q = x / 3;
        Hex::new(q, (y - q) / 2)
    }

    /// Every cell within `radius`, ring by ring
    pub fn spiral(self, radius: i32) -> Vec<Hex> {
        let mut cells = vec![self];
        for ring in 1..=radius {
            let mut hex = self + Direction::SouthWest.offset().scale(ring);
            for direction in Direction::ALL {
                for _ in 0..ring {
                    cells.push(hex);
                    hex = hex.neighbor(direction);
                }
            }
        }
        cells
    }

    fn scale(self, factor: i32) -> Hex {
        Hex::new(self.q * factor, self.r * factor)
    }
}

/// Hex distance of a beam plane cell from the observer
pub fn plane_distance(x: i32, y: i32) -> i32 {
    Hex::from_plane(x, y).length()
}

/// Plane cells of the north wedge within `radius`, sorted. The observer is excluded.
pub fn wedge_cells(radius: i32) -> Vec<(i32, i32)> {
    let mut cells: Vec<(i32, i32)> = Hex::ORIGIN
        .spiral(radius)
        .into_iter()
        .map(Hex::to_plane)
        .filter(|&(x, y)| y > 0 && x.abs() <= y)
        .collect();
    cells.sort();
    cells
}

impl Add for Hex {
    type Output = Hex;

    fn add(self, other: Hex) -> Hex {
        Hex::new(self.q + other.q, self.r + other.r)
    }
}

impl Sub for Hex {
    type Output = Hex;

    fn sub(self, other: Hex) -> Hex {
        Hex::new(self.q - other.q, self.r - other.r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_direction_offsets() {
        let offsets: Vec<Hex> = Direction::ALL.iter().map(|d| d.offset()).collect();
        assert_eq!(
            offsets,
            vec![
                Hex::new(0, 1),
                Hex::new(1, 0),
                Hex::new(1, -1),
                Hex::new(0, -1),
                Hex::new(-1, 0),
                Hex::new(-1, 1),
            ]
        );
    }

    #[test]
    fn test_plane_round_trip_and_neighbours() {
        assert_eq!(Hex::new(0, 1).to_plane(), (0, 2));
        assert_eq!(Hex::new(1, 0).to_plane(), (3, 1));
        assert_eq!(Hex::new(-1, 1).to_plane(), (-3, 1));
        for hex in Hex::ORIGIN.spiral(4) {
            let (x, y) = hex.to_plane();
            assert_eq!(Hex::from_plane(x, y), hex);
            assert_eq!(plane_distance(x, y), hex.length());
        }
    }

    #[test]
    fn test_rotation_and_mirror() {
        let hex = Hex::new(2, -1);
        assert_eq!(hex.rotate_cw(6), hex);
        assert_eq!(hex.rotate_cw(3), Hex::new(-2, 1));
        assert_eq!(hex.rotate_cw(1).length(), hex.length());
        assert_eq!(Direction::North.offset().mirror(), Hex::new(0, 1));
        assert_eq!(Direction::NorthEast.offset().mirror(), Direction::NorthWest.offset());
        assert_eq!(hex.mirror().mirror(), hex);
    }

    #[test]
    fn test_spiral_covers_each_cell_once() {
        let cells = Hex::new(1, 1).spiral(3);
        assert_eq!(cells.len(), 37);
        let unique: HashSet<Hex> = cells.iter().copied().collect();
        assert_eq!(unique.len(), 37);
        assert!(cells.iter().all(|c| c.distance(Hex::new(1, 1)) <= 3));
    }

    #[test]
    fn test_wedge_cells() {
        assert!(wedge_cells(0).is_empty());
        assert_eq!(wedge_cells(2), vec![(-3, 3), (0, 2), (0, 4), (3, 3)]);
        let counts: Vec<usize> = (1..=6).map(|r| wedge_cells(r).len()).collect();
        assert_eq!(counts, vec![1, 4, 7, 12, 17, 24]);
    }
}
