use std::cmp::Ordering;

/// Direction of a ray leaving the observer, kept as an integer vector.
///
/// The vector is neither normalized nor reduced: `(1, 1)` and `(2, 2)` are the
/// same angle. Ordering is an exact sweep that starts at the canonical up axis
/// `(0, 1)` and never touches floating point, so two angles built from lattice
/// points compare the same way on every platform.
#[derive(Debug, Clone, Copy)]
pub struct Angle {
    x: i32,
    y: i32,
}

impl Angle {
    /// Create an angle from a non-zero direction vector
    pub fn new(x: i32, y: i32) -> Self {
        debug_assert!(x != 0 || y != 0, "angle built from a zero vector");
        Angle { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Sweep quadrant: 0 = {x>=0, y>=0}, 1 = {x<0, y>=0}, 2 = {x<0, y<0}, 3 = {x>=0, y<0}
    pub fn quadrant(&self) -> u8 {
        match (self.x >= 0, self.y >= 0) {
            (true, true) => 0,
            (false, true) => 1,
            (false, false) => 2,
            (true, false) => 3,
        }
    }

    /// Lies exactly on the vertical reference axis
    fn on_axis(&self) -> bool {
        self.x == 0 && self.y != 0
    }

    /// Cross product in the sweep's orientation.
    /// Positive means `self` precedes `other` inside a shared quadrant.
    fn cross(&self, other: &Angle) -> i64 {
        i64::from(self.y) * i64::from(other.x) - i64::from(self.x) * i64::from(other.y)
    }
}

impl Ord for Angle {
    fn cmp(&self, other: &Self) -> Ordering {
        let (qa, qb) = (self.quadrant(), other.quadrant());
        if qa != qb {
            return qa.cmp(&qb);
        }

        // The axis opens its quadrant's pass of the sweep
        match (self.on_axis(), other.on_axis()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        0.cmp(&self.cross(other))
    }
}

impl PartialOrd for Angle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Angle {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Angle {}
