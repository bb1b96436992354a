use crate::angle::Angle;

/// Sector represents an angular interval of light during beam propagation.
/// Read clockwise from `begin` to `end`; when `end < begin` the interval
/// wraps through the branch cut at the up axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sector {
    begin: Angle,
    end: Angle,
    empty: bool,
    /// Cached `end < begin`
    branch_cut: bool,
}

impl Sector {
    /// Create a new sector from its two boundary rays
    pub fn new(begin: Angle, end: Angle) -> Self {
        Sector {
            begin,
            end,
            empty: false,
            branch_cut: end < begin,
        }
    }

    /// A sector that contains nothing
    pub fn empty() -> Self {
        let up = Angle::new(0, 1);
        Sector {
            begin: up,
            end: up,
            empty: true,
            branch_cut: false,
        }
    }

    pub fn begin(&self) -> Angle {
        self.begin
    }

    pub fn end(&self) -> Angle {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn contains_branch_cut(&self) -> bool {
        self.branch_cut
    }

    pub fn set_begin(&mut self, begin: Angle) {
        self.begin = begin;
        self.refresh();
    }

    pub fn set_end(&mut self, end: Angle) {
        self.end = end;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.branch_cut = self.end < self.begin;
    }

    /// Check whether a ray lies inside the sector (both boundaries included)
    pub fn contains(&self, angle: &Angle) -> bool {
        if self.empty {
            return false;
        }
        if self.branch_cut {
            *angle >= self.begin || *angle <= self.end
        } else {
            *angle >= self.begin && *angle <= self.end
        }
    }

    /// Clip this sector to `other`. Returns whether anything is left.
    ///
    /// Both sectors are expected to overlap in at most one contiguous piece,
    /// which holds for a beam sector and the window of one of its targets.
    pub fn intersect(&mut self, other: &Sector) -> bool {
        if self.empty || other.empty {
            self.empty = true;
            return false;
        }

        let mut clipped = false;
        if self.contains(&other.begin) {
            self.set_begin(other.begin);
            clipped = true;
        }
        if self.contains(&other.end) {
            self.set_end(other.end);
            clipped = true;
        }
        if !clipped && !other.contains(&self.begin) {
            self.empty = true;
        }

        !self.empty
    }

    /// Extend this sector by an edge-adjacent one.
    ///
    /// Returns false and leaves `self` untouched when the two sectors do not
    /// share a boundary ray.
    pub fn adjacent_union(&mut self, other: &Sector) -> bool {
        if other.empty {
            return true;
        }
        if self.empty {
            *self = *other;
            return true;
        }

        if self.begin == other.end {
            self.set_begin(other.begin);
        } else if self.end == other.begin {
            self.set_end(other.end);
        } else {
            log::debug!(
                "sectors [{:?}, {:?}] and [{:?}, {:?}] share no boundary, union skipped",
                self.begin, self.end, other.begin, other.end
            );
            return false;
        }
        true
    }
}

/// Intersect `[a0, a1]` with `[b0, b1]`, returning the surviving boundaries
pub fn sector_intersection(a0: Angle, a1: Angle, b0: Angle, b1: Angle) -> Option<(Angle, Angle)> {
    let mut sector = Sector::new(a0, a1);
    if sector.intersect(&Sector::new(b0, b1)) {
        Some((sector.begin, sector.end))
    } else {
        None
    }
}

/// Merge `[a0, a1]` with the edge-adjacent `[b0, b1]`
pub fn sector_adjacent_union(a0: Angle, a1: Angle, b0: Angle, b1: Angle) -> (Angle, Angle) {
    let mut sector = Sector::new(a0, a1);
    sector.adjacent_union(&Sector::new(b0, b1));
    (sector.begin, sector.end)
}
