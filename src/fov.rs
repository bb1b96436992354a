use crate::beam::Beam;
use crate::hex::{Direction, Hex};
use std::collections::HashSet;

/// Map a beam plane cell of the beam facing `direction` back to the world
fn to_world(origin: Hex, direction: Direction, x: i32, y: i32) -> Hex {
    Hex::from_plane(x, y).rotate_cw(direction.index()) + origin
}

/// Run the single beam that faces `direction` from `origin`.
///
/// `on_visible` is called once for every cell the beam reaches, in order of
/// depth. The origin itself is never reported here.
pub fn beam_view<F, V>(origin: Hex, direction: Direction, radius: i32, is_opaque: &F, on_visible: &mut V)
where
    F: Fn(Hex) -> bool,
    V: FnMut(Hex),
{
    let opacity = |x: i32, y: i32| is_opaque(to_world(origin, direction, x, y));
    let sink = |x: i32, y: i32| on_visible(to_world(origin, direction, x, y));
    // The returned sink is the closure itself, nothing to collect
    let _ = Beam::new(opacity, sink, radius).calculate();
}

/// Every cell visible from `origin` within `radius`, the origin included
pub fn field_of_view<F>(origin: Hex, radius: i32, is_opaque: F) -> HashSet<Hex>
where
    F: Fn(Hex) -> bool,
{
    let mut visible = HashSet::new();
    visible.insert(origin);
    for direction in Direction::ALL {
        beam_view(origin, direction, radius, &is_opaque, &mut |hex: Hex| {
            visible.insert(hex);
        });
    }
    log::debug!("field of view from {:?} radius {}: {} cells", origin, radius, visible.len());
    visible
}

/// `field_of_view` with the six beams spread over the rayon pool
#[cfg(feature = "parallel")]
pub fn par_field_of_view<F>(origin: Hex, radius: i32, is_opaque: F) -> HashSet<Hex>
where
    F: Fn(Hex) -> bool + Sync,
{
    use rayon::prelude::*;

    let mut visible = Direction::ALL
        .into_par_iter()
        .map(|direction| {
            let mut cells = Vec::new();
            beam_view(origin, direction, radius, &is_opaque, &mut |hex: Hex| cells.push(hex));
            cells
        })
        .reduce(Vec::new, |mut all, cells| {
            all.extend(cells);
            all
        })
        .into_iter()
        .collect::<HashSet<Hex>>();
    visible.insert(origin);
    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden(radius: i32, blocked: &[Hex]) -> Vec<Hex> {
        let blocked: HashSet<Hex> = blocked.iter().copied().collect();
        let visible = field_of_view(Hex::ORIGIN, radius, |h| blocked.contains(&h));
        let mut hidden: Vec<Hex> = Hex::ORIGIN
            .spiral(radius)
            .into_iter()
            .filter(|h| !visible.contains(h))
            .collect();
        hidden.sort();
        hidden
    }

    fn sample_walls() -> Vec<Hex> {
        vec![
            Hex::new(0, 2),
            Hex::new(1, 1),
            Hex::new(-2, 1),
            Hex::new(2, -3),
            Hex::new(-1, -1),
            Hex::new(3, 0),
            Hex::new(-3, 3),
        ]
    }

    #[test]
    fn test_radius_zero_sees_only_origin() {
        let visible = field_of_view(Hex::new(4, -2), 0, |_| false);
        assert_eq!(visible.len(), 1);
        assert!(visible.contains(&Hex::new(4, -2)));
    }

    #[test]
    fn test_open_field_sees_whole_disc() {
        for radius in 0..=7 {
            let visible = field_of_view(Hex::ORIGIN, radius, |_| false);
            assert_eq!(visible.len() as i32, 3 * radius * (radius + 1) + 1, "radius {}", radius);
            assert!(visible.iter().all(|h| h.length() <= radius));
        }
    }

    #[test]
    fn test_origin_visible_even_when_opaque() {
        let visible = field_of_view(Hex::ORIGIN, 3, |h| h == Hex::ORIGIN);
        assert!(visible.contains(&Hex::ORIGIN));
        assert_eq!(visible.len(), 37);
    }

    #[test]
    fn test_each_beam_reports_cells_once() {
        let walls = sample_walls();
        for direction in Direction::ALL {
            let mut seen = Vec::new();
            beam_view(Hex::ORIGIN, direction, 5, &|h: Hex| walls.contains(&h), &mut |h: Hex| seen.push(h));
            let unique: HashSet<Hex> = seen.iter().copied().collect();
            assert_eq!(unique.len(), seen.len(), "{:?}", direction);
            assert!(seen.contains(&direction.offset()));
        }
    }

    #[test]
    fn test_neighbour_casts_shadow() {
        assert_eq!(
            hidden(4, &[Hex::new(0, 1)]),
            vec![
                Hex::new(-1, 3),
                Hex::new(-1, 4),
                Hex::new(0, 2),
                Hex::new(0, 3),
                Hex::new(0, 4),
                Hex::new(1, 2),
                Hex::new(1, 3),
            ]
        );
    }

    #[test]
    fn test_adjacent_walls_merge_shadows() {
        let shadow = hidden(4, &[Hex::new(0, 1), Hex::new(1, 0)]);
        assert_eq!(shadow.len(), 16);
        // The gap between the two shadows is closed
        assert!(shadow.contains(&Hex::new(1, 1)));
        assert!(shadow.contains(&Hex::new(2, 1)));
    }

    #[test]
    fn test_rotation_symmetry() {
        let walls = sample_walls();
        let base = field_of_view(Hex::ORIGIN, 5, |h| walls.contains(&h));
        for turns in 1..6u8 {
            let rotated: Vec<Hex> = walls.iter().map(|h| h.rotate_cw(turns)).collect();
            let visible = field_of_view(Hex::ORIGIN, 5, |h| rotated.contains(&h));
            let expected: HashSet<Hex> = base.iter().map(|h| h.rotate_cw(turns)).collect();
            assert_eq!(visible, expected, "{} turns", turns);
        }
    }

    #[test]
    fn test_mirror_symmetry() {
        let walls = sample_walls();
        let base = field_of_view(Hex::ORIGIN, 5, |h| walls.contains(&h));
        let mirrored: Vec<Hex> = walls.iter().map(|h| h.mirror()).collect();
        let visible = field_of_view(Hex::ORIGIN, 5, |h| mirrored.contains(&h));
        let expected: HashSet<Hex> = base.iter().map(|h| h.mirror()).collect();
        assert_eq!(visible, expected);
    }

    #[test]
    fn test_translation_invariance() {
        let walls = sample_walls();
        let shift = Hex::new(7, -3);
        let base = field_of_view(Hex::ORIGIN, 4, |h| walls.contains(&h));
        let moved = field_of_view(shift, 4, |h| walls.contains(&(h - shift)));
        let expected: HashSet<Hex> = base.iter().map(|&h| h + shift).collect();
        assert_eq!(moved, expected);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let walls = sample_walls();
        for radius in [0, 1, 3, 6] {
            assert_eq!(
                par_field_of_view(Hex::new(1, -1), radius, |h| walls.contains(&h)),
                field_of_view(Hex::new(1, -1), radius, |h| walls.contains(&h)),
            );
        }
    }
}
