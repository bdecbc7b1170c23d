use std::collections::BTreeSet;

use crate::model::note::NoteSet;

/// Offsets seeded around every event on the base grid; `±500 ms` is the
/// smoothing window, the `+1`/`+501`/`-499` split keeps the instant of the
/// event itself on the grid.
const BASE_OFFSETS: [i32; 3] = [1, 501, -499];

/// The wide grid only carries the `±1000 ms` neighborhood used by the
/// balance axis.
const WIDE_OFFSETS: [i32; 2] = [1000, -1000];

/// The non-uniform time grids every intermediate curve is evaluated on.
///
/// All three grids are strictly increasing, deduplicated, clipped to
/// `[0, total_time]` and always contain both endpoints.
pub(crate) struct CornerGrids {
    /// Union of [`base`](Self::base) and [`wide`](Self::wide); the final
    /// difficulty curve lives on this grid.
    pub all: Vec<f64>,
    /// Grid of the jack, cross, pattern and release axes.
    pub base: Vec<f64>,
    /// Grid of the balance axis.
    pub wide: Vec<f64>,
}

impl CornerGrids {
    pub(crate) fn new(notes: &NoteSet) -> Self {
        let base = build_grid(notes, &BASE_OFFSETS);
        let wide = build_grid(notes, &WIDE_OFFSETS);

        let mut all: BTreeSet<i32> = base.iter().copied().collect();
        all.extend(wide.iter().copied());

        Self {
            all: to_floats(all.into_iter()),
            base: to_floats(base.into_iter()),
            wide: to_floats(wide.into_iter()),
        }
    }
}

fn build_grid(notes: &NoteSet, offsets: &[i32]) -> BTreeSet<i32> {
    let mut grid = BTreeSet::new();

    for note in notes.notes.iter() {
        grid.insert(note.head);

        if note.is_long() {
            grid.insert(note.tail);
        }
    }

    let seeds: Vec<_> = grid.iter().copied().collect();

    for seed in seeds {
        for &offset in offsets.iter() {
            grid.insert(seed + offset);
        }
    }

    grid.insert(0);
    grid.insert(notes.total_time);
    grid.retain(|&corner| (0..=notes.total_time).contains(&corner));

    grid
}

fn to_floats(corners: impl Iterator<Item = i32>) -> Vec<f64> {
    corners.map(f64::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{chart::Chart, hit_object::HitObject};

    fn grids(hit_objects: Vec<HitObject>) -> (CornerGrids, i32) {
        let chart = Chart::new(4, 8.0, hit_objects);
        let notes = NoteSet::new(&chart, 1.0).unwrap();

        (CornerGrids::new(&notes), notes.total_time)
    }

    fn assert_grid_invariants(corners: &[f64], total_time: i32) {
        assert!(corners.windows(2).all(|w| w[0] < w[1]), "not strictly increasing");
        assert_eq!(corners.first(), Some(&0.0));
        assert_eq!(corners.last(), Some(&f64::from(total_time)));
    }

    #[test]
    fn grids_are_sorted_unique_and_span_the_chart() {
        let (grids, total_time) = grids(vec![
            HitObject::note(0, 1000.0),
            HitObject::hold(1, 2000.0, 800.0),
            HitObject::note(2, 1000.0),
        ]);

        assert_grid_invariants(&grids.base, total_time);
        assert_grid_invariants(&grids.wide, total_time);
        assert_grid_invariants(&grids.all, total_time);
    }

    #[test]
    fn base_grid_seeds_smoothing_boundaries() {
        let (grids, _) = grids(vec![
            HitObject::note(0, 1000.0),
            HitObject::note(1, 2000.0),
            HitObject::note(2, 3000.0),
        ]);

        for &expected in [1000.0, 1001.0, 1501.0, 501.0, 2001.0, 2501.0].iter() {
            assert!(grids.base.contains(&expected), "missing {}", expected);
        }
    }

    #[test]
    fn seeds_beyond_the_chart_span_are_clipped() {
        // total time is 2001, so the +501 seed of the last note falls away
        let (grids, total_time) = grids(vec![HitObject::note(0, 1000.0), HitObject::note(1, 2000.0)]);

        assert_eq!(total_time, 2001);
        assert!(!grids.base.contains(&2501.0));
        assert!(grids.base.iter().all(|&c| c <= f64::from(total_time)));
    }

    #[test]
    fn combined_grid_is_the_union() {
        let (grids, _) = grids(vec![HitObject::note(0, 1500.0), HitObject::note(3, 2500.0)]);

        for &corner in grids.base.iter().chain(grids.wide.iter()) {
            assert!(grids.all.contains(&corner));
        }

        assert!(grids.all.contains(&500.0), "wide -1000 seed missing from union");
    }
}
