//! Release/tail spacing of hold notes.
//!
//! Consecutive tail events form the unit of work; each tail's
//! "instability" blends how awkward the hold's own duration is with how
//! tight the follow-up note in the same column comes, through a logistic
//! combiner.

use crate::{
    model::note::{Note, NoteSet},
    util::{
        bisect::lower_bound,
        smooth::{smooth_on_corners, Kernel},
    },
};

use super::DELTA_FLOOR;

/// Fallback head time when no follow-up note exists in the column.
const NO_NEXT_HEAD: f64 = 1e9;

/// The release curve on the base grid.
pub(crate) fn evaluate(notes: &NoteSet, hit_leniency: f64, base_corners: &[f64]) -> Vec<f64> {
    if notes.tails.len() < 2 {
        return vec![0.0; base_corners.len()];
    }

    let x = hit_leniency.max(DELTA_FLOOR);

    let instability: Vec<_> = notes
        .tails
        .iter()
        .map(|note| {
            let next_head = next_in_column(note, notes).map_or(NO_NEXT_HEAD, |n| f64::from(n.head));

            let head_term = 0.001 * f64::from(note.tail - note.head - 80).abs() / x;
            let tail_term = 0.001 * (next_head - f64::from(note.tail) - 80.0).abs() / x;

            2.0 / (2.0 + (-5.0 * (head_term - 0.75)).exp() + (-5.0 * (tail_term - 0.75)).exp())
        })
        .collect();

    let mut step = vec![0.0; base_corners.len()];

    for (i, pair) in notes.tails.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);

        let left = lower_bound(base_corners, f64::from(current.tail));
        let right = lower_bound(base_corners, f64::from(next.tail));

        if right <= left {
            continue;
        }

        let dt = 0.001 * f64::from(next.tail - current.tail).max(DELTA_FLOOR);
        let strength =
            0.08 / dt.sqrt() / x * (1.0 + 0.8 * (instability[i] + instability[i + 1]));

        // a running maximum, not a sum: simultaneous releases don't stack
        for value in step[left..right].iter_mut() {
            *value = f64::max(*value, strength);
        }
    }

    smooth_on_corners(base_corners, &step, 500.0, Kernel::Sum { scale: 0.001 })
}

/// The first note in the same column strictly after `note`.
fn next_in_column<'n>(note: &Note, notes: &'n NoteSet) -> Option<&'n Note> {
    let column = &notes.by_column[note.column];
    let mut idx = column.partition_point(|probe| probe.head < note.head);

    while idx < column.len() && column[idx] != *note {
        idx += 1;
    }

    column.get(idx + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        difficulty::corners::CornerGrids,
        model::{chart::Chart, hit_object::HitObject},
    };

    fn peak(hit_objects: Vec<HitObject>) -> f64 {
        let chart = Chart::new(4, 8.0, hit_objects);
        let notes = NoteSet::new(&chart, 1.0).unwrap();
        let grids = CornerGrids::new(&notes);

        evaluate(&notes, 0.05, &grids.base)
            .iter()
            .cloned()
            .fold(0.0, f64::max)
    }

    #[test]
    fn fewer_than_two_tails_is_silent() {
        assert_eq!(peak(vec![HitObject::hold(0, 0.0, 500.0)]), 0.0);
        assert_eq!(
            peak(vec![HitObject::note(0, 0.0), HitObject::note(1, 250.0)]),
            0.0
        );
    }

    #[test]
    fn denser_release_trains_score_higher_than_sparser_ones() {
        // both trains keep the smoothing window saturated over the same
        // two-second span, only the tail gaps differ
        let dense: Vec<_> = (0_u32..40)
            .map(|i| HitObject::hold(i as usize % 4, f64::from(i) * 50.0, 500.0))
            .collect();

        let sparse: Vec<_> = (0_u32..8)
            .map(|i| HitObject::hold(i as usize % 4, f64::from(i) * 250.0, 500.0))
            .collect();

        assert!(peak(dense) > peak(sparse));
    }
}
