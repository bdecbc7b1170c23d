//! Cross-column technicality on adjacent-column boundaries.

use crate::{
    model::note::{Note, NoteSet},
    util::{
        bisect::lower_bound,
        smooth::{smooth_on_corners, Kernel},
    },
};

use super::DELTA_FLOOR;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The combined cross curve on the base grid.
///
/// `cross_weights` holds one weight per column boundary (`key_count + 1`
/// entries), supplied by the injected interaction table.
pub(crate) fn evaluate(
    notes: &NoteSet,
    hit_leniency: f64,
    active_columns: &[Vec<usize>],
    base_corners: &[f64],
    cross_weights: &[f64],
) -> Vec<f64> {
    let key_count = notes.by_column.len();
    let boundaries = 0..=key_count;

    #[cfg(feature = "parallel")]
    let per_boundary: Vec<_> = boundaries
        .into_par_iter()
        .map(|k| evaluate_boundary(k, notes, hit_leniency, active_columns, base_corners, cross_weights))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let per_boundary: Vec<_> = boundaries
        .map(|k| evaluate_boundary(k, notes, hit_leniency, active_columns, base_corners, cross_weights))
        .collect();

    let weight = |k: usize| cross_weights[k.min(cross_weights.len() - 1)];

    let combined: Vec<_> = (0..base_corners.len())
        .map(|corner| {
            let mut sum = 0.0;

            for (k, boundary) in per_boundary.iter().enumerate() {
                sum += weight(k) * boundary.values[corner];
            }

            // the fast-cross term blends geometrically between neighboring
            // boundaries
            for k in 0..key_count {
                let left = per_boundary[k].fast_cross[corner] * weight(k);
                let right = per_boundary[k + 1].fast_cross[corner] * weight(k + 1);
                sum += (left * right).max(0.0).sqrt();
            }

            sum
        })
        .collect();

    smooth_on_corners(base_corners, &combined, 500.0, Kernel::Sum { scale: 0.001 })
}

struct Boundary {
    values: Vec<f64>,
    fast_cross: Vec<f64>,
}

fn evaluate_boundary(
    k: usize,
    notes: &NoteSet,
    hit_leniency: f64,
    active_columns: &[Vec<usize>],
    base_corners: &[f64],
    cross_weights: &[f64],
) -> Boundary {
    let key_count = notes.by_column.len();

    let mut boundary = Boundary {
        values: vec![0.0; base_corners.len()],
        fast_cross: vec![0.0; base_corners.len()],
    };

    // notes of the two columns sharing this boundary; the edges only see
    // one column
    let mut pair: Vec<Note> = if k == 0 {
        notes.by_column[0].clone()
    } else if k == key_count {
        notes.by_column[key_count - 1].clone()
    } else {
        let mut merged = notes.by_column[k - 1].clone();
        merged.extend_from_slice(&notes.by_column[k]);
        merged
    };

    pair.sort_unstable_by(|a, b| a.head.cmp(&b.head).then_with(|| a.column.cmp(&b.column)));

    if pair.len() < 2 {
        return boundary;
    }

    for window in pair.windows(2) {
        let (prev, current) = (&window[0], &window[1]);

        let left = lower_bound(base_corners, f64::from(prev.head));
        let right = lower_bound(base_corners, f64::from(current.head));

        if right <= left {
            continue;
        }

        let dt = 0.001 * f64::from(current.head - prev.head).max(DELTA_FLOOR);
        let mut value = 0.16 * hit_leniency.max(dt).powi(-2);

        // a pair isolated from the neighboring columns counts less as
        // cross-play
        let idx_start = left.min(base_corners.len() - 1);
        let idx_end = right.min(base_corners.len() - 1);

        let inactive = |column: isize| {
            column < 0
                || !active_columns[idx_start].contains(&(column as usize))
                    && !active_columns[idx_end].contains(&(column as usize))
        };

        if inactive(k as isize - 1) || inactive(k as isize) {
            value *= 1.0 - cross_weights[k.min(cross_weights.len() - 1)];
        }

        let fast = (0.4 * dt.max(0.06).max(0.75 * hit_leniency).powi(-2) - 80.0).max(0.0);

        for idx in left..right {
            boundary.values[idx] = value;
            boundary.fast_cross[idx] = fast;
        }
    }

    boundary
}
