//! Finger stamina on repeated same-column presses.

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

/// Placeholder gap for corners no same-column pair spans.
const DEFAULT_DELTA: f64 = 1e9;

pub(crate) struct Jack {
    /// `delta[column][corner]`: minimum head gap (in seconds) of the
    /// same-column pair spanning the corner. Also consumed by the balance
    /// skill.
    pub delta: Vec<Vec<f64>>,
    /// The combined jack curve on the base grid.
    pub curve: Vec<f64>,
}

impl Jack {
    pub(crate) fn evaluate(notes: &NoteSet, hit_leniency: f64, base_corners: &[f64]) -> Self {
        let columns = 0..notes.by_column.len();

        #[cfg(feature = "parallel")]
        let per_column: Vec<_> = columns
            .into_par_iter()
            .map(|k| evaluate_column(&notes.by_column[k], hit_leniency, base_corners))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let per_column: Vec<_> = columns
            .map(|k| evaluate_column(&notes.by_column[k], hit_leniency, base_corners))
            .collect();

        let mut delta = Vec::with_capacity(per_column.len());
        let mut smoothed = Vec::with_capacity(per_column.len());

        for (column_delta, column_values) in per_column {
            delta.push(column_delta);
            smoothed.push(column_values);
        }

        // p = 5 power mean across columns, weighted by the inverse of the
        // local minimum gap
        let curve = (0..base_corners.len())
            .map(|corner| {
                let mut numerator = 0.0;
                let mut denominator = 0.0;

                for (column_values, column_delta) in smoothed.iter().zip(delta.iter()) {
                    let value = column_values[corner].max(0.0);
                    let weight = 1.0 / column_delta[corner].max(1e-9);
                    numerator += value.powi(5) * weight;
                    denominator += weight;
                }

                let combined = if denominator <= 0.0 {
                    0.0
                } else {
                    numerator / denominator
                };

                combined.max(0.0).powf(0.2)
            })
            .collect();

        Self { delta, curve }
    }
}

fn evaluate_column(
    column_notes: &[Note],
    hit_leniency: f64,
    base_corners: &[f64],
) -> (Vec<f64>, Vec<f64>) {
    let mut delta = vec![DEFAULT_DELTA; base_corners.len()];
    let mut values = vec![0.0; base_corners.len()];

    for pair in column_notes.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);

        let left = lower_bound(base_corners, f64::from(current.head));
        let right = lower_bound(base_corners, f64::from(next.head));

        if right <= left {
            continue;
        }

        let head_gap = f64::from(next.head - current.head).max(DELTA_FLOOR);
        let dt = 0.001 * head_gap;

        // vibro-like gaps around 80 ms are slightly nerfed
        let jack_nerfer = 1.0 - 7e-5 * (0.15 + (dt - 0.08).abs()).powi(-4);
        let value = jack_nerfer / (dt * (dt + 0.11 * hit_leniency.powf(0.25)));

        for idx in left..right {
            delta[idx] = delta[idx].min(dt);
            values[idx] = value;
        }
    }

    let smoothed = smooth_on_corners(base_corners, &values, 500.0, Kernel::Sum { scale: 0.001 });

    (delta, smoothed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::chart::Chart;
    use crate::model::hit_object::HitObject;

    #[test]
    fn dense_jacks_score_higher_than_sparse() {
        let dense: Vec<_> = (0..16).map(|i| HitObject::note(0, f64::from(i) * 100.0)).collect();
        let sparse: Vec<_> = (0..16).map(|i| HitObject::note(0, f64::from(i) * 400.0)).collect();

        let peak = |hit_objects: Vec<HitObject>| {
            let chart = Chart::new(4, 8.0, hit_objects);
            let notes = NoteSet::new(&chart, 1.0).unwrap();
            let grids = crate::difficulty::corners::CornerGrids::new(&notes);
            let jack = Jack::evaluate(&notes, 0.05, &grids.base);

            jack.curve.iter().cloned().fold(0.0, f64::max)
        };

        assert!(peak(dense) > peak(sparse));
    }
}
