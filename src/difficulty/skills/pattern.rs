//! Stream/pattern pressure across all columns, boosted by held long-note
//! bodies and the local anchor multiplier.

use crate::{
    difficulty::ln_rep::LnRepresentation,
    model::note::NoteSet,
    util::{
        bisect::{lower_bound, upper_bound},
        smooth::{smooth_on_corners, Kernel},
    },
};

use super::DELTA_FLOOR;

/// The pattern curve on the base grid.
pub(crate) fn evaluate(
    notes: &NoteSet,
    hit_leniency: f64,
    ln_rep: Option<&LnRepresentation>,
    anchor: &[f64],
    base_corners: &[f64],
    ln_multiplier: f64,
) -> Vec<f64> {
    let mut step = vec![0.0; base_corners.len()];
    let x = hit_leniency;
    let inv_x = 1.0 / x.max(DELTA_FLOOR);

    for pair in notes.notes.windows(2) {
        let (left_note, right_note) = (&pair[0], &pair[1]);
        let delta_time = right_note.head - left_note.head;

        // chords: all notes at one instant spike the corner itself
        if delta_time <= 0 {
            let spike_base = 0.02 * (4.0 * inv_x - 24.0);

            if spike_base <= 0.0 {
                continue;
            }

            let spike = 1000.0 * spike_base.powf(0.25);
            let left = lower_bound(base_corners, f64::from(left_note.head));
            let right = upper_bound(base_corners, f64::from(left_note.head));

            for value in step[left..right].iter_mut() {
                *value += spike;
            }

            continue;
        }

        let left = lower_bound(base_corners, f64::from(left_note.head));
        let right = lower_bound(base_corners, f64::from(right_note.head));

        if right <= left {
            continue;
        }

        let dt = 0.001 * f64::from(delta_time);

        let mut held = 1.0;

        if let Some(rep) = ln_rep {
            held += ln_multiplier * 0.001 * rep.integral(left_note.head, right_note.head);
        }

        let effective = stream_booster(dt).max(held);

        // cubic falloff centered on half the leniency window, flattening
        // out beyond two thirds of it
        let inner = if dt < 2.0 * x / 3.0 {
            let centre = dt - x / 2.0;
            0.08 * inv_x * (1.0 - 24.0 * inv_x * centre * centre)
        } else {
            let centre = x / 6.0;
            0.08 * inv_x * (1.0 - 24.0 * inv_x * centre * centre)
        };

        let inc = inner.max(0.0).powf(0.25) / dt.max(DELTA_FLOOR) * effective;

        for idx in left..right {
            let limit = inc.max(2.0 * inc - 10.0);
            step[idx] += (inc * anchor[idx]).min(limit);
        }
    }

    smooth_on_corners(base_corners, &step, 500.0, Kernel::Sum { scale: 0.001 })
}

/// Amplifies deltas whose note rate falls in the 160-360 notes-per-unit
/// mid-tempo band.
fn stream_booster(dt: f64) -> f64 {
    let rate = 7.5 / dt.max(DELTA_FLOOR);

    if rate <= 160.0 || rate >= 360.0 {
        return 1.0;
    }

    let low = rate - 160.0;
    let high = rate - 360.0;

    1.0 + 1.7e-7 * low * high * high
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        difficulty::corners::CornerGrids,
        model::{chart::Chart, hit_object::HitObject},
    };

    #[test]
    fn booster_is_flat_outside_the_band() {
        assert_eq!(stream_booster(7.5 / 100.0), 1.0);
        assert_eq!(stream_booster(7.5 / 400.0), 1.0);
        assert!(stream_booster(7.5 / 250.0) > 1.0);
    }

    fn peak(hit_objects: &[HitObject]) -> f64 {
        let chart = Chart::new(4, 8.0, hit_objects.to_vec());
        let notes = NoteSet::new(&chart, 1.0).unwrap();
        let grids = CornerGrids::new(&notes);
        // neutral anchor so only the pattern term itself is measured
        let anchor = vec![1.0; grids.base.len()];
        let ln_rep = LnRepresentation::new(&notes.long_notes, notes.total_time);

        let curve = evaluate(&notes, 0.05, ln_rep.as_ref(), &anchor, &grids.base, 6.0);

        curve.iter().cloned().fold(0.0, f64::max)
    }

    #[test]
    fn held_bodies_boost_the_stream() {
        let plain: Vec<_> = (0_u32..8)
            .map(|i| HitObject::note(i as usize % 4, f64::from(i) * 150.0))
            .collect();

        // same head times, but the first note is sustained underneath the
        // rest of the stream
        let mut held = plain.clone();
        held[0] = HitObject::hold(0, 0.0, 1000.0);

        assert!(peak(&held) >= peak(&plain));
        assert!(peak(&plain) > 0.0);
    }
}
