use crate::{model::note::NoteSet, util::bisect::lower_bound};

/// Radius around a note's active interval within which its column counts
/// as "in use".
const ACTIVE_RADIUS: i32 = 150;

/// Reach of the continuous density falloff before/after a note.
const DENSITY_RADIUS: f64 = 400.0;

const DENSITY_BASE: f64 = 3.75;
const DENSITY_FALLOFF: f64 = DENSITY_BASE / (DENSITY_RADIUS * DENSITY_RADIUS);

/// Per-corner column activity and local note density on the base grid.
pub(crate) struct KeyUsage {
    /// `usage[column][corner]`: some note in `column` starts or spans
    /// within ±150 ms of the corner.
    pub usage: Vec<Vec<bool>>,
    /// Sorted list of active columns per corner, derived from
    /// [`usage`](Self::usage).
    pub active_columns: Vec<Vec<usize>>,
    /// `density[column][corner]`: decayed local note density, the input of
    /// the anchor function.
    pub density: Vec<Vec<f64>>,
}

impl KeyUsage {
    pub(crate) fn new(key_count: usize, notes: &NoteSet, base_corners: &[f64]) -> Self {
        let usage = build_usage(key_count, notes, base_corners);
        let active_columns = derive_active_columns(&usage);
        let density = build_density(key_count, notes, base_corners);

        Self {
            usage,
            active_columns,
            density,
        }
    }
}

fn build_usage(key_count: usize, notes: &NoteSet, base_corners: &[f64]) -> Vec<Vec<bool>> {
    let mut usage = vec![vec![false; base_corners.len()]; key_count];

    for note in notes.notes.iter() {
        let start = (note.head - ACTIVE_RADIUS).max(0);
        let end = if note.is_long() {
            (note.tail + ACTIVE_RADIUS).min(notes.total_time - 1)
        } else {
            (note.head + ACTIVE_RADIUS).min(notes.total_time - 1)
        };

        let left = lower_bound(base_corners, f64::from(start));
        let right = lower_bound(base_corners, f64::from(end));

        for flag in usage[note.column][left..right].iter_mut() {
            *flag = true;
        }
    }

    usage
}

fn derive_active_columns(usage: &[Vec<bool>]) -> Vec<Vec<usize>> {
    let len = usage.first().map_or(0, Vec::len);

    (0..len)
        .map(|corner| {
            usage
                .iter()
                .enumerate()
                .filter_map(|(column, flags)| flags[corner].then(|| column))
                .collect()
        })
        .collect()
}

fn build_density(key_count: usize, notes: &NoteSet, base_corners: &[f64]) -> Vec<Vec<f64>> {
    let mut density = vec![vec![0.0; base_corners.len()]; key_count];

    for note in notes.notes.iter() {
        let start = note.head.max(0);
        let end = if note.is_long() {
            note.tail.min(notes.total_time - 1)
        } else {
            note.head
        };

        let left_falloff = lower_bound(base_corners, f64::from(start) - DENSITY_RADIUS);
        let left = lower_bound(base_corners, f64::from(start));
        let right = lower_bound(base_corners, f64::from(end));
        let right_falloff = lower_bound(base_corners, f64::from(end) + DENSITY_RADIUS);

        // holds contribute up to +10 extra, scaled by their capped duration
        let clamped_duration = f64::from(end - start).min(1500.0);
        let contribution = DENSITY_BASE + clamped_duration / 150.0;

        let column = &mut density[note.column];

        for value in column[left..right].iter_mut() {
            *value += contribution;
        }

        for idx in left_falloff..left {
            let offset = base_corners[idx] - f64::from(start);
            column[idx] += (DENSITY_BASE - DENSITY_FALLOFF * offset * offset).max(0.0);
        }

        for idx in right..right_falloff {
            let offset = base_corners[idx] - f64::from(end);
            column[idx] += (DENSITY_BASE - DENSITY_FALLOFF * offset * offset).max(0.0);
        }
    }

    density
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        difficulty::corners::CornerGrids,
        model::{chart::Chart, hit_object::HitObject},
    };

    #[test]
    fn active_columns_are_sorted_and_windowed() {
        let chart = Chart::new(
            4,
            8.0,
            vec![HitObject::note(2, 1000.0), HitObject::note(0, 1100.0)],
        );
        let notes = NoteSet::new(&chart, 1.0).unwrap();
        let grids = CornerGrids::new(&notes);
        let key_usage = KeyUsage::new(4, &notes, &grids.base);

        let corner = lower_bound(&grids.base, 1000.0);
        assert_eq!(key_usage.active_columns[corner], vec![0, 2]);

        // far away from any note, nothing is active
        assert!(key_usage.active_columns[0].is_empty());
    }

    #[test]
    fn hold_density_exceeds_tap_density() {
        let tap = Chart::new(2, 8.0, vec![HitObject::note(0, 1000.0)]);
        let hold = Chart::new(2, 8.0, vec![HitObject::hold(0, 1000.0, 600.0)]);

        let tap_notes = NoteSet::new(&tap, 1.0).unwrap();
        let hold_notes = NoteSet::new(&hold, 1.0).unwrap();

        let tap_grids = CornerGrids::new(&tap_notes);
        let hold_grids = CornerGrids::new(&hold_notes);

        let tap_usage = KeyUsage::new(2, &tap_notes, &tap_grids.base);
        let hold_usage = KeyUsage::new(2, &hold_notes, &hold_grids.base);

        let tap_peak = tap_usage.density[0].iter().cloned().fold(0.0, f64::max);
        let hold_peak = hold_usage.density[0].iter().cloned().fold(0.0, f64::max);

        assert!(hold_peak > tap_peak);
    }
}
