use super::key_usage::KeyUsage;

/// The per-corner multiplier rewarding anchor-shaped density profiles
/// across the simultaneously active columns.
///
/// For each corner the column densities are sorted descending and zeros
/// dropped; adjacent pairs accumulate `current * damping` with
/// `damping = 1 - 4 * (0.5 - next / current)^2` against the plain sum, and
/// the resulting ratio is mapped through a cubic soft knee. The damping
/// peaks when the next column carries half the current one's density (the
/// anchored shape) and vanishes when both densities match.
pub(crate) fn anchor_curve(key_count: usize, key_usage: &KeyUsage, len: usize) -> Vec<f64> {
    let mut anchor = Vec::with_capacity(len);
    let mut counts = vec![0.0; key_count];

    for corner in 0..len {
        for (count, column) in counts.iter_mut().zip(key_usage.density.iter()) {
            *count = column[corner];
        }

        counts.sort_unstable_by(|a, b| b.total_cmp(a));

        let non_zero = counts.iter().take_while(|&&count| count > 0.0).count();

        if non_zero <= 1 {
            anchor.push(0.0);
            continue;
        }

        let mut walk = 0.0;
        let mut max_walk = 0.0;

        for pair in counts[..non_zero].windows(2) {
            let (current, next) = (pair[0], pair[1]);
            let offset = 0.5 - next / current;
            walk += current * (1.0 - 4.0 * offset * offset);
            max_walk += current;
        }

        let value = if max_walk <= 0.0 { 0.0 } else { walk / max_walk };
        let knee = (value - 0.22).powi(3) * 5.0;

        anchor.push(1.0 + (value - 0.18).min(knee));
    }

    anchor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        difficulty::corners::CornerGrids,
        model::{chart::Chart, hit_object::HitObject, note::NoteSet},
        util::bisect::lower_bound,
    };

    /// The anchor value at time 1000 ms.
    fn anchor_at_1000(hit_objects: Vec<HitObject>) -> f64 {
        let chart = Chart::new(4, 8.0, hit_objects);
        let notes = NoteSet::new(&chart, 1.0).unwrap();
        let grids = CornerGrids::new(&notes);
        let key_usage = KeyUsage::new(4, &notes, &grids.base);

        let anchor = anchor_curve(4, &key_usage, grids.base.len());

        anchor[lower_bound(&grids.base, 1000.0)]
    }

    #[test]
    fn single_active_column_has_no_anchor() {
        assert_eq!(anchor_at_1000(vec![HitObject::note(1, 1000.0)]), 0.0);
    }

    #[test]
    fn half_ratio_densities_anchor_higher_than_matched_ones() {
        // identical densities: the damping is zero at ratio 1, so the
        // multiplier drops below neutral
        let matched = anchor_at_1000(vec![
            HitObject::note(0, 1000.0),
            HitObject::note(1, 1000.0),
        ]);

        // column 1 carries about half of column 0's density, the ratio the
        // damping peaks at
        let anchored = anchor_at_1000(vec![
            HitObject::note(0, 950.0),
            HitObject::note(0, 1050.0),
            HitObject::note(1, 1000.0),
        ]);

        assert!(matched < 1.0, "{}", matched);
        assert!(anchored > matched, "{} <= {}", anchored, matched);
    }
}
