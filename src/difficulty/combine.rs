//! Merges the five axis curves into one weighted local-difficulty curve on
//! the combined grid.

use crate::{model::note::NoteSet, util::bisect::lower_bound};

use super::key_usage::KeyUsage;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The resampled axis curves and per-corner weighting series, all
/// index-aligned with the combined grid.
pub(crate) struct CombineInput<'c> {
    pub jack: &'c [f64],
    pub cross: &'c [f64],
    pub pattern: &'c [f64],
    pub balance: &'c [f64],
    pub release: &'c [f64],
    /// Local note density: note count in a ±500 ms window.
    pub density: &'c [f64],
    /// Simultaneous-active-column count, floored at 1.
    pub key_spread: &'c [f64],
}

/// Note-count density `c` and active-column count `ks` as step series on
/// the base grid.
pub(crate) fn density_and_key_spread(
    notes: &NoteSet,
    key_usage: &KeyUsage,
    base_corners: &[f64],
) -> (Vec<f64>, Vec<f64>) {
    let note_times: Vec<f64> = notes.notes.iter().map(|n| f64::from(n.head)).collect();

    let mut density = Vec::with_capacity(base_corners.len());
    let mut key_spread = Vec::with_capacity(base_corners.len());

    for (idx, &corner) in base_corners.iter().enumerate() {
        let left = lower_bound(&note_times, corner - 500.0);
        let right = lower_bound(&note_times, corner + 500.0);
        density.push((right - left) as f64);

        let active = key_usage.usage.iter().filter(|column| column[idx]).count();
        key_spread.push(active.max(1) as f64);
    }

    (density, key_spread)
}

/// Half the distance between each corner's neighbors; the sample spacing
/// part of the effective weight.
pub(crate) fn local_gaps(corners: &[f64]) -> Vec<f64> {
    match corners.len() {
        0 => Vec::new(),
        1 => vec![0.0],
        len => {
            let mut gaps = Vec::with_capacity(len);
            gaps.push((corners[1] - corners[0]) / 2.0);

            for window in corners.windows(3) {
                gaps.push((window[2] - window[0]) / 2.0);
            }

            gaps.push((corners[len - 1] - corners[len - 2]) / 2.0);

            gaps
        }
    }
}

/// The local difficulty value per corner of the combined grid.
pub(crate) fn local_difficulties(input: &CombineInput<'_>, len: usize) -> Vec<f64> {
    let corners = 0..len;

    #[cfg(feature = "parallel")]
    let difficulties = corners.into_par_iter().map(|i| local_difficulty(input, i)).collect();

    #[cfg(not(feature = "parallel"))]
    let difficulties = corners.map(|i| local_difficulty(input, i)).collect();

    difficulties
}

fn local_difficulty(input: &CombineInput<'_>, i: usize) -> f64 {
    let balance_pow = pow_pos(input.balance[i], 3.0 / input.key_spread[i].max(1e-6));

    // same-hand jack stamina, capped so extreme jack values saturate
    let capped_jack = input.jack[i].min(8.0 + 0.85 * input.jack[i]);
    let jack_term = 0.4 * pow_pos(balance_pow * capped_jack, 1.5);

    // stream pressure with the release term damped by local density
    let pattern_component = 0.8 * input.pattern[i] + input.release[i] * 35.0 / (input.density[i] + 8.0);
    let pattern_term = 0.6 * pow_pos(pow_pos(input.balance[i], 2.0 / 3.0) * pattern_component, 1.5);

    let s = pow_pos(jack_term + pattern_term, 2.0 / 3.0);

    let denominator = input.cross[i] + s + 1.0;
    let t = if denominator <= 0.0 {
        0.0
    } else {
        balance_pow * input.cross[i] / denominator
    };

    2.7 * s.max(0.0).sqrt() * pow_pos(t, 1.5) + 0.27 * s
}

fn pow_pos(base: f64, exponent: f64) -> f64 {
    if base <= 0.0 {
        0.0
    } else {
        base.powf(exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaps_average_neighbor_distances() {
        let corners = [0.0, 10.0, 30.0, 60.0];

        assert_eq!(local_gaps(&corners), vec![5.0, 15.0, 25.0, 15.0]);
        assert_eq!(local_gaps(&[42.0]), vec![0.0]);
        assert!(local_gaps(&[]).is_empty());
    }

    #[test]
    fn silent_corners_have_zero_difficulty() {
        let zeros = vec![0.0; 3];
        let ones = vec![1.0; 3];

        let input = CombineInput {
            jack: &zeros,
            cross: &zeros,
            pattern: &zeros,
            balance: &zeros,
            release: &zeros,
            density: &zeros,
            key_spread: &ones,
        };

        assert_eq!(local_difficulties(&input, 3), vec![0.0; 3]);
    }

    #[test]
    fn more_pattern_pressure_means_more_difficulty() {
        let low = vec![1.0; 1];
        let high = vec![3.0; 1];
        let balance = vec![1.0; 1];
        let zeros = vec![0.0; 1];
        let ones = vec![1.0; 1];

        let difficulty = |pattern: &[f64]| {
            let input = CombineInput {
                jack: &zeros,
                cross: &ones,
                pattern,
                balance: &balance,
                release: &zeros,
                density: &ones,
                key_spread: &ones,
            };

            local_difficulties(&input, 1)[0]
        };

        assert!(difficulty(&high) > difficulty(&low));
    }
}
