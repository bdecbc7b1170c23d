//! Inter-column balance: a multiplicative penalty when two adjacent active
//! columns run at nearly the same local gap (easier to play as one hand
//! motion).
//!
//! The only axis evaluated on the wide grid, smoothed with a plain average
//! kernel instead of the sum kernel.

use crate::util::{
    bisect::lower_bound,
    smooth::{smooth_on_corners, Kernel},
};

/// The balance curve on the wide grid.
///
/// `delta` is the per-column minimum-gap matrix produced by the jack skill
/// (indexed on the base grid).
pub(crate) fn evaluate(
    delta: &[Vec<f64>],
    active_columns: &[Vec<usize>],
    wide_corners: &[f64],
    base_corners: &[f64],
) -> Vec<f64> {
    let mut step = vec![1.0; wide_corners.len()];

    for (i, &corner) in wide_corners.iter().enumerate() {
        let idx = lower_bound(base_corners, corner).min(base_corners.len() - 1);
        let columns = &active_columns[idx];

        if columns.len() < 2 {
            continue;
        }

        for pair in columns.windows(2) {
            let d0 = delta[pair[0]][idx];
            let d1 = delta[pair[1]][idx];

            let max_delta = d0.max(d1);
            let diff = (d0 - d1).abs() + 0.4 * (max_delta - 0.11).max(0.0);

            if diff < 0.02 {
                step[i] *= (0.75 + 0.5 * max_delta).min(1.0);
            } else if diff < 0.07 {
                step[i] *= (0.65 + 5.0 * diff + 0.5 * max_delta).min(1.0);
            }
        }
    }

    smooth_on_corners(wide_corners, &step, 250.0, Kernel::Average)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matched_gaps_are_penalized() {
        let base = [0.0, 500.0, 1000.0];
        let wide = [0.0, 500.0, 1000.0];
        let active = vec![vec![0, 1], vec![0, 1], vec![0, 1]];

        // identical fast gaps in both columns
        let matched = vec![vec![0.08; 3], vec![0.08; 3]];
        // clearly distinct gaps
        let distinct = vec![vec![0.08; 3], vec![0.25; 3]];

        let penalized = evaluate(&matched, &active, &wide, &base);
        let free = evaluate(&distinct, &active, &wide, &base);

        assert!(penalized[1] < 1.0);
        assert!((free[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_active_column_is_neutral() {
        let base = [0.0, 1000.0];
        let wide = [0.0, 1000.0];
        let active = vec![vec![0], vec![0]];
        let delta = vec![vec![0.1; 2], vec![1e9; 2]];

        let curve = evaluate(&delta, &active, &wide, &base);

        assert!(curve.iter().all(|&v| (v - 1.0).abs() < 1e-12));
    }
}
