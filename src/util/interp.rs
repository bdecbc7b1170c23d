//! Resampling of axis curves between corner grids.

use super::{
    bisect::{lower_bound, upper_bound},
    float_ext::FloatExt,
};

/// Piecewise-linear interpolation of `(old_x, old_vals)` onto `new_x`.
///
/// Queries outside the source grid clamp to the edge values; exact matches
/// return the stored value, everything else blends linearly between the
/// bracketing samples.
pub fn interp_values(new_x: &[f64], old_x: &[f64], old_vals: &[f64]) -> Vec<f64> {
    debug_assert_eq!(old_x.len(), old_vals.len());
    debug_assert!(!old_x.is_empty());

    let mut result = Vec::with_capacity(new_x.len());

    let first = old_x[0];
    let last = old_x[old_x.len() - 1];

    for &x in new_x.iter() {
        if x <= first {
            result.push(old_vals[0]);
            continue;
        } else if x >= last {
            result.push(old_vals[old_vals.len() - 1]);
            continue;
        }

        let idx = lower_bound(old_x, x);

        if idx < old_x.len() && old_x[idx].almost_eq(x) {
            result.push(old_vals[idx]);
            continue;
        }

        let prev = idx.saturating_sub(1);
        let (x0, x1) = (old_x[prev], old_x[idx]);
        let (y0, y1) = (old_vals[prev], old_vals[idx]);

        result.push(y0 + (y1 - y0) * (x - x0) / (x1 - x0));
    }

    result
}

/// Step interpolation for discrete series: every query takes the value of
/// the last sample at or before it.
pub fn step_interp(new_x: &[f64], old_x: &[f64], old_vals: &[f64]) -> Vec<f64> {
    debug_assert_eq!(old_x.len(), old_vals.len());
    debug_assert!(!old_vals.is_empty());

    new_x
        .iter()
        .map(|&x| {
            let idx = upper_bound(old_x, x).saturating_sub(1);

            old_vals[idx.min(old_vals.len() - 1)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_midpoint_and_exact_match() {
        let old_x = [0.0, 10.0, 20.0];
        let old_vals = [0.0, 100.0, 0.0];

        let out = interp_values(&[5.0, 10.0, 15.0], &old_x, &old_vals);

        assert!((out[0] - 50.0).abs() < 1e-12);
        assert!((out[1] - 100.0).abs() < 1e-12);
        assert!((out[2] - 50.0).abs() < 1e-12);
    }

    #[test]
    fn linear_clamps_at_edges() {
        let old_x = [10.0, 20.0];
        let old_vals = [3.0, 7.0];

        let out = interp_values(&[0.0, 30.0], &old_x, &old_vals);

        assert_eq!(out, vec![3.0, 7.0]);
    }

    #[test]
    fn step_holds_previous_sample() {
        let old_x = [0.0, 10.0, 20.0];
        let old_vals = [1.0, 2.0, 3.0];

        let out = step_interp(&[-5.0, 0.0, 9.9, 10.0, 25.0], &old_x, &old_vals);

        assert_eq!(out, vec![1.0, 1.0, 1.0, 2.0, 3.0]);
    }
}
