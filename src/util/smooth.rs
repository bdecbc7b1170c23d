//! The shared box-kernel smoothing operator.
//!
//! Every axis turns its sparse per-event contributions into a continuous
//! curve through this single primitive: a piecewise-constant cumulative
//! integral over the corner grid, queried over a clipped window around
//! each corner.

use super::{bisect::lower_bound, float_ext::FloatExt};

/// How the windowed integral is reduced to the corner's value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Kernel {
    /// The raw integral scaled by a constant.
    Sum { scale: f64 },
    /// The integral divided by the window width.
    Average,
}

/// Smooths `values` (defined on `positions`) over `[corner - window, corner + window]`.
///
/// `positions` must be strictly increasing; `values[i]` is the constant
/// value of the segment starting at `positions[i]`.
pub fn smooth_on_corners(positions: &[f64], values: &[f64], window: f64, kernel: Kernel) -> Vec<f64> {
    debug_assert_eq!(positions.len(), values.len());

    if positions.is_empty() {
        return Vec::new();
    }

    let cumulative = build_cumulative(positions, values);
    let mut output = Vec::with_capacity(positions.len());

    let first = positions[0];
    let last = positions[positions.len() - 1];

    for &corner in positions.iter() {
        let a = (corner - window).max(first);
        let b = (corner + window).min(last);

        if b <= a {
            output.push(0.0);
            continue;
        }

        let integral = query_integral(positions, &cumulative, values, b)
            - query_integral(positions, &cumulative, values, a);

        let smoothed = match kernel {
            Kernel::Sum { scale } => integral * scale,
            Kernel::Average => integral / (b - a).max(1e-9),
        };

        output.push(smoothed);
    }

    output
}

fn build_cumulative(positions: &[f64], values: &[f64]) -> Vec<f64> {
    let mut cumulative = vec![0.0; positions.len()];

    for i in 1..positions.len() {
        let width = positions[i] - positions[i - 1];
        cumulative[i] = cumulative[i - 1] + values[i - 1] * width;
    }

    cumulative
}

fn query_integral(positions: &[f64], cumulative: &[f64], values: &[f64], point: f64) -> f64 {
    if point <= positions[0] {
        return 0.0;
    } else if point >= positions[positions.len() - 1] {
        return cumulative[cumulative.len() - 1];
    }

    let idx = lower_bound(positions, point);

    if idx < positions.len() && positions[idx].almost_eq(point) {
        return cumulative[idx];
    }

    let prev = idx.saturating_sub(1);

    cumulative[prev] + values[prev] * (point - positions[prev])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_kernel_integrates_window() {
        // constant value 2 over [0, 1000], window ±500 at the midpoint
        let positions = [0.0, 500.0, 1000.0];
        let values = [2.0, 2.0, 2.0];

        let smoothed = smooth_on_corners(&positions, &values, 500.0, Kernel::Sum { scale: 0.001 });

        // full window: integral 2000 * 0.001
        assert!((smoothed[1] - 2.0).abs() < 1e-12);
        // clipped halves at the ends: integral 1000 * 0.001
        assert!((smoothed[0] - 1.0).abs() < 1e-12);
        assert!((smoothed[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn average_kernel_divides_by_width() {
        let positions = [0.0, 250.0, 1000.0];
        let values = [4.0, 4.0, 4.0];

        let smoothed = smooth_on_corners(&positions, &values, 250.0, Kernel::Average);

        for &value in smoothed.iter() {
            assert!((value - 4.0).abs() < 1e-12);
        }
    }

    #[test]
    fn empty_grid() {
        assert!(smooth_on_corners(&[], &[], 500.0, Kernel::Average).is_empty());
    }
}
