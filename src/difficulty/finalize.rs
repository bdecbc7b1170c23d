//! Reduces the weighted local-difficulty curve to the final star rating.

use crate::{calibration::Calibration, util::bisect::lower_bound};

/// Normalized cumulative-weight thresholds of the two percentile reads.
const P93_TARGETS: [f64; 4] = [0.945, 0.935, 0.925, 0.915];
const P83_TARGETS: [f64; 4] = [0.845, 0.835, 0.825, 0.815];

/// Blends percentile reads and a weighted 5th-power mean of the difficulty
/// curve, scales by the effective note count and applies the high-end
/// rescale.
///
/// `total_notes` counts taps as 1 and holds as `0.5 * min(length, 1000) / 200`.
pub(crate) fn finalize(
    difficulties: &[f64],
    weights: &[f64],
    total_notes: f64,
    calibration: &Calibration,
) -> f64 {
    debug_assert_eq!(difficulties.len(), weights.len());

    if difficulties.is_empty() {
        return 0.0;
    }

    let mut sorted: Vec<(f64, f64)> = difficulties
        .iter()
        .zip(weights.iter())
        .map(|(&d, &w)| (d, w.max(0.0)))
        .collect();

    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut cumulative = Vec::with_capacity(sorted.len());
    let mut running = 0.0;

    for &(_, weight) in sorted.iter() {
        running += weight;
        cumulative.push(running);
    }

    let total_weight = running.max(1e-9);

    let norm: Vec<f64> = cumulative.iter().map(|&w| w / total_weight).collect();

    let percentile = |targets: &[f64]| {
        let sum: f64 = targets
            .iter()
            .map(|&target| {
                let idx = lower_bound(&norm, target).min(sorted.len() - 1);

                sorted[idx].0
            })
            .sum();

        sum / targets.len() as f64
    };

    let p93 = percentile(&P93_TARGETS);
    let p83 = percentile(&P83_TARGETS);

    let power_sum: f64 = sorted.iter().map(|&(d, w)| d.powi(5) * w).sum();
    let weighted_mean = (power_sum / total_weight).max(0.0).powf(0.2);

    let mut sr = 0.25 * 0.88 * p93 + 0.2 * 0.94 * p83 + 0.55 * weighted_mean;

    sr *= total_notes / (total_notes + 60.0);
    sr = rescale_high(sr, calibration.rescale_high_threshold);

    sr * 0.975
}

/// Compresses ratings beyond the threshold: `thr + (sr - thr) / 1.2`.
fn rescale_high(sr: f64, threshold: f64) -> f64 {
    if sr <= threshold {
        sr
    } else {
        threshold + (sr - threshold) / 1.2
    }
}
