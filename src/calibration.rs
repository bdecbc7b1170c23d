/// Calibration constants of the final rating.
///
/// These are the only two tunable values of the algorithm: both rescale the
/// output without changing the shape of the pipeline, so downstream tooling
/// can recalibrate ratings without touching any of the difficulty math.
///
/// All other constants (window radii, axis weights, percentile thresholds)
/// are part of the frozen contract for reproducing existing ratings.
#[derive(Copy, Clone, Debug, PartialEq)]
#[must_use]
pub struct Calibration {
    /// Ratings above this threshold are compressed towards it.
    ///
    /// A final value `sr > threshold` becomes `threshold + (sr - threshold) / 1.2`.
    pub rescale_high_threshold: f64,
    /// Multiplier of the long-note body integral that boosts the
    /// stream-pressure axis.
    pub ln_integral_multiplier: f64,
}

impl Calibration {
    pub const DEFAULT_RESCALE_HIGH_THRESHOLD: f64 = 9.0;
    pub const DEFAULT_LN_INTEGRAL_MULTIPLIER: f64 = 6.0;

    /// The stock calibration.
    pub const fn new() -> Self {
        Self {
            rescale_high_threshold: Self::DEFAULT_RESCALE_HIGH_THRESHOLD,
            ln_integral_multiplier: Self::DEFAULT_LN_INTEGRAL_MULTIPLIER,
        }
    }

    /// Adjust the high-end rescale threshold.
    pub const fn rescale_high_threshold(mut self, threshold: f64) -> Self {
        self.rescale_high_threshold = threshold;

        self
    }

    /// Adjust the long-note integral multiplier.
    pub const fn ln_integral_multiplier(mut self, multiplier: f64) -> Self {
        self.ln_integral_multiplier = multiplier;

        self
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::new()
    }
}
