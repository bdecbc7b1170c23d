use std::{collections::HashMap, time::Instant};

use crate::{
    calibration::Calibration,
    cross::{CrossMatrix, DefaultCrossMatrix},
    error::{CalculateError, CalculateResult},
    model::{chart::Chart, note::NoteSet},
    util::interp::{interp_values, step_interp},
};

use self::{
    combine::CombineInput,
    corners::CornerGrids,
    key_usage::KeyUsage,
    ln_rep::LnRepresentation,
    skills::{balance, cross, jack::Jack, pattern, release},
};

pub use self::attributes::{DifficultyAttributes, Strains};

mod anchor;
mod attributes;
mod combine;
mod corners;
mod finalize;
mod key_usage;
mod ln_rep;
mod skills;

/// Difficulty calculator on mania charts.
///
/// ```
/// use rebirth_sr::{Chart, Difficulty, HitObject};
///
/// let chart = Chart::new(4, 8.0, vec![HitObject::note(0, 0.0)]);
/// let attrs = Difficulty::new().clock_rate(1.5).calculate(&chart)?;
/// # Ok::<_, rebirth_sr::CalculateError>(())
/// ```
#[derive(Copy, Clone)]
#[must_use]
pub struct Difficulty<'a> {
    clock_rate: f64,
    calibration: Calibration,
    cross_matrix: &'a dyn CrossMatrix,
}

impl<'a> Difficulty<'a> {
    /// Create a new difficulty calculator with the stock calibration and
    /// cross-column interaction table.
    pub fn new() -> Self {
        Self {
            clock_rate: 1.0,
            calibration: Calibration::new(),
            cross_matrix: &DefaultCrossMatrix,
        }
    }

    /// Adjust the clock rate used in the calculation, e.g. 1.5 for DT or
    /// 0.75 for HT.
    ///
    /// If none is specified, the chart is calculated at rate 1.0.
    pub fn clock_rate(self, clock_rate: f64) -> Self {
        Self { clock_rate, ..self }
    }

    /// Use a custom [`Calibration`] instead of the stock constants.
    pub fn calibration(self, calibration: Calibration) -> Self {
        Self {
            calibration,
            ..self
        }
    }

    /// Inject a custom cross-column interaction table.
    pub fn cross_matrix(self, cross_matrix: &'a dyn CrossMatrix) -> Self {
        Self {
            cross_matrix,
            ..self
        }
    }

    /// Perform the difficulty calculation.
    ///
    /// An empty chart is not an error and produces a star rating of `0.0`;
    /// a key count without an interaction-table entry fails with
    /// [`CalculateError::UnsupportedKeyMode`].
    pub fn calculate(&self, chart: &Chart) -> CalculateResult<DifficultyAttributes> {
        let values = DifficultyValues::calculate(self, chart)?;

        let attrs = match values {
            Some(values) => {
                let stars = finalize::finalize(
                    &values.difficulties,
                    &values.weights,
                    values.total_notes,
                    &self.calibration,
                );

                #[cfg(feature = "tracing")]
                if !stars.is_finite() {
                    tracing::warn!(stars, "non-finite star rating");
                }

                DifficultyAttributes {
                    stars,
                    n_objects: values.n_objects,
                    n_hold_notes: values.n_hold_notes,
                }
            }
            None => DifficultyAttributes::default(),
        };

        Ok(attrs)
    }

    /// Same as [`calculate`] but additionally returns a map of diagnostic
    /// stage timings, currently a single `"Total"` entry in elapsed
    /// milliseconds.
    ///
    /// [`calculate`]: Self::calculate
    pub fn calculate_with_timings(
        &self,
        chart: &Chart,
    ) -> CalculateResult<(DifficultyAttributes, HashMap<String, u64>)> {
        let start = Instant::now();
        let attrs = self.calculate(chart)?;

        let mut timings = HashMap::new();
        timings.insert(String::from("Total"), start.elapsed().as_millis() as u64);

        Ok((attrs, timings))
    }

    /// Essentially the same as [`calculate`] but instead of reducing the
    /// local-difficulty curve to one scalar, it returns the curve as is.
    ///
    /// Suitable to plot the difficulty of a chart over time.
    ///
    /// [`calculate`]: Self::calculate
    pub fn strains(&self, chart: &Chart) -> CalculateResult<Strains> {
        let values = DifficultyValues::calculate(self, chart)?;

        Ok(values.map_or_else(Strains::default, |values| Strains {
            corners: values.corners,
            strains: values.difficulties,
            weights: values.weights,
        }))
    }
}

impl Default for Difficulty<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// The hit leniency `x`: the time scale all axis formulas measure their
/// gaps against, derived from the overall difficulty.
fn hit_leniency(overall_difficulty: f64) -> f64 {
    let leniency = 0.3 * ((64.5 - (overall_difficulty * 3.0).ceil()) / 500.0).sqrt();

    leniency.min(0.6 * (leniency - 0.09) + 0.09)
}

struct DifficultyValues {
    corners: Vec<f64>,
    difficulties: Vec<f64>,
    weights: Vec<f64>,
    total_notes: f64,
    n_objects: u32,
    n_hold_notes: u32,
}

impl DifficultyValues {
    /// Runs every pipeline stage up to (but excluding) the finalizer.
    ///
    /// `Ok(None)` is the empty chart.
    fn calculate(difficulty: &Difficulty<'_>, chart: &Chart) -> CalculateResult<Option<Self>> {
        let key_count = chart.key_count;

        let cross_weights = difficulty
            .cross_matrix
            .weights(key_count)
            .ok_or(CalculateError::UnsupportedKeyMode { key_count })?;

        debug_assert_eq!(cross_weights.len(), key_count + 1);

        let notes = match NoteSet::new(chart, difficulty.clock_rate) {
            Some(notes) => notes,
            None => return Ok(None),
        };

        let x = hit_leniency(chart.overall_difficulty);

        let grids = CornerGrids::new(&notes);
        let key_usage = KeyUsage::new(key_count, &notes, &grids.base);
        let anchor = anchor::anchor_curve(key_count, &key_usage, grids.base.len());
        let ln_rep = LnRepresentation::new(&notes.long_notes, notes.total_time);

        let jack = Jack::evaluate(&notes, x, &grids.base);
        let cross_curve = cross::evaluate(
            &notes,
            x,
            &key_usage.active_columns,
            &grids.base,
            cross_weights,
        );
        let pattern_curve = pattern::evaluate(
            &notes,
            x,
            ln_rep.as_ref(),
            &anchor,
            &grids.base,
            difficulty.calibration.ln_integral_multiplier,
        );
        let balance_curve = balance::evaluate(
            &jack.delta,
            &key_usage.active_columns,
            &grids.wide,
            &grids.base,
        );
        let release_curve = release::evaluate(&notes, x, &grids.base);

        let (density_step, key_spread_step) =
            combine::density_and_key_spread(&notes, &key_usage, &grids.base);

        // resample everything onto the combined grid
        let jack_all = interp_values(&grids.all, &grids.base, &jack.curve);
        let cross_all = interp_values(&grids.all, &grids.base, &cross_curve);
        let pattern_all = interp_values(&grids.all, &grids.base, &pattern_curve);
        let balance_all = interp_values(&grids.all, &grids.wide, &balance_curve);
        let release_all = interp_values(&grids.all, &grids.base, &release_curve);
        let density = step_interp(&grids.all, &grids.base, &density_step);
        let key_spread = step_interp(&grids.all, &grids.base, &key_spread_step);

        let difficulties = combine::local_difficulties(
            &CombineInput {
                jack: &jack_all,
                cross: &cross_all,
                pattern: &pattern_all,
                balance: &balance_all,
                release: &release_all,
                density: &density,
                key_spread: &key_spread,
            },
            grids.all.len(),
        );

        let weights: Vec<_> = combine::local_gaps(&grids.all)
            .iter()
            .zip(density.iter())
            .map(|(&gap, &c)| c * gap)
            .collect();

        // holds count towards the effective note count by their capped length
        let hold_bonus: f64 = notes
            .long_notes
            .iter()
            .map(|n| 0.5 * f64::from(n.tail - n.head).min(1000.0) / 200.0)
            .sum();

        Ok(Some(Self {
            corners: grids.all,
            difficulties,
            weights,
            total_notes: notes.notes.len() as f64 + hold_bonus,
            n_objects: notes.notes.len() as u32,
            n_hold_notes: notes.long_notes.len() as u32,
        }))
    }
}
