/// The result of a difficulty calculation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DifficultyAttributes {
    /// The final star rating.
    pub stars: f64,
    /// The amount of hitobjects in the chart.
    pub n_objects: u32,
    /// The amount of hold notes in the chart.
    pub n_hold_notes: u32,
}

impl DifficultyAttributes {
    /// The final star rating.
    pub const fn stars(&self) -> f64 {
        self.stars
    }

    /// The amount of hitobjects in the chart.
    pub const fn n_objects(&self) -> u32 {
        self.n_objects
    }

    /// The amount of hold notes in the chart.
    pub const fn n_hold_notes(&self) -> u32 {
        self.n_hold_notes
    }
}

/// The local-difficulty curve of a chart.
///
/// Produced by [`Difficulty::strains`].
///
/// [`Difficulty::strains`]: crate::Difficulty::strains
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Strains {
    /// Timestamps in milliseconds at which the curve is sampled.
    pub corners: Vec<f64>,
    /// The local difficulty at each corner.
    pub strains: Vec<f64>,
    /// The aggregation weight of each corner.
    pub weights: Vec<f64>,
}
