use super::hit_object::HitObject;

/// A normalized multi-column note chart, the input of the calculation.
///
/// This is the host-independent description of a mania beatmap: the key
/// count, the overall difficulty (which determines the hit leniency) and
/// the note list. Conversion from a host's object model is the caller's
/// concern.
#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
    /// The amount of columns ("keys") of the chart.
    pub key_count: usize,
    /// The overall difficulty value, typically in `[0, 10]`.
    pub overall_difficulty: f64,
    /// All hitobjects of the chart, in any order.
    pub hit_objects: Vec<HitObject>,
}

impl Chart {
    pub const fn new(
        key_count: usize,
        overall_difficulty: f64,
        hit_objects: Vec<HitObject>,
    ) -> Self {
        Self {
            key_count,
            overall_difficulty,
            hit_objects,
        }
    }

    /// The amount of hitobjects.
    pub fn len(&self) -> usize {
        self.hit_objects.len()
    }

    /// Whether the chart contains no hitobjects.
    ///
    /// An empty chart is not an error; its star rating is `0.0`.
    pub fn is_empty(&self) -> bool {
        self.hit_objects.is_empty()
    }
}
