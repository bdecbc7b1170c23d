/// All hitobject related data required for the difficulty calculation.
///
/// Positions are given as a column index and a start time in milliseconds;
/// hold notes additionally carry a duration. Timings may be fractional,
/// they are normalized to integer milliseconds by the calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct HitObject {
    /// The column the object is placed in.
    ///
    /// Out-of-range columns are clamped into `[0, key_count)`.
    pub column: usize,
    /// The time at which the object must be hit, in milliseconds.
    pub start_time: f64,
    pub kind: HitObjectKind,
}

/// Additional data of a [`HitObject`] depending on its type.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HitObjectKind {
    /// A simple tap note.
    Note,
    /// A hold note requiring sustained input.
    ///
    /// A non-positive duration is treated as a tap note.
    Hold {
        /// Length of the hold in milliseconds.
        duration: f64,
    },
}

impl HitObject {
    /// A tap note on the given column.
    pub const fn note(column: usize, start_time: f64) -> Self {
        Self {
            column,
            start_time,
            kind: HitObjectKind::Note,
        }
    }

    /// A hold note on the given column.
    pub const fn hold(column: usize, start_time: f64, duration: f64) -> Self {
        Self {
            column,
            start_time,
            kind: HitObjectKind::Hold { duration },
        }
    }

    /// Whether the hitobject is a hold note.
    pub const fn is_hold_note(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Hold { .. })
    }

    /// The end time of the object.
    pub fn end_time(&self) -> f64 {
        match self.kind {
            HitObjectKind::Note => self.start_time,
            HitObjectKind::Hold { duration } => self.start_time + duration,
        }
    }
}
