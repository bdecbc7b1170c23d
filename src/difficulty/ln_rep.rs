use std::collections::BTreeMap;

use crate::{model::note::Note, util::bisect::upper_bound};

/// Piecewise step function over time describing how much hold-note body is
/// being sustained.
///
/// Every hold contributes `+1.3` at `head + 60`, `-0.3` at `head + 120`
/// (both clamped to the tail) and `-1` at the tail; the running value is
/// soft-capped so stacked holds saturate instead of growing linearly. A
/// prefix-sum table answers range integrals in `O(log n)`.
pub(crate) struct LnRepresentation {
    points: Vec<i32>,
    cumulative: Vec<f64>,
    values: Vec<f64>,
}

impl LnRepresentation {
    /// Builds the step function, or `None` if the chart has no holds.
    pub(crate) fn new(long_notes: &[Note], total_time: i32) -> Option<Self> {
        if long_notes.is_empty() {
            return None;
        }

        let mut deltas = BTreeMap::new();

        for note in long_notes.iter() {
            let t0 = (note.head + 60).min(note.tail);
            let t1 = (note.head + 120).min(note.tail);

            *deltas.entry(t0).or_insert(0.0) += 1.3;
            *deltas.entry(t1).or_insert(0.0) += -0.3;
            *deltas.entry(note.tail).or_insert(0.0) += -1.0;
        }

        let mut points: Vec<_> = deltas.keys().copied().collect();

        for &endpoint in [0, total_time].iter() {
            if let Err(idx) = points.binary_search(&endpoint) {
                points.insert(idx, endpoint);
            }
        }

        let mut cumulative = vec![0.0; points.len()];
        let mut values = vec![0.0; points.len() - 1];
        let mut current = 0.0_f64;

        for i in 0..points.len() - 1 {
            if let Some(delta) = deltas.get(&points[i]) {
                current += delta;
            }

            let transformed = current.min(2.5 + 0.5 * current);
            values[i] = transformed;

            let width = f64::from(points[i + 1] - points[i]);
            cumulative[i + 1] = cumulative[i] + width * transformed;
        }

        Some(Self {
            points,
            cumulative,
            values,
        })
    }

    /// The integral of the step function over `[a, b]`.
    pub(crate) fn integral(&self, a: i32, b: i32) -> f64 {
        debug_assert!(a <= b);

        let last = self.values.len() - 1;
        let start = upper_bound(&self.points, a).saturating_sub(1).min(last);
        let end = upper_bound(&self.points, b).saturating_sub(1).min(last).max(start);

        if start == end {
            return f64::from(b - a) * self.values[start];
        }

        let mut total = f64::from(self.points[start + 1] - a) * self.values[start];
        total += self.cumulative[end] - self.cumulative[start + 1];
        total += f64::from(b - self.points[end]) * self.values[end];

        total
    }
}
