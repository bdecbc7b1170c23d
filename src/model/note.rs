use std::cmp;

use crate::model::chart::Chart;

/// A single normalized note.
///
/// Times are integer milliseconds, already divided by the clock rate. A
/// tap note carries the tail sentinel `-1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Note {
    pub column: usize,
    pub head: i32,
    pub tail: i32,
}

impl Note {
    pub(crate) const fn is_long(&self) -> bool {
        self.tail > self.head
    }

    fn cmp_by_head(&self, other: &Self) -> cmp::Ordering {
        self.head
            .cmp(&other.head)
            .then_with(|| self.column.cmp(&other.column))
    }
}

/// The flat, immutable note table every pipeline stage reads from.
///
/// Built once per calculation; ordering key of all sequences except
/// [`tails`](Self::tails) is `(head, column)`.
pub(crate) struct NoteSet {
    /// Every note of the chart.
    pub notes: Vec<Note>,
    /// One ordered sub-sequence per column.
    pub by_column: Vec<Vec<Note>>,
    /// All hold notes, ordered like [`notes`](Self::notes).
    pub long_notes: Vec<Note>,
    /// All hold notes, ordered by tail time.
    pub tails: Vec<Note>,
    /// One past the last head or tail time of the chart.
    pub total_time: i32,
}

impl NoteSet {
    /// Normalizes the chart's hitobjects, or `None` if the chart is empty.
    ///
    /// Each time is divided by the clock rate and rounded to the nearest
    /// integer millisecond (ties to even); a tail not strictly greater than
    /// its head collapses to a tap.
    pub(crate) fn new(chart: &Chart, clock_rate: f64) -> Option<Self> {
        if chart.hit_objects.is_empty() {
            return None;
        }

        let key_count = chart.key_count;
        let mut notes = Vec::with_capacity(chart.hit_objects.len());
        let mut by_column = vec![Vec::new(); key_count];

        for h in chart.hit_objects.iter() {
            let column = cmp::min(h.column, key_count - 1);
            let head = (h.start_time / clock_rate).round_ties_even() as i32;
            let mut tail = if h.is_hold_note() {
                (h.end_time() / clock_rate).round_ties_even() as i32
            } else {
                -1
            };

            if tail <= head {
                tail = -1;
            }

            let note = Note { column, head, tail };
            notes.push(note);
            by_column[column].push(note);
        }

        notes.sort_unstable_by(Note::cmp_by_head);

        for column_notes in by_column.iter_mut() {
            column_notes.sort_unstable_by(Note::cmp_by_head);
        }

        let long_notes: Vec<_> = notes.iter().copied().filter(Note::is_long).collect();

        let mut tails = long_notes.clone();
        tails.sort_by_key(|n| n.tail);

        let max_head = notes.iter().map(|n| n.head).max()?;
        let max_tail = long_notes.iter().map(|n| n.tail).max().unwrap_or(max_head);
        let total_time = cmp::max(max_head, max_tail) + 1;

        Some(Self {
            notes,
            by_column,
            long_notes,
            tails,
            total_time,
        })
    }
}
