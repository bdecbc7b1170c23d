/// Per-key-count lookup table of cross-column interaction weights.
///
/// For a chart with `K` columns the table supplies `K + 1` weights in
/// `[0, 1]`, one per column boundary (including the two edges): how much a
/// same-time event across boundary `k` counts as technical cross-play
/// rather than an ordinary two-hand pattern.
///
/// The table is injected into [`Difficulty`](crate::Difficulty) so that new
/// key modes can be supported without touching the estimator itself. A key
/// count without an entry fails the whole calculation with
/// [`UnsupportedKeyMode`](crate::CalculateError::UnsupportedKeyMode).
pub trait CrossMatrix {
    /// The boundary weights for the given key count or `None` if the key
    /// mode is unsupported.
    ///
    /// Implementations must return exactly `key_count + 1` weights.
    fn weights(&self, key_count: usize) -> Option<&[f64]>;
}

/// The stock cross-column interaction table.
///
/// Supports key counts 1 through 10 as well as the even modes 12, 14, 16
/// and 18. Odd key modes above 10 have no boundary entry and are rejected.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DefaultCrossMatrix;

impl CrossMatrix for DefaultCrossMatrix {
    fn weights(&self, key_count: usize) -> Option<&[f64]> {
        let weights: &[f64] = match key_count {
            1 => &[0.075, 0.075],
            2 => &[0.125, 0.05, 0.125],
            3 => &[0.125, 0.125, 0.125, 0.125],
            4 => &[0.175, 0.25, 0.05, 0.25, 0.175],
            5 => &[0.175, 0.25, 0.175, 0.175, 0.25, 0.175],
            6 => &[0.225, 0.35, 0.25, 0.05, 0.25, 0.35, 0.225],
            7 => &[0.225, 0.35, 0.25, 0.225, 0.225, 0.25, 0.35, 0.225],
            8 => &[0.275, 0.45, 0.35, 0.25, 0.05, 0.25, 0.35, 0.45, 0.275],
            9 => &[0.3, 0.45, 0.35, 0.25, 0.275, 0.275, 0.25, 0.35, 0.45, 0.3],
            10 => &[
                0.425, 0.55, 0.45, 0.35, 0.25, 0.05, 0.25, 0.35, 0.45, 0.55, 0.425,
            ],
            12 => &[
                0.8, 0.8, 0.8, 0.6, 0.4, 0.2, 0.05, 0.2, 0.4, 0.6, 0.8, 0.8, 0.8,
            ],
            14 => &[
                0.4, 0.4, 0.2, 0.2, 0.3, 0.3, 0.1, 0.1, 0.3, 0.3, 0.2, 0.2, 0.4, 0.4, 0.4,
            ],
            16 => &[
                0.4, 0.4, 0.2, 0.2, 0.4, 0.4, 0.2, 0.1, 0.1, 0.2, 0.4, 0.4, 0.2, 0.2, 0.4, 0.4,
                0.4,
            ],
            18 => &[
                0.4, 0.4, 0.2, 0.4, 0.2, 0.4, 0.2, 0.3, 0.1, 0.1, 0.3, 0.2, 0.4, 0.2, 0.4, 0.2,
                0.4, 0.4, 0.4,
            ],
            _ => return None,
        };

        Some(weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_table_lengths() {
        let table = DefaultCrossMatrix;

        for key_count in (1..=10).chain([12, 14, 16, 18].iter().copied()) {
            let weights = table.weights(key_count).unwrap();
            assert_eq!(weights.len(), key_count + 1, "key count {}", key_count);
        }
    }

    #[test]
    fn odd_high_key_modes_unsupported() {
        let table = DefaultCrossMatrix;

        for key_count in [0, 11, 13, 15, 17, 19, 20].iter().copied() {
            assert!(table.weights(key_count).is_none(), "key count {}", key_count);
        }
    }
}
