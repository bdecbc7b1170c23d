use std::{error::Error as StdError, fmt};

/// `Result<_, CalculateError>`
pub type CalculateResult<T> = Result<T, CalculateError>;

/// Anything that could go wrong while calculating the star rating of a
/// [`Chart`](crate::Chart).
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum CalculateError {
    /// The chart's key count has no entry in the cross-column interaction
    /// table.
    ///
    /// This aborts the whole calculation before any pipeline stage runs;
    /// no default table is ever substituted.
    UnsupportedKeyMode {
        /// The offending key count.
        key_count: usize,
    },
}

impl fmt::Display for CalculateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedKeyMode { key_count } => {
                write!(f, "key mode {}k is not supported", key_count)
            }
        }
    }
}

impl StdError for CalculateError {}
