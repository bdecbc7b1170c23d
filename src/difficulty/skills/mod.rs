//! The five independent local-difficulty axes.
//!
//! Each skill produces one curve per corner of the base grid (the balance
//! skill uses the wide grid) by spreading per-event contributions over the
//! bracketing corners and smoothing the result with the shared box kernel.

pub mod balance;
pub mod cross;
pub mod jack;
pub mod pattern;
pub mod release;

/// Floor applied to time deltas before division.
pub(crate) const DELTA_FLOOR: f64 = 1e-6;
