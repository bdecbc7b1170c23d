//! Library to calculate the difficulty ("star rating") of osu!mania charts.
//!
//! ## Description
//!
//! `rebirth-sr` is a port of the *Star Rating Rebirth* algorithm: a
//! deterministic numerical pipeline that consumes a multi-column note chart
//! and produces a single scalar difficulty value. The calculation evaluates
//! five local-difficulty curves (jack, cross, pattern, balance, release) on
//! non-uniform time grids, smooths them with a shared box-kernel operator,
//! merges them per time point and reduces the weighted curve through
//! percentile blending and a weighted power mean.
//!
//! The pipeline is a pure function of its inputs: repeated calls with the
//! same chart, clock rate and calibration return bit-identical results.
//!
//! ## Usage
//!
//! ```
//! use rebirth_sr::{Chart, Difficulty, HitObject};
//!
//! let hit_objects = vec![
//!     HitObject::note(0, 0.0),
//!     HitObject::hold(1, 125.0, 500.0),
//!     HitObject::note(2, 250.0),
//!     HitObject::note(3, 375.0),
//! ];
//!
//! // 4 keys, OD 8
//! let chart = Chart::new(4, 8.0, hit_objects);
//!
//! let attrs = Difficulty::new().calculate(&chart).unwrap();
//! let stars = attrs.stars();
//!
//! // Rate-changing modifiers are applied through the clock rate.
//! let dt = Difficulty::new().clock_rate(1.5).calculate(&chart).unwrap();
//! assert!(dt.stars() >= stars);
//! ```
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | No features |
//! | `parallel` | Evaluate the independent per-column and per-corner loops on a thread pool. Output is identical to the single-threaded calculation. | [`rayon`]
//! | `tracing` | A non-finite final rating (degenerate timing data) will be logged through `tracing::warn`. If this feature is not enabled, the value is returned silently. | [`tracing`]
//!
//! [`rayon`]: https://docs.rs/rayon
//! [`tracing`]: https://docs.rs/tracing

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

#[doc(inline)]
pub use self::{
    calibration::Calibration,
    cross::{CrossMatrix, DefaultCrossMatrix},
    difficulty::{Difficulty, DifficultyAttributes, Strains},
    error::{CalculateError, CalculateResult},
    model::{Chart, HitObject, HitObjectKind},
};

/// Calibration knobs that affect the output without changing the
/// algorithm's shape.
pub mod calibration;

/// The injected cross-column interaction table.
pub mod cross;

/// The difficulty calculation pipeline.
pub mod difficulty;

/// Everything that can go wrong during a calculation.
pub mod error;

/// Input types describing a chart.
pub mod model;

mod util;
