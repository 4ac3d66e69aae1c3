// SPDX-License-Identifier: AGPL-3.0-or-later
// Part of the zd workspace — Licensed under AGPL-3.0-or-later.

//! Structural pattern detection on numeric sequences.
//!
//! A [`PatternDetector`] owns one transform engine and probes a sequence
//! with three independent detectors (mirror symmetry, symmetric sign
//! crossings, dimensional persistence), returning findings ranked by
//! confidence.  Custom detectors can be supplied without touching this
//! crate.

pub mod detector;
pub mod pattern;
pub mod stats;

pub use detector::{DetectorKind, PatternDetector};
pub use pattern::{MetricValue, Pattern, PatternKind};
pub use stats::SequenceSummary;
