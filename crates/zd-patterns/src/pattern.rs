// SPDX-License-Identifier: AGPL-3.0-or-later
// Part of the zd workspace — Licensed under AGPL-3.0-or-later.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A named metric attached to a detected pattern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(usize),
    Scalar(f64),
    Series(Vec<f64>),
}

/// The kind of structural pattern a detector reports.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    MirrorSymmetry,
    SignCrossing,
    DimensionalPersistence,
    Custom(String),
}

impl PatternKind {
    /// Fixed detector priority used to break confidence ties, keeping
    /// detection output deterministic.
    pub fn priority(&self) -> usize {
        match self {
            PatternKind::MirrorSymmetry => 0,
            PatternKind::SignCrossing => 1,
            PatternKind::DimensionalPersistence => 2,
            PatternKind::Custom(_) => 3,
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternKind::MirrorSymmetry => write!(f, "mirror_symmetry"),
            PatternKind::SignCrossing => write!(f, "sign_crossing"),
            PatternKind::DimensionalPersistence => write!(f, "dimensional_persistence"),
            PatternKind::Custom(name) => write!(f, "{name}"),
        }
    }
}

/// A detected structural pattern.
///
/// Produced fresh per detection call and never mutated afterwards; the
/// optional `indices` are the only reference back to the source sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub kind: PatternKind,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    pub description: String,
    pub indices: Vec<usize>,
    pub metrics: BTreeMap<String, MetricValue>,
}
