// SPDX-License-Identifier: AGPL-3.0-or-later
// Part of the zd workspace — Licensed under AGPL-3.0-or-later.

//! Elementary sequence statistics shared by the detectors and exposed to
//! the reporting layer.

use serde::{Deserialize, Serialize};

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    (values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64).sqrt()
}

/// Summary statistics of a sample sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SequenceSummary {
    pub len: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

impl SequenceSummary {
    /// Describe `data`; `None` for an empty sequence.
    pub fn describe(data: &[f64]) -> Option<Self> {
        if data.is_empty() {
            return None;
        }
        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            len: data.len(),
            mean: mean(data),
            std_dev: std_dev(data),
            min,
            max,
            range: max - min,
        })
    }
}
