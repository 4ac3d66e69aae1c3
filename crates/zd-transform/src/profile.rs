// SPDX-License-Identifier: AGPL-3.0-or-later
// Part of the zd workspace — Licensed under AGPL-3.0-or-later.

//! Smooth interpolation of a finite numeric sequence.
//!
//! A sequence of `n` samples becomes a sum of unit-width Gaussian bumps
//! whose centers are spread linearly across a fixed domain, one bump per
//! sample, weighted by the sample's value.  This is the function the
//! pattern detectors feed into the transform.

use crate::engine::linspace;
use crate::error::{TransformError, TransformResult};

/// Fixed domain the bump centers are mapped onto.
pub const PROFILE_DOMAIN: (f64, f64) = (-5.0, 5.0);

/// Smooth interpolant over a sample sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleProfile {
    centers: Vec<f64>,
    weights: Vec<f64>,
}

impl SampleProfile {
    /// Build the profile for `data`.  Fails on empty input or non-finite
    /// samples.
    pub fn new(data: &[f64]) -> TransformResult<Self> {
        if data.is_empty() {
            return Err(TransformError::EmptyData);
        }
        for (index, value) in data.iter().enumerate() {
            if !value.is_finite() {
                return Err(TransformError::NonFiniteSample { index });
            }
        }
        let (lo, hi) = PROFILE_DOMAIN;
        Ok(Self {
            centers: linspace(lo, hi, data.len()),
            weights: data.to_vec(),
        })
    }

    /// Evaluate the profile at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        self.centers
            .iter()
            .zip(self.weights.iter())
            .map(|(&c, &w)| w * (-(x - c) * (x - c)).exp())
            .sum()
    }

    /// The domain the profile was built over.
    pub fn domain(&self) -> (f64, f64) {
        PROFILE_DOMAIN
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
