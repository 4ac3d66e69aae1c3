// SPDX-License-Identifier: AGPL-3.0-or-later
// Part of the zd workspace — Licensed under AGPL-3.0-or-later.

use thiserror::Error;
use zd_algebra::AlgebraError;

/// Errors surfaced by the transform engine.
///
/// Only parameter and dimensionality problems are errors.  Numeric-quality
/// outcomes (non-convergence, bound violation) are report fields: "the
/// integral didn't converge well" is an informative result, not a fault.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("alpha must be positive and finite, got {alpha}")]
    NonPositiveAlpha { alpha: f64 },
    #[error("integration domain must be finite and ordered, got [{lo}, {hi}]")]
    InvalidDomain { lo: f64, hi: f64 },
    #[error("at least one integration domain is required")]
    EmptyDomains,
    #[error("grid integration supports at most {max} dimensions, requested {requested}")]
    UnsupportedDimensionality { requested: usize, max: usize },
    #[error("sample count must be positive")]
    InvalidSampleCount,
    #[error("at least one convergence trial is required")]
    InvalidTrialCount,
    #[error("probe id must be in 1..=6, got {id}")]
    InvalidProbeId { id: u8 },
    #[error("input sequence must not be empty")]
    EmptyData,
    #[error("sample {index} is not finite")]
    NonFiniteSample { index: usize },
    #[error(transparent)]
    Algebra(#[from] AlgebraError),
}

pub type TransformResult<T> = Result<T, TransformError>;
