// SPDX-License-Identifier: AGPL-3.0-or-later
// Part of the zd workspace — Licensed under AGPL-3.0-or-later.

//! Integral transform built from zero-divisor kernel structure.
//!
//! The engine integrates a caller-supplied function against a localized
//! radial-basis kernel derived from a hypercomplex probe's coefficients,
//! damped by a dimensional decay weight.  Alongside the transform itself
//! it ships empirical verification of the transform's convergence and
//! stability-bound guarantees, used both for self-testing and as
//! confidence metadata for callers.

pub mod analysis;
pub mod determinism;
pub mod engine;
pub mod error;
pub mod probe;
pub mod profile;
pub mod quad;
pub mod verify;

pub use analysis::SequenceAnalysis;
pub use engine::{IntegrationMethod, TransformEngine, DEFAULT_EMBEDDING_DIM, MAX_GRID_DIMENSIONS};
pub use error::{TransformError, TransformResult};
pub use probe::{CanonicalProbe, EMBEDDING_DIM};
pub use profile::{SampleProfile, PROFILE_DOMAIN};
pub use verify::{ConvergenceReport, ConvergenceTrial, StabilityReport, ALPHA_SWEEP};
