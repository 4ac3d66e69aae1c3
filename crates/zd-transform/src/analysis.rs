// SPDX-License-Identifier: AGPL-3.0-or-later
// Part of the zd workspace — Licensed under AGPL-3.0-or-later.

//! One-call transform analysis of a raw sample sequence.

use serde::{Deserialize, Serialize};
use zd_algebra::Hypercomplex;

use crate::engine::TransformEngine;
use crate::error::TransformResult;
use crate::profile::SampleProfile;
use crate::verify::{ConvergenceReport, StabilityReport};

/// Transform value plus both verification reports for one sequence.
///
/// This is the record the request-dispatch layer exposes: the transform
/// of the sequence's smooth profile under one probe, with the convergence
/// and stability diagnostics callers use as confidence metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SequenceAnalysis {
    pub transform_value: f64,
    pub convergence: ConvergenceReport,
    pub stability: StabilityReport,
}

impl TransformEngine {
    /// Interpolate `data`, transform it against `probe`, and attach the
    /// convergence sweep (`trials` α values) and stability diagnostics.
    pub fn analyze_sequence<P: Hypercomplex>(
        &self,
        data: &[f64],
        probe: &P,
        d: u32,
        trials: usize,
    ) -> TransformResult<SequenceAnalysis> {
        let profile = SampleProfile::new(data)?;
        let domain = profile.domain();
        let f = |x: f64| profile.eval(x);

        let transform_value = self.transform_1d(f, probe, d, domain)?;
        let convergence = self.verify_convergence(f, probe, d, domain, trials)?;
        let stability = self.verify_stability(f, probe, d, domain)?;

        Ok(SequenceAnalysis {
            transform_value,
            convergence,
            stability,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use crate::probe::CanonicalProbe;

    #[test]
    fn analysis_bundles_value_and_reports() {
        let engine = TransformEngine::default();
        let probe = CanonicalProbe::P1.element();
        let analysis = engine
            .analyze_sequence(&[1.0, 2.0, 3.0, 2.0, 1.0], &probe, 2, 5)
            .unwrap();
        assert!(analysis.transform_value.is_finite());
        assert!(analysis.convergence.all_converged);
        assert!(analysis.stability.bound_satisfied);
        assert_eq!(analysis.convergence.trials.len(), 5);
    }

    #[test]
    fn empty_sequences_fail_fast() {
        let engine = TransformEngine::default();
        let probe = CanonicalProbe::P1.element();
        assert!(matches!(
            engine.analyze_sequence(&[], &probe, 2, 5).unwrap_err(),
            TransformError::EmptyData
        ));
    }
}
