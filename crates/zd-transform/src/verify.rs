// SPDX-License-Identifier: AGPL-3.0-or-later
// Part of the zd workspace — Licensed under AGPL-3.0-or-later.

//! Empirical checks of the transform's two analytic guarantees.
//!
//! Convergence: for bounded `f ∈ L¹(D)` and `α > 0` the transform
//! converges absolutely.  Stability: `|C[f]| ≤ M·‖f‖₁` with
//! `M = ‖P‖²·(π/α)^(n/2)`.  Both checks report their findings as data;
//! a failed check is an informative outcome, not an error.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{debug, warn};
use zd_algebra::Hypercomplex;

use crate::engine::{check_interval, TransformEngine};
use crate::error::{TransformError, TransformResult};
use crate::quad;

/// The α sweep used by convergence verification, log-uniform.
pub const ALPHA_SWEEP: (f64, f64) = (0.1, 100.0);

/// Outcome of a single convergence trial.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceTrial {
    pub alpha: f64,
    pub value: f64,
    pub converged: bool,
}

/// Aggregated convergence sweep.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceReport {
    /// Fraction of trials that produced a finite value, in `[0, 1]`.
    pub convergence_rate: f64,
    pub all_converged: bool,
    pub trials: Vec<ConvergenceTrial>,
}

/// One-shot stability-bound diagnostic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StabilityReport {
    pub transform_value: f64,
    /// `M = ‖P‖²·(π/α)^(n/2)` with `n = 1`.
    pub stability_constant: f64,
    pub l1_norm: f64,
    /// `M·‖f‖₁`.
    pub bound: f64,
    pub bound_satisfied: bool,
    /// `|C[f]| / bound`; values above 1 flag a violated guarantee and are
    /// surfaced as-is.
    pub ratio: f64,
    pub alpha: f64,
    pub probe_norm: f64,
}

impl TransformEngine {
    /// Sweep `trials` α values log-uniformly across [`ALPHA_SWEEP`] and
    /// record whether each 1-D transform stayed finite.
    ///
    /// Each trial runs on a fresh engine carrying the trial α, so this
    /// engine's own α is untouched on every path.
    pub fn verify_convergence<P, F>(
        &self,
        f: F,
        probe: &P,
        d: u32,
        domain: (f64, f64),
        trials: usize,
    ) -> TransformResult<ConvergenceReport>
    where
        P: Hypercomplex,
        F: Fn(f64) -> f64,
    {
        if trials == 0 {
            return Err(TransformError::InvalidTrialCount);
        }
        check_interval(domain)?;

        let (lo, hi) = ALPHA_SWEEP;
        let (log_lo, log_hi) = (lo.log10(), hi.log10());
        let mut results = Vec::with_capacity(trials);
        for i in 0..trials {
            let exponent = if trials == 1 {
                log_lo
            } else {
                log_lo + (log_hi - log_lo) * i as f64 / (trials - 1) as f64
            };
            let alpha = 10f64.powf(exponent);
            let trial_engine = self.with_alpha(alpha)?;
            let trial = match trial_engine.transform_1d(&f, probe, d, domain) {
                Ok(value) => ConvergenceTrial {
                    alpha,
                    value,
                    converged: value.is_finite(),
                },
                Err(err) => {
                    warn!(alpha, %err, "convergence trial failed");
                    ConvergenceTrial {
                        alpha,
                        value: f64::NAN,
                        converged: false,
                    }
                }
            };
            results.push(trial);
        }

        let converged = results.iter().filter(|t| t.converged).count();
        let convergence_rate = converged as f64 / trials as f64;
        debug!(trials, convergence_rate, "convergence sweep complete");
        Ok(ConvergenceReport {
            convergence_rate,
            all_converged: converged == trials,
            trials: results,
        })
    }

    /// Check `|C[f]| ≤ M·‖f‖₁` at this engine's current α.
    pub fn verify_stability<P, F>(
        &self,
        f: F,
        probe: &P,
        d: u32,
        domain: (f64, f64),
    ) -> TransformResult<StabilityReport>
    where
        P: Hypercomplex,
        F: Fn(f64) -> f64,
    {
        check_interval(domain)?;

        let probe_norm = probe.norm();
        let stability_constant = probe_norm.powi(2) * (PI / self.alpha()).sqrt();
        let (l1_norm, _) = quad::integrate_default(|x| f(x).abs(), domain);
        let transform_value = self.transform_1d(&f, probe, d, domain)?;

        let bound = stability_constant * l1_norm;
        let magnitude = transform_value.abs();
        let bound_satisfied = magnitude <= bound;
        let ratio = if bound > 0.0 {
            magnitude / bound
        } else if magnitude == 0.0 {
            0.0
        } else {
            f64::INFINITY
        };
        debug!(bound, magnitude, bound_satisfied, "stability check complete");

        Ok(StabilityReport {
            transform_value,
            stability_constant,
            l1_norm,
            bound,
            bound_satisfied,
            ratio,
            alpha: self.alpha(),
            probe_norm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::CanonicalProbe;
    use approx::assert_relative_eq;

    fn gaussian(x: f64) -> f64 {
        (-x * x).exp()
    }

    #[test]
    fn gaussian_converges_across_the_full_sweep() {
        let engine = TransformEngine::default();
        let probe = CanonicalProbe::P1.element();
        let report = engine
            .verify_convergence(gaussian, &probe, 2, (-5.0, 5.0), 10)
            .unwrap();
        assert!(report.all_converged);
        assert_eq!(report.convergence_rate, 1.0);
        assert_eq!(report.trials.len(), 10);
        assert_relative_eq!(report.trials[0].alpha, 0.1, epsilon = 1e-12);
        assert_relative_eq!(report.trials[9].alpha, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn sweep_leaves_alpha_untouched() {
        let engine = TransformEngine::new(32, 2.5).unwrap();
        let probe = CanonicalProbe::P3.element();
        let before = engine.alpha();
        engine
            .verify_convergence(gaussian, &probe, 1, (-4.0, 4.0), 7)
            .unwrap();
        assert_eq!(engine.alpha(), before);
        // Even a sweep over a degenerate domain leaves α alone.
        engine
            .verify_convergence(gaussian, &probe, 1, (1.0, 1.0), 3)
            .unwrap();
        assert_eq!(engine.alpha(), before);
    }

    #[test]
    fn sweep_requires_at_least_one_trial() {
        let engine = TransformEngine::default();
        let probe = CanonicalProbe::P1.element();
        assert!(matches!(
            engine
                .verify_convergence(gaussian, &probe, 2, (-1.0, 1.0), 0)
                .unwrap_err(),
            TransformError::InvalidTrialCount
        ));
    }

    #[test]
    fn stability_bound_holds_for_every_canonical_probe() {
        let engine = TransformEngine::default();
        for probe in CanonicalProbe::ALL {
            let report = engine
                .verify_stability(gaussian, &probe.element(), 2, (-5.0, 5.0))
                .unwrap();
            assert!(report.bound_satisfied, "probe {:?}", probe);
            assert!(report.ratio <= 1.0);
            assert!(report.ratio >= 0.0);
            assert_relative_eq!(report.probe_norm, 2.0f64.sqrt(), epsilon = 1e-12);
            assert_relative_eq!(report.l1_norm, PI.sqrt(), epsilon = 1e-6);
        }
    }

    #[test]
    fn stability_constant_matches_closed_form() {
        let engine = TransformEngine::new(32, 4.0).unwrap();
        let probe = CanonicalProbe::P2.element();
        let report = engine
            .verify_stability(gaussian, &probe, 2, (-5.0, 5.0))
            .unwrap();
        // ‖P‖² = 2, (π/4)^(1/2).
        assert_relative_eq!(
            report.stability_constant,
            2.0 * (PI / 4.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn degenerate_inputs_produce_reports_not_panics() {
        let engine = TransformEngine::default();
        let zero = zd_algebra::Element::zeros(32).unwrap();
        let report = engine
            .verify_stability(gaussian, &zero, 2, (-5.0, 5.0))
            .unwrap();
        assert_eq!(report.transform_value, 0.0);
        assert_eq!(report.bound, 0.0);
        assert!(report.bound_satisfied);
        assert_eq!(report.ratio, 0.0);

        let report = engine
            .verify_stability(gaussian, &CanonicalProbe::P1.element(), 2, (2.0, 2.0))
            .unwrap();
        assert_eq!(report.transform_value, 0.0);
        assert!(report.bound_satisfied);
    }
}
