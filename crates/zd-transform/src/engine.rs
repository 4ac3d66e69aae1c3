// SPDX-License-Identifier: AGPL-3.0-or-later
// Part of the zd workspace — Licensed under AGPL-3.0-or-later.

//! The zero-divisor transform engine.
//!
//! For a function `f` over a finite domain `D` the transform is
//!
//! ```text
//! C[f] = ∫_D f(x) · K(P, x) · Ω_d(x) dx
//!
//! K(P, x)  = Σ_i |z_i(P)|² · exp(-α · ‖x - x_i‖²)
//! Ω_d(x)   = (1 + ‖x‖²)^(-d/2)
//! ```
//!
//! where the `z_i` are the probe's coefficients, the loci `x_i` default to
//! the standard basis vectors, `α > 0` controls the kernel width, and the
//! dimensional weight `Ω_d` keeps the integrand in `L¹`.

use ndarray::{ArrayD, IxDyn};
use rand::Rng;
use zd_algebra::Hypercomplex;

use crate::determinism;
use crate::error::{TransformError, TransformResult};
use crate::quad;

/// Embedding dimension used when none is given.
pub const DEFAULT_EMBEDDING_DIM: usize = 32;

/// Grid quadrature is only practical up to this many dimensions.
pub const MAX_GRID_DIMENSIONS: usize = 3;

/// Strategy for N-D integration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegrationMethod {
    /// Uniform random sampling over the product domain.
    MonteCarlo,
    /// Composite trapezoidal rule on a regular mesh (≤ 3 dimensions).
    Grid,
}

/// Immutable transform engine.
///
/// Holds only the embedding dimension and the decay parameter `α`; all
/// operations are synchronous and side-effect-free, so shared references
/// may be used concurrently from independent call sites.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformEngine {
    dimension: usize,
    alpha: f64,
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_EMBEDDING_DIM,
            alpha: 1.0,
        }
    }
}

pub(crate) fn check_interval(domain: (f64, f64)) -> TransformResult<()> {
    let (lo, hi) = domain;
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Err(TransformError::InvalidDomain { lo, hi });
    }
    Ok(())
}

impl TransformEngine {
    /// Construct an engine.  Fails immediately when `α` is not strictly
    /// positive.
    pub fn new(dimension: usize, alpha: f64) -> TransformResult<Self> {
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(TransformError::NonPositiveAlpha { alpha });
        }
        Ok(Self { dimension, alpha })
    }

    /// A copy of this engine with a different decay parameter.
    pub fn with_alpha(&self, alpha: f64) -> TransformResult<Self> {
        Self::new(self.dimension, alpha)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Evaluate the localized kernel `K(P, x)` with the standard basis
    /// vectors as loci.
    ///
    /// `x` is padded with zeros or truncated to the probe's coefficient
    /// length.  The result is finite and non-negative for finite inputs.
    pub fn kernel<P: Hypercomplex>(&self, probe: &P, x: &[f64]) -> f64 {
        self.kernel_at(probe, x, None)
    }

    /// Kernel evaluation with explicit loci.  Coefficients without a
    /// matching locus contribute nothing.
    pub fn kernel_at<P: Hypercomplex>(
        &self,
        probe: &P,
        x: &[f64],
        loci: Option<&[Vec<f64>]>,
    ) -> f64 {
        let coefficients = probe.coefficients();
        let n = coefficients.len();
        let norm_sq: f64 = x.iter().take(n).map(|v| v * v).sum();

        let mut acc = 0.0;
        for (i, &z) in coefficients.iter().enumerate() {
            if z == 0.0 {
                continue;
            }
            let dist_sq = match loci {
                None => {
                    // Basis locus e_i: ‖x - e_i‖² = ‖x‖² - 2·x_i + 1.
                    let xi = x.get(i).copied().unwrap_or(0.0);
                    norm_sq - 2.0 * xi + 1.0
                }
                Some(loci) => match loci.get(i) {
                    Some(locus) => (0..n)
                        .map(|j| {
                            let xj = x.get(j).copied().unwrap_or(0.0);
                            let lj = locus.get(j).copied().unwrap_or(0.0);
                            (xj - lj) * (xj - lj)
                        })
                        .sum(),
                    None => continue,
                },
            };
            acc += z * z * (-self.alpha * dist_sq).exp();
        }
        acc
    }

    /// Dimensional weight `Ω_d(x) = (1 + ‖x‖²)^(-d/2)`.
    ///
    /// Equals 1 at the origin for any `d` and stays strictly positive.
    pub fn weight(&self, x: &[f64], d: u32) -> f64 {
        let norm_sq: f64 = x.iter().map(|v| v * v).sum();
        (1.0 + norm_sq).powf(-(f64::from(d)) / 2.0)
    }

    /// The full integrand `f(x) · K(P, x) · Ω_d(x)` at an N-D point.
    pub fn integrand<P, F>(&self, f: &F, probe: &P, d: u32, x: &[f64]) -> f64
    where
        P: Hypercomplex,
        F: Fn(&[f64]) -> f64,
    {
        f(x) * self.kernel(probe, x) * self.weight(x, d)
    }

    /// 1-D transform via adaptive quadrature.
    pub fn transform_1d<P, F>(
        &self,
        f: F,
        probe: &P,
        d: u32,
        domain: (f64, f64),
    ) -> TransformResult<f64>
    where
        P: Hypercomplex,
        F: Fn(f64) -> f64,
    {
        self.transform_1d_with_error(f, probe, d, domain)
            .map(|(value, _)| value)
    }

    /// 1-D transform that also exposes the quadrature error estimate.
    pub fn transform_1d_with_error<P, F>(
        &self,
        f: F,
        probe: &P,
        d: u32,
        domain: (f64, f64),
    ) -> TransformResult<(f64, f64)>
    where
        P: Hypercomplex,
        F: Fn(f64) -> f64,
    {
        check_interval(domain)?;
        let integrand = |x: f64| {
            let point = [x];
            f(x) * self.kernel(probe, &point) * self.weight(&point, d)
        };
        Ok(quad::integrate_default(integrand, domain))
    }

    /// N-D transform over the product of `domains`.
    ///
    /// Monte Carlo draws from the deterministic sampling configuration;
    /// use [`TransformEngine::monte_carlo_nd_with_rng`] for caller-seeded
    /// reproducibility.  Grid quadrature rejects more than three
    /// dimensions before any computation begins.
    pub fn transform_nd<P, F>(
        &self,
        f: F,
        probe: &P,
        d: u32,
        domains: &[(f64, f64)],
        method: IntegrationMethod,
        samples: usize,
    ) -> TransformResult<f64>
    where
        P: Hypercomplex,
        F: Fn(&[f64]) -> f64,
    {
        match method {
            IntegrationMethod::MonteCarlo => {
                let mut rng = determinism::rng_from_label("zd.transform.monte_carlo");
                self.monte_carlo_nd_with_rng(f, probe, d, domains, samples, &mut rng)
            }
            IntegrationMethod::Grid => self.grid_nd(f, probe, d, domains, samples),
        }
    }

    /// Monte Carlo N-D transform with a caller-supplied RNG.
    pub fn monte_carlo_nd_with_rng<P, F, R>(
        &self,
        f: F,
        probe: &P,
        d: u32,
        domains: &[(f64, f64)],
        samples: usize,
        rng: &mut R,
    ) -> TransformResult<f64>
    where
        P: Hypercomplex,
        F: Fn(&[f64]) -> f64,
        R: Rng + ?Sized,
    {
        check_domains(domains)?;
        if samples == 0 {
            return Err(TransformError::InvalidSampleCount);
        }

        let volume: f64 = domains.iter().map(|&(lo, hi)| hi - lo).product();
        let mut point = vec![0.0; domains.len()];
        let mut acc = 0.0;
        for _ in 0..samples {
            for (slot, &(lo, hi)) in point.iter_mut().zip(domains.iter()) {
                *slot = if hi > lo { rng.gen_range(lo..hi) } else { lo };
            }
            acc += self.integrand(&f, probe, d, &point);
        }
        Ok(volume * acc / samples as f64)
    }

    fn grid_nd<P, F>(
        &self,
        f: F,
        probe: &P,
        d: u32,
        domains: &[(f64, f64)],
        samples: usize,
    ) -> TransformResult<f64>
    where
        P: Hypercomplex,
        F: Fn(&[f64]) -> f64,
    {
        check_domains(domains)?;
        let n = domains.len();
        if n > MAX_GRID_DIMENSIONS {
            return Err(TransformError::UnsupportedDimensionality {
                requested: n,
                max: MAX_GRID_DIMENSIONS,
            });
        }
        if samples == 0 {
            return Err(TransformError::InvalidSampleCount);
        }

        let per_axis = ((samples as f64).powf(1.0 / n as f64).round() as usize).max(2);
        let axes: Vec<Vec<f64>> = domains
            .iter()
            .map(|&(lo, hi)| linspace(lo, hi, per_axis))
            .collect();

        // Composite trapezoid: end points of every axis carry half weight.
        let shape = vec![per_axis; n];
        let mut weighted = ArrayD::<f64>::zeros(IxDyn(&shape));
        let mut point = vec![0.0; n];
        for (idx, slot) in weighted.indexed_iter_mut() {
            let mut w = 1.0;
            for axis in 0..n {
                let k = idx[axis];
                point[axis] = axes[axis][k];
                if k == 0 || k + 1 == per_axis {
                    w *= 0.5;
                }
            }
            *slot = w * self.integrand(&f, probe, d, &point);
        }

        let cell: f64 = domains
            .iter()
            .map(|&(lo, hi)| (hi - lo) / (per_axis - 1) as f64)
            .product();
        Ok(weighted.sum() * cell)
    }
}

fn check_domains(domains: &[(f64, f64)]) -> TransformResult<()> {
    if domains.is_empty() {
        return Err(TransformError::EmptyDomains);
    }
    for &domain in domains {
        check_interval(domain)?;
    }
    Ok(())
}

pub(crate) fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![lo];
    }
    let step = (hi - lo) / (n - 1) as f64;
    (0..n).map(|k| lo + step * k as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::CanonicalProbe;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use zd_algebra::Element;

    fn gaussian(x: f64) -> f64 {
        (-x * x).exp()
    }

    #[test]
    fn construction_rejects_non_positive_alpha() {
        for alpha in [0.0, -1.0, f64::NEG_INFINITY, f64::NAN] {
            let err = TransformEngine::new(32, alpha).unwrap_err();
            assert!(matches!(err, TransformError::NonPositiveAlpha { .. }));
        }
        assert!(TransformEngine::new(32, 1e-12).is_ok());
    }

    #[test]
    fn kernel_is_finite_and_non_negative() {
        let engine = TransformEngine::default();
        let probe = CanonicalProbe::P1.element();
        for x in [-100.0, -1.0, 0.0, 0.5, 1.0, 100.0] {
            let value = engine.kernel(&probe, &[x]);
            assert!(value.is_finite());
            assert!(value >= 0.0);
        }
    }

    #[test]
    fn kernel_matches_closed_form_in_one_dimension() {
        // Both unit coefficients of any canonical probe sit at basis
        // indices >= 1, so a 1-D point pads to distance x² + 1 from both
        // loci and the kernel reduces to 2·exp(-α(x² + 1)).
        let engine = TransformEngine::new(32, 0.7).unwrap();
        for probe in CanonicalProbe::ALL {
            let element = probe.element();
            for x in [-2.0f64, 0.0, 1.3] {
                let expected = 2.0 * (-0.7 * (x * x + 1.0)).exp();
                assert_relative_eq!(engine.kernel(&element, &[x]), expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn kernel_honours_explicit_loci() {
        let engine = TransformEngine::new(32, 2.0).unwrap();
        let probe = CanonicalProbe::P1.element();
        let (a, b) = CanonicalProbe::P1.index_pair();
        let mut loci = vec![vec![0.0; 32]; 32];
        loci[a] = vec![1.5];
        loci[b] = vec![-1.5];
        let value = engine.kernel_at(&probe, &[1.5], Some(&loci));
        let expected = (-2.0 * 0.0f64).exp() + (-2.0 * 9.0f64).exp();
        assert_relative_eq!(value, expected, epsilon = 1e-12);
    }

    #[test]
    fn all_zero_probe_is_harmless() {
        let engine = TransformEngine::default();
        let zero = Element::zeros(32).unwrap();
        assert_eq!(engine.kernel(&zero, &[0.3]), 0.0);
        let value = engine.transform_1d(gaussian, &zero, 2, (-3.0, 3.0)).unwrap();
        assert_eq!(value, 0.0);
    }

    #[test]
    fn weight_is_one_at_origin_and_positive() {
        let engine = TransformEngine::default();
        for d in [0u32, 1, 2, 7] {
            assert_eq!(engine.weight(&[0.0, 0.0], d), 1.0);
            assert!(engine.weight(&[4.0, -3.0], d) > 0.0);
        }
        // Larger d concentrates weight near the origin.
        assert!(engine.weight(&[2.0], 4) < engine.weight(&[2.0], 1));
    }

    #[test]
    fn transform_1d_is_finite_for_every_probe() {
        let engine = TransformEngine::default();
        for probe in CanonicalProbe::ALL {
            let value = engine
                .transform_1d(gaussian, &probe.element(), 2, (-5.0, 5.0))
                .unwrap();
            assert!(value.is_finite());
            assert!(value > 0.0);
        }
    }

    #[test]
    fn transform_1d_rejects_malformed_domains() {
        let engine = TransformEngine::default();
        let probe = CanonicalProbe::P1.element();
        for domain in [(1.0, -1.0), (f64::NEG_INFINITY, 0.0), (0.0, f64::NAN)] {
            let err = engine.transform_1d(gaussian, &probe, 2, domain).unwrap_err();
            assert!(matches!(err, TransformError::InvalidDomain { .. }));
        }
    }

    #[test]
    fn zero_length_domain_transforms_to_zero() {
        let engine = TransformEngine::default();
        let probe = CanonicalProbe::P1.element();
        let (value, err) = engine
            .transform_1d_with_error(gaussian, &probe, 2, (2.0, 2.0))
            .unwrap();
        assert_eq!(value, 0.0);
        assert_eq!(err, 0.0);
    }

    #[test]
    fn grid_rejects_more_than_three_dimensions() {
        let engine = TransformEngine::default();
        let probe = CanonicalProbe::P1.element();
        let domains = [(-1.0, 1.0); 4];
        let err = engine
            .transform_nd(|_| 1.0, &probe, 2, &domains, IntegrationMethod::Grid, 1000)
            .unwrap_err();
        assert!(matches!(
            err,
            TransformError::UnsupportedDimensionality {
                requested: 4,
                max: 3
            }
        ));
    }

    #[test]
    fn grid_1d_agrees_with_adaptive_quadrature() {
        let engine = TransformEngine::default();
        let probe = CanonicalProbe::P1.element();
        let adaptive = engine
            .transform_1d(gaussian, &probe, 2, (-3.0, 3.0))
            .unwrap();
        let grid = engine
            .transform_nd(
                |x| gaussian(x[0]),
                &probe,
                2,
                &[(-3.0, 3.0)],
                IntegrationMethod::Grid,
                4000,
            )
            .unwrap();
        assert_relative_eq!(grid, adaptive, max_relative = 1e-4);
    }

    #[test]
    fn monte_carlo_is_reproducible_with_a_seeded_rng() {
        let engine = TransformEngine::default();
        let probe = CanonicalProbe::P1.element();
        let domains = [(-2.0, 2.0), (-2.0, 2.0)];
        let f = |x: &[f64]| (-x.iter().map(|v| v * v).sum::<f64>()).exp();

        let mut first_rng = StdRng::seed_from_u64(7);
        let first = engine
            .monte_carlo_nd_with_rng(f, &probe, 2, &domains, 2000, &mut first_rng)
            .unwrap();
        let mut second_rng = StdRng::seed_from_u64(7);
        let second = engine
            .monte_carlo_nd_with_rng(f, &probe, 2, &domains, 2000, &mut second_rng)
            .unwrap();
        assert_eq!(first, second);
        assert!(first.is_finite());
    }

    #[test]
    fn monte_carlo_requires_samples_and_domains() {
        let engine = TransformEngine::default();
        let probe = CanonicalProbe::P1.element();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            engine
                .monte_carlo_nd_with_rng(|_| 1.0, &probe, 2, &[(-1.0, 1.0)], 0, &mut rng)
                .unwrap_err(),
            TransformError::InvalidSampleCount
        ));
        assert!(matches!(
            engine
                .monte_carlo_nd_with_rng(|_| 1.0, &probe, 2, &[], 10, &mut rng)
                .unwrap_err(),
            TransformError::EmptyDomains
        ));
    }
}
