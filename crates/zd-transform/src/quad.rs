// SPDX-License-Identifier: AGPL-3.0-or-later
// Part of the zd workspace — Licensed under AGPL-3.0-or-later.

//! Adaptive 1-D quadrature.
//!
//! Classic adaptive Simpson with Richardson correction.  Subdivision stops
//! once the local error estimate drops below the (halved per split)
//! tolerance or the depth cap is reached, so oscillatory or non-finite
//! integrands terminate with the best available estimate instead of
//! spinning.

/// Default absolute error target.
pub const DEFAULT_ABS_TOL: f64 = 1e-10;
/// Default relative error target.
pub const DEFAULT_REL_TOL: f64 = 1e-8;

const MAX_DEPTH: u32 = 48;

#[inline]
fn simpson(fa: f64, fm: f64, fb: f64, h: f64) -> f64 {
    h / 6.0 * (fa + 4.0 * fm + fb)
}

#[allow(clippy::too_many_arguments)]
fn refine<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    m: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
    tol: f64,
    depth: u32,
) -> (f64, f64) {
    let lm = 0.5 * (a + m);
    let rm = 0.5 * (m + b);
    let flm = f(lm);
    let frm = f(rm);
    let left = simpson(fa, flm, fm, m - a);
    let right = simpson(fm, frm, fb, b - m);
    let delta = left + right - whole;
    // A NaN or infinite delta cannot shrink under refinement; stop here
    // and report an unbounded error estimate.
    if !delta.is_finite() {
        return (left + right, f64::INFINITY);
    }
    if depth == 0 || delta.abs() <= 15.0 * tol {
        return (left + right + delta / 15.0, delta.abs() / 15.0);
    }
    let (lv, le) = refine(f, a, lm, m, fa, flm, fm, left, 0.5 * tol, depth - 1);
    let (rv, re) = refine(f, m, rm, b, fm, frm, fb, right, 0.5 * tol, depth - 1);
    (lv + rv, le + re)
}

/// Integrate `f` over the closed interval `domain`.
///
/// Returns the estimated value together with an error estimate.  A
/// zero-length domain integrates to exactly zero.
pub fn integrate<F: Fn(f64) -> f64>(
    f: F,
    domain: (f64, f64),
    abs_tol: f64,
    rel_tol: f64,
) -> (f64, f64) {
    let (a, b) = domain;
    if a == b {
        return (0.0, 0.0);
    }
    let m = 0.5 * (a + b);
    let fa = f(a);
    let fm = f(m);
    let fb = f(b);
    let whole = simpson(fa, fm, fb, b - a);
    let tol = abs_tol.max(rel_tol * whole.abs());
    refine(&f, a, m, b, fa, fm, fb, whole, tol, MAX_DEPTH)
}

/// Integrate with the default error targets.
pub fn integrate_default<F: Fn(f64) -> f64>(f: F, domain: (f64, f64)) -> (f64, f64) {
    integrate(f, domain, DEFAULT_ABS_TOL, DEFAULT_REL_TOL)
}
