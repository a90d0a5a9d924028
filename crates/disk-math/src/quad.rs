// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — Quad
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Quadrature rules: composite Simpson over a function, trapezoid over
//! tabulated samples on a non-uniform abscissa.

/// Composite Simpson rule for ∫ₐᵇ f dx with `n` sub-intervals
/// (`n` is rounded up to the next even number).
pub fn simpson<F: Fn(f64) -> f64>(f: F, a: f64, b: f64, n: usize) -> f64 {
    let n = if n % 2 == 0 { n.max(2) } else { n + 1 };
    let dx = (b - a) / n as f64;
    let mut acc = f(a) + f(b);
    for i in 1..n {
        let w = if i % 2 == 1 { 4.0 } else { 2.0 };
        acc += w * f(a + i as f64 * dx);
    }
    acc * dx / 3.0
}

/// Trapezoid rule over tabulated samples `y(x)`; `x` need not be uniform.
/// Slices of mismatched or insufficient length integrate to zero.
pub fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 1..x.len() {
        acc += 0.5 * (y[i] + y[i - 1]) * (x[i] - x[i - 1]);
    }
    acc
}
