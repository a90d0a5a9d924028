// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — Root
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Scalar bisection.

use disk_types::error::{DiskError, DiskResult};

/// Find x in [lo, hi] with f(x) = 0 by bisection.
///
/// The bracket must straddle the root: f(lo) and f(hi) of opposite sign.
/// Converges to relative width `rel_tol` or after `max_iter` halvings,
/// whichever comes first.
pub fn bisect<F: Fn(f64) -> f64>(
    f: F,
    mut lo: f64,
    mut hi: f64,
    rel_tol: f64,
    max_iter: usize,
) -> DiskResult<f64> {
    if !(lo.is_finite() && hi.is_finite() && lo < hi) {
        return Err(DiskError::Domain(format!("invalid bisection bracket [{lo}, {hi}]")));
    }
    let mut f_lo = f(lo);
    let f_hi = f(hi);
    if f_lo == 0.0 {
        return Ok(lo);
    }
    if f_hi == 0.0 {
        return Ok(hi);
    }
    if f_lo.signum() == f_hi.signum() {
        return Err(DiskError::Domain(format!(
            "bisection bracket does not straddle a root: f({lo}) = {f_lo}, f({hi}) = {f_hi}"
        )));
    }

    for _ in 0..max_iter {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);
        if f_mid == 0.0 || (hi - lo) <= rel_tol * mid.abs() {
            return Ok(mid);
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    Ok(0.5 * (lo + hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bisect_sqrt2() {
        let x = bisect(|x| x * x - 2.0, 0.0, 2.0, 1e-12, 200).unwrap();
        assert!((x - std::f64::consts::SQRT_2).abs() < 1e-10);
    }

    #[test]
    fn test_bisect_power_law() {
        // the shape of the Mdisk0 inversion: monotone power of the amplitude
        let target = 3.7e4;
        let x = bisect(|x| x.powf(0.7) - target, 1.0, 1e12, 1e-12, 200).unwrap();
        assert!((x.powf(0.7) / target - 1.0).abs() < 1e-8);
    }

    #[test]
    fn test_bisect_rejects_bad_bracket() {
        assert!(bisect(|x| x * x + 1.0, -1.0, 1.0, 1e-9, 100).is_err());
        assert!(bisect(|x| x, 2.0, 1.0, 1e-9, 100).is_err());
    }
}
