// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — Orbit
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Binary-orbit and compact-object geometry: Roche lobes, the Kerr ISCO
//! and the accretion efficiency it implies.

use disk_types::constants::{GRAVITY, SPEED_OF_LIGHT};

/// Orbital semi-major axis from Kepler's third law (cgs).
pub fn semiaxis(mass1: f64, mass2: f64, period: f64) -> f64 {
    (GRAVITY * (mass1 + mass2) * period * period / (4. * std::f64::consts::PI.powi(2))).cbrt()
}

/// Volume-equivalent Roche-lobe radius of star 1 in units of the
/// separation. Eggleton 1983 approximation, better than 1% for any q.
pub fn roche_lobe_over_semiaxis(mass_ratio: f64) -> f64 {
    let q3 = mass_ratio.cbrt();
    0.49 * q3 * q3 / (0.6 * q3 * q3 + (1. + q3).ln())
}

/// Volume-equivalent Roche-lobe radius of star 1 (cm).
pub fn roche_lobe_radius(mass1: f64, mass2: f64, period: f64) -> f64 {
    roche_lobe_over_semiaxis(mass1 / mass2) * semiaxis(mass1, mass2, period)
}

/// Gravitational radius GM/c² (cm).
pub fn r_grav(mx: f64) -> f64 {
    GRAVITY * mx / (SPEED_OF_LIGHT * SPEED_OF_LIGHT)
}

/// ISCO radius in units of GM/c² for a Kerr hole of spin a ∈ [−1, 1]
/// (prograde disk for a > 0). Bardeen, Press & Teukolsky 1972.
pub fn r_kerr_isco_rg(kerr: f64) -> f64 {
    let z1 = 1. + (1. - kerr * kerr).cbrt() * ((1. + kerr).cbrt() + (1. - kerr).cbrt());
    let z2 = (3. * kerr * kerr + z1 * z1).sqrt();
    let root = ((3. - z1) * (3. + z1 + 2. * z2)).max(0.).sqrt();
    if kerr >= 0. {
        3. + z2 - root
    } else {
        3. + z2 + root
    }
}

/// ISCO radius (cm).
pub fn r_kerr_isco(mx: f64, kerr: f64) -> f64 {
    r_kerr_isco_rg(kerr) * r_grav(mx)
}

/// Accretion efficiency η = 1 − E_ISCO of a disk truncated at r_isco.
pub fn accretion_efficiency(r_isco: f64, mx: f64) -> f64 {
    let x = r_isco / r_grav(mx);
    1. - (1. - 2. / (3. * x)).max(0.).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use disk_types::constants::{DAY, M_SUN};

    #[test]
    fn test_schwarzschild_isco() {
        assert!((r_kerr_isco_rg(0.) - 6.).abs() < 1e-12);
    }

    #[test]
    fn test_extreme_kerr_isco() {
        // a = 0.998 (Thorne limit): r_isco ≈ 1.24 GM/c²
        let x = r_kerr_isco_rg(0.998);
        assert!((x - 1.237).abs() < 0.01, "r_isco = {x} rg");
        // retrograde extreme: 9 rg
        assert!((r_kerr_isco_rg(-1.) - 9.).abs() < 1e-6);
    }

    #[test]
    fn test_isco_monotone_in_spin() {
        let mut prev = r_kerr_isco_rg(-1.);
        for i in 1..=40 {
            let a = -1. + 2. * i as f64 / 40.;
            let x = r_kerr_isco_rg(a);
            assert!(x < prev, "ISCO should shrink with spin, a = {a}");
            prev = x;
        }
    }

    #[test]
    fn test_efficiency_grows_with_spin() {
        let mx = 10. * M_SUN;
        let eta0 = accretion_efficiency(r_kerr_isco(mx, 0.), mx);
        let eta1 = accretion_efficiency(r_kerr_isco(mx, 0.998), mx);
        assert!((eta0 - 0.0572).abs() < 1e-3, "Schwarzschild η = {eta0}");
        assert!(eta1 > 1.4 * eta0, "Kerr η = {eta1} should exceed 1.4 × {eta0}");
    }

    #[test]
    fn test_roche_lobe_typical_lmxb() {
        // Mx = 10 Msun, Mopt = 0.5 Msun, P = 0.5 d: lobe of the
        // compact object is a few 1e11 cm and well below the separation
        let a = semiaxis(10. * M_SUN, 0.5 * M_SUN, 0.5 * DAY);
        let rl = roche_lobe_radius(10. * M_SUN, 0.5 * M_SUN, 0.5 * DAY);
        assert!(a > 3e11 && a < 5e11, "a = {a}");
        assert!(rl > 0.5 * a && rl < 0.75 * a, "R_L/a = {}", rl / a);
    }

    #[test]
    fn test_roche_lobe_symmetric_masses() {
        // equal masses: both lobes ≈ 0.38 a
        let f = roche_lobe_over_semiaxis(1.0);
        assert!((f - 0.379).abs() < 5e-3, "f = {f}");
    }
}
