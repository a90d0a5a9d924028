// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — Observables
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Derived radial fields and integral observables: photospheric
//! temperatures, irradiation, X-ray luminosity, broadband magnitudes.

use ndarray::Array1;

use disk_math::quad::{simpson, trapezoid};
use disk_types::config::AngularDist;
use disk_types::constants::{K_BOLTZMANN, PLANCK, SIGMA_SB, SPEED_OF_LIGHT};
use disk_types::state::{Derived, DiskState, HGrid};

use crate::opacity::OpacityLaw;

/// Sub-intervals of the Simpson frequency integral in `band_luminosity`.
const LX_SIMPSON_N: usize = 100;

/// Irradiation coupling of the outer disk to the central source.
#[derive(Debug, Clone, Copy)]
pub struct IrradiationParams {
    pub cirr: f64,
    pub irrindex: f64,
    pub angular_dist: AngularDist,
    /// Accretion efficiency η of the central object
    pub eta: f64,
}

/// Zero-torque relativistic-disk temperature profile:
/// T⁴ = 3 GM Mdot / (8π σ R³) · (1 − √(R_in/R)).
pub fn t_gr(r: f64, gm: f64, mdot: f64, r_in: f64) -> f64 {
    if mdot <= 0. || r <= r_in {
        return 0.;
    }
    let t4 = 3. * gm * mdot / (8. * std::f64::consts::PI * SIGMA_SB * r.powi(3))
        * (1. - (r_in / r).sqrt());
    t4.powf(0.25)
}

/// Planck spectral radiance per frequency, B_ν(T).
pub fn planck_nu(t: f64, nu: f64) -> f64 {
    if t <= 0. {
        return 0.;
    }
    let x = PLANCK * nu / (K_BOLTZMANN * t);
    2. * PLANCK * nu.powi(3) / (SPEED_OF_LIGHT * SPEED_OF_LIGHT) / x.exp_m1()
}

/// Planck spectral radiance per wavelength, B_λ(T).
pub fn planck_lambda(t: f64, lambda: f64) -> f64 {
    if t <= 0. {
        return 0.;
    }
    let x = PLANCK * SPEED_OF_LIGHT / (lambda * K_BOLTZMANN * t);
    2. * PLANCK * SPEED_OF_LIGHT * SPEED_OF_LIGHT / lambda.powi(5) / x.exp_m1()
}

/// Rebuild every derived radial field for the current torque profile.
pub fn compute_derived(
    law: &OpacityLaw,
    grid: &HGrid,
    state: &DiskState,
    irr: &IrradiationParams,
    colourfactor: f64,
) -> Derived {
    let nx = grid.nx;
    let (first, last) = (state.first, state.last);
    let gm = grid.gm;
    let mdot = state.mdot_in(&grid.h).max(0.);
    let r_in = grid.r[first];

    let mut w = Array1::zeros(nx);
    let mut sigma = Array1::zeros(nx);
    let mut height = Array1::zeros(nx);
    let mut tph_vis = Array1::zeros(nx);
    let mut tph_x = Array1::zeros(nx);
    let mut cirr = Array1::zeros(nx);
    let mut qx = Array1::zeros(nx);
    let mut tirr = Array1::zeros(nx);
    let mut tph = Array1::zeros(nx);

    for i in first..=last {
        let (f, h, r) = (state.f[i], grid.h[i], grid.r[i]);
        w[i] = law.w_of_f(f, h);
        sigma[i] = law.sigma_of_f(f, h);
        height[i] = law.height_of_f(f, h);
        tph_vis[i] = gm * h.powf(-1.75) * (0.75 * f / SIGMA_SB).powf(0.25);
        tph_x[i] = colourfactor * t_gr(r, gm, mdot, r_in);

        let h2r = height[i] / r;
        cirr[i] = irr.cirr * h2r.powf(irr.irrindex);
        let psi = match irr.angular_dist {
            AngularDist::Plane => 2. * h2r,
            AngularDist::Isotropic => 1.,
        };
        qx[i] = cirr[i] * psi * irr.eta * SPEED_OF_LIGHT * SPEED_OF_LIGHT * mdot
            / (4. * std::f64::consts::PI * r * r);
        tirr[i] = (qx[i] / SIGMA_SB).powf(0.25);
        tph[i] = (tph_vis[i].powi(4) + qx[i] / SIGMA_SB).powf(0.25);
    }

    Derived { w, sigma, height, tph_vis, tph_x, cirr, qx, tirr, tph }
}

/// Make sure the derived cache is populated and return it.
pub fn ensure_derived<'a>(
    law: &OpacityLaw,
    grid: &HGrid,
    state: &'a mut DiskState,
    irr: &IrradiationParams,
    colourfactor: f64,
) -> &'a Derived {
    if state.derived.is_none() {
        state.derived = Some(compute_derived(law, grid, state, irr, colourfactor));
    }
    state.derived.as_ref().expect("just populated")
}

/// Disk mass over the active window, Mdisk = π ∫ W dh.
pub fn disk_mass(law: &OpacityLaw, h: &Array1<f64>, f: &Array1<f64>, first: usize, last: usize) -> f64 {
    let hs: Vec<f64> = (first..=last).map(|i| h[i]).collect();
    let ws: Vec<f64> = (first..=last).map(|i| law.w_of_f(f[i], h[i])).collect();
    std::f64::consts::PI * trapezoid(&hs, &ws)
}

/// Band-limited luminosity ∫ 4πR [π ∫ B_ν(T) dν] dR over the active
/// window; frequency integral by Simpson with 100 sub-intervals.
pub fn band_luminosity(
    grid: &HGrid,
    t: &Array1<f64>,
    nu_min: f64,
    nu_max: f64,
    first: usize,
    last: usize,
) -> f64 {
    let rs: Vec<f64> = (first..=last).map(|i| grid.r[i]).collect();
    let ys: Vec<f64> = (first..=last)
        .map(|i| {
            let ti = t[i];
            let band = simpson(|nu| planck_nu(ti, nu), nu_min, nu_max, LX_SIMPSON_N);
            4. * std::f64::consts::PI.powi(2) * grid.r[i] * band
        })
        .collect();
    trapezoid(&rs, &ys)
}

/// Monochromatic surface integral ∫ B_λ(T) 2πR dR over the window.
pub fn i_lambda(
    grid: &HGrid,
    t: &Array1<f64>,
    lambda: f64,
    first: usize,
    last: usize,
) -> f64 {
    let rs: Vec<f64> = (first..=last).map(|i| grid.r[i]).collect();
    let ys: Vec<f64> = (first..=last)
        .map(|i| 2. * std::f64::consts::PI * grid.r[i] * planck_lambda(t[i], lambda))
        .collect();
    trapezoid(&rs, &ys)
}

/// Apparent magnitude against a zero-point flux F0.
pub fn magnitude(i_lambda_value: f64, cosi_over_d2: f64, f0: f64) -> f64 {
    -2.5 * (i_lambda_value * cosi_over_d2 / f0).log10()
}
