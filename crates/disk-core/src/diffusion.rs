// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — Diffusion
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Implicit step of the nonlinear viscous diffusion equation
//!
//! ```text
//! ∂W(F,h)/∂t = ∂²F/∂h² + A(h)·F + B(h)·∂F/∂h + C(h)
//! ```
//!
//! Fully implicit in time (order 1), central differences in space
//! (order 2) on the non-uniform h-mesh. W is Newton-linearised around
//! the previous iterate, dW/dF = (1−m) W/F, and the resulting
//! tridiagonal system is swept until the pointwise change in F falls
//! below `eps · max F`.
//!
//! Boundary rows: Dirichlet F = F_in at `first`; imposed outflow flux
//! F[last] − F[last−1] = Mdot_out · Δh at `last`, so a negative
//! Mdot_out drains mass through the outer edge.

use ndarray::Array1;

use disk_math::tridiag::thomas_solve;
use disk_types::error::{DiskError, DiskResult};

use crate::opacity::OpacityLaw;
use crate::wind::WindSources;

/// Documented controls of the nonlinear inner loop.
#[derive(Debug, Clone, Copy)]
pub struct SolverParams {
    /// Relative convergence tolerance on F
    pub eps: f64,
    /// Hard cap on Newton sweeps per step
    pub max_iter: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self { eps: 1e-6, max_iter: 50 }
    }
}

/// Advance `f` on the window [first, last] by one implicit step of
/// length `tau`. `f` outside the window is left untouched.
#[allow(clippy::too_many_arguments)]
pub fn diffusion_step(
    tau: f64,
    params: &SolverParams,
    f_in: f64,
    mdot_out: f64,
    wind: &WindSources,
    law: &OpacityLaw,
    h: &Array1<f64>,
    f: &mut Array1<f64>,
    first: usize,
    last: usize,
) -> DiskResult<()> {
    if !(tau.is_finite() && tau > 0.) {
        return Err(DiskError::Domain(format!("tau must be finite and > 0, got {tau}")));
    }
    if last <= first + 1 || last >= h.len() {
        return Err(DiskError::Domain(format!(
            "active window [{first}, {last}] is too narrow for a diffusion step"
        )));
    }

    let n = last - first + 1;
    let w_old: Vec<f64> = (first..=last).map(|i| law.w_of_f(f[i], h[i])).collect();

    let mut f_cur: Vec<f64> = (first..=last).map(|i| f[i]).collect();
    let mut a = vec![0.0; n];
    let mut b = vec![0.0; n];
    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];

    let mut residual = f64::INFINITY;
    for _ in 0..params.max_iter {
        let f_max = f_cur.iter().cloned().fold(0.0_f64, f64::max);
        let f_floor = if f_max > 0. { params.eps * f_max } else { 1.0 };

        // Dirichlet inner row
        b[0] = 1.;
        c[0] = 0.;
        d[0] = f_in;

        for k in 1..n - 1 {
            let i = first + k;
            let dm = h[i] - h[i - 1];
            let dp = h[i + 1] - h[i];
            let span = dm + dp;
            let cp = 2. / (span * dp);
            let cm = 2. / (span * dm);
            let cb = 1. / span;

            let w_j = law.w_of_f(f_cur[k], h[i]);
            let g = law.dw_df(f_cur[k], h[i], f_floor) / tau;

            a[k] = -cm + wind.b[i] * cb;
            b[k] = g + cp + cm - wind.a[i];
            c[k] = -cp - wind.b[i] * cb;
            d[k] = g * f_cur[k] - (w_j - w_old[k]) / tau + wind.c[i];
        }

        // imposed outer flux row
        a[n - 1] = -1.;
        b[n - 1] = 1.;
        d[n - 1] = mdot_out * (h[last] - h[last - 1]);

        let mut f_new = thomas_solve(&a, &b, &c, &d)?;

        // clip roundoff negatives, reject real ones
        let new_max = f_new.iter().cloned().fold(0.0_f64, f64::max);
        let clip = 10. * params.eps * new_max;
        for (k, v) in f_new.iter_mut().enumerate() {
            if *v < 0. {
                if *v >= -clip {
                    *v = 0.;
                } else {
                    return Err(DiskError::Domain(format!(
                        "torque went negative at node {} during a diffusion step: F = {:e}",
                        first + k,
                        *v
                    )));
                }
            }
        }

        residual = f_cur
            .iter()
            .zip(f_new.iter())
            .map(|(old, new)| (old - new).abs())
            .fold(0.0_f64, f64::max);
        f_cur = f_new;

        if residual <= params.eps * new_max {
            for (k, i) in (first..=last).enumerate() {
                f[i] = f_cur[k];
            }
            return Ok(());
        }
    }

    Err(DiskError::SolverDiverged { iteration: params.max_iter, residual })
}

#[cfg(test)]
mod tests {
    use super::*;
    use disk_types::config::{GridScale, OpacityKind};
    use disk_types::constants::{DAY, M_SUN};
    use disk_types::state::HGrid;

    fn setup(nx: usize) -> (HGrid, OpacityLaw) {
        let law = OpacityLaw::new(OpacityKind::Kramers, 10. * M_SUN, 0.25).unwrap();
        let grid = HGrid::new(nx, 1e9, 2e11, GridScale::Log, law.gm).unwrap();
        (grid, law)
    }

    #[test]
    fn test_uniform_torque_is_stationary() {
        // powerF with powerorder 0 and matching boundary values: δ²F = 0,
        // zero flux, zero source → nothing may move.
        let (grid, law) = setup(80);
        let f0 = 1e36;
        let mut f = Array1::from_elem(grid.nx, f0);
        let wind = WindSources::none(grid.nx);
        let params = SolverParams::default();

        diffusion_step(0.25 * DAY, &params, f0, 0., &wind, &law, &grid.h, &mut f, 0, grid.nx - 1)
            .unwrap();

        for &v in f.iter() {
            assert!((v / f0 - 1.).abs() <= params.eps, "F drifted to {v:e}");
        }
    }

    #[test]
    fn test_linear_torque_with_matching_flux_is_stationary() {
        // F = s·(h − h_in) is annihilated by the second difference on any
        // mesh; an outer row carrying the same slope keeps it frozen.
        let (grid, law) = setup(70);
        let s = 1e18;
        let mut f = grid.h.mapv(|h| s * (h - grid.h_in()));
        let before = f.clone();
        let wind = WindSources::none(grid.nx);
        let params = SolverParams::default();

        diffusion_step(0.25 * DAY, &params, 0., s, &wind, &law, &grid.h, &mut f, 0, grid.nx - 1)
            .unwrap();

        let f_max = before.iter().cloned().fold(0.0_f64, f64::max);
        for i in 0..grid.nx {
            assert!(
                (f[i] - before[i]).abs() <= 2. * params.eps * f_max,
                "node {i} moved: {} -> {}",
                before[i],
                f[i]
            );
        }
    }

    #[test]
    fn test_sinus_profile_decays_and_stays_positive() {
        let (grid, law) = setup(120);
        let h_in = grid.h_in();
        let span = grid.h_out() - h_in;
        let mut f = grid
            .h
            .mapv(|h| 1e36 * ((h - h_in) / span * std::f64::consts::FRAC_PI_2).sin());
        let wind = WindSources::none(grid.nx);
        let params = SolverParams::default();

        let w_sum_before: f64 = f.iter().zip(grid.h.iter()).map(|(&fi, &hi)| law.w_of_f(fi, hi)).sum();
        for _ in 0..20 {
            diffusion_step(
                0.25 * DAY,
                &params,
                0.,
                0.,
                &wind,
                &law,
                &grid.h,
                &mut f,
                0,
                grid.nx - 1,
            )
            .unwrap();
        }
        let w_sum_after: f64 = f.iter().zip(grid.h.iter()).map(|(&fi, &hi)| law.w_of_f(fi, hi)).sum();

        assert!(f.iter().all(|&v| v >= 0.), "negative torque after decay");
        assert!(w_sum_after < w_sum_before, "accreting disk must lose mass");
        // interior stays ordered below the fixed outer amplitude
        assert!(f[grid.nx / 2] < 1e36);
    }

    #[test]
    fn test_accretion_rate_develops_at_inner_edge() {
        // steep power-law start: the front diffuses inward and the inner
        // slope grows within a few steps
        let (grid, law) = setup(150);
        let h_in = grid.h_in();
        let span = grid.h_out() - h_in;
        let mut f = grid.h.mapv(|h| 1e37 * ((h - h_in) / span).powi(6));
        let wind = WindSources::none(grid.nx);
        let params = SolverParams::default();

        let slope0 = (f[1] - f[0]) / (grid.h[1] - grid.h[0]);
        for _ in 0..8 {
            diffusion_step(
                0.25 * DAY,
                &params,
                0.,
                0.,
                &wind,
                &law,
                &grid.h,
                &mut f,
                0,
                grid.nx - 1,
            )
            .unwrap();
        }
        let slope1 = (f[1] - f[0]) / (grid.h[1] - grid.h[0]);
        assert!(slope1 > slope0, "inner accretion rate should grow: {slope0} -> {slope1}");
        assert!(slope1 > 0.);
    }

    #[test]
    fn test_zero_iteration_budget_reports_divergence() {
        let (grid, law) = setup(40);
        let h_in = grid.h_in();
        let span = grid.h_out() - h_in;
        let mut f = grid.h.mapv(|h| 1e36 * (h - h_in) / span * 0.5);
        let wind = WindSources::none(grid.nx);
        let params = SolverParams { eps: 1e-6, max_iter: 0 };

        let err = diffusion_step(
            0.25 * DAY,
            &params,
            0.,
            0.,
            &wind,
            &law,
            &grid.h,
            &mut f,
            0,
            grid.nx - 1,
        )
        .unwrap_err();
        assert!(matches!(err, DiskError::SolverDiverged { .. }));
    }

    #[test]
    fn test_window_outside_left_untouched() {
        let (grid, law) = setup(60);
        let mut f = Array1::from_elem(grid.nx, 1e35);
        f[0] = 0.;
        f[1] = 0.;
        let wind = WindSources::none(grid.nx);
        let params = SolverParams::default();

        diffusion_step(
            0.1 * DAY,
            &params,
            1e35,
            0.,
            &wind,
            &law,
            &grid.h,
            &mut f,
            2,
            grid.nx - 1,
        )
        .unwrap();
        assert_eq!(f[0], 0.);
        assert_eq!(f[1], 0.);
    }
}
