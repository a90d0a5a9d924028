// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — Boundary
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Active-window tracking: the cold-front retreat of the outer edge and
//! the magnetospheric truncation of the inner edge.

use disk_types::config::BoundCond;
use disk_types::constants::DAY;
use disk_types::error::{DiskError, DiskResult};
use disk_types::state::{DiskState, HGrid};

use crate::ns::NeutronStar;
use crate::observables::{ensure_derived, IrradiationParams};
use crate::opacity::OpacityLaw;

/// Outer-boundary retreat controls.
#[derive(Debug, Clone, Copy)]
pub struct OuterBoundary {
    pub boundcond: BoundCond,
    /// Cold-front threshold temperature (K); ≤ 0 disables retreat
    pub thot: f64,
    /// Tirr/Tph_vis ratio switching to the Σ_minus criterion
    pub tirr2tvishot: f64,
}

impl OuterBoundary {
    /// Walk the outer edge inward while the retreat criterion holds.
    ///
    /// Skipped entirely while the inner accretion rate is still rising;
    /// that hysteresis keeps the hot zone intact through the outburst
    /// rise. Calling this twice without a diffusion step in between is a
    /// no-op the second time.
    pub fn update(
        &self,
        state: &mut DiskState,
        grid: &HGrid,
        law: &OpacityLaw,
        irr: &IrradiationParams,
        colourfactor: f64,
    ) -> DiskResult<()> {
        if self.thot <= 0. {
            return Ok(());
        }
        if state.mdot_in(&grid.h) > state.mdot_in_prev {
            return Ok(());
        }

        let (first, last) = (state.first, state.last);
        let (t_days, step) = (state.t / DAY, state.i_t);
        let new_last = {
            let der = ensure_derived(law, grid, state, irr, colourfactor);

            let ratio = if der.tph_vis[last] > 0. { der.tirr[last] / der.tph_vis[last] } else { 0. };
            let sigma_branch = ratio >= self.tirr2tvishot;

            let retreat = |ii: usize| -> bool {
                if sigma_branch {
                    der.sigma[ii] < law.sigma_minus(grid.r[ii])
                } else {
                    match self.boundcond {
                        BoundCond::Teff => der.tph[ii] < self.thot,
                        BoundCond::Tirr => der.tirr[ii] < self.thot,
                    }
                }
            };

            let mut ii = last;
            loop {
                if ii <= first {
                    return Err(DiskError::DiskExhausted { t_days, step });
                }
                if !retreat(ii) {
                    break;
                }
                ii -= 1;
            }
            ii
        };

        if new_last < last {
            for i in new_last + 1..=last {
                state.f[i] = 0.;
            }
            state.last = new_last;
            state.invalidate();
        }
        Ok(())
    }
}

/// Advance the inner edge to the magnetospheric radius of a neutron
/// star and refresh the accreted fraction f_p.
///
/// The inner edge only ever moves outward. Matter left inside the
/// magnetosphere is taken off the grid; the magnetosphere swallowing
/// the whole window is fatal.
pub fn inner_boundary(state: &mut DiskState, grid: &HGrid, ns: &NeutronStar) -> DiskResult<()> {
    let mdot_raw = state.mdot_in_raw(&grid.h).max(0.);
    let r_m = ns.magnetospheric_radius(grid.gm, mdot_raw);
    state.fp = ns.fp(r_m);

    if r_m <= grid.r[state.first] {
        return Ok(());
    }
    if r_m >= grid.r[state.last.saturating_sub(2)] {
        return Err(DiskError::DiskExhausted { t_days: state.t / DAY, step: state.i_t });
    }

    let mut new_first = state.first;
    while grid.r[new_first] < r_m {
        new_first += 1;
    }
    if new_first > state.first {
        for i in state.first..new_first {
            state.f[i] = 0.;
        }
        state.first = new_first;
        state.invalidate();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use disk_types::config::{AngularDist, FpType, GridScale, NeutronStarConfig, OpacityKind};
    use disk_types::constants::{GRAVITY, M_SUN};
    use ndarray::Array1;

    fn setup() -> (HGrid, OpacityLaw, IrradiationParams) {
        let law = OpacityLaw::new(OpacityKind::Kramers, 10. * M_SUN, 0.25).unwrap();
        let grid = HGrid::new(200, 1e8, 2e11, GridScale::Log, law.gm).unwrap();
        let irr = IrradiationParams {
            cirr: 0.,
            irrindex: 0.,
            angular_dist: AngularDist::Plane,
            eta: 0.06,
        };
        (grid, law, irr)
    }

    fn decayed_state(grid: &HGrid, f0: f64) -> DiskState {
        let mut state = DiskState::new(grid.nx);
        state.f = Array1::from_elem(grid.nx, f0);
        state.f[0] = 0.;
        // past peak: previous rate above the current one
        state.mdot_in_prev = f64::INFINITY;
        state
    }

    #[test]
    fn test_disabled_when_thot_nonpositive() {
        let (grid, law, irr) = setup();
        let mut state = decayed_state(&grid, 1e36);
        let outer = OuterBoundary { boundcond: BoundCond::Teff, thot: 0., tirr2tvishot: f64::INFINITY };
        outer.update(&mut state, &grid, &law, &irr, 1.7).unwrap();
        assert_eq!(state.last, grid.nx - 1);
    }

    #[test]
    fn test_no_retreat_while_rising() {
        let (grid, law, irr) = setup();
        let mut state = decayed_state(&grid, 1e36);
        state.mdot_in_prev = f64::NEG_INFINITY; // still rising
        let outer =
            OuterBoundary { boundcond: BoundCond::Teff, thot: 1e4, tirr2tvishot: f64::INFINITY };
        outer.update(&mut state, &grid, &law, &irr, 1.7).unwrap();
        assert_eq!(state.last, grid.nx - 1);
    }

    #[test]
    fn test_teff_retreat_stops_at_hot_material_and_is_idempotent() {
        let (grid, law, irr) = setup();
        let mut state = decayed_state(&grid, 1e36);
        let outer =
            OuterBoundary { boundcond: BoundCond::Teff, thot: 1e4, tirr2tvishot: f64::INFINITY };

        outer.update(&mut state, &grid, &law, &irr, 1.7).unwrap();
        let retreated = state.last;
        assert!(retreated < grid.nx - 1, "cold outer disk should retreat");
        assert!(retreated > 0);
        // the new edge is hot, everything beyond is zeroed
        let der = state.derived.clone().unwrap_or_else(|| {
            crate::observables::compute_derived(&law, &grid, &state, &irr, 1.7)
        });
        assert!(der.tph[retreated] >= 1e4);
        for i in retreated + 1..grid.nx {
            assert_eq!(state.f[i], 0.);
        }

        outer.update(&mut state, &grid, &law, &irr, 1.7).unwrap();
        assert_eq!(state.last, retreated, "second call with no diffusion must not move");
    }

    #[test]
    fn test_retreat_to_inner_edge_is_fatal() {
        let (grid, law, irr) = setup();
        let mut state = decayed_state(&grid, 1e36);
        let outer =
            OuterBoundary { boundcond: BoundCond::Teff, thot: 1e12, tirr2tvishot: f64::INFINITY };
        let err = outer.update(&mut state, &grid, &law, &irr, 1.7).unwrap_err();
        assert!(matches!(err, DiskError::DiskExhausted { .. }));
    }

    #[test]
    fn test_sigma_branch_when_irradiation_dominates() {
        let (grid, law, irr) = setup();
        // tirr2tvishot = 0 forces the irradiation-dominated branch; a weak
        // disk then retreats to where Σ clears the Menou et al. threshold
        let mut state = decayed_state(&grid, 1e34);
        let outer = OuterBoundary { boundcond: BoundCond::Teff, thot: 1e4, tirr2tvishot: 0. };
        outer.update(&mut state, &grid, &law, &irr, 1.7).unwrap();
        let ii = state.last;
        assert!(ii < grid.nx - 1);
        let sigma = law.sigma_of_f(state.f[ii], grid.h[ii]);
        assert!(sigma >= law.sigma_minus(grid.r[ii]), "edge must sit on the hot branch");
    }

    #[test]
    fn test_tirr_criterion_uses_irradiation_temperature() {
        let (grid, law, _) = setup();
        let irr_strong = IrradiationParams {
            cirr: 0.5,
            irrindex: 0.,
            angular_dist: AngularDist::Isotropic,
            eta: 0.1,
        };
        let mut state = decayed_state(&grid, 1e36);
        // linear ramp gives a healthy Mdot_in, so Tirr > 0
        let h_in = grid.h_in();
        let span = grid.h_out() - h_in;
        state.f = grid.h.mapv(|h| 1e36 * (h - h_in) / span);
        let outer =
            OuterBoundary { boundcond: BoundCond::Tirr, thot: 2e4, tirr2tvishot: f64::INFINITY };
        outer.update(&mut state, &grid, &law, &irr_strong, 1.7).unwrap();
        assert!(state.last < grid.nx - 1);
        let der = crate::observables::compute_derived(&law, &grid, &state, &irr_strong, 1.7);
        assert!(der.tirr[state.last] >= 2e4);
    }

    // ── inner boundary ───────────────────────────────────────────────

    fn ns_setup() -> (HGrid, NeutronStar) {
        let gm = GRAVITY * 1.4 * M_SUN;
        let grid = HGrid::new(300, 1.3e6, 1e11, GridScale::Log, gm).unwrap();
        let cfg = NeutronStarConfig {
            bx: 1e12,
            freqx: Some(500.),
            rx: Some(1e6),
            fptype: FpType::Propeller,
            ..Default::default()
        };
        let ns = NeutronStar::from_config(&cfg, gm, 1.24e6).unwrap();
        (grid, ns)
    }

    #[test]
    fn test_inner_truncation_tracks_magnetospheric_radius() {
        let (grid, ns) = ns_setup();
        let mut state = DiskState::new(grid.nx);
        let h_in = grid.h_in();
        let span = grid.h_out() - h_in;
        state.f = grid.h.mapv(|h| 1e36 * (h - h_in) / span);

        let mdot = state.mdot_in_raw(&grid.h);
        let r_m = ns.magnetospheric_radius(grid.gm, mdot);
        inner_boundary(&mut state, &grid, &ns).unwrap();

        assert!(grid.r[state.first] >= r_m, "R[first] must clear R_m");
        assert!(state.first > 0);
        if state.first > 0 {
            assert!(grid.r[state.first - 1] < r_m, "truncation overshot");
        }
        for i in 0..state.first {
            assert_eq!(state.f[i], 0.);
        }
        // propeller: R_m far beyond corotation blocks accretion entirely
        assert!(r_m > ns.r_cor);
        assert_eq!(state.fp, 0.);
        assert_eq!(state.mdot_in(&grid.h), 0.);
    }

    #[test]
    fn test_inner_edge_never_recedes() {
        let (grid, ns) = ns_setup();
        let mut state = DiskState::new(grid.nx);
        let h_in = grid.h_in();
        let span = grid.h_out() - h_in;
        state.f = grid.h.mapv(|h| 1e36 * (h - h_in) / span);

        inner_boundary(&mut state, &grid, &ns).unwrap();
        let first_once = state.first;
        // crank the torque up: R_m shrinks, but the window must not grow back
        state.f.mapv_inplace(|v| 100. * v);
        inner_boundary(&mut state, &grid, &ns).unwrap();
        assert!(state.first >= first_once);
    }

    #[test]
    fn test_dead_disk_swallowing_window_is_fatal() {
        let (grid, ns) = ns_setup();
        let mut state = DiskState::new(grid.nx);
        // no torque at all: R_m → ∞ with no dead-disk cap
        let err = inner_boundary(&mut state, &grid, &ns).unwrap_err();
        assert!(matches!(err, DiskError::DiskExhausted { .. }));
    }
}
