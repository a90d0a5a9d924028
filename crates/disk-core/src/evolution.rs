// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — Evolution
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The time-stepping loop. One `step` is: inner boundary (neutron star
//! only) → implicit diffusion → cache invalidation → outer boundary →
//! hysteresis and peak bookkeeping. The evolver exclusively owns its
//! `DiskState`; independent evolutions may run on separate threads.

use disk_types::config::DiskConfig;
use disk_types::constants::{DAY, PASSBANDS};
use disk_types::error::DiskResult;
use disk_types::state::{Derived, DiskState, HGrid};

use crate::boundary::{inner_boundary, OuterBoundary};
use crate::diffusion::diffusion_step;
use crate::observables::{band_luminosity, disk_mass, ensure_derived, i_lambda, magnitude};
use crate::opacity::OpacityLaw;
use crate::params::RunParams;
use crate::wind::WindSources;

pub struct Evolution {
    pub params: RunParams,
    pub law: OpacityLaw,
    pub grid: HGrid,
    pub wind: WindSources,
    pub state: DiskState,
    outer: OuterBoundary,
}

impl Evolution {
    pub fn new(cfg: &DiskConfig) -> DiskResult<Self> {
        Self::from_params(RunParams::from_config(cfg)?)
    }

    pub fn from_params(params: RunParams) -> DiskResult<Self> {
        let law = OpacityLaw::new(params.opacity, params.mx, params.alpha)?;
        let grid = HGrid::new(params.nx, params.r_in, params.r_out, params.gridscale, params.gm)?;

        let mut state = DiskState::new(grid.nx);
        state.f = params.initialcond.build(&grid, &law)?;
        state.mdot_out = params.mdot_out;
        state.f[0] = state.f_in;

        let mut wind = WindSources::build(params.windtype, &params.windparams, &grid)?;
        if let Some(star) = &params.ns {
            wind.c += &star.magnetic_wind_c(&grid);
        }

        let outer = OuterBoundary {
            boundcond: params.boundcond,
            thot: params.thot,
            tirr2tvishot: params.tirr2tvishot,
        };

        Ok(Self { params, law, grid, wind, state, outer })
    }

    /// Advance the disk by one substep of length `tau` (seconds).
    pub fn step(&mut self, tau: f64) -> DiskResult<()> {
        if let Some(star) = &self.params.ns {
            inner_boundary(&mut self.state, &self.grid, star)?;
        }

        diffusion_step(
            tau,
            &self.params.solver,
            self.state.f_in,
            self.state.mdot_out,
            &self.wind,
            &self.law,
            &self.grid.h,
            &mut self.state.f,
            self.state.first,
            self.state.last,
        )?;
        self.state.t += tau;
        self.state.i_t += 1;
        self.state.invalidate();

        self.outer.update(
            &mut self.state,
            &self.grid,
            &self.law,
            &self.params.irr,
            self.params.colourfactor,
        )?;

        let mdot = self.state.mdot_in(&self.grid.h);
        self.state.mdot_peak = self.state.mdot_peak.max(mdot);
        self.state.mdot_in_prev = mdot;
        Ok(())
    }

    /// Run from t = 0 to `params.time` in substeps of `params.tau`,
    /// handing the evolver to `snapshot` after construction and after
    /// every step. On a fatal step the snapshots already taken stand.
    pub fn evolve<S>(&mut self, mut snapshot: S) -> DiskResult<()>
    where
        S: FnMut(&mut Evolution) -> DiskResult<()>,
    {
        snapshot(self)?;
        let n_steps = (self.params.time / self.params.tau).round() as usize;
        for _ in 0..n_steps {
            self.step(self.params.tau)?;
            snapshot(self)?;
        }
        Ok(())
    }

    // ── observables ──────────────────────────────────────────────────

    pub fn t_days(&self) -> f64 {
        self.state.t / DAY
    }

    /// Accretion rate onto the central object (dF/dh convention).
    pub fn mdot_in(&self) -> f64 {
        self.state.mdot_in(&self.grid.h)
    }

    pub fn derived(&mut self) -> &Derived {
        ensure_derived(
            &self.law,
            &self.grid,
            &mut self.state,
            &self.params.irr,
            self.params.colourfactor,
        )
    }

    /// X-ray luminosity in [emin, emax], colour-corrected.
    pub fn lx(&mut self) -> f64 {
        let (first, last) = (self.state.first, self.state.last);
        let (emin, emax) = (self.params.emin, self.params.emax);
        let fc4 = self.params.colourfactor.powi(4);
        let grid = &self.grid;
        let der = ensure_derived(
            &self.law,
            grid,
            &mut self.state,
            &self.params.irr,
            self.params.colourfactor,
        );
        band_luminosity(grid, &der.tph_x, emin, emax, first, last) / fc4
    }

    /// Johnson U,B,V,R,I,J magnitudes; NaN without a distance.
    pub fn magnitudes(&mut self) -> [f64; 6] {
        let (first, last) = (self.state.first, self.state.last);
        let cosi_over_d2 = self.params.cosi_over_d2;
        let grid = &self.grid;
        let der = ensure_derived(
            &self.law,
            grid,
            &mut self.state,
            &self.params.irr,
            self.params.colourfactor,
        );
        let mut out = [f64::NAN; 6];
        for (slot, band) in out.iter_mut().zip(PASSBANDS.iter()) {
            *slot = magnitude(
                i_lambda(grid, &der.tph, band.lambda, first, last),
                cosi_over_d2,
                band.f0,
            );
        }
        out
    }

    /// Mass of the hot disk, π ∫ W dh.
    pub fn mdisk(&self) -> f64 {
        disk_mass(&self.law, &self.grid.h, &self.state.f, self.state.first, self.state.last)
    }

    /// Aspect ratio H/R at the hot edge.
    pub fn h2r_out(&mut self) -> f64 {
        let last = self.state.last;
        let r = self.grid.r[last];
        self.derived().height[last] / r
    }

    /// Hot-zone radius over the full disk radius.
    pub fn rhot2rout(&self) -> f64 {
        self.grid.r[self.state.last] / self.params.r_out
    }

    /// Photospheric temperature at the hot edge.
    pub fn tph_out(&mut self) -> f64 {
        let last = self.state.last;
        self.derived().tph[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use disk_types::config::{BoundCond, InitialCondKind};

    fn bh_config(nx: usize, time_days: f64) -> DiskConfig {
        let mut cfg = DiskConfig::default();
        cfg.basic.mx = Some(10.);
        cfg.basic.mopt = Some(0.5);
        cfg.basic.period = Some(0.5);
        cfg.basic.alpha = 0.3;
        cfg.disk.f0 = Some(1e37);
        cfg.calc.time = Some(time_days);
        cfg.calc.tau = Some(0.25);
        cfg.calc.nx = nx;
        cfg
    }

    #[test]
    fn test_construction_wires_grid_and_profile() {
        let ev = Evolution::new(&bh_config(128, 10.)).unwrap();
        assert_eq!(ev.grid.nx, 128);
        assert_eq!(ev.state.f[0], 0.);
        assert!((ev.state.f[127] / 1e37 - 1.).abs() < 1e-10);
        assert_eq!(ev.state.first, 0);
        assert_eq!(ev.state.last, 127);
    }

    #[test]
    fn test_step_advances_clock_and_invalidate() {
        let mut ev = Evolution::new(&bh_config(96, 10.)).unwrap();
        let _ = ev.derived();
        assert!(ev.state.derived.is_some());
        ev.step(ev.params.tau).unwrap();
        assert_eq!(ev.state.i_t, 1);
        assert!((ev.t_days() - 0.25).abs() < 1e-12);
        assert!(ev.state.derived.is_none(), "step must drop the derived cache");
    }

    #[test]
    fn test_evolve_snapshots_every_step() {
        let mut ev = Evolution::new(&bh_config(96, 5.)).unwrap();
        let mut rows = 0;
        ev.evolve(|_| {
            rows += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(rows, 21); // t = 0 plus 20 steps of 0.25 d
    }

    #[test]
    fn test_observables_are_finite_and_positive() {
        let mut cfg = bh_config(128, 10.);
        // sinusF has a healthy inner slope from the start, so every
        // observable is live after a few steps
        cfg.disk.initialcond = InitialCondKind::SinusF;
        let mut ev = Evolution::new(&cfg).unwrap();
        for _ in 0..4 {
            ev.step(ev.params.tau).unwrap();
        }
        assert!(ev.mdot_in() > 0.);
        assert!(ev.lx() > 0.);
        assert!(ev.mdisk() > 0.);
        assert!(ev.h2r_out() > 0. && ev.h2r_out() < 1.);
        assert!((ev.rhot2rout() - 1.).abs() < 1e-12);
        assert!(ev.tph_out() > 0.);
        // no distance configured → magnitudes are NaN, not garbage
        assert!(ev.magnitudes().iter().all(|m| m.is_nan()));
    }

    #[test]
    fn test_quiescent_disk_boundcond_teff_retreats_after_peak() {
        let mut cfg = bh_config(128, 20.);
        cfg.disk.boundcond = BoundCond::Teff;
        cfg.disk.thot = 1e4;
        cfg.disk.initialcond = InitialCondKind::PowerF;
        cfg.disk.powerorder = 6.;
        let mut ev = Evolution::new(&cfg).unwrap();

        let mut lasts = Vec::new();
        let mut mdots = Vec::new();
        ev.evolve(|e| {
            lasts.push(e.state.last);
            mdots.push(e.mdot_in());
            Ok(())
        })
        .unwrap();

        let peak = mdots.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        // hysteresis: by the time the front first moves, the rate has
        // essentially topped out
        let first_retreat = lasts.iter().position(|&l| l < ev.grid.nx - 1).unwrap();
        assert!(mdots[first_retreat] >= 0.5 * peak);
        // and the window is strictly smaller by the end of the decay
        assert!(ev.state.last < ev.grid.nx - 1);
        // window never grows
        for pair in lasts.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
    }
}
