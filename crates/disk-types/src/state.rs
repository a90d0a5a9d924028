// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::Array1;

use crate::config::GridScale;
use crate::error::{DiskError, DiskResult};

/// Radial mesh in the specific-angular-momentum coordinate h = √(GM r).
///
/// The mesh never changes after construction; only the active window
/// of `DiskState` migrates over it.
#[derive(Debug, Clone)]
pub struct HGrid {
    pub nx: usize,
    pub gm: f64,
    /// h coordinates (cm²/s), strictly increasing
    pub h: Array1<f64>,
    /// Physical radii R = h²/GM (cm)
    pub r: Array1<f64>,
}

impl HGrid {
    pub fn new(nx: usize, r_in: f64, r_out: f64, scale: GridScale, gm: f64) -> DiskResult<Self> {
        if nx < 3 {
            return Err(DiskError::Domain(format!("Nx must be at least 3, got {nx}")));
        }
        if !(r_in > 0. && r_out.is_finite() && r_in < r_out) {
            return Err(DiskError::Domain(format!(
                "need 0 < r_in < r_out, got r_in = {r_in}, r_out = {r_out}"
            )));
        }
        if !(gm.is_finite() && gm > 0.) {
            return Err(DiskError::Domain(format!("GM must be finite and > 0, got {gm}")));
        }

        let h_in = (gm * r_in).sqrt();
        let h_out = (gm * r_out).sqrt();
        let h = match scale {
            GridScale::Log => Array1::from_shape_fn(nx, |i| {
                h_in * (h_out / h_in).powf(i as f64 / (nx - 1) as f64)
            }),
            GridScale::Linear => Array1::linspace(h_in, h_out, nx),
        };
        let r = h.mapv(|hi| hi * hi / gm);
        Ok(Self { nx, gm, h, r })
    }

    pub fn h_in(&self) -> f64 {
        self.h[0]
    }

    pub fn h_out(&self) -> f64 {
        self.h[self.nx - 1]
    }
}

/// Radial fields derived from the torque profile, rebuilt after every
/// diffusion step. Entries outside the active window are zero.
#[derive(Debug, Clone)]
pub struct Derived {
    pub w: Array1<f64>,
    pub sigma: Array1<f64>,
    pub height: Array1<f64>,
    pub tph_vis: Array1<f64>,
    pub tph_x: Array1<f64>,
    pub cirr: Array1<f64>,
    pub qx: Array1<f64>,
    pub tirr: Array1<f64>,
    pub tph: Array1<f64>,
}

/// Evolving disk state: the torque profile, the active window and the
/// scalar bookkeeping of the run.
#[derive(Debug, Clone)]
pub struct DiskState {
    /// Viscous torque per radian (cgs), zero outside [first, last]
    pub f: Array1<f64>,
    pub first: usize,
    pub last: usize,
    /// Current time (s)
    pub t: f64,
    /// Step index
    pub i_t: usize,
    /// Imposed outer mass-outflow rate, ≤ 0 (dF/dh units)
    pub mdot_out: f64,
    /// Inner torque boundary value
    pub f_in: f64,
    /// Fraction of the inner-edge flow that accretes (propeller); 1 otherwise
    pub fp: f64,
    /// Accretion rate of the previous step, for retreat hysteresis
    pub mdot_in_prev: f64,
    /// Largest accretion rate seen so far
    pub mdot_peak: f64,
    /// Lazily rebuilt derived fields; None right after a step
    pub derived: Option<Derived>,
}

impl DiskState {
    pub fn new(nx: usize) -> Self {
        Self {
            f: Array1::zeros(nx),
            first: 0,
            last: nx - 1,
            t: 0.,
            i_t: 0,
            mdot_out: 0.,
            f_in: 0.,
            fp: 1.,
            mdot_in_prev: f64::NEG_INFINITY,
            mdot_peak: f64::NEG_INFINITY,
            derived: None,
        }
    }

    /// Accretion rate at the inner edge, dF/dh convention.
    pub fn mdot_in_raw(&self, h: &Array1<f64>) -> f64 {
        let i = self.first;
        (self.f[i + 1] - self.f[i]) / (h[i + 1] - h[i])
    }

    /// Accretion rate actually reaching the central object.
    pub fn mdot_in(&self, h: &Array1<f64>) -> f64 {
        self.fp * self.mdot_in_raw(h)
    }

    /// Drop the derived-field cache; called after every mutation of `f`
    /// or the window.
    pub fn invalidate(&mut self) {
        self.derived = None;
    }
}
