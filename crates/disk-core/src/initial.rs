// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — Initial
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Initial viscous-torque profiles F(h, t=0).
//!
//! A profile is a unit shape picked by `InitialCondKind` times an
//! amplitude, which is either given directly (`F0`) or solved for from
//! a disk-mass or accretion-rate target by bisection.

use ndarray::Array1;

use disk_math::root::bisect;
use disk_types::config::InitialCondKind;
use disk_types::error::{DiskError, DiskResult};
use disk_types::state::HGrid;

use crate::observables::disk_mass;
use crate::opacity::OpacityLaw;

/// How the overall torque normalisation is fixed.
#[derive(Debug, Clone, Copy)]
pub enum Amplitude {
    /// Torque scale directly (cgs)
    F0(f64),
    /// Initial disk mass (g)
    Mdisk0(f64),
    /// Initial maximum inward drift rate, dF/dh convention (g/s)
    Mdot0(f64),
}

#[derive(Debug, Clone)]
pub struct InitialCondition {
    pub kind: InitialCondKind,
    pub powerorder: f64,
    pub gaussmu: f64,
    pub gausssigma: f64,
    pub amplitude: Amplitude,
}

impl InitialCondition {
    /// Evaluate F on the grid.
    pub fn build(&self, grid: &HGrid, law: &OpacityLaw) -> DiskResult<Array1<f64>> {
        let shape = self.unit_shape(grid, law)?;
        let f0 = self.resolve_amplitude(&shape, grid, law)?;
        Ok(shape.mapv(|s| f0 * s))
    }

    /// Dimensionless profile with unit normalisation.
    fn unit_shape(&self, grid: &HGrid, law: &OpacityLaw) -> DiskResult<Array1<f64>> {
        let h_in = grid.h_in();
        let h_out = grid.h_out();
        let span = h_out - h_in;
        let xi = grid.h.mapv(|h| (h - h_in) / span);

        let shape = match self.kind {
            InitialCondKind::PowerF => {
                if self.powerorder < 0. {
                    return Err(DiskError::Domain(format!(
                        "powerorder must be >= 0, got {}",
                        self.powerorder
                    )));
                }
                xi.mapv(|x| x.powf(self.powerorder))
            }
            InitialCondKind::SinusF => xi.mapv(|x| (x * std::f64::consts::FRAC_PI_2).sin()),
            InitialCondKind::GaussF => {
                if !(self.gausssigma > 0.) {
                    return Err(DiskError::Domain(format!(
                        "gausssigma must be > 0, got {}",
                        self.gausssigma
                    )));
                }
                let mu = self.gaussmu * h_out;
                let sig = self.gausssigma * h_out;
                grid.h
                    .mapv(|h| (-(h - mu) * (h - mu) / (2. * sig * sig)).exp().max(0.))
            }
            InitialCondKind::Quasistat => {
                let norm = law.quasistat_shape(1.);
                xi.mapv(|x| law.quasistat_shape(x) / norm)
            }
            InitialCondKind::PowerSigma => {
                if self.powerorder < 0. {
                    return Err(DiskError::Domain(format!(
                        "powerorder must be >= 0, got {}",
                        self.powerorder
                    )));
                }
                // Σ ∝ ξ^p; invert W(F) = 4 Σ h³/(GM)² for F and normalise
                // to unit torque at the outer edge.
                let p = self.powerorder;
                let f_of = |x: f64, h: f64| law.f_of_sigma(x.powf(p), h);
                let f_out = f_of(1., h_out);
                Array1::from_shape_fn(grid.nx, |i| f_of(xi[i], grid.h[i]) / f_out)
            }
        };
        Ok(shape)
    }

    fn resolve_amplitude(
        &self,
        shape: &Array1<f64>,
        grid: &HGrid,
        law: &OpacityLaw,
    ) -> DiskResult<f64> {
        match self.amplitude {
            Amplitude::F0(f0) => {
                if !(f0.is_finite() && f0 >= 0.) {
                    return Err(DiskError::Domain(format!("F0 must be finite and >= 0, got {f0}")));
                }
                Ok(f0)
            }
            Amplitude::Mdisk0(mass) => {
                if !(mass.is_finite() && mass > 0.) {
                    return Err(DiskError::Domain(format!(
                        "Mdisk0 must be finite and > 0, got {mass}"
                    )));
                }
                let mass_of = |f0: f64| {
                    let f = shape.mapv(|s| f0 * s);
                    disk_mass(law, &grid.h, &f, 0, grid.nx - 1)
                };
                bisect(|f0| mass_of(f0) - mass, 0., 1e45, 1e-10, 300)
            }
            Amplitude::Mdot0(mdot) => {
                if !(mdot.is_finite() && mdot > 0.) {
                    return Err(DiskError::Domain(format!(
                        "Mdot0 must be finite and > 0, got {mdot}"
                    )));
                }
                // amplitude such that the steepest grid slope equals Mdot0
                let slope = (1..grid.nx)
                    .map(|i| (shape[i] - shape[i - 1]) / (grid.h[i] - grid.h[i - 1]))
                    .fold(0_f64, f64::max);
                if slope <= 0. {
                    return Err(DiskError::Domain(
                        "initial profile has no positive slope to scale by Mdot0".into(),
                    ));
                }
                bisect(|f0| f0 * slope - mdot, 0., 1e45, 1e-12, 300)
            }
        }
    }
}
