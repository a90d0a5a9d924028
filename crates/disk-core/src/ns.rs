// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — Neutron Star
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Magnetized neutron-star accretor: magnetospheric truncation, the
//! propeller accreted-fraction family and the magnetic torque source.

use ndarray::Array1;

use disk_types::config::{FpType, NeutronStarConfig, NsProp};
use disk_types::constants::SIGMA_SB;
use disk_types::error::{DiskError, DiskResult};
use disk_types::state::HGrid;

/// Magnetic-torque normalisation κ_t.
const KAPPA_T: f64 = 1. / 3.;

/// Derived neutron-star quantities, immutable over a run.
#[derive(Debug, Clone)]
pub struct NeutronStar {
    pub nsprop: NsProp,
    pub bx: f64,
    pub freqx: f64,
    pub rx: f64,
    /// Magnetic dipole moment μ = Bx Rx³/2 (G cm³)
    pub mu_magn: f64,
    /// Corotation radius; ∞ for a non-rotating star
    pub r_cor: f64,
    /// h at the corotation radius
    h_cor: f64,
    /// Smallest admissible inner radius
    pub r_m_min: f64,
    /// Dead-disk cap on R_m; ≤ 0 disables the cap
    pub rdead: f64,
    pub epsilon_alfven: f64,
    pub inversebeta: f64,
    pub fptype: FpType,
    pub fpparams: Vec<f64>,
    pub hotspotarea: f64,
}

/// Sibgatullin & Sunyaev 2000 neutron-star radius (cm) as a function of
/// spin frequency (Hz); their eq. 25.
pub fn sibsun2000_radius_ns(freqx: f64) -> f64 {
    let x = freqx / 1000.;
    1e5 * (12.44 - 3.061 * x + 0.843 * x * x + 0.6 * x.powi(3) + 1.56 * x.powi(4))
}

/// Sibgatullin & Sunyaev 2000 ISCO radius (cm); their eqs. 3 and 26.
pub fn sibsun2000_radius_isco(freqx: f64) -> f64 {
    let x = freqx / 1000.;
    1e5 * (1.44 - 3.061 * x + 0.843 * x * x + 0.6 * x.powi(3) - 0.22 * x.powi(4))
        + sibsun2000_radius_ns(freqx)
}

impl NeutronStar {
    pub fn from_config(cfg: &NeutronStarConfig, gm: f64, risco: f64) -> DiskResult<Self> {
        let freqx = match (cfg.nsprop, cfg.freqx) {
            (NsProp::Dummy, f) => f.unwrap_or(0.),
            (NsProp::SibgatullinSunyaev2000, Some(f)) => f,
            (NsProp::SibgatullinSunyaev2000, None) => {
                return Err(DiskError::Config(
                    "freqx must be specified for nsprop=sibgatullinsunyaev2000".into(),
                ))
            }
        };
        if !(freqx.is_finite() && freqx >= 0.) {
            return Err(DiskError::Domain(format!("freqx must be finite and >= 0, got {freqx}")));
        }
        let rx = match cfg.nsprop {
            NsProp::Dummy => cfg.rx.unwrap_or(1e6),
            NsProp::SibgatullinSunyaev2000 => cfg.rx.unwrap_or_else(|| sibsun2000_radius_ns(freqx)),
        };
        if !(rx > 0. && rx.is_finite()) {
            return Err(DiskError::Domain(format!("Rx must be finite and > 0, got {rx}")));
        }
        if !(cfg.bx.is_finite() && cfg.bx >= 0.) {
            return Err(DiskError::Domain(format!("Bx must be finite and >= 0, got {}", cfg.bx)));
        }
        if !(cfg.epsilon_alfven.is_finite() && cfg.epsilon_alfven > 0.) {
            return Err(DiskError::Domain(format!(
                "epsilonAlfven must be finite and > 0, got {}",
                cfg.epsilon_alfven
            )));
        }
        if !(cfg.hotspotarea > 0. && cfg.hotspotarea <= 1.) {
            return Err(DiskError::Domain(format!(
                "hotspotarea must lie in (0, 1], got {}",
                cfg.hotspotarea
            )));
        }
        if !(cfg.inversebeta.is_finite() && cfg.inversebeta >= 0.) {
            return Err(DiskError::Domain(format!(
                "inversebeta must be finite and >= 0, got {}",
                cfg.inversebeta
            )));
        }

        let r_cor = if freqx > 0. {
            (gm / (2. * std::f64::consts::PI * freqx).powi(2)).cbrt()
        } else {
            f64::INFINITY
        };
        let h_cor = if r_cor.is_finite() { (gm * r_cor).sqrt() } else { f64::INFINITY };

        Ok(Self {
            nsprop: cfg.nsprop,
            bx: cfg.bx,
            freqx,
            rx,
            mu_magn: cfg.bx * rx.powi(3) / 2.,
            r_cor,
            h_cor,
            r_m_min: rx.max(risco),
            rdead: cfg.rdead,
            epsilon_alfven: cfg.epsilon_alfven,
            inversebeta: cfg.inversebeta,
            fptype: cfg.fptype,
            fpparams: cfg.fpparams.clone(),
            hotspotarea: cfg.hotspotarea,
        })
    }

    /// Magnetospheric (Alfvén) radius for the current accretion rate,
    /// clamped to [R_m_min, Rdead].
    pub fn magnetospheric_radius(&self, gm: f64, mdot: f64) -> f64 {
        let raw = if mdot > 0. {
            self.epsilon_alfven * (self.mu_magn.powi(4) / (2. * gm * mdot * mdot)).powf(1. / 7.)
        } else {
            f64::INFINITY
        };
        let clamped = raw.max(self.r_m_min);
        if self.rdead > 0. {
            clamped.min(self.rdead)
        } else {
            clamped
        }
    }

    /// Fastness parameter ω_s = (R_m/R_cor)^(3/2) = Ω_star/Ω_K(R_m).
    pub fn fastness(&self, r_m: f64) -> f64 {
        if self.r_cor.is_finite() {
            (r_m / self.r_cor).powf(1.5)
        } else {
            0.
        }
    }

    /// Fraction of the inner-edge flow that reaches the stellar surface.
    pub fn fp(&self, r_m: f64) -> f64 {
        let omega_s = self.fastness(r_m);
        match self.fptype {
            FpType::NoOutflow => 1.,
            FpType::Propeller => {
                if r_m > self.r_cor {
                    0.
                } else {
                    1.
                }
            }
            FpType::CorotationBlock => {
                let width = self.fpparams.first().copied().unwrap_or(0.1);
                1. / (1. + ((omega_s - 1.) / width).exp())
            }
            FpType::EksiKultu2010 => (1. - omega_s * omega_s).clamp(0., 1.),
            FpType::Romanova2018 => {
                let scale = self.fpparams.first().copied().unwrap_or(1.);
                let steep = self.fpparams.get(1).copied().unwrap_or(4.);
                1. / (1. + (omega_s / scale).powf(steep))
            }
            FpType::Geometrical => {
                let p = self.fpparams.first().copied().unwrap_or(1.);
                if self.r_cor.is_finite() {
                    (self.r_cor / r_m).powf(p).min(1.)
                } else {
                    1.
                }
            }
        }
    }

    /// Magnetic pseudo-wind source C = d²F_magn/dh², from the
    /// magnetosphere-disk stress μ²/r⁴ (1 − Ω_star/Ω_K) mapped to the
    /// h-coordinate: dF_magn/dh = κ_t β⁻¹ μ² (GM)³ h⁻⁷ (1 − (h/h_cor)³).
    pub fn magnetic_wind_c(&self, grid: &HGrid) -> Array1<f64> {
        if self.inversebeta == 0. {
            return Array1::zeros(grid.nx);
        }
        let k = KAPPA_T * self.inversebeta * self.mu_magn * self.mu_magn * grid.gm.powi(3);
        let hc3 = if self.h_cor.is_finite() { self.h_cor.powi(3) } else { f64::INFINITY };
        grid.h.mapv(|h| {
            let corot = if hc3.is_finite() { 4. / (h.powi(5) * hc3) } else { 0. };
            k * (corot - 7. / h.powi(8))
        })
    }

    /// Effective temperature of the accretion hot spot covering
    /// `hotspotarea` of the stellar surface.
    pub fn hotspot_temperature(&self, gm: f64, mdot: f64) -> f64 {
        if mdot <= 0. {
            return 0.;
        }
        let lum = gm * mdot / self.rx;
        (lum / (4. * std::f64::consts::PI * self.rx * self.rx * self.hotspotarea * SIGMA_SB))
            .powf(0.25)
    }
}
