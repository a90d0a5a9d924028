// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — Params
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Validated run parameters: the user-facing configuration converted to
//! CGS, with derived geometry filled in and every constraint checked
//! before the evolution is built.

use disk_types::config::{BoundCond, DiskConfig, GridScale, NsProp, OpacityKind, WindKind};
use disk_types::constants::{day_to_s, kev_to_hertz, kpc_to_cm, sunmass_to_gram, GRAVITY};
use disk_types::error::{DiskError, DiskResult};

use crate::initial::{Amplitude, InitialCondition};
use crate::ns::{sibsun2000_radius_isco, NeutronStar};
use crate::observables::IrradiationParams;
use crate::orbit::{accretion_efficiency, r_kerr_isco, roche_lobe_radius};
use crate::diffusion::SolverParams;

/// Everything the evolution needs, in CGS, validated.
#[derive(Debug, Clone)]
pub struct RunParams {
    pub alpha: f64,
    pub mx: f64,
    pub gm: f64,
    pub kerr: f64,
    pub mopt: f64,
    pub period: f64,
    pub topt: f64,
    pub r_in: f64,
    pub r_out: f64,
    pub r_isco: f64,
    pub r_opt: f64,

    pub opacity: OpacityKind,
    pub initialcond: InitialCondition,
    pub mdot_out: f64,
    pub boundcond: BoundCond,
    pub thot: f64,
    pub tirr2tvishot: f64,
    pub windtype: WindKind,
    pub windparams: Vec<f64>,

    pub irr: IrradiationParams,

    pub colourfactor: f64,
    pub emin: f64,
    pub emax: f64,
    pub cosi: f64,
    /// cos i / D²; NaN when no distance was given
    pub cosi_over_d2: f64,

    pub time: f64,
    pub tau: f64,
    pub nx: usize,
    pub gridscale: GridScale,
    pub solver: SolverParams,

    pub ns: Option<NeutronStar>,
}

fn require(value: Option<f64>, flag: &str) -> DiskResult<f64> {
    value.ok_or_else(|| DiskError::Config(format!("{flag} is required")))
}

fn positive(value: f64, flag: &str) -> DiskResult<f64> {
    if value.is_finite() && value > 0. {
        Ok(value)
    } else {
        Err(DiskError::Domain(format!("{flag} must be finite and > 0, got {value}")))
    }
}

impl RunParams {
    pub fn from_config(cfg: &DiskConfig) -> DiskResult<Self> {
        let mx = sunmass_to_gram(positive(require(cfg.basic.mx, "Mx")?, "Mx")?);
        let mopt = sunmass_to_gram(positive(require(cfg.basic.mopt, "Mopt")?, "Mopt")?);
        let period = day_to_s(positive(require(cfg.basic.period, "period")?, "period")?);
        let alpha = positive(cfg.basic.alpha, "alpha")?;
        let kerr = cfg.basic.kerr;
        if !(-1.0..=1.0).contains(&kerr) {
            return Err(DiskError::Domain(format!("kerr must lie in [-1, 1], got {kerr}")));
        }
        let gm = GRAVITY * mx;

        let r_isco = match (&cfg.ns, cfg.basic.risco) {
            (_, Some(r)) => positive(r, "risco")?,
            (Some(ns_cfg), None) if ns_cfg.nsprop == NsProp::SibgatullinSunyaev2000 => {
                let freqx = ns_cfg.freqx.ok_or_else(|| {
                    DiskError::Config(
                        "freqx must be specified for nsprop=sibgatullinsunyaev2000".into(),
                    )
                })?;
                sibsun2000_radius_isco(freqx)
            }
            _ => r_kerr_isco(mx, kerr),
        };

        let ns = match &cfg.ns {
            Some(ns_cfg) => Some(NeutronStar::from_config(ns_cfg, gm, r_isco)?),
            None => None,
        };

        let r_in = match cfg.basic.rin {
            Some(r) => positive(r, "rin")?,
            None => ns.as_ref().map(|star| star.r_m_min).unwrap_or(r_isco),
        };
        let r_out = match cfg.basic.rout {
            Some(r) => positive(r, "rout")?,
            None => 0.9 * roche_lobe_radius(mx, mopt, period),
        };
        if r_in >= r_out {
            return Err(DiskError::Domain(format!(
                "need r_in < r_out, got r_in = {r_in:e}, r_out = {r_out:e}"
            )));
        }
        let r_opt = match cfg.basic.ropt {
            Some(r) => positive(r, "Ropt")?,
            None => roche_lobe_radius(mopt, mx, period),
        };

        let disk = &cfg.disk;
        if disk.mdotout > 0. {
            return Err(DiskError::Domain(format!(
                "Mdotout is an outflow and must be <= 0, got {}",
                disk.mdotout
            )));
        }
        let tirr2tvishot = match disk.tirr2tvishot {
            Some(v) if v >= 0. => v,
            Some(v) => {
                return Err(DiskError::Domain(format!("Tirr2Tvishot must be >= 0, got {v}")))
            }
            None => f64::INFINITY,
        };

        let amplitude = match (disk.f0, disk.mdisk0, disk.mdot0) {
            (Some(f0), None, None) => Amplitude::F0(f0),
            (None, Some(m), None) => Amplitude::Mdisk0(m),
            (None, None, Some(m)) => Amplitude::Mdot0(m),
            (None, None, None) => {
                return Err(DiskError::Config(
                    "one of F0, Mdisk0, Mdot0 is required to scale the initial condition".into(),
                ))
            }
            _ => {
                return Err(DiskError::Config(
                    "F0, Mdisk0 and Mdot0 are mutually exclusive".into(),
                ))
            }
        };
        let initialcond = InitialCondition {
            kind: disk.initialcond,
            powerorder: disk.powerorder,
            gaussmu: disk.gaussmu,
            gausssigma: disk.gausssigma,
            amplitude,
        };

        let flux = &cfg.flux;
        let emin = kev_to_hertz(positive(flux.emin, "emin")?);
        let emax = kev_to_hertz(positive(flux.emax, "emax")?);
        if emin >= emax {
            return Err(DiskError::Domain(format!(
                "need emin < emax, got {} keV and {} keV",
                flux.emin, flux.emax
            )));
        }
        let cosi = (flux.inclination * std::f64::consts::PI / 180.).cos();
        let cosi_over_d2 = match flux.distance {
            Some(d) => {
                let d_cm = kpc_to_cm(positive(d, "distance")?);
                cosi / (d_cm * d_cm)
            }
            None => f64::NAN,
        };

        let calc = &cfg.calc;
        let time = day_to_s(positive(require(calc.time, "time")?, "time")?);
        let tau = match calc.tau {
            Some(t) => day_to_s(positive(t, "tau")?),
            None => time / 200.,
        };
        if calc.nx < 3 {
            return Err(DiskError::Domain(format!("Nx must be at least 3, got {}", calc.nx)));
        }
        if !(calc.eps > 0. && calc.eps < 0.1) {
            return Err(DiskError::Domain(format!("eps must lie in (0, 0.1), got {}", calc.eps)));
        }
        if calc.max_iter == 0 {
            return Err(DiskError::Config("maxiter must be at least 1".into()));
        }

        let irr = &cfg.irr;
        if irr.cirr < 0. {
            return Err(DiskError::Domain(format!("Cirr must be >= 0, got {}", irr.cirr)));
        }

        Ok(Self {
            alpha,
            mx,
            gm,
            kerr,
            mopt,
            period,
            topt: cfg.basic.topt,
            r_in,
            r_out,
            r_isco,
            r_opt,
            opacity: disk.opacity,
            initialcond,
            mdot_out: disk.mdotout,
            boundcond: disk.boundcond,
            thot: disk.thot,
            tirr2tvishot,
            windtype: disk.windtype,
            windparams: disk.windparams.clone(),
            irr: IrradiationParams {
                cirr: irr.cirr,
                irrindex: irr.irrindex,
                angular_dist: irr.angular_dist_disk,
                eta: accretion_efficiency(r_isco, mx),
            },
            colourfactor: positive(flux.colourfactor, "colourfactor")?,
            emin,
            emax,
            cosi,
            cosi_over_d2,
            time,
            tau,
            nx: calc.nx,
            gridscale: calc.gridscale,
            solver: SolverParams { eps: calc.eps, max_iter: calc.max_iter },
            ns,
        })
    }
}
