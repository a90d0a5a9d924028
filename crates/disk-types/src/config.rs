// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Configuration records for a disk-evolution run.
//!
//! Values are kept in the units the user writes them in (solar masses,
//! days, keV, kpc, degrees, but radii in cm); the core converts to CGS
//! when it validates the configuration. Every string-dispatched variant
//! is a tagged enum parsed here, never compared in the evolution loop.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DiskError, DiskResult};

macro_rules! named_enum {
    ($(#[$doc:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl FromStr for $name {
            type Err = DiskError;

            fn from_str(s: &str) -> DiskResult<Self> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(DiskError::Config(format!(
                        concat!("unknown ", stringify!($name), " value '{}', expected one of: ",
                            $($text, " "),+),
                        other
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($text)),+
                }
            }
        }
    };
}

named_enum! {
    /// Radial mesh spacing in h.
    GridScale { Log => "log", Linear => "linear" }
}

named_enum! {
    /// Opacity law selecting the W(F, h) constitutive relation.
    OpacityKind { Kramers => "Kramers", Opal => "OPAL" }
}

named_enum! {
    /// Shape of the initial viscous-torque profile.
    InitialCondKind {
        PowerF => "powerF",
        PowerSigma => "powerSigma",
        SinusF => "sinusF",
        Quasistat => "quasistat",
        GaussF => "gaussF",
    }
}

named_enum! {
    /// Outer cold-front retreat criterion.
    BoundCond { Teff => "Teff", Tirr => "Tirr" }
}

named_enum! {
    /// Angular distribution of the central X-ray flux.
    AngularDist { Plane => "plane", Isotropic => "isotropic" }
}

named_enum! {
    /// Wind source-term family fed into the diffusion step.
    WindKind { No => "no", TestA => "testA", TestB => "testB", TestC => "testC" }
}

named_enum! {
    /// Fraction of inner-edge flow that reaches the neutron star.
    FpType {
        NoOutflow => "no-outflow",
        Propeller => "propeller",
        CorotationBlock => "corotation-block",
        EksiKultu2010 => "eksi-kultu2010",
        Romanova2018 => "romanova2018",
        Geometrical => "geometrical",
    }
}

named_enum! {
    /// Neutron-star structure prescription.
    NsProp { Dummy => "dummy", SibgatullinSunyaev2000 => "sibgatullinsunyaev2000" }
}

/// Output destination and verbosity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub dir: String,
    pub prefix: String,
    pub fulldata: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { dir: ".".into(), prefix: "freddi".into(), fulldata: false }
    }
}

/// Binary-system and central-object parameters.
/// Masses in solar masses, period in days, radii in cm.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryConfig {
    pub alpha: f64,
    pub mx: Option<f64>,
    pub kerr: f64,
    pub mopt: Option<f64>,
    pub period: Option<f64>,
    pub rin: Option<f64>,
    pub rout: Option<f64>,
    pub risco: Option<f64>,
    pub ropt: Option<f64>,
    pub topt: f64,
}

impl Default for BinaryConfig {
    fn default() -> Self {
        Self {
            alpha: 0.25,
            mx: None,
            kerr: 0.,
            mopt: None,
            period: None,
            rin: None,
            rout: None,
            risco: None,
            ropt: None,
            topt: 0.,
        }
    }
}

/// Disk structure: opacity, initial profile, outer boundary handling, wind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskStructureConfig {
    pub opacity: OpacityKind,
    /// Imposed outer mass-outflow rate, ≤ 0 (dF/dh units, cgs).
    pub mdotout: f64,
    pub boundcond: BoundCond,
    /// Cold-front temperature threshold (K); ≤ 0 disables retreat.
    pub thot: f64,
    /// Tirr/Tph_vis ratio above which the Σ_minus criterion takes over.
    /// `None` means never.
    pub tirr2tvishot: Option<f64>,
    pub initialcond: InitialCondKind,
    pub f0: Option<f64>,
    pub mdisk0: Option<f64>,
    pub mdot0: Option<f64>,
    pub powerorder: f64,
    pub gaussmu: f64,
    pub gausssigma: f64,
    pub windtype: WindKind,
    pub windparams: Vec<f64>,
}

impl Default for DiskStructureConfig {
    fn default() -> Self {
        Self {
            opacity: OpacityKind::Kramers,
            mdotout: 0.,
            boundcond: BoundCond::Teff,
            thot: 0.,
            tirr2tvishot: None,
            initialcond: InitialCondKind::PowerF,
            f0: None,
            mdisk0: None,
            mdot0: None,
            powerorder: 6.,
            gaussmu: 1.,
            gausssigma: 0.25,
            windtype: WindKind::No,
            windparams: Vec::new(),
        }
    }
}

/// Self-irradiation of the outer disk by the central source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IrradiationConfig {
    pub cirr: f64,
    pub irrindex: f64,
    pub angular_dist_disk: AngularDist,
}

impl Default for IrradiationConfig {
    fn default() -> Self {
        Self { cirr: 0., irrindex: 0., angular_dist_disk: AngularDist::Plane }
    }
}

/// Observable-flux parameters. Energies in keV, inclination in degrees,
/// distance in kpc.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FluxConfig {
    pub colourfactor: f64,
    pub emin: f64,
    pub emax: f64,
    pub inclination: f64,
    pub distance: Option<f64>,
}

impl Default for FluxConfig {
    fn default() -> Self {
        Self { colourfactor: 1.7, emin: 1., emax: 12., inclination: 0., distance: None }
    }
}

/// Integration controls. Times in days.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    pub time: Option<f64>,
    /// Time substep; defaults to time/200.
    pub tau: Option<f64>,
    pub nx: usize,
    pub gridscale: GridScale,
    /// Relative tolerance of the nonlinear diffusion inner loop.
    pub eps: f64,
    /// Hard cap on nonlinear iterations per step.
    pub max_iter: usize,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            time: None,
            tau: None,
            nx: 1000,
            gridscale: GridScale::Log,
            eps: 1e-6,
            max_iter: 50,
        }
    }
}

/// Magnetized neutron-star extension. Bx in G, freqx in Hz, radii in cm.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NeutronStarConfig {
    pub nsprop: NsProp,
    pub bx: f64,
    pub freqx: Option<f64>,
    pub rx: Option<f64>,
    pub epsilon_alfven: f64,
    pub inversebeta: f64,
    pub rdead: f64,
    pub fptype: FpType,
    pub fpparams: Vec<f64>,
    pub hotspotarea: f64,
}

impl Default for NeutronStarConfig {
    fn default() -> Self {
        Self {
            nsprop: NsProp::Dummy,
            bx: 0.,
            freqx: None,
            rx: None,
            epsilon_alfven: 1.,
            inversebeta: 0.,
            rdead: 0.,
            fptype: FpType::NoOutflow,
            fpparams: Vec::new(),
            hotspotarea: 1.,
        }
    }
}

/// Top-level run configuration. Maps 1:1 to freddi.json.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskConfig {
    pub general: GeneralConfig,
    pub basic: BinaryConfig,
    pub disk: DiskStructureConfig,
    pub irr: IrradiationConfig,
    pub flux: FluxConfig,
    pub calc: CalcConfig,
    pub ns: Option<NeutronStarConfig>,
}

impl DiskConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &std::path::Path) -> DiskResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}
