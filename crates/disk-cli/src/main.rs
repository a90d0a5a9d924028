// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — CLI
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Simulate the viscous evolution of an X-ray binary accretion disk.
//!
//! Configuration is layered: the first `freddi.json` found (via
//! `--config`, `./`, `$HOME`, `/etc`) supplies defaults, command-line
//! flags win. Results land in `{dir}/{prefix}_sum.dat` and, with
//! `--fulldata`, per-step radial dumps.

mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use disk_core::evolution::Evolution;
use disk_types::config::{
    AngularDist, BoundCond, DiskConfig, FpType, GridScale, InitialCondKind, NeutronStarConfig,
    NsProp, OpacityKind, WindKind,
};
use disk_types::error::DiskError;

#[derive(Parser, Debug)]
#[command(name = "scpn-disk")]
#[command(about = "Viscous evolution of an X-ray binary accretion disk", long_about = None)]
struct Args {
    /// Explicit configuration file (JSON); otherwise freddi.json is
    /// searched in ./, $HOME and /etc
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shakura-Sunyaev alpha
    #[arg(long)]
    alpha: Option<f64>,
    /// Compact-object mass, solar masses
    #[arg(long = "Mx")]
    mx: Option<f64>,
    /// Dimensionless spin of the compact object, -1..1
    #[arg(long)]
    kerr: Option<f64>,
    /// Companion mass, solar masses
    #[arg(long = "Mopt")]
    mopt: Option<f64>,
    /// Orbital period, days
    #[arg(long)]
    period: Option<f64>,
    /// Inner disk radius, cm (default: ISCO / magnetosphere floor)
    #[arg(long)]
    rin: Option<f64>,
    /// Outer disk radius, cm (default: 0.9 Roche lobe)
    #[arg(long)]
    rout: Option<f64>,
    /// ISCO radius override, cm
    #[arg(long)]
    risco: Option<f64>,
    /// Companion radius, cm (default: its Roche lobe)
    #[arg(long = "Ropt")]
    ropt: Option<f64>,

    /// Opacity law: Kramers or OPAL
    #[arg(long)]
    opacity: Option<OpacityKind>,
    /// Initial torque profile: powerF, powerSigma, sinusF, quasistat, gaussF
    #[arg(long)]
    initialcond: Option<InitialCondKind>,
    /// Initial torque normalisation, cgs
    #[arg(long = "F0")]
    f0: Option<f64>,
    /// Initial disk mass target, g
    #[arg(long = "Mdisk0")]
    mdisk0: Option<f64>,
    /// Initial accretion-rate target, g/s (dF/dh convention)
    #[arg(long = "Mdot0")]
    mdot0: Option<f64>,
    /// Power index of powerF/powerSigma
    #[arg(long)]
    powerorder: Option<f64>,
    /// Gauss profile centre, in units of h_out
    #[arg(long)]
    gaussmu: Option<f64>,
    /// Gauss profile width, in units of h_out
    #[arg(long)]
    gausssigma: Option<f64>,
    /// Imposed outer outflow rate, <= 0, cgs
    #[arg(long = "Mdotout")]
    mdotout: Option<f64>,
    /// Outer-boundary criterion: Teff or Tirr
    #[arg(long)]
    boundcond: Option<BoundCond>,
    /// Cold-front threshold temperature, K (0 disables retreat)
    #[arg(long = "Thot")]
    thot: Option<f64>,
    /// Tirr/Tph_vis ratio switching retreat to the Sigma_minus branch
    #[arg(long = "Tirr2Tvishot")]
    tirr2tvishot: Option<f64>,
    /// Wind source family: no, testA, testB, testC
    #[arg(long)]
    windtype: Option<WindKind>,
    /// Wind parameters, comma separated
    #[arg(long, value_delimiter = ',')]
    windparams: Option<Vec<f64>>,

    /// Irradiation constant C_irr
    #[arg(long = "Cirr")]
    cirr: Option<f64>,
    /// Power of H/R in the irradiation coupling
    #[arg(long)]
    irrindex: Option<f64>,
    /// Angular distribution of the central flux: plane or isotropic
    #[arg(long = "angular_dist_disk")]
    angular_dist_disk: Option<AngularDist>,

    /// Colour (spectral hardening) factor
    #[arg(long)]
    colourfactor: Option<f64>,
    /// Lower X-ray band edge, keV
    #[arg(long)]
    emin: Option<f64>,
    /// Upper X-ray band edge, keV
    #[arg(long)]
    emax: Option<f64>,
    /// Inclination, degrees
    #[arg(long)]
    inclination: Option<f64>,
    /// Distance, kpc
    #[arg(long)]
    distance: Option<f64>,

    /// Evolution span, days
    #[arg(long)]
    time: Option<f64>,
    /// Time substep, days (default time/200)
    #[arg(long)]
    tau: Option<f64>,
    /// Radial grid size
    #[arg(long = "Nx")]
    nx: Option<usize>,
    /// Grid spacing: log or linear
    #[arg(long)]
    gridscale: Option<GridScale>,
    /// Relative tolerance of the nonlinear solver
    #[arg(long)]
    eps: Option<f64>,
    /// Nonlinear iteration cap per step
    #[arg(long)]
    maxiter: Option<usize>,

    /// Output directory
    #[arg(long)]
    dir: Option<String>,
    /// Output file prefix
    #[arg(long)]
    prefix: Option<String>,
    /// Also dump the radial structure of every step
    #[arg(long, short = 'f')]
    fulldata: bool,

    /// Neutron-star property set: dummy or sibgatullinsunyaev2000
    #[arg(long)]
    nsprop: Option<NsProp>,
    /// Surface magnetic field, G
    #[arg(long = "Bx")]
    bx: Option<f64>,
    /// Spin frequency, Hz
    #[arg(long)]
    freqx: Option<f64>,
    /// Stellar radius, cm
    #[arg(long = "Rx")]
    rx: Option<f64>,
    /// Accreted-fraction prescription
    #[arg(long)]
    fptype: Option<FpType>,
    /// Parameters of the accreted-fraction prescription
    #[arg(long, value_delimiter = ',')]
    fpparams: Option<Vec<f64>>,
    /// Dead-disk cap on the magnetospheric radius, cm
    #[arg(long = "Rdead")]
    rdead: Option<f64>,
    /// Alfven-radius scale factor
    #[arg(long = "epsilonAlfven")]
    epsilon_alfven: Option<f64>,
    /// Magnetic-torque strength 1/beta
    #[arg(long)]
    inversebeta: Option<f64>,
    /// Fractional hot-spot area on the stellar surface
    #[arg(long)]
    hotspotarea: Option<f64>,
}

impl Args {
    fn wants_neutron_star(&self) -> bool {
        self.nsprop.is_some()
            || self.bx.is_some()
            || self.freqx.is_some()
            || self.rx.is_some()
            || self.fptype.is_some()
            || self.fpparams.is_some()
            || self.rdead.is_some()
            || self.epsilon_alfven.is_some()
            || self.inversebeta.is_some()
            || self.hotspotarea.is_some()
    }

    /// Overlay the command line onto a file-or-default configuration.
    fn apply(&self, cfg: &mut DiskConfig) {
        macro_rules! overlay {
            ($($src:expr => $dst:expr;)+) => {
                $(if let Some(v) = &$src { $dst = v.clone(); })+
            };
        }

        overlay! {
            self.alpha => cfg.basic.alpha;
            self.kerr => cfg.basic.kerr;
            self.opacity => cfg.disk.opacity;
            self.initialcond => cfg.disk.initialcond;
            self.powerorder => cfg.disk.powerorder;
            self.gaussmu => cfg.disk.gaussmu;
            self.gausssigma => cfg.disk.gausssigma;
            self.mdotout => cfg.disk.mdotout;
            self.boundcond => cfg.disk.boundcond;
            self.thot => cfg.disk.thot;
            self.windtype => cfg.disk.windtype;
            self.windparams => cfg.disk.windparams;
            self.cirr => cfg.irr.cirr;
            self.irrindex => cfg.irr.irrindex;
            self.angular_dist_disk => cfg.irr.angular_dist_disk;
            self.colourfactor => cfg.flux.colourfactor;
            self.emin => cfg.flux.emin;
            self.emax => cfg.flux.emax;
            self.inclination => cfg.flux.inclination;
            self.nx => cfg.calc.nx;
            self.gridscale => cfg.calc.gridscale;
            self.eps => cfg.calc.eps;
            self.maxiter => cfg.calc.max_iter;
            self.dir => cfg.general.dir;
            self.prefix => cfg.general.prefix;
        }

        // optional-valued fields stay None unless given somewhere
        macro_rules! overlay_opt {
            ($($src:expr => $dst:expr;)+) => {
                $(if $src.is_some() { $dst = $src.clone(); })+
            };
        }
        overlay_opt! {
            self.mx => cfg.basic.mx;
            self.mopt => cfg.basic.mopt;
            self.period => cfg.basic.period;
            self.rin => cfg.basic.rin;
            self.rout => cfg.basic.rout;
            self.risco => cfg.basic.risco;
            self.ropt => cfg.basic.ropt;
            self.f0 => cfg.disk.f0;
            self.mdisk0 => cfg.disk.mdisk0;
            self.mdot0 => cfg.disk.mdot0;
            self.tirr2tvishot => cfg.disk.tirr2tvishot;
            self.distance => cfg.flux.distance;
            self.time => cfg.calc.time;
            self.tau => cfg.calc.tau;
        }

        if self.fulldata {
            cfg.general.fulldata = true;
        }

        if self.wants_neutron_star() || cfg.ns.is_some() {
            let ns = cfg.ns.get_or_insert_with(NeutronStarConfig::default);
            overlay! {
                self.nsprop => ns.nsprop;
                self.bx => ns.bx;
                self.fptype => ns.fptype;
                self.fpparams => ns.fpparams;
                self.rdead => ns.rdead;
                self.epsilon_alfven => ns.epsilon_alfven;
                self.inversebeta => ns.inversebeta;
                self.hotspotarea => ns.hotspotarea;
            }
            overlay_opt! {
                self.freqx => ns.freqx;
                self.rx => ns.rx;
            }
        }
    }
}

/// Locate and load the configuration file, if any.
fn load_config(explicit: &Option<PathBuf>) -> anyhow::Result<DiskConfig> {
    if let Some(path) = explicit {
        return DiskConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()));
    }
    let mut candidates = vec![PathBuf::from("freddi.json")];
    if let Some(home) = std::env::var_os("HOME") {
        candidates.push(PathBuf::from(home).join("freddi.json"));
    }
    candidates.push(PathBuf::from("/etc/freddi.json"));

    for path in candidates {
        if path.is_file() {
            return DiskConfig::from_file(&path)
                .with_context(|| format!("loading config {}", path.display()));
        }
    }
    Ok(DiskConfig::default())
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.config)?;
    args.apply(&mut cfg);

    let dir = PathBuf::from(&cfg.general.dir);
    let prefix = cfg.general.prefix.clone();
    let fulldata = cfg.general.fulldata;
    let cmdline = std::env::args().collect::<Vec<_>>().join(" ");

    let mut ev = Evolution::new(&cfg)?;
    let mut summary = output::SummaryWriter::create(&dir, &prefix, &cmdline)?;
    let dumps = FullData::new(fulldata, &dir, &prefix);

    let n_steps = (ev.params.time / ev.params.tau).round() as u64;
    let bar = ProgressBar::new(n_steps);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} steps ({eta})")
            .expect("static template"),
    );

    let result = ev.evolve(|e| {
        summary.write_row(e)?;
        dumps.write(e)?;
        if e.state.i_t > 0 {
            bar.inc(1);
        }
        Ok(())
    });
    bar.finish_and_clear();
    result?;
    Ok(())
}

struct FullData {
    writer: Option<output::FullDataWriter>,
}

impl FullData {
    fn new(enabled: bool, dir: &std::path::Path, prefix: &str) -> Self {
        Self { writer: enabled.then(|| output::FullDataWriter::new(dir, prefix)) }
    }

    fn write(&self, ev: &mut Evolution) -> disk_types::error::DiskResult<()> {
        match &self.writer {
            Some(w) => w.write_step(ev),
            None => Ok(()),
        }
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // clap handles --help/--version; real argument errors exit 1
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<DiskError>()
                .map(|disk_err| disk_err.exit_code() as u8)
                .unwrap_or(2);
            ExitCode::from(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_defaults() {
        let args = Args::parse_from([
            "scpn-disk",
            "--Mx",
            "10",
            "--Mopt",
            "0.5",
            "--period",
            "0.5",
            "--F0",
            "1e37",
            "--time",
            "100",
            "--tau",
            "0.25",
            "--opacity",
            "OPAL",
            "--boundcond",
            "Tirr",
            "--Thot",
            "9000",
        ]);
        let mut cfg = DiskConfig::default();
        args.apply(&mut cfg);
        assert_eq!(cfg.basic.mx, Some(10.));
        assert_eq!(cfg.disk.opacity, OpacityKind::Opal);
        assert_eq!(cfg.disk.boundcond, BoundCond::Tirr);
        assert_eq!(cfg.disk.thot, 9000.);
        assert_eq!(cfg.calc.time, Some(100.));
        assert!(cfg.ns.is_none());
    }

    #[test]
    fn test_ns_flags_enable_neutron_star() {
        let args = Args::parse_from([
            "scpn-disk",
            "--Mx",
            "1.4",
            "--Bx",
            "1e12",
            "--freqx",
            "500",
            "--fptype",
            "propeller",
        ]);
        let mut cfg = DiskConfig::default();
        args.apply(&mut cfg);
        let ns = cfg.ns.expect("NS flags must enable the neutron-star block");
        assert_eq!(ns.bx, 1e12);
        assert_eq!(ns.freqx, Some(500.));
        assert_eq!(ns.fptype, FpType::Propeller);
    }

    #[test]
    fn test_file_values_survive_unrelated_flags() {
        let args = Args::parse_from(["scpn-disk", "--alpha", "0.4"]);
        let mut cfg = DiskConfig::default();
        cfg.basic.mx = Some(7.5);
        cfg.disk.thot = 8000.;
        args.apply(&mut cfg);
        assert_eq!(cfg.basic.alpha, 0.4);
        assert_eq!(cfg.basic.mx, Some(7.5));
        assert_eq!(cfg.disk.thot, 8000.);
    }
}
