// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — Output
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! TSV output streams: the per-step summary and optional radial dumps.
//!
//! Every row is flushed as it is written, so the rows up to a fatal
//! step survive on disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use disk_core::evolution::Evolution;
use disk_types::error::DiskResult;

pub struct SummaryWriter {
    out: BufWriter<File>,
}

impl SummaryWriter {
    /// Open `{dir}/{prefix}_sum.dat` and write the column header plus a
    /// command-line echo.
    pub fn create(dir: &Path, prefix: &str, cmdline: &str) -> DiskResult<Self> {
        std::fs::create_dir_all(dir)?;
        let file = File::create(dir.join(format!("{prefix}_sum.dat")))?;
        let mut out = BufWriter::new(file);
        writeln!(
            out,
            "#t\tMdot_in\tMdot_out\tLx\tH2R_out\tRhot2Rout\tTph_out\tmU\tmB\tmV\tmR\tmI\tmJ"
        )?;
        writeln!(out, "# {cmdline}")?;
        out.flush()?;
        Ok(Self { out })
    }

    pub fn write_row(&mut self, ev: &mut Evolution) -> DiskResult<()> {
        let mags = ev.magnitudes();
        let t_days = ev.t_days();
        let mdot_in = ev.mdot_in();
        let mdot_out = ev.state.mdot_out;
        let lx = ev.lx();
        let h2r_out = ev.h2r_out();
        let rhot2rout = ev.rhot2rout();
        let tph_out = ev.tph_out();
        write!(
            self.out,
            "{:.6}\t{:.6e}\t{:.6e}\t{:.6e}\t{:.6e}\t{:.6e}\t{:.6e}",
            t_days,
            mdot_in,
            mdot_out,
            lx,
            h2r_out,
            rhot2rout,
            tph_out,
        )?;
        for m in mags {
            write!(self.out, "\t{m:.4}")?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

pub struct FullDataWriter {
    dir: PathBuf,
    prefix: String,
}

impl FullDataWriter {
    pub fn new(dir: &Path, prefix: &str) -> Self {
        Self { dir: dir.to_path_buf(), prefix: prefix.to_string() }
    }

    /// Dump the radial structure of the current step to
    /// `{prefix}_{i_t}.dat`.
    pub fn write_step(&self, ev: &mut Evolution) -> DiskResult<()> {
        let path = self.dir.join(format!("{}_{}.dat", self.prefix, ev.state.i_t));
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        writeln!(out, "#h\tR\tF\tSigma\tW\tTph_vis\tTph\tTirr\tHeight")?;

        let (first, last) = (ev.state.first, ev.state.last);
        let der = ev.derived().clone();
        for i in first..=last {
            writeln!(
                out,
                "{:.6e}\t{:.6e}\t{:.6e}\t{:.6e}\t{:.6e}\t{:.6e}\t{:.6e}\t{:.6e}\t{:.6e}",
                ev.grid.h[i],
                ev.grid.r[i],
                ev.state.f[i],
                der.sigma[i],
                der.w[i],
                der.tph_vis[i],
                der.tph[i],
                der.tirr[i],
                der.height[i],
            )?;
        }
        out.flush()?;
        Ok(())
    }
}
