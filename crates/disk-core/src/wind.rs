// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — Wind
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Wind source terms for the diffusion equation,
//! ∂W/∂t = ∂²F/∂h² + A·F + B·∂F/∂h + C.

use ndarray::Array1;

use disk_types::config::WindKind;
use disk_types::error::{DiskError, DiskResult};
use disk_types::state::HGrid;

/// Per-node source-term profiles fed into the implicit step.
#[derive(Debug, Clone)]
pub struct WindSources {
    pub a: Array1<f64>,
    pub b: Array1<f64>,
    pub c: Array1<f64>,
}

impl WindSources {
    pub fn none(nx: usize) -> Self {
        Self { a: Array1::zeros(nx), b: Array1::zeros(nx), c: Array1::zeros(nx) }
    }

    /// Build the sources for a wind family. The test winds feed one
    /// uniform coefficient each, scaled by the first entry of `params`:
    /// testA drains ∝ F, testB advects ∝ ∂F/∂h, testC is a constant sink.
    pub fn build(kind: WindKind, params: &[f64], grid: &HGrid) -> DiskResult<Self> {
        let nx = grid.nx;
        let k = match kind {
            WindKind::No => 0.,
            _ => *params.first().ok_or_else(|| {
                DiskError::Config(format!("windtype {kind} requires one windparams entry"))
            })?,
        };
        if !k.is_finite() {
            return Err(DiskError::Config(format!("windparams[0] must be finite, got {k}")));
        }

        let mut sources = Self::none(nx);
        // scale by the h-span so the coefficient is a rate per viscous unit
        let span = grid.h_out() - grid.h_in();
        match kind {
            WindKind::No => {}
            WindKind::TestA => sources.a.fill(-k / (span * span)),
            WindKind::TestB => sources.b.fill(-k / span),
            WindKind::TestC => sources.c.fill(-k),
        }
        Ok(sources)
    }
}
