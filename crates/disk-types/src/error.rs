// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Domain error: {0}")]
    Domain(String),

    #[error("Diffusion solver diverged at iteration {iteration}: max residual {residual:e}")]
    SolverDiverged { iteration: usize, residual: f64 },

    #[error("Hot disk exhausted at t = {t_days} d (step {step}): outer front reached the inner boundary")]
    DiskExhausted { t_days: f64, step: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DiskResult<T> = Result<T, DiskError>;

impl DiskError {
    /// Process exit code: argument-class errors exit 1, runtime failures 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            DiskError::Config(_) | DiskError::Domain(_) | DiskError::Json(_) => 1,
            DiskError::SolverDiverged { .. } | DiskError::DiskExhausted { .. } | DiskError::Io(_) => 2,
        }
    }
}
