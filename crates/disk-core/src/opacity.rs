// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — Opacity
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Opacity-law constitutive relations.
//!
//! Each law fixes the exponents and coefficient of the surface-density
//! moment W = |F|^(1−m) hⁿ / ((1−m) D) and of the half-thickness
//! H = k_H F^a h^b α^c (GM)^d, both from the one-zone vertical structure
//! of an α-disk with κ ∝ ρ T^(−χ). The quasi-stationary eigenmode
//! coefficients used by the `quasistat` initial condition are derived
//! from the same m.

use disk_types::config::OpacityKind;
use disk_types::constants::M_SUN;
use disk_types::error::{DiskError, DiskResult};

/// Constants of one opacity law, bound to a given (Mx, α).
#[derive(Debug, Clone)]
pub struct OpacityLaw {
    pub kind: OpacityKind,
    /// Exponent of F in W: W ∝ |F|^(1−m)
    pub m: f64,
    /// Exponent of h in W
    pub n: f64,
    /// Normalisation D of the constitutive relation
    pub d: f64,
    /// Opacity temperature exponent, κ ∝ ρ T^(−χ)
    pub chi: f64,
    pub gm: f64,
    pub mx: f64,
    pub alpha: f64,
    // W = w_coef · |F|^(1−m) · h^n
    w_coef: f64,
    // H = height_coef · F^height_exp_f · h^height_exp_h (α, GM folded in)
    height_coef: f64,
    height_exp_f: f64,
    height_exp_h: f64,
}

impl OpacityLaw {
    pub fn new(kind: OpacityKind, mx: f64, alpha: f64) -> DiskResult<Self> {
        if !(mx.is_finite() && mx > 0.) {
            return Err(DiskError::Domain(format!("Mx must be finite and > 0, got {mx}")));
        }
        if !(alpha.is_finite() && alpha > 0.) {
            return Err(DiskError::Domain(format!("alpha must be finite and > 0, got {alpha}")));
        }
        let gm = disk_types::constants::GRAVITY * mx;

        let law = match kind {
            // Free-free/bound-free Kramers opacity, κ ∝ ρ T^(-7/2):
            // W = 2.73e-9 α^(-4/5) F^(7/10) h^(4/5) / GM
            // H = 6.4e4 F^(3/20) h^(21/10) α^(-1/10) GM^(-3/2)
            OpacityKind::Kramers => {
                let m = 0.3;
                let n = 0.8;
                let d = gm * alpha.powf(0.8) / (2.73e-9 * (1. - m));
                Self {
                    kind,
                    m,
                    n,
                    d,
                    chi: 3.5,
                    gm,
                    mx,
                    alpha,
                    w_coef: 1. / ((1. - m) * d),
                    height_coef: 6.4e4 * alpha.powf(-0.1) * gm.powf(-1.5),
                    height_exp_f: 0.15,
                    height_exp_h: 2.1,
                }
            }
            // OPAL-type opacity, κ ∝ ρ T^(-5/2):
            // W = 0.17 α^(-7/9) F^(2/3) h / Mx^(10/9)
            // H = 3.6e4 F^(1/6) h² α^(-1/9) GM^(-13/9)
            OpacityKind::Opal => {
                let m = 1. / 3.;
                let n = 1.;
                let d = alpha.powf(7. / 9.) * mx.powf(10. / 9.) / (0.17 * (1. - m));
                Self {
                    kind,
                    m,
                    n,
                    d,
                    chi: 2.5,
                    gm,
                    mx,
                    alpha,
                    w_coef: 1. / ((1. - m) * d),
                    height_coef: 3.6e4 * alpha.powf(-1. / 9.) * gm.powf(-13. / 9.),
                    height_exp_f: 1. / 6.,
                    height_exp_h: 2.,
                }
            }
        };
        Ok(law)
    }

    /// Surface-density moment W(F, h), strictly increasing in |F|.
    pub fn w_of_f(&self, f: f64, h: f64) -> f64 {
        self.w_coef * f.abs().powf(1. - self.m) * h.powf(self.n)
    }

    /// ∂W/∂F = (1−m) W/F. `f_floor` keeps the derivative finite where the
    /// torque vanishes; callers pass a small fraction of max F.
    pub fn dw_df(&self, f: f64, h: f64, f_floor: f64) -> f64 {
        let fa = f.abs().max(f_floor);
        (1. - self.m) * self.w_of_f(fa, h) / fa
    }

    /// Surface density Σ = W (GM)² / (4 h³) (g/cm²).
    pub fn sigma_of_f(&self, f: f64, h: f64) -> f64 {
        self.w_of_f(f, h) * self.gm * self.gm / (4. * h * h * h)
    }

    /// Torque giving surface density Σ at h; inverse of `sigma_of_f`.
    pub fn f_of_sigma(&self, sigma: f64, h: f64) -> f64 {
        let w = 4. * sigma * h * h * h / (self.gm * self.gm);
        (w / (self.w_coef * h.powf(self.n))).powf(1. / (1. - self.m))
    }

    /// Disk half-thickness H(F, h) (cm).
    pub fn height_of_f(&self, f: f64, h: f64) -> f64 {
        self.height_coef * f.abs().powf(self.height_exp_f) * h.powf(self.height_exp_h)
    }

    /// Lower critical surface density of the hot branch (g/cm²);
    /// Menou et al. 1999.
    pub fn sigma_minus(&self, r: f64) -> f64 {
        19.95
            * (self.alpha / 0.1).powf(-0.80)
            * (r / 1e10).powf(1.11)
            * (self.mx / M_SUN).powf(-0.37)
    }

    /// Shape of the first decaying eigenmode of ∂W/∂t = ∂²F/∂h² on
    /// ξ = (h − h_in)/(h_out − h_in), normalised to slope 1 at the origin:
    /// f(ξ) = ξ + a₁ ξ^(3−m) + a₂ ξ^(5−2m), f(0) = 0, f'(1) = 0.
    pub fn quasistat_shape(&self, xi: f64) -> f64 {
        let (a1, a2) = self.quasistat_coefficients();
        xi + a1 * xi.powf(3. - self.m) + a2 * xi.powf(5. - 2. * self.m)
    }

    /// (a₁, a₂) of the eigenmode expansion; the eigenvalue is the smaller
    /// root of the boundary-condition quadratic.
    pub fn quasistat_coefficients(&self) -> (f64, f64) {
        let m = self.m;
        let pi1 = (3. - m) * (2. - m);
        let pi2 = (5. - 2. * m) * (4. - 2. * m);
        let q1 = 1. / (2. - m);
        let q2 = (1. - m) / (pi1 * (4. - 2. * m));
        let lambda = (q1 - (q1 * q1 - 4. * q2).sqrt()) / (2. * q2);
        (-lambda / pi1, lambda * lambda * (1. - m) / (pi1 * pi2))
    }
}
