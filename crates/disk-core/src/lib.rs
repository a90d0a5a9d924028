// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — Disk Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Viscous evolution of a thin accretion disk in an X-ray binary:
//! the nonlinear diffusion solver for the torque profile F(h, t), the
//! moving inner/outer boundaries and the derived observables.

pub mod boundary;
pub mod diffusion;
pub mod evolution;
pub mod initial;
pub mod ns;
pub mod observables;
pub mod opacity;
pub mod orbit;
pub mod params;
pub mod wind;
