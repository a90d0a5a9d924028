// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! CGS physical constants and unit conversions.
//!
//! Everything downstream works in CGS; the CLI converts user units
//! (solar masses, days, keV, kpc, degrees) with the factors below.

/// Gravitational constant (cm³ g⁻¹ s⁻²)
pub const GRAVITY: f64 = 6.674_30e-8;

/// Speed of light (cm/s)
pub const SPEED_OF_LIGHT: f64 = 2.997_924_58e10;

/// Stefan-Boltzmann constant (erg cm⁻² s⁻¹ K⁻⁴)
pub const SIGMA_SB: f64 = 5.670_374_419e-5;

/// Boltzmann constant (erg/K)
pub const K_BOLTZMANN: f64 = 1.380_649e-16;

/// Planck constant (erg s)
pub const PLANCK: f64 = 6.626_070_15e-27;

/// Solar mass (g)
pub const M_SUN: f64 = 1.988_92e33;

/// Solar radius (cm)
pub const R_SUN: f64 = 6.955e10;

/// Parsec (cm)
pub const PARSEC: f64 = 3.085_677_581e18;

/// Electron volt (erg)
pub const EV: f64 = 1.602_176_634e-12;

/// Day (s)
pub const DAY: f64 = 86400.;

/// Ångström (cm)
pub const ANGSTROM: f64 = 1e-8;

/// Kiloparsec (cm)
pub const KPC: f64 = 1000. * PARSEC;

/// One keV expressed as a photon frequency (Hz)
pub fn kev_to_hertz(e_kev: f64) -> f64 {
    e_kev * 1000. * EV / PLANCK
}

/// Solar masses → grams
pub fn sunmass_to_gram(m: f64) -> f64 {
    m * M_SUN
}

/// Days → seconds
pub fn day_to_s(t: f64) -> f64 {
    t * DAY
}

/// Kiloparsecs → centimeters
pub fn kpc_to_cm(d: f64) -> f64 {
    d * KPC
}

/// Johnson photometric band: effective wavelength and zero-point flux.
#[derive(Debug, Clone, Copy)]
pub struct Passband {
    pub name: char,
    /// Effective wavelength (cm)
    pub lambda: f64,
    /// Zero-magnitude flux density F₀ (erg s⁻¹ cm⁻² per cm of wavelength)
    pub f0: f64,
}

/// Johnson U,B,V,R,I,J zero points (Allen's Astrophysical Quantities;
/// B and V match the values used for the historical sum.dat columns).
pub const PASSBANDS: [Passband; 6] = [
    Passband { name: 'U', lambda: 3600. * ANGSTROM, f0: 4.27e-9 / ANGSTROM },
    Passband { name: 'B', lambda: 4400. * ANGSTROM, f0: 6.61e-9 / ANGSTROM },
    Passband { name: 'V', lambda: 5450. * ANGSTROM, f0: 3.61e-9 / ANGSTROM },
    Passband { name: 'R', lambda: 7000. * ANGSTROM, f0: 1.74e-9 / ANGSTROM },
    Passband { name: 'I', lambda: 9000. * ANGSTROM, f0: 8.32e-10 / ANGSTROM },
    Passband { name: 'J', lambda: 12500. * ANGSTROM, f0: 3.18e-10 / ANGSTROM },
];
