// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Core — Property-Based Tests (proptest) for disk-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for disk-types using proptest.
//!
//! Covers: h-grid construction, radius projection, config serde.

use disk_types::config::{DiskConfig, GridScale, NeutronStarConfig};
use disk_types::state::HGrid;
use proptest::prelude::*;

const GM: f64 = 1.327e27;

proptest! {
    /// Grid endpoints hit h(r_in) and h(r_out) for both spacings.
    #[test]
    fn grid_endpoints(nx in 3usize..300, log in any::<bool>()) {
        let scale = if log { GridScale::Log } else { GridScale::Linear };
        let g = HGrid::new(nx, 1e7, 1e11, scale, GM).unwrap();
        prop_assert!((g.h_in() / (GM * 1e7).sqrt() - 1.0).abs() < 1e-12);
        prop_assert!((g.h_out() / (GM * 1e11).sqrt() - 1.0).abs() < 1e-12);
    }

    /// h is strictly increasing and R = h²/GM on every node.
    #[test]
    fn grid_monotone_projection(
        nx in 3usize..200,
        r_in_exp in 6.0f64..9.0,
        span in 1.0f64..5.0,
        log in any::<bool>(),
    ) {
        let r_in = 10f64.powf(r_in_exp);
        let r_out = 10f64.powf(r_in_exp + span);
        let scale = if log { GridScale::Log } else { GridScale::Linear };
        let g = HGrid::new(nx, r_in, r_out, scale, GM).unwrap();
        for i in 1..nx {
            prop_assert!(g.h[i] > g.h[i - 1], "h not increasing at {}", i);
        }
        for i in 0..nx {
            prop_assert!((g.r[i] * GM / (g.h[i] * g.h[i]) - 1.0).abs() < 1e-12);
        }
    }

    /// Log spacing has a constant node ratio.
    #[test]
    fn grid_log_ratio_constant(nx in 4usize..100) {
        let g = HGrid::new(nx, 1e7, 1e11, GridScale::Log, GM).unwrap();
        let q0 = g.h[1] / g.h[0];
        for i in 2..nx {
            prop_assert!((g.h[i] / g.h[i - 1] / q0 - 1.0).abs() < 1e-10);
        }
    }
}

proptest! {
    /// DiskConfig survives a JSON round trip for arbitrary scalar fields.
    #[test]
    fn config_json_roundtrip(
        mx in 1.0f64..100.0,
        alpha in 0.01f64..1.0,
        kerr in -0.999f64..0.999,
        nx in 10usize..5000,
        bx in 1e8f64..1e14,
    ) {
        let mut cfg = DiskConfig::default();
        cfg.basic.mx = Some(mx);
        cfg.basic.alpha = alpha;
        cfg.basic.kerr = kerr;
        cfg.calc.nx = nx;
        cfg.ns = Some(NeutronStarConfig { bx, ..Default::default() });

        let json = serde_json::to_string(&cfg).unwrap();
        let back: DiskConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.basic.mx, Some(mx));
        prop_assert_eq!(back.basic.alpha, alpha);
        prop_assert_eq!(back.basic.kerr, kerr);
        prop_assert_eq!(back.calc.nx, nx);
        prop_assert_eq!(back.ns.unwrap().bx, bx);
    }
}
