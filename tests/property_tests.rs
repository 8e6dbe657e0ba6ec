//! Property-based tests for the resolution pipeline.
//!
//! 1. Every 6-digit hex color resolves to an in-range triple
//! 2. Resolution is deterministic and prefix-insensitive
//! 3. The engine is consulted at most once per distinct normalized string
//! 4. Conversion agrees with an HSL round trip within rounding
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

mod common;

use accent_color::color::{hsl_to_rgb, rgb_to_hsl};
use accent_color::{normalize_color, parse_css_color, HslTriple};
use common::counting_resolver;
use proptest::prelude::*;

fn hex6() -> impl Strategy<Value = String> {
    any::<[u8; 3]>().prop_map(|[r, g, b]| format!("{r:02x}{g:02X}{b:02x}"))
}

proptest! {
    #[test]
    fn resolved_triple_is_in_range(hex in hex6()) {
        let mut resolver = counting_resolver();
        let hsl = resolver.resolve(&hex);
        prop_assert!(hsl.hue <= 360);
        prop_assert!(hsl.saturation <= 100);
        prop_assert!(hsl.lightness <= 100);
    }

    #[test]
    fn resolution_is_prefix_insensitive(hex in hex6()) {
        let mut resolver = counting_resolver();
        let bare = resolver.resolve(&hex);
        let hashed = resolver.resolve(&format!("#{hex}"));
        prop_assert_eq!(bare, hashed);
        prop_assert_eq!(resolver.engine().calls, 1);
    }

    #[test]
    fn fresh_resolvers_agree(hex in hex6()) {
        let a = counting_resolver().resolve(&hex);
        let b = counting_resolver().resolve(&hex);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn engine_called_once_per_distinct_color(
        colors in prop::collection::vec(hex6(), 1..20),
        repeats in 1usize..4,
    ) {
        let mut resolver = counting_resolver();
        for _ in 0..repeats {
            for c in &colors {
                resolver.resolve(c);
            }
        }
        let mut distinct: Vec<String> = colors.iter().map(|c| normalize_color(c)).collect();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(resolver.engine().calls, distinct.len());
        prop_assert_eq!(resolver.cache().len(), distinct.len());
    }

    #[test]
    fn normalize_is_idempotent(raw in "[ #]{0,2}[0-9a-zA-Z]{0,8}[ ]{0,2}") {
        let once = normalize_color(&raw);
        prop_assert_eq!(normalize_color(&once), once.clone());
        prop_assert!(once.is_empty() || once.starts_with('#'));
    }

    #[test]
    fn hsl_round_trip_stays_close(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let (h, s, l) = rgb_to_hsl(r, g, b);
        let (r2, g2, b2) = hsl_to_rgb(h, s, l);
        prop_assert!(r.abs_diff(r2) <= 1, "r {} vs {}", r, r2);
        prop_assert!(g.abs_diff(g2) <= 1, "g {} vs {}", g, g2);
        prop_assert!(b.abs_diff(b2) <= 1, "b {} vs {}", b, b2);
    }

    #[test]
    fn parsed_hex_matches_channels(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let rgb = parse_css_color(&format!("#{r:02x}{g:02x}{b:02x}")).unwrap();
        prop_assert_eq!((rgb.r, rgb.g, rgb.b), (r, g, b));
        prop_assert_eq!(HslTriple::from_rgb(r, g, b), HslTriple::from_rgb(rgb.r, rgb.g, rgb.b));
    }
}
