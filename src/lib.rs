//! accent-color - accent color resolution for editor theme plugins
//!
//! Turns a user-entered color string into the hue/saturation/lightness
//! triple behind the `--accent-h`, `--accent-s` and `--accent-l` theme
//! variables:
//! - Hex (`#abc`, `#aabbcc`, `#aabbccdd`, with or without `#`), named colors,
//!   `rgb()`/`rgba()`/`hsl()`/`hsla()`
//! - Per view mode (source, live preview, reading) and per light/dark scheme
//! - Memoized per color string, with a guaranteed fallback accent
//!
//! # Usage (Rust)
//!
//! ```
//! use accent_color::{ColorResolver, CssEngine};
//!
//! let mut resolver = ColorResolver::new(CssEngine::new());
//! assert_eq!(resolver.resolve("#FF0000").as_tuple(), (0, 100, 50));
//! assert_eq!(resolver.resolve("not a color").as_tuple(), (250, 100, 50));
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { AccentPlugin } from 'accent-color';
//! await init();
//! const accent = new AccentPlugin(storedJson);
//! accent.apply(isDark, 'reading');
//! ```

// Color pipeline
pub mod cache;
pub mod color;
pub mod css;
pub mod engine;
pub mod error;
pub mod named;
pub mod resolver;

// Host-facing layer
pub mod accent;
pub mod bindings;
pub mod settings;

use wasm_bindgen::prelude::*;

pub use accent::{AccentContext, AccentTheme, AccentVars};
pub use bindings::AccentPlugin;
pub use cache::ColorCache;
pub use color::{normalize_color, HslTriple, DEFAULT_HSL};
pub use css::{parse_css_color, Rgb};
pub use engine::{ColorEngine, CssEngine, PlatformEngine};
pub use error::{AccentError, Result};
pub use resolver::ColorResolver;
pub use settings::{AccentSettings, ColorScheme, ColorSlot, ViewMode};

#[cfg(target_arch = "wasm32")]
pub use engine::DomEngine;

/// Resolve a single color string to `[h, s, l]` without a cache.
///
/// Uses the standalone CSS parser, so the result does not depend on the
/// page's styles.
#[must_use]
#[wasm_bindgen(js_name = "resolveHsl")]
pub fn resolve_hsl(color: &str) -> Vec<u32> {
    let hsl = ColorResolver::new(CssEngine::new()).resolve(color);
    vec![
        u32::from(hsl.hue),
        u32::from(hsl.saturation),
        u32::from(hsl.lightness),
    ]
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
