//! Accent color resolution
//!
//! `ColorResolver` turns a raw, user-entered color string into the HSL triple
//! that drives the accent theme variables:
//!
//! 1. blank input short-circuits to [`DEFAULT_HSL`]
//! 2. the string is normalized to carry a leading `#`
//! 3. the cache is consulted
//! 4. on a miss the [`ColorEngine`] computes the color
//! 5. garbage reported as black, or output that is not three channels,
//!    falls back to [`DEFAULT_HSL`] without being cached
//! 6. the RGB result is converted to HSL and cached
//!
//! `resolve` never fails; [`ColorResolver::try_resolve`] exposes the reason
//! when a fallback happens.

use crate::cache::ColorCache;
use crate::color::{normalize_color, HslTriple, DEFAULT_HSL};
use crate::engine::{css_query, ColorEngine, PlatformEngine};
use crate::error::{AccentError, Result};

/// Resolver owning its cache and color engine.
///
/// Construct one when the host activates and call [`teardown`] when it
/// deactivates.
///
/// [`teardown`]: ColorResolver::teardown
#[derive(Debug)]
pub struct ColorResolver<E: ColorEngine = PlatformEngine> {
    engine: E,
    cache: ColorCache,
}

impl<E: ColorEngine + Default> Default for ColorResolver<E> {
    fn default() -> Self {
        Self::new(E::default())
    }
}

impl<E: ColorEngine> ColorResolver<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            cache: ColorCache::new(),
        }
    }

    /// See [`normalize_color`].
    pub fn normalize(raw: &str) -> String {
        normalize_color(raw)
    }

    /// Resolve a raw color string, falling back to [`DEFAULT_HSL`] on any
    /// failure.
    pub fn resolve(&mut self, raw: &str) -> HslTriple {
        match self.try_resolve(raw) {
            Ok(hsl) => hsl,
            Err(e) => {
                tracing::debug!(color = raw, error = %e, "falling back to default accent");
                DEFAULT_HSL
            }
        }
    }

    /// Resolve a raw color string, reporting why it could not be resolved.
    ///
    /// Blank input is not an error: it means "unset" and yields
    /// [`DEFAULT_HSL`]. Failures are never cached.
    pub fn try_resolve(&mut self, raw: &str) -> Result<HslTriple> {
        let normalized = normalize_color(raw);
        if normalized.is_empty() {
            return Ok(DEFAULT_HSL);
        }

        if let Some(hit) = self.cache.get(&normalized) {
            tracing::trace!(color = %normalized, "accent cache hit");
            return Ok(hit);
        }

        let computed = self
            .engine
            .compute(css_query(&normalized))
            .ok_or_else(|| AccentError::ParseFailure(normalized.clone()))?;

        let (r, g, b) = parse_channels(&computed)?;

        // Style engines report unknown input as the inherited color, which is
        // black by default
        if (r, g, b) == (0, 0, 0) && !plausibly_black(&normalized) {
            return Err(AccentError::ParseFailure(normalized));
        }

        let hsl = HslTriple::from_rgb(r, g, b);
        tracing::trace!(color = %normalized, %computed, %hsl, "accent cache miss");
        self.cache.insert(normalized, hsl);
        Ok(hsl)
    }

    /// Release engine handles and forget every cached color. Idempotent.
    pub fn teardown(&mut self) {
        self.engine.release();
        self.cache.clear();
    }

    pub fn cache(&self) -> &ColorCache {
        &self.cache
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl<E: ColorEngine> Drop for ColorResolver<E> {
    fn drop(&mut self) {
        self.engine.release();
    }
}

/// Pull exactly three 8-bit channels out of a computed color string.
///
/// Every run of ASCII digits counts as a channel, so `rgba(...)` output
/// with an alpha value is rejected.
fn parse_channels(computed: &str) -> Result<(u8, u8, u8)> {
    let malformed = || AccentError::MalformedChannelData(computed.to_string());

    let runs: Vec<&str> = computed
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .collect();

    let [r, g, b] = runs.as_slice() else {
        return Err(malformed());
    };

    let channel = |run: &str| run.parse::<u8>().map_err(|_| malformed());
    Ok((channel(*r)?, channel(*g)?, channel(*b)?))
}

/// Whether the input itself names black: `black`, `#000...`, or an
/// `rgb(0, 0, 0)` literal, case-insensitively.
fn plausibly_black(color: &str) -> bool {
    let lower = color.to_ascii_lowercase();
    lower.contains("black") || lower.contains("#000") || contains_rgb_zero(&lower)
}

fn contains_rgb_zero(s: &str) -> bool {
    s.match_indices("rgb(").any(|(i, _)| {
        let Some(rest) = s.get(i + 4..) else {
            return false;
        };
        let Some(rest) = rest.strip_prefix("0,") else {
            return false;
        };
        let Some(rest) = rest.trim_start().strip_prefix("0,") else {
            return false;
        };
        rest.trim_start().starts_with("0)")
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::engine::CssEngine;
    use tracing_test::traced_test;

    /// Engine that reports everything it doesn't know as black, like a
    /// browser's computed style does.
    #[derive(Default)]
    struct InheritingEngine;

    impl ColorEngine for InheritingEngine {
        fn compute(&mut self, color: &str) -> Option<String> {
            CssEngine.compute(color).or_else(|| Some("rgb(0, 0, 0)".into()))
        }
    }

    #[test]
    fn test_parse_channels() {
        assert_eq!(parse_channels("rgb(55, 157, 148)").unwrap(), (55, 157, 148));
        assert_eq!(parse_channels("rgb(0,0,0)").unwrap(), (0, 0, 0));
    }

    #[test]
    fn test_parse_channels_rejects_alpha() {
        let err = parse_channels("rgba(0, 0, 0, 0)").unwrap_err();
        assert!(matches!(err, AccentError::MalformedChannelData(_)));
        assert!(parse_channels("rgba(10, 20, 30, 0.5)").is_err());
    }

    #[test]
    fn test_parse_channels_rejects_garbage() {
        assert!(parse_channels("").is_err());
        assert!(parse_channels("rgb(1, 2)").is_err());
        assert!(parse_channels("rgb(256, 0, 0)").is_err());
    }

    #[test]
    fn test_plausibly_black() {
        assert!(plausibly_black("#black"));
        assert!(plausibly_black("#BLACK"));
        assert!(plausibly_black("#000"));
        assert!(plausibly_black("#000000"));
        assert!(plausibly_black("#rgb(0, 0, 0)"));
        assert!(plausibly_black("#RGB(0,0,0)"));
        assert!(!plausibly_black("#not-a-color"));
        assert!(!plausibly_black("#rgb(0, 0, 1)"));
        assert!(!plausibly_black("#hsl(0, 0%, 0%)"));
    }

    #[test]
    fn test_garbage_reported_as_black_falls_back() {
        let mut resolver = ColorResolver::new(InheritingEngine);
        assert_eq!(resolver.resolve("not-a-color"), DEFAULT_HSL);
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn test_real_black_through_inheriting_engine() {
        let mut resolver = ColorResolver::new(InheritingEngine);
        assert_eq!(resolver.resolve("black").as_tuple(), (0, 0, 0));
        assert_eq!(resolver.resolve("000").as_tuple(), (0, 0, 0));
        assert!(resolver.cache().contains_key("#black"));
    }

    #[test]
    fn test_try_resolve_reports_reason() {
        let mut resolver = ColorResolver::new(CssEngine);
        let err = resolver.try_resolve("definitely not").unwrap_err();
        assert!(matches!(err, AccentError::ParseFailure(ref c) if c == "#definitely not"));
        assert_eq!(resolver.try_resolve("  ").unwrap(), DEFAULT_HSL);
    }

    #[test]
    fn test_teardown_clears_cache_and_is_idempotent() {
        let mut resolver = ColorResolver::new(CssEngine);
        resolver.resolve("#FF0000");
        assert_eq!(resolver.cache().len(), 1);
        resolver.teardown();
        resolver.teardown();
        assert!(resolver.cache().is_empty());
        // Still usable afterwards
        assert_eq!(resolver.resolve("#FF0000").as_tuple(), (0, 100, 50));
    }

    #[traced_test]
    #[test]
    fn test_fallback_is_logged() {
        let mut resolver = ColorResolver::new(CssEngine);
        resolver.resolve("nope");
        assert!(logs_contain("falling back to default accent"));
    }
}
