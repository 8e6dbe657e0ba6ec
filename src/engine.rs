//! Color engines: the boundary between the resolver and whatever actually
//! understands CSS color syntax.
//!
//! In a browser the engine is the DOM itself: assign the string to an
//! element's `color` style and read the computed value back. Everywhere else
//! the standalone parser in [`crate::css`] stands in for it. Both report the
//! result the way `getComputedStyle` does, as an `rgb(r, g, b)` string.

use crate::css::parse_css_color;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::HtmlElement;

/// Something that can turn a CSS color string into a computed color.
pub trait ColorEngine {
    /// Resolve `color` to its computed `rgb(r, g, b)` form.
    ///
    /// `None` means the engine could not produce any value. Engines backed by
    /// a real style system may instead report an inherited color (usually
    /// black) for input they do not understand; the resolver guards against
    /// that.
    fn compute(&mut self, color: &str) -> Option<String>;

    /// Drop any handles retained between calls. Must be idempotent.
    fn release(&mut self) {}
}

impl<E: ColorEngine + ?Sized> ColorEngine for Box<E> {
    fn compute(&mut self, color: &str) -> Option<String> {
        (**self).compute(color)
    }

    fn release(&mut self) {
        (**self).release();
    }
}

/// The engine used by default on the current target.
#[cfg(target_arch = "wasm32")]
pub type PlatformEngine = DomEngine;

/// The engine used by default on the current target.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformEngine = CssEngine;

/// Strip the `#` that normalization puts in front of named and functional
/// colors, so `#red` and `#rgb(1, 2, 3)` reach the engine as valid CSS.
///
/// Hex input (surrounding whitespace allowed, as in CSS) and anything
/// already unprefixed pass through untouched.
pub fn css_query(normalized: &str) -> &str {
    match normalized.strip_prefix('#') {
        Some(rest)
            if !rest.trim().is_empty()
                && !rest.starts_with('#')
                && !is_hex_digits(rest.trim()) =>
        {
            rest
        }
        _ => normalized,
    }
}

fn is_hex_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Browser-free engine built on [`crate::css`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CssEngine;

impl CssEngine {
    pub const fn new() -> Self {
        Self
    }
}

impl ColorEngine for CssEngine {
    fn compute(&mut self, color: &str) -> Option<String> {
        parse_css_color(color).map(|rgb| rgb.to_css())
    }
}

/// Engine that asks the browser's style system.
///
/// Keeps one detached probe `<div>` between calls; it is attached to
/// `document.body` only for the duration of a lookup.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct DomEngine {
    probe: Option<HtmlElement>,
}

#[cfg(target_arch = "wasm32")]
impl DomEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn probe(&mut self, document: &web_sys::Document) -> Option<HtmlElement> {
        if let Some(probe) = &self.probe {
            return Some(probe.clone());
        }
        let probe = document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        self.probe = Some(probe.clone());
        Some(probe)
    }
}

#[cfg(target_arch = "wasm32")]
impl ColorEngine for DomEngine {
    fn compute(&mut self, color: &str) -> Option<String> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let body = document.body()?;
        let probe = self.probe(&document)?;

        let style = probe.style();
        style.set_property("color", color).ok()?;
        body.append_child(&probe).ok()?;

        let computed = window
            .get_computed_style(&probe)
            .ok()
            .flatten()
            .and_then(|decl| decl.get_property_value("color").ok());

        probe.remove();
        if let Err(e) = style.remove_property("color") {
            tracing::trace!(error = ?e, "could not reset probe color");
        }

        computed.filter(|c| !c.is_empty())
    }

    fn release(&mut self) {
        if let Some(probe) = self.probe.take() {
            probe.remove();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_css_query_strips_prefix_from_keywords() {
        assert_eq!(css_query("#black"), "black");
        assert_eq!(css_query("#rgb(0, 0, 0)"), "rgb(0, 0, 0)");
        assert_eq!(css_query("#hsl(120 100% 50%)"), "hsl(120 100% 50%)");
    }

    #[test]
    fn test_css_query_keeps_hex() {
        assert_eq!(css_query("#379D94"), "#379D94");
        assert_eq!(css_query("#abc"), "#abc");
        assert_eq!(css_query("#"), "#");
        assert_eq!(css_query("##fff"), "##fff");
        assert_eq!(css_query("red"), "red");
    }

    #[test]
    fn test_css_query_keeps_hex_with_trailing_whitespace() {
        assert_eq!(css_query("#FF0000 "), "#FF0000 ");
        assert_eq!(css_query("#fff\n"), "#fff\n");
        assert_eq!(css_query("# #FF0000"), " #FF0000");
        assert_eq!(css_query("#red "), "red ");
    }

    #[test]
    fn test_css_engine_reports_computed_form() {
        let mut engine = CssEngine::new();
        assert_eq!(engine.compute("#FF0000").as_deref(), Some("rgb(255, 0, 0)"));
        assert_eq!(engine.compute("teal").as_deref(), Some("rgb(0, 128, 128)"));
        assert_eq!(engine.compute("#nope"), None);
    }

    #[test]
    fn test_boxed_engine_delegates() {
        let mut engine: Box<dyn ColorEngine> = Box::new(CssEngine::new());
        assert_eq!(engine.compute("blue").as_deref(), Some("rgb(0, 0, 255)"));
        engine.release();
    }
}
