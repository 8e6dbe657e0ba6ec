//! Accent theme controller
//!
//! Glues [`AccentSettings`] to a [`ColorResolver`]: the host reports its
//! context (dark or light, active view mode) whenever it changes, and gets
//! back the three CSS custom properties to set.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::color::HslTriple;
use crate::engine::{ColorEngine, PlatformEngine};
use crate::resolver::ColorResolver;
use crate::settings::{AccentSettings, ColorSlot, ViewMode};

/// Hue variable, in bare degrees.
pub const ACCENT_H: &str = "--accent-h";
/// Saturation variable, as a percentage.
pub const ACCENT_S: &str = "--accent-s";
/// Lightness variable, as a percentage.
pub const ACCENT_L: &str = "--accent-l";

/// What the host is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccentContext {
    pub is_dark: bool,
    pub mode: ViewMode,
}

impl AccentContext {
    pub const fn new(is_dark: bool, mode: ViewMode) -> Self {
        Self { is_dark, mode }
    }
}

/// The accent theme variables for one resolved color.
///
/// Serializes as `{"--accent-h": "250", "--accent-s": "100%", "--accent-l": "50%"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentVars(pub HslTriple);

impl AccentVars {
    pub const fn hsl(self) -> HslTriple {
        self.0
    }

    /// `(property, value)` pairs ready for `style.setProperty`.
    pub fn properties(self) -> [(&'static str, String); 3] {
        let HslTriple {
            hue,
            saturation,
            lightness,
        } = self.0;
        [
            (ACCENT_H, hue.to_string()),
            (ACCENT_S, format!("{saturation}%")),
            (ACCENT_L, format!("{lightness}%")),
        ]
    }
}

impl From<HslTriple> for AccentVars {
    fn from(hsl: HslTriple) -> Self {
        Self(hsl)
    }
}

impl Serialize for AccentVars {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        for (name, value) in self.properties() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

/// Settings plus resolver, owned together for the lifetime of the host
/// plugin.
#[derive(Debug)]
pub struct AccentTheme<E: ColorEngine = PlatformEngine> {
    settings: AccentSettings,
    resolver: ColorResolver<E>,
}

impl<E: ColorEngine + Default> Default for AccentTheme<E> {
    fn default() -> Self {
        Self::new(AccentSettings::default(), E::default())
    }
}

impl<E: ColorEngine> AccentTheme<E> {
    pub fn new(settings: AccentSettings, engine: E) -> Self {
        Self {
            settings,
            resolver: ColorResolver::new(engine),
        }
    }

    /// Recompute the accent for a context. Call on every view, theme or
    /// layout change.
    pub fn update(&mut self, ctx: AccentContext) -> AccentVars {
        let color = self.settings.select(ctx.is_dark, ctx.mode);
        let hsl = self.resolver.resolve(color);
        tracing::debug!(
            mode = %ctx.mode,
            dark = ctx.is_dark,
            color,
            %hsl,
            "accent updated"
        );
        AccentVars(hsl)
    }

    /// Resolve an arbitrary color string with this theme's cache.
    pub fn resolve(&mut self, raw: &str) -> HslTriple {
        self.resolver.resolve(raw)
    }

    pub fn settings(&self) -> &AccentSettings {
        &self.settings
    }

    /// Change one color. Cached colors stay valid; they are keyed by the
    /// color string, not the slot.
    pub fn set_color(&mut self, slot: ColorSlot, value: &str) {
        self.settings.set(slot, value);
    }

    pub fn replace_settings(&mut self, settings: AccentSettings) {
        self.settings = settings;
    }

    pub fn restore_defaults(&mut self) {
        self.settings.restore_defaults();
    }

    pub fn resolver(&self) -> &ColorResolver<E> {
        &self.resolver
    }

    /// Tear down the resolver. Settings survive; the theme can keep being
    /// used and will repopulate its cache.
    pub fn teardown(&mut self) {
        self.resolver.teardown();
    }
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
    use crate::color::DEFAULT_HSL;
    use crate::engine::CssEngine;
    use crate::settings::ColorScheme;

    #[test]
    fn test_properties_format() {
        let props = AccentVars(DEFAULT_HSL).properties();
        assert_eq!(props[0], (ACCENT_H, "250".to_string()));
        assert_eq!(props[1], (ACCENT_S, "100%".to_string()));
        assert_eq!(props[2], (ACCENT_L, "50%".to_string()));
    }

    #[test]
    fn test_vars_serialize_as_css_properties() {
        let json = serde_json::to_string(&AccentVars(HslTriple::new(0, 100, 50))).unwrap();
        assert_eq!(
            json,
            r#"{"--accent-h":"0","--accent-s":"100%","--accent-l":"50%"}"#
        );
    }

    #[test]
    fn test_update_uses_mode_color() {
        let mut theme = AccentTheme::new(AccentSettings::default(), CssEngine);
        let vars = theme.update(AccentContext::new(false, ViewMode::Source));
        assert_eq!(vars.hsl().as_tuple(), (175, 48, 42));
    }

    #[test]
    fn test_update_unset_color_uses_default() {
        let mut theme = AccentTheme::new(AccentSettings::default(), CssEngine);
        theme.set_color(ColorSlot::new(ViewMode::Reading, ColorScheme::Light), "");
        let vars = theme.update(AccentContext::new(false, ViewMode::Reading));
        assert_eq!(vars.hsl(), DEFAULT_HSL);
    }

    #[test]
    fn test_teardown_keeps_settings() {
        let mut theme = AccentTheme::new(AccentSettings::default(), CssEngine);
        theme.update(AccentContext::new(true, ViewMode::Reading));
        assert_eq!(theme.resolver().cache().len(), 1);
        theme.teardown();
        assert!(theme.resolver().cache().is_empty());
        assert_eq!(theme.settings(), &AccentSettings::default());
    }
}
