//! Persisted accent settings
//!
//! Six color strings, one per (view mode, color scheme) pair. The stored
//! JSON is loose: releases have written keys in inconsistent casing and
//! values both with and without a leading `#`. Loading accepts all of that
//! and produces normalized values; saving writes the canonical `camelCase`
//! keys with the `#` stripped, which every release can read back.

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use serde_json::Value;

use crate::color::normalize_color;
use crate::error::{AccentError, Result};

/// Which editing surface is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    Source,
    LivePreview,
    Reading,
}

impl ViewMode {
    pub const ALL: [Self; 3] = [Self::Source, Self::LivePreview, Self::Reading];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::LivePreview => "livePreview",
            Self::Reading => "reading",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = AccentError;

    /// Case-insensitive; `live-preview` and `live_preview` are accepted too.
    fn from_str(s: &str) -> Result<Self> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(&folded))
            .ok_or_else(|| AccentError::UnknownMode(s.to_string()))
    }
}

/// Light or dark base color scheme of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    pub const fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

/// One of the six configurable colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorSlot {
    pub mode: ViewMode,
    pub scheme: ColorScheme,
}

impl ColorSlot {
    /// Every slot, light slots first, in stored-key order.
    pub const ALL: [Self; 6] = [
        Self::new(ViewMode::Source, ColorScheme::Light),
        Self::new(ViewMode::LivePreview, ColorScheme::Light),
        Self::new(ViewMode::Reading, ColorScheme::Light),
        Self::new(ViewMode::Source, ColorScheme::Dark),
        Self::new(ViewMode::LivePreview, ColorScheme::Dark),
        Self::new(ViewMode::Reading, ColorScheme::Dark),
    ];

    pub const fn new(mode: ViewMode, scheme: ColorScheme) -> Self {
        Self { mode, scheme }
    }

    /// Canonical key in the stored settings object.
    pub const fn key(self) -> &'static str {
        match (self.scheme, self.mode) {
            (ColorScheme::Light, ViewMode::Source) => "sourceColor",
            (ColorScheme::Light, ViewMode::LivePreview) => "livePreviewColor",
            (ColorScheme::Light, ViewMode::Reading) => "readingColor",
            (ColorScheme::Dark, ViewMode::Source) => "darkSourceColor",
            (ColorScheme::Dark, ViewMode::LivePreview) => "darkLivePreviewColor",
            (ColorScheme::Dark, ViewMode::Reading) => "darkReadingColor",
        }
    }

    /// Match a stored key regardless of casing.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.key().eq_ignore_ascii_case(key.trim()))
    }

    /// Color shipped for this slot.
    pub const fn default_color(self) -> &'static str {
        match (self.scheme, self.mode) {
            (ColorScheme::Light, ViewMode::Source) => "#379D94",
            (ColorScheme::Light, ViewMode::LivePreview) => "#97698C",
            (ColorScheme::Light, ViewMode::Reading) => "#6B987D",
            (ColorScheme::Dark, ViewMode::Source) => "#52C4BB",
            (ColorScheme::Dark, ViewMode::LivePreview) => "#C790B3",
            (ColorScheme::Dark, ViewMode::Reading) => "#8CBF9E",
        }
    }
}

/// The six accent colors. Values are normalized (leading `#`, or empty for
/// "unset").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccentSettings {
    pub source_color: String,
    pub live_preview_color: String,
    pub reading_color: String,
    pub dark_source_color: String,
    pub dark_live_preview_color: String,
    pub dark_reading_color: String,
}

impl Default for AccentSettings {
    fn default() -> Self {
        let d = |mode, scheme| ColorSlot::new(mode, scheme).default_color().to_string();
        Self {
            source_color: d(ViewMode::Source, ColorScheme::Light),
            live_preview_color: d(ViewMode::LivePreview, ColorScheme::Light),
            reading_color: d(ViewMode::Reading, ColorScheme::Light),
            dark_source_color: d(ViewMode::Source, ColorScheme::Dark),
            dark_live_preview_color: d(ViewMode::LivePreview, ColorScheme::Dark),
            dark_reading_color: d(ViewMode::Reading, ColorScheme::Dark),
        }
    }
}

impl AccentSettings {
    /// Load from the stored JSON text.
    ///
    /// # Errors
    /// Returns an error if the text is not JSON or a known key holds
    /// something other than a string or `null`.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Load from an already-parsed stored value.
    ///
    /// Anything that is not an object yields the defaults. Missing and
    /// `null` fields keep their default; unknown keys are ignored. When the
    /// same key appears in several casings, the canonical spelling wins and
    /// the others are not looked at.
    ///
    /// # Errors
    /// Returns an error if the winning key for a slot holds a non-string
    /// value.
    pub fn from_value(value: &Value) -> Result<Self> {
        let mut settings = Self::default();
        let Value::Object(map) = value else {
            return Ok(settings);
        };

        let mut entries: Vec<(ColorSlot, &String, &Value)> = Vec::with_capacity(map.len());
        for (key, v) in map {
            match ColorSlot::from_key(key) {
                Some(slot) => entries.push((slot, key, v)),
                None => tracing::debug!(key = %key, "ignoring unknown settings key"),
            }
        }
        // Canonical keys last so they override stray casings
        entries.sort_by_key(|(slot, key, _)| key.as_str() == slot.key());

        // Only the winning entry per slot is read; shadowed ones may hold
        // anything
        let mut seen: Vec<ColorSlot> = Vec::with_capacity(ColorSlot::ALL.len());
        for (slot, key, v) in entries.into_iter().rev() {
            if seen.contains(&slot) {
                tracing::debug!(key = %key, "ignoring shadowed settings key");
                continue;
            }
            seen.push(slot);
            match v {
                Value::Null => {}
                Value::String(s) => settings.set(slot, s),
                other => {
                    return Err(AccentError::InvalidSetting {
                        key: key.clone(),
                        reason: format!("expected a color string, found {other}"),
                    })
                }
            }
        }
        Ok(settings)
    }

    /// Serialize to the stored form.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn get(&self, slot: ColorSlot) -> &str {
        match (slot.scheme, slot.mode) {
            (ColorScheme::Light, ViewMode::Source) => &self.source_color,
            (ColorScheme::Light, ViewMode::LivePreview) => &self.live_preview_color,
            (ColorScheme::Light, ViewMode::Reading) => &self.reading_color,
            (ColorScheme::Dark, ViewMode::Source) => &self.dark_source_color,
            (ColorScheme::Dark, ViewMode::LivePreview) => &self.dark_live_preview_color,
            (ColorScheme::Dark, ViewMode::Reading) => &self.dark_reading_color,
        }
    }

    /// Store a color for a slot, normalized.
    pub fn set(&mut self, slot: ColorSlot, value: &str) {
        *self.slot_mut(slot) = normalize_color(value);
    }

    pub fn restore_defaults(&mut self) {
        *self = Self::default();
    }

    /// Effective color for a context.
    ///
    /// Dark mode prefers the dark variant and falls back to the light one
    /// when the dark one is unset. An empty result means "use the default
    /// accent".
    pub fn select(&self, is_dark: bool, mode: ViewMode) -> &str {
        let light = self.get(ColorSlot::new(mode, ColorScheme::Light));
        if !is_dark {
            return light;
        }
        let dark = self.get(ColorSlot::new(mode, ColorScheme::Dark));
        if dark.trim().is_empty() {
            light
        } else {
            dark
        }
    }

    fn slot_mut(&mut self, slot: ColorSlot) -> &mut String {
        match (slot.scheme, slot.mode) {
            (ColorScheme::Light, ViewMode::Source) => &mut self.source_color,
            (ColorScheme::Light, ViewMode::LivePreview) => &mut self.live_preview_color,
            (ColorScheme::Light, ViewMode::Reading) => &mut self.reading_color,
            (ColorScheme::Dark, ViewMode::Source) => &mut self.dark_source_color,
            (ColorScheme::Dark, ViewMode::LivePreview) => &mut self.dark_live_preview_color,
            (ColorScheme::Dark, ViewMode::Reading) => &mut self.dark_reading_color,
        }
    }
}

impl Serialize for AccentSettings {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ColorSlot::ALL.len()))?;
        for slot in ColorSlot::ALL {
            let value = self.get(slot);
            map.serialize_entry(slot.key(), value.strip_prefix('#').unwrap_or(value))?;
        }
        map.end()
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

    #[test]
    fn test_slot_keys_round_trip() {
        for slot in ColorSlot::ALL {
            assert_eq!(ColorSlot::from_key(slot.key()), Some(slot));
        }
    }

    #[test]
    fn test_slot_key_casing() {
        let slot = ColorSlot::new(ViewMode::LivePreview, ColorScheme::Dark);
        assert_eq!(ColorSlot::from_key("DarkLivePreviewColor"), Some(slot));
        assert_eq!(ColorSlot::from_key("darklivepreviewcolor"), Some(slot));
        assert_eq!(ColorSlot::from_key("darkLivepreviewColor"), Some(slot));
        assert_eq!(ColorSlot::from_key("accentColor"), None);
    }

    #[test]
    fn test_view_mode_parse() {
        assert_eq!("source".parse::<ViewMode>().unwrap(), ViewMode::Source);
        assert_eq!("livePreview".parse::<ViewMode>().unwrap(), ViewMode::LivePreview);
        assert_eq!("live-preview".parse::<ViewMode>().unwrap(), ViewMode::LivePreview);
        assert_eq!("READING".parse::<ViewMode>().unwrap(), ViewMode::Reading);
        assert!(matches!(
            "edit".parse::<ViewMode>(),
            Err(AccentError::UnknownMode(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let s = AccentSettings::default();
        assert_eq!(s.source_color, "#379D94");
        assert_eq!(s.dark_reading_color, "#8CBF9E");
    }

    #[test]
    fn test_set_normalizes() {
        let mut s = AccentSettings::default();
        let slot = ColorSlot::new(ViewMode::Reading, ColorScheme::Light);
        s.set(slot, "abcdef");
        assert_eq!(s.get(slot), "#abcdef");
        s.set(slot, "   ");
        assert_eq!(s.get(slot), "");
    }

    #[test]
    fn test_select_light_ignores_dark() {
        let mut s = AccentSettings::default();
        s.live_preview_color = String::new();
        assert_eq!(s.select(false, ViewMode::LivePreview), "");
    }

    #[test]
    fn test_stored_form_strips_hash() {
        let json = AccentSettings::default().to_json().unwrap();
        let v: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["sourceColor"], "379D94");
        assert_eq!(v["darkLivePreviewColor"], "C790B3");
        assert_eq!(v.as_object().unwrap().len(), 6);
    }
}
