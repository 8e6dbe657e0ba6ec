//! JavaScript-facing accent plugin.
//!
//! The host plugin constructs one `AccentPlugin` on load, calls `update` or
//! `apply` whenever the active view, the theme or the layout changes, and
//! calls `teardown` on unload. Settings are saved as the stored JSON text.
//!
//! ```javascript
//! import init, { AccentPlugin } from 'accent-color';
//! await init();
//! const accent = new AccentPlugin(await plugin.loadData());
//! accent.apply(document.body.classList.contains('theme-dark'), 'livePreview');
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::accent::{AccentContext, AccentTheme, AccentVars};
use crate::engine::PlatformEngine;
use crate::settings::{AccentSettings, ColorScheme, ColorSlot, ViewMode};

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Plain-object serializer; the default one turns maps into JS `Map`s.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| js_err(format!("Serialization error: {e}")))
}

fn settings_from_js(stored: &JsValue) -> Result<AccentSettings, JsValue> {
    if stored.is_undefined() || stored.is_null() {
        return Ok(AccentSettings::default());
    }
    let text = match stored.as_string() {
        Some(text) => text,
        None => String::from(js_sys::JSON::stringify(stored)?),
    };
    if text.trim().is_empty() {
        return Ok(AccentSettings::default());
    }
    AccentSettings::from_json(&text).map_err(js_err)
}

#[wasm_bindgen]
pub struct AccentPlugin {
    theme: AccentTheme<PlatformEngine>,
}

#[wasm_bindgen]
impl AccentPlugin {
    /// Create from the stored settings: the object `loadData()` returns, its
    /// JSON text, or `undefined`/`null`/blank for defaults.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(stored: JsValue) -> Result<AccentPlugin, JsValue> {
        console_error_panic_hook::set_once();

        let settings = settings_from_js(&stored)?;
        Ok(Self {
            theme: AccentTheme::new(settings, PlatformEngine::default()),
        })
    }

    /// Resolve a color string to `{h, s, l}`.
    #[wasm_bindgen]
    pub fn resolve(&mut self, color: &str) -> Result<JsValue, JsValue> {
        to_js(&self.theme.resolve(color))
    }

    /// Compute the accent variables for a context without touching the DOM.
    #[wasm_bindgen]
    pub fn update(&mut self, is_dark: bool, mode: &str) -> Result<JsValue, JsValue> {
        let vars = self.vars_for(is_dark, mode)?;
        to_js(&vars)
    }

    /// Compute the accent variables and set them on `document.body`.
    #[cfg(target_arch = "wasm32")]
    #[wasm_bindgen]
    pub fn apply(&mut self, is_dark: bool, mode: &str) -> Result<(), JsValue> {
        let vars = self.vars_for(is_dark, mode)?;
        let body = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
            .ok_or_else(|| js_err("document.body is not available"))?;
        let style = body.style();
        for (name, value) in vars.properties() {
            style.set_property(name, &value)?;
        }
        Ok(())
    }

    /// Change the color for one (mode, scheme) slot.
    #[wasm_bindgen(js_name = "setColor")]
    pub fn set_color(&mut self, mode: &str, is_dark: bool, value: &str) -> Result<(), JsValue> {
        let mode: ViewMode = mode.parse().map_err(js_err)?;
        self.theme
            .set_color(ColorSlot::new(mode, ColorScheme::from_dark(is_dark)), value);
        Ok(())
    }

    /// Current color for a slot, normalized.
    #[wasm_bindgen(js_name = "getColor")]
    pub fn get_color(&self, mode: &str, is_dark: bool) -> Result<String, JsValue> {
        let mode: ViewMode = mode.parse().map_err(js_err)?;
        Ok(self
            .theme
            .settings()
            .get(ColorSlot::new(mode, ColorScheme::from_dark(is_dark)))
            .to_string())
    }

    #[wasm_bindgen(js_name = "restoreDefaults")]
    pub fn restore_defaults(&mut self) {
        self.theme.restore_defaults();
    }

    /// Settings in their stored form, for `saveData`.
    #[wasm_bindgen(js_name = "settingsJson")]
    pub fn settings_json(&self) -> Result<String, JsValue> {
        self.theme.settings().to_json().map_err(js_err)
    }

    /// Release DOM handles and clear the color cache.
    #[wasm_bindgen]
    pub fn teardown(&mut self) {
        self.theme.teardown();
    }
}

impl AccentPlugin {
    fn vars_for(&mut self, is_dark: bool, mode: &str) -> Result<AccentVars, JsValue> {
        let mode: ViewMode = mode.parse().map_err(js_err)?;
        Ok(self.theme.update(AccentContext::new(is_dark, mode)))
    }
}
