//! Browser tests for the DOM engine and the JavaScript-facing plugin.
//!
//! Run with: wasm-pack test --headless --firefox
#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use accent_color::{AccentPlugin, ColorEngine, ColorResolver, DomEngine, DEFAULT_HSL};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn body() -> web_sys::HtmlElement {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .expect("document.body")
}

#[wasm_bindgen_test]
fn dom_engine_computes_rgb() {
    let mut engine = DomEngine::new();
    assert_eq!(engine.compute("#ff0000").as_deref(), Some("rgb(255, 0, 0)"));
    assert_eq!(engine.compute("tomato").as_deref(), Some("rgb(255, 99, 71)"));
}

#[wasm_bindgen_test]
fn dom_engine_leaves_no_probe_attached() {
    let before = body().child_element_count();
    let mut engine = DomEngine::new();
    engine.compute("#123456");
    assert_eq!(body().child_element_count(), before);
    engine.release();
    assert_eq!(body().child_element_count(), before);
}

#[wasm_bindgen_test]
fn invalid_color_on_black_body_falls_back() {
    let style = body().style();
    style.set_property("color", "black").unwrap();

    let mut resolver = ColorResolver::new(DomEngine::new());
    assert_eq!(resolver.resolve("not-a-color"), DEFAULT_HSL);
    assert_eq!(resolver.resolve("#000000").as_tuple(), (0, 0, 0));
    assert_eq!(resolver.resolve("379D94").as_tuple(), (175, 48, 42));

    style.remove_property("color").unwrap();
}

#[wasm_bindgen_test]
fn plugin_apply_sets_body_variables() {
    let mut plugin = AccentPlugin::new(JsValue::from_str(r#"{"readingColor": "FF0000"}"#)).unwrap();
    plugin.apply(false, "reading").unwrap();

    let style = body().style();
    assert_eq!(style.get_property_value("--accent-h").unwrap(), "0");
    assert_eq!(style.get_property_value("--accent-s").unwrap(), "100%");
    assert_eq!(style.get_property_value("--accent-l").unwrap(), "50%");

    plugin.teardown();
}

#[wasm_bindgen_test]
fn plugin_settings_round_trip() {
    let mut plugin = AccentPlugin::new(JsValue::UNDEFINED).unwrap();
    plugin.set_color("livePreview", true, "abcdef").unwrap();
    assert_eq!(plugin.get_color("livePreview", true).unwrap(), "#abcdef");
    assert!(plugin.get_color("edit", true).is_err());

    let stored = plugin.settings_json().unwrap();
    assert!(stored.contains(r#""darkLivePreviewColor":"abcdef""#));

    plugin.restore_defaults();
    assert_eq!(plugin.get_color("livePreview", true).unwrap(), "#C790B3");
}

#[wasm_bindgen_test]
fn plugin_rejects_bad_stored_json() {
    assert!(AccentPlugin::new(JsValue::from_str("{oops")).is_err());
    assert!(AccentPlugin::new(JsValue::from_str("   ")).is_ok());
    assert!(AccentPlugin::new(JsValue::NULL).is_ok());
}

#[wasm_bindgen_test]
fn plugin_accepts_stored_object() {
    let stored = js_sys::JSON::parse(r#"{"DarkReadingColor": "00FF00"}"#).unwrap();
    let mut plugin = AccentPlugin::new(stored).unwrap();
    assert_eq!(plugin.get_color("reading", true).unwrap(), "#00FF00");
    plugin.teardown();
}
