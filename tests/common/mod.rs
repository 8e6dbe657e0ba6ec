//! Shared helpers for accent-color integration tests.
#![allow(dead_code)]

use accent_color::{ColorEngine, ColorResolver, CssEngine, HslTriple};

/// Engine wrapper that counts how often it is asked to compute and
/// released.
///
/// With `inherit_black` set it reports unknown input as `rgb(0, 0, 0)`, the
/// way a browser's computed style reports an invalid `color` on an element
/// whose parent is black.
#[derive(Debug, Default)]
pub struct CountingEngine {
    pub calls: usize,
    pub releases: usize,
    pub queries: Vec<String>,
    pub inherit_black: bool,
}

impl CountingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inheriting_black() -> Self {
        Self {
            inherit_black: true,
            ..Self::default()
        }
    }
}

impl ColorEngine for CountingEngine {
    fn compute(&mut self, color: &str) -> Option<String> {
        self.calls += 1;
        self.queries.push(color.to_string());
        let computed = CssEngine::new().compute(color);
        if self.inherit_black {
            computed.or_else(|| Some("rgb(0, 0, 0)".to_string()))
        } else {
            computed
        }
    }

    fn release(&mut self) {
        self.releases += 1;
    }
}

/// Engine that always answers with a fixed string.
#[derive(Debug)]
pub struct FixedEngine(pub &'static str);

impl ColorEngine for FixedEngine {
    fn compute(&mut self, _color: &str) -> Option<String> {
        Some(self.0.to_string())
    }
}

pub fn counting_resolver() -> ColorResolver<CountingEngine> {
    ColorResolver::new(CountingEngine::new())
}

/// Assert two triples agree within one unit per component.
pub fn assert_hsl_near(actual: HslTriple, expected: (u16, u8, u8)) {
    let (h, s, l) = actual.as_tuple();
    assert!(
        h.abs_diff(expected.0) <= 1 && s.abs_diff(expected.1) <= 1 && l.abs_diff(expected.2) <= 1,
        "expected ~{expected:?}, got {:?}",
        actual.as_tuple()
    );
}
