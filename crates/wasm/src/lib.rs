//! glue-wasm - WebAssembly entry points for gluing codes in the browser.
//!
//! Searches run single-threaded here; the engine is built without rayon.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use glue_engine::{glue_codes, parse_order, split_codes, GlueReport, SearchConfig};

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct JsSearchConfig {
    inner: SearchConfig,
}

#[wasm_bindgen]
impl JsSearchConfig {
    /// `expected_solutions` of zero or below means no limit.
    #[wasm_bindgen(constructor)]
    pub fn new(fast: bool, expected_solutions: i32) -> Self {
        let mut inner = SearchConfig::exhaustive().with_fast(fast);
        if let Ok(limit) = usize::try_from(expected_solutions) {
            inner = inner.with_expected_solutions(limit);
        }
        Self { inner }
    }

    pub fn set_order(&mut self, order: &str) -> Result<(), JsError> {
        let order = parse_order(order).map_err(|e| JsError::new(&e.to_string()))?;
        self.inner = self.inner.clone().with_order(order);
        Ok(())
    }

    pub fn set_visualize(&mut self, visualize: bool) {
        self.inner = self.inner.clone().with_visualize(visualize);
    }

    #[wasm_bindgen(getter)]
    pub fn fast(&self) -> bool {
        self.inner.fast
    }
}

#[derive(Serialize)]
struct JsGlueOutput<'a> {
    lines: Vec<String>,
    errors: Vec<String>,
    unglued: usize,
    trace: Option<&'a str>,
}

impl<'a> JsGlueOutput<'a> {
    fn new(report: &'a GlueReport) -> Self {
        Self {
            lines: report.lines(),
            errors: report.errors().map(|(_, error)| error.to_string()).collect(),
            unglued: report.unglued(),
            trace: report.trace.as_deref(),
        }
    }
}

fn run(input: &str, config: &SearchConfig) -> GlueReport {
    let codes = split_codes(&[input]);
    glue_codes(&codes, config)
}

/// Glue whitespace-separated codes and return the output lines.
#[wasm_bindgen]
pub fn glue(input: &str, fast: bool, expected_solutions: i32) -> Result<JsValue, JsError> {
    let config = JsSearchConfig::new(fast, expected_solutions);
    let report = run(input, &config.inner);
    serde_wasm_bindgen::to_value(&report.lines()).map_err(|e| JsError::new(&e.to_string()))
}

/// Lines, decode errors, the unglued count and the visualize trace.
#[wasm_bindgen]
pub fn glue_with(input: &str, config: &JsSearchConfig) -> Result<JsValue, JsError> {
    let report = run(input, &config.inner);
    serde_wasm_bindgen::to_value(&JsGlueOutput::new(&report))
        .map_err(|e| JsError::new(&e.to_string()))
}

/// The full per-code, per-page report.
#[wasm_bindgen]
pub fn glue_report(input: &str, config: &JsSearchConfig) -> Result<JsValue, JsError> {
    let report = run(input, &config.inner);
    serde_wasm_bindgen::to_value(&report).map_err(|e| JsError::new(&e.to_string()))
}
