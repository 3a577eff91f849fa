//! WASM bindings for jdelta-core.
//!
//! Exposes the two engine entry points as `#[wasm_bindgen]` functions for
//! browser presentation layers. Everything is string-in/string-out: inputs
//! are raw document text, outputs are JSON payloads the UI renders directly
//! (parse-status badges, the auto-fix text, and the difference report).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p jdelta-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/jdelta_wasm.wasm
//! ```

use wasm_bindgen::prelude::*;

use jdelta_core::ExpectedShape;

fn shape_from_str(shape: &str) -> Result<ExpectedShape, JsValue> {
    match shape {
        "array" => Ok(ExpectedShape::Array),
        "any" => Ok(ExpectedShape::ObjectOrArray),
        other => Err(JsValue::from_str(&format!(
            "unknown shape '{}'; expected \"array\" or \"any\"",
            other
        ))),
    }
}

/// Parse one input and report `{"tier": ..., "normalized": ...}` as JSON.
///
/// `shape` is `"array"` or `"any"`. Throws a JS error with the parse
/// failure message when no tier accepts the input.
#[wasm_bindgen]
pub fn parse_and_classify(text: &str, shape: &str) -> Result<String, JsValue> {
    let shape = shape_from_str(shape)?;
    let parsed =
        jdelta_core::parse_and_classify(text, shape).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let payload = serde_json::json!({
        "tier": parsed.tier.as_str(),
        "normalized": parsed.normalized,
    });
    serde_json::to_string(&payload).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compare two inputs and return the full analysis report as JSON.
///
/// Throws a JS error naming the failing side (`"input A failed to parse:
/// ..."`) when either input is rejected; no partial report is produced.
#[wasm_bindgen]
pub fn compare(text_a: &str, text_b: &str, shape: &str) -> Result<String, JsValue> {
    let shape = shape_from_str(shape)?;
    let report = jdelta_core::compare(text_a, text_b, shape)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&report).map_err(|e| JsValue::from_str(&e.to_string()))
}
