//! # revertscope-wasm
//!
//! WebAssembly (WASM) bindings for revertscope.
//! Built with wasm-bindgen — runs in modern browsers and Node.js WASM runtime.
//!
//! ## Usage (browser)
//! ```javascript
//! import init, { parseError, processingHtml } from '@chainfoundry/revertscope-wasm';
//!
//! await init();
//!
//! result.innerHTML = processingHtml();
//! result.innerHTML = parseError(
//!   errorInput.value,
//!   customErrors.value,   // one `error Name(...);` per line
//!   false,                // strict
//! );
//! ```

use wasm_bindgen::prelude::*;

use revertscope_core::render::{render_html, render_json, PROCESSING_HTML};
use revertscope_core::{selector_hex, DecoderConfig, ErrorDecoder};
use revertscope_evm::{selector_of_declaration, EvmErrorDecoder};

// ─── Panic hook setup ─────────────────────────────────────────────────────────

#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn decoder(lenient: bool) -> EvmErrorDecoder {
    let config = if lenient {
        DecoderConfig::lenient()
    } else {
        DecoderConfig::default()
    };
    EvmErrorDecoder::with_config(config)
}

// ─── Entry points ─────────────────────────────────────────────────────────────

/// Decode `error_data` against the newline-separated `custom_errors` and
/// return the HTML fragment for the result area. Never throws: every
/// failure is rendered.
#[wasm_bindgen(js_name = parseError)]
pub fn parse_error(error_data: &str, custom_errors: &str, lenient: bool) -> String {
    let decoder = decoder(lenient);
    let result = decoder.decode(error_data, &custom_errors);
    render_html(&result, decoder.config())
}

/// Same decode as `parseError`, returned as a JSON string.
#[wasm_bindgen(js_name = decodeErrorJson)]
pub fn decode_error_json(
    error_data: &str,
    custom_errors: &str,
    lenient: bool,
) -> Result<String, JsError> {
    let result = decoder(lenient).decode(error_data, &custom_errors);
    render_json(&result).map_err(|e| JsError::new(&e.to_string()))
}

/// `{"signature": "...", "selector": "0x..."}` for one declaration.
#[wasm_bindgen(js_name = selectorOf)]
pub fn selector_of(declaration: &str) -> Result<String, JsError> {
    let (signature, selector) =
        selector_of_declaration(declaration).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(serde_json::json!({
        "signature": signature,
        "selector": selector_hex(&selector),
    })
    .to_string())
}

/// Placeholder shown while a decode is in flight.
#[wasm_bindgen(js_name = processingHtml)]
pub fn processing_html() -> String {
    PROCESSING_HTML.to_string()
}
