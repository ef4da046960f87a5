//! JSON rendering for tooling.

use serde_json::json;

use crate::decoder::DecoderError;
use crate::types::DecodeReport;

/// Render a decode result as pretty JSON.
///
/// Reports serialize as-is; failures become
/// `{ "error": <kind>, "message": ..., "trace": [...] }`.
pub fn render_json(result: &Result<DecodeReport, DecoderError>) -> Result<String, serde_json::Error> {
    match result {
        Ok(report) => serde_json::to_string_pretty(report),
        Err(err) => serde_json::to_string_pretty(&json!({
            "error": err.kind(),
            "message": err.to_string(),
            "trace": err.trace(),
        })),
    }
}
