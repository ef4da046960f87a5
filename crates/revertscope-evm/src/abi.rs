//! Declarations taken from a standard Ethereum ABI JSON document.

use std::path::Path;

use alloy_json_abi::JsonAbi;
use revertscope_core::{DeclarationSource, DecoderError, SourceLine};

/// Every `error` item of an ABI JSON document, rendered as declaration lines.
///
/// Lines come out in the ABI's name order, one per overload.
#[derive(Debug, Clone)]
pub struct JsonAbiSource {
    abi: JsonAbi,
}

impl JsonAbiSource {
    /// Parse a standard ABI JSON array.
    pub fn from_json(json: &str) -> Result<Self, DecoderError> {
        let abi: JsonAbi = serde_json::from_str(json)?;
        Ok(Self { abi })
    }

    /// Read and parse an ABI JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DecoderError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DecoderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}

impl DeclarationSource for JsonAbiSource {
    fn declaration_lines(&self) -> Result<Vec<SourceLine>, DecoderError> {
        Ok(self
            .abi
            .errors()
            .enumerate()
            .map(|(i, err)| SourceLine::new(i + 1, declaration_line(err)))
            .collect())
    }
}

/// `error Name(type name, ...);` for one ABI error item.
fn declaration_line(err: &alloy_json_abi::Error) -> String {
    let params: Vec<String> = err
        .inputs
        .iter()
        .map(|p| {
            let ty = p.selector_type();
            if p.name.is_empty() {
                ty.into_owned()
            } else {
                format!("{ty} {}", p.name)
            }
        })
        .collect();
    format!("error {}({});", err.name, params.join(", "))
}
