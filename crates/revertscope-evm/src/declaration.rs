//! Declaration filtering and parsing.
//!
//! Lines are first screened by shape (`error ` prefix, and in strict mode a
//! `);` terminator). Survivors go through the alloy human-readable parser;
//! a survivor the parser rejects is a hard error naming the line, so typos
//! never disappear silently.

use alloy_core::dyn_abi::DynSolType;
use revertscope_core::{
    DecoderError, ErrorParam, ErrorSignature, MemoryErrorRegistry, SourceLine, Strictness,
};

use crate::selector::keccak_selector;

/// The keyword every declaration line starts with.
pub const ERROR_KEYWORD: &str = "error ";

/// The statement terminator strict mode requires.
pub const TERMINATOR: &str = ");";

/// Output of the shape filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredLines {
    /// Lines that look like declarations, in input order, duplicates kept.
    pub candidates: Vec<SourceLine>,
    /// Non-blank lines that did not pass the filter.
    pub skipped: Vec<SourceLine>,
}

/// Whether a (trimmed) line has the shape of an error declaration.
pub fn is_candidate(text: &str, strictness: Strictness) -> bool {
    let text = text.trim();
    text.starts_with(ERROR_KEYWORD) && (!strictness.requires_terminator() || text.ends_with(TERMINATOR))
}

/// Split lines into declaration candidates and skipped lines. Blank lines
/// are dropped without being reported.
pub fn filter_candidates(lines: Vec<SourceLine>, strictness: Strictness) -> FilteredLines {
    let mut out = FilteredLines::default();
    for line in lines {
        if line.text.is_empty() {
            continue;
        }
        if is_candidate(&line.text, strictness) {
            out.candidates.push(line);
        } else {
            out.skipped.push(line);
        }
    }
    out
}

/// Parse one declaration line into an [`ErrorSignature`].
///
/// Accepts `error Name(type [name], ...)` with or without the trailing `;`.
/// Every parameter type must be ABI-decodable, so a declaration that parses
/// here can always be used to decode.
pub fn parse_declaration(line: &SourceLine) -> Result<ErrorSignature, DecoderError> {
    let malformed = |reason: String| DecoderError::MalformedDeclaration {
        line: line.number,
        text: line.text.clone(),
        reason,
    };

    let body = line.text.trim().trim_end_matches(';').trim_end();
    let parsed = alloy_json_abi::Error::parse(body).map_err(|e| malformed(e.to_string()))?;

    let inputs = parsed
        .inputs
        .iter()
        .map(|p| ErrorParam {
            name: p.name.clone(),
            ty: p.selector_type().into_owned(),
        })
        .collect::<Vec<_>>();

    for param in &inputs {
        param
            .ty
            .parse::<DynSolType>()
            .map_err(|e| malformed(format!("unsupported type `{}`: {e}", param.ty)))?;
    }

    let signature = parsed.signature();
    Ok(ErrorSignature {
        selector: keccak_selector(&signature),
        name: parsed.name,
        signature,
        inputs,
        declaration: line.text.clone(),
        line: line.number,
    })
}

/// Parse every candidate into a registry, stopping at the first malformed one.
pub fn build_registry(candidates: &[SourceLine]) -> Result<MemoryErrorRegistry, DecoderError> {
    candidates.iter().map(parse_declaration).collect()
}
