//! The `ErrorDecoder` trait and the errors its pipeline can end with.

use std::error::Error as StdError;

use crate::source::DeclarationSource;
use crate::types::DecodeReport;
use thiserror::Error;

/// Errors that end a decode without a report.
///
/// Expected outcomes (unknown selector, arguments that do not fit a
/// declaration) are not errors; they come back as a
/// [`DecodeOutcome`](crate::types::DecodeOutcome).
#[derive(Debug, Error)]
pub enum DecoderError {
    /// Strict mode: raw data is not `0x`-prefixed or shorter than a selector.
    #[error("invalid error data {input:?}: expected 0x followed by at least 8 hex characters")]
    InvalidInput { input: String },

    /// Strict mode: no line survived the declaration filter.
    #[error("no valid custom errors found: each line should start with \"error \" and end with \");\"")]
    NoCandidateDeclarations,

    /// A line that looked like a declaration was rejected by the parser.
    #[error("malformed declaration on line {line} ({text:?}): {reason}")]
    MalformedDeclaration {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("invalid hex in error data: {reason}")]
    InvalidHex { reason: String },

    /// The selector is a standard one but the payload does not fit its shape.
    #[error("{signature} payload could not be decoded")]
    StandardPayload {
        signature: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("failed to read declarations from {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid ABI JSON: {0}")]
    AbiJson(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl DecoderError {
    /// Short classification used by renderers and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::NoCandidateDeclarations => "no_candidate_declarations",
            Self::MalformedDeclaration { .. } => "malformed_declaration",
            Self::InvalidHex { .. }
            | Self::StandardPayload { .. }
            | Self::Io { .. }
            | Self::AbiJson(_)
            | Self::Other(_) => "unclassified",
        }
    }

    /// The error followed by every `source()` beneath it, outermost first.
    pub fn trace(&self) -> Vec<String> {
        let mut chain = vec![self.to_string()];
        let mut current = StdError::source(self);
        while let Some(err) = current {
            chain.push(err.to_string());
            current = err.source();
        }
        chain
    }
}

/// A chain-specific custom error decoder.
///
/// Implementations run the whole pipeline: validate the raw input, filter
/// and parse declarations, decode, and fall back to classification when the
/// decode does not fit.
pub trait ErrorDecoder: Send + Sync {
    /// Returns the chain family name this decoder handles (e.g. `"evm"`).
    fn chain_family(&self) -> &'static str;

    /// Decode `raw_input` (hex, usually `0x`-prefixed) against the
    /// declarations yielded by `declarations`.
    fn decode(
        &self,
        raw_input: &str,
        declarations: &dyn DeclarationSource,
    ) -> Result<DecodeReport, DecoderError>;
}
