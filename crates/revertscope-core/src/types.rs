//! Core types for the revertscope decode report.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::Strictness;
use crate::source::SourceLine;

/// A 4-byte error selector.
pub type Selector = [u8; 4];

/// Render a selector the way Solidity tooling prints it: `0x` + 8 hex chars.
pub fn selector_hex(selector: &Selector) -> String {
    format!("0x{}", hex::encode(selector))
}

// ─── Field value ──────────────────────────────────────────────────────────────

/// A decoded parameter value in an error's argument list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ErrorFieldValue {
    Uint(u128),
    BigUint(String),
    Int(i128),
    BigInt(String),
    Bool(bool),
    Bytes(Vec<u8>),
    Str(String),
    Address(String),
    Array(Vec<ErrorFieldValue>),
    Tuple(Vec<ErrorFieldValue>),
}

impl fmt::Display for ErrorFieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uint(v) => write!(f, "{v}"),
            Self::BigUint(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::BigInt(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Address(a) => write!(f, "{a}"),
            Self::Array(items) => {
                let parts: Vec<_> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::Tuple(items) => {
                let parts: Vec<_> = items.iter().map(ToString::to_string).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}

/// One decoded argument: declared name, canonical type and value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedArg {
    /// Parameter name from the declaration, or `argN` when unnamed.
    pub name: String,
    /// Canonical Solidity type (e.g. `uint256`, `(address,bool)`).
    pub ty: String,
    pub value: ErrorFieldValue,
}

impl fmt::Display for DecodedArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = {}", self.ty, self.name, self.value)
    }
}

// ─── Matches ──────────────────────────────────────────────────────────────────

/// A custom error successfully decoded against one of the user's declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomErrorMatch {
    /// Error name (e.g. `"InsufficientBalance"`).
    pub name: String,
    /// Canonical signature (e.g. `"InsufficientBalance(uint256,uint256)"`).
    pub signature: String,
    pub selector: Selector,
    /// Decoded arguments in declaration order.
    pub args: Vec<DecodedArg>,
}

/// A match against the built-in `Error(string)` / `Panic(uint256)` shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardErrorMatch {
    /// `"Error"` or `"Panic"`.
    pub name: String,
    /// `"Error(string)"` or `"Panic(uint256)"`.
    pub signature: String,
    pub selector: Selector,
    /// Fixed description from the standard error table.
    pub description: String,
    pub args: Vec<DecodedArg>,
    /// For panics: what the panic code means.
    pub panic_meaning: Option<String>,
    /// Optional hint derived from the revert message or panic code.
    pub suggestion: Option<String>,
}

/// One row of the declaration reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureRow {
    /// The declaration as the user wrote it (trimmed).
    pub declaration: String,
    /// Canonical signature the selector was derived from.
    pub signature: String,
    pub selector: Selector,
    /// `true` when `selector` equals the leading 4 bytes of the input.
    pub matches: bool,
}

impl SignatureRow {
    pub fn selector_hex(&self) -> String {
        selector_hex(&self.selector)
    }
}

// ─── DecodeOutcome ────────────────────────────────────────────────────────────

/// The tagged result of one decode attempt.
///
/// Validation failures are not an outcome: they are the `Err` side of
/// [`crate::ErrorDecoder::decode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DecodeOutcome {
    /// The data decoded cleanly against a user declaration.
    Decoded(CustomErrorMatch),

    /// The data is a built-in `Error(string)` or `Panic(uint256)`.
    Standard(StandardErrorMatch),

    /// The selector matched one or more declarations but the argument bytes
    /// did not decode. Decoding is not re-attempted for these.
    PossibleMatches {
        selector: Selector,
        matches: Vec<SignatureRow>,
    },

    /// Nothing matched. `selector` is `None` when the data is shorter than 4 bytes.
    NoMatch { selector: Option<Selector> },
}

impl DecodeOutcome {
    /// Returns `true` if the data was fully decoded (custom or standard).
    pub fn is_decoded(&self) -> bool {
        matches!(self, Self::Decoded(_) | Self::Standard(_))
    }
}

impl fmt::Display for DecodeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decoded(m) => {
                let args: Vec<_> = m.args.iter().map(|a| format!("{}={}", a.name, a.value)).collect();
                write!(f, "{}({})", m.name, args.join(", "))
            }
            Self::Standard(m) => {
                let args: Vec<_> = m.args.iter().map(|a| a.value.to_string()).collect();
                write!(f, "{}({})", m.name, args.join(", "))
            }
            Self::PossibleMatches { selector, matches } => write!(
                f,
                "{} possible match(es) for selector {}",
                matches.len(),
                selector_hex(selector)
            ),
            Self::NoMatch { selector: Some(sel) } => {
                write!(f, "no match for selector {}", selector_hex(sel))
            }
            Self::NoMatch { selector: None } => write!(f, "no match (data shorter than a selector)"),
        }
    }
}

// ─── DecodeReport ─────────────────────────────────────────────────────────────

/// Everything a renderer needs to present one decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeReport {
    pub outcome: DecodeOutcome,

    /// The raw error data as entered, trimmed.
    pub raw_input: String,

    pub strictness: Strictness,

    /// Number of declarations that passed the filter and parsed.
    pub candidate_count: usize,

    /// Every candidate declaration with its selector. Empty when the
    /// reference table is disabled or there are no candidates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference: Vec<SignatureRow>,

    /// Non-blank input lines the declaration filter dropped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SourceLine>,
}

impl fmt::Display for DecodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.outcome)?;
        if let DecodeOutcome::Standard(StandardErrorMatch {
            suggestion: Some(hint),
            ..
        }) = &self.outcome
        {
            write!(f, " — hint: {hint}")?;
        }
        Ok(())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
