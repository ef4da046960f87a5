//! Decoder configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How strictly the pipeline treats its inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Raw data must be `0x`-prefixed and at least 10 characters, declarations
    /// must end with `);`, and non-standard data needs at least one declaration.
    #[default]
    Strict,
    /// Only the leading `error ` keyword is required; bad input surfaces later
    /// as a hex or decode failure.
    Lenient,
}

impl Strictness {
    /// Whether the raw error data shape is checked up front.
    pub fn validates_input(self) -> bool {
        self == Self::Strict
    }

    /// Whether candidate declarations must end with the `);` terminator.
    pub fn requires_terminator(self) -> bool {
        self == Self::Strict
    }

    /// Whether an empty candidate set is an error.
    pub fn requires_candidates(self) -> bool {
        self == Self::Strict
    }
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::Lenient => f.write_str("lenient"),
        }
    }
}

impl FromStr for Strictness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(format!("unknown strictness '{other}' (expected strict|lenient)")),
        }
    }
}

/// Top-level decoder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoderConfig {
    #[serde(default)]
    pub strictness: Strictness,
    /// Attach the full declaration/selector table to unmatched reports.
    #[serde(default = "bool_true")]
    pub reference_table: bool,
    /// Include the error source chain in generic failure reports.
    #[serde(default = "bool_true")]
    pub include_trace: bool,
}

fn bool_true() -> bool {
    true
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            strictness: Strictness::Strict,
            reference_table: true,
            include_trace: true,
        }
    }
}

impl DecoderConfig {
    /// Default config with lenient input handling.
    pub fn lenient() -> Self {
        Self {
            strictness: Strictness::Lenient,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let cfg: DecoderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.strictness, Strictness::Strict);
        assert!(cfg.reference_table);
        assert!(cfg.include_trace);
    }

    #[test]
    fn strictness_parses_case_insensitively() {
        assert_eq!("Lenient".parse::<Strictness>().unwrap(), Strictness::Lenient);
        assert!("loose".parse::<Strictness>().is_err());
    }

    #[test]
    fn lenient_relaxes_every_check() {
        let s = DecoderConfig::lenient().strictness;
        assert!(!s.validates_input());
        assert!(!s.requires_terminator());
        assert!(!s.requires_candidates());
    }
}
