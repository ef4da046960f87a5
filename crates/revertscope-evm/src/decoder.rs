//! `EvmErrorDecoder` — the top-level EVM custom error decoder.
//!
//! Decode order:
//! 1. Strict mode: raw data must be `0x` + at least 8 hex chars → else `InvalidInput`
//! 2. Declarations filtered by shape
//! 3. Standard selector (`0x08c379a0`, `0x4e487b71`) → `DecodeOutcome::Standard`
//! 4. Declarations parsed → `MalformedDeclaration` on a bad line
//! 5. Strict mode with no declarations → `NoCandidateDeclarations`
//! 6. Selector + arguments decode against a declaration → `DecodeOutcome::Decoded`
//! 7. Selector matches but arguments do not → `DecodeOutcome::PossibleMatches`
//! 8. Fallback → `DecodeOutcome::NoMatch`

use revertscope_core::{
    DeclarationSource, DecodeOutcome, DecodeReport, DecoderConfig, DecoderError, ErrorDecoder,
    ErrorSignatureRegistry, SignatureRow, SourceLine, Strictness,
};
use tracing::{debug, warn};

use crate::custom::{decode_custom_error, leading_selector};
use crate::declaration::{build_registry, filter_candidates, FilteredLines, ERROR_KEYWORD};
use crate::standard;

/// Minimum strict-mode input length: `0x` plus a 4-byte selector.
pub const MIN_INPUT_LEN: usize = 10;

/// EVM custom error decoder.
///
/// # Usage
/// ```rust,no_run
/// use revertscope_core::ErrorDecoder;
/// use revertscope_evm::EvmErrorDecoder;
///
/// let decoder = EvmErrorDecoder::new();
/// let declarations = "error InsufficientBalance(uint256 available, uint256 required);";
/// let report = decoder.decode("0xcf479181...", &declarations).unwrap();
/// println!("{report}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EvmErrorDecoder {
    config: DecoderConfig,
}

impl EvmErrorDecoder {
    /// Create a decoder with the default (strict) configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    fn report(
        &self,
        outcome: DecodeOutcome,
        raw_input: &str,
        candidate_count: usize,
        reference: Vec<SignatureRow>,
        skipped: Vec<SourceLine>,
    ) -> DecodeReport {
        DecodeReport {
            outcome,
            raw_input: raw_input.to_string(),
            strictness: self.config.strictness,
            candidate_count,
            reference,
            skipped,
        }
    }
}

impl ErrorDecoder for EvmErrorDecoder {
    fn chain_family(&self) -> &'static str {
        "evm"
    }

    fn decode(
        &self,
        raw_input: &str,
        declarations: &dyn DeclarationSource,
    ) -> Result<DecodeReport, DecoderError> {
        let strictness = self.config.strictness;
        let input = raw_input.trim();

        if strictness.validates_input() {
            validate_raw_input(input)?;
        }

        let FilteredLines { candidates, skipped } =
            filter_candidates(declarations.declaration_lines()?, strictness);
        log_skipped(&skipped, strictness);

        let data = parse_hex(input)?;
        let selector = leading_selector(&data);

        // ── Standard errors ───────────────────────────────────────────────────
        // Declarations are only parsed past this point.
        if let Some(entry) = selector.and_then(standard::lookup) {
            debug!(signature = entry.signature, "standard error selector");
            let m = entry.decode(&data)?;
            return Ok(self.report(
                DecodeOutcome::Standard(m),
                input,
                candidates.len(),
                vec![],
                skipped,
            ));
        }

        let registry = build_registry(&candidates)?;
        debug!(candidates = registry.len(), %strictness, "declarations parsed");

        if registry.is_empty() && strictness.requires_candidates() {
            return Err(DecoderError::NoCandidateDeclarations);
        }

        // ── Custom errors ─────────────────────────────────────────────────────
        let mismatch = match decode_custom_error(&data, &registry) {
            Ok(m) => {
                debug!(name = %m.name, "decoded custom error");
                return Ok(self.report(
                    DecodeOutcome::Decoded(m),
                    input,
                    registry.len(),
                    vec![],
                    skipped,
                ));
            }
            Err(mismatch) => mismatch,
        };
        debug!(%mismatch, "custom decode failed, scanning declarations by selector");

        // ── Fallback classification ───────────────────────────────────────────
        let rows = registry.reference_rows(selector);
        let matches: Vec<SignatureRow> = rows.iter().filter(|r| r.matches).cloned().collect();
        let outcome = match selector {
            Some(selector) if !matches.is_empty() => DecodeOutcome::PossibleMatches { selector, matches },
            _ => DecodeOutcome::NoMatch { selector },
        };
        let reference = if self.config.reference_table { rows } else { vec![] };

        Ok(self.report(outcome, input, registry.len(), reference, skipped))
    }
}

/// Strict-mode shape check on the trimmed raw input.
pub fn validate_raw_input(input: &str) -> Result<(), DecoderError> {
    if input.starts_with("0x") && input.len() >= MIN_INPUT_LEN {
        Ok(())
    } else {
        Err(DecoderError::InvalidInput {
            input: input.to_string(),
        })
    }
}

/// Decode hex with or without a `0x` prefix.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, DecoderError> {
    let stripped = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    hex::decode(stripped).map_err(|e| DecoderError::InvalidHex {
        reason: e.to_string(),
    })
}

fn log_skipped(skipped: &[SourceLine], strictness: Strictness) {
    for line in skipped {
        if line.text.starts_with(ERROR_KEYWORD) {
            // Only strict mode can drop a line with the keyword: missing `);`.
            warn!(line = line.number, text = %line.text, %strictness, "declaration without `);` terminator skipped");
        } else {
            debug!(line = line.number, text = %line.text, "non-declaration line skipped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_core::dyn_abi::DynSolValue;
    use alloy_primitives::U256;
    use revertscope_core::ErrorFieldValue;

    const INSUFFICIENT: &str = "error InsufficientBalance(uint256 available, uint256 required);";

    /// `InsufficientBalance(100, 250)`
    fn insufficient_data() -> String {
        let args = DynSolValue::Tuple(vec![
            DynSolValue::Uint(U256::from(100u64), 256),
            DynSolValue::Uint(U256::from(250u64), 256),
        ]);
        format!("0xcf479181{}", hex::encode(args.abi_encode_params()))
    }

    const REVERT_HEX: &str = "0x08c379a0\
        0000000000000000000000000000000000000000000000000000000000000020\
        0000000000000000000000000000000000000000000000000000000000000014\
        696e73756666696369656e742062616c616e6365000000000000000000000000";

    fn strict() -> EvmErrorDecoder {
        EvmErrorDecoder::new()
    }

    fn lenient() -> EvmErrorDecoder {
        EvmErrorDecoder::with_config(DecoderConfig::lenient())
    }

    #[test]
    fn decodes_custom_error() {
        let report = strict().decode(&insufficient_data(), &INSUFFICIENT).unwrap();
        match &report.outcome {
            DecodeOutcome::Decoded(m) => {
                assert_eq!(m.name, "InsufficientBalance");
                assert_eq!(m.args[0].value, ErrorFieldValue::Uint(100));
                assert_eq!(m.args[1].value, ErrorFieldValue::Uint(250));
            }
            other => panic!("expected Decoded, got {other:?}"),
        }
        assert!(report.reference.is_empty());
        assert_eq!(report.candidate_count, 1);
    }

    #[test]
    fn standard_error_wins_over_custom_declarations() {
        let decls = "error Error(string message);\nerror Unauthorized();";
        let report = strict().decode(REVERT_HEX, &decls).unwrap();
        assert!(matches!(report.outcome, DecodeOutcome::Standard(_)), "got {:?}", report.outcome);
    }

    #[test]
    fn standard_error_needs_no_declarations_even_strict() {
        let report = strict().decode(REVERT_HEX, &"").unwrap();
        match report.outcome {
            DecodeOutcome::Standard(m) => {
                assert_eq!(m.signature, "Error(string)");
                assert_eq!(m.args[0].value, ErrorFieldValue::Str("insufficient balance".into()));
            }
            other => panic!("expected Standard, got {other:?}"),
        }
    }

    #[test]
    fn standard_error_ignores_malformed_declarations() {
        let report = strict().decode(REVERT_HEX, &"error Odd(Order order);").unwrap();
        match report.outcome {
            DecodeOutcome::Standard(m) => {
                assert_eq!(m.args[0].value, ErrorFieldValue::Str("insufficient balance".into()));
            }
            other => panic!("expected Standard, got {other:?}"),
        }
    }

    #[test]
    fn malformed_declaration_still_fails_custom_data() {
        let err = strict().decode("0xdeadbeef", &"error Odd(Order order);").unwrap_err();
        assert!(matches!(err, DecoderError::MalformedDeclaration { line: 1, .. }), "got {err:?}");
    }

    #[test]
    fn strict_rejects_short_input_before_anything_else() {
        // Malformed declarations would fail later; validation must come first.
        let err = strict().decode("0x1234", &"error Broken(;").unwrap_err();
        assert!(matches!(err, DecoderError::InvalidInput { .. }), "got {err:?}");
        let err = strict().decode("cf479181", &INSUFFICIENT).unwrap_err();
        assert!(matches!(err, DecoderError::InvalidInput { .. }), "got {err:?}");
    }

    #[test]
    fn strict_requires_declarations_for_custom_data() {
        let err = strict()
            .decode("0xdeadbeef", &"error Unauthorized()\n// no terminator above")
            .unwrap_err();
        assert!(matches!(err, DecoderError::NoCandidateDeclarations), "got {err:?}");
    }

    #[test]
    fn lenient_without_declarations_is_no_match() {
        let report = lenient().decode("0xdeadbeef", &"").unwrap();
        assert_eq!(
            report.outcome,
            DecodeOutcome::NoMatch { selector: Some([0xde, 0xad, 0xbe, 0xef]) }
        );
        assert_eq!(report.candidate_count, 0);
        assert!(report.reference.is_empty());
    }

    #[test]
    fn lenient_accepts_unprefixed_and_unterminated() {
        let data = insufficient_data();
        let report = lenient()
            .decode(data.trim_start_matches("0x"), &"error InsufficientBalance(uint256, uint256)")
            .unwrap();
        assert!(report.outcome.is_decoded());
    }

    #[test]
    fn lenient_short_data_has_no_selector() {
        let report = lenient().decode("0x0102", &INSUFFICIENT).unwrap();
        assert_eq!(report.outcome, DecodeOutcome::NoMatch { selector: None });
        assert_eq!(report.reference.len(), 1);
        assert!(!report.reference[0].matches);
    }

    #[test]
    fn bad_hex_is_unclassified_failure() {
        let err = lenient().decode("0xzz", &"").unwrap_err();
        assert!(matches!(err, DecoderError::InvalidHex { .. }), "got {err:?}");
        let err = strict().decode("0xcf479181a", &INSUFFICIENT).unwrap_err();
        assert!(matches!(err, DecoderError::InvalidHex { .. }), "got {err:?}");
    }

    #[test]
    fn strict_bad_hex_without_declarations_is_hex_failure() {
        let err = strict().decode("0xzzzzzzzz", &"").unwrap_err();
        assert!(matches!(err, DecoderError::InvalidHex { .. }), "got {err:?}");
    }

    #[test]
    fn malformed_declaration_names_line() {
        let decls = "error Fine();\nerror Broken(uint256 a;";
        let err = lenient().decode("0xdeadbeef", &decls).unwrap_err();
        match err {
            DecoderError::MalformedDeclaration { line, .. } => assert_eq!(line, 2),
            other => panic!("expected MalformedDeclaration, got {other:?}"),
        }
    }

    #[test]
    fn selector_match_with_bad_arguments_is_possible_match() {
        let decls = format!("{INSUFFICIENT}\nerror Unauthorized();");
        let report = strict().decode("0xcf479181", &decls).unwrap();
        match &report.outcome {
            DecodeOutcome::PossibleMatches { selector, matches } => {
                assert_eq!(*selector, [0xcf, 0x47, 0x91, 0x81]);
                assert_eq!(matches.len(), 1);
                assert_eq!(matches[0].declaration, INSUFFICIENT);
            }
            other => panic!("expected PossibleMatches, got {other:?}"),
        }
        assert_eq!(report.reference.len(), 2);
        assert!(report.reference[0].matches);
        assert!(!report.reference[1].matches);
    }

    #[test]
    fn unknown_selector_lists_every_declaration_unflagged() {
        let decls = format!("{INSUFFICIENT}\nerror Unauthorized();");
        let report = strict().decode("0xdeadbeef00", &decls).unwrap();
        assert!(matches!(report.outcome, DecodeOutcome::NoMatch { .. }));
        let sels: Vec<_> = report.reference.iter().map(|r| r.selector_hex()).collect();
        assert_eq!(sels, ["0xcf479181", "0x82b42900"]);
        assert!(report.reference.iter().all(|r| !r.matches));
    }

    #[test]
    fn reference_table_can_be_disabled() {
        let decoder = EvmErrorDecoder::with_config(DecoderConfig {
            reference_table: false,
            ..DecoderConfig::default()
        });
        let report = decoder.decode("0xdeadbeef", &INSUFFICIENT).unwrap();
        assert!(report.reference.is_empty());
        assert_eq!(report.candidate_count, 1);
    }

    #[test]
    fn skipped_lines_are_reported() {
        let decls = format!("// header\n{INSUFFICIENT}\nerror Unauthorized()");
        let report = strict().decode(&insufficient_data(), &decls).unwrap();
        let skipped: Vec<_> = report.skipped.iter().map(|l| l.number).collect();
        assert_eq!(skipped, [1, 3]);
    }

    #[test]
    fn input_is_trimmed() {
        let padded = format!("  {}\n", insufficient_data());
        let report = strict().decode(&padded, &INSUFFICIENT).unwrap();
        assert_eq!(report.raw_input, insufficient_data());
    }

    #[test]
    fn chain_family_is_evm() {
        assert_eq!(strict().chain_family(), "evm");
    }
}
