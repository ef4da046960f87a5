//! Plain-text rendering for terminals.

use std::fmt::Write;

use super::{BUILTIN_NOTE, CHECK_DEFINITIONS_HINT, INVALID_INPUT_MESSAGE, NO_CANDIDATES_MESSAGE};
use crate::config::DecoderConfig;
use crate::decoder::DecoderError;
use crate::types::{selector_hex, DecodeOutcome, DecodeReport, DecodedArg};

/// Render the outcome of one decode as indented plain text.
pub fn render_text(result: &Result<DecodeReport, DecoderError>, config: &DecoderConfig) -> String {
    let report = match result {
        Ok(report) => report,
        Err(DecoderError::InvalidInput { .. }) => return format!("{INVALID_INPUT_MESSAGE}\n"),
        Err(DecoderError::NoCandidateDeclarations) => return format!("{NO_CANDIDATES_MESSAGE}\n"),
        Err(err) => {
            let mut out = format!("Error occurred: {err}\n");
            if config.include_trace {
                for cause in err.trace().iter().skip(1) {
                    let _ = writeln!(out, "  caused by: {cause}");
                }
            }
            let _ = writeln!(out, "{CHECK_DEFINITIONS_HINT}");
            return out;
        }
    };

    let mut out = String::new();
    match &report.outcome {
        DecodeOutcome::Decoded(m) => {
            let _ = writeln!(out, "Custom error: {}", m.name);
            let _ = writeln!(out, "  Signature:  {}", m.signature);
            let _ = writeln!(out, "  Selector:   {}", selector_hex(&m.selector));
            write_args(&mut out, &m.args);
            let _ = writeln!(out, "  Raw data:   {}", report.raw_input);
        }
        DecodeOutcome::Standard(m) => {
            let _ = writeln!(out, "Standard EVM error: {}", m.signature);
            let _ = writeln!(out, "  Description: {}", m.description);
            write_args(&mut out, &m.args);
            if let Some(meaning) = &m.panic_meaning {
                let _ = writeln!(out, "  Meaning:    {meaning}");
            }
            if let Some(hint) = &m.suggestion {
                let _ = writeln!(out, "  Hint:       {hint}");
            }
            let _ = writeln!(out, "  {BUILTIN_NOTE}");
        }
        DecodeOutcome::PossibleMatches { matches, .. } => {
            let _ = writeln!(out, "Could not automatically parse: {}", report.raw_input);
            out.push_str("Possible matching custom errors:\n");
            for row in matches {
                let _ = writeln!(out, "  {}  {}", row.selector_hex(), row.declaration);
            }
        }
        DecodeOutcome::NoMatch { .. } => {
            let _ = writeln!(out, "Could not automatically parse: {}", report.raw_input);
            if report.candidate_count == 0 {
                out.push_str("No custom errors defined\n");
            } else {
                out.push_str("No exact matches found in the provided custom errors\n");
            }
        }
    }

    if !report.reference.is_empty() {
        out.push_str("All custom error signatures:\n");
        for row in &report.reference {
            let marker = if row.matches { '*' } else { ' ' };
            let _ = writeln!(out, " {marker} {}  {}", row.selector_hex(), row.declaration);
        }
    }

    if !report.skipped.is_empty() {
        let _ = writeln!(out, "Skipped {} line(s) that are not declarations:", report.skipped.len());
        for line in &report.skipped {
            let _ = writeln!(out, "  {:>4}: {}", line.number, line.text);
        }
    }
    out
}

fn write_args(out: &mut String, args: &[DecodedArg]) {
    if args.is_empty() {
        return;
    }
    out.push_str("  Arguments:\n");
    for arg in args {
        let _ = writeln!(out, "    {arg}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Strictness;
    use crate::source::SourceLine;
    use crate::types::{ErrorFieldValue, SignatureRow, StandardErrorMatch};

    #[test]
    fn standard_error_text() {
        let report = DecodeReport {
            outcome: DecodeOutcome::Standard(StandardErrorMatch {
                name: "Error".into(),
                signature: "Error(string)".into(),
                selector: [0x08, 0xc3, 0x79, 0xa0],
                description: "Standard revert with message string".into(),
                args: vec![DecodedArg {
                    name: "arg0".into(),
                    ty: "string".into(),
                    value: ErrorFieldValue::Str("insufficient balance".into()),
                }],
                panic_meaning: None,
                suggestion: None,
            }),
            raw_input: "0x08c379a0".into(),
            strictness: Strictness::Strict,
            candidate_count: 0,
            reference: vec![],
            skipped: vec![],
        };
        let text = render_text(&Ok(report), &DecoderConfig::default());
        assert!(text.starts_with("Standard EVM error: Error(string)\n"));
        assert!(text.contains("    string arg0 = \"insufficient balance\"\n"));
    }

    #[test]
    fn no_match_text_marks_rows_and_skips() {
        let report = DecodeReport {
            outcome: DecodeOutcome::NoMatch { selector: Some([1, 1, 1, 1]) },
            raw_input: "0x01010101".into(),
            strictness: Strictness::Lenient,
            candidate_count: 1,
            reference: vec![SignatureRow {
                declaration: "error A();".into(),
                signature: "A()".into(),
                selector: [0xf4, 0x46, 0xc1, 0xd0],
                matches: false,
            }],
            skipped: vec![SourceLine::new(2, "// comment")],
        };
        let text = render_text(&Ok(report), &DecoderConfig::default());
        assert!(text.contains("No exact matches found"));
        assert!(text.contains("   0xf446c1d0  error A();\n"));
        assert!(text.contains("     2: // comment\n"));
    }

    #[test]
    fn failure_text_lists_causes() {
        let err = DecoderError::Io {
            path: "errors.sol".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let text = render_text(&Err(err), &DecoderConfig::default());
        assert!(text.starts_with("Error occurred: failed to read declarations from errors.sol\n"));
        assert!(text.contains("  caused by: gone\n"));
    }
}
