//! HTML fragments for the browser result container.

use std::fmt::Write;

use super::{
    escape_html, BUILTIN_NOTE, CHECK_DEFINITIONS_HINT, INVALID_INPUT_MESSAGE,
    NO_CANDIDATES_MESSAGE,
};
use crate::config::DecoderConfig;
use crate::decoder::DecoderError;
use crate::types::{
    selector_hex, CustomErrorMatch, DecodeOutcome, DecodeReport, DecodedArg, SignatureRow,
    StandardErrorMatch,
};

/// Shown in the result container while a decode runs.
pub const PROCESSING_HTML: &str = "<p>Processing...</p>";

/// Render the outcome of one decode as an HTML fragment.
pub fn render_html(result: &Result<DecodeReport, DecoderError>, config: &DecoderConfig) -> String {
    match result {
        Ok(report) => match &report.outcome {
            DecodeOutcome::Decoded(m) => decoded(report, m),
            DecodeOutcome::Standard(m) => standard(m),
            DecodeOutcome::PossibleMatches { .. } | DecodeOutcome::NoMatch { .. } => {
                unmatched(report)
            }
        },
        Err(DecoderError::InvalidInput { .. }) => targeted(INVALID_INPUT_MESSAGE),
        Err(DecoderError::NoCandidateDeclarations) => targeted(NO_CANDIDATES_MESSAGE),
        Err(err) => failure(err, config.include_trace),
    }
}

fn targeted(message: &str) -> String {
    format!("<p class=\"error-match\">{}</p>", escape_html(message))
}

fn decoded(report: &DecodeReport, m: &CustomErrorMatch) -> String {
    let mut out = String::new();
    out.push_str("<h3>Successfully parsed custom error:</h3>\n");
    let _ = writeln!(
        out,
        "<p><strong>Error Name:</strong> <span class=\"error-match\">{}</span></p>",
        escape_html(&m.name)
    );
    let _ = writeln!(out, "<p><strong>Signature:</strong> {}</p>", escape_html(&m.signature));
    let _ = writeln!(
        out,
        "<p><strong>Selector:</strong> <code>{}</code></p>",
        selector_hex(&m.selector)
    );
    if !m.args.is_empty() {
        out.push_str("<p><strong>Arguments:</strong></p>\n");
        out.push_str(&arg_list(&m.args));
    }
    let _ = writeln!(out, "<p><strong>Raw Data:</strong> {}</p>", escape_html(&report.raw_input));
    out
}

fn standard(m: &StandardErrorMatch) -> String {
    let mut out = String::new();
    out.push_str("<h3>Standard EVM Error Detected</h3>\n");
    let _ = writeln!(out, "<p><strong>Type:</strong> {}</p>", escape_html(&m.name));
    let _ = writeln!(
        out,
        "<p><strong>Description:</strong> {}</p>",
        escape_html(&m.description)
    );
    if !m.args.is_empty() {
        let values: Vec<String> = m.args.iter().map(|a| a.value.to_string()).collect();
        let details = serde_json::to_string(&values).unwrap_or_default();
        let _ = writeln!(out, "<p><strong>Details:</strong> {}</p>", escape_html(&details));
    }
    if let Some(meaning) = &m.panic_meaning {
        let _ = writeln!(out, "<p><strong>Meaning:</strong> {}</p>", escape_html(meaning));
    }
    if let Some(hint) = &m.suggestion {
        let _ = writeln!(out, "<p><strong>Hint:</strong> {}</p>", escape_html(hint));
    }
    let _ = writeln!(out, "<p><em>{BUILTIN_NOTE}</em></p>");
    out
}

fn unmatched(report: &DecodeReport) -> String {
    let mut out = String::new();
    out.push_str("<h3>Error Analysis</h3>\n");
    let _ = writeln!(
        out,
        "<p>Could not automatically parse: <code>{}</code></p>",
        escape_html(&report.raw_input)
    );

    match &report.outcome {
        DecodeOutcome::PossibleMatches { matches, .. } => {
            out.push_str("<h4>Possible Matching Custom Errors:</h4>\n<ul>\n");
            for row in matches {
                let _ = writeln!(
                    out,
                    "<li><span class=\"error-match\">{}</span> (signature: {})</li>",
                    escape_html(&row.declaration),
                    row.selector_hex()
                );
            }
            out.push_str("</ul>\n");
        }
        _ if report.candidate_count == 0 => {
            out.push_str("<p>No custom errors defined</p>\n");
        }
        _ => out.push_str("<p>No exact matches found in the provided custom errors</p>\n"),
    }

    if !report.reference.is_empty() {
        out.push_str(&reference_table(&report.reference));
    }
    out
}

fn reference_table(rows: &[SignatureRow]) -> String {
    let mut out = String::new();
    out.push_str("<h4>All Custom Error Signatures:</h4>\n<table>\n<thead>\n<tr>\n");
    out.push_str("<th>Error Definition</th>\n<th>Signature (first 4 bytes)</th>\n");
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in rows {
        let class = if row.matches { " class=\"error-match\"" } else { "" };
        let _ = writeln!(
            out,
            "<tr{class}><td>{}</td><td>{}</td></tr>",
            escape_html(&row.declaration),
            row.selector_hex()
        );
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

fn arg_list(args: &[DecodedArg]) -> String {
    let mut out = String::from("<ul>\n");
    for arg in args {
        let _ = writeln!(
            out,
            "<li><code>{}</code> <em>{}</em>: {}</li>",
            escape_html(&arg.name),
            escape_html(&arg.ty),
            escape_html(&arg.value.to_string())
        );
    }
    out.push_str("</ul>\n");
    out
}

fn failure(err: &DecoderError, include_trace: bool) -> String {
    let mut out = String::new();
    out.push_str("<h3>Error Occurred</h3>\n");
    let _ = writeln!(out, "<p class=\"error-match\">{}</p>", escape_html(&err.to_string()));
    if include_trace {
        let trace = err.trace().join("\n  caused by: ");
        let _ = writeln!(out, "<pre>{}</pre>", escape_html(&trace));
    }
    let _ = writeln!(out, "<p>{CHECK_DEFINITIONS_HINT}</p>");
    out
}
