//! Presentation of decode results: HTML fragments for the browser, plain
//! text for terminals, JSON for tooling.
//!
//! Every renderer takes the full `Result` of a decode, so the single
//! top-level handler for pipeline failures lives here.

mod html;
mod json;
mod text;

pub use html::{render_html, PROCESSING_HTML};
pub use json::render_json;
pub use text::render_text;

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

const INVALID_INPUT_MESSAGE: &str =
    "Error: Please enter a valid error signature starting with 0x (at least 10 characters)";

const NO_CANDIDATES_MESSAGE: &str =
    "Error: No valid custom errors found. Each line should start with \"error \" and end with \");\"";

const CHECK_DEFINITIONS_HINT: &str =
    "Please check your custom error definitions are properly formatted.";

const BUILTIN_NOTE: &str = "Note: This is a built-in EVM error, not a custom contract error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"x" & 'y'</b>"#),
            "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("error Foo(uint256);"), "error Foo(uint256);");
    }
}
