//! The standard error table: `Error(string)` and `Panic(uint256)`.
//!
//! `Error(string)` is what `require(cond, "message")` and `revert("message")`
//! produce. `Panic(uint256)` is emitted by compiler-inserted checks
//! (Solidity 0.8.0+). Panic code list:
//! <https://docs.soliditylang.org/en/latest/control-structures.html#panic-via-assert-and-error-via-require>

use revertscope_core::{
    DecoderError, ErrorFieldValue, MemoryErrorRegistry, Selector, SourceLine, StandardErrorMatch,
};

use crate::custom::decode_custom_error;
use crate::declaration::parse_declaration;

/// One entry of the standard error table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardError {
    pub selector: Selector,
    /// Canonical signature, e.g. `Error(string)`.
    pub signature: &'static str,
    pub description: &'static str,
}

/// The 4-byte selector for `Error(string)`.
pub const ERROR_STRING_SELECTOR: Selector = [0x08, 0xc3, 0x79, 0xa0];

/// The 4-byte selector for `Panic(uint256)`.
pub const PANIC_SELECTOR: Selector = [0x4e, 0x48, 0x7b, 0x71];

/// Built-in error shapes defined by the EVM toolchain itself.
pub static STANDARD_ERRORS: [StandardError; 2] = [
    StandardError {
        selector: ERROR_STRING_SELECTOR,
        signature: "Error(string)",
        description: "Standard revert with message string",
    },
    StandardError {
        selector: PANIC_SELECTOR,
        signature: "Panic(uint256)",
        description: "Assertion failure or arithmetic overflow",
    },
];

/// Look up a selector in the standard error table.
pub fn lookup(selector: Selector) -> Option<&'static StandardError> {
    STANDARD_ERRORS.iter().find(|e| e.selector == selector)
}

impl StandardError {
    /// Decode `data` (selector included) against this one fixed shape.
    pub fn decode(&self, data: &[u8]) -> Result<StandardErrorMatch, DecoderError> {
        let declaration = format!("error {};", self.signature);
        let sig = parse_declaration(&SourceLine::new(0, declaration))?;
        let registry: MemoryErrorRegistry = std::iter::once(sig).collect();

        let decoded =
            decode_custom_error(data, &registry).map_err(|e| DecoderError::StandardPayload {
                signature: self.signature.to_string(),
                source: Box::new(e),
            })?;

        let (panic_meaning, suggestion) = match (self.selector, decoded.args.first()) {
            (PANIC_SELECTOR, Some(arg)) => {
                let meaning = match &arg.value {
                    ErrorFieldValue::Uint(code) => u64::try_from(*code).map_or("unknown panic code", panic_meaning),
                    _ => "unknown panic code",
                };
                let hint = format!(
                    "Solidity assert violation (panic code {}): {meaning}.",
                    panic_code_hex(&arg.value)
                );
                (Some(meaning.to_string()), Some(hint))
            }
            (_, Some(arg)) => match &arg.value {
                ErrorFieldValue::Str(message) => (None, generate_revert_suggestion(message)),
                _ => (None, None),
            },
            _ => (None, None),
        };

        Ok(StandardErrorMatch {
            name: decoded.name,
            signature: decoded.signature,
            selector: self.selector,
            description: self.description.to_string(),
            args: decoded.args,
            panic_meaning,
            suggestion,
        })
    }
}

fn panic_code_hex(value: &ErrorFieldValue) -> String {
    match value {
        ErrorFieldValue::Uint(code) => format!("0x{code:02x}"),
        other => other.to_string(),
    }
}

/// Map a Solidity panic code to a human-readable description.
pub fn panic_meaning(code: u64) -> &'static str {
    match code {
        0x00 => "generic compiler-inserted panic",
        0x01 => "assert() called with false condition",
        0x11 => "arithmetic overflow or underflow",
        0x12 => "division or modulo by zero",
        0x21 => "invalid enum value",
        0x22 => "corrupted storage byte array",
        0x31 => ".pop() on empty array",
        0x32 => "out-of-bounds array access",
        0x41 => "too much memory allocated (out of memory)",
        0x51 => "called zero-initialized internal function pointer",
        _ => "unknown panic code",
    }
}

/// Generate a hint based on common revert message patterns.
fn generate_revert_suggestion(message: &str) -> Option<String> {
    let msg_lower = message.to_lowercase();
    if msg_lower.contains("not the owner") || msg_lower.contains("not owner") {
        Some("Ensure the caller is the contract owner.".into())
    } else if msg_lower.contains("insufficient") && msg_lower.contains("balance") {
        Some("The account balance is too low. Check the token balance before calling.".into())
    } else if msg_lower.contains("allowance") {
        Some("Increase the token allowance with approve() before calling transferFrom().".into())
    } else if msg_lower.contains("paused") {
        Some("The contract is paused. Wait for it to be unpaused.".into())
    } else {
        None
    }
}
