//! Selector derivation: `keccak256(signature)[..4]`.

use revertscope_core::{DecoderError, Selector, SourceLine};
use tiny_keccak::{Hasher, Keccak};

use crate::declaration::parse_declaration;

/// First four bytes of `keccak256(signature)`.
///
/// `signature` must already be canonical (`Name(type1,type2)`, no spaces,
/// no parameter names).
pub fn keccak_selector(signature: &str) -> Selector {
    let mut k = Keccak::v256();
    k.update(signature.as_bytes());
    let mut out = [0u8; 32];
    k.finalize(&mut out);
    [out[0], out[1], out[2], out[3]]
}

/// Parse a single declaration (`error Foo(uint256 a);`) and return its
/// canonical signature and selector.
pub fn selector_of_declaration(declaration: &str) -> Result<(String, Selector), DecoderError> {
    let sig = parse_declaration(&SourceLine::new(1, declaration))?;
    Ok((sig.signature, sig.selector))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_selectors() {
        assert_eq!(keccak_selector("Error(string)"), [0x08, 0xc3, 0x79, 0xa0]);
        assert_eq!(keccak_selector("Panic(uint256)"), [0x4e, 0x48, 0x7b, 0x71]);
    }

    #[test]
    fn declaration_selector_ignores_names_and_spacing() {
        let (sig, sel) =
            selector_of_declaration("error InsufficientBalance(uint256 available, uint256 required);")
                .unwrap();
        assert_eq!(sig, "InsufficientBalance(uint256,uint256)");
        assert_eq!(hex::encode(sel), "cf479181");
    }

    #[test]
    fn selector_is_deterministic() {
        let decl = "error TransferFailed(address from, address to, uint256 amount);";
        let a = selector_of_declaration(decl).unwrap();
        let b = selector_of_declaration(decl).unwrap();
        assert_eq!(a, b);
        assert_eq!(hex::encode(a.1), "bf182be8");
    }

    #[test]
    fn malformed_declaration_is_rejected() {
        let err = selector_of_declaration("error Broken(uint256").unwrap_err();
        assert!(matches!(err, DecoderError::MalformedDeclaration { line: 1, .. }), "got {err:?}");
    }
}
