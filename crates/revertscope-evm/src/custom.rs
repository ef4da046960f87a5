//! Decode Solidity 0.8.4+ custom errors against user declarations.
//!
//! Custom errors are ABI-encoded as:
//! `selector(4 bytes)` ++ `ABI-encoded arguments`
//!
//! Where `selector = keccak256("ErrorName(type1,type2,...)")[:4]`

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use revertscope_core::registry::{ErrorSignature, ErrorSignatureRegistry};
use revertscope_core::types::{selector_hex, CustomErrorMatch, DecodedArg, ErrorFieldValue, Selector};
use thiserror::Error;
use tracing::warn;

/// Why data did not decode against a declaration set.
///
/// This is an expected outcome; the pipeline turns it into a fallback
/// classification rather than a failure.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeMismatch {
    #[error("data is {len} bytes, too short for a selector")]
    TooShort { len: usize },

    #[error("no declaration has selector {selector}")]
    UnknownSelector { selector: String },

    #[error("arguments do not decode as {signature}: {reason}")]
    ArgumentsMismatch { signature: String, reason: String },
}

/// The leading 4 bytes of `data`, if there are that many.
pub fn leading_selector(data: &[u8]) -> Option<Selector> {
    data.get(..4)?.try_into().ok()
}

/// Try to decode custom error data against a registry.
///
/// Every declaration sharing the data's selector is tried in registration
/// order (collisions, duplicates); the first clean decode wins.
pub fn decode_custom_error(
    data: &[u8],
    registry: &dyn ErrorSignatureRegistry,
) -> Result<CustomErrorMatch, DecodeMismatch> {
    let selector = leading_selector(data).ok_or(DecodeMismatch::TooShort { len: data.len() })?;
    let sigs = registry.get_by_selector(selector);
    let payload = &data[4..];

    let mut last_mismatch = DecodeMismatch::UnknownSelector {
        selector: selector_hex(&selector),
    };
    for sig in sigs {
        match decode_with_signature(sig, payload) {
            Ok(args) => {
                return Ok(CustomErrorMatch {
                    name: sig.name.clone(),
                    signature: sig.signature.clone(),
                    selector,
                    args,
                })
            }
            Err(mismatch) => last_mismatch = mismatch,
        }
    }
    Err(last_mismatch)
}

/// ABI-decode `payload` (data after the selector) as `sig`'s parameter tuple.
pub fn decode_with_signature(
    sig: &ErrorSignature,
    payload: &[u8],
) -> Result<Vec<DecodedArg>, DecodeMismatch> {
    let mismatch = |reason: String| DecodeMismatch::ArgumentsMismatch {
        signature: sig.signature.clone(),
        reason,
    };

    if sig.inputs.is_empty() {
        return Ok(vec![]);
    }

    let types = sig
        .inputs
        .iter()
        .map(|p| p.ty.parse::<DynSolType>().map_err(|e| mismatch(e.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    let decoded = DynSolType::Tuple(types)
        .abi_decode_params(payload)
        .map_err(|e| mismatch(e.to_string()))?;

    let values = match decoded {
        DynSolValue::Tuple(vals) => vals,
        single => vec![single],
    };

    Ok(sig
        .inputs
        .iter()
        .zip(values.iter())
        .enumerate()
        .map(|(i, (param, val))| DecodedArg {
            name: param.display_name(i),
            ty: param.ty.clone(),
            value: dyn_sol_to_field_value(val),
        })
        .collect())
}

/// Convert an alloy dynamic value into the report's value type.
pub fn dyn_sol_to_field_value(val: &DynSolValue) -> ErrorFieldValue {
    match val {
        DynSolValue::Uint(v, _) => match u128::try_from(*v) {
            Ok(small) => ErrorFieldValue::Uint(small),
            Err(_) => ErrorFieldValue::BigUint(v.to_string()),
        },
        DynSolValue::Int(v, _) => match i128::try_from(*v) {
            Ok(small) => ErrorFieldValue::Int(small),
            Err(_) => ErrorFieldValue::BigInt(v.to_string()),
        },
        DynSolValue::Bool(b) => ErrorFieldValue::Bool(*b),
        DynSolValue::Address(a) => ErrorFieldValue::Address(a.to_checksum(None)),
        DynSolValue::String(s) => ErrorFieldValue::Str(s.clone()),
        DynSolValue::Bytes(b) => ErrorFieldValue::Bytes(b.clone()),
        DynSolValue::FixedBytes(fb, size) => ErrorFieldValue::Bytes(fb[..*size].to_vec()),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            ErrorFieldValue::Array(items.iter().map(dyn_sol_to_field_value).collect())
        }
        DynSolValue::Tuple(items) => {
            ErrorFieldValue::Tuple(items.iter().map(dyn_sol_to_field_value).collect())
        }
        DynSolValue::Function(f) => ErrorFieldValue::Bytes(f.to_vec()),
        #[allow(unreachable_patterns)]
        other => {
            warn!(value = ?other, "unsupported ABI value kind, rendered as empty bytes");
            ErrorFieldValue::Bytes(vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{build_registry, filter_candidates};
    use alloy_primitives::{Address, I256, U256};
    use revertscope_core::registry::MemoryErrorRegistry;
    use revertscope_core::source::split_lines;
    use revertscope_core::Strictness;

    fn registry(text: &str) -> MemoryErrorRegistry {
        let filtered = filter_candidates(split_lines(text), Strictness::Strict);
        build_registry(&filtered.candidates).unwrap()
    }

    fn encode(selector: Selector, args: Vec<DynSolValue>) -> Vec<u8> {
        let mut data = selector.to_vec();
        data.extend(DynSolValue::Tuple(args).abi_encode_params());
        data
    }

    fn uint(v: u64) -> DynSolValue {
        DynSolValue::Uint(U256::from(v), 256)
    }

    #[test]
    fn decode_two_uints_in_order() {
        let reg = registry("error InsufficientBalance(uint256 available, uint256 required);");
        let data = encode([0xcf, 0x47, 0x91, 0x81], vec![uint(100), uint(250)]);

        let m = decode_custom_error(&data, &reg).unwrap();
        assert_eq!(m.name, "InsufficientBalance");
        assert_eq!(m.args.len(), 2);
        assert_eq!(m.args[0].name, "available");
        assert_eq!(m.args[0].value, ErrorFieldValue::Uint(100));
        assert_eq!(m.args[1].value, ErrorFieldValue::Uint(250));
    }

    #[test]
    fn decode_dynamic_and_address_args() {
        let reg = registry("error InvalidOrder(bytes32 id, string reason, address maker);");
        let sel = reg.signatures()[0].selector;
        let maker = Address::from([0x11u8; 20]);
        let data = encode(
            sel,
            vec![
                DynSolValue::FixedBytes([0xab; 32].into(), 32),
                DynSolValue::String("expired".into()),
                DynSolValue::Address(maker),
            ],
        );

        let m = decode_custom_error(&data, &reg).unwrap();
        assert_eq!(m.args[0].value, ErrorFieldValue::Bytes(vec![0xab; 32]));
        assert_eq!(m.args[1].value, ErrorFieldValue::Str("expired".into()));
        assert_eq!(
            m.args[2].value,
            ErrorFieldValue::Address(format!("0x{}", "11".repeat(20)))
        );
    }

    #[test]
    fn decode_negative_and_huge_ints() {
        let reg = registry("error Out(int256 delta, uint256 big);");
        let sel = reg.signatures()[0].selector;
        let data = encode(
            sel,
            vec![
                DynSolValue::Int(I256::try_from(-5i64).unwrap(), 256),
                DynSolValue::Uint(U256::MAX, 256),
            ],
        );
        let m = decode_custom_error(&data, &reg).unwrap();
        assert_eq!(m.args[0].value, ErrorFieldValue::Int(-5));
        assert_eq!(m.args[1].value, ErrorFieldValue::BigUint(U256::MAX.to_string()));
    }

    #[test]
    fn decode_custom_error_no_args() {
        let reg = registry("error Unauthorized();");
        let m = decode_custom_error(&[0x82, 0xb4, 0x29, 0x00], &reg).unwrap();
        assert_eq!(m.name, "Unauthorized");
        assert!(m.args.is_empty());
    }

    #[test]
    fn unnamed_params_are_positional() {
        let reg = registry("error Pair(uint256, bool);");
        let sel = reg.signatures()[0].selector;
        let data = encode(sel, vec![uint(1), DynSolValue::Bool(true)]);
        let m = decode_custom_error(&data, &reg).unwrap();
        assert_eq!(m.args[0].name, "arg0");
        assert_eq!(m.args[1].name, "arg1");
        assert_eq!(m.args[1].value, ErrorFieldValue::Bool(true));
    }

    #[test]
    fn unknown_selector_is_mismatch() {
        let reg = registry("error Unauthorized();");
        let err = decode_custom_error(&[0xde, 0xad, 0xbe, 0xef, 0x00], &reg).unwrap_err();
        assert_eq!(
            err,
            DecodeMismatch::UnknownSelector { selector: "0xdeadbeef".into() }
        );
    }

    #[test]
    fn truncated_arguments_are_mismatch() {
        let reg = registry("error InsufficientBalance(uint256 available, uint256 required);");
        let mut data = vec![0xcf, 0x47, 0x91, 0x81];
        data.extend_from_slice(&[0u8; 32]);
        let err = decode_custom_error(&data, &reg).unwrap_err();
        assert!(matches!(err, DecodeMismatch::ArgumentsMismatch { .. }), "got {err:?}");
    }

    #[test]
    fn too_short_data() {
        let reg = MemoryErrorRegistry::new();
        assert_eq!(
            decode_custom_error(&[0x01, 0x02], &reg).unwrap_err(),
            DecodeMismatch::TooShort { len: 2 }
        );
    }
}
