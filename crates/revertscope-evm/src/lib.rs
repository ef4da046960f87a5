//! revertscope-evm — EVM custom error decoder.
//!
//! Decodes raw revert data against Solidity `error` declarations:
//! - Custom errors (Solidity ≥0.8.4) declared by the caller
//! - `Error(string)` from `revert("message")` / `require(cond, "message")`
//! - `Panic(uint256)` from `assert` and compiler-inserted checks
//!
//! # Quick Start
//! ```rust,no_run
//! use revertscope_core::{render::render_text, DecoderConfig, ErrorDecoder};
//! use revertscope_evm::EvmErrorDecoder;
//!
//! let decoder = EvmErrorDecoder::new();
//! let result = decoder.decode(
//!     "0x82b42900",
//!     &"error Unauthorized();",
//! );
//! println!("{}", render_text(&result, &DecoderConfig::default()));
//! ```

pub mod abi;
pub mod custom;
pub mod declaration;
pub mod decoder;
pub mod selector;
pub mod standard;

pub use abi::JsonAbiSource;
pub use custom::DecodeMismatch;
pub use decoder::EvmErrorDecoder;
pub use selector::{keccak_selector, selector_of_declaration};
pub use standard::STANDARD_ERRORS;
