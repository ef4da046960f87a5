//! revertscope-core — foundation types and traits for the revertscope
//! custom-error decoder.
//!
//! This crate defines:
//! - [`DecodeOutcome`] / [`DecodeReport`] — what a decode produces
//! - [`ErrorDecoder`] — the decoder trait every chain implements
//! - [`DeclarationSource`] — where `error` declarations come from
//! - [`ErrorSignatureRegistry`] — selector lookup over parsed declarations
//! - [`DecoderConfig`] — strictness and presentation switches
//! - [`render`] — HTML, text and JSON presentation of a decode result

pub mod config;
pub mod decoder;
pub mod registry;
pub mod render;
pub mod source;
pub mod types;

pub use config::{DecoderConfig, Strictness};
pub use decoder::{DecoderError, ErrorDecoder};
pub use registry::{ErrorParam, ErrorSignature, ErrorSignatureRegistry, MemoryErrorRegistry};
pub use source::{ChainedSource, DeclarationSource, FileSource, SourceLine};
pub use types::{
    selector_hex, CustomErrorMatch, DecodeOutcome, DecodeReport, DecodedArg, ErrorFieldValue,
    Selector, SignatureRow, StandardErrorMatch,
};
