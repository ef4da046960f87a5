//! Error signature registry — maps 4-byte selectors to the declarations the
//! user supplied.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{selector_hex, Selector, SignatureRow};

/// A parsed error declaration and its derived selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSignature {
    /// Error name (e.g. `"InsufficientBalance"`).
    pub name: String,
    /// Canonical signature string (e.g. `"InsufficientBalance(uint256,uint256)"`).
    pub signature: String,
    /// 4-byte selector (keccak256 of signature, first 4 bytes).
    pub selector: Selector,
    /// Parameters in declaration order.
    pub inputs: Vec<ErrorParam>,
    /// The declaration text as written (trimmed).
    pub declaration: String,
    /// Line the declaration came from (1-based, 0 for built-ins).
    pub line: usize,
}

impl ErrorSignature {
    pub fn selector_hex(&self) -> String {
        selector_hex(&self.selector)
    }

    /// Reference-table row for this signature, flagged when it matches `target`.
    pub fn row(&self, target: Option<Selector>) -> SignatureRow {
        SignatureRow {
            declaration: self.declaration.clone(),
            signature: self.signature.clone(),
            selector: self.selector,
            matches: target == Some(self.selector),
        }
    }
}

/// A single parameter in an error signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorParam {
    /// Parameter name (may be empty for unnamed params).
    pub name: String,
    /// Canonical Solidity type string (e.g. `"address"`, `"(uint256,bool)[]"`).
    pub ty: String,
}

impl ErrorParam {
    /// The name to show for this parameter: its own, or `arg{index}`.
    pub fn display_name(&self, index: usize) -> String {
        if self.name.is_empty() {
            format!("arg{index}")
        } else {
            self.name.clone()
        }
    }
}

/// Trait for looking up error signatures by 4-byte selector.
pub trait ErrorSignatureRegistry: Send + Sync {
    /// Look up all signatures matching a 4-byte selector, in registration order.
    /// Returns multiple signatures when there are collisions or duplicates.
    fn get_by_selector(&self, selector: Selector) -> Vec<&ErrorSignature>;

    /// Every registered signature, in registration order.
    fn signatures(&self) -> &[ErrorSignature];

    /// Total number of registered signatures.
    fn len(&self) -> usize {
        self.signatures().len()
    }

    /// Returns `true` if the registry is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The full reference table, flagging rows whose selector equals `target`.
    fn reference_rows(&self, target: Option<Selector>) -> Vec<SignatureRow> {
        self.signatures().iter().map(|sig| sig.row(target)).collect()
    }
}

// ─── In-memory registry ───────────────────────────────────────────────────────

/// An ordered in-memory registry with a selector index.
///
/// Built once per decode and then only read.
#[derive(Debug, Default, Clone)]
pub struct MemoryErrorRegistry {
    signatures: Vec<ErrorSignature>,
    /// selector → indices into `signatures` (handles collisions)
    by_selector: HashMap<Selector, Vec<usize>>,
}

impl MemoryErrorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a signature. Duplicates are kept.
    pub fn register(&mut self, sig: ErrorSignature) {
        self.by_selector
            .entry(sig.selector)
            .or_default()
            .push(self.signatures.len());
        self.signatures.push(sig);
    }
}

impl FromIterator<ErrorSignature> for MemoryErrorRegistry {
    fn from_iter<I: IntoIterator<Item = ErrorSignature>>(iter: I) -> Self {
        let mut reg = Self::new();
        for sig in iter {
            reg.register(sig);
        }
        reg
    }
}

impl ErrorSignatureRegistry for MemoryErrorRegistry {
    fn get_by_selector(&self, selector: Selector) -> Vec<&ErrorSignature> {
        self.by_selector
            .get(&selector)
            .map(|idx| idx.iter().map(|&i| &self.signatures[i]).collect())
            .unwrap_or_default()
    }

    fn signatures(&self) -> &[ErrorSignature] {
        &self.signatures
    }
}
