//! Declaration sources — where the user's `error` declarations come from.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::decoder::DecoderError;

/// One line of declaration input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLine {
    /// 1-based line number within the source.
    pub number: usize,
    /// The line with surrounding whitespace trimmed.
    pub text: String,
}

impl SourceLine {
    pub fn new(number: usize, text: impl AsRef<str>) -> Self {
        Self {
            number,
            text: text.as_ref().trim().to_string(),
        }
    }
}

/// Split newline-separated text into trimmed, numbered lines.
pub fn split_lines(text: &str) -> Vec<SourceLine> {
    text.lines()
        .enumerate()
        .map(|(i, line)| SourceLine::new(i + 1, line))
        .collect()
}

/// Anything that can yield declaration lines.
///
/// The pipeline filters and parses whatever lines a source returns; sources
/// only deal with acquisition (reading a file, flattening an ABI, …).
pub trait DeclarationSource {
    fn declaration_lines(&self) -> Result<Vec<SourceLine>, DecoderError>;
}

impl<T: DeclarationSource + ?Sized> DeclarationSource for &T {
    fn declaration_lines(&self) -> Result<Vec<SourceLine>, DecoderError> {
        (**self).declaration_lines()
    }
}

impl DeclarationSource for str {
    fn declaration_lines(&self) -> Result<Vec<SourceLine>, DecoderError> {
        Ok(split_lines(self))
    }
}

impl DeclarationSource for String {
    fn declaration_lines(&self) -> Result<Vec<SourceLine>, DecoderError> {
        Ok(split_lines(self))
    }
}

impl<S: AsRef<str>> DeclarationSource for [S] {
    fn declaration_lines(&self) -> Result<Vec<SourceLine>, DecoderError> {
        Ok(self
            .iter()
            .enumerate()
            .map(|(i, line)| SourceLine::new(i + 1, line))
            .collect())
    }
}

impl<S: AsRef<str>> DeclarationSource for Vec<S> {
    fn declaration_lines(&self) -> Result<Vec<SourceLine>, DecoderError> {
        self.as_slice().declaration_lines()
    }
}

/// Declarations read from a file on disk, one per line.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DeclarationSource for FileSource {
    fn declaration_lines(&self) -> Result<Vec<SourceLine>, DecoderError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| DecoderError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(split_lines(&text))
    }
}

/// Several sources read back to back. Line numbers keep counting across
/// sources so diagnostics stay unambiguous.
#[derive(Default)]
pub struct ChainedSource<'a> {
    sources: Vec<&'a dyn DeclarationSource>,
}

impl<'a> ChainedSource<'a> {
    pub fn new() -> Self {
        Self { sources: Vec::new() }
    }

    pub fn push(&mut self, source: &'a dyn DeclarationSource) {
        self.sources.push(source);
    }
}

impl DeclarationSource for ChainedSource<'_> {
    fn declaration_lines(&self) -> Result<Vec<SourceLine>, DecoderError> {
        let mut out = Vec::new();
        for source in &self.sources {
            let offset = out.len();
            out.extend(source.declaration_lines()?.into_iter().map(|mut line| {
                line.number += offset;
                line
            }));
        }
        Ok(out)
    }
}
