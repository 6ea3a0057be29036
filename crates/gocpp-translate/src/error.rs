//! Errors raised while translating a unit.
//!
//! Transformers only know about the fragment they were handed, so they
//! return a [`ConstructError`]. The pipeline attaches the line number and
//! the offending source line, producing a [`TranslateError`].

use std::fmt;

/// What kind of input the translator refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateErrorKind {
    /// Raw string literals spanning several lines.
    UnsupportedLiteralForm,
    /// A var/const/type line that matches no supported shape.
    UnrecognizedDeclaration,
    /// A printf-style call using a catch-all conversion such as `%v`.
    UnsupportedFormatVerb,
    /// A range loop shape the loop transformer does not handle.
    UnimplementedLoopForm,
    /// Syntax outside the supported subset (method receivers, goroutines, ...).
    UnsupportedConstruct,
    /// A closing brace without a matching opening brace, or a unit that ends inside a block.
    UnbalancedBraces,
}

impl fmt::Display for TranslateErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TranslateErrorKind::UnsupportedLiteralForm => "unsupported literal form",
            TranslateErrorKind::UnrecognizedDeclaration => "unrecognized declaration",
            TranslateErrorKind::UnsupportedFormatVerb => "unsupported format verb",
            TranslateErrorKind::UnimplementedLoopForm => "unimplemented loop form",
            TranslateErrorKind::UnsupportedConstruct => "unsupported construct",
            TranslateErrorKind::UnbalancedBraces => "unbalanced braces",
        };
        f.write_str(s)
    }
}

/// Failure of a single construct transformer, not yet tied to a line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ConstructError {
    pub kind: TranslateErrorKind,
    pub message: String,
}

impl ConstructError {
    pub fn new(kind: TranslateErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Attach the 1-based line number and source text.
    pub fn at(self, line: usize, source_line: &str) -> TranslateError {
        TranslateError {
            kind: self.kind,
            message: self.message,
            line,
            source_line: source_line.trim_end().to_string(),
        }
    }
}

/// A translation failure with enough context to report a precise diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}: {message}\n  | {source_line}")]
pub struct TranslateError {
    pub kind: TranslateErrorKind,
    pub message: String,
    /// 1-based line number in the input unit.
    pub line: usize,
    pub source_line: String,
}

/// Result type for construct transformers.
pub type TransformResult<T> = Result<T, ConstructError>;

pub(crate) fn unrecognized(what: impl Into<String>) -> ConstructError {
    ConstructError::new(TranslateErrorKind::UnrecognizedDeclaration, what)
}

pub(crate) fn unsupported(what: impl Into<String>) -> ConstructError {
    ConstructError::new(TranslateErrorKind::UnsupportedConstruct, what)
}
