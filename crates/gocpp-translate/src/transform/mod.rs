//! Construct transformers.
//!
//! Each transformer handles one syntactic form and returns a
//! [`ConstructResult`]: the C++ text for the line plus advice the pipeline
//! records in the [`TranslationContext`](crate::context::TranslationContext).

pub mod assign;
pub mod control;
pub mod decl;
pub mod expr;
pub mod function;
pub mod map_literal;
pub mod print;
pub mod switch;

use crate::context::BlockKind;

/// Whether the pipeline appends `;` to the last emitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// Append unless the line ends in `{`, `,`, `}` or `:`.
    Auto,
    /// Always append (unless already present).
    Always,
    Never,
}

/// Side effects a transformer asks the pipeline to record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advice {
    OpenBlock(BlockKind),
    /// A struct body just opened; its fields are collected from now on.
    StructOpened(String),
    /// A single-line record without fields was declared.
    StructDeclared(String),
    /// An identifier was declared with a map type.
    MapDeclared(String),
    /// A multi-line map literal opened on this line.
    MapLiteralOpened,
}

/// Output of one transformer for one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructResult {
    /// Emitted lines; empty when the input line is consumed without output.
    pub lines: Vec<String>,
    pub terminator: Terminator,
    pub advice: Vec<Advice>,
}

impl ConstructResult {
    fn with_terminator(text: impl Into<String>, terminator: Terminator) -> Self {
        let text = text.into();
        Self {
            lines: text.lines().map(str::to_string).collect(),
            terminator,
            advice: Vec::new(),
        }
    }

    /// A statement that always receives a terminator.
    pub fn statement(text: impl Into<String>) -> Self {
        Self::with_terminator(text, Terminator::Always)
    }

    /// Text that never receives a terminator (block openers, labels).
    pub fn open(text: impl Into<String>) -> Self {
        Self::with_terminator(text, Terminator::Never)
    }

    /// Text terminated according to its last character.
    pub fn auto(text: impl Into<String>) -> Self {
        Self::with_terminator(text, Terminator::Auto)
    }

    /// The line is consumed and produces no output.
    pub fn consumed() -> Self {
        Self {
            lines: Vec::new(),
            terminator: Terminator::Never,
            advice: Vec::new(),
        }
    }

    pub fn with(mut self, advice: Advice) -> Self {
        self.advice.push(advice);
        self
    }

    /// The emitted text with lines joined, for inspection.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}
