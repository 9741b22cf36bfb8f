//! `kofi-errors` provides the error types shared by the `kofi` codec
//! crates: parse failures (with line/column diagnostics), I/O failures,
//! and codec dispatch failures.
//!
//! Parse failures are plain data (`ParseError`): a 1-based `line`, a
//! 1-based `column`, and a `ParseErrorKind`. A parser never attempts
//! local recovery — the first error aborts the document (see
//! [`ParseError`]). [`Report`] is a thin wrapper that turns a
//! `ParseError` plus the original source text into a `miette::Diagnostic`
//! with a labelled span, for callers that want `rustc`-style rendering;
//! it carries no extra information beyond what `ParseError` already has.

#![deny(unused)]
#![deny(warnings)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![deny(rustdoc::invalid_rust_codeblocks)]

use std::{io, path::PathBuf};

use miette::SourceSpan;
use thiserror::Error;

/// The kind of a parse failure, one member per grammar rule that can be
/// violated. Messages are deliberately terse; `column` already pins down
/// the offending position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A line is neither whitespace, a comment, a section header, nor a
    /// property (no unescaped `=` was found).
    #[error("invalid element")]
    InvalidElement,

    /// The first non-whitespace character of a value region does not
    /// start any recognized value shape.
    #[error("invalid value")]
    InvalidValue,

    /// A `'...'` character literal is not one of the three legal shapes.
    #[error("invalid char")]
    InvalidChar,

    /// A `\uXXXX` escape did not contain four hex digits.
    #[error("invalid codepoint")]
    InvalidCodepoint,

    /// A numeric literal's digits could not be converted by the host
    /// numeric parser (e.g. overflow).
    #[error("invalid number")]
    InvalidNumber,

    /// `true`/`false` keyword matched case-insensitively but the
    /// remainder of the token diverged.
    #[error("invalid boolean")]
    InvalidBoolean,

    /// A `"..."` string value has no matching unescaped closing quote.
    #[error("unterminated string")]
    UnterminatedString,

    /// A `[...]` array has no matching closing `]`.
    #[error("unterminated array")]
    UnterminatedArray,

    /// A `{...}` object has no matching closing `}`.
    #[error("unterminated object")]
    UnterminatedObject,

    /// A `[...` section header line is missing its closing `]`.
    #[error("section closing bracket ']' expected")]
    SectionClosingBracketExpected,

    /// A property's `=` is present but no value follows.
    #[error("property value expected")]
    PropertyValueExpected,

    /// A property's value didn't consume the rest of the line.
    #[error("property value has trailing characters")]
    PropertyValueHasTrailingCharacters,

    /// A `,` inside an array is not followed by a value.
    #[error("array value expected")]
    ArrayValueExpected,

    /// Two values inside an array are not separated by `,`.
    #[error("array value separator ',' expected")]
    ArraySeparatorExpected,

    /// An object entry's `:` is present but no value follows.
    #[error("object entry value expected")]
    ObjectEntryValueExpected,

    /// Two entries inside an object are not separated by `,`.
    #[error("object entry separator ',' expected")]
    ObjectEntrySeparatorExpected,

    /// An object entry name is not followed by `:`.
    #[error("object name-value separator ':' expected")]
    ObjectNameValueSeparatorExpected,

    /// Nested array/object scanning exceeded the configured recursion
    /// bound (`ParserOptions::max_nesting_depth`), not a rule from the
    /// grammar itself.
    #[error("maximum nesting depth exceeded")]
    MaxNestingDepthExceeded,

    /// Non-empty input did not end in `\n`, while
    /// `ParserOptions::strict_trailing_newline` requires it to.
    #[error("input does not end with a trailing newline")]
    MissingTrailingNewline,
}

/// A parse failure at a precise source position.
///
/// `line` and `column` are both 1-based. `column` is a character index
/// within `line`, not a byte offset, and points at the nearest
/// meaningful position (e.g. the delimiter that was expected).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {kind}")]
pub struct ParseError {
    line: u32,
    column: u32,
    kind: ParseErrorKind,
}

impl ParseError {
    /// Build a new `ParseError` at the given 1-based `line`/`column`.
    pub fn new(line: u32, column: u32, kind: ParseErrorKind) -> Self {
        Self { line, column, kind }
    }

    /// The 1-based line on which the error occurred.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The 1-based column at which the error occurred.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// The kind of failure.
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// Attach the original source text, producing a [`Report`] that
    /// renders with `miette`'s labelled-span diagnostics.
    pub fn with_source(self, source_code: impl Into<String>) -> Report {
        let source_code = source_code.into();
        let span = byte_span_for(&source_code, self.line, self.column);

        Report { error: self, source_code, span }
    }
}

/// Find the byte offset of `(line, column)` within `text`, both 1-based,
/// and return a zero-length `SourceSpan` there. Falls back to the end of
/// the text if the position is out of range (should not happen for
/// errors produced by this crate's own parser).
fn byte_span_for(text: &str, line: u32, column: u32) -> SourceSpan {
    let mut offset = 0usize;

    for (index, line_text) in text.split('\n').enumerate() {
        if index as u32 + 1 == line {
            let column_offset =
                line_text.char_indices().nth((column.saturating_sub(1)) as usize).map(|(byte_index, _)| byte_index).unwrap_or(line_text.len());

            return (offset + column_offset, 0).into();
        }

        offset += line_text.len() + 1;
    }

    (text.len(), 0).into()
}

/// A [`ParseError`] paired with the source text it came from, for
/// `miette`-flavoured rendering.
#[derive(Debug, Error, miette::Diagnostic)]
#[error("{error}")]
pub struct Report {
    #[source]
    error: ParseError,

    #[source_code]
    source_code: String,

    #[label("here")]
    span: SourceSpan,
}

impl Report {
    /// The underlying structured error.
    pub fn error(&self) -> &ParseError {
        &self.error
    }
}

/// I/O failure reading or writing a document, distinct from a parse
/// failure (see §7: I/O failures carry the underlying cause, not a
/// line/column).
#[derive(Debug, Error)]
#[error("I/O error on `{path}`: {source}", path = path.display())]
pub struct IoError {
    /// The path that was being read or written.
    pub path: PathBuf,
    /// The underlying I/O failure.
    #[source]
    pub source: io::Error,
}

/// Failure to find a codec able to handle a given path (§4.G / §7:
/// "service unavailable").
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No registered codec claimed this path.
    #[error("no codec is registered for `{}`", .0.display())]
    NoCodecFor(PathBuf),
}
