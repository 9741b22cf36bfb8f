//! `kofi-parser` turns a complete document's text into a
//! [`kofi_model::Document`], line by line, and exposes the
//! [`ParserOptions`] ambient configuration knobs.
//!
//! Each line is classified independently by [`parse_element`], which
//! consults no shared state; [`parse`] drives the line-by-line loop
//! sequentially and calls [`fold_elements`] to assemble the results into
//! a `Document`, handling the document-model-level "reopening a section
//! merges into it" rule along the way. A caller that wants to parse
//! lines out of line-order (e.g. across threads) can call
//! [`split_lines`] and [`parse_element`] directly and fold the results
//! itself with [`fold_elements`], as `kofi-scheduler` does.

#![deny(unused)]
#![deny(warnings)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![deny(rustdoc::invalid_rust_codeblocks)]

mod document;
mod line;
mod options;

pub use document::{check_trailing_newline, fold_elements, parse, split_lines};
pub use line::parse_element;
pub use options::ParserOptions;
