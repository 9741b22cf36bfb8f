//! `kofi-model` holds the in-memory document model: [`Document`], the
//! per-line [`Element`] sum type, the nine-kind [`Value`] sum type, and
//! the [`Array`]/[`Object`] typed value containers.
//!
//! This crate is pure data: it has no notion of text, scanning, or
//! serialization. `kofi-scanner` produces [`Value`]s, `kofi-parser`
//! assembles [`Document`]s, and `kofi-serializer` turns both back into
//! text.

#![deny(unused)]
#![deny(warnings)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![deny(rustdoc::invalid_rust_codeblocks)]

mod array;
mod document;
mod element;
mod object;
mod value;

pub use array::Array;
pub use document::Document;
pub use element::{Element, Property};
pub use object::Object;
pub use value::{Value, ValueKind};
