//! Dispatches document reads and writes to a registered [`Codec`] by
//! path (§4.G), and exposes direct string-based parsing/serialization
//! for callers that already have the text in hand and don't need
//! dispatch.
//!
//! A process-wide default [`Registry`] is built lazily on first use and
//! published behind a [`std::sync::OnceLock`]: concurrent first callers
//! race to build it, but only one build's result is ever observed,
//! per the classic double-checked-initialization pattern (§5).

#![deny(unused)]
#![deny(warnings)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![deny(rustdoc::invalid_rust_codeblocks)]

mod codec;
mod error;
mod registry;

use std::{path::Path, sync::OnceLock};

use kofi_model::Document;
use kofi_parser::ParserOptions;
use kofi_serializer::SerializerOptions;

pub use codec::{Codec, TextCodec};
pub use error::{ReadError, WriteError};
pub use registry::Registry;

static DEFAULT_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The process-wide default registry: a single [`TextCodec`] registered
/// for the `.kofi` extension. Built on first call and reused afterwards.
pub fn default_registry() -> &'static Registry {
    DEFAULT_REGISTRY.get_or_init(|| {
        let mut registry = Registry::new();
        registry.register(std::sync::Arc::new(TextCodec::default()));
        registry
    })
}

/// Read and parse the document at `path` through [`default_registry`].
pub fn read(path: impl AsRef<Path>) -> Result<Document, ReadError> {
    default_registry().read(path.as_ref())
}

/// Serialize `document` and write it to `path` through
/// [`default_registry`].
pub fn write(path: impl AsRef<Path>, document: &Document) -> Result<(), WriteError> {
    default_registry().write(path.as_ref(), document)
}

/// Parse `text` directly, with no path and no dispatch.
pub fn read_str(text: &str, options: &ParserOptions) -> Result<Document, kofi_errors::ParseError> {
    kofi_parser::parse(text, options)
}

/// Serialize `document` directly, with no path and no dispatch.
pub fn write_str(document: &Document, options: &SerializerOptions) -> String {
    kofi_serializer::serialize(document, options)
}
