//! `kofi` is the single crate most consumers depend on: the document
//! model, parser, serializer, codec dispatch, and optional concurrent
//! parsing, all re-exported from their own crates.
//!
//! ```
//! # fn main() -> Result<(), kofi::ParseError> {
//! let document = kofi::parse("greeting = \"hello\"\n", &kofi::ParserOptions::default())?;
//! assert_eq!(document.get_value(None, "greeting"), Some(&kofi::Value::Str("hello".to_string())));
//! # Ok(())
//! # }
//! ```

#![deny(unused)]
#![deny(warnings)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![deny(rustdoc::invalid_rust_codeblocks)]

pub use kofi_model::{Array, Document, Element, Object, Property, Value, ValueKind};

pub use kofi_errors::{DispatchError, IoError, ParseError, ParseErrorKind, Report};

pub use kofi_parser::{parse, ParserOptions};

pub use kofi_serializer::{serialize, serialize_element, serialize_value, LineEnding, SerializerOptions};

pub use kofi_codec::{
    default_registry, read, read_str, write, write_str, Codec, ReadError, Registry, TextCodec, WriteError,
};

pub use kofi_scheduler::parse_concurrently;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn reexports_cover_the_common_round_trip() {
        let document = parse("a = 1\n", &ParserOptions::default()).unwrap();
        let rendered = serialize(&document, &SerializerOptions::default());

        assert_eq!(rendered, "a=1");
        assert_eq!(document.get_value(None, "a"), Some(&Value::Int32(1)));
    }

    #[test]
    fn concurrent_parsing_is_reexported() {
        let document = parse_concurrently(
            "a = 1\nb = 2\n",
            &ParserOptions::default(),
            std::num::NonZeroUsize::new(2).unwrap(),
        )
        .unwrap();

        assert_eq!(document.get_value(None, "a"), Some(&Value::Int32(1)));
        assert_eq!(document.get_value(None, "b"), Some(&Value::Int32(2)));
    }
}
