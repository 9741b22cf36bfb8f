//! `kofi-serializer` turns a [`kofi_model::Document`] (or a standalone
//! [`kofi_model::Value`]/[`kofi_model::Element`]) back into its canonical
//! textual form (§4.E/§4.F).
//!
//! Serialization never fails: every in-memory value already satisfies
//! the model's own invariants, so there is nothing left to reject.
//! Parsing `serialize(d, _)` is expected to reproduce a document
//! structurally equal to `d`, up to whitespace-element re-spacing (see
//! [`kofi_model::Document`]).

#![deny(unused)]
#![deny(warnings)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![deny(rustdoc::invalid_rust_codeblocks)]

mod element;
mod options;
mod value;

use kofi_model::{Document, Element, Value};
use log::trace;

pub use options::{LineEnding, SerializerOptions};

/// Render `value` in its canonical textual form.
pub fn serialize_value(value: &Value) -> String {
    value::serialize_value(value)
}

/// Render one element as its own line's text (no line ending attached).
pub fn serialize_element(element: &Element) -> String {
    element::serialize_element(element)
}

/// Render a whole document: every element on its own line, joined by
/// `options`'s line ending, with no trailing line ending after the last
/// element.
pub fn serialize(document: &Document, options: &SerializerOptions) -> String {
    let lines: Vec<String> = document.iter().map(element::serialize_element).collect();
    trace!("serializing {} element(s)", lines.len());

    lines.join(options.separator())
}

#[cfg(test)]
mod tests {
    use kofi_model::{Property, Value};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn elements_join_with_a_single_lf_and_no_trailing_one() {
        let mut document = Document::new();
        document.add_element(None, Element::Comment(" hi".to_string()));
        document.add_element(None, Element::Property(Property::new("key", Value::Int32(42))));

        assert_eq!(serialize(&document, &SerializerOptions::default()), "; hi\nkey=42");

        let explicit = SerializerOptions::default().line_ending(LineEnding::Lf);
        assert_eq!(serialize(&document, &explicit), "; hi\nkey=42");
    }

    #[test]
    fn empty_document_serializes_to_an_empty_string() {
        assert_eq!(serialize(&Document::new(), &SerializerOptions::default()), "");
    }

    #[test]
    fn round_trips_through_the_parser() {
        let text = "[s]\na = 1\n; note\nb = \"x\"\n";
        let parsed = kofi_parser::parse(text, &kofi_parser::ParserOptions::default()).unwrap();

        let rendered = serialize(&parsed, &SerializerOptions::default());
        let reparsed = kofi_parser::parse(&rendered, &kofi_parser::ParserOptions::default()).unwrap();

        assert_eq!(parsed, reparsed);
    }
}
