use std::{fs, path::Path};

use kofi_errors::{IoError, ParseError};
use kofi_model::Document;
use kofi_parser::ParserOptions;
use kofi_serializer::SerializerOptions;

use crate::error::{ReadError, WriteError};

/// Something that can read and write documents for a family of paths
/// (§4.G).
///
/// `can_read`/`can_write` are asked in registration order by a
/// [`crate::Registry`]; the first codec to answer `true` handles the
/// path. A codec that can read a path is not required to also be able
/// to write it, or vice versa.
pub trait Codec: Send + Sync {
    /// A short, human-readable name for this codec, used only in
    /// diagnostics.
    fn name(&self) -> &str;

    /// Whether this codec is willing to read `path`.
    fn can_read(&self, path: &Path) -> bool;

    /// Whether this codec is willing to write `path`.
    fn can_write(&self, path: &Path) -> bool;

    /// Read and parse the document at `path`.
    fn read(&self, path: &Path) -> Result<Document, ReadError>;

    /// Serialize `document` and write it to `path`.
    fn write(&self, path: &Path, document: &Document) -> Result<(), WriteError>;
}

/// The one codec this crate ships: plain `.kofi` text files, read and
/// written with default [`ParserOptions`]/[`SerializerOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec {
    parser_options: ParserOptions,
    serializer_options: SerializerOptions,
}

impl TextCodec {
    /// The extension this codec claims, without its leading `.`.
    pub const EXTENSION: &'static str = "kofi";

    /// Build a `TextCodec` using the given options instead of the
    /// defaults.
    pub fn with_options(parser_options: ParserOptions, serializer_options: SerializerOptions) -> Self {
        Self { parser_options, serializer_options }
    }

    fn has_extension(path: &Path) -> bool {
        path.extension().is_some_and(|extension| extension == Self::EXTENSION)
    }
}

impl Codec for TextCodec {
    fn name(&self) -> &str {
        "text"
    }

    fn can_read(&self, path: &Path) -> bool {
        Self::has_extension(path)
    }

    fn can_write(&self, path: &Path) -> bool {
        Self::has_extension(path)
    }

    fn read(&self, path: &Path) -> Result<Document, ReadError> {
        let text = fs::read_to_string(path)
            .map_err(|source| IoError { path: path.to_path_buf(), source })?;

        let document = kofi_parser::parse(&text, &self.parser_options)
            .map_err(|error| attach_path(error, path))?;

        Ok(document)
    }

    fn write(&self, path: &Path, document: &Document) -> Result<(), WriteError> {
        let text = kofi_serializer::serialize(document, &self.serializer_options);

        fs::write(path, text).map_err(|source| IoError { path: path.to_path_buf(), source })?;

        Ok(())
    }
}

/// Wrap a bare [`ParseError`] in a [`ReadError::Parse`], carrying the
/// path along for the error message (the error itself has no path of
/// its own — only a line and column).
fn attach_path(error: ParseError, path: &Path) -> ReadError {
    ReadError::Parse { path: path.to_path_buf(), source: error }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    // No `tempfile` dependency: the one test that needs a real file uses
    // `std::env::temp_dir` directly, scoped by process id.
    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("kofi-codec-test-{name}-{pid}.kofi", pid = std::process::id()))
    }

    #[test]
    fn recognizes_the_kofi_extension_only() {
        let codec = TextCodec::default();

        assert!(codec.can_read(Path::new("settings.kofi")));
        assert!(codec.can_write(Path::new("settings.kofi")));
        assert!(!codec.can_read(Path::new("settings.toml")));
        assert!(!codec.can_read(Path::new("settings")));
    }

    #[test]
    fn writes_then_reads_back_an_equivalent_document() {
        let codec = TextCodec::default();
        let path = scratch_path("round-trip");

        let mut document = Document::new();
        document.add_element(None, kofi_model::Element::Property(kofi_model::Property::new("x", kofi_model::Value::Int32(1))));

        codec.write(&path, &document).unwrap();
        let read_back = codec.read(&path).unwrap();

        assert_eq!(read_back, document);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn surfaces_io_errors_for_a_missing_file() {
        let codec = TextCodec::default();
        let error = codec.read(Path::new("/no/such/directory/exists/here.kofi")).unwrap_err();

        assert!(matches!(error, ReadError::Io(_)));
    }
}
