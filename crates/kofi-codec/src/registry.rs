use std::{path::Path, sync::Arc};

use kofi_errors::DispatchError;
use kofi_model::Document;
use log::debug;

use crate::{
    codec::Codec,
    error::{ReadError, WriteError},
};

/// An ordered set of [`Codec`]s, dispatched by path (§4.G).
///
/// Codecs are asked in registration order; the first one whose
/// `can_read`/`can_write` answers `true` handles the request. A path
/// none of them claim fails with [`DispatchError::NoCodecFor`].
#[derive(Default)]
pub struct Registry {
    codecs: Vec<Arc<dyn Codec>>,
}

impl Registry {
    /// An empty registry with no codecs registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `codec`, to be tried after every codec already
    /// registered.
    pub fn register(&mut self, codec: Arc<dyn Codec>) -> &mut Self {
        self.codecs.push(codec);
        self
    }

    fn find_reader(&self, path: &Path) -> Option<&Arc<dyn Codec>> {
        self.codecs.iter().find(|codec| codec.can_read(path))
    }

    fn find_writer(&self, path: &Path) -> Option<&Arc<dyn Codec>> {
        self.codecs.iter().find(|codec| codec.can_write(path))
    }

    /// Read and parse the document at `path`, dispatching to the first
    /// registered codec willing to read it.
    pub fn read(&self, path: &Path) -> Result<Document, ReadError> {
        let codec = self.find_reader(path).ok_or_else(|| DispatchError::NoCodecFor(path.to_path_buf()))?;
        debug!("dispatching read of {path} to codec {name}", path = path.display(), name = codec.name());

        codec.read(path)
    }

    /// Serialize `document` and write it to `path`, dispatching to the
    /// first registered codec willing to write it.
    pub fn write(&self, path: &Path, document: &Document) -> Result<(), WriteError> {
        let codec = self.find_writer(path).ok_or_else(|| DispatchError::NoCodecFor(path.to_path_buf()))?;
        debug!("dispatching write of {path} to codec {name}", path = path.display(), name = codec.name());

        codec.write(path, document)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::codec::TextCodec;

    #[test]
    fn dispatches_to_the_first_codec_that_claims_the_path() {
        let mut registry = Registry::new();
        registry.register(Arc::new(TextCodec::default()));

        let error = registry.read(Path::new("settings.toml")).unwrap_err();
        assert!(matches!(error, ReadError::Dispatch(DispatchError::NoCodecFor(_))));
    }

    #[test]
    fn empty_registry_rejects_everything() {
        let registry = Registry::new();
        let error = registry.write(Path::new("settings.kofi"), &Document::new()).unwrap_err();

        assert!(matches!(error, WriteError::Dispatch(DispatchError::NoCodecFor(_))));
    }
}
