use std::path::PathBuf;

use kofi_errors::{DispatchError, IoError, ParseError};
use thiserror::Error;

/// Everything that can go wrong reading a document through a
/// [`crate::Registry`] or a single [`crate::Codec`].
#[derive(Debug, Error)]
pub enum ReadError {
    /// No registered codec claimed the path.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The underlying file could not be read.
    #[error(transparent)]
    Io(#[from] IoError),

    /// The file was read but its contents did not parse.
    #[error("{path}: {source}", path = path.display())]
    Parse {
        /// The path whose contents failed to parse.
        path: PathBuf,
        /// The underlying parse failure.
        #[source]
        source: ParseError,
    },
}

/// Everything that can go wrong writing a document through a
/// [`crate::Registry`] or a single [`crate::Codec`].
#[derive(Debug, Error)]
pub enum WriteError {
    /// No registered codec claimed the path.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The underlying file could not be written.
    #[error(transparent)]
    Io(#[from] IoError),
}
