use crate::util::utf::UtfError;
use std::io;
use std::path::PathBuf;

/// Alias for `Result<T, ArchiveError>`.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Possible errors from the archive backing a [`Book`](crate::Book) or
/// [`BookRef`](crate::BookRef).
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ArchiveError {
    /// The entry exists, although its content is not valid UTF-8 (or UTF-16 with a BOM).
    ///
    /// This can occur when reading a text content file or an XML document.
    #[error("[InvalidUtf8Entry - `{path}`]: Entry cannot be read as UTF-8")]
    InvalidUtf8Entry {
        /// The root cause of the error.
        source: UtfError,
        /// The archive entry responsible for triggering the error.
        path: String,
    },

    /// The requested entry does not exist within the archive.
    #[error("[MissingEntry - `{path}`]: Entry not found in the archive")]
    MissingEntry {
        /// The requested archive entry.
        path: String,
    },

    /// The entry exists, although is unable to be read, typically I/O.
    #[error("[CannotRead - `{path}`]: {source}")]
    CannotRead {
        /// The root cause of the error.
        source: io::Error,
        /// The archive entry responsible for triggering the error.
        path: String,
    },

    /// The entry is larger than [`MAX_ENTRY_SIZE`](crate::archive::MAX_ENTRY_SIZE).
    #[error("[EntryTooLarge - `{path}`]: Entry size of {size} bytes exceeds the 2 GiB limit")]
    EntryTooLarge {
        /// The archive entry responsible for triggering the error.
        path: String,
        /// Declared uncompressed size of the entry.
        size: u64,
    },

    /// The archive itself is unreadable due to an unsupported format or malformed state.
    ///
    /// Path is [`None`] when the archive was supplied as a reader.
    #[error("[UnreadableArchive - `{path:?}`]: {source}")]
    UnreadableArchive {
        /// The root cause of this error.
        source: io::Error,
        /// The path responsible for triggering the error, if applicable.
        path: Option<PathBuf>,
    },

    /// The archive was released by [`BookRef::dispose`](crate::BookRef::dispose)
    /// before an on-demand read was issued.
    #[error("[Disposed]: The archive has already been disposed")]
    Disposed,
}
