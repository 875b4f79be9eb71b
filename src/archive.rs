//! Archive abstraction consumed by the parsing pipeline.
//!
//! [`ZipArchive`] is the provided implementation. Any other type implementing
//! [`Archive`] (an in-memory fake, for example) may be injected through
//! [`EpubReaderOptions::open_book_with_archive`](crate::EpubReaderOptions::open_book_with_archive).

pub(crate) mod errors;
mod zip;

pub use self::errors::{ArchiveError, ArchiveResult};
pub use self::zip::ZipArchive;

use crate::errors::{EpubError, EpubResult};
use crate::util::sync::{Lock, SendAndSync};
use crate::util::utf;
use std::io::{self, BufReader};
use std::path::Path;

/// Entries larger than this are rejected before being buffered.
pub const MAX_ENTRY_SIZE: u64 = i32::MAX as u64;

/// Random access to the entries of an EPUB container.
///
/// Entry paths are absolute within the container, use forward slashes,
/// and never start with `/` (e.g., `OEBPS/content.opf`).
pub trait Archive: SendAndSync {
    /// The uncompressed size of the entry at `path`, or [`None`] if it does not exist.
    fn entry_size(&self, path: &str) -> ArchiveResult<Option<u64>>;

    /// Reads the whole entry at `path`.
    ///
    /// # Errors
    /// [`ArchiveError::MissingEntry`] when no such entry exists.
    fn read_entry(&self, path: &str) -> ArchiveResult<Vec<u8>>;
}

/// Exclusive, disposable owner of the archive backing a book.
///
/// Reference content files share the handle; once disposed, every read fails with
/// [`ArchiveError::Disposed`].
pub(crate) struct ArchiveHandle(Lock<Option<Box<dyn Archive>>>);

impl ArchiveHandle {
    pub(crate) fn new(archive: Box<dyn Archive>) -> Self {
        Self(Lock::new(Some(archive)))
    }

    pub(crate) fn contains(&self, path: &str) -> ArchiveResult<bool> {
        self.with_archive(|archive| archive.entry_size(path).map(|size| size.is_some()))
    }

    /// Reads the entry at `path`, enforcing [`MAX_ENTRY_SIZE`].
    pub(crate) fn read_bytes(&self, path: &str) -> ArchiveResult<Vec<u8>> {
        self.with_archive(|archive| match archive.entry_size(path)? {
            None => Err(ArchiveError::MissingEntry {
                path: path.to_owned(),
            }),
            Some(size) if size > MAX_ENTRY_SIZE => Err(ArchiveError::EntryTooLarge {
                path: path.to_owned(),
                size,
            }),
            Some(_) => archive.read_entry(path),
        })
    }

    /// Reads the entry at `path` as text, converting UTF-16 to UTF-8.
    pub(crate) fn read_str(&self, path: &str) -> ArchiveResult<String> {
        utf::into_utf8_str(self.read_bytes(path)?).map_err(|source| {
            ArchiveError::InvalidUtf8Entry {
                source,
                path: path.to_owned(),
            }
        })
    }

    /// Reads an XML document, converting UTF-16 to UTF-8 while keeping the prologue intact.
    pub(crate) fn read_xml(&self, path: &str) -> ArchiveResult<Vec<u8>> {
        utf::into_utf8(self.read_bytes(path)?).map_err(|source| ArchiveError::InvalidUtf8Entry {
            source,
            path: path.to_owned(),
        })
    }

    /// Releases the archive. Returns `false` if it was already released.
    pub(crate) fn dispose(&self) -> bool {
        match self.0.lock() {
            Ok(mut archive) => archive.take().is_some(),
            // A poisoned lock is released along with the handle itself.
            Err(_) => false,
        }
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.0.lock().map_or(true, |archive| archive.is_none())
    }

    fn with_archive<T>(
        &self,
        f: impl FnOnce(&dyn Archive) -> ArchiveResult<T>,
    ) -> ArchiveResult<T> {
        let lock = self.0.lock().map_err(|_| ArchiveError::UnreadableArchive {
            source: io::Error::other("Poisoned archive handle"),
            path: None,
        })?;

        match lock.as_deref() {
            Some(archive) => f(archive),
            None => Err(ArchiveError::Disposed),
        }
    }
}

/// Opens the ZIP file at `path` without blocking the calling task.
pub(crate) async fn open_zip_file(path: &Path) -> EpubResult<Box<dyn Archive>> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|source| open_error(path, source))?
        .into_std()
        .await;
    let archive = ZipArchive::new(BufReader::new(file), Some(path))?;

    log::debug!("Opened archive `{}`", path.display());
    Ok(Box::new(archive))
}

fn open_error(path: &Path, source: io::Error) -> EpubError {
    if source.kind() == io::ErrorKind::NotFound {
        EpubError::NotFound {
            path: path.to_path_buf(),
            source,
        }
    } else {
        EpubError::Archive(ArchiveError::UnreadableArchive {
            source,
            path: Some(path.to_path_buf()),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory archive used across unit tests.
    pub(crate) struct MemoryArchive(pub(crate) HashMap<String, Vec<u8>>);

    impl MemoryArchive {
        pub(crate) fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
            Self(
                entries
                    .into_iter()
                    .map(|(path, data)| (path.to_owned(), data.as_bytes().to_vec()))
                    .collect(),
            )
        }
    }

    impl Archive for MemoryArchive {
        fn entry_size(&self, path: &str) -> ArchiveResult<Option<u64>> {
            Ok(self.0.get(path).map(|data| data.len() as u64))
        }

        fn read_entry(&self, path: &str) -> ArchiveResult<Vec<u8>> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| ArchiveError::MissingEntry {
                    path: path.to_owned(),
                })
        }
    }

    /// Claims a size beyond the limit for the `oversized` entries.
    pub(crate) struct OversizedArchive {
        pub(crate) inner: MemoryArchive,
        pub(crate) oversized: Vec<&'static str>,
    }

    impl Archive for OversizedArchive {
        fn entry_size(&self, path: &str) -> ArchiveResult<Option<u64>> {
            if self.oversized.contains(&path) {
                return Ok(Some(MAX_ENTRY_SIZE + 1));
            }
            self.inner.entry_size(path)
        }

        fn read_entry(&self, path: &str) -> ArchiveResult<Vec<u8>> {
            assert!(
                !self.oversized.contains(&path),
                "oversized entries must never be buffered"
            );
            self.inner.read_entry(path)
        }
    }

    #[test]
    fn test_read_and_dispose() {
        let handle = ArchiveHandle::new(Box::new(MemoryArchive::new([("a.txt", "data")])));

        assert!(handle.contains("a.txt").unwrap());
        assert!(!handle.contains("b.txt").unwrap());
        assert_eq!("data", handle.read_str("a.txt").unwrap());
        assert!(matches!(
            handle.read_bytes("b.txt"),
            Err(ArchiveError::MissingEntry { path }) if path == "b.txt"
        ));

        assert!(!handle.is_disposed());
        assert!(handle.dispose());
        // Idempotent
        assert!(!handle.dispose());
        assert!(handle.is_disposed());
        assert!(matches!(handle.read_bytes("a.txt"), Err(ArchiveError::Disposed)));
    }

    #[test]
    fn test_entry_size_limit() {
        let handle = ArchiveHandle::new(Box::new(OversizedArchive {
            inner: MemoryArchive::new([("small.bin", "data")]),
            oversized: vec!["huge.bin"],
        }));

        assert!(matches!(
            handle.read_bytes("huge.bin"),
            Err(ArchiveError::EntryTooLarge { size, .. }) if size == MAX_ENTRY_SIZE + 1
        ));
        assert_eq!(b"data".to_vec(), handle.read_bytes("small.bin").unwrap());
    }
}
