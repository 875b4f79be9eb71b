use crate::archive::Archive;
use crate::archive::errors::{ArchiveError, ArchiveResult};
use crate::util::sync::Lock;
use std::io::{self, Read, Seek};
use std::path::Path;
use zip::ZipArchive as Zip;
use zip::read::ZipFile;
use zip::result::ZipError;

/// [`Archive`] over any ZIP container implementing [`Read`] + [`Seek`].
pub struct ZipArchive<R>(Lock<Zip<R>>);

impl<R: Read + Seek> ZipArchive<R> {
    /// `reader` (and optional `path` for a more descriptive error message).
    pub fn new(reader: R, path: Option<&Path>) -> ArchiveResult<Self> {
        Zip::new(reader)
            .map(|zip| Self(Lock::new(zip)))
            .map_err(|error| ArchiveError::UnreadableArchive {
                source: io::Error::from(error),
                path: path.map(Path::to_path_buf),
            })
    }

    fn get_file<'a>(archive: &'a mut Zip<R>, path: &str) -> ArchiveResult<Option<ZipFile<'a, R>>> {
        match archive.by_name(path) {
            Ok(file) => Ok(Some(file)),
            Err(ZipError::FileNotFound) => Ok(None),
            Err(error) => Err(ArchiveError::CannotRead {
                source: io::Error::from(error),
                path: path.to_owned(),
            }),
        }
    }
}

impl<#[cfg(feature = "threadsafe")] R: Send + Sync, #[cfg(not(feature = "threadsafe"))] R> Archive
    for ZipArchive<R>
where
    R: Read + Seek + 'static,
{
    fn entry_size(&self, path: &str) -> ArchiveResult<Option<u64>> {
        let mut lock = acquire_archive_lock(&self.0)?;
        Ok(Self::get_file(&mut lock, path)?.map(|file| file.size()))
    }

    fn read_entry(&self, path: &str) -> ArchiveResult<Vec<u8>> {
        let mut lock = acquire_archive_lock(&self.0)?;
        let mut zip_file = Self::get_file(&mut lock, path)?.ok_or_else(|| {
            ArchiveError::MissingEntry {
                path: path.to_owned(),
            }
        })?;
        let mut buf = Vec::with_capacity(usize::try_from(zip_file.size()).unwrap_or_default());

        zip_file
            .read_to_end(&mut buf)
            .map(|_| buf)
            .map_err(|error| ArchiveError::CannotRead {
                source: error,
                path: path.to_owned(),
            })
    }
}

#[cfg(feature = "threadsafe")]
fn acquire_archive_lock<T>(lock: &Lock<T>) -> ArchiveResult<std::sync::MutexGuard<'_, T>> {
    lock.lock().map_err(|_| ArchiveError::UnreadableArchive {
        source: io::Error::other("Poisoned ZipArchive"),
        path: None,
    })
}
#[cfg(not(feature = "threadsafe"))]
fn acquire_archive_lock<T>(lock: &Lock<T>) -> ArchiveResult<std::cell::RefMut<'_, T>> {
    lock.lock().map_err(|_| ArchiveError::UnreadableArchive {
        source: io::Error::other("Poisoned ZipArchive"),
        path: None,
    })
}
