use crate::content::{EpubLocalContentFile, EpubRemoteContentFile};
use crate::errors::{ContentCollectionError, EpubResult, PackageError};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

/// Identity of a content file stored inside the archive.
pub trait LocalContent {
    fn key(&self) -> &str;

    fn file_path(&self) -> &str;
}

/// Identity of a content file referenced by URL.
pub trait RemoteContent {
    fn key(&self) -> &str;

    fn url(&self) -> &str;
}

impl<C> LocalContent for EpubLocalContentFile<C> {
    fn key(&self) -> &str {
        &self.key
    }

    fn file_path(&self) -> &str {
        &self.file_path
    }
}

impl<C> RemoteContent for EpubRemoteContentFile<C> {
    fn key(&self) -> &str {
        &self.key
    }

    fn url(&self) -> &str {
        &self.url
    }
}

impl<T: LocalContent + ?Sized> LocalContent for Arc<T> {
    fn key(&self) -> &str {
        (**self).key()
    }

    fn file_path(&self) -> &str {
        (**self).file_path()
    }
}

impl<T: RemoteContent + ?Sized> RemoteContent for Arc<T> {
    fn key(&self) -> &str {
        (**self).key()
    }

    fn url(&self) -> &str {
        (**self).url()
    }
}

/// Local and remote content files with lookup indices by key, file path and URL.
///
/// Every index is unique; [`EpubContentCollection::new`] rejects duplicates.
#[derive(Clone, Debug)]
pub struct EpubContentCollection<L, R> {
    local: Vec<L>,
    remote: Vec<R>,
    local_by_key: HashMap<String, usize>,
    local_by_file_path: HashMap<String, usize>,
    remote_by_url: HashMap<String, usize>,
}

impl<L, R> Default for EpubContentCollection<L, R> {
    fn default() -> Self {
        Self {
            local: Vec::new(),
            remote: Vec::new(),
            local_by_key: HashMap::new(),
            local_by_file_path: HashMap::new(),
            remote_by_url: HashMap::new(),
        }
    }
}

impl<L: LocalContent, R: RemoteContent> EpubContentCollection<L, R> {
    /// Builds the collection, preserving the given order.
    ///
    /// # Errors
    /// [`PackageError::DuplicateContent`] if a key, file path or URL repeats.
    pub fn new(local: Vec<L>, remote: Vec<R>) -> EpubResult<Self> {
        let mut local_by_key = HashMap::with_capacity(local.len());
        let mut local_by_file_path = HashMap::with_capacity(local.len());
        let mut remote_by_url = HashMap::with_capacity(remote.len());

        for (index, file) in local.iter().enumerate() {
            insert_unique(&mut local_by_key, file.key(), index, "key")?;
            let file_path = file.file_path();
            insert_unique(&mut local_by_file_path, file_path, index, "file path")?;
        }
        for (index, file) in remote.iter().enumerate() {
            insert_unique(&mut remote_by_url, file.url(), index, "url")?;
        }

        Ok(Self {
            local,
            remote,
            local_by_key,
            local_by_file_path,
            remote_by_url,
        })
    }

    pub fn local(&self) -> &[L] {
        &self.local
    }

    pub fn remote(&self) -> &[R] {
        &self.remote
    }

    /// Total number of local and remote files.
    pub fn len(&self) -> usize {
        self.local.len() + self.remote.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.remote.is_empty()
    }

    pub fn contains_local_by_key(&self, key: &str) -> bool {
        self.local_by_key.contains_key(key)
    }

    /// # Errors
    /// [`ContentCollectionError::LocalKeyNotFound`] if absent.
    pub fn get_local_by_key(&self, key: &str) -> EpubResult<&L> {
        self.try_get_local_by_key(key)
            .ok_or_else(|| ContentCollectionError::LocalKeyNotFound(key.to_owned()).into())
    }

    pub fn try_get_local_by_key(&self, key: &str) -> Option<&L> {
        self.local_by_key.get(key).map(|&index| &self.local[index])
    }

    pub fn contains_local_by_file_path(&self, file_path: &str) -> bool {
        self.local_by_file_path.contains_key(file_path)
    }

    /// # Errors
    /// [`ContentCollectionError::LocalFilePathNotFound`] if absent.
    pub fn get_local_by_file_path(&self, file_path: &str) -> EpubResult<&L> {
        self.try_get_local_by_file_path(file_path).ok_or_else(|| {
            ContentCollectionError::LocalFilePathNotFound(file_path.to_owned()).into()
        })
    }

    pub fn try_get_local_by_file_path(&self, file_path: &str) -> Option<&L> {
        self.local_by_file_path
            .get(file_path)
            .map(|&index| &self.local[index])
    }

    pub fn contains_remote_by_url(&self, url: &str) -> bool {
        self.remote_by_url.contains_key(url)
    }

    /// # Errors
    /// [`ContentCollectionError::RemoteUrlNotFound`] if absent.
    pub fn get_remote_by_url(&self, url: &str) -> EpubResult<&R> {
        self.try_get_remote_by_url(url)
            .ok_or_else(|| ContentCollectionError::RemoteUrlNotFound(url.to_owned()).into())
    }

    pub fn try_get_remote_by_url(&self, url: &str) -> Option<&R> {
        self.remote_by_url
            .get(url)
            .map(|&index| &self.remote[index])
    }
}

fn insert_unique(
    index: &mut HashMap<String, usize>,
    value: &str,
    position: usize,
    kind: &'static str,
) -> EpubResult<()> {
    match index.entry(value.to_owned()) {
        Entry::Occupied(_) => Err(PackageError::DuplicateContent {
            kind,
            value: value.to_owned(),
        }
        .into()),
        Entry::Vacant(entry) => {
            entry.insert(position);
            Ok(())
        }
    }
}
