use crate::archive::ArchiveHandle;
use crate::download::ContentDownloader;
use crate::errors::{EpubError, EpubResult};
use crate::util::runtime;
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::sync::Arc;

/// Marker for content decoded into a [`String`].
#[derive(Copy, Clone, Debug)]
pub struct TextContent;

/// Marker for content kept as raw bytes.
#[derive(Copy, Clone, Debug)]
pub struct ByteContent;

/// Deferred read of a file inside the archive of a [`BookRef`](crate::BookRef).
///
/// Nothing is read until [`read_content`](Self::read_content) is called.
/// Once the owning book is disposed, reads fail with
/// [`ArchiveError::Disposed`](crate::errors::ArchiveError::Disposed).
pub struct LocalContentLoader<K> {
    archive: Arc<ArchiveHandle>,
    file_path: String,
    _kind: PhantomData<fn() -> K>,
}

impl<K> LocalContentLoader<K> {
    pub(crate) fn new(archive: Arc<ArchiveHandle>, file_path: String) -> Self {
        Self {
            archive,
            file_path,
            _kind: PhantomData,
        }
    }
}

impl LocalContentLoader<TextContent> {
    /// Blocks on [`Self::read_content_async`]; must not be called within a tokio runtime.
    pub fn read_content(&self) -> EpubResult<String> {
        runtime::block_on(self.read_content_async())
    }

    pub async fn read_content_async(&self) -> EpubResult<String> {
        Ok(self.archive.read_str(&self.file_path)?)
    }
}

impl LocalContentLoader<ByteContent> {
    /// Blocks on [`Self::read_content_async`]; must not be called within a tokio runtime.
    pub fn read_content(&self) -> EpubResult<Vec<u8>> {
        runtime::block_on(self.read_content_async())
    }

    pub async fn read_content_async(&self) -> EpubResult<Vec<u8>> {
        Ok(self.archive.read_bytes(&self.file_path)?)
    }
}

impl<K> Debug for LocalContentLoader<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalContentLoader")
            .field("file_path", &self.file_path)
            .field("disposed", &self.archive.is_disposed())
            .finish()
    }
}

/// Deferred download of a remote content file.
///
/// Without a configured [`ContentDownloader`], reads fail with
/// [`EpubError::DownloadDisabled`].
pub struct RemoteContentLoader<K> {
    url: String,
    downloader: Option<Arc<dyn ContentDownloader>>,
    _kind: PhantomData<fn() -> K>,
}

impl<K> RemoteContentLoader<K> {
    pub(crate) fn new(url: String, downloader: Option<Arc<dyn ContentDownloader>>) -> Self {
        Self {
            url,
            downloader,
            _kind: PhantomData,
        }
    }

    fn downloader(&self) -> EpubResult<&dyn ContentDownloader> {
        self.downloader
            .as_deref()
            .ok_or_else(|| EpubError::DownloadDisabled {
                url: self.url.clone(),
            })
    }
}

impl RemoteContentLoader<TextContent> {
    /// Blocks on [`Self::read_content_async`]; must not be called within a tokio runtime.
    pub fn read_content(&self) -> EpubResult<String> {
        runtime::block_on(self.read_content_async())
    }

    pub async fn read_content_async(&self) -> EpubResult<String> {
        download_text(self.downloader()?, &self.url).await
    }
}

impl RemoteContentLoader<ByteContent> {
    /// Blocks on [`Self::read_content_async`]; must not be called within a tokio runtime.
    pub fn read_content(&self) -> EpubResult<Vec<u8>> {
        runtime::block_on(self.read_content_async())
    }

    pub async fn read_content_async(&self) -> EpubResult<Vec<u8>> {
        download_bytes(self.downloader()?, &self.url).await
    }
}

impl<K> Debug for RemoteContentLoader<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteContentLoader")
            .field("url", &self.url)
            .field("downloader", &self.downloader.is_some())
            .finish()
    }
}

pub(crate) async fn download_text(
    downloader: &dyn ContentDownloader,
    url: &str,
) -> EpubResult<String> {
    downloader
        .download_text(url)
        .await
        .map_err(|source| EpubError::Download {
            source,
            url: url.to_owned(),
        })
}

pub(crate) async fn download_bytes(
    downloader: &dyn ContentDownloader,
    url: &str,
) -> EpubResult<Vec<u8>> {
    downloader
        .download_bytes(url)
        .await
        .map_err(|source| EpubError::Download {
            source,
            url: url.to_owned(),
        })
}
