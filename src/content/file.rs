use crate::content::loader::{ByteContent, LocalContentLoader, RemoteContentLoader, TextContent};
use crate::content::{EpubContentLocation, EpubContentType};
use crate::errors::EpubResult;

/// A content file stored inside the EPUB archive.
///
/// `C` is the payload: the materialized content for a [`Book`](crate::Book),
/// or a [`LocalContentLoader`] for a [`BookRef`](crate::BookRef).
#[derive(Clone, Debug)]
pub struct EpubLocalContentFile<C> {
    pub(crate) key: String,
    pub(crate) content_type: EpubContentType,
    pub(crate) content_mime_type: String,
    pub(crate) file_path: String,
    pub(crate) content: C,
}

impl<C> EpubLocalContentFile<C> {
    /// The decoded manifest href, relative to the content directory.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn content_type(&self) -> EpubContentType {
        self.content_type
    }

    /// The media type as declared by the manifest.
    pub fn content_mime_type(&self) -> &str {
        &self.content_mime_type
    }

    /// Always [`EpubContentLocation::Local`].
    pub fn content_location(&self) -> EpubContentLocation {
        EpubContentLocation::Local
    }

    /// The absolute path within the archive (e.g., `OEBPS/text/chapter1.xhtml`).
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// The file name portion of [`Self::file_path`].
    pub fn file_name(&self) -> &str {
        self.file_path
            .rsplit_once('/')
            .map_or(self.file_path.as_str(), |(_, name)| name)
    }

    pub fn content(&self) -> &C {
        &self.content
    }
}

impl EpubLocalContentFile<LocalContentLoader<TextContent>> {
    /// Reads the text of this file from the archive.
    pub fn read_content(&self) -> EpubResult<String> {
        self.content.read_content()
    }

    pub async fn read_content_async(&self) -> EpubResult<String> {
        self.content.read_content_async().await
    }
}

impl EpubLocalContentFile<LocalContentLoader<ByteContent>> {
    /// Reads the bytes of this file from the archive.
    pub fn read_content(&self) -> EpubResult<Vec<u8>> {
        self.content.read_content()
    }

    pub async fn read_content_async(&self) -> EpubResult<Vec<u8>> {
        self.content.read_content_async().await
    }
}

/// A content file referenced by an absolute URL.
///
/// For a [`Book`](crate::Book), the payload is [`None`] unless it was downloaded.
#[derive(Clone, Debug)]
pub struct EpubRemoteContentFile<C> {
    pub(crate) key: String,
    pub(crate) content_type: EpubContentType,
    pub(crate) content_mime_type: String,
    pub(crate) url: String,
    pub(crate) content: C,
}

impl<C> EpubRemoteContentFile<C> {
    /// The manifest href.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn content_type(&self) -> EpubContentType {
        self.content_type
    }

    pub fn content_mime_type(&self) -> &str {
        &self.content_mime_type
    }

    /// Always [`EpubContentLocation::Remote`].
    pub fn content_location(&self) -> EpubContentLocation {
        EpubContentLocation::Remote
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn content(&self) -> &C {
        &self.content
    }
}

impl EpubRemoteContentFile<RemoteContentLoader<TextContent>> {
    /// Downloads the text of this file through the configured
    /// [`ContentDownloader`](crate::ContentDownloader).
    pub fn read_content(&self) -> EpubResult<String> {
        self.content.read_content()
    }

    pub async fn read_content_async(&self) -> EpubResult<String> {
        self.content.read_content_async().await
    }
}

impl EpubRemoteContentFile<RemoteContentLoader<ByteContent>> {
    /// Downloads the bytes of this file through the configured
    /// [`ContentDownloader`](crate::ContentDownloader).
    pub fn read_content(&self) -> EpubResult<Vec<u8>> {
        self.content.read_content()
    }

    pub async fn read_content_async(&self) -> EpubResult<Vec<u8>> {
        self.content.read_content_async().await
    }
}
