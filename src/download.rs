//! Fetching of remote manifest items.

use crate::util::utf;
use async_trait::async_trait;
use std::error::Error;

/// Error type returned by a [`ContentDownloader`].
pub type DownloadError = Box<dyn Error + Send + Sync + 'static>;

/// Retrieves remote content (manifest items whose href is an absolute URL).
///
/// Only consulted when [`EpubReaderOptions::download_content`](crate::EpubReaderOptions::download_content)
/// is enabled. The crate ships no implementation, leaving the HTTP stack to the caller.
///
/// # Examples
/// - A downloader serving fixed bytes:
/// ```
/// use async_trait::async_trait;
/// use epubcore::{ContentDownloader, DownloadError};
///
/// struct Offline;
///
/// #[async_trait]
/// impl ContentDownloader for Offline {
///     async fn download_bytes(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
///         Err(format!("offline: {url}").into())
///     }
/// }
/// ```
#[async_trait]
pub trait ContentDownloader: Send + Sync {
    /// Downloads the resource at `url` as raw bytes.
    async fn download_bytes(&self, url: &str) -> Result<Vec<u8>, DownloadError>;

    /// Downloads the resource at `url` as text.
    ///
    /// By default, the bytes are decoded as UTF-8, or UTF-16 when a byte order mark is present.
    async fn download_text(&self, url: &str) -> Result<String, DownloadError> {
        let bytes = self.download_bytes(url).await?;
        Ok(utf::into_utf8_str(bytes)?)
    }
}
