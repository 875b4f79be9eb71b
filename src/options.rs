//! Reader configuration and the entry points of the parsing pipeline.

use crate::archive::{self, Archive, ZipArchive};
use crate::book::{Book, BookRef};
use crate::download::ContentDownloader;
use crate::errors::EpubResult;
use crate::util::runtime;
use crate::util::sync::SendAndSync;
use std::fmt::{Debug, Formatter};
use std::io::{Read, Seek};
use std::path::Path;
use std::sync::Arc;

/// Configuration for opening ([`BookRef`]) or reading ([`Book`]) an EPUB.
///
/// Each leniency option relaxes exactly one validation checkpoint;
/// everything else fails fast.
///
/// # Examples
/// - Reading a book while tolerating broken manifests and spines:
/// ```no_run
/// # use epubcore::EpubReaderOptions;
/// let book = EpubReaderOptions::new()
///     .skip_invalid_manifest_items(true)
///     .ignore_missing_spine_items(true)
///     .read_book("example.epub")
///     .unwrap();
///
/// println!("{} by {}", book.title, book.author);
/// ```
#[derive(Clone)]
pub struct EpubReaderOptions {
    pub(crate) ignore_missing_toc: bool,
    pub(crate) skip_invalid_manifest_items: bool,
    pub(crate) ignore_missing_spine_items: bool,
    pub(crate) ignore_missing_content_for_navigation_points: bool,
    pub(crate) skip_xml_headers: bool,
    pub(crate) download_content: bool,
    pub(crate) content_downloader: Option<Arc<dyn ContentDownloader>>,
}

impl Default for EpubReaderOptions {
    fn default() -> Self {
        Self {
            ignore_missing_toc: false,
            skip_invalid_manifest_items: false,
            ignore_missing_spine_items: false,
            ignore_missing_content_for_navigation_points: true,
            skip_xml_headers: false,
            download_content: false,
            content_downloader: None,
        }
    }
}

impl Debug for EpubReaderOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EpubReaderOptions")
            .field("ignore_missing_toc", &self.ignore_missing_toc)
            .field(
                "skip_invalid_manifest_items",
                &self.skip_invalid_manifest_items,
            )
            .field(
                "ignore_missing_spine_items",
                &self.ignore_missing_spine_items,
            )
            .field(
                "ignore_missing_content_for_navigation_points",
                &self.ignore_missing_content_for_navigation_points,
            )
            .field("skip_xml_headers", &self.skip_xml_headers)
            .field("download_content", &self.download_content)
            .field("content_downloader", &self.content_downloader.is_some())
            .finish()
    }
}

impl EpubReaderOptions {
    /// Options with their default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every leniency disabled; any structural violation fails the read.
    pub fn strict() -> Self {
        Self {
            ignore_missing_content_for_navigation_points: false,
            ..Self::default()
        }
    }

    /// Every leniency enabled, including XML prologue tolerance.
    pub fn relaxed() -> Self {
        Self {
            ignore_missing_toc: true,
            skip_invalid_manifest_items: true,
            ignore_missing_spine_items: true,
            ignore_missing_content_for_navigation_points: true,
            skip_xml_headers: true,
            ..Self::default()
        }
    }

    /// Proceed without navigation when an EPUB 2 spine lacks a `toc` attribute
    /// or an EPUB 3 manifest lacks a `nav` item.
    ///
    /// Default: `false`
    pub fn ignore_missing_toc(mut self, ignore: bool) -> Self {
        self.ignore_missing_toc = ignore;
        self
    }

    /// Drop manifest items missing an `id`, `href` or `media-type` instead of failing.
    ///
    /// Default: `false`
    pub fn skip_invalid_manifest_items(mut self, skip: bool) -> Self {
        self.skip_invalid_manifest_items = skip;
        self
    }

    /// Skip spine items that do not resolve to a local HTML content file instead of failing.
    ///
    /// Default: `false`
    pub fn ignore_missing_spine_items(mut self, ignore: bool) -> Self {
        self.ignore_missing_spine_items = ignore;
        self
    }

    /// Keep navigation links whose target file is absent, leaving their content file unset.
    /// When `false`, such links fail with
    /// [`NavigationError::MissingContent`](crate::errors::NavigationError::MissingContent).
    ///
    /// Default: `true`
    pub fn ignore_missing_content_for_navigation_points(mut self, ignore: bool) -> Self {
        self.ignore_missing_content_for_navigation_points = ignore;
        self
    }

    /// Discard a leading `<?xml ...?>` declaration of every XML document before parsing,
    /// tolerating non-standard prologues.
    ///
    /// Default: `false`
    pub fn skip_xml_headers(mut self, skip: bool) -> Self {
        self.skip_xml_headers = skip;
        self
    }

    /// Fetch remote manifest items through the [`content_downloader`](Self::content_downloader).
    ///
    /// Without a downloader, remote content is left unfetched.
    ///
    /// Default: `false`
    pub fn download_content(mut self, download: bool) -> Self {
        self.download_content = download;
        self
    }

    /// The downloader used for remote manifest items.
    ///
    /// Default: [`None`]
    pub fn content_downloader(mut self, downloader: impl ContentDownloader + 'static) -> Self {
        self.content_downloader = Some(Arc::new(downloader));
        self
    }

    /// The configured downloader, if downloading is enabled.
    pub(crate) fn active_downloader(&self) -> Option<Arc<dyn ContentDownloader>> {
        match (self.download_content, &self.content_downloader) {
            (true, Some(downloader)) => Some(Arc::clone(downloader)),
            (true, None) => {
                log::warn!(
                    "Downloading enabled without a downloader; remote content is left unfetched"
                );
                None
            }
            (false, _) => None,
        }
    }

    ////////////////////////////////////////////////////////////////////////////////
    // BookRef
    ////////////////////////////////////////////////////////////////////////////////

    /// Opens the EPUB at `path` as a lazily-loaded [`BookRef`].
    ///
    /// Blocks on [`Self::open_book_async`]; must not be called within a tokio runtime.
    ///
    /// # Errors
    /// [`EpubError::NotFound`](crate::EpubError::NotFound) if no file exists at `path`.
    pub fn open_book(&self, path: impl AsRef<Path>) -> EpubResult<BookRef> {
        runtime::block_on(self.open_book_async(path))
    }

    /// Asynchronously opens the EPUB at `path` as a lazily-loaded [`BookRef`].
    pub async fn open_book_async(&self, path: impl AsRef<Path>) -> EpubResult<BookRef> {
        let path = path.as_ref();
        let archive = archive::open_zip_file(path).await?;
        BookRef::from_archive(self, archive, Some(path.to_path_buf())).await
    }

    /// Opens an EPUB from any [`Read`] + [`Seek`] source as a lazily-loaded [`BookRef`].
    pub fn open_book_from<R>(&self, reader: R) -> EpubResult<BookRef>
    where
        R: Read + Seek + SendAndSync + 'static,
    {
        runtime::block_on(self.open_book_from_async(reader))
    }

    /// Asynchronous counterpart of [`Self::open_book_from`].
    pub async fn open_book_from_async<R>(&self, reader: R) -> EpubResult<BookRef>
    where
        R: Read + Seek + SendAndSync + 'static,
    {
        let archive = Box::new(ZipArchive::new(reader, None)?);
        BookRef::from_archive(self, archive, None).await
    }

    /// Opens a [`BookRef`] over any [`Archive`] implementation.
    pub async fn open_book_with_archive(
        &self,
        archive: impl Archive + 'static,
    ) -> EpubResult<BookRef> {
        BookRef::from_archive(self, Box::new(archive), None).await
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Book
    ////////////////////////////////////////////////////////////////////////////////

    /// Reads the EPUB at `path` into a fully materialized [`Book`].
    ///
    /// Blocks on [`Self::read_book_async`]; must not be called within a tokio runtime.
    ///
    /// # Errors
    /// [`EpubError::NotFound`](crate::EpubError::NotFound) if no file exists at `path`.
    pub fn read_book(&self, path: impl AsRef<Path>) -> EpubResult<Book> {
        runtime::block_on(self.read_book_async(path))
    }

    /// Asynchronously reads the EPUB at `path` into a fully materialized [`Book`].
    pub async fn read_book_async(&self, path: impl AsRef<Path>) -> EpubResult<Book> {
        let path = path.as_ref();
        let archive = archive::open_zip_file(path).await?;
        Book::from_archive(self, archive, Some(path.to_path_buf())).await
    }

    /// Reads an EPUB from any [`Read`] + [`Seek`] source into a fully materialized [`Book`].
    pub fn read_book_from<R>(&self, reader: R) -> EpubResult<Book>
    where
        R: Read + Seek + SendAndSync + 'static,
    {
        runtime::block_on(self.read_book_from_async(reader))
    }

    /// Asynchronous counterpart of [`Self::read_book_from`].
    pub async fn read_book_from_async<R>(&self, reader: R) -> EpubResult<Book>
    where
        R: Read + Seek + SendAndSync + 'static,
    {
        let archive = Box::new(ZipArchive::new(reader, None)?);
        Book::from_archive(self, archive, None).await
    }

    /// Reads a [`Book`] from any [`Archive`] implementation.
    pub async fn read_book_with_archive(
        &self,
        archive: impl Archive + 'static,
    ) -> EpubResult<Book> {
        Book::from_archive(self, Box::new(archive), None).await
    }
}
