use crate::archive::{Archive, ArchiveError, ArchiveHandle};
use crate::book::Summary;
use crate::content::{EpubContentRef, Referenced, resolver};
use crate::errors::EpubResult;
use crate::navigation::{self, EpubNavigationItem};
use crate::options::EpubReaderOptions;
use crate::parser::EpubParser;
use crate::reading_order::{self, EpubReadingOrderItem};
use crate::schema::EpubSchema;
use crate::util::runtime;
use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A lazily-loaded EPUB.
///
/// Only the package and navigation documents are parsed when opened; content
/// files are read from the retained archive on demand.
/// The archive is released by [`Self::dispose`] or when the book is dropped,
/// after which every on-demand read fails with [`ArchiveError::Disposed`].
///
/// # Examples
/// - Reading the cover and the first chapter on demand:
/// ```no_run
/// # use epubcore::{BookRef, EpubResult};
/// # fn main() -> EpubResult<()> {
/// let book = BookRef::open("example.epub")?;
///
/// let cover = book.read_cover()?;
/// if let Some(first) = book.reading_order()?.first() {
///     println!("{}", first.file.read_content()?);
/// }
/// book.dispose();
/// # Ok(())
/// # }
/// ```
pub struct BookRef {
    /// [`None`] when opened from a reader rather than a path.
    pub file_path: Option<PathBuf>,
    /// The first `dc:title`, or an empty string.
    pub title: String,
    /// Every `dc:creator` joined by `", "`.
    pub author: String,
    pub author_list: Vec<String>,
    /// The first `dc:description`.
    pub description: Option<String>,
    pub schema: EpubSchema,
    pub content: EpubContentRef,
    archive: Arc<ArchiveHandle>,
    ignore_missing_spine_items: bool,
    ignore_missing_content_for_navigation_points: bool,
}

impl BookRef {
    /// Opens the EPUB at `path` with default [`EpubReaderOptions`].
    ///
    /// Must not be called within a tokio runtime; see [`Self::open_async`].
    pub fn open(path: impl AsRef<Path>) -> EpubResult<Self> {
        EpubReaderOptions::default().open_book(path)
    }

    /// Asynchronously opens the EPUB at `path` with default [`EpubReaderOptions`].
    pub async fn open_async(path: impl AsRef<Path>) -> EpubResult<Self> {
        EpubReaderOptions::default().open_book_async(path).await
    }

    pub(crate) async fn from_archive(
        options: &EpubReaderOptions,
        archive: Box<dyn Archive>,
        file_path: Option<PathBuf>,
    ) -> EpubResult<Self> {
        let archive = Arc::new(ArchiveHandle::new(archive));
        let schema = EpubParser::new(options, &archive).parse_schema()?;
        let content = resolver::reference_content(&schema, &archive, options.active_downloader())?;
        let summary = Summary::of(&schema.package.metadata);

        log::debug!("Opened book `{}`", summary.title);

        Ok(Self {
            file_path,
            title: summary.title,
            author: summary.author,
            author_list: summary.author_list,
            description: summary.description,
            schema,
            content,
            archive,
            ignore_missing_spine_items: options.ignore_missing_spine_items,
            ignore_missing_content_for_navigation_points: options
                .ignore_missing_content_for_navigation_points,
        })
    }

    /// Reads the bytes of the cover image, if declared.
    ///
    /// # Errors
    /// [`ArchiveError::Disposed`] after [`Self::dispose`].
    pub fn read_cover(&self) -> EpubResult<Option<Vec<u8>>> {
        runtime::block_on(self.read_cover_async())
    }

    /// Asynchronous counterpart of [`Self::read_cover`].
    pub async fn read_cover_async(&self) -> EpubResult<Option<Vec<u8>>> {
        self.ensure_open()?;

        match &self.content.cover {
            Some(cover) => cover.read_content_async().await.map(Some),
            None => Ok(None),
        }
    }

    /// Resolves the spine into HTML content file references.
    ///
    /// # Errors
    /// - [`PackageError::InvalidIdref`](crate::errors::PackageError::InvalidIdref)
    ///   and [`PackageError::InvalidSpineItem`](crate::errors::PackageError::InvalidSpineItem)
    ///   unless [`EpubReaderOptions::ignore_missing_spine_items`] was set.
    /// - [`ArchiveError::Disposed`] after [`Self::dispose`].
    pub fn reading_order(&self) -> EpubResult<Vec<EpubReadingOrderItem<Referenced>>> {
        runtime::block_on(self.reading_order_async())
    }

    /// Asynchronous counterpart of [`Self::reading_order`].
    pub async fn reading_order_async(&self) -> EpubResult<Vec<EpubReadingOrderItem<Referenced>>> {
        self.ensure_open()?;
        reading_order::resolve_reading_order(
            &self.schema,
            &self.content,
            self.ignore_missing_spine_items,
        )
    }

    /// Builds the navigation tree; [`None`] when the book has neither an NCX nor a NAV document.
    ///
    /// # Errors
    /// - [`NavigationError::MissingContent`](crate::errors::NavigationError::MissingContent)
    ///   unless [`EpubReaderOptions::ignore_missing_content_for_navigation_points`] was set.
    /// - [`ArchiveError::Disposed`] after [`Self::dispose`].
    pub fn navigation(&self) -> EpubResult<Option<Vec<EpubNavigationItem<Referenced>>>> {
        runtime::block_on(self.navigation_async())
    }

    /// Asynchronous counterpart of [`Self::navigation`].
    pub async fn navigation_async(
        &self,
    ) -> EpubResult<Option<Vec<EpubNavigationItem<Referenced>>>> {
        self.ensure_open()?;
        navigation::build_navigation(
            &self.schema,
            &self.content,
            self.ignore_missing_content_for_navigation_points,
        )
    }

    /// Releases the archive. Subsequent calls have no effect.
    pub fn dispose(&self) {
        if self.archive.dispose() {
            log::debug!("Disposed book `{}`", self.title);
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.archive.is_disposed()
    }

    fn ensure_open(&self) -> EpubResult<()> {
        if self.is_disposed() {
            Err(ArchiveError::Disposed.into())
        } else {
            Ok(())
        }
    }
}

impl Drop for BookRef {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl Debug for BookRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookRef")
            .field("file_path", &self.file_path)
            .field("title", &self.title)
            .field("author", &self.author)
            .field("schema", &self.schema)
            .field("is_disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}
