//! The eager [`Book`] and lazy [`BookRef`] facades.

mod book_ref;

pub use self::book_ref::BookRef;

use crate::archive::{Archive, ArchiveHandle};
use crate::content::{EpubContent, Materialized, resolver};
use crate::errors::EpubResult;
use crate::navigation::{self, EpubNavigationItem};
use crate::options::EpubReaderOptions;
use crate::parser::EpubParser;
use crate::reading_order::{self, EpubReadingOrderItem};
use crate::schema::{EpubMetadata, EpubSchema};
use std::path::{Path, PathBuf};

/// A fully materialized EPUB.
///
/// Every local content file is read into memory and the archive is released
/// before the book is returned.
/// Remote content is fetched only when downloading is enabled through
/// [`EpubReaderOptions::download_content`].
///
/// # Examples
/// - Printing the reading order of a book:
/// ```no_run
/// # use epubcore::{Book, EpubResult};
/// # fn main() -> EpubResult<()> {
/// let book = Book::read("example.epub")?;
///
/// for item in &book.reading_order {
///     println!("{}: {} bytes", item.file.file_path(), item.file.content().len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Book {
    /// [`None`] when read from a reader rather than a path.
    pub file_path: Option<PathBuf>,
    /// The first `dc:title`, or an empty string.
    pub title: String,
    /// Every `dc:creator` joined by `", "`.
    pub author: String,
    pub author_list: Vec<String>,
    /// The first `dc:description`.
    pub description: Option<String>,
    pub schema: EpubSchema,
    pub content: EpubContent,
    /// Bytes of the cover image, if declared.
    pub cover_image: Option<Vec<u8>>,
    /// HTML content files in spine order.
    pub reading_order: Vec<EpubReadingOrderItem<Materialized>>,
    /// [`None`] when the book has neither an NCX nor a NAV document.
    pub navigation: Option<Vec<EpubNavigationItem<Materialized>>>,
}

impl Book {
    /// Reads the EPUB at `path` with default [`EpubReaderOptions`].
    ///
    /// Must not be called within a tokio runtime; see [`Self::read_async`].
    pub fn read(path: impl AsRef<Path>) -> EpubResult<Self> {
        EpubReaderOptions::default().read_book(path)
    }

    /// Asynchronously reads the EPUB at `path` with default [`EpubReaderOptions`].
    pub async fn read_async(path: impl AsRef<Path>) -> EpubResult<Self> {
        EpubReaderOptions::default().read_book_async(path).await
    }

    pub(crate) async fn from_archive(
        options: &EpubReaderOptions,
        archive: Box<dyn Archive>,
        file_path: Option<PathBuf>,
    ) -> EpubResult<Self> {
        let archive = ArchiveHandle::new(archive);
        let schema = EpubParser::new(options, &archive).parse_schema()?;
        let downloader = options.active_downloader();
        let content = resolver::read_content(&schema, &archive, downloader.as_deref()).await?;

        let reading_order = reading_order::resolve_reading_order(
            &schema,
            &content,
            options.ignore_missing_spine_items,
        )?;
        let navigation = navigation::build_navigation(
            &schema,
            &content,
            options.ignore_missing_content_for_navigation_points,
        )?;
        let cover_image = content.cover.as_ref().map(|cover| cover.content().clone());
        let summary = Summary::of(&schema.package.metadata);

        archive.dispose();
        log::debug!("Read book `{}`", summary.title);

        Ok(Self {
            file_path,
            title: summary.title,
            author: summary.author,
            author_list: summary.author_list,
            description: summary.description,
            schema,
            content,
            cover_image,
            reading_order,
            navigation,
        })
    }
}

/// Convenience fields shared by [`Book`] and [`BookRef`].
struct Summary {
    title: String,
    author: String,
    author_list: Vec<String>,
    description: Option<String>,
}

impl Summary {
    fn of(metadata: &EpubMetadata) -> Self {
        let author_list: Vec<String> = metadata
            .creators
            .iter()
            .map(|creator| creator.text.clone())
            .collect();

        Self {
            title: metadata
                .titles
                .first()
                .map(|title| title.text.clone())
                .unwrap_or_default(),
            author: author_list.join(", "),
            author_list,
            description: metadata
                .descriptions
                .first()
                .map(|description| description.text.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EpubMetadataCreator, EpubMetadataText};

    #[test]
    fn test_summary() {
        let text = |text: &str| EpubMetadataText {
            text: text.to_owned(),
            ..EpubMetadataText::default()
        };
        let creator = |text: &str| EpubMetadataCreator {
            text: text.to_owned(),
            ..EpubMetadataCreator::default()
        };

        let summary = Summary::of(&EpubMetadata {
            titles: vec![text("Main"), text("Subtitle")],
            creators: vec![creator("Ada"), creator("Grace")],
            descriptions: vec![text("About")],
            ..EpubMetadata::default()
        });
        assert_eq!("Main", summary.title);
        assert_eq!("Ada, Grace", summary.author);
        assert_eq!(vec!["Ada", "Grace"], summary.author_list);
        assert_eq!(Some("About"), summary.description.as_deref());

        let empty = Summary::of(&EpubMetadata::default());
        assert_eq!("", empty.title);
        assert_eq!("", empty.author);
        assert!(empty.author_list.is_empty());
        assert!(empty.description.is_none());
    }
}
