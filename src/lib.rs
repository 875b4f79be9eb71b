//! # epubcore
//!
//! Reads EPUB 2 and 3 archives into a validated, cross-referenced model at two
//! fidelity levels:
//! - [`Book`]: every local content file materialized in memory.
//! - [`BookRef`]: the parsed schema with content read from the archive on demand.
//!
//! Both resolve the package document ([`schema::EpubPackage`]), the EPUB 2 NCX
//! or EPUB 3 NAV navigation document, the spine into a reading order, and both
//! navigation formats into one [`EpubNavigationItem`] tree.
//!
//! ## Features
//! - `threadsafe` (default): [`Archive`] implementations and readers passed to
//!   [`EpubReaderOptions`] must be `Send + Sync`.
//!
//! ## Examples
//! - Reading a whole book:
//! ```no_run
//! # use epubcore::{Book, EpubResult};
//! # fn main() -> EpubResult<()> {
//! let book = Book::read("example.epub")?;
//!
//! println!("{} by {}", book.title, book.author);
//! for css in book.content.css.local() {
//!     println!("{}: {}", css.file_path(), css.content());
//! }
//! # Ok(())
//! # }
//! ```
//! - Opening a book lazily with relaxed validation:
//! ```no_run
//! # use epubcore::{EpubReaderOptions, EpubResult};
//! # async fn run() -> EpubResult<()> {
//! let book = EpubReaderOptions::relaxed()
//!     .open_book_async("example.epub")
//!     .await?;
//!
//! if let Some(navigation) = book.navigation_async().await? {
//!     for item in navigation {
//!         println!("{}", item.title);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod archive;
mod book;
pub mod content;
mod download;
pub mod errors;
mod navigation;
mod options;
mod parser;
mod reading_order;
pub mod schema;
mod util;

pub use self::{
    archive::{Archive, ZipArchive},
    book::{Book, BookRef},
    download::{ContentDownloader, DownloadError},
    errors::{EpubError, EpubResult},
    navigation::{EpubNavigationItem, EpubNavigationItemLink, EpubNavigationItemType},
    options::EpubReaderOptions,
    reading_order::EpubReadingOrderItem,
};
