//! Error-related types.
//!
//! # Variants
//! Parsing fails fast on the first structural violation. The only recoverable
//! checkpoints are those relaxed through [`EpubReaderOptions`](crate::EpubReaderOptions):
//! - Missing table of contents ([`PackageError::MissingSpineToc`], [`NavigationError::NoNavItem`])
//! - Invalid manifest items ([`PackageError::MissingAttribute`] on `manifest > item`)
//! - Unresolvable spine items ([`PackageError::InvalidIdref`], [`PackageError::InvalidSpineItem`])
//! - Unresolvable navigation targets ([`NavigationError::MissingContent`])

pub use crate::archive::errors::{ArchiveError, ArchiveResult};
pub use crate::util::utf::UtfError;
use std::error::Error;
use std::io;
use std::path::PathBuf;

/// Alias for `Result<T, EpubError>`.
pub type EpubResult<T> = Result<T, EpubError>;

/// Unified error type.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum EpubError {
    /// The source file does not exist.
    #[error("[NotFound - `{path:?}`]: {source}")]
    NotFound {
        /// The root cause of the error.
        source: io::Error,
        /// The requested file.
        path: PathBuf,
    },

    /// Entry access within the archive has failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// `META-INF/container.xml` is missing or malformed.
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// The package document is missing required structure.
    #[error(transparent)]
    Package(#[from] PackageError),

    /// The NCX or NAV navigation document is missing or malformed.
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// A lookup within a content collection missed.
    #[error(transparent)]
    ContentCollection(#[from] ContentCollectionError),

    /// An XML document is not well formed.
    #[error("[Unparsable - `{file}`]: {source}")]
    Unparsable {
        /// The root cause of the error.
        source: Box<dyn Error + Send + Sync + 'static>,
        /// The archive entry responsible for triggering the error.
        file: String,
    },

    /// Remote content was requested although downloading is disabled
    /// or no [`ContentDownloader`](crate::ContentDownloader) is configured.
    #[error("[DownloadDisabled - `{url}`]: Downloading remote content is disabled")]
    DownloadDisabled {
        /// The remote resource.
        url: String,
    },

    /// The configured [`ContentDownloader`](crate::ContentDownloader) failed.
    #[error("[Download - `{url}`]: {source}")]
    Download {
        /// The root cause of the error.
        source: Box<dyn Error + Send + Sync + 'static>,
        /// The remote resource.
        url: String,
    },

    /// The runtime used by a synchronous entry point could not be started.
    #[error("Unable to start the blocking runtime: {0}")]
    Runtime(io::Error),
}

/// Errors within `META-INF/container.xml`.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ContainerError {
    /// `META-INF/container.xml` does not exist in the archive.
    #[error("`META-INF/container.xml` file not found in the archive")]
    MissingContainerFile,

    /// The root element is not `container`.
    #[error("`META-INF/container.xml` does not contain a `container` element")]
    NoContainerElement,

    /// No `rootfile` element carries a `full-path` attribute.
    #[error("Root file path not found in `META-INF/container.xml`")]
    NoRootFile,

    /// The package document referenced by the container does not exist.
    #[error("Root file `{0}` referenced in `META-INF/container.xml` not found in the archive")]
    MissingPackageFile(String),
}

/// Errors within the package (`.opf`) document.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum PackageError {
    /// The `package` element is not found.
    #[error("Missing `package` element in `{0}`")]
    NoPackageElement(String),

    /// The `version` attribute on `package` is missing.
    #[error("EPUB version is not specified in the package")]
    MissingVersion,

    /// The `version` attribute on `package` is not a supported EPUB version.
    #[error("Unsupported EPUB version: {0}")]
    UnsupportedVersion(String),

    /// The `metadata` element is not found.
    #[error("Missing `metadata` element")]
    NoMetadata,

    /// The `manifest` element is not found.
    #[error("Missing `manifest` element")]
    NoManifest,

    /// The `spine` element is not found.
    #[error("Missing `spine` element")]
    NoSpine,

    /// A required attribute is missing or blank, e.g. `manifest > item[*href]`.
    #[error("Required attribute missing: {0}")]
    MissingAttribute(String),

    /// Two manifest items share the same `id`.
    #[error("Duplicate manifest `item` ID found: {0}")]
    DuplicateItemId(String),

    /// Two content files share the same key, file path or URL.
    #[error("Duplicate content file {kind} found: {value}")]
    DuplicateContent {
        /// `key`, `file path` or `url`.
        kind: &'static str,
        /// The repeated value.
        value: String,
    },

    /// An EPUB 2 spine has no `toc` attribute referencing the NCX.
    #[error("Missing spine `toc` attribute (Required for EPUB 2)")]
    MissingSpineToc,

    /// A spine `itemref` references a non-existent manifest item.
    #[error("Spine `itemref` references a non-existent manifest item by ID: {0}")]
    InvalidIdref(String),

    /// A spine `itemref` resolves to a manifest item that is not a local HTML file.
    #[error("Spine `itemref` with ID ref `{idref}` is not a local HTML content file: {href}")]
    InvalidSpineItem {
        /// The `idref` of the spine item.
        idref: String,
        /// The manifest href it resolves to.
        href: String,
    },

    /// The EPUB 2 cover `meta` references a non-existent manifest item.
    #[error("Cover `meta` references a non-existent manifest item by ID: {0}")]
    MissingCoverItem(String),

    /// The cover image is a remote resource.
    #[error("Cover image cannot be a remote resource: {0}")]
    RemoteCover(String),

    /// The navigation document (`nav` manifest property) is a remote resource.
    #[error("Navigation document cannot be a remote resource: {0}")]
    RemoteNavigationFile(String),
}

/// Errors within the NCX or NAV navigation document.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum NavigationError {
    /// The spine `toc` id does not match any manifest item.
    #[error("TOC item `{0}` not found in the manifest")]
    NoTocItem(String),

    /// No manifest item carries the `nav` property (Required for EPUB 3).
    #[error("Manifest missing an `item` with the `nav` property (Required for EPUB 3)")]
    NoNavItem,

    /// The navigation document referenced by the manifest does not exist.
    #[error("Navigation file `{0}` not found in the archive")]
    MissingFile(String),

    /// The navigation document exceeds the entry size limit.
    #[error("Navigation file `{0}` is larger than 2 GiB")]
    FileTooLarge(String),

    /// A mandatory element is absent, e.g. `ncx > navMap`.
    #[error("`{file}` does not contain the `{element}` element")]
    MissingElement {
        /// The navigation document.
        file: String,
        /// Path of the missing element.
        element: &'static str,
    },

    /// A required attribute or child is missing, e.g. `navPoint[*id]`.
    #[error("`{file}`: required value missing: {path}")]
    MissingValue {
        /// The navigation document.
        file: String,
        /// Path of the offending node and its missing part.
        path: String,
    },

    /// `pageTarget[type]` is not `front`, `normal` or `special`.
    #[error("`{file}`: `{value}` is not a valid page target type")]
    InvalidPageTargetType {
        /// The navigation document.
        file: String,
        /// The offending value.
        value: String,
    },

    /// An `li` has neither an `a` nor a `span` child.
    #[error("`{file}`: `{path}` must contain either an `a` or `span` element")]
    InvalidListItem {
        /// The navigation document.
        file: String,
        /// Path of the offending `li`.
        path: String,
    },

    /// A navigation link targets a file absent from the HTML content
    /// (only when missing navigation content is not ignored).
    #[error("Content file for navigation link `{0}` is missing")]
    MissingContent(String),
}

/// Lookup misses within a [`EpubContentCollection`](crate::content::EpubContentCollection).
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ContentCollectionError {
    /// No local content file has the given key.
    #[error("Local content file with key `{0}` does not exist")]
    LocalKeyNotFound(String),

    /// No local content file has the given file path.
    #[error("Local content file with file path `{0}` does not exist")]
    LocalFilePathNotFound(String),

    /// No remote content file has the given URL.
    #[error("Remote content file with URL `{0}` does not exist")]
    RemoteUrlNotFound(String),
}
