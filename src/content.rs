//! The content files of an EPUB, classified by media type.
//!
//! A single model covers both fidelity levels through [`ContentModel`]:
//! - [`EpubContent`]: every local file materialized in memory ([`Book`](crate::Book)).
//! - [`EpubContentRef`]: every file represented by a loader ([`BookRef`](crate::BookRef)).

mod collection;
mod file;
mod kind;
mod loader;
pub(crate) mod resolver;

pub use self::collection::{EpubContentCollection, LocalContent, RemoteContent};
pub use self::file::{EpubLocalContentFile, EpubRemoteContentFile};
pub use self::kind::{EpubContentLocation, EpubContentType};
pub use self::loader::{ByteContent, LocalContentLoader, RemoteContentLoader, TextContent};

use crate::util::Sealed;
use std::fmt::Debug;
use std::sync::Arc;

/// Selects the payload carried by each kind of content file.
pub trait ContentModel: Sealed + Clone + Debug {
    type LocalText: Debug;
    type LocalBytes: Debug;
    type RemoteText: Debug;
    type RemoteBytes: Debug;
}

/// Content held in memory.
#[derive(Copy, Clone, Debug)]
pub struct Materialized;

impl Sealed for Materialized {}

impl ContentModel for Materialized {
    type LocalText = String;
    type LocalBytes = Vec<u8>;
    /// [`None`] unless downloaded.
    type RemoteText = Option<String>;
    type RemoteBytes = Option<Vec<u8>>;
}

/// Content read on demand.
#[derive(Copy, Clone, Debug)]
pub struct Referenced;

impl Sealed for Referenced {}

impl ContentModel for Referenced {
    type LocalText = LocalContentLoader<TextContent>;
    type LocalBytes = LocalContentLoader<ByteContent>;
    type RemoteText = RemoteContentLoader<TextContent>;
    type RemoteBytes = RemoteContentLoader<ByteContent>;
}

pub type LocalTextFile<M> = EpubLocalContentFile<<M as ContentModel>::LocalText>;
pub type LocalByteFile<M> = EpubLocalContentFile<<M as ContentModel>::LocalBytes>;
pub type RemoteTextFile<M> = EpubRemoteContentFile<<M as ContentModel>::RemoteText>;
pub type RemoteByteFile<M> = EpubRemoteContentFile<<M as ContentModel>::RemoteBytes>;

pub type EpubTextContentCollection<M> =
    EpubContentCollection<Arc<LocalTextFile<M>>, Arc<RemoteTextFile<M>>>;
pub type EpubByteContentCollection<M> =
    EpubContentCollection<Arc<LocalByteFile<M>>, Arc<RemoteByteFile<M>>>;

/// Materialized local text file.
pub type EpubLocalTextContentFile = LocalTextFile<Materialized>;
/// Materialized local binary file.
pub type EpubLocalByteContentFile = LocalByteFile<Materialized>;
/// Remote text file; content is present only if downloaded.
pub type EpubRemoteTextContentFile = RemoteTextFile<Materialized>;
/// Remote binary file; content is present only if downloaded.
pub type EpubRemoteByteContentFile = RemoteByteFile<Materialized>;
pub type EpubLocalTextContentFileRef = LocalTextFile<Referenced>;
pub type EpubLocalByteContentFileRef = LocalByteFile<Referenced>;
pub type EpubRemoteTextContentFileRef = RemoteTextFile<Referenced>;
pub type EpubRemoteByteContentFileRef = RemoteByteFile<Referenced>;

/// Any local content file within [`EpubContentData::all_files`].
#[derive(Clone, Debug)]
pub enum EpubLocalContent<M: ContentModel> {
    Text(Arc<LocalTextFile<M>>),
    Bytes(Arc<LocalByteFile<M>>),
}

impl<M: ContentModel> EpubLocalContent<M> {
    pub fn content_type(&self) -> EpubContentType {
        match self {
            Self::Text(file) => file.content_type(),
            Self::Bytes(file) => file.content_type(),
        }
    }

    pub fn content_mime_type(&self) -> &str {
        match self {
            Self::Text(file) => file.content_mime_type(),
            Self::Bytes(file) => file.content_mime_type(),
        }
    }
}

impl<M: ContentModel> LocalContent for EpubLocalContent<M> {
    fn key(&self) -> &str {
        match self {
            Self::Text(file) => file.key(),
            Self::Bytes(file) => file.key(),
        }
    }

    fn file_path(&self) -> &str {
        match self {
            Self::Text(file) => file.file_path(),
            Self::Bytes(file) => file.file_path(),
        }
    }
}

/// Any remote content file within [`EpubContentData::all_files`].
#[derive(Clone, Debug)]
pub enum EpubRemoteContent<M: ContentModel> {
    Text(Arc<RemoteTextFile<M>>),
    Bytes(Arc<RemoteByteFile<M>>),
}

impl<M: ContentModel> EpubRemoteContent<M> {
    pub fn content_type(&self) -> EpubContentType {
        match self {
            Self::Text(file) => file.content_type(),
            Self::Bytes(file) => file.content_type(),
        }
    }
}

impl<M: ContentModel> RemoteContent for EpubRemoteContent<M> {
    fn key(&self) -> &str {
        match self {
            Self::Text(file) => file.key(),
            Self::Bytes(file) => file.key(),
        }
    }

    fn url(&self) -> &str {
        match self {
            Self::Text(file) => file.url(),
            Self::Bytes(file) => file.url(),
        }
    }
}

/// Content files partitioned by purpose.
///
/// A file appears in [`all_files`](Self::all_files) and at most one typed collection;
/// collections share the same [`Arc`]-held files.
#[derive(Clone, Debug)]
pub struct EpubContentData<M: ContentModel> {
    /// The cover image, if declared.
    pub cover: Option<Arc<LocalByteFile<M>>>,
    /// The EPUB 3 navigation document (the `nav` manifest item).
    pub navigation_html_file: Option<Arc<LocalTextFile<M>>>,
    /// XHTML content documents.
    pub html: EpubTextContentCollection<M>,
    pub css: EpubTextContentCollection<M>,
    pub images: EpubByteContentCollection<M>,
    pub fonts: EpubByteContentCollection<M>,
    pub audio: EpubByteContentCollection<M>,
    /// Every manifest item.
    pub all_files: EpubContentCollection<EpubLocalContent<M>, EpubRemoteContent<M>>,
}

/// Materialized content of a [`Book`](crate::Book).
pub type EpubContent = EpubContentData<Materialized>;
/// Content references of a [`BookRef`](crate::BookRef).
pub type EpubContentRef = EpubContentData<Referenced>;
