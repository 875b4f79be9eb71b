//! The immutable parse-time model of an EPUB, shared by [`Book`](crate::Book)
//! and [`BookRef`](crate::BookRef).

mod collection;
mod guide;
mod manifest;
mod metadata;
mod nav;
mod ncx;
mod package;
mod spine;

pub use self::collection::EpubCollection;
pub use self::guide::{EpubGuide, EpubGuideReference};
pub use self::manifest::{EpubManifest, EpubManifestItem, EpubManifestProperty};
pub use self::metadata::{
    EpubMetadata, EpubMetadataCreator, EpubMetadataDate, EpubMetadataIdentifier, EpubMetadataLink,
    EpubMetadataMeta, EpubMetadataText,
};
pub use self::nav::{
    EpubNav, EpubNavAnchor, EpubNavDocument, EpubNavLi, EpubNavLiContent, EpubNavOl, EpubNavSpan,
    EpubNavType,
};
pub use self::ncx::{
    EpubNcx, EpubNcxContent, EpubNcxHeadMeta, EpubNcxLabel, EpubNcxNavList, EpubNcxNavMap,
    EpubNcxNavPoint, EpubNcxNavTarget, EpubNcxPageList, EpubNcxPageTarget, EpubNcxPageTargetType,
};
pub use self::package::{EpubPackage, EpubVersion, TextDirection};
pub use self::spine::{EpubSpine, EpubSpineItemRef, EpubSpineProperty, PageProgressionDirection};

/// The package document together with its navigation documents.
#[derive(Clone, Debug, PartialEq)]
pub struct EpubSchema {
    pub package: EpubPackage,
    /// Present when the spine references an NCX through its `toc` attribute.
    pub epub2_ncx: Option<EpubNcx>,
    /// Present for EPUB 3 packages with a `nav` manifest item.
    pub epub3_nav_document: Option<EpubNavDocument>,
    /// Directory of the package document; the base of every manifest href.
    ///
    /// Empty when the package document sits at the archive root.
    pub content_directory_path: String,
}
