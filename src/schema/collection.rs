use crate::schema::{EpubMetadata, EpubMetadataLink, TextDirection};

/// A package `collection` (EPUB 3.1+), grouping related resources under a role.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubCollection {
    pub role: String,
    pub id: Option<String>,
    pub dir: Option<TextDirection>,
    pub lang: Option<String>,
    pub metadata: Option<EpubMetadata>,
    pub links: Vec<EpubMetadataLink>,
    pub nested_collections: Vec<EpubCollection>,
}
