use crate::schema::TextDirection;

/// The `metadata` element of the package document.
///
/// Every kind keeps all of its occurrences in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubMetadata {
    pub titles: Vec<EpubMetadataText>,
    pub creators: Vec<EpubMetadataCreator>,
    pub subjects: Vec<EpubMetadataText>,
    pub descriptions: Vec<EpubMetadataText>,
    pub publishers: Vec<EpubMetadataText>,
    pub contributors: Vec<EpubMetadataCreator>,
    pub dates: Vec<EpubMetadataDate>,
    pub types: Vec<EpubMetadataText>,
    pub formats: Vec<EpubMetadataText>,
    pub identifiers: Vec<EpubMetadataIdentifier>,
    pub sources: Vec<EpubMetadataText>,
    pub languages: Vec<EpubMetadataText>,
    pub relations: Vec<EpubMetadataText>,
    pub coverages: Vec<EpubMetadataText>,
    pub rights: Vec<EpubMetadataText>,
    /// `link` elements (EPUB 3).
    pub links: Vec<EpubMetadataLink>,
    /// `meta` elements, in both their EPUB 2 and EPUB 3 forms.
    pub metas: Vec<EpubMetadataMeta>,
}

impl EpubMetadata {
    /// The manifest id referenced by the EPUB 2 `<meta name="cover" content="..."/>`.
    pub fn epub2_cover_id(&self) -> Option<&str> {
        self.metas
            .iter()
            .find(|meta| {
                meta.name
                    .as_deref()
                    .is_some_and(|name| name.eq_ignore_ascii_case("cover"))
            })
            .and_then(|meta| meta.content.as_deref())
    }
}

/// A Dublin Core element carrying text with optional identity and language hints.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubMetadataText {
    pub text: String,
    pub id: Option<String>,
    pub dir: Option<TextDirection>,
    pub lang: Option<String>,
}

/// `dc:creator` or `dc:contributor`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubMetadataCreator {
    pub text: String,
    pub id: Option<String>,
    /// The `opf:file-as` sort form.
    pub file_as: Option<String>,
    /// The `opf:role` MARC relator code, such as `aut`.
    pub role: Option<String>,
}

/// `dc:date`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubMetadataDate {
    pub text: String,
    pub id: Option<String>,
    /// The EPUB 2 `opf:event`, such as `publication`.
    pub event: Option<String>,
}

/// `dc:identifier`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubMetadataIdentifier {
    pub text: String,
    pub id: Option<String>,
    /// The EPUB 2 `opf:scheme`, such as `ISBN`.
    pub scheme: Option<String>,
}

/// Metadata `link` element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubMetadataLink {
    pub href: String,
    pub id: Option<String>,
    pub media_type: Option<String>,
    pub hreflang: Option<String>,
    pub properties: Vec<String>,
    pub refines: Option<String>,
    pub rel: Vec<String>,
}

/// Metadata `meta` element.
///
/// EPUB 2 uses `name`/`content`, while EPUB 3 uses `property` with its text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubMetadataMeta {
    pub name: Option<String>,
    pub content: Option<String>,
    pub id: Option<String>,
    pub property: Option<String>,
    pub refines: Option<String>,
    pub scheme: Option<String>,
    pub dir: Option<TextDirection>,
    pub lang: Option<String>,
    pub text: String,
}
