/// The EPUB 2 NCX navigation document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubNcx {
    /// Absolute archive path of the `.ncx` file.
    pub file_path: String,
    pub head: Vec<EpubNcxHeadMeta>,
    /// Text of `docTitle`.
    pub doc_title: Option<String>,
    /// Text of every `docAuthor`.
    pub doc_authors: Vec<String>,
    pub nav_map: EpubNcxNavMap,
    pub page_list: Option<EpubNcxPageList>,
    pub nav_lists: Vec<EpubNcxNavList>,
}

/// A `head > meta` element, such as `dtb:uid`.
#[derive(Clone, Debug, PartialEq)]
pub struct EpubNcxHeadMeta {
    pub name: String,
    pub content: String,
    pub scheme: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubNcxNavMap {
    pub labels: Vec<EpubNcxLabel>,
    pub points: Vec<EpubNcxNavPoint>,
}

/// A `navPoint`, recursively holding its children.
#[derive(Clone, Debug, PartialEq)]
pub struct EpubNcxNavPoint {
    pub id: String,
    pub class: Option<String>,
    pub play_order: Option<String>,
    /// Never empty.
    pub labels: Vec<EpubNcxLabel>,
    pub content: EpubNcxContent,
    pub children: Vec<EpubNcxNavPoint>,
}

/// The `text` of a `navLabel` or `navInfo`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubNcxLabel {
    pub text: String,
}

/// A `content` pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct EpubNcxContent {
    pub id: Option<String>,
    /// The `src` as written, relative to the NCX file.
    pub source: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubNcxPageList {
    pub id: Option<String>,
    pub class: Option<String>,
    pub infos: Vec<EpubNcxLabel>,
    pub labels: Vec<EpubNcxLabel>,
    pub targets: Vec<EpubNcxPageTarget>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EpubNcxPageTarget {
    pub id: String,
    pub value: Option<String>,
    pub target_type: EpubNcxPageTargetType,
    pub class: Option<String>,
    pub play_order: Option<String>,
    pub labels: Vec<EpubNcxLabel>,
    pub content: Option<EpubNcxContent>,
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum EpubNcxPageTargetType {
    Front,
    Normal,
    Special,
}

impl EpubNcxPageTargetType {
    /// Case-insensitive; [`None`] for values outside the enumeration.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "front" => Some(Self::Front),
            "normal" => Some(Self::Normal),
            "special" => Some(Self::Special),
            _ => None,
        }
    }
}

/// A secondary `navList`, such as a list of illustrations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubNcxNavList {
    pub id: Option<String>,
    pub class: Option<String>,
    pub infos: Vec<EpubNcxLabel>,
    pub labels: Vec<EpubNcxLabel>,
    pub targets: Vec<EpubNcxNavTarget>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EpubNcxNavTarget {
    pub id: String,
    pub value: Option<String>,
    pub class: Option<String>,
    pub play_order: Option<String>,
    pub labels: Vec<EpubNcxLabel>,
    pub content: Option<EpubNcxContent>,
}
