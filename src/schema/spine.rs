/// The `spine` element: the default reading order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubSpine {
    pub id: Option<String>,
    pub page_progression_direction: Option<PageProgressionDirection>,
    /// Manifest id of the NCX document (EPUB 2; optional in EPUB 3).
    pub toc: Option<String>,
    pub items: Vec<EpubSpineItemRef>,
}

/// A spine `itemref`.
#[derive(Clone, Debug, PartialEq)]
pub struct EpubSpineItemRef {
    pub id: Option<String>,
    pub idref: String,
    /// `false` only when `linear="no"`.
    pub is_linear: bool,
    pub properties: Vec<EpubSpineProperty>,
}

#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq)]
pub enum PageProgressionDirection {
    #[default]
    Default,
    LeftToRight,
    RightToLeft,
}

impl PageProgressionDirection {
    /// Maps `page-progression-direction`, returning [`None`] for unrecognized values.
    pub fn parse(direction: &str) -> Option<Self> {
        match direction.trim() {
            "default" => Some(Self::Default),
            "ltr" => Some(Self::LeftToRight),
            "rtl" => Some(Self::RightToLeft),
            _ => None,
        }
    }
}

/// A token of an itemref's `properties` attribute.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum EpubSpineProperty {
    /// `page-spread-left`
    PageSpreadLeft,
    /// `page-spread-right`
    PageSpreadRight,
    Unknown(String),
}

impl EpubSpineProperty {
    pub fn parse_list(properties: &str) -> Vec<Self> {
        properties
            .split_whitespace()
            .map(|property| match property.to_ascii_lowercase().as_str() {
                "page-spread-left" => Self::PageSpreadLeft,
                "page-spread-right" => Self::PageSpreadRight,
                _ => Self::Unknown(property.to_owned()),
            })
            .collect()
    }
}
