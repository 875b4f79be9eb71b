/// The EPUB 3 navigation document (XHTML).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubNavDocument {
    /// Absolute archive path of the navigation document.
    pub file_path: String,
    /// Every `nav` element of the body in document order.
    pub navs: Vec<EpubNav>,
}

impl EpubNavDocument {
    /// The first `nav` of the given type.
    pub fn nav(&self, nav_type: &EpubNavType) -> Option<&EpubNav> {
        self.navs.iter().find(|nav| &nav.nav_type == nav_type)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EpubNav {
    pub nav_type: EpubNavType,
    pub is_hidden: bool,
    /// Text of the first `h1`-`h6` heading.
    pub head: Option<String>,
    pub ol: Option<EpubNavOl>,
}

/// The `epub:type` of a `nav` element.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum EpubNavType {
    /// `toc`
    Toc,
    /// `page-list`
    PageList,
    /// `landmarks`
    Landmarks,
    /// `loi` (list of illustrations)
    Loi,
    /// `lot` (list of tables)
    Lot,
    /// `loa` (list of audio clips)
    Loa,
    /// `lov` (list of videos)
    Lov,
    /// Any other value, kept verbatim (empty when absent).
    Unknown(String),
}

impl EpubNavType {
    /// The first recognized token of a whitespace-separated `epub:type` value.
    pub fn parse(epub_type: &str) -> Self {
        epub_type
            .split_whitespace()
            .find_map(|token| match token.to_ascii_lowercase().as_str() {
                "toc" => Some(Self::Toc),
                "page-list" => Some(Self::PageList),
                "landmarks" => Some(Self::Landmarks),
                "loi" => Some(Self::Loi),
                "lot" => Some(Self::Lot),
                "loa" => Some(Self::Loa),
                "lov" => Some(Self::Lov),
                _ => None,
            })
            .unwrap_or_else(|| Self::Unknown(epub_type.trim().to_owned()))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubNavOl {
    pub is_hidden: bool,
    pub items: Vec<EpubNavLi>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EpubNavLi {
    pub content: EpubNavLiContent,
    pub child_ol: Option<EpubNavOl>,
}

/// An `li` holds exactly one of these.
#[derive(Clone, Debug, PartialEq)]
pub enum EpubNavLiContent {
    Anchor(EpubNavAnchor),
    /// A non-navigable heading.
    Span(EpubNavSpan),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubNavAnchor {
    /// The `href` as written, relative to the navigation document.
    pub href: Option<String>,
    pub text: String,
    pub title: Option<String>,
    pub alt: Option<String>,
    /// The raw `epub:type`, such as `bodymatter` within landmarks.
    pub epub_type: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubNavSpan {
    pub text: String,
    pub title: Option<String>,
    pub alt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_type() {
        #[rustfmt::skip]
        let expected = [
            (EpubNavType::Toc, "toc"),
            (EpubNavType::PageList, "PAGE-LIST"),
            (EpubNavType::Landmarks, "custom landmarks"),
            (EpubNavType::Unknown("custom".to_owned()), " custom "),
            (EpubNavType::Unknown(String::new()), ""),
        ];

        for (nav_type, raw) in expected {
            assert_eq!(nav_type, EpubNavType::parse(raw));
        }
    }
}
