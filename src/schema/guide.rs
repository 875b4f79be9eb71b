/// The deprecated EPUB 2 `guide` element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubGuide {
    pub references: Vec<EpubGuideReference>,
}

/// A guide `reference`, such as the cover page or the table of contents.
#[derive(Clone, Debug, PartialEq)]
pub struct EpubGuideReference {
    /// The `type` attribute, such as `toc` or `text`.
    pub reference_type: String,
    pub title: Option<String>,
    /// The href as written, relative to the content directory.
    pub href: String,
}
