/// The `manifest` element: every publication resource in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubManifest {
    pub id: Option<String>,
    pub items: Vec<EpubManifestItem>,
}

impl EpubManifest {
    /// Case-sensitive lookup by `id`.
    pub fn by_id(&self, id: &str) -> Option<&EpubManifestItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The first item declaring `property`.
    pub fn by_property(&self, property: &EpubManifestProperty) -> Option<&EpubManifestItem> {
        self.items.iter().find(|item| item.has_property(property))
    }
}

/// A manifest `item`.
#[derive(Clone, Debug, PartialEq)]
pub struct EpubManifestItem {
    pub id: String,
    /// The percent-decoded `href`, relative to the content directory.
    pub href: String,
    pub media_type: String,
    pub media_overlay: Option<String>,
    /// OPF 2.0 `required-namespace`, kept verbatim.
    pub required_namespace: Option<String>,
    /// OPF 2.0 `required-modules`, kept verbatim.
    pub required_modules: Option<String>,
    pub fallback: Option<String>,
    pub fallback_style: Option<String>,
    pub properties: Vec<EpubManifestProperty>,
}

impl EpubManifestItem {
    pub fn has_property(&self, property: &EpubManifestProperty) -> bool {
        self.properties.contains(property)
    }
}

/// A token of a manifest item's `properties` attribute.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum EpubManifestProperty {
    /// `cover-image`
    CoverImage,
    /// `mathml`
    MathMl,
    /// `nav`
    Nav,
    /// `remote-resources`
    RemoteResources,
    /// `scripted`
    Scripted,
    /// `svg`
    Svg,
    /// `switch`
    Switch,
    Unknown(String),
}

impl EpubManifestProperty {
    /// Splits a whitespace-separated `properties` value.
    pub fn parse_list(properties: &str) -> Vec<Self> {
        properties.split_whitespace().map(Self::parse).collect()
    }

    pub fn parse(property: &str) -> Self {
        match property.to_ascii_lowercase().as_str() {
            "cover-image" => Self::CoverImage,
            "mathml" => Self::MathMl,
            "nav" => Self::Nav,
            "remote-resources" => Self::RemoteResources,
            "scripted" => Self::Scripted,
            "svg" => Self::Svg,
            "switch" => Self::Switch,
            _ => Self::Unknown(property.to_owned()),
        }
    }
}
