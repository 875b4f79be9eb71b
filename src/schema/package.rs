use crate::schema::{EpubCollection, EpubGuide, EpubManifest, EpubMetadata, EpubSpine};
use std::fmt::Display;

/// The `package` element of the OPF package document.
#[derive(Clone, Debug, PartialEq)]
pub struct EpubPackage {
    /// The `id` of the `dc:identifier` that uniquely identifies the publication.
    pub unique_identifier: Option<String>,
    pub version: EpubVersion,
    pub id: Option<String>,
    pub dir: Option<TextDirection>,
    /// The `xml:lang` attribute.
    pub lang: Option<String>,
    /// Vocabulary prefix mappings (EPUB 3).
    pub prefix: Option<String>,
    pub metadata: EpubMetadata,
    pub manifest: EpubManifest,
    pub spine: EpubSpine,
    /// The deprecated EPUB 2 guide.
    pub guide: Option<EpubGuide>,
    /// Collections (EPUB 3.1+).
    pub collections: Vec<EpubCollection>,
}

/// The EPUB version declared by the package document.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum EpubVersion {
    /// `2.0` **(Legacy)**
    Epub2,
    /// `3.0`
    Epub3,
    /// `3.1`
    Epub31,
    /// `3.2`
    Epub32,
    /// `3.3`
    Epub33,
    /// Any unrecognized version string.
    ///
    /// The parser rejects packages with this version.
    Unknown,
}

impl EpubVersion {
    /// Maps a `package[version]` value; every `2.x` revision is treated as `2.0`.
    pub fn parse(version: &str) -> Self {
        match version.trim() {
            "3.0" => Self::Epub3,
            "3.1" => Self::Epub31,
            "3.2" => Self::Epub32,
            "3.3" => Self::Epub33,
            version if version == "2" || version.starts_with("2.") => Self::Epub2,
            _ => Self::Unknown,
        }
    }

    /// Returns `true` for [`EpubVersion::Epub2`].
    pub fn is_epub2(self) -> bool {
        matches!(self, Self::Epub2)
    }

    /// Returns `true` for any known version from `3.0` onward.
    pub fn is_epub3(self) -> bool {
        matches!(self, Self::Epub3 | Self::Epub31 | Self::Epub32 | Self::Epub33)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Epub2 => "2.0",
            Self::Epub3 => "3.0",
            Self::Epub31 => "3.1",
            Self::Epub32 => "3.2",
            Self::Epub33 => "3.3",
            Self::Unknown => "unknown",
        }
    }
}

impl Display for EpubVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The text directionality hint of the `dir` attribute.
#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq)]
pub enum TextDirection {
    /// `ltr`
    LeftToRight,
    /// `rtl`
    RightToLeft,
    /// `auto`
    #[default]
    Auto,
}

impl TextDirection {
    /// Maps a `dir` value, returning [`None`] for unrecognized values.
    pub fn parse(dir: &str) -> Option<Self> {
        match dir.trim() {
            "ltr" => Some(Self::LeftToRight),
            "rtl" => Some(Self::RightToLeft),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeftToRight => "ltr",
            Self::RightToLeft => "rtl",
            Self::Auto => "auto",
        }
    }
}

impl Display for TextDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
