use std::fmt::Display;

/// Classification of a manifest item by its media type.
///
/// Unrecognized media types map to [`EpubContentType::Other`]; arbitrary assets
/// are legal manifest entries.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum EpubContentType {
    /// `application/xhtml+xml`
    Xhtml11,
    /// `application/x-dtbook+xml`
    Dtbook,
    /// `application/x-dtbncx+xml`
    DtbookNcx,
    /// `text/x-oeb1-document`
    Oeb1Document,
    /// `application/xml`
    Xml,
    /// `text/css`
    Css,
    /// `text/x-oeb1-css`
    Oeb1Css,
    /// `image/gif`
    ImageGif,
    /// `image/jpeg`
    ImageJpeg,
    /// `image/png`
    ImagePng,
    /// `image/svg+xml`
    ImageSvg,
    /// `image/webp`
    ImageWebp,
    /// `font/truetype`, `font/ttf`, `application/x-font-truetype`
    FontTruetype,
    /// `font/opentype`, `font/otf`, `application/vnd.ms-opentype`
    FontOpentype,
    /// `application/font-sfnt`
    FontSfnt,
    /// `application/font-woff`, `font/woff`
    FontWoff,
    /// `font/woff2`
    FontWoff2,
    /// `application/smil+xml`
    Smil,
    /// `text/javascript`, `application/javascript`, `application/ecmascript`
    Script,
    /// `audio/mpeg`
    AudioMp3,
    /// `audio/mp4`
    AudioMp4,
    /// `audio/ogg`
    AudioOgg,
    Other,
}

impl EpubContentType {
    /// Case-insensitive classification; media type parameters (`; charset=...`) are ignored.
    pub fn from_mime_type(mime_type: &str) -> Self {
        let essence = mime_type.split(';').next().unwrap_or_default().trim();

        match essence.to_ascii_lowercase().as_str() {
            "application/xhtml+xml" => Self::Xhtml11,
            "application/x-dtbook+xml" => Self::Dtbook,
            "application/x-dtbncx+xml" => Self::DtbookNcx,
            "text/x-oeb1-document" => Self::Oeb1Document,
            "application/xml" => Self::Xml,
            "text/css" => Self::Css,
            "text/x-oeb1-css" => Self::Oeb1Css,
            "image/gif" => Self::ImageGif,
            "image/jpeg" => Self::ImageJpeg,
            "image/png" => Self::ImagePng,
            "image/svg+xml" => Self::ImageSvg,
            "image/webp" => Self::ImageWebp,
            "font/truetype" | "font/ttf" | "application/x-font-truetype" => Self::FontTruetype,
            "font/opentype" | "font/otf" | "application/vnd.ms-opentype" => Self::FontOpentype,
            "application/font-sfnt" => Self::FontSfnt,
            "application/font-woff" | "font/woff" => Self::FontWoff,
            "font/woff2" => Self::FontWoff2,
            "application/smil+xml" => Self::Smil,
            "text/javascript" | "application/javascript" | "application/ecmascript" => Self::Script,
            "audio/mpeg" => Self::AudioMp3,
            "audio/mp4" => Self::AudioMp4,
            "audio/ogg" => Self::AudioOgg,
            _ => Self::Other,
        }
    }

    /// Text content is decoded into a [`String`]; everything else stays raw bytes.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Self::Xhtml11
                | Self::Dtbook
                | Self::DtbookNcx
                | Self::Oeb1Document
                | Self::Xml
                | Self::Css
                | Self::Oeb1Css
                | Self::Smil
                | Self::Script
        )
    }

    pub fn is_html(self) -> bool {
        matches!(self, Self::Xhtml11)
    }

    pub fn is_css(self) -> bool {
        matches!(self, Self::Css)
    }

    pub fn is_image(self) -> bool {
        matches!(
            self,
            Self::ImageGif | Self::ImageJpeg | Self::ImagePng | Self::ImageSvg | Self::ImageWebp
        )
    }

    pub fn is_font(self) -> bool {
        matches!(
            self,
            Self::FontTruetype
                | Self::FontOpentype
                | Self::FontSfnt
                | Self::FontWoff
                | Self::FontWoff2
        )
    }

    pub fn is_audio(self) -> bool {
        matches!(self, Self::AudioMp3 | Self::AudioMp4 | Self::AudioOgg)
    }
}

impl Display for EpubContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Where a content file lives.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum EpubContentLocation {
    /// Inside the EPUB archive.
    Local,
    /// At an absolute URL.
    Remote,
}
