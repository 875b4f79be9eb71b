mod container;
mod nav;
mod ncx;
mod package;
mod schema;
pub(crate) mod xml;

use crate::archive::ArchiveHandle;
use crate::errors::{ArchiveError, EpubError, EpubResult, NavigationError};
use crate::options::EpubReaderOptions;
use crate::parser::xml::XmlElement;

pub(crate) type ParserResult<T> = EpubResult<T>;

pub(crate) mod consts {
    pub(crate) const CONTAINER: &str = "META-INF/container.xml";
    pub(crate) const PACKAGE_MEDIA_TYPE: &str = "application/oebps-package+xml";
    pub(crate) const OPS_NAMESPACE: &str = "http://www.idpf.org/2007/ops";
    pub(crate) const EPUB_PREFIX: &str = "epub";
}

/// Runs the sub-parsers over a single archive, producing an
/// [`EpubSchema`](crate::schema::EpubSchema).
pub(crate) struct EpubParser<'a> {
    options: &'a EpubReaderOptions,
    archive: &'a ArchiveHandle,
}

impl<'a> EpubParser<'a> {
    pub(crate) fn new(options: &'a EpubReaderOptions, archive: &'a ArchiveHandle) -> Self {
        Self { options, archive }
    }

    /// Reads and parses the XML document at `path`, returning its root element.
    fn read_document(&self, path: &str) -> ParserResult<XmlElement> {
        let data = self.archive.read_xml(path)?;
        XmlElement::parse_document(path, &data, self.options.skip_xml_headers)
    }

    /// Reads the NCX or NAV document at `path`, reporting absent or oversized
    /// entries as navigation errors.
    fn read_navigation_document(&self, path: &str) -> ParserResult<XmlElement> {
        match self.read_document(path) {
            Err(EpubError::Archive(ArchiveError::MissingEntry { .. })) => {
                Err(NavigationError::MissingFile(path.to_owned()).into())
            }
            Err(EpubError::Archive(ArchiveError::EntryTooLarge { .. })) => {
                Err(NavigationError::FileTooLarge(path.to_owned()).into())
            }
            result => result,
        }
    }

    fn mandatory<T, E: Into<EpubError>>(
        value: Option<T>,
        if_missing: impl FnOnce() -> E,
    ) -> ParserResult<T> {
        value.ok_or_else(|| if_missing().into())
    }
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_owned)
}
