use crate::parser::{EpubParser, ParserResult};
use crate::schema::EpubSchema;
use crate::util::uri;

impl EpubParser<'_> {
    /// Runs the container, package, NCX and NAV parsers in order.
    pub(crate) fn parse_schema(&self) -> ParserResult<EpubSchema> {
        let package_path = self.parse_container()?;
        let content_directory_path = uri::parent(&package_path).to_owned();
        let package = self.parse_package(&package_path)?;

        log::debug!(
            "Parsed EPUB {} package `{package_path}` ({} manifest items, {} spine items)",
            package.version,
            package.manifest.items.len(),
            package.spine.items.len(),
        );

        let epub2_ncx = package
            .spine
            .toc
            .as_deref()
            .map(|toc| self.parse_ncx(&package.manifest, &content_directory_path, toc))
            .transpose()?;
        let epub3_nav_document =
            self.parse_nav(&package.manifest, &content_directory_path, package.version)?;

        log::debug!(
            "Assembled schema (ncx: {}, nav: {})",
            epub2_ncx.is_some(),
            epub3_nav_document.is_some(),
        );

        Ok(EpubSchema {
            package,
            epub2_ncx,
            epub3_nav_document,
            content_directory_path,
        })
    }
}
