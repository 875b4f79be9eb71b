use crate::errors::{ArchiveError, ContainerError, EpubError};
use crate::parser::consts::{CONTAINER, PACKAGE_MEDIA_TYPE};
use crate::parser::{EpubParser, ParserResult};
use crate::util::uri;

impl EpubParser<'_> {
    /// Parses `META-INF/container.xml`, returning the package document path.
    pub(super) fn parse_container(&self) -> ParserResult<String> {
        let container = match self.read_document(CONTAINER) {
            Err(EpubError::Archive(ArchiveError::MissingEntry { .. })) => {
                return Err(ContainerError::MissingContainerFile.into());
            }
            result => result?,
        };

        if !container.is_local_name("container") {
            return Err(ContainerError::NoContainerElement.into());
        }

        let rootfiles = container
            .children_named("rootfiles")
            .flat_map(|rootfiles| rootfiles.children_named("rootfile"))
            .filter_map(|rootfile| {
                rootfile
                    .non_blank_attribute("full-path")
                    .map(|path| (path, rootfile.attribute("media-type")))
            })
            .collect::<Vec<_>>();

        // Prefer the OPF rootfile when alternate renditions are declared
        let package_path = rootfiles
            .iter()
            .find(|(_, media_type)| {
                media_type.is_some_and(|kind| kind.eq_ignore_ascii_case(PACKAGE_MEDIA_TYPE))
            })
            .or_else(|| rootfiles.first())
            .map(|(path, _)| uri::normalize(&uri::decode(path)));

        let package_path = Self::mandatory(package_path, || ContainerError::NoRootFile)?;

        if !self.archive.contains(&package_path)? {
            return Err(ContainerError::MissingPackageFile(package_path).into());
        }
        Ok(package_path)
    }
}
