mod collection;
mod guide;
mod manifest;
mod metadata;
mod spine;

use crate::errors::PackageError;
use crate::parser::{EpubParser, ParserResult, owned};
use crate::schema::{EpubPackage, EpubVersion, TextDirection};

impl EpubParser<'_> {
    /// Parses the OPF package document at `package_path`.
    pub(super) fn parse_package(&self, package_path: &str) -> ParserResult<EpubPackage> {
        let package = self.read_document(package_path)?;

        if !package.is_local_name("package") {
            let path = package_path.to_owned();
            return Err(PackageError::NoPackageElement(path).into());
        }

        let raw_version = Self::mandatory(package.non_blank_attribute("version"), || {
            PackageError::MissingVersion
        })?;
        let version = EpubVersion::parse(raw_version);
        if version == EpubVersion::Unknown {
            let raw = raw_version.to_owned();
            return Err(PackageError::UnsupportedVersion(raw).into());
        }

        let metadata = self.parse_metadata(Self::mandatory(package.child("metadata"), || {
            PackageError::NoMetadata
        })?)?;
        let manifest = self.parse_manifest(Self::mandatory(package.child("manifest"), || {
            PackageError::NoManifest
        })?)?;
        let spine = self.parse_spine(
            Self::mandatory(package.child("spine"), || PackageError::NoSpine)?,
            version,
        )?;
        let guide = package
            .child("guide")
            .map(|guide| self.parse_guide(guide))
            .transpose()?;
        let collections = package
            .children_named("collection")
            .map(|collection| self.parse_collection(collection))
            .collect::<ParserResult<Vec<_>>>()?;

        Ok(EpubPackage {
            unique_identifier: owned(package.non_blank_attribute("unique-identifier")),
            version,
            id: owned(package.non_blank_attribute("id")),
            dir: package.attribute("dir").and_then(TextDirection::parse),
            lang: owned(package.non_blank_attribute("lang")),
            prefix: owned(package.non_blank_attribute("prefix")),
            metadata,
            manifest,
            spine,
            guide,
            collections,
        })
    }
}
