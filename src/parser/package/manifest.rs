use crate::errors::PackageError;
use crate::parser::xml::XmlElement;
use crate::parser::{EpubParser, ParserResult, owned};
use crate::schema::{EpubManifest, EpubManifestItem, EpubManifestProperty};
use crate::util::uri;
use std::collections::HashSet;

impl EpubParser<'_> {
    pub(super) fn parse_manifest(&self, manifest: &XmlElement) -> ParserResult<EpubManifest> {
        let mut items = Vec::new();
        let mut ids = HashSet::new();

        for item in manifest.children_named("item") {
            let Some(item) = self.parse_manifest_item(item)? else {
                continue;
            };
            if !ids.insert(item.id.clone()) {
                return Err(PackageError::DuplicateItemId(item.id).into());
            }
            items.push(item);
        }

        Ok(EpubManifest {
            id: owned(manifest.non_blank_attribute("id")),
            items,
        })
    }

    /// Returns [`None`] for an invalid item dropped through
    /// [`EpubReaderOptions::skip_invalid_manifest_items`](crate::EpubReaderOptions::skip_invalid_manifest_items).
    fn parse_manifest_item(&self, item: &XmlElement) -> ParserResult<Option<EpubManifestItem>> {
        // Required fields
        let id = item.non_blank_attribute("id");
        let href = item.non_blank_attribute("href");
        let media_type = item.non_blank_attribute("media-type");

        let (Some(id), Some(href), Some(media_type)) = (id, href, media_type) else {
            let missing = if id.is_none() {
                "manifest > item[*id]"
            } else if href.is_none() {
                "manifest > item[*href]"
            } else {
                "manifest > item[*media-type]"
            };

            if self.options.skip_invalid_manifest_items {
                log::warn!("Skipping invalid manifest item; required attribute missing: {missing}");
                return Ok(None);
            }
            return Err(PackageError::MissingAttribute(missing.to_owned()).into());
        };

        // Optional fields
        Ok(Some(EpubManifestItem {
            id: id.to_owned(),
            href: uri::decode(href).into_owned(),
            media_type: media_type.to_owned(),
            media_overlay: owned(item.non_blank_attribute("media-overlay")),
            required_namespace: owned(item.non_blank_attribute("required-namespace")),
            required_modules: owned(item.non_blank_attribute("required-modules")),
            fallback: owned(item.non_blank_attribute("fallback")),
            fallback_style: owned(item.non_blank_attribute("fallback-style")),
            properties: item
                .attribute("properties")
                .map(EpubManifestProperty::parse_list)
                .unwrap_or_default(),
        }))
    }
}
