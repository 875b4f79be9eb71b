//! Resolution of the spine into content files.

use crate::content::{ContentModel, EpubContentData, LocalTextFile};
use crate::errors::{EpubResult, PackageError};
use crate::schema::EpubSchema;
use crate::util::uri;
use std::sync::Arc;

/// A content document in reading order.
#[derive(Clone, Debug)]
pub struct EpubReadingOrderItem<M: ContentModel> {
    /// The spine `idref`.
    pub idref: String,
    /// `false` for auxiliary content (`linear="no"`) that reading systems may skip.
    pub is_linear: bool,
    pub file: Arc<LocalTextFile<M>>,
}

/// Maps every spine `itemref` to its local HTML content file, in spine order.
///
/// Unresolvable items fail with [`PackageError::InvalidIdref`] or
/// [`PackageError::InvalidSpineItem`] unless `ignore_missing` is set,
/// in which case they are skipped.
pub(crate) fn resolve_reading_order<M: ContentModel>(
    schema: &EpubSchema,
    content: &EpubContentData<M>,
    ignore_missing: bool,
) -> EpubResult<Vec<EpubReadingOrderItem<M>>> {
    let manifest = &schema.package.manifest;
    let mut reading_order = Vec::with_capacity(schema.package.spine.items.len());

    for itemref in &schema.package.spine.items {
        let resolved = match manifest.by_id(&itemref.idref) {
            None => Err(PackageError::InvalidIdref(itemref.idref.clone())),
            Some(item) => match content.html.try_get_local_by_key(&item.href) {
                Some(file) if !uri::is_remote(&item.href) => Ok(file),
                _ => Err(PackageError::InvalidSpineItem {
                    idref: itemref.idref.clone(),
                    href: item.href.clone(),
                }),
            },
        };

        match resolved {
            Ok(file) => reading_order.push(EpubReadingOrderItem {
                idref: itemref.idref.clone(),
                is_linear: itemref.is_linear,
                file: Arc::clone(file),
            }),
            Err(error) if ignore_missing => log::warn!("Skipping spine item: {error}"),
            Err(error) => return Err(error.into()),
        }
    }
    Ok(reading_order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveHandle;
    use crate::archive::tests::MemoryArchive;
    use crate::content::resolver;
    use crate::errors::EpubError;
    use crate::schema::{
        EpubManifest, EpubManifestItem, EpubMetadata, EpubPackage, EpubSpine, EpubSpineItemRef,
        EpubVersion,
    };

    fn schema(idrefs: &[(&str, bool)]) -> EpubSchema {
        let item = |id: &str, href: &str, media_type: &str| EpubManifestItem {
            id: id.to_owned(),
            href: href.to_owned(),
            media_type: media_type.to_owned(),
            media_overlay: None,
            required_namespace: None,
            required_modules: None,
            fallback: None,
            fallback_style: None,
            properties: Vec::new(),
        };

        EpubSchema {
            package: EpubPackage {
                unique_identifier: None,
                version: EpubVersion::Epub3,
                id: None,
                dir: None,
                lang: None,
                prefix: None,
                metadata: EpubMetadata::default(),
                // Declared in a different order than the spine
                manifest: EpubManifest {
                    id: None,
                    items: vec![
                        item("c3", "c3.xhtml", "application/xhtml+xml"),
                        item("c1", "c1.xhtml", "application/xhtml+xml"),
                        item("c2", "c2.xhtml", "application/xhtml+xml"),
                        item("css", "style.css", "text/css"),
                    ],
                },
                spine: EpubSpine {
                    items: idrefs
                        .iter()
                        .map(|&(idref, is_linear)| EpubSpineItemRef {
                            id: None,
                            idref: idref.to_owned(),
                            is_linear,
                            properties: Vec::new(),
                        })
                        .collect(),
                    ..EpubSpine::default()
                },
                guide: None,
                collections: Vec::new(),
            },
            epub2_ncx: None,
            epub3_nav_document: None,
            content_directory_path: String::new(),
        }
    }

    fn resolve(idrefs: &[(&str, bool)], ignore_missing: bool) -> EpubResult<Vec<(String, bool)>> {
        let schema = schema(idrefs);
        let archive = Arc::new(ArchiveHandle::new(Box::new(MemoryArchive::new([]))));
        let content = resolver::reference_content(&schema, &archive, None)?;

        Ok(resolve_reading_order(&schema, &content, ignore_missing)?
            .into_iter()
            .map(|item| (item.file.file_path().to_owned(), item.is_linear))
            .collect())
    }

    #[test]
    fn test_spine_order() {
        let order = resolve(&[("c1", true), ("c2", false), ("c3", true)], false).unwrap();

        assert_eq!(
            vec![
                ("c1.xhtml".to_owned(), true),
                ("c2.xhtml".to_owned(), false),
                ("c3.xhtml".to_owned(), true),
            ],
            order
        );
    }

    #[test]
    fn test_unresolvable_items() {
        assert!(matches!(
            resolve(&[("c1", true), ("C2", true)], false),
            Err(EpubError::Package(PackageError::InvalidIdref(idref))) if idref == "C2"
        ));
        assert!(matches!(
            resolve(&[("css", true)], false),
            Err(EpubError::Package(PackageError::InvalidSpineItem { idref, .. })) if idref == "css"
        ));

        let order = resolve(&[("missing", true), ("c2", true), ("css", true)], true).unwrap();
        assert_eq!(vec![("c2.xhtml".to_owned(), true)], order);
    }
}
