//! Builds the content model from the manifest of a parsed [`EpubSchema`].
//!
//! [`describe`] classifies every manifest item without I/O; [`read_content`]
//! then materializes each file, while [`reference_content`] wraps each in a loader.

use crate::archive::ArchiveHandle;
use crate::content::loader::{self, LocalContentLoader, RemoteContentLoader};
use crate::content::{
    ContentModel, EpubContent, EpubContentCollection, EpubContentData, EpubContentRef,
    EpubContentType, EpubLocalContent, EpubLocalContentFile, EpubRemoteContent,
    EpubRemoteContentFile, Materialized, Referenced,
};
use crate::download::ContentDownloader;
use crate::errors::{EpubResult, PackageError};
use crate::schema::{EpubManifestItem, EpubManifestProperty, EpubSchema};
use crate::util::uri;
use std::sync::Arc;

/// Identity of a manifest item before its payload is attached.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ContentDescriptor {
    key: String,
    content_type: EpubContentType,
    mime_type: String,
    location: Location,
}

#[derive(Clone, Debug, PartialEq)]
enum Location {
    /// Absolute archive path.
    Local(String),
    Url(String),
}

impl Location {
    fn into_inner(self) -> String {
        match self {
            Self::Local(path) | Self::Url(path) => path,
        }
    }
}

enum Payload<M: ContentModel> {
    LocalText(M::LocalText),
    LocalBytes(M::LocalBytes),
    RemoteText(M::RemoteText),
    RemoteBytes(M::RemoteBytes),
}

pub(crate) fn describe(schema: &EpubSchema) -> Vec<ContentDescriptor> {
    schema
        .package
        .manifest
        .items
        .iter()
        .map(|item| ContentDescriptor {
            key: item.href.clone(),
            content_type: EpubContentType::from_mime_type(&item.media_type),
            mime_type: item.media_type.clone(),
            location: if uri::is_remote(&item.href) {
                Location::Url(item.href.clone())
            } else {
                Location::Local(
                    uri::combine(&schema.content_directory_path, &item.href).into_owned(),
                )
            },
        })
        .collect()
}

/// Reads every local file and, with a downloader, every remote file.
pub(crate) async fn read_content(
    schema: &EpubSchema,
    archive: &ArchiveHandle,
    downloader: Option<&dyn ContentDownloader>,
) -> EpubResult<EpubContent> {
    let mut files = Vec::new();

    for descriptor in describe(schema) {
        let is_text = descriptor.content_type.is_text();
        let payload = match (&descriptor.location, downloader) {
            (Location::Local(path), _) if is_text => Payload::LocalText(archive.read_str(path)?),
            (Location::Local(path), _) => Payload::LocalBytes(archive.read_bytes(path)?),
            (Location::Url(url), Some(downloader)) if is_text => {
                Payload::RemoteText(Some(loader::download_text(downloader, url).await?))
            }
            (Location::Url(url), Some(downloader)) => {
                Payload::RemoteBytes(Some(loader::download_bytes(downloader, url).await?))
            }
            (Location::Url(_), None) if is_text => Payload::RemoteText(None),
            (Location::Url(_), None) => Payload::RemoteBytes(None),
        };
        files.push((descriptor, payload));
    }

    let content = assemble::<Materialized>(schema, files)?;
    log::debug!("Read {} content files", content.all_files.len());
    Ok(content)
}

/// Wraps every file in a loader; nothing is read from the archive.
pub(crate) fn reference_content(
    schema: &EpubSchema,
    archive: &Arc<ArchiveHandle>,
    downloader: Option<Arc<dyn ContentDownloader>>,
) -> EpubResult<EpubContentRef> {
    let files = describe(schema)
        .into_iter()
        .map(|descriptor| {
            let is_text = descriptor.content_type.is_text();
            let payload = match &descriptor.location {
                Location::Local(path) if is_text => {
                    Payload::LocalText(LocalContentLoader::new(Arc::clone(archive), path.clone()))
                }
                Location::Local(path) => {
                    Payload::LocalBytes(LocalContentLoader::new(Arc::clone(archive), path.clone()))
                }
                Location::Url(url) if is_text => {
                    Payload::RemoteText(RemoteContentLoader::new(url.clone(), downloader.clone()))
                }
                Location::Url(url) => {
                    Payload::RemoteBytes(RemoteContentLoader::new(url.clone(), downloader.clone()))
                }
            };
            (descriptor, payload)
        })
        .collect();

    let content = assemble::<Referenced>(schema, files)?;
    log::debug!("Referenced {} content files", content.all_files.len());
    Ok(content)
}

struct Partition<L, R> {
    local: Vec<L>,
    remote: Vec<R>,
}

impl<L, R> Default for Partition<L, R> {
    fn default() -> Self {
        Self {
            local: Vec::new(),
            remote: Vec::new(),
        }
    }
}

impl<L, R> Partition<L, R> {
    fn into_collection(self) -> EpubResult<EpubContentCollection<L, R>>
    where
        L: crate::content::LocalContent,
        R: crate::content::RemoteContent,
    {
        EpubContentCollection::new(self.local, self.remote)
    }
}

fn assemble<M: ContentModel>(
    schema: &EpubSchema,
    files: Vec<(ContentDescriptor, Payload<M>)>,
) -> EpubResult<EpubContentData<M>> {
    let mut html = Partition::default();
    let mut css = Partition::default();
    let mut images = Partition::default();
    let mut fonts = Partition::default();
    let mut audio = Partition::default();
    let mut all_files = Partition::default();

    for (descriptor, payload) in files {
        let ContentDescriptor {
            key,
            content_type,
            mime_type,
            location,
        } = descriptor;
        let text_target = match content_type {
            t if t.is_html() => Some(&mut html),
            t if t.is_css() => Some(&mut css),
            _ => None,
        };
        let byte_target = match content_type {
            t if t.is_image() => Some(&mut images),
            t if t.is_font() => Some(&mut fonts),
            t if t.is_audio() => Some(&mut audio),
            _ => None,
        };

        // Payloads are always built from their own descriptor's location
        let location = location.into_inner();

        match payload {
            Payload::LocalText(content) => {
                let file = Arc::new(EpubLocalContentFile {
                    key,
                    content_type,
                    content_mime_type: mime_type,
                    file_path: location,
                    content,
                });
                if let Some(target) = text_target {
                    target.local.push(Arc::clone(&file));
                }
                all_files.local.push(EpubLocalContent::Text(file));
            }
            Payload::LocalBytes(content) => {
                let file = Arc::new(EpubLocalContentFile {
                    key,
                    content_type,
                    content_mime_type: mime_type,
                    file_path: location,
                    content,
                });
                if let Some(target) = byte_target {
                    target.local.push(Arc::clone(&file));
                }
                all_files.local.push(EpubLocalContent::Bytes(file));
            }
            Payload::RemoteText(content) => {
                let file = Arc::new(EpubRemoteContentFile {
                    key,
                    content_type,
                    content_mime_type: mime_type,
                    url: location,
                    content,
                });
                if let Some(target) = text_target {
                    target.remote.push(Arc::clone(&file));
                }
                all_files.remote.push(EpubRemoteContent::Text(file));
            }
            Payload::RemoteBytes(content) => {
                let file = Arc::new(EpubRemoteContentFile {
                    key,
                    content_type,
                    content_mime_type: mime_type,
                    url: location,
                    content,
                });
                if let Some(target) = byte_target {
                    target.remote.push(Arc::clone(&file));
                }
                all_files.remote.push(EpubRemoteContent::Bytes(file));
            }
        }
    }

    // All files first, reporting duplicates across every media type
    let all_files = all_files.into_collection()?;
    let html = html.into_collection()?;
    let images = images.into_collection()?;

    let navigation_html_file = match schema
        .package
        .manifest
        .by_property(&EpubManifestProperty::Nav)
    {
        Some(item) if uri::is_remote(&item.href) => {
            return Err(PackageError::RemoteNavigationFile(item.href.clone()).into());
        }
        Some(item) => html.try_get_local_by_key(&item.href).cloned(),
        None => None,
    };
    let cover = match cover_item(schema)? {
        Some(item) if uri::is_remote(&item.href) => {
            return Err(PackageError::RemoteCover(item.href.clone()).into());
        }
        Some(item) => images.try_get_local_by_key(&item.href).cloned(),
        None => None,
    };

    Ok(EpubContentData {
        cover,
        navigation_html_file,
        html,
        css: css.into_collection()?,
        images,
        fonts: fonts.into_collection()?,
        audio: audio.into_collection()?,
        all_files,
    })
}

/// The EPUB 3 `cover-image` item, else the item referenced by the EPUB 2 cover `meta`.
fn cover_item(schema: &EpubSchema) -> EpubResult<Option<&EpubManifestItem>> {
    let manifest = &schema.package.manifest;

    if let Some(item) = manifest.by_property(&EpubManifestProperty::CoverImage) {
        return Ok(Some(item));
    }
    match schema.package.metadata.epub2_cover_id() {
        Some(id) => manifest
            .by_id(id)
            .map(Some)
            .ok_or_else(|| PackageError::MissingCoverItem(id.to_owned()).into()),
        None => Ok(None),
    }
}
