//! A unified navigation tree built from either the EPUB 3 NAV or the EPUB 2 NCX document.

use crate::content::{ContentModel, EpubContentData, LocalTextFile};
use crate::errors::{EpubResult, NavigationError};
use crate::schema::{EpubNavLiContent, EpubNavOl, EpubNavType, EpubNcxNavPoint, EpubSchema};
use crate::util::uri;
use std::sync::Arc;

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum EpubNavigationItemType {
    /// A non-navigable heading (a NAV `span`).
    Header,
    Link,
}

/// The resolved target of a navigation item.
#[derive(Clone, Debug, PartialEq)]
pub struct EpubNavigationItemLink {
    /// The decoded href without its anchor, as written in the navigation document.
    pub content_file_name: String,
    /// The absolute archive path of the target.
    pub content_file_path: String,
    pub anchor: Option<String>,
}

/// A node of the navigation tree.
#[derive(Clone, Debug)]
pub struct EpubNavigationItem<M: ContentModel> {
    pub item_type: EpubNavigationItemType,
    pub title: String,
    pub link: Option<EpubNavigationItemLink>,
    /// The HTML content file targeted by [`link`](Self::link), if present in the manifest.
    pub html_content_file: Option<Arc<LocalTextFile<M>>>,
    pub nested_items: Vec<EpubNavigationItem<M>>,
}

/// Builds the navigation tree, preferring the NAV `toc` over the NCX `navMap`.
///
/// Returns [`None`] when the book has neither navigation document.
pub(crate) fn build_navigation<M: ContentModel>(
    schema: &EpubSchema,
    content: &EpubContentData<M>,
    ignore_missing_content: bool,
) -> EpubResult<Option<Vec<EpubNavigationItem<M>>>> {
    if let Some(document) = &schema.epub3_nav_document {
        let builder = TreeBuilder {
            content,
            base_file: &document.file_path,
            ignore_missing_content,
        };
        let toc = document.nav(&EpubNavType::Toc);
        return match toc.and_then(|toc| toc.ol.as_ref()) {
            Some(ol) => builder.from_nav_ol(ol).map(Some),
            None => Ok(Some(Vec::new())),
        };
    }
    if let Some(ncx) = &schema.epub2_ncx {
        let builder = TreeBuilder {
            content,
            base_file: &ncx.file_path,
            ignore_missing_content,
        };
        return builder.from_nav_points(&ncx.nav_map.points).map(Some);
    }
    Ok(None)
}

struct TreeBuilder<'a, M: ContentModel> {
    content: &'a EpubContentData<M>,
    /// The navigation document; hrefs are relative to its directory.
    base_file: &'a str,
    ignore_missing_content: bool,
}

impl<M: ContentModel> TreeBuilder<'_, M> {
    fn from_nav_points(
        &self,
        points: &[EpubNcxNavPoint],
    ) -> EpubResult<Vec<EpubNavigationItem<M>>> {
        points
            .iter()
            .map(|point| {
                let (link, html_content_file) = self.resolve(&point.content.source)?;

                Ok(EpubNavigationItem {
                    item_type: EpubNavigationItemType::Link,
                    title: point
                        .labels
                        .first()
                        .map(|label| label.text.clone())
                        .unwrap_or_default(),
                    link: Some(link),
                    html_content_file,
                    nested_items: self.from_nav_points(&point.children)?,
                })
            })
            .collect()
    }

    fn from_nav_ol(&self, ol: &EpubNavOl) -> EpubResult<Vec<EpubNavigationItem<M>>> {
        ol.items
            .iter()
            .map(|li| {
                let nested_items = match &li.child_ol {
                    Some(child) => self.from_nav_ol(child)?,
                    None => Vec::new(),
                };

                Ok(match &li.content {
                    EpubNavLiContent::Anchor(anchor) => {
                        let (link, html_content_file) = match &anchor.href {
                            Some(href) => {
                                let (link, file) = self.resolve(href)?;
                                (Some(link), file)
                            }
                            None => (None, None),
                        };
                        EpubNavigationItem {
                            item_type: EpubNavigationItemType::Link,
                            title: anchor.text.clone(),
                            link,
                            html_content_file,
                            nested_items,
                        }
                    }
                    EpubNavLiContent::Span(span) => EpubNavigationItem {
                        item_type: EpubNavigationItemType::Header,
                        title: span.text.clone(),
                        link: None,
                        html_content_file: None,
                        nested_items,
                    },
                })
            })
            .collect()
    }

    /// Splits `href` into its file and anchor and looks up the targeted HTML file.
    fn resolve(
        &self,
        href: &str,
    ) -> EpubResult<(EpubNavigationItemLink, Option<Arc<LocalTextFile<M>>>)> {
        // An encoded `%23` belongs to the file name, so split before decoding
        let (encoded_name, anchor) = uri::split_anchor(href);
        let file_name = uri::decode(encoded_name);
        let content_file_path = if file_name.is_empty() {
            // `#anchor` targets the navigation document itself
            self.base_file.to_owned()
        } else {
            uri::combine(uri::parent(self.base_file), &file_name).into_owned()
        };

        let html_content_file = self
            .content
            .html
            .try_get_local_by_file_path(&content_file_path)
            .cloned();

        if html_content_file.is_none() {
            if !self.ignore_missing_content {
                return Err(NavigationError::MissingContent(content_file_path).into());
            }
            log::warn!("Navigation target `{content_file_path}` is not an HTML content file");
        }

        Ok((
            EpubNavigationItemLink {
                content_file_name: file_name.into_owned(),
                content_file_path,
                anchor: anchor.map(|anchor| uri::decode(anchor).into_owned()),
            },
            html_content_file,
        ))
    }
}
