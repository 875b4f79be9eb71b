use crate::errors::{EpubError, NavigationError, PackageError};
use crate::parser::consts::{EPUB_PREFIX, OPS_NAMESPACE};
use crate::parser::xml::XmlElement;
use crate::parser::{EpubParser, ParserResult, owned};
use crate::schema::{
    EpubManifest, EpubManifestProperty, EpubNav, EpubNavAnchor, EpubNavDocument, EpubNavLi,
    EpubNavLiContent, EpubNavOl, EpubNavSpan, EpubNavType, EpubVersion,
};
use crate::util::uri;

const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

impl EpubParser<'_> {
    /// Parses the EPUB 3 navigation document; [`None`] for EPUB 2 packages.
    pub(super) fn parse_nav(
        &self,
        manifest: &EpubManifest,
        content_directory: &str,
        version: EpubVersion,
    ) -> ParserResult<Option<EpubNavDocument>> {
        if !version.is_epub3() {
            return Ok(None);
        }
        let Some(item) = manifest.by_property(&EpubManifestProperty::Nav) else {
            if self.options.ignore_missing_toc {
                log::warn!("Manifest has no `nav` item; proceeding without a navigation document");
                return Ok(None);
            }
            return Err(NavigationError::NoNavItem.into());
        };
        if uri::is_remote(&item.href) {
            return Err(PackageError::RemoteNavigationFile(item.href.clone()).into());
        }

        let file_path = uri::combine(content_directory, &item.href).into_owned();
        let html = self.read_navigation_document(&file_path)?;
        let parser = NavParser { file: &file_path };
        let body = Self::mandatory(html.child("body"), || NavigationError::MissingElement {
            file: file_path.clone(),
            element: "html > body",
        })?;

        let navs = body
            .descendants_named("nav")
            .into_iter()
            .enumerate()
            .map(|(index, nav)| parser.parse_nav(nav, &format!("nav[{}]", index + 1)))
            .collect::<ParserResult<_>>()?;

        Ok(Some(EpubNavDocument { file_path, navs }))
    }
}

struct NavParser<'a> {
    file: &'a str,
}

impl NavParser<'_> {
    fn parse_nav(&self, nav: &XmlElement, path: &str) -> ParserResult<EpubNav> {
        Ok(EpubNav {
            nav_type: EpubNavType::parse(epub_type(nav).unwrap_or_default()),
            is_hidden: is_hidden(nav),
            head: nav
                .elements()
                .find(|el| HEADINGS.iter().any(|heading| el.is_local_name(heading)))
                .map(XmlElement::text),
            ol: nav
                .child("ol")
                .map(|ol| self.parse_ol(ol, &format!("{path} > ol")))
                .transpose()?,
        })
    }

    /// Recursion depth is bounded by the XML nesting limit.
    fn parse_ol(&self, ol: &XmlElement, path: &str) -> ParserResult<EpubNavOl> {
        let items = ol
            .children_named("li")
            .enumerate()
            .map(|(index, li)| self.parse_li(li, &format!("{path} > li[{}]", index + 1)))
            .collect::<ParserResult<_>>()?;

        Ok(EpubNavOl {
            is_hidden: is_hidden(ol),
            items,
        })
    }

    fn parse_li(&self, li: &XmlElement, path: &str) -> ParserResult<EpubNavLi> {
        let content = if let Some(anchor) = li.child("a") {
            EpubNavLiContent::Anchor(EpubNavAnchor {
                href: owned(anchor.non_blank_attribute("href")),
                text: anchor.text(),
                title: owned(anchor.non_blank_attribute("title")),
                alt: owned(anchor.non_blank_attribute("alt")),
                epub_type: owned(epub_type(anchor)),
            })
        } else if let Some(span) = li.child("span") {
            EpubNavLiContent::Span(EpubNavSpan {
                text: span.text(),
                title: owned(span.non_blank_attribute("title")),
                alt: owned(span.non_blank_attribute("alt")),
            })
        } else {
            return Err(EpubError::from(NavigationError::InvalidListItem {
                file: self.file.to_owned(),
                path: path.to_owned(),
            }));
        };

        Ok(EpubNavLi {
            content,
            child_ol: li
                .child("ol")
                .map(|ol| self.parse_ol(ol, &format!("{path} > ol")))
                .transpose()?,
        })
    }
}

fn epub_type(el: &XmlElement) -> Option<&str> {
    el.attribute_ns(OPS_NAMESPACE, EPUB_PREFIX, "type")
}

fn is_hidden(el: &XmlElement) -> bool {
    el.attribute("hidden").is_some()
}
