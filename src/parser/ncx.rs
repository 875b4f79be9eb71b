use crate::errors::NavigationError;
use crate::parser::xml::XmlElement;
use crate::parser::{EpubParser, ParserResult, owned};
use crate::schema::{
    EpubManifest, EpubNcx, EpubNcxContent, EpubNcxHeadMeta, EpubNcxLabel, EpubNcxNavList,
    EpubNcxNavMap, EpubNcxNavPoint, EpubNcxNavTarget, EpubNcxPageList, EpubNcxPageTarget,
    EpubNcxPageTargetType,
};
use crate::util::uri;

impl EpubParser<'_> {
    /// Parses the NCX document referenced by the spine `toc` id.
    pub(super) fn parse_ncx(
        &self,
        manifest: &EpubManifest,
        content_directory: &str,
        toc_id: &str,
    ) -> ParserResult<EpubNcx> {
        let item = Self::mandatory(
            manifest
                .items
                .iter()
                .find(|item| item.id.eq_ignore_ascii_case(toc_id)),
            || NavigationError::NoTocItem(toc_id.to_owned()),
        )?;
        let file_path = uri::combine(content_directory, &item.href).into_owned();
        let ncx = self.read_navigation_document(&file_path)?;
        let parser = NcxParser { file: &file_path };

        if !ncx.is_local_name("ncx") {
            return Err(parser.missing_element("ncx"));
        }
        let head = Self::mandatory(ncx.child("head"), || parser.missing_element("ncx > head"))?;
        let nav_map = Self::mandatory(ncx.child("navMap"), || {
            parser.missing_element("ncx > navMap")
        })?;

        Ok(EpubNcx {
            head: parser.parse_head(head)?,
            doc_title: ncx
                .child("docTitle")
                .and_then(|title| title.child("text"))
                .map(XmlElement::text),
            doc_authors: ncx
                .children_named("docAuthor")
                .filter_map(|author| author.child("text"))
                .map(XmlElement::text)
                .collect(),
            nav_map: EpubNcxNavMap {
                labels: parser.parse_labels(nav_map, "navLabel", "navMap")?,
                points: nav_map
                    .children_named("navPoint")
                    .map(|point| parser.parse_nav_point(point))
                    .collect::<ParserResult<_>>()?,
            },
            page_list: ncx
                .child("pageList")
                .map(|page_list| parser.parse_page_list(page_list))
                .transpose()?,
            nav_lists: ncx
                .children_named("navList")
                .map(|nav_list| parser.parse_nav_list(nav_list))
                .collect::<ParserResult<_>>()?,
            file_path,
        })
    }
}

struct NcxParser<'a> {
    file: &'a str,
}

impl NcxParser<'_> {
    fn parse_head(&self, head: &XmlElement) -> ParserResult<Vec<EpubNcxHeadMeta>> {
        head.children_named("meta")
            .map(|meta| {
                Ok(EpubNcxHeadMeta {
                    name: self.require(meta.attribute("name"), "ncx > head > meta[*name]")?,
                    content: self
                        .require(meta.attribute("content"), "ncx > head > meta[*content]")?,
                    scheme: owned(meta.non_blank_attribute("scheme")),
                })
            })
            .collect()
    }

    /// Recursion depth is bounded by the XML nesting limit.
    fn parse_nav_point(&self, point: &XmlElement) -> ParserResult<EpubNcxNavPoint> {
        let id = self.require(point.non_blank_attribute("id"), "navPoint[*id]")?;
        let labels = self.parse_labels(point, "navLabel", &format!("navPoint[id={id}]"))?;

        if labels.is_empty() {
            return Err(self.missing_value(format!("navPoint[id={id}] > navLabel")));
        }
        let content = self.require_content(point, &format!("navPoint[id={id}]"))?;
        let children = point
            .children_named("navPoint")
            .map(|child| self.parse_nav_point(child))
            .collect::<ParserResult<_>>()?;

        Ok(EpubNcxNavPoint {
            class: owned(point.non_blank_attribute("class")),
            play_order: owned(point.non_blank_attribute("playOrder")),
            id,
            labels,
            content,
            children,
        })
    }

    fn parse_page_list(&self, page_list: &XmlElement) -> ParserResult<EpubNcxPageList> {
        let targets = page_list
            .children_named("pageTarget")
            .map(|target| {
                let id = self.require(target.non_blank_attribute("id"), "pageTarget[*id]")?;
                let path = format!("pageTarget[id={id}]");
                let raw_type = self.require(target.attribute("type"), &format!("{path}[*type]"))?;
                let target_type = EpubNcxPageTargetType::parse(&raw_type).ok_or_else(|| {
                    NavigationError::InvalidPageTargetType {
                        file: self.file.to_owned(),
                        value: raw_type,
                    }
                })?;
                let labels = self.parse_required_labels(target, &path)?;

                Ok(EpubNcxPageTarget {
                    value: owned(target.non_blank_attribute("value")),
                    target_type,
                    class: owned(target.non_blank_attribute("class")),
                    play_order: owned(target.non_blank_attribute("playOrder")),
                    content: self.parse_optional_content(target, &path)?,
                    labels,
                    id,
                })
            })
            .collect::<ParserResult<_>>()?;

        Ok(EpubNcxPageList {
            id: owned(page_list.non_blank_attribute("id")),
            class: owned(page_list.non_blank_attribute("class")),
            infos: self.parse_labels(page_list, "navInfo", "pageList")?,
            labels: self.parse_labels(page_list, "navLabel", "pageList")?,
            targets,
        })
    }

    fn parse_nav_list(&self, nav_list: &XmlElement) -> ParserResult<EpubNcxNavList> {
        let labels = self.parse_required_labels(nav_list, "navList")?;
        let targets = nav_list
            .children_named("navTarget")
            .map(|target| {
                let id = self.require(target.non_blank_attribute("id"), "navTarget[*id]")?;
                let path = format!("navTarget[id={id}]");

                Ok(EpubNcxNavTarget {
                    value: owned(target.non_blank_attribute("value")),
                    class: owned(target.non_blank_attribute("class")),
                    play_order: owned(target.non_blank_attribute("playOrder")),
                    labels: self.parse_required_labels(target, &path)?,
                    content: self.parse_optional_content(target, &path)?,
                    id,
                })
            })
            .collect::<ParserResult<_>>()?;

        Ok(EpubNcxNavList {
            id: owned(nav_list.non_blank_attribute("id")),
            class: owned(nav_list.non_blank_attribute("class")),
            infos: self.parse_labels(nav_list, "navInfo", "navList")?,
            labels,
            targets,
        })
    }

    /// `navLabel` or `navInfo` children, each requiring a `text` element.
    fn parse_labels(
        &self,
        parent: &XmlElement,
        name: &'static str,
        path: &str,
    ) -> ParserResult<Vec<EpubNcxLabel>> {
        parent
            .children_named(name)
            .map(|label| {
                label
                    .child("text")
                    .map(|text| EpubNcxLabel { text: text.text() })
                    .ok_or_else(|| self.missing_value(format!("{path} > {name} > text")))
            })
            .collect()
    }

    fn parse_required_labels(
        &self,
        parent: &XmlElement,
        path: &str,
    ) -> ParserResult<Vec<EpubNcxLabel>> {
        let labels = self.parse_labels(parent, "navLabel", path)?;

        if labels.is_empty() {
            Err(self.missing_value(format!("{path} > navLabel")))
        } else {
            Ok(labels)
        }
    }

    fn require_content(&self, parent: &XmlElement, path: &str) -> ParserResult<EpubNcxContent> {
        self.parse_optional_content(parent, path)?
            .ok_or_else(|| self.missing_value(format!("{path} > content")))
    }

    fn parse_optional_content(
        &self,
        parent: &XmlElement,
        path: &str,
    ) -> ParserResult<Option<EpubNcxContent>> {
        parent
            .child("content")
            .map(|content| {
                Ok(EpubNcxContent {
                    id: owned(content.non_blank_attribute("id")),
                    source: self.require(
                        content.non_blank_attribute("src"),
                        &format!("{path} > content[*src]"),
                    )?,
                })
            })
            .transpose()
    }

    fn require(&self, value: Option<&str>, path: &str) -> ParserResult<String> {
        value
            .map(str::to_owned)
            .ok_or_else(|| self.missing_value(path.to_owned()))
    }

    fn missing_value(&self, path: String) -> crate::errors::EpubError {
        NavigationError::MissingValue {
            file: self.file.to_owned(),
            path,
        }
        .into()
    }

    fn missing_element(&self, element: &'static str) -> crate::errors::EpubError {
        NavigationError::MissingElement {
            file: self.file.to_owned(),
            element,
        }
        .into()
    }
}
