use crate::errors::PackageError;
use crate::parser::xml::XmlElement;
use crate::parser::{EpubParser, ParserResult, owned};
use crate::schema::{
    EpubMetadata, EpubMetadataCreator, EpubMetadataDate, EpubMetadataIdentifier, EpubMetadataLink,
    EpubMetadataMeta, EpubMetadataText, TextDirection,
};

impl EpubParser<'_> {
    pub(super) fn parse_metadata(&self, metadata: &XmlElement) -> ParserResult<EpubMetadata> {
        let mut data = EpubMetadata::default();
        self.parse_metadata_into(metadata, &mut data)?;
        Ok(data)
    }

    fn parse_metadata_into(
        &self,
        metadata: &XmlElement,
        data: &mut EpubMetadata,
    ) -> ParserResult<()> {
        for el in metadata.elements() {
            match el.local_name().to_ascii_lowercase().as_str() {
                // Legacy OEBPS 1.2 grouping
                "dc-metadata" | "x-metadata" => self.parse_metadata_into(el, data)?,
                "title" => data.titles.push(text_item(el)),
                "creator" => data.creators.push(creator_item(el)),
                "subject" => data.subjects.push(text_item(el)),
                "description" => data.descriptions.push(text_item(el)),
                "publisher" => data.publishers.push(text_item(el)),
                "contributor" => data.contributors.push(creator_item(el)),
                "date" => data.dates.push(EpubMetadataDate {
                    text: el.text(),
                    id: owned(el.non_blank_attribute("id")),
                    event: owned(el.non_blank_attribute("event")),
                }),
                "type" => data.types.push(text_item(el)),
                "format" => data.formats.push(text_item(el)),
                "identifier" => data.identifiers.push(EpubMetadataIdentifier {
                    text: el.text(),
                    id: owned(el.non_blank_attribute("id")),
                    scheme: owned(el.non_blank_attribute("scheme")),
                }),
                "source" => data.sources.push(text_item(el)),
                "language" => data.languages.push(text_item(el)),
                "relation" => data.relations.push(text_item(el)),
                "coverage" => data.coverages.push(text_item(el)),
                "rights" => data.rights.push(text_item(el)),
                "link" => {
                    let link = self.parse_metadata_link(el, "metadata > link[*href]")?;
                    data.links.push(link);
                }
                "meta" => data.metas.push(EpubMetadataMeta {
                    name: owned(el.non_blank_attribute("name")),
                    content: owned(el.attribute("content")),
                    id: owned(el.non_blank_attribute("id")),
                    property: owned(el.non_blank_attribute("property")),
                    refines: owned(el.non_blank_attribute("refines")),
                    scheme: owned(el.non_blank_attribute("scheme")),
                    dir: dir(el),
                    lang: owned(el.non_blank_attribute("lang")),
                    text: el.text(),
                }),
                // Forward-compatible: unknown elements are ignored
                _ => {}
            }
        }
        Ok(())
    }

    pub(super) fn parse_metadata_link(
        &self,
        link: &XmlElement,
        missing_href: &str,
    ) -> ParserResult<EpubMetadataLink> {
        let href = Self::mandatory(link.non_blank_attribute("href"), || {
            PackageError::MissingAttribute(missing_href.to_owned())
        })?;
        let tokens = |name: &str| {
            link.attribute(name)
                .map(|value| value.split_whitespace().map(str::to_owned).collect())
                .unwrap_or_default()
        };

        Ok(EpubMetadataLink {
            href: href.to_owned(),
            id: owned(link.non_blank_attribute("id")),
            media_type: owned(link.non_blank_attribute("media-type")),
            hreflang: owned(link.non_blank_attribute("hreflang")),
            properties: tokens("properties"),
            refines: owned(link.non_blank_attribute("refines")),
            rel: tokens("rel"),
        })
    }
}

fn dir(el: &XmlElement) -> Option<TextDirection> {
    el.attribute("dir").and_then(TextDirection::parse)
}

fn text_item(el: &XmlElement) -> EpubMetadataText {
    EpubMetadataText {
        text: el.text(),
        id: owned(el.non_blank_attribute("id")),
        dir: dir(el),
        lang: owned(el.non_blank_attribute("lang")),
    }
}

fn creator_item(el: &XmlElement) -> EpubMetadataCreator {
    EpubMetadataCreator {
        text: el.text(),
        id: owned(el.non_blank_attribute("id")),
        file_as: owned(el.non_blank_attribute("file-as")),
        role: owned(el.non_blank_attribute("role")),
    }
}
