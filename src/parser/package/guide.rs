use crate::errors::PackageError;
use crate::parser::xml::XmlElement;
use crate::parser::{EpubParser, ParserResult, owned};
use crate::schema::{EpubGuide, EpubGuideReference};

impl EpubParser<'_> {
    pub(super) fn parse_guide(&self, guide: &XmlElement) -> ParserResult<EpubGuide> {
        let references = guide
            .children_named("reference")
            .map(|reference| {
                let reference_type = Self::mandatory(reference.non_blank_attribute("type"), || {
                    PackageError::MissingAttribute("guide > reference[*type]".to_owned())
                })?;
                let href = Self::mandatory(reference.non_blank_attribute("href"), || {
                    PackageError::MissingAttribute("guide > reference[*href]".to_owned())
                })?;

                Ok(EpubGuideReference {
                    reference_type: reference_type.to_owned(),
                    title: owned(reference.non_blank_attribute("title")),
                    href: href.to_owned(),
                })
            })
            .collect::<ParserResult<Vec<_>>>()?;

        Ok(EpubGuide { references })
    }
}
