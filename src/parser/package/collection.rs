use crate::errors::PackageError;
use crate::parser::xml::XmlElement;
use crate::parser::{EpubParser, ParserResult, owned};
use crate::schema::{EpubCollection, TextDirection};

impl EpubParser<'_> {
    /// Recursion depth is bounded by the XML nesting limit.
    pub(super) fn parse_collection(&self, collection: &XmlElement) -> ParserResult<EpubCollection> {
        let role = Self::mandatory(collection.non_blank_attribute("role"), || {
            PackageError::MissingAttribute("collection[*role]".to_owned())
        })?;
        let metadata = collection
            .child("metadata")
            .map(|metadata| self.parse_metadata(metadata))
            .transpose()?;
        let links = collection
            .children_named("link")
            .map(|link| self.parse_metadata_link(link, "collection > link[*href]"))
            .collect::<ParserResult<Vec<_>>>()?;
        let nested_collections = collection
            .children_named("collection")
            .map(|nested| self.parse_collection(nested))
            .collect::<ParserResult<Vec<_>>>()?;

        Ok(EpubCollection {
            role: role.to_owned(),
            id: owned(collection.non_blank_attribute("id")),
            dir: collection.attribute("dir").and_then(TextDirection::parse),
            lang: owned(collection.non_blank_attribute("lang")),
            metadata,
            links,
            nested_collections,
        })
    }
}
