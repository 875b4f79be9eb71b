use crate::errors::PackageError;
use crate::parser::xml::XmlElement;
use crate::parser::{EpubParser, ParserResult, owned};
use crate::schema::{
    EpubSpine, EpubSpineItemRef, EpubSpineProperty, EpubVersion, PageProgressionDirection,
};

impl EpubParser<'_> {
    pub(super) fn parse_spine(
        &self,
        spine: &XmlElement,
        version: EpubVersion,
    ) -> ParserResult<EpubSpine> {
        let toc = owned(spine.non_blank_attribute("toc"));

        // The NCX reference is mandatory in EPUB 2 only
        if version.is_epub2() && toc.is_none() {
            if !self.options.ignore_missing_toc {
                return Err(PackageError::MissingSpineToc.into());
            }
            log::warn!("EPUB 2 spine has no `toc` attribute; proceeding without navigation");
        }

        let items = spine
            .children_named("itemref")
            .map(|itemref| {
                let idref = Self::mandatory(itemref.non_blank_attribute("idref"), || {
                    PackageError::MissingAttribute("spine > itemref[*idref]".to_owned())
                })?;

                Ok(EpubSpineItemRef {
                    id: owned(itemref.non_blank_attribute("id")),
                    idref: idref.to_owned(),
                    is_linear: !itemref
                        .attribute("linear")
                        .is_some_and(|linear| linear.trim().eq_ignore_ascii_case("no")),
                    properties: itemref
                        .attribute("properties")
                        .map(EpubSpineProperty::parse_list)
                        .unwrap_or_default(),
                })
            })
            .collect::<ParserResult<Vec<_>>>()?;

        Ok(EpubSpine {
            id: owned(spine.non_blank_attribute("id")),
            page_progression_direction: spine
                .attribute("page-progression-direction")
                .and_then(PageProgressionDirection::parse),
            toc,
            items,
        })
    }
}
