use crate::errors::EpubError;
use crate::parser::ParserResult;
use crate::util::{StrExt, StringExt};
use quick_xml::Reader;
use quick_xml::escape;
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::str;

/// Elements nested deeper than this are rejected, bounding every recursive descent
/// over a parsed document.
pub(crate) const MAX_DEPTH: usize = 256;

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
const XMLNS: &[u8] = b"xmlns";

#[derive(Debug)]
pub(crate) enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug)]
pub(crate) struct XmlAttribute {
    namespace: Option<String>,
    prefix: Option<String>,
    local_name: String,
    value: String,
}

/// An element of a parsed XML document, holding its attributes and child nodes.
#[derive(Debug)]
pub(crate) struct XmlElement {
    local_name: String,
    attributes: Vec<XmlAttribute>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Parses `data` and returns the root element.
    ///
    /// `file` is only used for error reporting.
    /// With `skip_headers`, a leading `<?xml ...?>` declaration is discarded before parsing.
    pub(crate) fn parse_document(
        file: &str,
        data: &[u8],
        skip_headers: bool,
    ) -> ParserResult<Self> {
        let data = if skip_headers {
            skip_xml_header(data)
        } else {
            data
        };
        DocumentBuilder::new(file).build(data)
    }

    pub(crate) fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Case-insensitive local name comparison; the namespace is not considered.
    pub(crate) fn is_local_name(&self, local_name: &str) -> bool {
        self.local_name.eq_ignore_ascii_case(local_name)
    }

    pub(crate) fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    pub(crate) fn children_named<'a, 'b>(
        &'a self,
        local_name: &'b str,
    ) -> impl Iterator<Item = &'a XmlElement> + use<'a, 'b> {
        self.elements()
            .filter(move |element| element.is_local_name(local_name))
    }

    /// First child element named `local_name`.
    pub(crate) fn child<'a>(&'a self, local_name: &str) -> Option<&'a XmlElement> {
        self.elements()
            .find(|element| element.is_local_name(local_name))
    }

    /// All descendants named `local_name` in document order.
    pub(crate) fn descendants_named<'a>(&'a self, local_name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        let mut stack = self.elements().collect::<Vec<_>>();
        stack.reverse();

        while let Some(element) = stack.pop() {
            if element.is_local_name(local_name) {
                found.push(element);
            }
            let start = stack.len();
            stack.extend(element.elements());
            stack[start..].reverse();
        }
        found
    }

    /// Attribute value by local name.
    ///
    /// Unprefixed attributes take precedence over prefixed ones,
    /// so `role` matches both `role` and `opf:role`.
    pub(crate) fn attribute(&self, local_name: &str) -> Option<&str> {
        let matches =
            |attribute: &&XmlAttribute| attribute.local_name.eq_ignore_ascii_case(local_name);

        self.attributes
            .iter()
            .filter(matches)
            .find(|attribute| attribute.prefix.is_none())
            .or_else(|| self.attributes.iter().find(matches))
            .map(|attribute| attribute.value.as_str())
    }

    /// Attribute value that is present and not blank.
    pub(crate) fn non_blank_attribute(&self, local_name: &str) -> Option<&str> {
        self.attribute(local_name).and_then(StrExt::non_blank)
    }

    /// Attribute value by namespace (or conventional `prefix`) and local name.
    pub(crate) fn attribute_ns(
        &self,
        namespace: &str,
        prefix: &str,
        local_name: &str,
    ) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| {
                attribute.local_name == local_name
                    && (attribute.namespace.as_deref() == Some(namespace)
                        || attribute.prefix.as_deref() == Some(prefix))
            })
            .map(|attribute| attribute.value.as_str())
    }

    /// Consolidated text of all descendant text nodes.
    ///
    /// Whitespace runs collapse into a single space and the result is trimmed.
    pub(crate) fn text(&self) -> String {
        let mut raw = String::new();
        let mut stack = vec![self.children.iter()];

        while let Some(iter) = stack.last_mut() {
            match iter.next() {
                Some(XmlNode::Text(text)) => raw.push_str(text),
                Some(XmlNode::Element(element)) => stack.push(element.children.iter()),
                None => {
                    stack.pop();
                }
            }
        }
        consolidate_whitespace(&raw)
    }
}

impl Display for XmlElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.local_name)
    }
}

struct DocumentBuilder<'a> {
    file: &'a str,
    /// Open elements; the last is the innermost.
    stack: Vec<XmlElement>,
    /// Prefixed namespace bindings introduced by each open element.
    scopes: Vec<Vec<(String, String)>>,
    root: Option<XmlElement>,
}

impl<'a> DocumentBuilder<'a> {
    fn new(file: &'a str) -> Self {
        Self {
            file,
            stack: Vec::new(),
            scopes: Vec::new(),
            root: None,
        }
    }

    fn build(mut self, data: &[u8]) -> ParserResult<XmlElement> {
        let mut reader = Reader::from_reader(data);

        loop {
            let event = reader.read_event().map_err(|error| self.unparsable(error))?;

            match event {
                Event::Start(el) => {
                    if self.stack.len() >= MAX_DEPTH {
                        return Err(self.unparsable(format!(
                            "Element nesting exceeds the maximum depth of {MAX_DEPTH}"
                        )));
                    }
                    let element = self.open(&el);
                    self.stack.push(element);
                }
                Event::Empty(el) => {
                    let element = self.open(&el);
                    self.scopes.pop();
                    self.attach(element);
                }
                Event::End(_) => {
                    self.scopes.pop();
                    if let Some(element) = self.stack.pop() {
                        self.attach(element);
                    }
                }
                Event::Text(text) => {
                    let raw = String::from_utf8_lossy(&text);
                    let unescaped = escape::unescape(&raw).unwrap_or(Cow::Borrowed(&raw));
                    self.push_text(&unescaped);
                }
                Event::CData(cdata) => self.push_text(&String::from_utf8_lossy(&cdata)),
                Event::GeneralRef(reference) => {
                    let name = String::from_utf8_lossy(&reference);
                    self.push_text(&resolve_reference(&name));
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions, doctype
                _ => {}
            }
        }

        if !self.stack.is_empty() {
            return Err(self.unparsable("Unexpected end of document; unclosed elements remain"));
        }
        self.root
            .take()
            .ok_or_else(|| self.unparsable("Document does not contain a root element"))
    }

    fn open(&mut self, el: &BytesStart<'_>) -> XmlElement {
        let mut bindings = Vec::new();
        let mut raw_attributes = Vec::new();
        let mut attributes = el.attributes();
        attributes.with_checks(false);

        for attribute in attributes.filter_map(Result::ok) {
            let key = attribute.key.as_ref();
            let raw = String::from_utf8_lossy(&attribute.value);
            let value = escape::unescape(&raw)
                .unwrap_or(Cow::Borrowed(&raw))
                .into_owned();

            if key == XMLNS {
                // Unprefixed attributes never take the default namespace
                continue;
            }
            if let Some(prefix) = key.strip_prefix(b"xmlns:") {
                bindings.push((lossy(prefix), value));
            } else {
                raw_attributes.push((
                    attribute.key.prefix().map(|p| lossy(p.as_ref())),
                    lossy(attribute.key.local_name().as_ref()),
                    value,
                ));
            }
        }
        self.scopes.push(bindings);

        let attributes = raw_attributes
            .into_iter()
            .map(|(prefix, local_name, value)| XmlAttribute {
                // Unprefixed attributes are not in any namespace
                namespace: prefix.as_deref().and_then(|p| self.resolve(p)),
                prefix,
                local_name,
                value,
            })
            .collect();

        XmlElement {
            local_name: lossy(el.local_name().as_ref()),
            attributes,
            children: Vec::new(),
        }
    }

    fn resolve(&self, prefix: &str) -> Option<String> {
        if prefix == "xml" {
            return Some(XML_NAMESPACE.to_owned());
        }
        self.scopes
            .iter()
            .rev()
            .flatten()
            .find(|(bound, _)| bound == prefix)
            .map(|(_, namespace)| namespace.clone())
            .filter(|namespace| !namespace.is_empty())
    }

    fn attach(&mut self, element: XmlElement) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(XmlNode::Element(element));
        } else if self.root.is_none() {
            self.root = Some(element);
        }
    }

    fn push_text(&mut self, text: &str) {
        // Text outside the root element is insignificant
        let Some(parent) = self.stack.last_mut() else {
            return;
        };
        match parent.children.last_mut() {
            Some(XmlNode::Text(existing)) => existing.push_str(text),
            _ => parent.children.push(XmlNode::Text(text.to_owned())),
        }
    }

    fn unparsable(&self, error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> EpubError {
        EpubError::Unparsable {
            source: error.into(),
            file: self.file.to_owned(),
        }
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Resolves `&name;` to its text. Unknown entities are kept verbatim.
fn resolve_reference(name: &str) -> Cow<'static, str> {
    let char_ref = name
        .strip_prefix("#x")
        .or_else(|| name.strip_prefix("#X"))
        .map(|hex| u32::from_str_radix(hex, 16))
        .or_else(|| name.strip_prefix('#').map(str::parse::<u32>));

    match char_ref {
        Some(Ok(code)) => match char::from_u32(code) {
            Some(c) => Cow::Owned(c.to_string()),
            None => Cow::Owned(format!("&{name};")),
        },
        Some(Err(_)) => Cow::Owned(format!("&{name};")),
        None => escape::resolve_predefined_entity(name)
            .map(Cow::Borrowed)
            .unwrap_or_else(|| Cow::Owned(format!("&{name};"))),
    }
}

/// Drops a leading `<?xml ...?>` declaration (and any whitespace before it),
/// tolerating prologues quick-xml would otherwise reject or misinterpret.
fn skip_xml_header(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    let trimmed = &data[start..];

    if trimmed.len() >= 5 && trimmed[..5].eq_ignore_ascii_case(b"<?xml") {
        if let Some(end) = trimmed.windows(2).position(|window| window == b"?>") {
            return &trimmed[end + 2..];
        }
    }
    trimmed
}

fn consolidate_whitespace(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());

    for word in raw.split_whitespace() {
        if !value.is_empty() {
            value.push(' ');
        }
        value.push_str(word);
    }
    value.trim_in_place();
    value
}
