// ABOUTME: Minimal owned XML tree used to assemble feed documents before serialization.
// ABOUTME: Elements, text and CDATA nodes are written out with quick-xml's indenting Writer.

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;
use std::io::Write;

use crate::constants::Namespace;
use crate::error::FeedError;

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data, entity-escaped on output.
    Text(String),
    /// Character data written verbatim inside `<![CDATA[ ... ]]>`.
    CData(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An XML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an element with a plain (unqualified) name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element in the given namespace, e.g. `itunes:owner`.
    pub fn ns(namespace: Namespace, local: &str) -> Self {
        Self::new(namespace.qualify(local))
    }

    /// Creates an element holding a single escaped text node.
    pub fn text(namespace: Namespace, local: &str, text: impl Into<String>) -> Self {
        let mut element = Self::ns(namespace, local);
        element.append_text(text);
        element
    }

    /// Creates an element holding a single CDATA section.
    pub fn cdata(namespace: Namespace, local: &str, text: impl Into<String>) -> Self {
        let mut element = Self::ns(namespace, local);
        element.append_cdata(text);
        element
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Returns the value of an attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over child elements, skipping text and CDATA.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Returns the first child element with the given qualified name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|e| e.name == name)
    }

    /// Concatenated text and CDATA content of direct children.
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) | Node::CData(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Sets an attribute, replacing any existing value but keeping its position.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(existing) => existing.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Declares `namespace` on this element as an `xmlns:prefix` attribute.
    pub fn declare_namespace(&mut self, namespace: Namespace) {
        if let (Some(attr), Some(uri)) = (namespace.declaration(), namespace.uri()) {
            self.set_attribute(attr, uri);
        }
    }

    pub fn append_child(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    pub fn append_cdata(&mut self, text: impl Into<String>) {
        self.children.push(Node::CData(text.into()));
    }
}

/// A complete XML document: declaration plus a single root element.
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
    indent: usize,
}

impl Document {
    pub const VERSION: &'static str = "1.0";
    pub const ENCODING: &'static str = "UTF-8";

    /// Creates a document around `root`, pretty-printed with two-space indentation.
    pub fn new(root: Element) -> Self {
        Self { root, indent: 2 }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Serializes the document, ending with a newline.
    pub fn to_xml_string(&self) -> Result<String, FeedError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', self.indent);

        writer
            .write_event(Event::Decl(BytesDecl::new(
                Self::VERSION,
                Some(Self::ENCODING),
                None,
            )))
            .map_err(FeedError::xml)?;
        write_element(&mut writer, &self.root)?;

        let mut out =
            String::from_utf8(writer.into_inner()).map_err(|e| FeedError::Encoding(e.to_string()))?;
        out.push('\n');
        Ok(out)
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<(), FeedError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(FeedError::xml);
    }

    writer
        .write_event(Event::Start(start))
        .map_err(FeedError::xml)?;

    for child in &element.children {
        match child {
            Node::Element(e) => write_element(writer, e)?,
            Node::Text(text) => {
                writer
                    .write_event(Event::Text(BytesText::from_escaped(partial_escape(text.as_str()))))
                    .map_err(FeedError::xml)?;
            }
            Node::CData(text) => {
                for section in cdata_sections(text) {
                    writer
                        .write_event(Event::CData(BytesCData::new(section)))
                        .map_err(FeedError::xml)?;
                }
            }
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(FeedError::xml)
}

/// Splits text so no section contains the `]]>` terminator.
///
/// `a]]>b` becomes `a]]` and `>b`, which serialize as two adjacent CDATA
/// sections whose concatenated content is the original text.
fn cdata_sections(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find("]]>") {
        sections.push(&rest[..pos + 2]);
        rest = &rest[pos + 2..];
    }
    sections.push(rest);
    sections
}
