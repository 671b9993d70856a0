// src/xml.rs

//! Small immutable XML tree built from quick-xml events
//!
//! Polygon manifests are tiny and query-heavy, so the document is parsed once
//! into an element tree with path-style accessors instead of re-walking the
//! event stream for every lookup.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};

/// One parsed element: tag name, attributes, accumulated text and children,
/// in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value by key, `None` when absent.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Attribute value by key, or the empty string when absent.
    pub fn attr_or_empty(&self, key: &str) -> &str {
        self.attr(key).unwrap_or("")
    }

    /// First direct child with the given tag name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given tag name, in document order.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First element with the given tag name anywhere below this one,
    /// depth first.
    pub fn descendant(&self, name: &str) -> Option<&XmlElement> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.descendant(name) {
                return Some(found);
            }
        }
        None
    }

    /// Text content with surrounding whitespace trimmed.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// Trimmed text of a direct child, when the child exists.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(XmlElement::text)
    }
}

/// Parse a complete XML document into its root element.
pub fn parse_document(bytes: &[u8]) -> Result<XmlElement> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(start)) => stack.push(element_from_start(&start)?),
            Ok(Event::Empty(start)) => {
                let element = element_from_start(&start)?;
                place(element, &mut stack, &mut root)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::ManifestParse("unexpected closing tag".into()))?;
                place(element, &mut stack, &mut root)?;
            }
            Ok(Event::Text(text)) => {
                if let Some(open) = stack.last_mut() {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| position_error(&reader, &e))?;
                    open.text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(position_error(&reader, &e)),
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(Error::ManifestParse(
            "document ended with unclosed elements".into(),
        ));
    }
    root.ok_or_else(|| Error::ManifestParse("document has no root element".into()))
}

fn position_error(reader: &Reader<&[u8]>, err: &dyn std::fmt::Display) -> Error {
    Error::ManifestParse(format!(
        "malformed XML near byte {}: {err}",
        reader.buffer_position()
    ))
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute
            .map_err(|e| Error::ManifestParse(format!("bad attribute in <{name}>: {e}")))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| Error::ManifestParse(format!("bad attribute value in <{name}>: {e}")))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(XmlElement {
        name,
        attributes,
        text: String::new(),
        children: Vec::new(),
    })
}

/// Attach a finished element to the enclosing one, or make it the root.
fn place(element: XmlElement, stack: &mut Vec<XmlElement>, root: &mut Option<XmlElement>) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(Error::ManifestParse("multiple root elements".into())),
    }
}
