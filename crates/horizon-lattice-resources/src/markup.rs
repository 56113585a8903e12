//! Minimal markup element tree.
//!
//! Color and string tables share one document shape:
//!
//! ```xml
//! <resources>
//!     <color name="primary" value="#007AFF"/>
//!     <color name="accent">#FF9500</color>
//! </resources>
//! ```
//!
//! Only element names, attributes, and text content are kept. Comments,
//! processing instructions, and doctype declarations are skipped.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};

/// An element with its attributes, text content, and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupElement {
    name: String,
    attributes: HashMap<String, String>,
    text: String,
    children: Vec<MarkupElement>,
}

impl MarkupElement {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Concatenated text and CDATA content, or `None` when empty.
    pub fn text(&self) -> Option<&str> {
        (!self.text.is_empty()).then_some(self.text.as_str())
    }

    /// Append text content.
    pub fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Add a child element.
    pub fn add_child(&mut self, child: MarkupElement) {
        self.children.push(child);
    }

    /// All direct children.
    pub fn children(&self) -> &[MarkupElement] {
        &self.children
    }

    /// Direct children with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MarkupElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// The `value` attribute, or the text content when the attribute is absent.
    pub fn value_or_text(&self) -> Option<&str> {
        self.attribute("value").or_else(|| self.text())
    }
}

/// Parses a markup document and returns its root element.
///
/// `origin` names the document in error messages.
pub fn parse_markup(input: &str, origin: &str) -> Result<MarkupElement> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut root: Option<MarkupElement> = None;
    let mut stack: Vec<MarkupElement> = Vec::new();

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(start)) => {
                stack.push(element_from_start(&start, origin)?);
            }
            Ok(Event::Empty(empty)) => {
                let element = element_from_start(&empty, origin)?;
                attach(&mut stack, &mut root, element, origin)?;
            }
            Ok(Event::End(_)) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element, origin)?;
                }
            }
            Ok(Event::Text(text)) => {
                let content = text
                    .unescape()
                    .map_err(|e| Error::markup(origin, format!("at byte {}: {}", position, e)))?;
                if let Some(parent) = stack.last_mut() {
                    parent.push_text(&content);
                }
            }
            Ok(Event::CData(cdata)) => {
                if let Some(parent) = stack.last_mut() {
                    parent.push_text(&String::from_utf8_lossy(&cdata));
                }
            }
            Ok(_) => {}
            Err(e) => {
                return Err(Error::markup(origin, format!("at byte {}: {}", position, e)));
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::markup(
            origin,
            format!("unclosed element <{}>", open.name),
        ));
    }

    root.ok_or_else(|| Error::markup(origin, "document has no root element"))
}

fn element_from_start(start: &BytesStart<'_>, origin: &str) -> Result<MarkupElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = MarkupElement::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::markup(origin, e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        element.set_attribute(key, value);
    }

    Ok(element)
}

fn attach(
    stack: &mut [MarkupElement],
    root: &mut Option<MarkupElement>,
    element: MarkupElement,
    origin: &str,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.add_child(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(Error::markup(origin, "multiple root elements"));
    }
    Ok(())
}
