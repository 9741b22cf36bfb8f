use crate::Value;

/// One line's worth of document content.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// An empty or whitespace-only line. Carries no payload.
    Whitespace,
    /// A `;`-prefixed line; `text` is the remainder of the line,
    /// verbatim and unprocessed.
    Comment(String),
    /// A bracketed `[name]` line; `name` is unescaped.
    SectionHeader(String),
    /// A `key=value` line.
    Property(Property),
}

/// A parsed `key=value` property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// The unescaped, trimmed key.
    pub key: String,
    /// The value. Never the "absent" value at the model level —
    /// absence of a value is represented explicitly by [`Value::Null`].
    pub value: Value,
}

impl Property {
    /// Build a new property.
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self { key: key.into(), value }
    }
}

impl Element {
    /// Is this a [`Element::Whitespace`] element?
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Element::Whitespace)
    }

    /// Is this a [`Element::Comment`] element?
    pub fn is_comment(&self) -> bool {
        matches!(self, Element::Comment(_))
    }

    /// Is this a [`Element::SectionHeader`] element?
    pub fn is_section_header(&self) -> bool {
        matches!(self, Element::SectionHeader(_))
    }

    /// Borrow the section name, if this is a [`Element::SectionHeader`].
    pub fn as_section_header(&self) -> Option<&str> {
        match self {
            Element::SectionHeader(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Borrow the property, if this is a [`Element::Property`].
    pub fn as_property(&self) -> Option<&Property> {
        match self {
            Element::Property(property) => Some(property),
            _ => None,
        }
    }
}
