use crate::{Element, Property, Value, ValueKind};

/// An ordered list of [`Element`]s, representing one textual source.
///
/// A property is logically attached to the most recent
/// [`Element::SectionHeader`] preceding it; properties before any header
/// belong to the *global* section, named by `None`. Key matching (both
/// section names and property keys) is case-insensitive and
/// locale-independent (uppercase-folded).
///
/// Structural mutation methods preserve the invariant that a section's
/// properties always live contiguously between its header and the next
/// header (or the end of the document).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    elements: Vec<Element>,
}

/// Does `a` match `b` under this model's case-insensitive, locale-free
/// key comparison?
fn same_key(a: &str, b: &str) -> bool {
    a.to_uppercase() == b.to_uppercase()
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self { elements: Vec::new() }
    }

    /// The number of elements.
    pub fn size(&self) -> usize {
        self.elements.len()
    }

    /// Iterate over all elements in file order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Insert `element` at `index` (appending if `None`).
    pub fn add_element(&mut self, index: Option<usize>, element: Element) {
        match index {
            Some(index) => self.elements.insert(index.min(self.elements.len()), element),
            None => self.elements.push(element),
        }
    }

    /// The index of the header for `section`, or `None` if it doesn't
    /// exist. `None` (the global section) trivially "exists" and has no
    /// header index.
    fn section_header_index(&self, section: Option<&str>) -> Option<usize> {
        let section = section?;

        self.elements
            .iter()
            .position(|element| matches!(element.as_section_header(), Some(name) if same_key(name, section)))
    }

    /// The half-open `[start, end)` range of element indices belonging
    /// to `section`'s body (excluding its own header line), or `None` if
    /// a named section doesn't exist.
    fn section_span(&self, section: Option<&str>) -> Option<(usize, usize)> {
        let start = match section {
            None => 0,
            Some(_) => self.section_header_index(section)? + 1,
        };

        let end = self.elements[start..]
            .iter()
            .position(|element| element.is_section_header())
            .map(|offset| start + offset)
            .unwrap_or(self.elements.len());

        Some((start, end))
    }

    /// Ensure `section` has a header, appending a fresh one at the end of
    /// the document if necessary, and return its body span.
    fn ensure_section(&mut self, section: Option<&str>) -> (usize, usize) {
        if let Some((start, end)) = self.section_span(section) {
            return (start, end);
        }

        // `section` is `Some(name)` here: `None` (the global section)
        // always has a span (possibly empty, starting at 0).
        let name = section.expect("global section always has a span");
        self.elements.push(Element::SectionHeader(name.to_string()));
        (self.elements.len(), self.elements.len())
    }

    fn find_property_in_span(&self, start: usize, end: usize, key: &str) -> Option<usize> {
        self.elements[start..end].iter().position(|element| {
            matches!(element.as_property(), Some(property) if same_key(&property.key, key))
        }).map(|offset| start + offset)
    }

    /// Does `section` already have a header in this document?
    pub fn contains_section(&self, section: &str) -> bool {
        self.section_header_index(Some(section)).is_some()
    }

    /// Append `element` at the end of `section`'s body (just before its
    /// next header, or at the end of the document), creating the
    /// section's header first if it doesn't exist yet. Unlike
    /// [`Document::add_property`], this never replaces anything — it's
    /// meant for elements with no identity to merge on
    /// ([`Element::Whitespace`], [`Element::Comment`]).
    pub fn append_in_section(&mut self, section: Option<&str>, element: Element) {
        let (_, end) = self.ensure_section(section);
        self.elements.insert(end, element);
    }

    /// Insert or replace a property within `section` (`None` for
    /// global). If a property with a case-insensitively matching key
    /// already exists in that section, it is replaced **in place** and
    /// returned; otherwise the new property is inserted just before the
    /// section's next header (or at the end of the document), and
    /// `None` is returned. Adding to a section that doesn't exist yet
    /// creates its header first.
    pub fn add_property(&mut self, section: Option<&str>, property: Property) -> Option<Property> {
        let (start, end) = self.ensure_section(section);

        if let Some(index) = self.find_property_in_span(start, end, &property.key) {
            let Element::Property(previous) =
                std::mem::replace(&mut self.elements[index], Element::Property(property))
            else {
                unreachable!("index was found via as_property")
            };

            return Some(previous);
        }

        self.elements.insert(end, Element::Property(property));
        None
    }

    /// Remove the property named `key` from `section`, along with any
    /// contiguous run of comment lines immediately preceding it. Returns
    /// the removed property, or `None` if no such property (or section)
    /// exists.
    pub fn remove_property(&mut self, section: Option<&str>, key: &str) -> Option<Property> {
        let (start, end) = self.section_span(section)?;
        let index = self.find_property_in_span(start, end, key)?;

        let mut comments_start = index;
        while comments_start > start && self.elements[comments_start - 1].is_comment() {
            comments_start -= 1;
        }

        let Element::Property(property) = self.elements.remove(index) else {
            unreachable!("index was found via as_property")
        };

        self.elements.drain(comments_start..index);

        Some(property)
    }

    /// Remove `section` entirely: its header, every element in its body,
    /// and any contiguous run of comment lines immediately preceding the
    /// header. Returns whether a section was removed.
    pub fn remove_section(&mut self, section: &str) -> bool {
        let Some(header_index) = self.section_header_index(Some(section)) else {
            return false;
        };

        let (_, end) = self.section_span(Some(section)).expect("header was just found");

        let mut comments_start = header_index;
        while comments_start > 0 && self.elements[comments_start - 1].is_comment() {
            comments_start -= 1;
        }

        self.elements.drain(comments_start..end);

        true
    }

    /// Borrow the property named `key` within `section`.
    pub fn get_property(&self, section: Option<&str>, key: &str) -> Option<&Property> {
        let (start, end) = self.section_span(section)?;
        let index = self.find_property_in_span(start, end, key)?;

        self.elements[index].as_property()
    }

    /// Borrow the value of the property named `key` within `section`.
    pub fn get_value(&self, section: Option<&str>, key: &str) -> Option<&Value> {
        self.get_property(section, key).map(|property| &property.value)
    }

    /// Does `section` contain a property named `key`?
    pub fn contains(&self, section: Option<&str>, key: &str) -> bool {
        self.get_property(section, key).is_some()
    }

    /// The [`ValueKind`] of the property named `key` within `section`.
    pub fn value_type(&self, section: Option<&str>, key: &str) -> Option<ValueKind> {
        self.get_value(section, key).map(Value::kind)
    }

    /// Does `section` contain a property named `key` whose value kind is
    /// exactly `kind`, or is assignable to it (see
    /// [`ValueKind::is_assignable_to`])?
    pub fn contains_as(&self, section: Option<&str>, key: &str, kind: ValueKind) -> bool {
        self.value_type(section, key).is_some_and(|actual| actual.is_assignable_to(kind))
    }

    /// Iterate over all section names, in file order, skipping the
    /// (unnamed) global section.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(Element::as_section_header)
    }

    /// Iterate over the properties of `section`, in file order.
    pub fn properties_in(&self, section: Option<&str>) -> impl Iterator<Item = &Property> {
        let span = self.section_span(section);

        self.elements
            .iter()
            .enumerate()
            .filter(move |(index, _)| span.is_some_and(|(start, end)| (start..end).contains(index)))
            .filter_map(|(_, element)| element.as_property())
    }

    /// The number of properties in `section`.
    pub fn property_count(&self, section: Option<&str>) -> usize {
        self.properties_in(section).count()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn property(key: &str, value: Value) -> Property {
        Property::new(key, value)
    }

    #[test]
    fn add_property_creates_missing_section() {
        let mut document = Document::new();
        document.add_property(Some("s"), property("a", Value::Int32(1)));

        assert_eq!(document.sections().collect::<Vec<_>>(), vec!["s"]);
        assert_eq!(document.get_value(Some("s"), "a"), Some(&Value::Int32(1)));
    }

    #[test]
    fn add_property_replaces_in_place() {
        let mut document = Document::new();
        document.add_property(None, property("a", Value::Int32(1)));
        document.add_property(None, property("b", Value::Int32(2)));

        let replaced = document.add_property(None, property("A", Value::Int32(99)));

        assert_eq!(replaced, Some(property("a", Value::Int32(1))));
        // Replacement happened in place: "b" still comes after "a".
        let keys: Vec<&str> =
            document.properties_in(None).map(|property| property.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(document.get_value(None, "a"), Some(&Value::Int32(99)));
    }

    #[test]
    fn sections_scope_lookups() {
        let mut document = Document::new();
        document.add_property(Some("one"), property("k", Value::Int32(1)));
        document.add_property(Some("two"), property("k", Value::Int32(2)));

        assert_eq!(document.get_value(Some("one"), "k"), Some(&Value::Int32(1)));
        assert_eq!(document.get_value(Some("two"), "k"), Some(&Value::Int32(2)));
        assert_eq!(document.get_value(None, "k"), None);
    }

    #[test]
    fn key_lookup_is_case_insensitive() {
        let mut document = Document::new();
        document.add_property(None, property("Key", Value::Bool(true)));

        assert_eq!(document.get_value(None, "KEY"), Some(&Value::Bool(true)));
        assert_eq!(document.get_value(None, "key"), Some(&Value::Bool(true)));
    }

    #[test]
    fn remove_property_also_removes_preceding_comments() {
        let mut document = Document::new();
        document.add_element(None, Element::Comment(" leading".to_string()));
        document.add_element(None, Element::Property(property("a", Value::Int32(1))));
        let size_before = document.size();

        let removed = document.remove_property(None, "a");

        assert_eq!(removed, Some(property("a", Value::Int32(1))));
        assert_eq!(document.size(), size_before - 2);
    }

    #[test]
    fn remove_section_removes_header_body_and_comments() {
        let mut document = Document::new();
        document.add_element(None, Element::Comment(" about s".to_string()));
        document.add_property(Some("s"), property("a", Value::Int32(1)));

        assert!(document.remove_section("s"));
        assert_eq!(document.size(), 0);
        assert!(!document.remove_section("s"));
    }

    #[test]
    fn append_in_section_places_element_before_next_header() {
        let mut document = Document::new();
        document.add_property(Some("s"), property("a", Value::Int32(1)));
        document.add_property(Some("t"), property("b", Value::Int32(2)));

        document.append_in_section(Some("s"), Element::Comment(" note".to_string()));

        let elements: Vec<&Element> = document.iter().collect();
        assert!(matches!(elements[1], Element::Comment(text) if text == " note"));
    }

    #[test]
    fn contains_section_reports_existing_headers() {
        let mut document = Document::new();
        document.add_property(Some("s"), property("a", Value::Int32(1)));

        assert!(document.contains_section("s"));
        assert!(document.contains_section("S"));
        assert!(!document.contains_section("t"));
    }

    #[test]
    fn replacing_property_example_scenario() {
        // "[s]\na=1\nb=2\n[s]\nb=3\n"
        let mut document = Document::new();
        document.add_property(Some("s"), property("a", Value::Int32(1)));
        document.add_property(Some("s"), property("b", Value::Int32(2)));
        document.add_property(Some("s"), property("b", Value::Int32(3)));

        assert_eq!(document.get_value(Some("s"), "b"), Some(&Value::Int32(3)));
        assert_eq!(document.get_value(Some("s"), "a"), Some(&Value::Int32(1)));
        assert_eq!(document.sections().collect::<Vec<_>>(), vec!["s"]);
    }
}
