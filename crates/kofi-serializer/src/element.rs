use kofi_model::Element;

use crate::value::serialize_value;

/// Render one element as its own line's text (no line ending attached).
pub(crate) fn serialize_element(element: &Element) -> String {
    match element {
        Element::Whitespace => String::new(),
        // Stored verbatim by the parser; re-emitted verbatim.
        Element::Comment(text) => format!(";{text}"),
        Element::SectionHeader(name) => format!("[{}]", escape_section_name(name)),
        Element::Property(property) => {
            format!("{}={}", escape_key(&property.key), serialize_value(&property.value))
        }
    }
}

/// Escape `]` in a section name; anything else a bare `nc` allows through
/// unescaped.
fn escape_section_name(name: &str) -> String {
    kofi_util::escape(name, &[']'])
}

/// Escape a property key so it re-parses to the same key: every `=`
/// (wherever it occurs), a leading `;` or `[` (which would otherwise read
/// as a comment or section header), and a leading or trailing plain
/// space (which `trim` would otherwise eat).
fn escape_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let last = chars.len().saturating_sub(1);
    let mut out = String::with_capacity(chars.len());

    for (index, &c) in chars.iter().enumerate() {
        let is_edge = index == 0 || index == last;

        if index == 0 && (c == ';' || c == '[') {
            out.push('\\');
            out.push(c);
        } else if is_edge && c == ' ' {
            out.push('\\');
            out.push(c);
        } else {
            out.push_str(&kofi_util::escape(&c.to_string(), &['=']));
        }
    }

    out
}
