use kofi_errors::{ParseError, ParseErrorKind};
use kofi_model::{Element, Property};
use kofi_util::{is_escaped, trim, unescape};

use crate::ParserOptions;

/// Parse a single line's text into an [`Element`], independently of any
/// other line.
///
/// Line parsing consults no shared state, so a caller is free to call
/// this concurrently across lines (see `kofi-scheduler`) and fold the
/// results back into a [`kofi_model::Document`] afterwards with
/// [`crate::fold_elements`] — as long as it keeps track of which line
/// number each result came from, to preserve order and to fold in line
/// order.
pub fn parse_element(text: &str, line: u32, options: &ParserOptions) -> Result<Element, ParseError> {
    let chars: Vec<char> = text.chars().collect();
    parse_line(&chars, line, options.nesting_depth())
}

/// Parse one line's characters (no embedded `\n`) into an [`Element`].
pub(crate) fn parse_line(chars: &[char], line: u32, max_nesting_depth: u32) -> Result<Element, ParseError> {
    let (start, end) = trim(chars, 0, chars.len());

    if start == end {
        return Ok(Element::Whitespace);
    }

    if chars[start] == ';' {
        let text: String = chars[start + 1..end].iter().collect();
        return Ok(Element::Comment(text));
    }

    if chars[start] == '[' {
        if chars[end - 1] != ']' {
            return Err(ParseError::new(line, end as u32, ParseErrorKind::SectionClosingBracketExpected));
        }

        let name: String = unescape(&chars[start + 1..end - 1].iter().collect::<String>());
        return Ok(Element::SectionHeader(name));
    }

    parse_property(chars, start, end, line, max_nesting_depth).map(Element::Property)
}

fn parse_property(chars: &[char], start: usize, end: usize, line: u32, max_nesting_depth: u32) -> Result<Property, ParseError> {
    let equals = (start..end).find(|&i| chars[i] == '=' && !is_escaped(chars, i, start));

    let Some(equals) = equals else {
        return Err(ParseError::new(line, start as u32 + 1, ParseErrorKind::InvalidElement));
    };

    let (key_start, key_end) = trim(chars, start, equals);
    let key = unescape(&chars[key_start..key_end].iter().collect::<String>());

    let scanned = kofi_scanner::scan_with_limit(chars, equals + 1, end, line, max_nesting_depth)?
        .ok_or_else(|| ParseError::new(line, equals as u32 + 2, ParseErrorKind::PropertyValueExpected))?;

    if scanned.length != end {
        return Err(ParseError::new(
            line,
            scanned.length as u32 + 1,
            ParseErrorKind::PropertyValueHasTrailingCharacters,
        ));
    }

    Ok(Property::new(key, scanned.value))
}

#[cfg(test)]
mod tests {
    use kofi_model::Value;
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(text: &str) -> Element {
        let chars: Vec<char> = text.chars().collect();
        parse_line(&chars, 1, kofi_scanner::DEFAULT_MAX_NESTING_DEPTH).unwrap()
    }

    #[test]
    fn blank_line_is_whitespace() {
        assert_eq!(parse("   "), Element::Whitespace);
        assert_eq!(parse(""), Element::Whitespace);
    }

    #[test]
    fn semicolon_is_comment_verbatim() {
        assert_eq!(parse("; hi"), Element::Comment(" hi".to_string()));
    }

    #[test]
    fn brackets_are_section_header() {
        assert_eq!(parse("[s]"), Element::SectionHeader("s".to_string()));
    }

    #[test]
    fn unterminated_section_header_is_an_error() {
        let chars: Vec<char> = "[s".chars().collect();
        let error = parse_line(&chars, 1, 64).unwrap_err();
        assert_eq!(*error.kind(), ParseErrorKind::SectionClosingBracketExpected);
    }

    #[test]
    fn key_value_property() {
        assert_eq!(parse("key = 42"), Element::Property(Property::new("key", Value::Int32(42))));
    }

    #[test]
    fn missing_equals_is_invalid_element() {
        let chars: Vec<char> = "not a property".chars().collect();
        let error = parse_line(&chars, 1, 64).unwrap_err();
        assert_eq!(*error.kind(), ParseErrorKind::InvalidElement);
    }

    #[test]
    fn missing_value_is_property_value_expected() {
        let chars: Vec<char> = "key =".chars().collect();
        let error = parse_line(&chars, 1, 64).unwrap_err();
        assert_eq!(*error.kind(), ParseErrorKind::PropertyValueExpected);
    }

    #[test]
    fn trailing_characters_are_rejected() {
        let chars: Vec<char> = "key = 1 2".chars().collect();
        let error = parse_line(&chars, 1, 64).unwrap_err();
        assert_eq!(*error.kind(), ParseErrorKind::PropertyValueHasTrailingCharacters);
    }
}
