use kofi_errors::{ParseError, ParseErrorKind};
use kofi_model::{Document, Element};
use log::trace;

use crate::{line::parse_line, ParserOptions};

/// Parse a complete document out of `text`.
///
/// A parser never attempts local recovery (see [`kofi_errors::ParseError`]):
/// the first malformed line aborts with that line's error. Re-opening a
/// section (a `[name]` header matching one already seen) does not create
/// a second header element — later properties merge into the existing
/// section, per the document model's replace-in-place semantics.
pub fn parse(text: &str, options: &ParserOptions) -> Result<Document, ParseError> {
    check_trailing_newline(text, options)?;

    let lines = split_lines(text);
    let mut elements = Vec::with_capacity(lines.len());

    for (index, line_text) in lines.into_iter().enumerate() {
        let line_number = index as u32 + 1;
        let chars: Vec<char> = line_text.chars().collect();
        let element = parse_line(&chars, line_number, options.nesting_depth())?;

        trace!("line {line_number}: {element:?}");
        elements.push(element);
    }

    Ok(fold_elements(elements))
}

/// Check `options`'s `strict_trailing_newline` requirement against
/// `text`, independently of parsing any line. Exposed so a caller
/// assembling a document from independently-parsed lines (e.g.
/// `kofi-scheduler`) can still enforce it.
pub fn check_trailing_newline(text: &str, options: &ParserOptions) -> Result<(), ParseError> {
    if options.requires_trailing_newline() && !text.is_empty() && !text.ends_with('\n') {
        let line_count = text.split('\n').count() as u32;
        return Err(ParseError::new(line_count, 1, ParseErrorKind::MissingTrailingNewline));
    }

    Ok(())
}

/// Split `text` into its lines the way [`parse`] does: on `\n`, dropping
/// the final empty segment produced by a trailing newline (so a
/// trailing `\n` doesn't count as an extra blank line).
///
/// Exposed so a caller that wants to parse lines independently (e.g. in
/// parallel, see `kofi-scheduler`) can reproduce the exact same line
/// numbering as the sequential parser.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Fold already-parsed `(line_number, element)` pairs, in line order,
/// into a [`Document`], applying the same section-tracking and
/// merge-on-reopen rules [`parse`] applies inline.
///
/// This is what lets a concurrent line parser (which parses lines
/// independently and out of order) still produce a document identical
/// to the sequential one: do the cheap, stateful folding step serially,
/// after the expensive, stateless parsing step has already happened
/// however it pleased.
pub fn fold_elements(elements: impl IntoIterator<Item = Element>) -> Document {
    let mut document = Document::new();
    let mut current_section: Option<String> = None;

    for element in elements {
        match element {
            Element::SectionHeader(name) => {
                if !document.contains_section(&name) {
                    document.add_element(None, Element::SectionHeader(name.clone()));
                }
                current_section = Some(name);
            }
            Element::Property(property) => {
                document.add_property(current_section.as_deref(), property);
            }
            whitespace_or_comment => {
                document.append_in_section(current_section.as_deref(), whitespace_or_comment);
            }
        }
    }

    document
}

#[cfg(test)]
mod tests {
    use kofi_model::Value;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn concrete_scenario_one() {
        let document = parse("\n ; hi\nkey = 42\n", &ParserOptions::default()).unwrap();
        let elements: Vec<Element> = document.iter().cloned().collect();

        assert_eq!(
            elements,
            vec![
                Element::Whitespace,
                Element::Comment(" hi".to_string()),
                Element::Property(kofi_model::Property::new("key", Value::Int32(42))),
            ]
        );
    }

    #[test]
    fn concrete_scenario_two_string_escape() {
        let document = parse("x = \"a\\\"b\"\n", &ParserOptions::default()).unwrap();
        assert_eq!(document.get_value(None, "x"), Some(&Value::Str("a\"b".to_string())));
    }

    #[test]
    fn concrete_scenario_four_reopened_section() {
        let document = parse("[s]\na=1\nb=2\n[s]\nb=3\n", &ParserOptions::default()).unwrap();

        assert_eq!(document.sections().collect::<Vec<_>>(), vec!["s"]);
        assert_eq!(document.get_value(Some("s"), "b"), Some(&Value::Int32(3)));
        assert_eq!(document.get_value(Some("s"), "a"), Some(&Value::Int32(1)));
    }

    #[test]
    fn concrete_scenario_six_unterminated_string_error() {
        let error = parse("x = \"abc\n", &ParserOptions::default()).unwrap_err();
        assert_eq!(error.line(), 1);
        assert_eq!(*error.kind(), ParseErrorKind::UnterminatedString);
    }

    #[test]
    fn strict_trailing_newline_rejects_missing_newline() {
        let options = ParserOptions::default().strict_trailing_newline(true);
        let error = parse("key = 1", &options).unwrap_err();
        assert_eq!(*error.kind(), ParseErrorKind::MissingTrailingNewline);
    }

    #[test]
    fn lenient_mode_accepts_missing_trailing_newline() {
        let document = parse("key = 1", &ParserOptions::default()).unwrap();
        assert_eq!(document.get_value(None, "key"), Some(&Value::Int32(1)));
    }

    #[test]
    fn split_lines_drops_the_trailing_empty_segment() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_lines(""), Vec::<&str>::new());
    }

    #[test]
    fn fold_elements_matches_sequential_parsing() {
        let text = "[s]\na=1\n[s]\nb=2\n";
        let options = ParserOptions::default();

        let elements: Vec<Element> = split_lines(text)
            .into_iter()
            .enumerate()
            .map(|(index, line)| crate::parse_element(line, index as u32 + 1, &options).unwrap())
            .collect();

        assert_eq!(fold_elements(elements), parse(text, &options).unwrap());
    }
}
