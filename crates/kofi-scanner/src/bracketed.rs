use kofi_errors::{ParseError, ParseErrorKind};
use kofi_model::{Array, Object, Value};
use kofi_util::{is_escaped, is_whitespace, trim, unescape};

use crate::col;

/// Find the index of the `close` matching the `open` at `open_index`,
/// tracking nesting depth for `open`/`close` while suppressing counting
/// inside quoted strings.
fn find_matching_bracket(chars: &[char], open_index: usize, end: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 1i32;
    let mut in_string: Option<usize> = None;
    let mut i = open_index + 1;

    while i < end {
        let c = chars[i];

        match in_string {
            Some(quote_start) => {
                if c == '"' && !is_escaped(chars, i, quote_start) {
                    in_string = None;
                }
            }
            None => {
                if c == '"' {
                    in_string = Some(i);
                } else if c == open && !is_escaped(chars, i, open_index) {
                    depth += 1;
                } else if c == close && !is_escaped(chars, i, open_index) {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
            }
        }

        i += 1;
    }

    None
}

/// Scan the optional `$name` type specifier starting at `pos` (which may
/// or may not point at a `$`). Returns the tag (if any) and the position
/// to resume from: either right after a consumed `,`, or unchanged at
/// `close_index` if the specifier ran straight into the closing bracket.
fn scan_type_specifier(
    chars: &[char],
    pos: usize,
    close_index: usize,
    line: u32,
    separator_error: ParseErrorKind,
) -> Result<(Option<String>, usize), ParseError> {
    let (trimmed, _) = trim(chars, pos, close_index);

    if trimmed >= close_index || chars[trimmed] != '$' {
        return Ok((None, pos));
    }

    let mut i = trimmed + 1;
    while i < close_index && !is_whitespace(chars[i]) && chars[i] != ',' {
        i += 1;
    }

    let tag: String = chars[trimmed + 1..i].iter().collect();
    let (after, _) = trim(chars, i, close_index);

    if after >= close_index {
        return Ok((Some(tag), close_index));
    }

    if chars[after] == ',' {
        return Ok((Some(tag), after + 1));
    }

    Err(ParseError::new(line, col(after), separator_error))
}

pub(crate) fn scan_array(
    chars: &[char],
    open_index: usize,
    end: usize,
    line: u32,
    depth: u32,
    max_depth: u32,
) -> Result<(Value, usize), ParseError> {
    let close_index = find_matching_bracket(chars, open_index, end, '[', ']')
        .ok_or_else(|| ParseError::new(line, col(end), ParseErrorKind::UnterminatedArray))?;

    let (type_tag, mut pos) =
        scan_type_specifier(chars, open_index + 1, close_index, line, ParseErrorKind::ArraySeparatorExpected)?;

    let mut array = Array::new();
    if let Some(tag) = type_tag {
        array = array.with_type_tag(tag);
    }

    let mut require_value = false;

    loop {
        let (value_start, value_end) = trim(chars, pos, close_index);

        if value_start == value_end {
            if require_value {
                return Err(ParseError::new(line, col(pos), ParseErrorKind::ArrayValueExpected));
            }
            break;
        }

        let scanned = crate::scan_at(chars, pos, close_index, line, depth + 1, max_depth)?
            .expect("non-whitespace region guarantees a value");
        array.push(scanned.value);
        pos = scanned.length;
        require_value = false;

        if pos >= close_index {
            break;
        }

        if chars[pos] == ',' {
            pos += 1;
            require_value = true;
            continue;
        }

        return Err(ParseError::new(line, col(pos), ParseErrorKind::ArraySeparatorExpected));
    }

    Ok((Value::Array(array), close_index + 1))
}

pub(crate) fn scan_object(
    chars: &[char],
    open_index: usize,
    end: usize,
    line: u32,
    depth: u32,
    max_depth: u32,
) -> Result<(Value, usize), ParseError> {
    let close_index = find_matching_bracket(chars, open_index, end, '{', '}')
        .ok_or_else(|| ParseError::new(line, col(end), ParseErrorKind::UnterminatedObject))?;

    let (type_tag, mut pos) =
        scan_type_specifier(chars, open_index + 1, close_index, line, ParseErrorKind::ObjectEntrySeparatorExpected)?;

    let mut object = Object::new();
    if let Some(tag) = type_tag {
        object = object.with_type_tag(tag);
    }

    let mut require_entry = false;

    loop {
        let (name_start, name_end) = trim(chars, pos, close_index);

        if name_start == name_end {
            if require_entry {
                return Err(ParseError::new(line, col(pos), ParseErrorKind::ObjectEntryValueExpected));
            }
            break;
        }

        let (name, colon_index) = scan_entry_name(chars, pos, close_index, line)?;

        let scanned = crate::scan_at(chars, colon_index + 1, close_index, line, depth + 1, max_depth)?.ok_or_else(|| {
            ParseError::new(line, col(colon_index + 1), ParseErrorKind::ObjectEntryValueExpected)
        })?;

        object.push(name, scanned.value);
        pos = scanned.length;
        require_entry = false;

        if pos >= close_index {
            break;
        }

        if chars[pos] == ',' {
            pos += 1;
            require_entry = true;
            continue;
        }

        return Err(ParseError::new(line, col(pos), ParseErrorKind::ObjectEntrySeparatorExpected));
    }

    Ok((Value::Object(object), close_index + 1))
}

/// Scan an entry name: leading whitespace is skipped, then either a
/// quoted string (quotes stripped, content unescaped) or a raw run of
/// characters up to the next unescaped `:` (trimmed, then unescaped).
/// Returns the name and the index of the `:`.
fn scan_entry_name(chars: &[char], pos: usize, end: usize, line: u32) -> Result<(String, usize), ParseError> {
    let mut i = pos;
    while i < end && is_whitespace(chars[i]) {
        i += 1;
    }

    if i < end && chars[i] == '"' {
        let quote_start = i;
        let mut j = i + 1;

        while j < end {
            if chars[j] == '"' && !is_escaped(chars, j, quote_start) {
                let raw: String = chars[quote_start + 1..j].iter().collect();
                let (colon, _) = trim(chars, j + 1, end);

                if colon < end && chars[colon] == ':' {
                    return Ok((unescape(&raw), colon));
                }

                return Err(ParseError::new(line, col(colon.min(end)), ParseErrorKind::ObjectNameValueSeparatorExpected));
            }
            j += 1;
        }

        return Err(ParseError::new(line, col(end), ParseErrorKind::ObjectNameValueSeparatorExpected));
    }

    let name_start = i;
    while i < end && !(chars[i] == ':' && !is_escaped(chars, i, 0)) {
        i += 1;
    }

    if i >= end {
        return Err(ParseError::new(line, col(end), ParseErrorKind::ObjectNameValueSeparatorExpected));
    }

    let (trimmed_start, trimmed_end) = trim(chars, name_start, i);
    let raw: String = chars[trimmed_start..trimmed_end].iter().collect();

    Ok((unescape(&raw), i))
}
