use kofi_errors::{ParseError, ParseErrorKind};
use kofi_model::Value;
use kofi_util::is_hex_digit;

use crate::col;

/// Scan a `'...'` character literal starting at the opening quote `i`.
///
/// Three fixed shapes, tried in order of increasing length: a bare code
/// unit (`'X'`), a two-character escape (`'\X'`), and a six-character
/// unicode escape (`'\uXXXX'`). An escape letter outside
/// `{t,b,n,r,f,0,',",\\}` matches no production at all and is an
/// `InvalidChar`.
pub(crate) fn scan(chars: &[char], i: usize, end: usize, line: u32) -> Result<(Value, usize), ParseError> {
    if i + 2 < end && chars[i + 1] != '\\' && chars[i + 2] == '\'' {
        return Ok((Value::Char(chars[i + 1]), i + 3));
    }

    if i + 3 < end && chars[i + 1] == '\\' && chars[i + 3] == '\'' {
        let decoded = decode_escape(chars[i + 2])
            .ok_or_else(|| ParseError::new(line, col(i), ParseErrorKind::InvalidChar))?;
        return Ok((Value::Char(decoded), i + 4));
    }

    if i + 2 < end && chars[i + 1] == '\\' && chars[i + 2] == 'u' {
        let hex_start = i + 3;
        if i + 7 < end
            && chars[hex_start..hex_start + 4].iter().copied().all(is_hex_digit)
            && chars[i + 7] == '\''
        {
            let code_point =
                u32::from_str_radix(&chars[hex_start..hex_start + 4].iter().collect::<String>(), 16)
                    .expect("four hex digits were just validated");

            let decoded = char::from_u32(code_point)
                .ok_or_else(|| ParseError::new(line, col(i), ParseErrorKind::InvalidCodepoint))?;

            return Ok((Value::Char(decoded), i + 8));
        }

        return Err(ParseError::new(line, col(i), ParseErrorKind::InvalidCodepoint));
    }

    Err(ParseError::new(line, col(i), ParseErrorKind::InvalidChar))
}

/// Decode a `2esc` escape letter, or `None` if `letter` is outside the
/// closed set the grammar defines.
fn decode_escape(letter: char) -> Option<char> {
    match letter {
        't' => Some('\t'),
        'b' => Some('\u{8}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        'f' => Some('\u{c}'),
        '0' => Some('\0'),
        '\'' => Some('\''),
        '"' => Some('"'),
        '\\' => Some('\\'),
        _ => None,
    }
}
