use kofi_errors::{ParseError, ParseErrorKind};
use kofi_model::Value;
use kofi_util::{is_escaped, unescape};

use crate::col;

/// Scan a `"..."` string starting at the opening quote `i`.
pub(crate) fn scan(chars: &[char], i: usize, end: usize, line: u32) -> Result<(Value, usize), ParseError> {
    let mut j = i + 1;

    while j < end {
        if chars[j] == '"' && !is_escaped(chars, j, i) {
            let raw: String = chars[i + 1..j].iter().collect();
            return Ok((Value::Str(unescape(&raw)), j + 1));
        }
        j += 1;
    }

    Err(ParseError::new(line, col(end), ParseErrorKind::UnterminatedString))
}
