use kofi_errors::{ParseError, ParseErrorKind};
use kofi_model::Value;
use kofi_util::{is_digit, is_whitespace, matches_ci};

use crate::col;

#[derive(Clone, Copy, PartialEq)]
enum Fraction {
    None,
    SeparatorSeen,
    DigitsAfter,
}

#[derive(Clone, Copy, PartialEq)]
enum Exponent {
    None,
    PrefixE,
    Signed,
    Digits,
}

#[derive(Clone, Copy, PartialEq)]
enum Precision {
    None,
    P32,
    P64,
}

/// Scan a numeric literal (or `[sign] infinity`) starting at `i`.
///
/// `end` bounds the scan: the caller has already excluded any enclosing
/// `]`/`}`, so reaching `end` is always a legitimate way for a number to
/// finish, same as hitting whitespace or `,`.
pub(crate) fn scan(chars: &[char], i: usize, end: usize, line: u32) -> Result<(Value, usize), ParseError> {
    let mut j = i;
    let mut negative = false;

    if j < end && (chars[j] == '+' || chars[j] == '-') {
        negative = chars[j] == '-';
        j += 1;
    }

    if matches_ci(chars, j, end, "INFINITY") {
        let magnitude = f32::INFINITY;
        return Ok((Value::Float32(if negative { -magnitude } else { magnitude }), j + 8));
    }

    let start = i;
    let mut has_digits = false;
    let mut fraction = Fraction::None;
    let mut exponent = Exponent::None;
    let mut precision = Precision::None;
    let mut literal_end = j;

    loop {
        if j >= end {
            literal_end = j;
            break;
        }

        let c = chars[j];

        if is_digit(c) {
            has_digits = true;
            fraction = match fraction {
                Fraction::SeparatorSeen | Fraction::DigitsAfter => Fraction::DigitsAfter,
                Fraction::None => Fraction::None,
            };
            exponent = match exponent {
                Exponent::PrefixE | Exponent::Signed | Exponent::Digits => Exponent::Digits,
                Exponent::None => Exponent::None,
            };
            j += 1;
            continue;
        }

        match c {
            '.' if exponent == Exponent::None && fraction == Fraction::None => {
                fraction = Fraction::SeparatorSeen;
                j += 1;
            }
            '+' | '-' if exponent == Exponent::PrefixE => {
                exponent = Exponent::Signed;
                j += 1;
            }
            'e' | 'E' if has_digits && exponent == Exponent::None => {
                exponent = Exponent::PrefixE;
                j += 1;
            }
            'l' | 'L' if has_digits && fraction == Fraction::None && exponent == Exponent::None && precision == Precision::None => {
                precision = Precision::P64;
                literal_end = j;
                j += 1;
                break;
            }
            'd' | 'D' if has_digits && precision == Precision::None => {
                precision = Precision::P64;
                literal_end = j;
                j += 1;
                break;
            }
            'f' | 'F' if has_digits && precision == Precision::None => {
                precision = Precision::P32;
                literal_end = j;
                j += 1;
                break;
            }
            c if is_whitespace(c) || c == ',' => {
                literal_end = j;
                break;
            }
            _ => return Err(ParseError::new(line, col(j), ParseErrorKind::InvalidNumber)),
        }
    }

    if !has_digits {
        return Err(ParseError::new(line, col(start), ParseErrorKind::InvalidNumber));
    }

    if exponent == Exponent::PrefixE || exponent == Exponent::Signed {
        return Err(ParseError::new(line, col(start), ParseErrorKind::InvalidNumber));
    }

    let literal: String = chars[start..literal_end].iter().collect();
    let is_float = fraction != Fraction::None || exponent == Exponent::Digits;

    let value = if !is_float {
        let parsed: i64 = literal
            .parse()
            .map_err(|_| ParseError::new(line, col(start), ParseErrorKind::InvalidNumber))?;

        match precision {
            Precision::None | Precision::P32 => {
                let narrowed = i32::try_from(parsed)
                    .map_err(|_| ParseError::new(line, col(start), ParseErrorKind::InvalidNumber))?;
                Value::Int32(narrowed)
            }
            Precision::P64 => Value::Int64(parsed),
        }
    } else {
        match precision {
            Precision::None | Precision::P64 => {
                let parsed: f64 = literal
                    .parse()
                    .map_err(|_| ParseError::new(line, col(start), ParseErrorKind::InvalidNumber))?;
                Value::Float64(parsed)
            }
            Precision::P32 => {
                let parsed: f32 = literal
                    .parse()
                    .map_err(|_| ParseError::new(line, col(start), ParseErrorKind::InvalidNumber))?;
                Value::Float32(parsed)
            }
        }
    };

    Ok((value, j))
}
