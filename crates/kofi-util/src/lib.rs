//! `kofi-util` provides the character-classification, escaping, and
//! trimming primitives shared by the scanner and the serializer.
//!
//! Everything here operates on `&[char]` slices rather than `&str`,
//! because the scanner needs random-access, O(1) indexing by character
//! position to report precise columns — something `&str` byte offsets
//! don't give for free once non-ASCII input is involved.

#![deny(unused)]
#![deny(warnings)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![deny(rustdoc::invalid_rust_codeblocks)]

/// Is `c` whitespace under this grammar?
///
/// Only horizontal tab, carriage return, and space count. Line-feed is a
/// line separator, never whitespace.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\r' | ' ')
}

/// Is `c` an ASCII decimal digit?
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Is `c` an ASCII hexadecimal digit (`0-9`, `A-F`, `a-f`)?
pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// Escape `input`, turning control characters into their two-character
/// forms (`\t`, `\b`, `\n`, `\r`, `\f`, `\0`, `\\`), any character in
/// `extra` into its two-character form (backslash followed by itself),
/// and any other `U+0000..=U+001F` code point into `\uXXXX`.
pub fn escape(input: &str, extra: &[char]) -> String {
    let mut output = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            '\t' => output.push_str("\\t"),
            '\u{8}' => output.push_str("\\b"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\u{c}' => output.push_str("\\f"),
            '\0' => output.push_str("\\0"),
            '\\' => output.push_str("\\\\"),
            c if extra.contains(&c) => {
                output.push('\\');
                output.push(c);
            }
            c if (c as u32) <= 0x1f => {
                output.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => output.push(c),
        }
    }

    output
}

/// Inverse of [`escape`]: `unescape(escape(s, extra)) == s` for any `s`
/// and any `extra` set `escape` was called with.
///
/// `\uXXXX` is recognized only with exactly four hex digits and decodes
/// to that code point; each of the named two-character forms decodes to
/// its control character; any other `\X` decodes to the bare `X`,
/// dropping the backslash — this is what makes the inverse hold for an
/// arbitrary `extra` set, since `escape` has no way to tell `unescape`
/// afterwards which characters were in it.
pub fn unescape(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut output = String::with_capacity(chars.len());
    let mut index = 0;

    while index < chars.len() {
        let c = chars[index];

        if c != '\\' || index + 1 >= chars.len() {
            output.push(c);
            index += 1;
            continue;
        }

        let next = chars[index + 1];

        match next {
            't' => {
                output.push('\t');
                index += 2;
            }
            'b' => {
                output.push('\u{8}');
                index += 2;
            }
            'n' => {
                output.push('\n');
                index += 2;
            }
            'r' => {
                output.push('\r');
                index += 2;
            }
            'f' => {
                output.push('\u{c}');
                index += 2;
            }
            '0' => {
                output.push('\0');
                index += 2;
            }
            '\\' => {
                output.push('\\');
                index += 2;
            }
            'u' if has_hex_digits(&chars, index + 2, 4) => {
                let code_point = u32::from_str_radix(
                    &chars[index + 2..index + 6].iter().collect::<String>(),
                    16,
                )
                .expect("four hex digits were just validated");

                output.push(char::from_u32(code_point).unwrap_or('\u{fffd}'));
                index += 6;
            }
            other => {
                output.push(other);
                index += 2;
            }
        }
    }

    output
}

fn has_hex_digits(chars: &[char], start: usize, count: usize) -> bool {
    chars.len() >= start + count && chars[start..start + count].iter().copied().all(is_hex_digit)
}

/// Is there an odd number of consecutive `\` immediately preceding
/// position `i`, within `boundary+1..i`? Used to decide whether a quote
/// or bracket at position `i` is itself escaped.
pub fn is_escaped(chars: &[char], i: usize, boundary: usize) -> bool {
    let mut count = 0;
    let mut k = i;

    while k > boundary {
        k -= 1;
        if chars[k] == '\\' {
            count += 1;
        } else {
            break;
        }
    }

    count % 2 == 1
}

/// Return the half-open range `[first, last)` of the non-whitespace
/// substring of `chars[start..end]`. Returns `(start, start)` (empty)
/// if the range is entirely whitespace or already empty.
pub fn trim(chars: &[char], start: usize, end: usize) -> (usize, usize) {
    let mut first = start;
    while first < end && is_whitespace(chars[first]) {
        first += 1;
    }

    if first == end {
        return (start, start);
    }

    let mut last = end;
    while last > first && is_whitespace(chars[last - 1]) {
        last -= 1;
    }

    (first, last)
}

/// Does the region `chars[start..end]` begin with an uppercase-folded
/// match of `literal` (which must itself be all-uppercase ASCII)?
pub fn matches_ci(chars: &[char], start: usize, end: usize, literal: &str) -> bool {
    let literal_len = literal.chars().count();

    if end - start < literal_len {
        return false;
    }

    chars[start..start + literal_len]
        .iter()
        .zip(literal.chars())
        .all(|(c, expected)| c.to_ascii_uppercase() == expected)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn whitespace_excludes_newline() {
        assert!(is_whitespace(' '));
        assert!(is_whitespace('\t'));
        assert!(is_whitespace('\r'));
        assert!(!is_whitespace('\n'));
    }

    #[test]
    fn escape_handles_named_and_control_and_extra() {
        assert_eq!(escape("a\tb\nc", &[]), "a\\tb\\nc");
        assert_eq!(escape("\u{1}", &[]), "\\u0001");
        assert_eq!(escape("a\"b", &['"']), "a\\\"b");
    }

    #[test]
    fn escape_unescape_round_trip() {
        let extra = ['"'];
        for input in ["hello", "a\tb\rc\nd", "\"quoted\"", "\u{0}\u{1f}"] {
            let escaped = escape(input, &extra);
            assert_eq!(unescape(&escaped), input);
        }
    }

    #[test]
    fn unescape_unicode_escape() {
        assert_eq!(unescape("\\u0041BC"), "ABC");
    }

    #[test]
    fn unescape_of_an_unnamed_escape_drops_the_backslash() {
        // `\x` isn't one of the named two-character forms, so it decodes
        // to the bare `x`, same as any other `extra`-escaped character.
        assert_eq!(unescape("\\x"), "x");
        // `\u` not followed by four hex digits isn't a valid unicode
        // escape either, so it falls back to the same rule: bare `u`.
        assert_eq!(unescape("\\u12"), "u12");
    }

    #[test]
    fn escape_unescape_round_trips_an_arbitrary_extra_set() {
        for (input, extra) in [(" a b ", [' '].as_slice()), ("a=b", &['=']), ("a]b", &[']']), ("a\"b", &['"'])] {
            assert_eq!(unescape(&escape(input, extra)), input);
        }
    }

    #[test]
    fn is_escaped_counts_consecutive_backslashes() {
        let chars: Vec<char> = "a\\\\\"".chars().collect();
        // chars: a \ \ "
        assert!(!is_escaped(&chars, 3, 0)); // two backslashes: even -> not escaped
        let chars: Vec<char> = "a\\\"".chars().collect();
        assert!(is_escaped(&chars, 2, 0)); // one backslash: odd -> escaped
    }

    #[test]
    fn trim_trims_both_ends() {
        let chars: Vec<char> = "  hi  ".chars().collect();
        assert_eq!(trim(&chars, 0, chars.len()), (2, 4));

        let blank: Vec<char> = "   ".chars().collect();
        assert_eq!(trim(&blank, 0, blank.len()), (0, 0));
    }

    #[test]
    fn matches_ci_checks_uppercase_folded_prefix() {
        let chars: Vec<char> = "TrUe, rest".chars().collect();
        assert!(matches_ci(&chars, 0, chars.len(), "TRUE"));
        assert!(!matches_ci(&chars, 0, chars.len(), "FALSE"));
    }
}
