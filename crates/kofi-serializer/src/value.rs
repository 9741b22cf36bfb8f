use kofi_model::{Array, Object, Value};

/// Render `value` in its canonical textual form (§4.E).
pub(crate) fn serialize_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Int32(value) => value.to_string(),
        Value::Int64(value) => format!("{value}L"),
        Value::Float32(value) => format_float32(*value),
        Value::Float64(value) => format_float64(*value),
        Value::Char(value) => serialize_char(*value),
        Value::Str(value) => format!("\"{}\"", kofi_util::escape(value, &['"'])),
        Value::Array(array) => serialize_array(array),
        Value::Object(object) => serialize_object(object),
    }
}

/// `infinity`/`-infinity`/`nan` have no `F` suffix: those bare keywords
/// already scan back as `Float32` on their own.
fn format_float32(value: f32) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "infinity".to_string() } else { "-infinity".to_string() };
    }

    format!("{}f", ensure_fractional(&value.to_string()))
}

/// Grammar-wise, bare `infinity`/`nan` always scans to `Float32`: there is
/// no literal form that round-trips a non-finite `Float64`. We still emit
/// something sensible rather than panic.
fn format_float64(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "infinity".to_string() } else { "-infinity".to_string() };
    }

    format!("{}d", ensure_fractional(&value.to_string()))
}

/// `Value::Float64`/`Float32` must carry a visible fraction or exponent
/// to scan back as a float rather than an integer (see the acceptance
/// table in §4.B) — Rust's own shortest round-trip `Display` omits the
/// `.0` for whole numbers, so add it back.
fn ensure_fractional(text: &str) -> String {
    if text.contains('.') || text.contains('e') || text.contains('E') {
        text.to_string()
    } else {
        format!("{text}.0")
    }
}

fn serialize_char(c: char) -> String {
    let code = c as u32;

    match c {
        '\'' => "'\\''".to_string(),
        '\\' => "'\\\\'".to_string(),
        _ if code <= 0x1f => format!("'\\u{code:04x}'"),
        _ if (0x20..=0x7e).contains(&code) => format!("'{c}'"),
        _ if code <= 0xffff => format!("'\\u{code:04x}'"),
        // Astral code points have no 6esc form (only four hex digits);
        // fall back to the bare, unescaped code point.
        _ => format!("'{c}'"),
    }
}

fn serialize_array(array: &Array) -> String {
    let mut out = String::from("[");

    if let Some(tag) = array.type_tag() {
        out.push('$');
        out.push_str(tag);
        if !array.is_empty() {
            out.push(',');
        }
    }

    for (index, value) in array.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        out.push(' ');
        out.push_str(&serialize_value(value));
    }

    if !array.is_empty() {
        out.push(' ');
    }

    out.push(']');
    out
}

fn serialize_object(object: &Object) -> String {
    let mut out = String::from("{");

    if let Some(tag) = object.type_tag() {
        out.push('$');
        out.push_str(tag);
        if !object.is_empty() {
            out.push(',');
        }
    }

    for (index, (name, value)) in object.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        out.push_str(&format!(" \"{}\": ", kofi_util::escape(name, &['"'])));
        out.push_str(&serialize_value(value));
    }

    if !object.is_empty() {
        out.push(' ');
    }

    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use kofi_model::{Array, Object, Value};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn primitives() {
        assert_eq!(serialize_value(&Value::Null), "null");
        assert_eq!(serialize_value(&Value::Bool(true)), "true");
        assert_eq!(serialize_value(&Value::Int32(42)), "42");
        assert_eq!(serialize_value(&Value::Int64(9_000_000_000)), "9000000000L");
    }

    #[test]
    fn floats_always_carry_a_fraction() {
        assert_eq!(serialize_value(&Value::Float64(4.0)), "4.0d");
        assert_eq!(serialize_value(&Value::Float32(4.5)), "4.5f");
    }

    #[test]
    fn non_finite_floats_use_the_keyword_forms() {
        assert_eq!(serialize_value(&Value::Float32(f32::INFINITY)), "infinity");
        assert_eq!(serialize_value(&Value::Float32(f32::NEG_INFINITY)), "-infinity");
        assert_eq!(serialize_value(&Value::Float32(f32::NAN)), "nan");
    }

    #[test]
    fn strings_escape_quotes() {
        assert_eq!(serialize_value(&Value::Str("a\"b".to_string())), "\"a\\\"b\"");
    }

    #[test]
    fn chars_escape_control_quote_and_backslash() {
        assert_eq!(serialize_value(&Value::Char('x')), "'x'");
        assert_eq!(serialize_value(&Value::Char('\'')), "'\\''");
        assert_eq!(serialize_value(&Value::Char('\n')), "'\\u000a'");
    }

    #[test]
    fn empty_array_has_no_inner_spacing() {
        assert_eq!(serialize_value(&Value::Array(Array::new())), "[]");
    }

    #[test]
    fn array_values_are_space_prefixed_and_comma_separated() {
        let array = Array::from_values(vec![Value::Int32(1), Value::Int32(2)]);
        assert_eq!(serialize_value(&Value::Array(array)), "[ 1, 2 ]");
    }

    #[test]
    fn type_tagged_array_puts_the_tag_first() {
        let array = Array::from_values(vec![Value::Int32(1)]).with_type_tag("int");
        assert_eq!(serialize_value(&Value::Array(array)), "[$int, 1 ]");
    }

    #[test]
    fn object_entries_are_quoted_names() {
        let object = Object::from_entries(vec![("n".to_string(), Value::Str("v".to_string()))]);
        assert_eq!(serialize_value(&Value::Object(object)), "{ \"n\": \"v\" }");
    }
}
