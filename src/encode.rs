//! TOON encoding.
//!
//! The encoder renders a [`Value`] tree as indentation-scoped TOON text. It
//! is a pure function of the tree and the options; it performs no I/O and is
//! total over the value model, so it returns a `String` rather than a
//! `Result`.
//!
//! Every array is classified exactly once into one of four shapes and all
//! rendering dispatches on that tag:
//!
//! - **Empty** — `[0]:` with no body
//! - **Tabular** — uniform all-scalar objects become one field header plus
//!   one delimited row per element
//! - **Primitives** — all-scalar arrays inline as `[N]: v1,v2,…`, always
//!   comma-joined regardless of the configured delimiter
//! - **List** — everything else, one `- `-marked item per line
//!
//! ```rust
//! use toon_codec::{encode, toon};
//!
//! let value = toon!({"id": 1, "name": "Alice"});
//! assert_eq!(encode(&value), "id: 1\nname: Alice");
//! ```

use crate::{ToonMap, ToonOptions, Value};

/// Classification of an array, decided once before rendering.
enum ArrayShape<'a> {
    Empty,
    /// Field names in the first element's insertion order.
    Tabular(Vec<&'a str>),
    Primitives,
    List,
}

/// Classifies `items`, checking in priority order: empty, tabular,
/// primitive, general list.
fn classify(items: &[Value]) -> ArrayShape<'_> {
    if items.is_empty() {
        return ArrayShape::Empty;
    }

    if let Value::Object(first) = &items[0] {
        if !first.is_empty() && is_tabular(items, first) {
            let fields = first.keys().map(String::as_str).collect();
            return ArrayShape::Tabular(fields);
        }
    }

    if items.iter().all(Value::is_scalar) {
        return ArrayShape::Primitives;
    }

    ArrayShape::List
}

/// True when every element is an object sharing `first`'s key set
/// (order-insensitive) with scalar-only values.
fn is_tabular(items: &[Value], first: &ToonMap) -> bool {
    items.iter().all(|item| match item {
        Value::Object(obj) => {
            obj.len() == first.len()
                && first
                    .keys()
                    .all(|key| obj.get(key).is_some_and(Value::is_scalar))
        }
        _ => false,
    })
}

pub(crate) fn encode_value(value: &Value, options: &ToonOptions) -> String {
    let mut out = String::with_capacity(256);
    match value {
        Value::Object(obj) => write_object(&mut out, obj, options, 0),
        Value::Array(arr) => write_array(&mut out, arr, options, 0),
        scalar => write_scalar(&mut out, scalar),
    }
    out
}

/// Empty nested objects render nothing and are dropped from their parent.
fn is_dropped(value: &Value) -> bool {
    matches!(value, Value::Object(obj) if obj.is_empty())
}

fn push_indent(out: &mut String, options: &ToonOptions, level: usize) {
    for _ in 0..level * options.indent {
        out.push(' ');
    }
}

fn write_object(out: &mut String, obj: &ToonMap, options: &ToonOptions, level: usize) {
    let mut first = true;
    for (key, value) in obj.iter() {
        if is_dropped(value) {
            continue;
        }
        if !first {
            out.push('\n');
        }
        first = false;
        push_indent(out, options, level);
        write_entry(out, key, value, options, level);
    }
}

/// Writes one `key…` entry without its leading indent. Nested blocks indent
/// themselves relative to `level`.
fn write_entry(out: &mut String, key: &str, value: &Value, options: &ToonOptions, level: usize) {
    match value {
        Value::Array(arr) => {
            // Array rendering always starts with '[', so the key needs no
            // separating space.
            out.push_str(key);
            write_array(out, arr, options, level);
        }
        Value::Object(obj) => {
            out.push_str(key);
            out.push(':');
            if obj.iter().any(|(_, v)| !is_dropped(v)) {
                out.push('\n');
                write_object(out, obj, options, level + 1);
            }
        }
        scalar => {
            out.push_str(key);
            out.push_str(": ");
            write_scalar(out, scalar);
        }
    }
}

fn write_array(out: &mut String, items: &[Value], options: &ToonOptions, level: usize) {
    match classify(items) {
        ArrayShape::Empty => out.push_str("[0]:"),
        ArrayShape::Tabular(fields) => write_tabular(out, items, &fields, options, level),
        ArrayShape::Primitives => {
            out.push('[');
            out.push_str(&items.len().to_string());
            out.push_str("]: ");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_scalar(out, item);
            }
        }
        ArrayShape::List => write_list(out, items, options, level),
    }
}

fn write_tabular(
    out: &mut String,
    items: &[Value],
    fields: &[&str],
    options: &ToonOptions,
    level: usize,
) {
    // A one-field header has no separator to reveal the delimiter, so a
    // decoder reads it as comma; use comma outright to keep cell quoting
    // and row splitting in agreement.
    let delimiter = if fields.len() == 1 {
        ','
    } else {
        options.delimiter.as_char()
    };

    out.push('[');
    out.push_str(&items.len().to_string());
    out.push_str("]{");
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(delimiter);
        }
        out.push_str(field);
    }
    out.push_str("}:");

    for item in items {
        let Value::Object(obj) = item else {
            continue; // classification guarantees objects
        };
        out.push('\n');
        push_indent(out, options, level + 1);
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push(delimiter);
            }
            match obj.get(field) {
                Some(value) => write_cell(out, value, delimiter),
                None => out.push_str("null"),
            }
        }
    }
}

fn write_list(out: &mut String, items: &[Value], options: &ToonOptions, level: usize) {
    out.push('[');
    out.push_str(&items.len().to_string());
    out.push_str("]:");

    for item in items {
        out.push('\n');
        push_indent(out, options, level + 1);

        match item {
            Value::Object(obj) if obj.iter().any(|(_, v)| !is_dropped(v)) => {
                out.push_str("- ");
                // First entry rides the marker line; the rest sit at the
                // object's own indentation, not re-offset by the marker.
                let mut first = true;
                for (key, value) in obj.iter() {
                    if is_dropped(value) {
                        continue;
                    }
                    if !first {
                        out.push('\n');
                        push_indent(out, options, level + 1);
                    }
                    first = false;
                    write_entry(out, key, value, options, level + 1);
                }
            }
            // An item with nothing to render keeps a bare marker, avoiding
            // a trailing space; it reads back as null.
            Value::Object(_) => out.push('-'),
            Value::Array(inner) => {
                out.push_str("- ");
                write_array(out, inner, options, level + 1);
            }
            scalar => {
                out.push_str("- ");
                write_scalar(out, scalar);
            }
        }
    }
}

/// Renders a scalar with the general quoting rule.
fn write_scalar(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => {
            if needs_quotes(s) {
                write_quoted(out, s);
            } else {
                out.push_str(s);
            }
        }
        // Callers only pass scalars here; containers go through write_array
        // and write_object.
        Value::Array(_) | Value::Object(_) => {}
    }
}

/// Renders a scalar inside a tabular row, where the delimiter replaces the
/// colon as the structural separator.
fn write_cell(out: &mut String, value: &Value, delimiter: char) {
    match value {
        Value::String(s) => {
            if cell_needs_quotes(s, delimiter) {
                write_quoted(out, s);
            } else {
                out.push_str(s);
            }
        }
        other => write_scalar(out, other),
    }
}

/// General scalar-context quoting rule.
fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.starts_with(char::is_whitespace)
        || s.ends_with(char::is_whitespace)
        || s.contains([',', ':', '[', ']', '{', '}'])
        || s.eq_ignore_ascii_case("true")
        || s.eq_ignore_ascii_case("false")
        || s.eq_ignore_ascii_case("null")
        || s.parse::<f64>().is_ok()
}

/// Tabular-context quoting rule: keyed to the active delimiter instead of
/// the full structural character set.
fn cell_needs_quotes(s: &str, delimiter: char) -> bool {
    s.is_empty()
        || s.contains(delimiter)
        || s.contains(':')
        || s.contains('\n')
        || s.starts_with(char::is_whitespace)
        || s.ends_with(char::is_whitespace)
        || s.eq_ignore_ascii_case("true")
        || s.eq_ignore_ascii_case("false")
        || s.eq_ignore_ascii_case("null")
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}
