//! TOON decoding.
//!
//! The decoder is a line-oriented recursive-descent parser. Input text is
//! first split into [`Line`]s (blank lines dropped, trailing whitespace
//! trimmed, leading spaces counted as indentation) and parsing then walks
//! that list with an explicit cursor threaded through every parse function.
//! Nesting depth maps to indentation: a construct at level `L` owns lines
//! indented exactly `L * indent_width` spaces.
//!
//! Strictness is a single policy switch. In strict mode every structural
//! mismatch aborts the decode with an [`Error`] naming the offending line.
//! In lenient mode the decoder recovers locally (skip the line, truncate the
//! row, null-pad the missing cell) and always returns a tree.
//!
//! Tabular headers are self-describing: the delimiter is detected from the
//! field list, so text encoded with any [`Delimiter`](crate::Delimiter)
//! decodes with the same options.

use crate::error::{Error, Result};
use crate::{Number, ToonMap, ToonOptions, Value};

/// One non-blank input line: its indentation in spaces, its payload with
/// surrounding whitespace removed, and its 1-based source line number.
struct Line<'a> {
    indent: usize,
    text: &'a str,
    number: usize,
}

pub(crate) fn decode_text(text: &str, options: &ToonOptions) -> Result<Value> {
    Parser::new(text, options).parse_document()
}

struct Parser<'a> {
    lines: Vec<Line<'a>>,
    indent: usize,
    strict: bool,
}

/// A parsed array header: `[count]`, an optional `{fields}` group with its
/// detected delimiter, and any inline payload after the colon.
struct ArrayHeader<'a> {
    count: usize,
    fields: Option<Vec<&'a str>>,
    delimiter: char,
    inline: Option<&'a str>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, options: &ToonOptions) -> Self {
        let mut lines = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let trimmed = raw.trim_end();
            if trimmed.is_empty() {
                continue;
            }
            let payload = trimmed.trim_start_matches(' ');
            lines.push(Line {
                indent: trimmed.len() - payload.len(),
                text: payload,
                number: i + 1,
            });
        }
        Parser {
            lines,
            indent: options.indent.max(1),
            strict: options.strict,
        }
    }

    fn parse_document(&self) -> Result<Value> {
        let Some(first) = self.lines.first() else {
            return Ok(Value::Object(ToonMap::new()));
        };

        let mut cursor = 0usize;
        let value = if first.text.starts_with('[') {
            match self.parse_array_header(first.text, first.number) {
                Ok(header) => {
                    cursor = 1;
                    self.parse_array_body(&header, first.number, 0, &mut cursor)?
                }
                Err(err) => {
                    if self.strict {
                        return Err(err);
                    }
                    return Ok(Value::Array(Vec::new()));
                }
            }
        } else {
            self.parse_object(0, &mut cursor)?
        };

        if self.strict {
            if let Some(extra) = self.lines.get(cursor) {
                return Err(Error::UnrecognizedLine {
                    line: extra.number,
                    text: extra.text.to_string(),
                });
            }
        }
        Ok(value)
    }

    /// Parses an object body whose entry lines sit at exactly
    /// `level * indent` spaces. Stops at the first shallower line.
    fn parse_object(&self, level: usize, cursor: &mut usize) -> Result<Value> {
        let expected = level * self.indent;
        let mut map = ToonMap::new();

        while let Some(line) = self.lines.get(*cursor) {
            if line.indent < expected {
                break;
            }
            if line.indent > expected {
                if self.strict {
                    return Err(Error::Indentation {
                        line: line.number,
                        expected,
                        found: line.indent,
                    });
                }
                *cursor += 1;
                continue;
            }

            let text = line.text;
            let bracket = text.find('[');
            let colon = text.find(':');

            if let Some(b) = bracket.filter(|&b| b > 0 && colon.map_or(true, |c| b < c)) {
                // key[…]… — an array entry
                let key = text[..b].trim_end();
                match self.parse_array_header(&text[b..], line.number) {
                    Ok(header) => {
                        let header_line = line.number;
                        *cursor += 1;
                        let value = self.parse_array_body(&header, header_line, level, cursor)?;
                        map.insert(key.to_string(), value);
                    }
                    Err(err) => {
                        if self.strict {
                            return Err(err);
                        }
                        *cursor += 1;
                    }
                }
            } else if let Some(c) = colon.filter(|&c| c > 0 && bracket.map_or(true, |b| b > c)) {
                let key = text[..c].trim_end();
                let rest = text[c + 1..].trim();
                *cursor += 1;
                let value = if rest.is_empty() {
                    self.parse_block_value(level, cursor)?
                } else {
                    parse_primitive(rest)
                };
                map.insert(key.to_string(), value);
            } else {
                if self.strict {
                    return Err(Error::UnrecognizedLine {
                        line: line.number,
                        text: text.to_string(),
                    });
                }
                *cursor += 1;
            }
        }

        Ok(Value::Object(map))
    }

    /// Resolves a bare `key:` by looking one line ahead: a child-level array
    /// header or object entry supplies the value, anything else means null.
    fn parse_block_value(&self, level: usize, cursor: &mut usize) -> Result<Value> {
        let child = (level + 1) * self.indent;
        let Some(next) = self.lines.get(*cursor) else {
            return Ok(Value::Null);
        };
        if next.indent != child {
            return Ok(Value::Null);
        }

        if next.text.starts_with('[') {
            match self.parse_array_header(next.text, next.number) {
                Ok(header) => {
                    let header_line = next.number;
                    *cursor += 1;
                    self.parse_array_body(&header, header_line, level + 1, cursor)
                }
                Err(err) => {
                    if self.strict {
                        Err(err)
                    } else {
                        Ok(Value::Null)
                    }
                }
            }
        } else {
            self.parse_object(level + 1, cursor)
        }
    }

    /// Parses `[<digits>]`, an optional `{fields}` group, and the closing
    /// colon with any inline payload. `text` must start at the `[`.
    fn parse_array_header(&self, text: &'a str, line: usize) -> Result<ArrayHeader<'a>> {
        let malformed = || Error::MalformedArrayHeader {
            line,
            header: text.to_string(),
        };

        let rest = text.strip_prefix('[').ok_or_else(malformed)?;
        let close = rest.find(']').ok_or_else(malformed)?;
        let digits = &rest[..close];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let count: usize = digits.parse().map_err(|_| malformed())?;

        let mut after = &rest[close + 1..];
        let mut fields = None;
        let mut delimiter = ',';
        if let Some(body) = after.strip_prefix('{') {
            let end = body.find('}').ok_or_else(malformed)?;
            let field_text = &body[..end];
            delimiter = detect_delimiter(field_text);
            fields = Some(field_text.split(delimiter).map(str::trim).collect());
            after = &body[end + 1..];
        }

        let after = after.strip_prefix(':').ok_or_else(malformed)?;
        let trailing = after.trim();
        let inline = (!trailing.is_empty()).then_some(trailing);
        if fields.is_some() && inline.is_some() {
            return Err(malformed());
        }

        Ok(ArrayHeader {
            count,
            fields,
            delimiter,
            inline,
        })
    }

    /// Dispatches on the header shape. `level` is the level of the line the
    /// header appeared on; multi-line bodies sit one level deeper.
    fn parse_array_body(
        &self,
        header: &ArrayHeader<'a>,
        header_line: usize,
        level: usize,
        cursor: &mut usize,
    ) -> Result<Value> {
        if let Some(fields) = &header.fields {
            self.parse_tabular(header, fields, header_line, level, cursor)
        } else if let Some(inline) = header.inline {
            self.parse_inline(header.count, inline, header_line)
        } else if header.count == 0 {
            Ok(Value::Array(Vec::new()))
        } else {
            self.parse_list(header.count, header_line, level, cursor)
        }
    }

    fn parse_tabular(
        &self,
        header: &ArrayHeader<'a>,
        fields: &[&'a str],
        header_line: usize,
        level: usize,
        cursor: &mut usize,
    ) -> Result<Value> {
        let row_indent = (level + 1) * self.indent;
        let mut rows = Vec::with_capacity(header.count);

        while rows.len() < header.count {
            let Some(line) = self.lines.get(*cursor) else {
                break;
            };
            if line.indent != row_indent {
                break;
            }
            *cursor += 1;

            let cells = split_delimited(line.text, header.delimiter);
            if self.strict && cells.len() != fields.len() {
                return Err(Error::FieldCountMismatch {
                    line: line.number,
                    declared: fields.len(),
                    found: cells.len(),
                });
            }

            // Lenient repair: extra cells are dropped, missing cells are null.
            let mut obj = ToonMap::with_capacity(fields.len());
            for (i, field) in fields.iter().enumerate() {
                let value = cells.get(i).map_or(Value::Null, |cell| parse_primitive(cell));
                obj.insert((*field).to_string(), value);
            }
            rows.push(Value::Object(obj));
        }

        if self.strict {
            if rows.len() != header.count {
                return Err(Error::RowCountMismatch {
                    line: header_line,
                    declared: header.count,
                    found: rows.len(),
                });
            }
            if let Some(line) = self.lines.get(*cursor) {
                if line.indent == row_indent {
                    let extra = self.lines[*cursor..]
                        .iter()
                        .take_while(|l| l.indent == row_indent)
                        .count();
                    return Err(Error::RowCountMismatch {
                        line: header_line,
                        declared: header.count,
                        found: header.count + extra,
                    });
                }
            }
        }

        Ok(Value::Array(rows))
    }

    /// Inline primitive arrays are always comma-delimited.
    fn parse_inline(&self, count: usize, text: &'a str, header_line: usize) -> Result<Value> {
        let tokens = split_delimited(text, ',');
        if self.strict && tokens.len() != count {
            return Err(Error::RowCountMismatch {
                line: header_line,
                declared: count,
                found: tokens.len(),
            });
        }
        Ok(Value::Array(
            tokens
                .into_iter()
                .take(count)
                .map(parse_primitive)
                .collect(),
        ))
    }

    fn parse_list(
        &self,
        count: usize,
        header_line: usize,
        level: usize,
        cursor: &mut usize,
    ) -> Result<Value> {
        let item_indent = (level + 1) * self.indent;
        let mut items = Vec::with_capacity(count);

        while items.len() < count {
            let Some(line) = self.lines.get(*cursor) else {
                break;
            };
            if line.indent != item_indent {
                break;
            }
            // A bare `-` is an item whose payload trimmed to nothing.
            let rest = if line.text == "-" {
                ""
            } else {
                match line.text.strip_prefix("- ") {
                    Some(rest) => rest,
                    None => {
                        if self.strict {
                            return Err(Error::MissingListMarker { line: line.number });
                        }
                        break;
                    }
                }
            };
            let item_line = line.number;
            *cursor += 1;

            // Quoted payloads are scalars even when they contain ':' or '['.
            let value = if rest.starts_with('"') {
                parse_primitive(rest)
            } else if rest.starts_with('[') {
                match self.parse_array_header(rest, item_line) {
                    Ok(header) => self.parse_array_body(&header, item_line, level + 1, cursor)?,
                    Err(err) => {
                        if self.strict {
                            return Err(err);
                        }
                        parse_primitive(rest)
                    }
                }
            } else if rest.contains(':') {
                self.parse_item_object(rest, item_line)?
            } else {
                parse_primitive(rest)
            };
            items.push(value);
        }

        if self.strict {
            if items.len() != count {
                return Err(Error::RowCountMismatch {
                    line: header_line,
                    declared: count,
                    found: items.len(),
                });
            }
            if let Some(line) = self.lines.get(*cursor) {
                if line.indent == item_indent && (line.text == "-" || line.text.starts_with("- ")) {
                    let extra = self.lines[*cursor..]
                        .iter()
                        .take_while(|l| {
                            l.indent == item_indent && (l.text == "-" || l.text.starts_with("- "))
                        })
                        .count();
                    return Err(Error::RowCountMismatch {
                        line: header_line,
                        declared: count,
                        found: count + extra,
                    });
                }
            }
        }

        Ok(Value::Array(items))
    }

    /// Parses a `key: value` list item by running the object parser over that
    /// single line as an independent input.
    fn parse_item_object(&self, text: &'a str, number: usize) -> Result<Value> {
        let item = Parser {
            lines: vec![Line {
                indent: 0,
                text,
                number,
            }],
            indent: self.indent,
            strict: self.strict,
        };
        let mut cursor = 0;
        item.parse_object(0, &mut cursor)
    }
}

/// Picks the delimiter a tabular header's field list was written with:
/// tab if present, else pipe, else comma.
fn detect_delimiter(field_text: &str) -> char {
    if field_text.contains('\t') {
        '\t'
    } else if field_text.contains('|') {
        '|'
    } else {
        ','
    }
}

/// Splits on `delimiter`, honoring quoted sections: an unescaped `"` toggles
/// quoting and `\` escapes the following character. Parts are trimmed.
fn split_delimited(text: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => {
                parts.push(text[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts
}

/// Interprets one scalar token: quoted string, `true`/`false`/`null`
/// (case-insensitive), integer, float, or raw string, in that order. An
/// empty token is null.
fn parse_primitive(token: &str) -> Value {
    if token.is_empty() {
        return Value::Null;
    }
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        return Value::String(unescape(&token[1..token.len() - 1]));
    }
    if token.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if token.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if token.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    if let Ok(i) = token.parse::<i64>() {
        return Value::Number(Number::Integer(i));
    }
    if let Ok(f) = token.parse::<f64>() {
        return Value::Number(Number::Float(f));
    }
    Value::String(token.to_string())
}

/// Resolves `\"` and `\\`; any other backslash sequence is kept verbatim.
fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(next @ ('"' | '\\')) => out.push(next),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{parse_primitive, split_delimited};
    use crate::{decode, decode_with_options, toon, Error, ToonOptions, Value};

    #[test]
    fn primitive_tokens() {
        assert_eq!(parse_primitive(""), Value::Null);
        assert_eq!(parse_primitive("null"), Value::Null);
        assert_eq!(parse_primitive("NULL"), Value::Null);
        assert_eq!(parse_primitive("true"), Value::Bool(true));
        assert_eq!(parse_primitive("False"), Value::Bool(false));
        assert_eq!(parse_primitive("42"), Value::from(42));
        assert_eq!(parse_primitive("-7"), Value::from(-7));
        assert_eq!(parse_primitive("1.5"), Value::from(1.5));
        assert_eq!(parse_primitive("1e3"), Value::from(1000.0));
        assert_eq!(parse_primitive("hello"), Value::from("hello"));
        assert_eq!(parse_primitive("\"42\""), Value::from("42"));
        assert_eq!(parse_primitive("\"a\\\"b\""), Value::from("a\"b"));
        assert_eq!(parse_primitive("\"a\\\\b\""), Value::from("a\\b"));
        assert_eq!(parse_primitive("\"\""), Value::from(""));
    }

    #[test]
    fn split_respects_quotes_and_escapes() {
        assert_eq!(split_delimited("a,b,c", ','), vec!["a", "b", "c"]);
        assert_eq!(split_delimited("\"a,b\",c", ','), vec!["\"a,b\"", "c"]);
        assert_eq!(split_delimited("a\\,b,c", ','), vec!["a\\,b", "c"]);
        assert_eq!(split_delimited(" a | b ", '|'), vec!["a", "b"]);
        assert_eq!(split_delimited("solo", ','), vec!["solo"]);
    }

    #[test]
    fn empty_input_is_empty_object() {
        assert_eq!(decode("").unwrap(), toon!({}));
        assert_eq!(decode("\n  \n").unwrap(), toon!({}));
    }

    #[test]
    fn flat_object() {
        let value = decode("id: 1\nname: Alice").unwrap();
        assert_eq!(value, toon!({"id": 1, "name": "Alice"}));
    }

    #[test]
    fn nested_object_and_null_key() {
        let value = decode("user:\n  name: Alice\n  extra:\nn: 1").unwrap();
        assert_eq!(
            value,
            toon!({"user": {"name": "Alice", "extra": null}, "n": 1})
        );
    }

    #[test]
    fn tabular_array_entry() {
        let value = decode("items[2]{sku,qty}:\n  A1,2\n  B2,1").unwrap();
        assert_eq!(
            value,
            toon!({"items": [
                {"sku": "A1", "qty": 2},
                {"sku": "B2", "qty": 1}
            ]})
        );
    }

    #[test]
    fn tabular_delimiter_detected_from_header() {
        let value = decode("items[1]{sku|qty}:\n  A1|2").unwrap();
        assert_eq!(value, toon!({"items": [{"sku": "A1", "qty": 2}]}));
        let value = decode("items[1]{sku\tqty}:\n  A1\t2").unwrap();
        assert_eq!(value, toon!({"items": [{"sku": "A1", "qty": 2}]}));
    }

    #[test]
    fn inline_array_always_splits_on_comma() {
        let value = decode("tags[3]: a,b,c").unwrap();
        assert_eq!(value, toon!({"tags": ["a", "b", "c"]}));
    }

    #[test]
    fn list_array_with_mixed_items() {
        let value = decode("xs[3]:\n  - 1\n  - name: Bob\n  - [2]: 2,3").unwrap();
        assert_eq!(value, toon!({"xs": [1, {"name": "Bob"}, [2, 3]]}));
    }

    #[test]
    fn top_level_array_forms() {
        assert_eq!(decode("[0]:").unwrap(), toon!([]));
        assert_eq!(decode("[2]: 1,2").unwrap(), toon!([1, 2]));
        assert_eq!(
            decode("[2]{a}:\n  1\n  2").unwrap(),
            toon!([{"a": 1}, {"a": 2}])
        );
        assert_eq!(decode("[2]:\n  - x\n  - y").unwrap(), toon!(["x", "y"]));
    }

    #[test]
    fn strict_row_count_mismatch() {
        let err = decode("items[2]{a}:\n  1").unwrap_err();
        assert_eq!(
            err,
            Error::RowCountMismatch {
                line: 1,
                declared: 2,
                found: 1
            }
        );
    }

    #[test]
    fn strict_surplus_rows() {
        let err = decode("items[1]{a}:\n  1\n  2").unwrap_err();
        assert_eq!(
            err,
            Error::RowCountMismatch {
                line: 1,
                declared: 1,
                found: 2
            }
        );
    }

    #[test]
    fn strict_field_count_mismatch() {
        let err = decode("items[1]{a,b}:\n  1,2,3").unwrap_err();
        assert_eq!(
            err,
            Error::FieldCountMismatch {
                line: 2,
                declared: 2,
                found: 3
            }
        );
    }

    #[test]
    fn strict_inline_count_mismatch() {
        let err = decode("tags[2]: a,b,c").unwrap_err();
        assert_eq!(
            err,
            Error::RowCountMismatch {
                line: 1,
                declared: 2,
                found: 3
            }
        );
    }

    #[test]
    fn strict_missing_list_marker() {
        let err = decode("xs[1]:\n  1").unwrap_err();
        assert_eq!(err, Error::MissingListMarker { line: 2 });
    }

    #[test]
    fn strict_malformed_headers() {
        for text in ["xs[]: 1", "xs[two]: 1", "xs[2: 1,2", "xs[2]{a,b", "xs[1]"] {
            match decode(text) {
                Err(Error::MalformedArrayHeader { line: 1, .. }) => {}
                other => panic!("expected malformed header for `{text}`, got {other:?}"),
            }
        }
    }

    #[test]
    fn strict_unexpected_indentation() {
        let err = decode("a: 1\n    b: 2").unwrap_err();
        assert_eq!(
            err,
            Error::Indentation {
                line: 2,
                expected: 0,
                found: 4
            }
        );
    }

    #[test]
    fn strict_unrecognized_line() {
        let err = decode("a: 1\njust words").unwrap_err();
        assert_eq!(
            err,
            Error::UnrecognizedLine {
                line: 2,
                text: "just words".to_string()
            }
        );
    }

    #[test]
    fn lenient_truncates_and_pads_rows() {
        let options = ToonOptions::new().lenient();
        let value = decode_with_options("items[2]{a,b}:\n  1\n  1,2,3", &options).unwrap();
        assert_eq!(
            value,
            toon!({"items": [
                {"a": 1, "b": null},
                {"a": 1, "b": 2}
            ]})
        );
    }

    #[test]
    fn lenient_keeps_short_arrays() {
        let options = ToonOptions::new().lenient();
        let value = decode_with_options("items[3]{a}:\n  1", &options).unwrap();
        assert_eq!(value, toon!({"items": [{"a": 1}]}));
        let value = decode_with_options("tags[2]: a,b,c", &options).unwrap();
        assert_eq!(value, toon!({"tags": ["a", "b"]}));
    }

    #[test]
    fn lenient_skips_unrecognized_lines() {
        let options = ToonOptions::new().lenient();
        let value = decode_with_options("a: 1\nnoise\nb: 2", &options).unwrap();
        assert_eq!(value, toon!({"a": 1, "b": 2}));
    }

    #[test]
    fn crlf_and_blank_lines() {
        let value = decode("a: 1\r\n\r\nb: 2\r\n").unwrap();
        assert_eq!(value, toon!({"a": 1, "b": 2}));
    }

    #[test]
    fn quoted_values_keep_structure_characters() {
        let value = decode("s: \"a: [1,2]\"").unwrap();
        assert_eq!(value, toon!({"s": "a: [1,2]"}));
    }

    #[test]
    fn quoted_list_items_are_scalars() {
        let value = decode("xs[2]:\n  - \"a: b\"\n  - \"[1]\"").unwrap();
        assert_eq!(value, toon!({"xs": ["a: b", "[1]"]}));
    }

    #[test]
    fn value_may_contain_brackets_after_colon() {
        let value = decode("s: \"[not a header]\"").unwrap();
        assert_eq!(value, toon!({"s": "[not a header]"}));
    }
}
