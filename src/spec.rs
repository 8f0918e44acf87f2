//! # The TOON format
//!
//! Token-Oriented Object Notation is a line-oriented, indentation-scoped
//! text format for JSON-like data. It trades JSON's punctuation for layout:
//! nesting is expressed by indentation, arrays declare their length up
//! front, and uniform arrays of flat objects collapse into a compact table.
//! This module holds no code; it documents the textual rules the encoder
//! and decoder in this crate implement.
//!
//! ## Documents
//!
//! A document is a sequence of lines. Blank lines are ignored and trailing
//! whitespace is insignificant. Indentation is measured in leading spaces;
//! a construct at nesting level `L` owns lines indented exactly
//! `L × indent-width` spaces (the width defaults to 2 and is configurable).
//!
//! A document whose first non-blank line starts with `[` is a top-level
//! array; anything else is a top-level object. An empty document is an
//! empty object.
//!
//! ## Objects
//!
//! One entry per line:
//!
//! ```text
//! id: 1
//! name: Alice
//! address:
//!   city: Paris
//! ```
//!
//! A scalar entry is `key: value`. A nested object entry is a bare `key:`
//! with its entries one level deeper; a bare `key:` with no deeper block
//! decodes to null. An empty object in value position renders nothing and
//! is dropped from its parent. Key order is preserved in both directions.
//!
//! ## Arrays
//!
//! Every array header carries the element count in brackets, attached
//! directly to its key (no space). There are three renderings, chosen by
//! the encoder in this priority order:
//!
//! **Tabular** — every element is an object with the same key set
//! (order-insensitive) and all values scalar. The header lists the field
//! names of the first element, in its insertion order, joined by the
//! configured delimiter; each element becomes one delimiter-joined row:
//!
//! ```text
//! items[2]{sku,qty}:
//!   A1,2
//!   B2,1
//! ```
//!
//! The delimiter may be a comma, tab, or pipe. Decoding detects it from
//! the field list itself (tab if present, else pipe, else comma), so
//! headers are self-describing. A table with a single field always uses
//! the comma delimiter: with one field name the header cannot reveal any
//! other choice.
//!
//! **Inline** — every element is a scalar. Elements are joined with
//! commas after the header, always commas, regardless of the configured
//! delimiter:
//!
//! ```text
//! tags[3]: a,b,c
//! ```
//!
//! **List** — anything else. One item per line, one level deeper, each
//! introduced by `- `:
//!
//! ```text
//! xs[3]:
//!   - 1
//!   - name: Bob
//!   - [2]: 2,3
//! ```
//!
//! A scalar item is its rendered token. An object item puts its first
//! entry on the marker line and subsequent entries on following lines at
//! the item's indentation. An array item starts with its own header on
//! the marker line. An item with nothing to render (an empty object) is a
//! bare `-` and reads back as null. The empty array is `[0]:` with no
//! body.
//!
//! ## Scalars
//!
//! `null`, `true`, and `false` are keywords (matched case-insensitively
//! when decoding). Numbers decode to 64-bit integers when they parse as
//! one, otherwise to floats. Everything else is a string.
//!
//! A string is quoted when leaving it bare would change its meaning: it
//! is empty, has leading or trailing whitespace, contains one of
//! `, : [ ] { }`, equals a keyword case-insensitively, or parses as a
//! number. Inside quotes only `\"` and `\\` are escapes. Tabular cells
//! use a narrower rule keyed to the active delimiter: a cell is quoted
//! when it is empty, has edge whitespace, equals a keyword, or contains
//! the delimiter, a colon, or a newline.
//!
//! ## Strict and lenient decoding
//!
//! Strict decoding (the default) rejects any structural mismatch: a row
//! or item count differing from the declared count, a row whose field
//! count differs from the header, a missing `- ` marker, unexpected
//! indentation, a malformed header, or an unrecognizable line. Lenient
//! decoding recovers locally instead — extra cells are dropped, missing
//! cells become null, surplus tokens are truncated, unrecognized lines
//! are skipped — and always produces a tree.
