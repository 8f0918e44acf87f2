//! Error types for TOON decoding.
//!
//! Encoding is total over the [`Value`](crate::Value) model and never fails;
//! every variant here describes a structural problem found while decoding.
//! In strict mode any of these aborts the whole decode. In lenient mode the
//! decoder recovers locally instead of constructing them (see
//! [`ToonOptions::with_strict`](crate::ToonOptions::with_strict)).
//!
//! All variants carry the 1-based line number of the offending input line.

use thiserror::Error;

/// A structural error produced while decoding TOON text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Text after `[` does not match `<digits>]`, an optional `{fields}`
    /// group, and a closing colon.
    #[error("malformed array header at line {line}: `{header}`")]
    MalformedArrayHeader { line: usize, header: String },

    /// A tabular, inline, or list array declared one element count but a
    /// different number of rows/tokens/items was found.
    #[error("array at line {line} declares {declared} elements, found {found}")]
    RowCountMismatch {
        line: usize,
        declared: usize,
        found: usize,
    },

    /// A tabular row's delimiter-split value count differs from the header's
    /// field count.
    #[error("row at line {line} has {found} fields, header declares {declared}")]
    FieldCountMismatch {
        line: usize,
        declared: usize,
        found: usize,
    },

    /// A line sits at an indentation depth no production expects.
    #[error("unexpected indentation at line {line}: expected {expected} spaces, found {found}")]
    Indentation {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A list-array item line lacks the leading `- ` marker.
    #[error("list item at line {line} is missing its `- ` marker")]
    MissingListMarker { line: usize },

    /// A non-blank line matches none of the decoder's productions.
    #[error("unrecognized line {line}: `{text}`")]
    UnrecognizedLine { line: usize, text: String },
}

pub type Result<T> = std::result::Result<T, Error>;
