//! Configuration shared by the encoder and decoder.
//!
//! [`ToonOptions`] carries three knobs: the indent width (spaces per nesting
//! level, both directions), the delimiter the encoder writes into tabular
//! headers, and the decoder's strict/lenient policy. The decoder never reads
//! the configured delimiter — tabular headers are self-describing.
//!
//! ```rust
//! use toon_codec::{Delimiter, ToonOptions};
//!
//! let options = ToonOptions::new()
//!     .with_indent(4)
//!     .with_delimiter(Delimiter::Pipe)
//!     .lenient();
//! assert_eq!(options.indent, 4);
//! assert!(!options.strict);
//! ```

/// Delimiter used between tabular header fields and row values.
///
/// Primitive inline arrays always use commas regardless of this setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// The delimiter as a single character.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// The delimiter as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }
}

/// Options for [`encode_with_options`](crate::encode_with_options) and
/// [`decode_with_options`](crate::decode_with_options).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToonOptions {
    /// Spaces per nesting level. Always at least 1.
    pub indent: usize,
    /// Delimiter written into tabular array headers and rows.
    pub delimiter: Delimiter,
    /// Whether structural mismatches abort decoding (`true`) or degrade to a
    /// best-effort partial tree (`false`).
    pub strict: bool,
}

impl Default for ToonOptions {
    fn default() -> Self {
        ToonOptions {
            indent: 2,
            delimiter: Delimiter::default(),
            strict: true,
        }
    }
}

impl ToonOptions {
    /// Default options: 2-space indent, comma delimiter, strict decoding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indent width. Values below 1 are clamped to 1.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.max(1);
        self
    }

    /// Sets the delimiter used for tabular arrays the encoder creates.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the decoder's strict/lenient policy.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Shorthand for `with_strict(false)`.
    #[must_use]
    pub fn lenient(self) -> Self {
        self.with_strict(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ToonOptions::new();
        assert_eq!(options.indent, 2);
        assert_eq!(options.delimiter, Delimiter::Comma);
        assert!(options.strict);
    }

    #[test]
    fn indent_clamps_to_one() {
        assert_eq!(ToonOptions::new().with_indent(0).indent, 1);
        assert_eq!(ToonOptions::new().with_indent(8).indent, 8);
    }

    #[test]
    fn delimiter_text() {
        assert_eq!(Delimiter::Comma.as_str(), ",");
        assert_eq!(Delimiter::Tab.as_char(), '\t');
        assert_eq!(Delimiter::Pipe.as_char(), '|');
    }
}
