//! A codec for TOON (Token-Oriented Object Notation), a compact,
//! indentation-scoped text format for JSON-like data.
//!
//! The crate is value-centric: build a [`Value`] tree (with [`toon!`], the
//! `From` conversions, or serde via `Value`'s `Serialize`/`Deserialize`
//! implementations), then [`encode`] it to text or [`decode`] text back
//! into a tree.
//!
//! ```rust
//! use toon_codec::{decode, encode, toon};
//!
//! let value = toon!({
//!     "items": [
//!         {"sku": "A1", "qty": 2},
//!         {"sku": "B2", "qty": 1},
//!     ],
//! });
//!
//! let text = encode(&value);
//! assert_eq!(text, "items[2]{sku,qty}:\n  A1,2\n  B2,1");
//! assert_eq!(decode(&text).unwrap(), value);
//! ```
//!
//! Encoding is total and never fails. Decoding is strict by default —
//! structural mismatches return an [`Error`] with the offending line
//! number — and can be switched to a lenient, best-effort mode through
//! [`ToonOptions`]:
//!
//! ```rust
//! use toon_codec::{decode, decode_with_options, toon, ToonOptions};
//!
//! let text = "items[2]{sku,qty}:\n  A1,2"; // declares 2 rows, has 1
//! assert!(decode(text).is_err());
//!
//! let options = ToonOptions::new().lenient();
//! let value = decode_with_options(text, &options).unwrap();
//! assert_eq!(value, toon!({"items": [{"sku": "A1", "qty": 2}]}));
//! ```
//!
//! See the [`spec`] module for the full textual rules.

mod decode;
mod encode;
mod error;
mod macros;
mod map;
mod options;
pub mod spec;
mod value;

pub use error::{Error, Result};
pub use map::ToonMap;
pub use options::{Delimiter, ToonOptions};
pub use value::{Number, Value};

/// Encodes a value as TOON text using default options.
///
/// The output has no trailing newline. Encoding is total over the value
/// model and cannot fail.
#[must_use]
pub fn encode(value: &Value) -> String {
    encode::encode_value(value, &ToonOptions::default())
}

/// Encodes a value as TOON text with explicit options.
#[must_use]
pub fn encode_with_options(value: &Value, options: &ToonOptions) -> String {
    encode::encode_value(value, options)
}

/// Decodes TOON text into a [`Value`] using default (strict) options.
///
/// Empty input decodes to an empty object.
pub fn decode(text: &str) -> Result<Value> {
    decode::decode_text(text, &ToonOptions::default())
}

/// Decodes TOON text into a [`Value`] with explicit options.
pub fn decode_with_options(text: &str, options: &ToonOptions) -> Result<Value> {
    decode::decode_text(text, options)
}
