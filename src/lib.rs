//! Streaming single-pass JSON parser with pluggable value construction.
//!
//! The core is a byte-at-a-time scanner fused with an explicit
//! "what token comes next?" state machine; completed values are delivered
//! through the [`Handler`] callback seam, and the bundled [`ValueBuilder`]
//! turns them into generic [`Value`] trees.
//!
//! Beyond strict JSON the parser accepts a documented set of lenient
//! extensions: `+`-prefixed numbers, `Infinity`/`-Infinity`, `NaN` (with a
//! case-insensitive final letter), `/* ... */` and `// ...` comments, and
//! escape-decoded codepoints beyond the Unicode range rendered in the
//! historical 5-/6-byte UTF-8 forms.

pub use crate::error::{Error, Location};
pub use crate::handler::Handler;
pub use crate::num::{NumInfo, Number};
pub use crate::options::{BigDecLoad, Options};
pub use crate::value::{Value, ValueBuilder};

mod error;
mod handler;
mod num;
mod options;
mod parse;
mod reader;
mod stack;
mod strings;
mod value;

/// Drop a single leading UTF-8 BOM if present.
fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xef\xbb\xbf".as_slice()).unwrap_or(bytes)
}

/// Parse a single JSON document from a string.
///
/// This is the simplest entry point. If the input contains more than one
/// top-level value, this returns an error advising to use
/// [`from_multiple`] or [`from_multiple_with_options`]. Empty input parses
/// as [`Value::Null`].
///
/// Example:
///
/// ```rust
/// use jsox::Value;
///
/// let v = jsox::from_str(r#"{"name": "door", "open": true}"#).unwrap();
/// assert_eq!(v.get("name").and_then(Value::as_str), Some("door"));
/// assert_eq!(v.get("open").and_then(Value::as_bool), Some(true));
/// ```
pub fn from_str(input: &str) -> Result<Value, Error> {
    from_str_with_options(input, &Options::default())
}

/// Parse a single JSON document with configurable [`Options`].
///
/// Example: force the arbitrary-precision path for every decimal.
///
/// ```rust
/// use jsox::{BigDecLoad, Options, Value};
///
/// let options = Options {
///     bigdec_load: BigDecLoad::BigDec,
///     ..Options::default()
/// };
/// let v = jsox::from_str_with_options("0.1", &options).unwrap();
/// assert!(matches!(v, Value::BigDecimal(_)));
/// ```
pub fn from_str_with_options(input: &str, options: &Options) -> Result<Value, Error> {
    from_slice_with_options(input.as_bytes(), options)
}

/// Parse a single JSON document from bytes.
///
/// JSON is byte-oriented here: input does not have to be valid UTF-8
/// outside string values, and a leading UTF-8 BOM is skipped.
pub fn from_slice(bytes: &[u8]) -> Result<Value, Error> {
    from_slice_with_options(bytes, &Options::default())
}

/// Parse a single JSON document from bytes with configurable [`Options`].
pub fn from_slice_with_options(bytes: &[u8], options: &Options) -> Result<Value, Error> {
    let mut builder = ValueBuilder::new();
    parse::parse(strip_bom(bytes), options, &mut builder, false)?;
    Ok(builder.into_roots().pop().unwrap_or(Value::Null))
}

/// Parse a stream of top-level JSON documents into a vector.
///
/// A single input may carry any number of concatenated documents
/// (`{"a":1} {"a":2} ...`); each completed root value becomes one element.
///
/// Example:
///
/// ```rust
/// use jsox::Value;
///
/// let docs = jsox::from_multiple("[1] [2]\n[3]").unwrap();
/// assert_eq!(docs.len(), 3);
/// assert_eq!(docs[2], Value::Array(vec![Value::Int(3)]));
/// ```
pub fn from_multiple(input: &str) -> Result<Vec<Value>, Error> {
    from_multiple_with_options(input, &Options::default())
}

/// Parse a stream of top-level JSON documents with configurable
/// [`Options`].
pub fn from_multiple_with_options(input: &str, options: &Options) -> Result<Vec<Value>, Error> {
    from_slice_multiple_with_options(input.as_bytes(), options)
}

/// Parse a stream of top-level JSON documents from bytes.
pub fn from_slice_multiple(bytes: &[u8]) -> Result<Vec<Value>, Error> {
    from_slice_multiple_with_options(bytes, &Options::default())
}

/// Parse a stream of top-level JSON documents from bytes with configurable
/// [`Options`].
pub fn from_slice_multiple_with_options(
    bytes: &[u8],
    options: &Options,
) -> Result<Vec<Value>, Error> {
    let mut builder = ValueBuilder::new();
    parse::parse(strip_bom(bytes), options, &mut builder, true)?;
    Ok(builder.into_roots())
}

/// Parse a single JSON document from any [`std::io::Read`].
///
/// The input is decoded to UTF-8 first (BOM-aware, so UTF-16 files work)
/// and then parsed like [`from_slice`].
///
/// Example:
///
/// ```rust
/// let reader = std::io::Cursor::new(b"[1, 2]");
/// let v = jsox::from_reader(reader).unwrap();
/// assert_eq!(v.as_array().map(|a| a.len()), Some(2));
/// ```
pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Value, Error> {
    from_reader_with_options(reader, &Options::default())
}

/// Parse a single JSON document from any [`std::io::Read`] with
/// configurable [`Options`].
pub fn from_reader_with_options<R: std::io::Read>(
    reader: R,
    options: &Options,
) -> Result<Value, Error> {
    from_slice_with_options(&decode_reader(reader)?, options)
}

/// Run the parser over `bytes` with a caller-supplied [`Handler`].
///
/// This is the streaming seam: the handler sees every scanner event in
/// document order and each completed top-level value through
/// [`Handler::add_value`], so multi-document input can be consumed without
/// materializing a vector.
///
/// Example: count array elements without building values.
///
/// ```rust
/// use jsox::{Handler, NumInfo, Options};
///
/// #[derive(Default)]
/// struct Counter {
///     elements: usize,
/// }
///
/// impl Handler for Counter {
///     type Value = ();
///
///     fn null_value(&mut self) {}
///     fn bool_value(&mut self, _value: bool) {}
///     fn start_array(&mut self) {}
///     fn end_array(&mut self, _array: &mut ()) {}
///     fn start_hash(&mut self) {}
///     fn end_hash(&mut self, _hash: &mut ()) {}
///     fn add_value(&mut self, _value: ()) {}
///     fn add_cstr(&mut self, _s: &[u8]) {}
///     fn add_num(&mut self, _num: &NumInfo<'_>) {}
///     fn array_append_value(&mut self, _array: &mut (), _value: ()) {
///         self.elements += 1;
///     }
///     fn array_append_cstr(&mut self, _array: &mut (), _s: &[u8]) {
///         self.elements += 1;
///     }
///     fn array_append_num(&mut self, _array: &mut (), _num: &NumInfo<'_>) {
///         self.elements += 1;
///     }
///     fn hash_set_value(&mut self, _hash: &mut (), _key: &[u8], _value: ()) {}
///     fn hash_set_cstr(&mut self, _hash: &mut (), _key: &[u8], _s: &[u8]) {}
///     fn hash_set_num(&mut self, _hash: &mut (), _key: &[u8], _num: &NumInfo<'_>) {}
/// }
///
/// let mut counter = Counter::default();
/// jsox::parse_with_handler(b"[1, \"a\", [2, 3]]", &Options::default(), &mut counter).unwrap();
/// assert_eq!(counter.elements, 5);
/// ```
pub fn parse_with_handler<H: Handler>(
    bytes: &[u8],
    options: &Options,
    handler: &mut H,
) -> Result<(), Error> {
    parse::parse(strip_bom(bytes), options, handler, true).map(|_| ())
}

/// Slurp and decode a reader to UTF-8 bytes, sniffing a BOM.
fn decode_reader<R: std::io::Read>(reader: R) -> Result<Vec<u8>, Error> {
    use std::io::Read;

    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .encoding(None) // None = sniff BOM; the default is UTF-8
        .build(reader);
    let mut buf = Vec::new();
    decoder.read_to_end(&mut buf)?;
    Ok(buf)
}
