//! Generic JSON value tree and the bundled handler that builds it.

use std::fmt;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::handler::Handler;
use crate::num::{NumInfo, Number};

/// A materialized JSON value.
///
/// Objects preserve document order; duplicate keys are kept as-is, and
/// lookup returns the first match. Numbers keep the representation the
/// scanner chose: native when they fit, arbitrary precision after big
/// escalation.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    BigInt(BigInt),
    BigDecimal(BigDecimal),
    String(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Native float view of either numeric representation that has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// First value bound under `key`, in document order.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(i) => Value::Int(i),
            Number::Float(f) => Value::Float(f),
            Number::BigInt(b) => Value::BigInt(b),
            Number::BigDec(d) => Value::BigDecimal(d),
        }
    }
}

/// Compact JSON rendering, mainly for tests and debugging. Non-finite
/// floats print in the lenient source forms (`Infinity`, `-Infinity`,
/// `NaN`) so output stays re-parseable; integral floats keep a `.0` to
/// survive a round trip as floats.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(true) => f.write_str("true"),
            Value::Bool(false) => f.write_str("false"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => {
                if v.is_nan() {
                    f.write_str("NaN")
                } else if v.is_infinite() {
                    f.write_str(if *v < 0.0 { "-Infinity" } else { "Infinity" })
                } else if v.fract() == 0.0 && v.abs() < 1e15 {
                    write!(f, "{v:.1}")
                } else {
                    write!(f, "{v}")
                }
            }
            Value::BigInt(b) => write!(f, "{b}"),
            Value::BigDecimal(d) => write!(f, "{d}"),
            Value::String(s) => write_json_string(f, s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(pairs) => {
                f.write_str("{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_json_string(f, key)?;
                    f.write_str(":")?;
                    write!(f, "{value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_json_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\x08' => f.write_str("\\b")?,
            '\x0c' => f.write_str("\\f")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

/// The bundled [`Handler`] building [`Value`] trees.
///
/// Every completed top-level value is pushed onto an internal list, which
/// is how multi-document input accumulates.
#[derive(Default)]
pub struct ValueBuilder {
    roots: Vec<Value>,
}

impl ValueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All top-level values delivered so far, in document order.
    pub fn into_roots(self) -> Vec<Value> {
        self.roots
    }
}

/// Decoded string bytes are UTF-8 except for the extended 5-/6-byte escape
/// forms; those degrade to replacement characters in the owned tree.
fn string_from(s: &[u8]) -> String {
    String::from_utf8_lossy(s).into_owned()
}

impl Handler for ValueBuilder {
    type Value = Value;

    fn null_value(&mut self) -> Value {
        Value::Null
    }

    fn bool_value(&mut self, value: bool) -> Value {
        Value::Bool(value)
    }

    fn start_array(&mut self) -> Value {
        Value::Array(Vec::new())
    }

    fn end_array(&mut self, _array: &mut Value) {}

    fn start_hash(&mut self) -> Value {
        Value::Object(Vec::new())
    }

    fn end_hash(&mut self, _hash: &mut Value) {}

    fn add_value(&mut self, value: Value) {
        self.roots.push(value);
    }

    fn add_cstr(&mut self, s: &[u8]) {
        self.roots.push(Value::String(string_from(s)));
    }

    fn add_num(&mut self, num: &NumInfo<'_>) {
        self.roots.push(num.materialize().into());
    }

    // The handles below are always the ones returned from
    // start_array/start_hash.

    fn array_append_value(&mut self, array: &mut Value, value: Value) {
        if let Value::Array(items) = array {
            items.push(value);
        }
    }

    fn array_append_cstr(&mut self, array: &mut Value, s: &[u8]) {
        if let Value::Array(items) = array {
            items.push(Value::String(string_from(s)));
        }
    }

    fn array_append_num(&mut self, array: &mut Value, num: &NumInfo<'_>) {
        if let Value::Array(items) = array {
            items.push(num.materialize().into());
        }
    }

    fn hash_set_value(&mut self, hash: &mut Value, key: &[u8], value: Value) {
        if let Value::Object(pairs) = hash {
            pairs.push((string_from(key), value));
        }
    }

    fn hash_set_cstr(&mut self, hash: &mut Value, key: &[u8], s: &[u8]) {
        if let Value::Object(pairs) = hash {
            pairs.push((string_from(key), Value::String(string_from(s))));
        }
    }

    fn hash_set_num(&mut self, hash: &mut Value, key: &[u8], num: &NumInfo<'_>) {
        if let Value::Object(pairs) = hash {
            pairs.push((string_from(key), num.materialize().into()));
        }
    }
}
