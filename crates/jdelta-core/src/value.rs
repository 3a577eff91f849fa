//! The value model — a closed tagged union for JSON-plus-extensions data.
//!
//! Parsed input is represented as a [`Value`] rather than `serde_json::Value`
//! because the comparison rules depend on distinctions plain JSON cannot
//! express: `undefined` is not `null`, `NaN` is not any number, and the two
//! infinities are their own things. Objects use `Vec<(String, Value)>` to
//! preserve insertion order for display without depending on `IndexMap`;
//! key order is never semantically significant for equality.

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value as Json;

/// A parsed JSON-plus-extensions value.
///
/// `Number` holds only finite floats; the non-finite cases are separate
/// variants so they stay distinct under comparison. Every value is finite in
/// depth at construction time — inputs originate from parsed text, never
/// from back-references, so cycles cannot occur.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Undefined,
    Bool(bool),
    /// A finite number. NaN and the infinities have their own variants.
    Number(f64),
    NaN,
    PosInfinity,
    NegInfinity,
    String(String),
    Array(Vec<Value>),
    /// Key-value pairs in insertion order. Duplicate keys collapse to the
    /// last occurrence at construction time.
    Object(Vec<(String, Value)>),
}

impl Value {
    /// True for everything that is not an array or object.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// True for arrays and objects.
    pub fn is_composite(&self) -> bool {
        !self.is_scalar()
    }

    /// A short kind name for error messages ("object", "number", ...).
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) | Value::NaN | Value::PosInfinity | Value::NegInfinity => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Convert a `serde_json::Value` into the richer model.
    ///
    /// Relies on the `preserve_order` feature of serde_json so object fields
    /// keep their source order. Plain JSON has no way to spell the sentinel
    /// variants, so this conversion never produces them; the relaxed parser
    /// substitutes them in afterwards (see [`crate::parse`]).
    pub fn from_json(json: &Json) -> Value {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => match n.as_f64() {
                Some(f) if f.is_finite() => Value::Number(f),
                // u64 values above 2^63 still map into f64 range; a
                // non-finite f64 cannot come out of a JSON number.
                _ => Value::Number(0.0),
            },
            Json::String(s) => Value::String(s.clone()),
            Json::Array(items) => Value::Array(items.iter().map(Value::from_json).collect()),
            Json::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert back to strict JSON for serialization.
    ///
    /// The sentinel variants have no strict-JSON spelling and degrade:
    /// `Undefined` and `NaN` become `null`, the infinities become the
    /// strings `"Infinity"` / `"-Infinity"`.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Null | Value::Undefined | Value::NaN => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::PosInfinity => Json::String("Infinity".to_string()),
            Value::NegInfinity => Json::String("-Infinity".to_string()),
            Value::String(s) => Json::String(s.clone()),
            Value::Array(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Object(fields) => {
                let mut map = serde_json::Map::new();
                for (k, v) in fields {
                    map.insert(k.clone(), v.to_json());
                }
                Json::Object(map)
            }
        }
    }
}

/// Insert a field into an ordered field list, replacing any existing entry
/// with the same key (last occurrence wins, matching strict-JSON parsers).
pub(crate) fn insert_field(fields: &mut Vec<(String, Value)>, key: String, value: Value) {
    if let Some(slot) = fields.iter_mut().find(|(k, _)| *k == key) {
        slot.1 = value;
    } else {
        fields.push((key, value));
    }
}

/// Render a finite number in canonical decimal form.
///
/// Integral values print without a fractional part and `-0` folds to `0`,
/// so `2`, `2.0` and `-0.0` all produce the same text. Everything else uses
/// the shortest round-trip form.
pub(crate) fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return format!("{}", n as i64);
    }
    format!("{}", n)
}

fn number_to_json(n: f64) -> Json {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return Json::Number(serde_json::Number::from(n as i64));
    }
    match serde_json::Number::from_f64(n) {
        Some(num) => Json::Number(num),
        None => Json::Null,
    }
}

/// Compact literal rendering, used by reports and the CLI.
///
/// Looks like JSON except that the sentinel values are spelled bare
/// (`undefined`, `NaN`, `Infinity`, `-Infinity`), the way the relaxed input
/// syntax writes them.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Undefined => f.write_str("undefined"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::NaN => f.write_str("NaN"),
            Value::PosInfinity => f.write_str("Infinity"),
            Value::NegInfinity => f.write_str("-Infinity"),
            Value::String(s) => f.write_str(&Json::String(s.clone()).to_string()),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Object(fields) => {
                f.write_str("{")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}:{}", Json::String(k.clone()), v)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Serialize for report output.
///
/// The sentinel variants serialize as their literal names (`"undefined"`,
/// `"NaN"`, `"Infinity"`, `"-Infinity"`) so they stay visible in rendered
/// reports; a consumer that needs to distinguish them from real strings
/// should work with [`Value`] directly rather than the JSON report.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Undefined => serializer.serialize_str("undefined"),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::NaN => serializer.serialize_str("NaN"),
            Value::PosInfinity => serializer.serialize_str("Infinity"),
            Value::NegInfinity => serializer.serialize_str("-Infinity"),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}
