//! Hashable dict keys.

use super::{Obj, Value};

/// Key of a `Dict`.
///
/// Only hashable values can be keys: null, bools, numbers, strings, and
/// tuples of hashable values. Floats with an integral value collapse onto
/// the equal `Int` key, so `d[1]` and `d[1.0]` address the same entry.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum DictKey {
    Null,
    Bool(bool),
    Int(i64),
    /// Non-integral float, by bit pattern.
    Float(u64),
    Str(String),
    Tuple(Vec<DictKey>),
}

impl DictKey {
    /// Convert a value to a key, or `None` if the value is unhashable.
    pub fn from_value(value: &Value) -> Option<DictKey> {
        match value {
            Value::Str(s) => Some(DictKey::Str((**s).clone())),
            Value::StrArray(_) | Value::AssocArray(_) => None,
            Value::Obj(obj) => match obj {
                Obj::Null => Some(DictKey::Null),
                Obj::Bool(b) => Some(DictKey::Bool(*b)),
                Obj::Int(n) => Some(DictKey::Int(*n)),
                Obj::Float(f) => Some(float_key(*f)),
                Obj::Tuple(items) => items
                    .iter()
                    .map(DictKey::from_value)
                    .collect::<Option<Vec<_>>>()
                    .map(DictKey::Tuple),
                Obj::List(_)
                | Obj::Dict(_)
                | Obj::Range(_)
                | Obj::Slice(_)
                | Obj::Func(_)
                | Obj::Regex(_)
                | Obj::User(_) => None,
            },
        }
    }

    /// Convert the key back to a value.
    pub fn to_value(&self) -> Value {
        match self {
            DictKey::Null => Value::NULL,
            DictKey::Bool(b) => Value::bool(*b),
            DictKey::Int(n) => Value::int(*n),
            DictKey::Float(bits) => Value::float(f64::from_bits(*bits)),
            DictKey::Str(s) => Value::string(s.clone()),
            DictKey::Tuple(items) => Value::tuple(items.iter().map(DictKey::to_value).collect()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DictKey::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for DictKey {
    fn from(s: &str) -> Self {
        DictKey::Str(s.to_string())
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp,
    reason = "the truncated value is only used when it round-trips exactly"
)]
fn float_key(f: f64) -> DictKey {
    let truncated = f as i64;
    if truncated as f64 == f {
        DictKey::Int(truncated)
    } else {
        DictKey::Float(f.to_bits())
    }
}
