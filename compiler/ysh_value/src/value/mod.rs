//! Runtime values for the YSH expression evaluator.
//!
//! # Shell-native values and objects
//!
//! The shell core only understands three kinds of values: a scalar string,
//! an array of optional strings, and an associative array. Everything the
//! expression language adds (numbers, lists, dicts, callables, eggexes) is
//! carried inside `Value::Obj`, a closed set of payloads that downstream code
//! can match exhaustively.
//!
//! # Heap enforcement
//!
//! Heap payloads are wrapped in `Heap<T>`, whose constructor is private to
//! this module, so they can only be created through the factory methods on
//! `Value`:
//!
//! ```text
//! let s = Value::string("hello");            // OK
//! let l = Value::list(vec![Value::int(1)]);  // OK
//! let s = Value::Str(Heap::new(..));         // ERROR: Heap::new is pub(super)
//! ```

mod composite;
mod heap;
mod key;

use std::fmt;

use indexmap::IndexMap;

pub use composite::{
    EggexValue, FunctionValue, HostFn, Kwargs, RangeValue, SliceValue, UserObject,
};
pub use heap::Heap;
pub use key::DictKey;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    // Shell-native values
    /// Scalar string.
    Str(Heap<String>),
    /// Indexed array; unset slots are `None`.
    StrArray(Heap<Vec<Option<String>>>),
    /// Associative array.
    AssocArray(Heap<IndexMap<String, String>>),

    /// Any richer value produced by the expression language.
    Obj(Obj),
}

/// Payload of `Value::Obj`.
#[derive(Clone)]
pub enum Obj {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    List(Heap<Vec<Value>>),
    Tuple(Heap<Vec<Value>>),
    Dict(Heap<IndexMap<DictKey, Value>>),
    Range(RangeValue),
    Slice(SliceValue),
    Func(FunctionValue),
    /// Compiled eggex.
    Regex(Heap<EggexValue>),
    /// Opaque host object.
    User(Heap<UserObject>),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    pub const NULL: Value = Value::Obj(Obj::Null);

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn str_array(items: Vec<Option<String>>) -> Self {
        Value::StrArray(Heap::new(items))
    }

    /// Array without holes, from plain strings.
    pub fn strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::str_array(items.into_iter().map(|s| Some(s.into())).collect())
    }

    #[inline]
    pub fn assoc_array(entries: IndexMap<String, String>) -> Self {
        Value::AssocArray(Heap::new(entries))
    }

    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::Obj(Obj::Bool(b))
    }

    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Obj(Obj::Int(n))
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Obj(Obj::Float(f))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::Obj(Obj::List(Heap::new(items)))
    }

    #[inline]
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Obj(Obj::Tuple(Heap::new(items)))
    }

    #[inline]
    pub fn dict(entries: IndexMap<DictKey, Value>) -> Self {
        Value::Obj(Obj::Dict(Heap::new(entries)))
    }

    #[inline]
    pub fn range(start: i64, end: i64) -> Self {
        Value::Obj(Obj::Range(RangeValue::new(start, end)))
    }

    #[inline]
    pub fn slice(lower: Option<i64>, upper: Option<i64>) -> Self {
        Value::Obj(Obj::Slice(SliceValue::new(lower, upper)))
    }

    #[inline]
    pub fn func(f: FunctionValue) -> Self {
        Value::Obj(Obj::Func(f))
    }

    #[inline]
    pub fn regex(eggex: EggexValue) -> Self {
        Value::Obj(Obj::Regex(Heap::new(eggex)))
    }

    #[inline]
    pub fn user(obj: UserObject) -> Self {
        Value::Obj(Obj::User(Heap::new(obj)))
    }
}

// Value Methods

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Obj(Obj::Null))
    }

    pub fn as_obj(&self) -> Option<&Obj> {
        match self {
            Value::Obj(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer payload. Bools are not integers here.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Obj(Obj::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Obj(Obj::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Numeric value as a float: ints and bools convert, floats pass through.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Obj(Obj::Float(f)) => Some(*f),
            Value::Obj(Obj::Int(n)) => Some(int_to_float(*n)),
            Value::Obj(Obj::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::Obj(Obj::List(items)) => Some(items),
            _ => None,
        }
    }

    pub fn as_regex(&self) -> Option<&EggexValue> {
        match self {
            Value::Obj(Obj::Regex(eggex)) => Some(eggex),
            _ => None,
        }
    }

    /// Get the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "Str",
            Value::StrArray(_) => "StrArray",
            Value::AssocArray(_) => "AssocArray",
            Value::Obj(obj) => obj.type_name(),
        }
    }

    /// Check if this value is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Str(s) => !s.is_empty(),
            Value::StrArray(items) => !items.is_empty(),
            Value::AssocArray(entries) => !entries.is_empty(),
            Value::Obj(obj) => match obj {
                Obj::Null => false,
                Obj::Bool(b) => *b,
                Obj::Int(n) => *n != 0,
                Obj::Float(f) => *f != 0.0,
                Obj::List(items) | Obj::Tuple(items) => !items.is_empty(),
                Obj::Dict(entries) => !entries.is_empty(),
                Obj::Range(r) => !r.is_empty(),
                Obj::Slice(_) | Obj::Func(_) | Obj::Regex(_) | Obj::User(_) => true,
            },
        }
    }

    /// Identity, as tested by `is`.
    ///
    /// Scalars are identical when equal; heap values only when they share an
    /// allocation.
    pub fn is_same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Heap::ptr_eq(a, b),
            (Value::StrArray(a), Value::StrArray(b)) => Heap::ptr_eq(a, b),
            (Value::AssocArray(a), Value::AssocArray(b)) => Heap::ptr_eq(a, b),
            (Value::Obj(a), Value::Obj(b)) => match (a, b) {
                (Obj::Null, Obj::Null) => true,
                (Obj::Bool(x), Obj::Bool(y)) => x == y,
                (Obj::Int(x), Obj::Int(y)) => x == y,
                (Obj::Float(x), Obj::Float(y)) => x.to_bits() == y.to_bits(),
                (Obj::List(x), Obj::List(y)) | (Obj::Tuple(x), Obj::Tuple(y)) => {
                    Heap::ptr_eq(x, y)
                }
                (Obj::Dict(x), Obj::Dict(y)) => Heap::ptr_eq(x, y),
                (Obj::Range(x), Obj::Range(y)) => x == y,
                (Obj::Slice(x), Obj::Slice(y)) => x == y,
                (Obj::Func(x), Obj::Func(y)) => x.ptr_eq(y),
                (Obj::Regex(x), Obj::Regex(y)) => Heap::ptr_eq(x, y),
                (Obj::User(x), Obj::User(y)) => Heap::ptr_eq(x, y),
                _ => false,
            },
            _ => false,
        }
    }
}

impl Obj {
    pub fn type_name(&self) -> &'static str {
        match self {
            Obj::Null => "Null",
            Obj::Bool(_) => "Bool",
            Obj::Int(_) => "Int",
            Obj::Float(_) => "Float",
            Obj::List(_) => "List",
            Obj::Tuple(_) => "Tuple",
            Obj::Dict(_) => "Dict",
            Obj::Range(_) => "Range",
            Obj::Slice(_) => "Slice",
            Obj::Func(_) => "Func",
            Obj::Regex(_) => "Eggex",
            Obj::User(_) => "Obj",
        }
    }
}

/// Convert an integer to the nearest float.
#[expect(
    clippy::cast_precision_loss,
    reason = "integers beyond 2^53 round, matching float arithmetic"
)]
pub fn int_to_float(n: i64) -> f64 {
    n as f64
}

// Equality

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::StrArray(a), Value::StrArray(b)) => a == b,
            (Value::AssocArray(a), Value::AssocArray(b)) => a == b,
            (Value::Obj(a), Value::Obj(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq for Obj {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Obj::Null, Obj::Null) => true,
            (Obj::List(a), Obj::List(b)) | (Obj::Tuple(a), Obj::Tuple(b)) => a == b,
            (Obj::Dict(a), Obj::Dict(b)) => a == b,
            (Obj::Range(a), Obj::Range(b)) => a == b,
            (Obj::Slice(a), Obj::Slice(b)) => a == b,
            (Obj::Func(a), Obj::Func(b)) => a.ptr_eq(b),
            (Obj::Regex(a), Obj::Regex(b)) => a == b,
            (Obj::User(a), Obj::User(b)) => Heap::ptr_eq(a, b),
            _ => numeric_eq(self, other).unwrap_or(false),
        }
    }
}

/// Equality across `Bool`, `Int` and `Float`, or `None` if either side is
/// not numeric.
#[expect(clippy::float_cmp, reason = "numeric equality is exact by definition")]
fn numeric_eq(a: &Obj, b: &Obj) -> Option<bool> {
    match (a, b) {
        (Obj::Float(x), Obj::Float(y)) => Some(x == y),
        (Obj::Float(x), other) | (other, Obj::Float(x)) => {
            numeric_int(other).map(|n| int_to_float(n) == *x)
        }
        _ => Some(numeric_int(a)? == numeric_int(b)?),
    }
}

fn numeric_int(obj: &Obj) -> Option<i64> {
    match obj {
        Obj::Bool(b) => Some(i64::from(*b)),
        Obj::Int(n) => Some(*n),
        _ => None,
    }
}

// Formatting

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "'")?;
    for c in s.chars() {
        match c {
            '\'' => write!(f, "\\'")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            _ => write!(f, "{c}")?,
        }
    }
    write!(f, "'")
}

fn write_seq<'a, I, T>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    I: IntoIterator<Item = &'a T>,
    T: fmt::Display + 'a,
{
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Values print in literal syntax: strings are quoted.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write_quoted(f, s),
            Value::StrArray(items) => {
                write!(f, "%(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    match item {
                        Some(s) => write_quoted(f, s)?,
                        None => write!(f, "null")?,
                    }
                }
                write!(f, ")")
            }
            Value::AssocArray(entries) => {
                write!(f, "%{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_quoted(f, k)?;
                    write!(f, ": ")?;
                    write_quoted(f, v)?;
                }
                write!(f, "}}")
            }
            Value::Obj(obj) => write!(f, "{obj}"),
        }
    }
}

impl fmt::Display for Obj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Obj::Null => write!(f, "null"),
            Obj::Bool(b) => write!(f, "{b}"),
            Obj::Int(n) => write!(f, "{n}"),
            Obj::Float(x) => write!(f, "{x:?}"),
            Obj::List(items) => {
                write!(f, "[")?;
                write_seq(f, items.iter())?;
                write!(f, "]")
            }
            Obj::Tuple(items) => {
                write!(f, "(")?;
                write_seq(f, items.iter())?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Obj::Dict(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {v}", k.to_value())?;
                }
                write!(f, "}}")
            }
            Obj::Range(r) => write!(f, "{}:{}", r.start, r.end),
            Obj::Slice(s) => {
                if let Some(lower) = s.lower {
                    write!(f, "{lower}")?;
                }
                write!(f, ":")?;
                if let Some(upper) = s.upper {
                    write!(f, "{upper}")?;
                }
                Ok(())
            }
            Obj::Func(func) => write!(f, "<Func {}>", func.name()),
            Obj::Regex(_) => write!(f, "<Eggex>"),
            Obj::User(obj) => write!(f, "<Obj {}>", obj.type_name),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Debug for Obj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

// Conversions

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::bool(b)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::float(f)
    }
}
