//! Composite payloads carried inside `Obj`.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use ysh_ir::Regex;

use super::Value;
use crate::EvalResult;

/// Named arguments of a call, in source order.
pub type Kwargs = IndexMap<String, Value>;

/// Signature of a host function callable from expressions.
pub type HostFn = dyn Fn(Vec<Value>, Kwargs) -> EvalResult + Send + Sync;

/// Callable handle.
///
/// Host functions are opaque: the evaluator passes them the evaluated
/// positional and named arguments and returns whatever they return.
#[derive(Clone)]
pub struct FunctionValue {
    name: String,
    func: Arc<HostFn>,
}

impl FunctionValue {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Vec<Value>, Kwargs) -> EvalResult + Send + Sync + 'static,
    {
        FunctionValue {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the function.
    pub fn call(&self, args: Vec<Value>, kwargs: Kwargs) -> EvalResult {
        (self.func)(args, kwargs)
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &FunctionValue) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Func {}>", self.name)
    }
}

/// Half-open integer range produced by `lower:upper`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RangeValue {
    pub start: i64,
    pub end: i64,
}

impl RangeValue {
    pub fn new(start: i64, end: i64) -> Self {
        RangeValue { start, end }
    }

    pub fn len(&self) -> usize {
        if self.end <= self.start {
            return 0;
        }
        usize::try_from(self.end.abs_diff(self.start)).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, n: i64) -> bool {
        self.start <= n && n < self.end
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> {
        self.start..self.end
    }
}

/// `lower:upper` used as an index.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SliceValue {
    pub lower: Option<i64>,
    pub upper: Option<i64>,
}

impl SliceValue {
    pub fn new(lower: Option<i64>, upper: Option<i64>) -> Self {
        SliceValue { lower, upper }
    }

    /// Resolve against a sequence of length `len`.
    ///
    /// Negative bounds count from the end; out-of-range bounds clamp. The
    /// returned range is empty when `lower >= upper`.
    pub fn indices(&self, len: usize) -> std::ops::Range<usize> {
        let lower = self.lower.map_or(0, |n| clamp_index(n, len));
        let upper = self.upper.map_or(len, |n| clamp_index(n, len));
        if lower >= upper {
            lower..lower
        } else {
            lower..upper
        }
    }
}

fn clamp_index(n: i64, len: usize) -> usize {
    if n < 0 {
        let back = usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX);
        len.saturating_sub(back)
    } else {
        usize::try_from(n).unwrap_or(usize::MAX).min(len)
    }
}

/// A compiled eggex.
///
/// `regex` is in canonical form. `flags` are carried along but dropped when
/// the eggex is spliced into another one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EggexValue {
    pub regex: Regex,
    pub flags: Vec<String>,
}

/// Opaque host object with named members, reachable through `obj.attr`.
#[derive(Clone, Debug, PartialEq)]
pub struct UserObject {
    pub type_name: String,
    pub attrs: IndexMap<String, Value>,
}

impl UserObject {
    pub fn new(type_name: impl Into<String>) -> Self {
        UserObject {
            type_name: type_name.into(),
            attrs: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attrs.insert(name.into(), value);
        self
    }
}
