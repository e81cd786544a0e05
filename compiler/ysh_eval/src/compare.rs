//! Comparison operators that need no host capability.
//!
//! Ordering, equality, membership, identity and approximate equality. The
//! pattern operators (`~`, `!~`, `~~`, `!~~`) call into the glob and regex
//! matchers and live in the evaluator.

use std::cmp::Ordering;

use ysh_ir::CompareOp;
use ysh_value::{
    approx_eq_bad_right, approx_eq_left_not_str, not_iterable, type_mismatch, unhashable,
    unorderable, DictKey, EvalError, Obj, Value,
};

use crate::operators::Num;

/// Evaluate one link of a comparison chain.
///
/// Pattern operators are not handled here and report a type mismatch.
pub fn evaluate_compare(left: &Value, right: &Value, op: CompareOp) -> Result<bool, EvalError> {
    match op {
        CompareOp::Eq => Ok(left == right),
        CompareOp::NotEq => Ok(left != right),
        CompareOp::Is => Ok(left.is_same(right)),
        CompareOp::IsNot => Ok(!left.is_same(right)),
        CompareOp::In => contains(right, left),
        CompareOp::NotIn => contains(right, left).map(|found| !found),
        CompareOp::ApproxEq => approx_eq(left, right),
        CompareOp::Lt | CompareOp::Gt | CompareOp::LtEq | CompareOp::GtEq => {
            let Some(ordering) = partial_order(left, right, op)? else {
                // NaN is unordered against everything
                return Ok(false);
            };
            Ok(match op {
                CompareOp::Lt => ordering == Ordering::Less,
                CompareOp::Gt => ordering == Ordering::Greater,
                CompareOp::LtEq => ordering != Ordering::Greater,
                _ => ordering != Ordering::Less,
            })
        }
        CompareOp::GlobMatch
        | CompareOp::NotGlobMatch
        | CompareOp::RegexMatch
        | CompareOp::NotRegexMatch => Err(type_mismatch(&format!(
            "'{}' needs a pattern matcher",
            op.as_symbol()
        ))),
    }
}

/// Order two values: numbers, strings, and lists or tuples element-wise.
///
/// `Ok(None)` means the values have comparable types but no order (NaN).
fn partial_order(left: &Value, right: &Value, op: CompareOp) -> Result<Option<Ordering>, EvalError> {
    if let (Some(a), Some(b)) = (Num::from_value(left), Num::from_value(right)) {
        return Ok(match (a, b) {
            (Num::Int(x), Num::Int(y)) => Some(x.cmp(&y)),
            _ => left.as_float().partial_cmp(&right.as_float()),
        });
    }
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok(Some(a.as_str().cmp(b.as_str()))),
        (Value::Obj(Obj::List(a)), Value::Obj(Obj::List(b)))
        | (Value::Obj(Obj::Tuple(a)), Value::Obj(Obj::Tuple(b))) => {
            for (x, y) in a.iter().zip(b.iter()) {
                if x != y {
                    return partial_order(x, y, op);
                }
            }
            Ok(Some(a.len().cmp(&b.len())))
        }
        _ => Err(unorderable(
            op.as_symbol(),
            left.type_name(),
            right.type_name(),
        )),
    }
}

/// `item in container`
pub fn contains(container: &Value, item: &Value) -> Result<bool, EvalError> {
    match container {
        Value::Str(haystack) => match item {
            Value::Str(needle) => Ok(haystack.contains(needle.as_str())),
            _ => Err(type_mismatch(&format!(
                "'in <Str>' requires Str as left operand, not '{}'",
                item.type_name()
            ))),
        },
        Value::StrArray(items) => Ok(item
            .as_str()
            .is_some_and(|s| items.iter().flatten().any(|x| x == s))),
        Value::AssocArray(entries) => Ok(item.as_str().is_some_and(|s| entries.contains_key(s))),
        Value::Obj(Obj::List(items) | Obj::Tuple(items)) => Ok(items.iter().any(|x| x == item)),
        Value::Obj(Obj::Dict(entries)) => {
            let key = DictKey::from_value(item).ok_or_else(|| unhashable(item.type_name()))?;
            Ok(entries.contains_key(&key))
        }
        Value::Obj(Obj::Range(range)) => Ok(match Num::from_value(item) {
            Some(Num::Int(n)) => range.contains(n),
            Some(Num::Float(f)) => integral(f).is_some_and(|n| range.contains(n)),
            None => false,
        }),
        _ => Err(not_iterable(container.type_name())),
    }
}

/// The integer a float is exactly equal to, if any.
#[expect(
    clippy::cast_possible_truncation,
    reason = "only integral floats inside the i64 range reach the cast"
)]
fn integral(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && f.abs() < 9.2e18).then(|| f as i64)
}

/// `left ~== right`: loose equality between a string and a typed value.
///
/// The left side is trimmed first. A `Str` right side compares verbatim;
/// `Bool` accepts `true`/`1` and `false`/`0` in any case; `Int` requires
/// the left side to be all digits.
pub fn approx_eq(left: &Value, right: &Value) -> Result<bool, EvalError> {
    let Some(left) = left.as_str() else {
        return Err(approx_eq_left_not_str());
    };
    let left = left.trim();
    match right {
        Value::Str(s) => Ok(left == s.as_str()),
        Value::Obj(Obj::Bool(b)) => {
            let lower = left.to_ascii_lowercase();
            Ok(match lower.as_str() {
                "true" | "1" => *b,
                "false" | "0" => !*b,
                _ => false,
            })
        }
        Value::Obj(Obj::Int(n)) => {
            if left.is_empty() || !left.bytes().all(|b| b.is_ascii_digit()) {
                return Ok(false);
            }
            Ok(left.parse::<i64>().is_ok_and(|parsed| parsed == *n))
        }
        _ => Err(approx_eq_bad_right()),
    }
}
