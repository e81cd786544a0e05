//! Binary operator implementations.
//!
//! Direct enum dispatch over a fixed set of operand kinds. Numbers (`Int`,
//! `Float`, and `Bool` as 0/1) share one arithmetic path; strings, lists and
//! tuples support concatenation and repetition. Everything else is a
//! host-level type mismatch that the evaluator later reports as an
//! expression type error.
//!
//! `and` and `or` are listed for completeness: the evaluator short-circuits
//! them before the right operand is evaluated.

use ysh_ir::BinaryOp;
use ysh_value::{
    divide_by_zero, int_to_float, integer_overflow, negative_shift, unsupported_operand, EvalError,
    EvalResult, Obj, Value,
};

/// A numeric operand.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    pub(crate) fn from_value(value: &Value) -> Option<Num> {
        match value {
            Value::Obj(Obj::Int(n)) => Some(Num::Int(*n)),
            Value::Obj(Obj::Bool(b)) => Some(Num::Int(i64::from(*b))),
            Value::Obj(Obj::Float(f)) => Some(Num::Float(*f)),
            _ => None,
        }
    }

    fn to_float(self) -> f64 {
        match self {
            Num::Int(n) => int_to_float(n),
            Num::Float(f) => f,
        }
    }
}

/// Evaluate a binary operation on two evaluated operands.
#[expect(
    clippy::needless_pass_by_value,
    reason = "operands are consumed by the evaluator; borrowing would force clones at every call site"
)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::And => return Ok(if left.is_truthy() { right } else { left }),
        BinaryOp::Or => return Ok(if left.is_truthy() { left } else { right }),
        _ => {}
    }

    if let (Some(a), Some(b)) = (Num::from_value(&left), Num::from_value(&right)) {
        if let (Value::Obj(Obj::Bool(x)), Value::Obj(Obj::Bool(y))) = (&left, &right) {
            if let Some(result) = eval_bool_bitwise(*x, *y, op) {
                return Ok(result);
            }
        }
        return eval_numeric(a, b, op).ok_or_else(|| mismatch(&left, &right, op))?;
    }

    match (&left, &right) {
        (Value::Str(a), Value::Str(b)) => match op {
            BinaryOp::Add | BinaryOp::Concat => Ok(Value::string(format!("{}{}", &**a, &**b))),
            _ => Err(mismatch(&left, &right, op)),
        },
        (Value::Obj(Obj::List(a)), Value::Obj(Obj::List(b))) => match op {
            BinaryOp::Add | BinaryOp::Concat => Ok(Value::list(concat(a, b))),
            _ => Err(mismatch(&left, &right, op)),
        },
        (Value::Obj(Obj::Tuple(a)), Value::Obj(Obj::Tuple(b))) => match op {
            BinaryOp::Add | BinaryOp::Concat => Ok(Value::tuple(concat(a, b))),
            _ => Err(mismatch(&left, &right, op)),
        },
        (seq, Value::Obj(Obj::Int(n))) | (Value::Obj(Obj::Int(n)), seq)
            if op == BinaryOp::Mul =>
        {
            repeat(seq, *n).unwrap_or_else(|| Err(mismatch(&left, &right, op)))
        }
        _ => Err(mismatch(&left, &right, op)),
    }
}

#[cold]
fn mismatch(left: &Value, right: &Value, op: BinaryOp) -> EvalError {
    unsupported_operand(op.as_symbol(), left.type_name(), right.type_name())
}

fn concat(a: &[Value], b: &[Value]) -> Vec<Value> {
    a.iter().chain(b).cloned().collect()
}

/// `'ab' * 3`, `[0] * 4`. Negative counts give an empty sequence.
///
/// The result is reserved up front; a length past what can be allocated is
/// an overflow error rather than an abort.
fn repeat(seq: &Value, n: i64) -> Option<EvalResult> {
    let count = usize::try_from(n).unwrap_or(0);
    match seq {
        Value::Str(s) => Some(repeat_str(s, count).map(Value::string)),
        Value::Obj(Obj::List(items)) => Some(repeat_items(items, count).map(Value::list)),
        Value::Obj(Obj::Tuple(items)) => Some(repeat_items(items, count).map(Value::tuple)),
        _ => None,
    }
}

fn repeat_str(s: &str, count: usize) -> Result<String, EvalError> {
    let total = s.len().checked_mul(count).ok_or_else(repeat_overflow)?;
    let mut out = String::new();
    if total == 0 {
        return Ok(out);
    }
    out.try_reserve_exact(total).map_err(|_| repeat_overflow())?;
    for _ in 0..count {
        out.push_str(s);
    }
    Ok(out)
}

fn repeat_items(items: &[Value], count: usize) -> Result<Vec<Value>, EvalError> {
    let total = items.len().checked_mul(count).ok_or_else(repeat_overflow)?;
    let mut out = Vec::new();
    if total == 0 {
        return Ok(out);
    }
    out.try_reserve_exact(total).map_err(|_| repeat_overflow())?;
    for _ in 0..count {
        out.extend_from_slice(items);
    }
    Ok(out)
}

#[cold]
fn repeat_overflow() -> EvalError {
    integer_overflow("repetition")
}

/// `&`, `|`, `^` on two bools stay boolean.
fn eval_bool_bitwise(a: bool, b: bool, op: BinaryOp) -> Option<Value> {
    match op {
        BinaryOp::BitAnd => Some(Value::bool(a & b)),
        BinaryOp::BitOr => Some(Value::bool(a | b)),
        BinaryOp::BitXor => Some(Value::bool(a ^ b)),
        _ => None,
    }
}

/// Numeric operation, or `None` if `op` does not apply to these operands.
///
/// Zero divisors are rejected here, before dispatch on operand kind.
fn eval_numeric(a: Num, b: Num, op: BinaryOp) -> Option<EvalResult> {
    if matches!(op, BinaryOp::Div | BinaryOp::FloorDiv | BinaryOp::Mod) && b.to_float() == 0.0 {
        return Some(Err(divide_by_zero(op)));
    }
    // True division is float division for every operand kind.
    if op == BinaryOp::Div {
        return Some(Ok(Value::float(a.to_float() / b.to_float())));
    }
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => eval_int(x, y, op),
        _ => eval_float(a.to_float(), b.to_float(), op).map(Ok),
    }
}

fn checked(result: Option<i64>, operation: &str) -> EvalResult {
    result
        .map(Value::int)
        .ok_or_else(|| integer_overflow(operation))
}

fn eval_int(a: i64, b: i64, op: BinaryOp) -> Option<EvalResult> {
    let result = match op {
        BinaryOp::Add => checked(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked(a.checked_mul(b), "multiplication"),
        BinaryOp::FloorDiv => checked(floor_div(a, b), "floor division"),
        BinaryOp::Mod => checked(floor_mod(a, b), "modulo"),
        BinaryOp::Pow => int_pow(a, b),
        BinaryOp::BitAnd => Ok(Value::int(a & b)),
        BinaryOp::BitOr => Ok(Value::int(a | b)),
        BinaryOp::BitXor => Ok(Value::int(a ^ b)),
        BinaryOp::Shl => shift_left(a, b),
        BinaryOp::Shr => shift_right(a, b),
        _ => return None,
    };
    Some(result)
}

/// Quotient rounded toward negative infinity.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    let r = a.checked_rem(b)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

/// Remainder with the sign of the divisor.
fn floor_mod(a: i64, b: i64) -> Option<i64> {
    let r = a.checked_rem(b)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        r.checked_add(b)
    } else {
        Some(r)
    }
}

/// `a ** b`; a negative exponent gives a float.
#[expect(
    clippy::cast_possible_truncation,
    reason = "exponents outside i32 overflow or underflow powi either way"
)]
fn int_pow(a: i64, b: i64) -> EvalResult {
    if b < 0 {
        let exp = b.max(i64::from(i32::MIN)) as i32;
        return Ok(Value::float(int_to_float(a).powi(exp)));
    }
    let exp = u32::try_from(b).map_err(|_| integer_overflow("exponentiation"))?;
    checked(a.checked_pow(exp), "exponentiation")
}

fn shift_left(a: i64, b: i64) -> EvalResult {
    if b < 0 {
        return Err(negative_shift());
    }
    if a == 0 {
        return Ok(Value::int(0));
    }
    let shift = u32::try_from(b)
        .ok()
        .filter(|s| *s < 64)
        .ok_or_else(|| integer_overflow("left shift"))?;
    let shifted = a << shift;
    if shifted >> shift == a {
        Ok(Value::int(shifted))
    } else {
        Err(integer_overflow("left shift"))
    }
}

fn shift_right(a: i64, b: i64) -> EvalResult {
    if b < 0 {
        return Err(negative_shift());
    }
    let shift = u32::try_from(b.min(63)).unwrap_or(63);
    Ok(Value::int(a >> shift))
}

fn eval_float(a: f64, b: f64, op: BinaryOp) -> Option<Value> {
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Pow => a.powf(b),
        BinaryOp::FloorDiv => (a / b).floor(),
        BinaryOp::Mod => {
            let r = a % b;
            if r != 0.0 && ((r < 0.0) != (b < 0.0)) {
                r + b
            } else {
                r
            }
        }
        _ => return None,
    };
    Some(Value::float(result))
}
