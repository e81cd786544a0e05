//! Unary operator implementations.

use ysh_ir::UnaryOp;
use ysh_value::{bad_unary_operand, integer_overflow, EvalResult, Obj, Value};

/// Evaluate a unary operation on an evaluated operand.
pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> EvalResult {
    match op {
        UnaryOp::Not => Ok(Value::bool(!operand.is_truthy())),
        UnaryOp::Neg => match operand {
            Value::Obj(Obj::Int(n)) => n
                .checked_neg()
                .map(Value::int)
                .ok_or_else(|| integer_overflow("negation")),
            Value::Obj(Obj::Bool(b)) => Ok(Value::int(-i64::from(*b))),
            Value::Obj(Obj::Float(f)) => Ok(Value::float(-f)),
            _ => Err(bad_unary_operand(op.as_symbol(), operand.type_name())),
        },
        UnaryOp::BitNot => match operand {
            Value::Obj(Obj::Int(n)) => Ok(Value::int(!n)),
            Value::Obj(Obj::Bool(b)) => Ok(Value::int(!i64::from(*b))),
            _ => Err(bad_unary_operand(op.as_symbol(), operand.type_name())),
        },
    }
}
