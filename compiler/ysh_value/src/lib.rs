#![allow(
    clippy::result_large_err,
    reason = "EvalError carries its message and span inline; every fallible path returns it"
)]
//! YSH Value - runtime values and evaluation errors.
//!
//! This crate provides:
//! - The value model (`Value`, `Obj`, `DictKey`, `Heap`): shell-native
//!   strings, string arrays and associative arrays, plus a closed set of
//!   richer payloads carried inside `Value::Obj`
//! - Composite payloads (`FunctionValue`, `RangeValue`, `SliceValue`,
//!   `EggexValue`, `UserObject`)
//! - Assignment target descriptors (`Place`)
//! - Evaluation errors (`EvalError`, `EvalErrorKind`, `EvalResult`) and their
//!   factory functions
//!
//! # Value Types
//!
//! All heap allocations go through `Value::` factory methods; `Heap<T>`
//! enforces this and provides thread-safe reference counting via `Arc`.

mod errors;
mod place;
mod value;

pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use place::Place;
pub use value::{
    DictKey, EggexValue, FunctionValue, Heap, HostFn, Kwargs, Obj, RangeValue, SliceValue,
    UserObject, Value, int_to_float,
};

// Re-export error constructors for use by other crates
pub use errors::{
    // Eggex errors
    ambiguous_class_bytes,
    // Comparison errors
    approx_eq_bad_right,
    approx_eq_left_not_str,
    bad_index_type,
    // Operator errors
    bad_unary_operand,
    callee_error,
    cant_splice,
    // Access errors
    dict_entry_not_found,
    divide_by_zero,
    // Wrapping
    expr_eval_error,
    expr_type_error,
    index_out_of_range,
    integer_overflow,
    invalid_float,
    invalid_int_literal,
    invalid_regex,
    lookup_error,
    negative_shift,
    no_attribute,
    non_canonical_regex,
    not_callable,
    not_iterable,
    not_subscriptable,
    plus_equals_unsupported,
    recursion_limit_exceeded,
    // Reserved and unsupported features
    reserved,
    type_mismatch,
    // Variable errors
    undefined_variable,
    unhashable,
    unorderable,
    unsupported,
    unsupported_operand,
};
