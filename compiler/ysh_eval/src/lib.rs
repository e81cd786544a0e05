#![allow(
    clippy::result_large_err,
    reason = "EvalError carries its message and span inline; every fallible path returns it"
)]
//! YSH Eval - expression evaluator and eggex compiler.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Evaluator`: the recursive tree walker, built with `EvaluatorBuilder`
//! - `evaluate_binary` / `evaluate_unary`: direct enum-based operator dispatch
//! - `evaluate_compare`: comparison links that need no host capability
//! - `Evaluator::eval_regex`: eggex compilation to canonical form
//! - `host`: the capabilities the evaluator borrows from the shell, with
//!   reference implementations
//! - `SharedOptions`: the scoped option stack shared with the process
//!   executor
//!
//! # Re-exports
//!
//! Value and error types come from `ysh_value` and are re-exported here:
//! - `Value`, `Obj`, `DictKey`, `Place`, `FunctionValue`, `EggexValue`
//! - `EvalError`, `EvalErrorKind`, `EvalResult`

mod access;
mod compare;
mod eggex;
pub mod host;
mod interpreter;
pub mod literals;
mod operators;
mod options;
mod stack;
mod unary_operators;

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

use std::sync::Once;

pub use ysh_value::{
    DictKey, EggexValue, EvalError, EvalErrorKind, EvalResult, FunctionValue, Kwargs, Obj, Place,
    UserObject, Value,
};

pub use access::{get_attr, subscript};
pub use compare::{approx_eq, contains, evaluate_compare};
pub use eggex::PosixEreRenderer;
pub use interpreter::{EvalLimits, Evaluator, EvaluatorBuilder};
pub use operators::evaluate_binary;
pub use options::{ExprOptions, OptionGuard, OptionStack, SharedOptions};
pub use stack::ensure_sufficient_stack;
pub use unary_operators::evaluate_unary;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `YSH_LOG=ysh_eval=debug` (or `RUST_LOG`); does nothing when
/// neither is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = if let Ok(directives) = std::env::var("YSH_LOG") {
            EnvFilter::new(directives)
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter)
            .init();
    });
}
