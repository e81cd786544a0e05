//! Error types for expression evaluation and eggex compilation.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` is a closed set of categories. Factory functions (e.g.
//! `divide_by_zero()`) are the public API: they populate both `kind` and
//! `message`.
//!
//! Two kinds are *host-level*: `TypeMismatch` and `Lookup` come out of the
//! operator and access helpers, and the top-level evaluator rewrites them
//! with [`EvalError::classify`] into `ExprType` and `ExprEval`. Every other
//! kind already names a precise failure and passes through unchanged.

use std::fmt;

use ysh_ir::{BinaryOp, Span};

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Variables
    UndefinedVariable {
        name: String,
    },

    // Classified at the top level
    /// Type mismatch surfaced by evaluation.
    ExprType {
        message: String,
    },
    /// Missing entry, bad index, malformed operand and similar failures.
    ExprEval {
        message: String,
    },

    // Arithmetic
    DivideByZero {
        op: BinaryOp,
    },

    // Regex
    /// The match engine rejected a pattern. Fatal.
    InvalidRegex {
        pattern: String,
    },
    /// Eggex compilation or rendering failed.
    Eggex {
        message: String,
    },

    // Language features
    /// Syntax that parses but is reserved for later. Fatal.
    Reserved {
        feature: String,
    },
    Unsupported {
        feature: String,
    },

    // Resources
    RecursionLimit {
        limit: usize,
    },

    /// Raised by a host callable.
    Callee {
        name: String,
        message: String,
    },

    // Host-level, rewritten by `classify`
    TypeMismatch {
        message: String,
    },
    /// Attribute, key or value failure.
    Lookup {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedVariable { name } => write!(f, "Undefined variable '{name}'"),
            Self::ExprType { message } => write!(f, "Type error in expression: {message}"),
            Self::ExprEval { message }
            | Self::Eggex { message }
            | Self::TypeMismatch { message }
            | Self::Lookup { message } => write!(f, "{message}"),
            Self::DivideByZero { op } => match op {
                BinaryOp::Div => write!(f, "divide by zero"),
                _ => write!(f, "integer division or modulo by zero"),
            },
            Self::InvalidRegex { pattern } => write!(f, "Invalid regex {pattern}"),
            Self::Reserved { feature } => write!(f, "{feature} reserved but not implemented"),
            Self::Unsupported { feature } => write!(f, "{feature} not implemented"),
            Self::RecursionLimit { limit } => {
                write!(f, "maximum expression depth exceeded (limit: {limit})")
            }
            Self::Callee { name, message } => write!(f, "{name}: {message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable error message; equals `kind.to_string()`.
    pub message: String,
    /// Source location where the error occurred, when known.
    pub span: Option<Span>,
}

impl EvalError {
    /// Create an error from a structured kind.
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            span: None,
        }
    }

    /// Attach a source span to this error.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach `span` unless the error already points somewhere.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() && !span.is_dummy() {
            self.span = Some(span);
        }
        self
    }

    /// Exit status the statement executor should report.
    ///
    /// Pattern errors and reserved syntax are fatal with status 2, like a
    /// usage error; everything else fails with status 1.
    pub fn status(&self) -> i32 {
        match self.kind {
            EvalErrorKind::InvalidRegex { .. } | EvalErrorKind::Reserved { .. } => 2,
            _ => 1,
        }
    }

    /// Rewrite host-level failures into the expression error categories,
    /// keeping their message text. Other kinds are returned unchanged.
    #[must_use]
    pub fn classify(self) -> Self {
        let span = self.span;
        let classified = match self.kind {
            EvalErrorKind::TypeMismatch { message } => expr_type_error(&message),
            EvalErrorKind::Lookup { message } => expr_eval_error(&message),
            _ => return self,
        };
        Self { span, ..classified }
    }

    /// Whether this error still needs [`classify`](Self::classify).
    pub fn is_host_level(&self) -> bool {
        matches!(
            self.kind,
            EvalErrorKind::TypeMismatch { .. } | EvalErrorKind::Lookup { .. }
        )
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

// Variable Errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

// Classified Errors

/// Expression type error, wrapping a host-level message.
#[cold]
pub fn expr_type_error(message: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ExprType {
        message: message.to_string(),
    })
}

/// Generic expression evaluation error, wrapping a host-level message.
#[cold]
pub fn expr_eval_error(message: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ExprEval {
        message: format!("Expression eval error: {message}"),
    })
}

#[cold]
fn eval_failure(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ExprEval {
        message: message.into(),
    })
}

// Operator Errors

#[cold]
pub fn divide_by_zero(op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivideByZero { op })
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    eval_failure(format!("integer overflow in {operation}"))
}

#[cold]
pub fn negative_shift() -> EvalError {
    lookup_error("negative shift count")
}

/// Binary operator applied to operands it does not support.
#[cold]
pub fn unsupported_operand(op: &str, left: &str, right: &str) -> EvalError {
    type_mismatch(&format!(
        "unsupported operand type(s) for {op}: '{left}' and '{right}'"
    ))
}

#[cold]
pub fn bad_unary_operand(op: &str, type_name: &str) -> EvalError {
    type_mismatch(&format!("bad operand type for unary {op}: '{type_name}'"))
}

#[cold]
pub fn unorderable(op: &str, left: &str, right: &str) -> EvalError {
    type_mismatch(&format!(
        "'{op}' not supported between instances of '{left}' and '{right}'"
    ))
}

// Literal Errors

#[cold]
pub fn invalid_int_literal(text: &str) -> EvalError {
    lookup_error(&format!("invalid integer literal '{text}'"))
}

#[cold]
pub fn invalid_float(text: &str) -> EvalError {
    lookup_error(&format!("could not convert string to float: '{text}'"))
}

// Comparison Errors

#[cold]
pub fn approx_eq_left_not_str() -> EvalError {
    eval_failure("~== expects a string on the left")
}

#[cold]
pub fn approx_eq_bad_right() -> EvalError {
    eval_failure("~== expects Str, Int, or Bool on the right")
}

/// The match engine rejected a pattern; `pattern` is the right operand as
/// written in literal syntax.
#[cold]
pub fn invalid_regex(pattern: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidRegex {
        pattern: pattern.to_string(),
    })
}

// Access Errors

#[cold]
pub fn dict_entry_not_found() -> EvalError {
    eval_failure("dict entry not found")
}

#[cold]
pub fn index_out_of_range() -> EvalError {
    eval_failure("index out of range")
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    type_mismatch(&format!("'{type_name}' object is not callable"))
}

#[cold]
pub fn not_subscriptable(type_name: &str) -> EvalError {
    type_mismatch(&format!("'{type_name}' object is not subscriptable"))
}

#[cold]
pub fn not_iterable(type_name: &str) -> EvalError {
    type_mismatch(&format!("'{type_name}' object is not iterable"))
}

#[cold]
pub fn unhashable(type_name: &str) -> EvalError {
    type_mismatch(&format!("unhashable type: '{type_name}'"))
}

#[cold]
pub fn bad_index_type(container: &str, index: &str) -> EvalError {
    type_mismatch(&format!(
        "'{container}' indices must be integers or slices, not '{index}'"
    ))
}

#[cold]
pub fn no_attribute(type_name: &str, attr: &str) -> EvalError {
    lookup_error(&format!("'{type_name}' object has no attribute '{attr}'"))
}

#[cold]
pub fn plus_equals_unsupported(type_name: &str) -> EvalError {
    eval_failure(format!("Object of type '{type_name}' doesn't support +="))
}

// Eggex Errors

#[cold]
pub fn cant_splice(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Eggex {
        message: format!("Can't splice object of type '{type_name}' into regex"),
    })
}

/// A multi-byte string inside a character class is ambiguous.
#[cold]
pub fn ambiguous_class_bytes() -> EvalError {
    EvalError::from_kind(EvalErrorKind::Eggex {
        message: "Express these bytes as character literals to avoid confusing them \
                  with encoded characters"
            .to_string(),
    })
}

#[cold]
pub fn non_canonical_regex(node: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Eggex {
        message: format!("eggex node {node} must be compiled before rendering"),
    })
}

// Feature Errors

#[cold]
pub fn reserved(feature: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Reserved {
        feature: feature.to_string(),
    })
}

#[cold]
pub fn unsupported(feature: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Unsupported {
        feature: feature.to_string(),
    })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { limit })
}

/// Error for a host callable to return.
#[cold]
pub fn callee_error(name: &str, message: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Callee {
        name: name.to_string(),
        message: message.to_string(),
    })
}

// Host-level Errors

#[cold]
pub fn type_mismatch(message: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        message: message.to_string(),
    })
}

#[cold]
pub fn lookup_error(message: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Lookup {
        message: message.to_string(),
    })
}
