//! Tree-walking expression evaluator.
//!
//! # Architecture
//!
//! [`Evaluator::eval_expr`] is the entry point the statement executor calls
//! once per expression. It pushes the expression option scope, recurses
//! through `eval`, and classifies host-level errors on the way out.
//! Helpers live in sibling modules:
//!
//! - `args` - call argument lists, including spread
//! - `place` - assignment targets and `+=`
//! - `crate::eggex` - eggex compilation (an `impl` block on `Evaluator`)
//!
//! The evaluator owns no state beyond its recursion depth. Variables,
//! words, processes and pattern matching are borrowed capabilities, see
//! [`crate::host`].

mod args;
mod builder;
mod place;

pub use builder::EvaluatorBuilder;

use smallvec::SmallVec;
use ysh_ir::{AttrOp, BinaryOp, CommandSub, CommandSubKind, CompareOp, Expr, ExprKind, Span};
use ysh_value::{
    invalid_regex, not_callable, recursion_limit_exceeded, reserved, type_mismatch,
    undefined_variable, unhashable, unsupported, unsupported_operand, DictKey, EggexValue,
    EvalError, EvalResult, Obj, Value,
};

use crate::access::{get_attr, subscript};
use crate::compare::{approx_eq, evaluate_compare};
use crate::host::{
    FieldSplitter, GlobMatcher, PatternRenderer, ProcessExecutor, RegexMatcher, Scope, VarStore,
    WordEvaluator,
};
use crate::literals::{eval_const, eval_single_quoted};
use crate::operators::evaluate_binary;
use crate::options::{ExprOptions, SharedOptions};
use crate::stack::ensure_sufficient_stack;
use crate::unary_operators::evaluate_unary;

/// Resource limits for one evaluator.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct EvalLimits {
    /// Maximum expression nesting depth. `None` leaves recursion bounded only
    /// by memory; the stack grows on demand.
    pub max_depth: Option<usize>,
}

/// Expression evaluator over borrowed shell capabilities.
///
/// Build one with [`EvaluatorBuilder`].
pub struct Evaluator<'a> {
    pub(crate) mem: &'a mut dyn VarStore,
    pub(crate) word_ev: &'a mut dyn WordEvaluator,
    pub(crate) shell_ex: &'a mut dyn ProcessExecutor,
    splitter: Box<dyn FieldSplitter + 'a>,
    glob: Box<dyn GlobMatcher + 'a>,
    regex: Box<dyn RegexMatcher + 'a>,
    renderer: Box<dyn PatternRenderer + 'a>,
    options: SharedOptions,
    limits: EvalLimits,
    depth: usize,
}

impl Evaluator<'_> {
    /// Option stack shared with the process executor.
    pub fn options(&self) -> &SharedOptions {
        &self.options
    }

    pub fn limits(&self) -> EvalLimits {
        self.limits
    }

    /// Evaluate a top-level expression.
    ///
    /// Command substitutions run with `COMMAND_SUB_ERREXIT` for the duration;
    /// the option is popped on every exit path. Type mismatches come back as
    /// "Type error in expression" and lookup failures as "Expression eval
    /// error"; every other error keeps its kind.
    #[tracing::instrument(level = "debug", skip_all, fields(span = ?node.span))]
    pub fn eval_expr(&mut self, node: &Expr) -> EvalResult {
        let _options = self.options.push_scoped(ExprOptions::COMMAND_SUB_ERREXIT);
        self.eval(node).map_err(EvalError::classify)
    }

    /// Recursive entry: depth guard, then dispatch.
    pub(crate) fn eval(&mut self, node: &Expr) -> EvalResult {
        if let Some(limit) = self.limits.max_depth {
            if self.depth >= limit {
                return Err(recursion_limit_exceeded(limit).with_span(node.span));
            }
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| self.eval_inner(node));
        self.depth -= 1;
        result
    }

    fn eval_inner(&mut self, node: &Expr) -> EvalResult {
        match &node.kind {
            ExprKind::Const(tok) => eval_const(tok),
            ExprKind::Var(tok) => self.lookup_var(&tok.val, tok.span),

            // Words and processes
            ExprKind::CommandSub(sub) => self.eval_command_sub(sub),
            ExprKind::ShArrayLiteral(node) => {
                let words = self.word_ev.eval_word_sequence(&node.words)?;
                Ok(Value::strings(words))
            }
            ExprKind::DoubleQuoted(node) => self.word_ev.eval_double_quoted(node).map(Value::string),
            ExprKind::SingleQuoted(node) => eval_single_quoted(node).map(Value::string),
            ExprKind::BracedVarSub(node) => {
                self.word_ev.eval_braced_var_sub(node).map(Value::string)
            }
            ExprKind::SimpleVarSub(node) => {
                self.word_ev.eval_simple_var_sub(node).map(Value::string)
            }

            // Operators
            ExprKind::Unary { op, op_span, child } => {
                let operand = self.eval(child)?;
                evaluate_unary(&operand, *op).map_err(|e| e.or_span(*op_span))
            }
            ExprKind::Binary {
                op,
                op_span,
                left,
                right,
            } => self.eval_binary(*op, *op_span, left, right),
            ExprKind::Range { lower, upper } => {
                let lo = self.eval(lower)?;
                let hi = self.eval(upper)?;
                match (lo.as_int(), hi.as_int()) {
                    (Some(lo), Some(hi)) => Ok(Value::range(lo, hi)),
                    _ => Err(unsupported_operand(":", lo.type_name(), hi.type_name())
                        .or_span(node.span)),
                }
            }
            ExprKind::Slice { lower, upper } => {
                let lower = self.eval_slice_bound(lower.as_deref())?;
                let upper = self.eval_slice_bound(upper.as_deref())?;
                Ok(Value::slice(lower, upper))
            }
            ExprKind::Compare {
                left,
                ops,
                comparators,
            } => self.eval_compare(left, ops, comparators),
            ExprKind::IfExp { test, body, orelse } => {
                if self.eval(test)?.is_truthy() {
                    self.eval(body)
                } else {
                    self.eval(orelse)
                }
            }

            // Collections
            ExprKind::List(items) => Ok(Value::list(self.eval_all(items)?)),
            ExprKind::Tuple(items) => Ok(Value::tuple(self.eval_all(items)?)),
            ExprKind::Dict { keys, values } => self.eval_dict(keys, values),
            ExprKind::Implicit => Err(unsupported("Implicit value outside a dict literal")
                .with_span(node.span)),

            // Reserved syntax
            ExprKind::ListComp { .. } => Err(reserved("List comprehension").with_span(node.span)),
            ExprKind::GeneratorExp { .. } => {
                Err(reserved("Generator expression").with_span(node.span))
            }
            ExprKind::Lambda { .. } => Err(reserved("Lambda").with_span(node.span)),

            // Calls and access
            ExprKind::FuncCall { func, args } => {
                let callee = self.eval(func)?;
                let Value::Obj(Obj::Func(f)) = &callee else {
                    return Err(not_callable(callee.type_name()).with_span(func.span));
                };
                let (positional, named) = self.eval_args(args)?;
                f.call(positional, named)
            }
            ExprKind::Subscript { obj, indices } => {
                let obj = self.eval(obj)?;
                let index = self.eval_indices(indices)?;
                subscript(&obj, &index)
            }
            ExprKind::Attribute {
                obj,
                op,
                op_span,
                attr,
            } => {
                let obj = self.eval(obj)?;
                match op {
                    AttrOp::Dot => get_attr(&obj, &attr.val).map_err(|e| e.or_span(attr.span)),
                    // d->key is d['key']
                    AttrOp::RArrow => subscript(&obj, &Value::string(attr.val.clone()))
                        .map_err(|e| e.or_span(*op_span)),
                    AttrOp::DColon => Err(unsupported("Static access with '::'").with_span(*op_span)),
                }
            }
            ExprKind::RegexLiteral { regex, flags } => {
                let compiled = self.eval_regex((**regex).clone())?;
                Ok(Value::regex(EggexValue {
                    regex: compiled,
                    flags: flags.iter().map(|f| f.val.clone()).collect(),
                }))
            }
            ExprKind::Spread(_) => {
                Err(unsupported("Spread outside an argument list").with_span(node.span))
            }
        }
    }

    /// Look up a variable for an expression.
    pub(crate) fn lookup_var(&self, name: &str, span: Span) -> EvalResult {
        self.mem
            .lookup(name, Scope::LocalOrGlobal)
            .ok_or_else(|| undefined_variable(name).with_span(span))
    }

    fn eval_all(&mut self, items: &[Expr]) -> Result<Vec<Value>, EvalError> {
        items.iter().map(|item| self.eval(item)).collect()
    }

    /// Evaluate subscript indices. Several indices form one tuple key.
    pub(crate) fn eval_indices(&mut self, indices: &[Expr]) -> EvalResult {
        let mut values: SmallVec<[Value; 2]> = SmallVec::with_capacity(indices.len());
        for index in indices {
            values.push(self.eval(index)?);
        }
        if values.len() == 1 {
            if let Some(value) = values.pop() {
                return Ok(value);
            }
        }
        Ok(Value::tuple(values.into_vec()))
    }

    fn eval_slice_bound(&mut self, bound: Option<&Expr>) -> Result<Option<i64>, EvalError> {
        let Some(expr) = bound else {
            return Ok(None);
        };
        let value = self.eval(expr)?;
        match value {
            Value::Obj(Obj::Int(n)) => Ok(Some(n)),
            Value::Obj(Obj::Null) => Ok(None),
            _ => Err(type_mismatch(&format!(
                "slice indices must be Int or null, not '{}'",
                value.type_name()
            ))
            .or_span(expr.span)),
        }
    }

    fn eval_binary(&mut self, op: BinaryOp, op_span: Span, left: &Expr, right: &Expr) -> EvalResult {
        let left = self.eval(left)?;
        // and/or return the operand that decided the result
        match op {
            BinaryOp::And if !left.is_truthy() => return Ok(left),
            BinaryOp::Or if left.is_truthy() => return Ok(left),
            BinaryOp::And | BinaryOp::Or => return self.eval(right),
            _ => {}
        }
        let right = self.eval(right)?;
        evaluate_binary(left, right, op).map_err(|e| e.or_span(op_span))
    }

    /// `{k: v, name}`. Keys are evaluated before any value.
    fn eval_dict(&mut self, keys: &[Expr], values: &[Expr]) -> EvalResult {
        let evaluated_keys = self.eval_all(keys)?;
        let mut entries = indexmap::IndexMap::with_capacity(evaluated_keys.len());
        for ((key, key_expr), value_expr) in evaluated_keys.into_iter().zip(keys).zip(values) {
            let value = if matches!(value_expr.kind, ExprKind::Implicit) {
                let Some(name) = key.as_str() else {
                    return Err(type_mismatch(&format!(
                        "implicit dict value needs a Str key, not '{}'",
                        key.type_name()
                    ))
                    .or_span(key_expr.span));
                };
                self.lookup_var(name, key_expr.span)?
            } else {
                self.eval(value_expr)?
            };
            let key = DictKey::from_value(&key)
                .ok_or_else(|| unhashable(key.type_name()).or_span(key_expr.span))?;
            entries.insert(key, value);
        }
        Ok(Value::dict(entries))
    }

    fn eval_command_sub(&mut self, sub: &CommandSub) -> EvalResult {
        match sub.kind {
            CommandSubKind::Dollar => self.shell_ex.run_command_sub(sub).map(Value::string),
            CommandSubKind::At => {
                let stdout = self.shell_ex.run_command_sub(sub)?;
                Ok(Value::strings(self.splitter.split_for_word_eval(&stdout)))
            }
            CommandSubKind::Caret => {
                tracing::warn!(span = ?sub.span, "^(...) block literal is reserved; evaluating to null");
                Ok(Value::NULL)
            }
        }
    }

    /// Comparison chain.
    ///
    /// Stops at the first false link without evaluating later operands.
    /// `~~`, `!~~` and `~==` end the chain with their own result.
    fn eval_compare(
        &mut self,
        left: &Expr,
        ops: &[(CompareOp, Span)],
        comparators: &[Expr],
    ) -> EvalResult {
        let mut left = self.eval(left)?;
        for (&(op, op_span), right_expr) in ops.iter().zip(comparators) {
            let right = self.eval(right_expr)?;
            let result = match op {
                CompareOp::GlobMatch => return self.glob_match(&left, &right, op, op_span),
                CompareOp::NotGlobMatch => {
                    return self
                        .glob_match(&left, &right, op, op_span)
                        .map(|v| Value::bool(!v.is_truthy()));
                }
                CompareOp::ApproxEq => {
                    return approx_eq(&left, &right)
                        .map(Value::bool)
                        .map_err(|e| e.or_span(op_span));
                }
                CompareOp::RegexMatch => self.eval_match(&left, &right, true, op_span)?,
                CompareOp::NotRegexMatch => !self.eval_match(&left, &right, false, op_span)?,
                _ => evaluate_compare(&left, &right, op).map_err(|e| e.or_span(op_span))?,
            };
            if !result {
                return Ok(Value::bool(false));
            }
            left = right;
        }
        Ok(Value::bool(true))
    }

    /// `left ~~ right`: `right` is the glob.
    fn glob_match(&self, left: &Value, right: &Value, op: CompareOp, op_span: Span) -> EvalResult {
        match (left.as_str(), right.as_str()) {
            (Some(text), Some(pattern)) => Ok(Value::bool(self.glob.fnmatch(pattern, text))),
            _ => Err(
                unsupported_operand(op.as_symbol(), left.type_name(), right.type_name())
                    .or_span(op_span),
            ),
        }
    }

    /// Run a regex match and maintain the match side channel.
    ///
    /// With `set_match_result`, a match records its groups and a miss clears
    /// them; without it the side channel is left alone.
    fn eval_match(
        &mut self,
        left: &Value,
        right: &Value,
        set_match_result: bool,
        op_span: Span,
    ) -> Result<bool, EvalError> {
        let pattern = match right {
            Value::Str(s) => (**s).clone(),
            Value::Obj(Obj::Regex(eggex)) => self.renderer.render(&eggex.regex)?,
            _ => return Err(invalid_regex(&right.to_string()).with_span(op_span)),
        };
        let Some(text) = left.as_str() else {
            return Err(unsupported_operand("~", left.type_name(), right.type_name())
                .or_span(op_span));
        };
        let found = self.regex.regex_match(&pattern, text).map_err(|err| {
            tracing::debug!(%pattern, error = %err, "match engine rejected pattern");
            invalid_regex(&right.to_string()).with_span(op_span)
        })?;
        match found {
            Some(groups) => {
                if set_match_result {
                    tracing::trace!(groups = groups.len(), "setting match groups");
                    self.mem.set_match_groups(groups);
                }
                Ok(true)
            }
            None => {
                if set_match_result {
                    tracing::trace!("clearing match groups");
                    self.mem.clear_match_groups();
                }
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
