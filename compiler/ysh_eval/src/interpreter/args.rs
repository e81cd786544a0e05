//! Call argument lists.

use ysh_ir::{ArgList, ExprKind};
use ysh_value::{not_iterable, type_mismatch, EvalError, Kwargs, Obj, Value};

use super::Evaluator;

impl Evaluator<'_> {
    /// Evaluate a call's arguments into positional values and named values.
    ///
    /// Evaluation is strictly left to right, positional arguments first.
    /// `...xs` splices the elements of a sequence into the positional list;
    /// a nameless named argument merges a mapping into the named values,
    /// later keys overwriting earlier ones.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn eval_arg_list(&mut self, args: &ArgList) -> Result<(Vec<Value>, Kwargs), EvalError> {
        self.eval_args(args).map_err(EvalError::classify)
    }

    pub(crate) fn eval_args(&mut self, args: &ArgList) -> Result<(Vec<Value>, Kwargs), EvalError> {
        let mut positional = Vec::with_capacity(args.positional.len());
        for arg in &args.positional {
            if let ExprKind::Spread(inner) = &arg.kind {
                let value = self.eval(inner)?;
                spread_into(&mut positional, &value).map_err(|e| e.or_span(arg.span))?;
            } else {
                positional.push(self.eval(arg)?);
            }
        }

        let mut named = Kwargs::with_capacity(args.named.len());
        for arg in &args.named {
            let value = self.eval(&arg.value)?;
            match &arg.name {
                Some(name) => {
                    named.insert(name.val.clone(), value);
                }
                None => merge_named(&mut named, &value).map_err(|e| e.or_span(arg.value.span))?,
            }
        }
        Ok((positional, named))
    }
}

/// Append the elements of a spread sequence.
fn spread_into(out: &mut Vec<Value>, value: &Value) -> Result<(), EvalError> {
    match value {
        Value::Obj(Obj::List(items) | Obj::Tuple(items)) => out.extend(items.iter().cloned()),
        Value::StrArray(items) => out.extend(
            items
                .iter()
                .map(|item| item.clone().map_or(Value::NULL, Value::string)),
        ),
        Value::Obj(Obj::Range(range)) => out.extend(range.iter().map(Value::int)),
        _ => return Err(not_iterable(value.type_name())),
    }
    Ok(())
}

/// Merge a double-spread mapping into the named arguments.
fn merge_named(named: &mut Kwargs, value: &Value) -> Result<(), EvalError> {
    match value {
        Value::Obj(Obj::Dict(entries)) => {
            for (key, item) in entries.iter() {
                let Some(name) = key.as_str() else {
                    return Err(type_mismatch(&format!(
                        "keywords must be Str, not '{}'",
                        key.to_value().type_name()
                    )));
                };
                named.insert(name.to_string(), item.clone());
            }
        }
        Value::AssocArray(entries) => {
            for (key, item) in entries.iter() {
                named.insert(key.clone(), Value::string(item.clone()));
            }
        }
        _ => {
            return Err(type_mismatch(&format!(
                "argument after ... must be a Dict, not '{}'",
                value.type_name()
            )))
        }
    }
    Ok(())
}
