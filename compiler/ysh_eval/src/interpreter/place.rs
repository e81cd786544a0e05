//! Assignment targets.
//!
//! Resolving a target evaluates its object and index eagerly but never
//! assigns; the statement executor hands the resulting [`Place`] to
//! [`VarStore::assign`](crate::host::VarStore::assign).

use ysh_ir::{AttrOp, BinaryOp, Expr, ExprKind, PlaceExpr, Token};
use ysh_value::{plus_equals_unsupported, unsupported, EvalError, EvalResult, Obj, Place, Value};

use super::Evaluator;
use crate::operators::evaluate_binary;

impl Evaluator<'_> {
    /// Resolve a `setvar` target to a [`Place`].
    ///
    /// `d->key` resolves to an index place keyed by the string `'key'`.
    /// Tuple and starred targets are not supported.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn eval_place_expr(&mut self, place: &PlaceExpr) -> Result<Place, EvalError> {
        let resolved = match place {
            PlaceExpr::Var(tok) => Ok(Place::named(tok.val.clone())),
            PlaceExpr::Subscript { obj, indices } => self.index_place(obj, indices),
            PlaceExpr::Attribute { obj, op, attr, .. } => self.attr_place(obj, *op, attr),
            PlaceExpr::Tuple(_) => Err(unsupported("Tuple unpacking")),
            PlaceExpr::Starred(_) => Err(unsupported("Starred assignment target")),
        };
        resolved.map_err(EvalError::classify)
    }

    /// Resolve an expression written as an assignment target.
    pub fn eval_lhs(&mut self, node: &Expr) -> Result<Place, EvalError> {
        let resolved = match &node.kind {
            ExprKind::Var(tok) => Ok(Place::named(tok.val.clone())),
            ExprKind::Subscript { obj, indices } => self.index_place(obj, indices),
            ExprKind::Attribute { obj, op, attr, .. } => self.attr_place(obj, *op, attr),
            _ => Err(unsupported("Assignment to this expression").with_span(node.span)),
        };
        resolved.map_err(EvalError::classify)
    }

    /// `x += rhs`: the current value of `x` plus `rhs`.
    ///
    /// Only numbers support `+=`. The caller assigns the result.
    pub fn eval_plus_equals(&mut self, name: &Token, rhs: Value) -> EvalResult {
        let current = self.lookup_var(&name.val, name.span)?;
        if !matches!(current, Value::Obj(Obj::Int(_) | Obj::Float(_))) {
            return Err(plus_equals_unsupported(current.type_name()).with_span(name.span));
        }
        evaluate_binary(current, rhs, BinaryOp::Add)
            .map_err(|e| e.or_span(name.span))
            .map_err(EvalError::classify)
    }

    fn index_place(&mut self, obj: &Expr, indices: &[Expr]) -> Result<Place, EvalError> {
        let obj = self.eval(obj)?;
        let index = self.eval_indices(indices)?;
        Ok(Place::ObjIndex { obj, index })
    }

    fn attr_place(&mut self, obj: &Expr, op: AttrOp, attr: &Token) -> Result<Place, EvalError> {
        let obj = self.eval(obj)?;
        Ok(match op {
            AttrOp::RArrow => Place::ObjIndex {
                obj,
                index: Value::string(attr.val.clone()),
            },
            AttrOp::Dot | AttrOp::DColon => Place::ObjAttr {
                obj,
                attr: attr.val.clone(),
            },
        })
    }
}
