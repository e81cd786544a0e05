//! Expression nodes.

use std::fmt;

use super::operators::{AttrOp, BinaryOp, CompareOp, UnaryOp};
use super::regex::Regex;
use super::word::{
    BracedVarSub, CommandSub, DoubleQuoted, ShArrayLiteral, SimpleVarSub, SingleQuoted,
};
use crate::{Span, Spanned, Token};

/// Expression node.
#[derive(Clone, Eq, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Node without a source location.
    pub fn synthetic(kind: ExprKind) -> Self {
        Expr {
            kind,
            span: Span::DUMMY,
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

/// Expression variants.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExprKind {
    /// Literal constant: numbers, `null`, `true`, bare names, char literals.
    Const(Token),

    /// Variable reference.
    Var(Token),

    /// `$(cmd)`, `@(cmd)`, `^(cmd)`
    CommandSub(CommandSub),

    /// `%(a b c)`
    ShArrayLiteral(ShArrayLiteral),

    DoubleQuoted(DoubleQuoted),
    SingleQuoted(SingleQuoted),
    BracedVarSub(BracedVarSub),
    SimpleVarSub(SimpleVarSub),

    Unary {
        op: UnaryOp,
        op_span: Span,
        child: Box<Expr>,
    },

    Binary {
        op: BinaryOp,
        op_span: Span,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `lower:upper`
    Range {
        lower: Box<Expr>,
        upper: Box<Expr>,
    },

    /// `a[lower:upper]` index; either bound may be missing.
    Slice {
        lower: Option<Box<Expr>>,
        upper: Option<Box<Expr>>,
    },

    /// `a < b <= c`. `ops` and `comparators` have equal length; `ops[i]`
    /// compares the previous operand with `comparators[i]`.
    Compare {
        left: Box<Expr>,
        ops: Vec<(CompareOp, Span)>,
        comparators: Vec<Expr>,
    },

    /// `body if test else orelse`
    IfExp {
        test: Box<Expr>,
        body: Box<Expr>,
        orelse: Box<Expr>,
    },

    List(Vec<Expr>),
    Tuple(Vec<Expr>),

    /// `{k: v, name}`: a value of `Implicit` means "look up the key as a
    /// variable name".
    Dict {
        keys: Vec<Expr>,
        values: Vec<Expr>,
    },

    /// Placeholder value of a `{name}` dict entry.
    Implicit,

    /// `[x for x in xs]` (reserved)
    ListComp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },

    /// `(x for x in xs)` (reserved)
    GeneratorExp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },

    /// `|x| x + 1` (reserved)
    Lambda {
        params: Vec<Token>,
        body: Box<Expr>,
    },

    FuncCall {
        func: Box<Expr>,
        args: ArgList,
    },

    /// `obj[i]` or `obj[i, j]`
    Subscript {
        obj: Box<Expr>,
        indices: Vec<Expr>,
    },

    /// `obj.attr`, `obj->attr`, `obj::attr`
    Attribute {
        obj: Box<Expr>,
        op: AttrOp,
        op_span: Span,
        attr: Token,
    },

    /// `/ digit+ /`
    RegexLiteral {
        regex: Box<Regex>,
        flags: Vec<Token>,
    },

    /// `...xs`; only meaningful as a call argument.
    Spread(Box<Expr>),
}

/// `for lhs in iter if cond` clause of a comprehension.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Comprehension {
    pub lhs: Vec<Token>,
    pub iter: Expr,
    pub cond: Option<Expr>,
}

/// Named argument. A missing name marks a `...dict` double spread.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NamedArg {
    pub name: Option<Token>,
    pub value: Expr,
}

/// Call argument list: positional arguments, then named ones.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ArgList {
    pub positional: Vec<Expr>,
    pub named: Vec<NamedArg>,
}

/// Assignment target as written on the left of `setvar`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlaceExpr {
    Var(Token),
    Subscript {
        obj: Box<Expr>,
        indices: Vec<Expr>,
    },
    Attribute {
        obj: Box<Expr>,
        op: AttrOp,
        op_span: Span,
        attr: Token,
    },
    /// `a, b = ...` (parsed, not supported)
    Tuple(Vec<PlaceExpr>),
    /// `*rest = ...` (parsed, not supported)
    Starred(Box<PlaceExpr>),
}
