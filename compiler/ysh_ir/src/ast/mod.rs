//! Syntax tree nodes.

mod expr;
mod operators;
mod regex;
mod word;

pub use expr::{ArgList, Comprehension, Expr, ExprKind, NamedArg, PlaceExpr};
pub use operators::{AttrOp, BinaryOp, CompareOp, UnaryOp};
pub use regex::{
    ClassLiteralTerm, PerlClass, PosixClass, PrimitiveId, Regex, RepeatOp, Speck, SpeckId,
};
pub use word::{
    BracedVarSub, CommandSub, CommandSubKind, CompoundWord, DoubleQuoted, QuoteKind,
    ShArrayLiteral, SimpleVarSub, SingleQuoted, WordPart,
};
