//! YSH IR - syntax tree types for the YSH expression language.
//!
//! The parser lives outside this workspace; these are the shapes it hands to
//! the evaluator:
//!
//! - `Expr` / `ExprKind`: expression nodes, including call argument lists and
//!   assignment targets (`PlaceExpr`)
//! - word forms (`DoubleQuoted`, `SingleQuoted`, var subs, command subs) that
//!   the evaluator delegates to the word evaluator
//! - `Regex` / `ClassLiteralTerm`: the eggex sub-language, both before and
//!   after compilation (the same tree shape, different leaves)

mod ast;
mod span;
mod token;

pub use ast::{
    ArgList, AttrOp, BinaryOp, BracedVarSub, ClassLiteralTerm, CommandSub, CommandSubKind,
    CompareOp, Comprehension, CompoundWord, DoubleQuoted, Expr, ExprKind, NamedArg, PerlClass,
    PlaceExpr, PosixClass, PrimitiveId, QuoteKind, Regex, RepeatOp, ShArrayLiteral,
    SimpleVarSub, SingleQuoted, Speck, SpeckId, UnaryOp, WordPart,
};
pub use span::{Span, Spanned};
pub use token::{Token, TokenId};
