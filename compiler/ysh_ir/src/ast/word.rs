//! Word forms embedded in expressions.
//!
//! These are evaluated by the word evaluator and the process executor, not
//! by the expression evaluator itself; the shapes here are the interface.

use crate::{Span, Spanned, Token};

/// Piece of a double-quoted string or an unquoted word.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum WordPart {
    Literal(Token),
    SimpleVarSub(SimpleVarSub),
    BracedVarSub(BracedVarSub),
}

/// `"hello $name"`
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DoubleQuoted {
    pub parts: Vec<WordPart>,
    pub span: Span,
}

/// Which quoting rules a single-quoted string follows.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum QuoteKind {
    /// `'raw'`: tokens are taken verbatim.
    Raw,
    /// `$'c\tstyle'`: character-literal tokens are decoded.
    CString,
}

/// `'raw'` or `$'c-string'`
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SingleQuoted {
    pub kind: QuoteKind,
    pub tokens: Vec<Token>,
    pub span: Span,
}

/// `$name`; `name` holds the bare variable name.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SimpleVarSub {
    pub name: Token,
}

/// `${name}`
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BracedVarSub {
    pub name: Token,
    pub span: Span,
}

/// One unquoted shell word.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CompoundWord {
    pub parts: Vec<WordPart>,
}

/// `%(a b {c,d})`
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ShArrayLiteral {
    pub words: Vec<CompoundWord>,
    pub span: Span,
}

/// Opening token of a command substitution.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CommandSubKind {
    /// `$(cmd)`: captured stdout as a string.
    Dollar,
    /// `@(cmd)`: captured stdout split into fields.
    At,
    /// `^(cmd)`: block literal, reserved.
    Caret,
}

/// Command substitution. The command itself is opaque to the evaluator.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CommandSub {
    pub kind: CommandSubKind,
    pub code: String,
    pub span: Span,
}

impl Spanned for DoubleQuoted {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for SingleQuoted {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for SimpleVarSub {
    fn span(&self) -> Span {
        self.name.span
    }
}

impl Spanned for BracedVarSub {
    fn span(&self) -> Span {
        self.span
    }
}
