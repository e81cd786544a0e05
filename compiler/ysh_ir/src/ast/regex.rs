//! Eggex syntax tree.
//!
//! One tree type serves both sides of compilation. The parser produces
//! syntactic leaves (`Speck`, `Token`, quoted strings, var subs, `Splice`);
//! compilation rewrites every one of them into a logical leaf (`Primitive`,
//! `LiteralChars`) and every class-literal string into a `ByteSet`. A tree
//! for which [`Regex::is_canonical`] holds can be rendered without further
//! evaluation.

use super::word::{BracedVarSub, DoubleQuoted, SimpleVarSub, SingleQuoted};
use crate::{Span, Token};

/// Single-character punctuation leaf.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SpeckId {
    /// `.`
    Dot,
    /// `^`
    Caret,
    /// `$`
    Dollar,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Speck {
    pub id: SpeckId,
    pub span: Span,
}

/// Logical primitive after compilation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PrimitiveId {
    Dot,
    Start,
    End,
}

/// `[[:alpha:]]`-style class, by name (`alpha`, `digit`, ...).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PosixClass {
    pub negated: bool,
    pub name: String,
}

/// Shorthand class: `d`, `w`, `s`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PerlClass {
    pub negated: bool,
    pub name: String,
}

/// Repetition operator.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RepeatOp {
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `?`
    Question,
    /// `{n}`
    Num(u32),
    /// `{n,m}`, `{n,}`, `{,m}`
    Range {
        lower: Option<u32>,
        upper: Option<u32>,
    },
}

/// Term of a `[...]` class literal.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ClassLiteralTerm {
    SingleQuoted(SingleQuoted),
    DoubleQuoted(DoubleQuoted),
    BracedVarSub(BracedVarSub),
    SimpleVarSub(SimpleVarSub),
    /// `\n`, `\x7f`, `A`, or a bare letter.
    CharLiteral(Token),
    /// `a-z`
    Range { start: char, end: char },
    PosixClass(PosixClass),
    PerlClass(PerlClass),

    // Compiled forms
    /// A fixed set of literal bytes.
    ByteSet { bytes: Vec<u8>, span: Span },
    /// A single code point from a unicode escape.
    CodePoint { code: u32, span: Span },
}

impl ClassLiteralTerm {
    pub fn is_canonical(&self) -> bool {
        matches!(
            self,
            ClassLiteralTerm::Range { .. }
                | ClassLiteralTerm::PosixClass(_)
                | ClassLiteralTerm::PerlClass(_)
                | ClassLiteralTerm::ByteSet { .. }
                | ClassLiteralTerm::CodePoint { .. }
        )
    }
}

/// Eggex node.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Regex {
    // Syntactic leaves
    Speck(Speck),
    /// `dot`, `%start`, `%end`, or a character literal.
    Token(Token),
    SingleQuoted(SingleQuoted),
    DoubleQuoted(DoubleQuoted),
    BracedVarSub(BracedVarSub),
    SimpleVarSub(SimpleVarSub),
    /// `@Name`: inline a previously compiled eggex.
    Splice { name: Token },

    // Built-in classes (already canonical)
    PosixClass(PosixClass),
    PerlClass(PerlClass),

    // Composites
    Seq(Vec<Regex>),
    Alt(Vec<Regex>),
    Repeat { child: Box<Regex>, op: RepeatOp },
    /// Non-capturing group.
    Group { child: Box<Regex> },
    Capture {
        child: Box<Regex>,
        name: Option<Token>,
    },
    ClassLiteral {
        negated: bool,
        terms: Vec<ClassLiteralTerm>,
    },

    // Compiled leaves
    Primitive { id: PrimitiveId, span: Span },
    LiteralChars { s: String, span: Span },
}

impl Regex {
    /// Whether this node is a leaf the compiler leaves untouched.
    pub fn is_canonical_leaf(&self) -> bool {
        matches!(
            self,
            Regex::Primitive { .. }
                | Regex::LiteralChars { .. }
                | Regex::PosixClass(_)
                | Regex::PerlClass(_)
        )
    }

    /// Whether the whole tree is in compiled form: no specks, tokens,
    /// strings, var subs or splices anywhere, and class literals made only
    /// of compiled terms.
    pub fn is_canonical(&self) -> bool {
        match self {
            Regex::Speck(_)
            | Regex::Token(_)
            | Regex::SingleQuoted(_)
            | Regex::DoubleQuoted(_)
            | Regex::BracedVarSub(_)
            | Regex::SimpleVarSub(_)
            | Regex::Splice { .. } => false,
            Regex::PosixClass(_)
            | Regex::PerlClass(_)
            | Regex::Primitive { .. }
            | Regex::LiteralChars { .. } => true,
            Regex::Seq(children) | Regex::Alt(children) => {
                children.iter().all(Regex::is_canonical)
            }
            Regex::Repeat { child, .. }
            | Regex::Group { child }
            | Regex::Capture { child, .. } => child.is_canonical(),
            Regex::ClassLiteral { terms, .. } => {
                terms.iter().all(ClassLiteralTerm::is_canonical)
            }
        }
    }
}
