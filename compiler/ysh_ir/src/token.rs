//! Lexical tokens carried by the syntax tree.
//!
//! Only the token kinds the evaluator inspects are modelled; the lexer that
//! produces them is not part of this workspace.

use crate::{Span, Spanned};

/// Token kind.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenId {
    // Numeric literals (text may contain `_` separators)
    DecInt,
    BinInt,
    OctInt,
    HexInt,
    Float,

    // Keyword constants
    Null,
    True,
    False,

    /// Bare name: `{name: 'bob'}` keys, eggex `dot`, class letters.
    Name,
    /// Eggex symbol: `%start`, `%end`.
    Symbol,

    /// Literal characters inside a quoted string.
    Lit,

    // Character literals
    /// One-char escape: `\n`, `\t`, `\\`.
    CharOneChar,
    /// Hex byte: `\x7f`.
    CharHex,
    /// Four-digit code point: `\u00e9`.
    CharUnicode4,
    /// Eight-digit code point: `\U0001F600`.
    CharUnicode8,
    /// Braced code point: `\u{3bc}`.
    CharUBraced,
    /// Pound byte literal: `#'a'`.
    CharPound,
}

impl TokenId {
    /// Whether this token is one of the character-literal kinds.
    pub fn is_char(self) -> bool {
        matches!(
            self,
            TokenId::CharOneChar
                | TokenId::CharHex
                | TokenId::CharUnicode4
                | TokenId::CharUnicode8
                | TokenId::CharUBraced
                | TokenId::CharPound
        )
    }
}

/// A token with its source text.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Token {
    pub id: TokenId,
    pub val: String,
    pub span: Span,
}

impl Token {
    pub fn new(id: TokenId, val: impl Into<String>, span: Span) -> Self {
        Token {
            id,
            val: val.into(),
            span,
        }
    }

    /// Token without a source location, for synthesized nodes.
    pub fn synthetic(id: TokenId, val: impl Into<String>) -> Self {
        Self::new(id, val, Span::DUMMY)
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}
