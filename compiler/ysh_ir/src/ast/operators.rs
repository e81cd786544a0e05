//! Operator enums.

/// Binary operators (everything except comparisons).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// `/`: always floating-point division.
    Div,
    /// `//`
    FloorDiv,
    Mod,
    /// `**`
    Pow,
    /// `++`: list or string concatenation.
    Concat,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    And,
    Or,
}

impl BinaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::FloorDiv => "//",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::Concat => "++",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }

    /// `and` / `or`, which decide on truthiness and may skip the right side.
    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

/// Unary operators.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `~x`
    BitNot,
    /// `not x`
    Not,
}

impl UnaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::BitNot => "~",
            UnaryOp::Not => "not",
        }
    }
}

/// Operators allowed in a comparison chain.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CompareOp {
    Lt,
    Gt,
    LtEq,
    GtEq,
    /// `===`
    Eq,
    /// `!==`
    NotEq,
    In,
    NotIn,
    Is,
    IsNot,
    /// `~~` glob match
    GlobMatch,
    /// `!~~`
    NotGlobMatch,
    /// `~` regex match
    RegexMatch,
    /// `!~`
    NotRegexMatch,
    /// `~==` approximate equality
    ApproxEq,
}

impl CompareOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::LtEq => "<=",
            CompareOp::GtEq => ">=",
            CompareOp::Eq => "===",
            CompareOp::NotEq => "!==",
            CompareOp::In => "in",
            CompareOp::NotIn => "not in",
            CompareOp::Is => "is",
            CompareOp::IsNot => "is not",
            CompareOp::GlobMatch => "~~",
            CompareOp::NotGlobMatch => "!~~",
            CompareOp::RegexMatch => "~",
            CompareOp::NotRegexMatch => "!~",
            CompareOp::ApproxEq => "~==",
        }
    }
}

/// Attribute access spelling.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AttrOp {
    /// `obj.attr`: member lookup.
    Dot,
    /// `d->key`: sugar for `d['key']`.
    RArrow,
    /// `Name::member`: static namespace lookup.
    DColon,
}
