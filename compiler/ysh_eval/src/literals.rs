//! Literal decoding: numeric constants, character literals and
//! single-quoted strings.
//!
//! The lexer validates literal syntax; these functions only convert token
//! text to values. Malformed text still fails with an error rather than a
//! panic, since tokens can be synthesized by embedders.

use ysh_ir::{ClassLiteralTerm, QuoteKind, SingleQuoted, Token, TokenId};
use ysh_value::{
    invalid_float, invalid_int_literal, lookup_error, unsupported, EvalError, EvalResult, Value,
};

/// Evaluate a constant token.
pub fn eval_const(tok: &Token) -> EvalResult {
    match tok.id {
        TokenId::DecInt | TokenId::BinInt | TokenId::OctInt | TokenId::HexInt => {
            parse_int(tok.id, &tok.val).map(Value::int)
        }
        TokenId::Float => {
            let text = tok.val.replace('_', "");
            text.parse::<f64>()
                .map(Value::float)
                .map_err(|_| invalid_float(&tok.val))
        }
        TokenId::Null => Ok(Value::NULL),
        TokenId::True => Ok(Value::bool(true)),
        TokenId::False => Ok(Value::bool(false)),
        // {name: 'bob'}
        TokenId::Name => Ok(Value::string(tok.val.clone())),
        TokenId::CharOneChar
        | TokenId::CharHex
        | TokenId::CharUnicode4
        | TokenId::CharUnicode8
        | TokenId::CharUBraced
        | TokenId::CharPound => char_code(tok).map(|code| Value::int(i64::from(code))),
        TokenId::Symbol | TokenId::Lit => {
            Err(unsupported(&format!("Constant {:?} token", tok.id)))
        }
    }
}

/// Parse integer literal text in the radix named by `id`.
///
/// `_` separators are removed first, so `1_000`, `0x_FF` and `0b1010_1010`
/// are all valid.
pub fn parse_int(id: TokenId, text: &str) -> Result<i64, EvalError> {
    let digits = text.replace('_', "");
    let (radix, marker) = match id {
        TokenId::BinInt => (2, Some('b')),
        TokenId::OctInt => (8, Some('o')),
        TokenId::HexInt => (16, Some('x')),
        _ => (10, None),
    };
    let body = marker
        .and_then(|m| {
            digits
                .strip_prefix('0')
                .and_then(|rest| rest.strip_prefix(|c: char| c.eq_ignore_ascii_case(&m)))
        })
        .unwrap_or(digits.as_str());
    i64::from_str_radix(body, radix).map_err(|_| invalid_int_literal(text))
}

/// The character a one-char escape like `\n` stands for.
pub fn lookup_char_c(c: char) -> Option<char> {
    let decoded = match c {
        '0' => '\0',
        'a' => '\x07',
        'b' => '\x08',
        'e' | 'E' => '\x1b',
        'f' => '\x0c',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\x0b',
        '\\' | '\'' | '"' | '?' | '$' => c,
        _ => return None,
    };
    Some(decoded)
}

/// Decode one token of a C-escaped string (`$'...'`) or eggex literal.
///
/// `\xHH` yields the code point `U+00HH`.
pub fn eval_c_string_token(tok: &Token) -> Result<String, EvalError> {
    match tok.id {
        TokenId::Lit | TokenId::Name => Ok(tok.val.clone()),
        TokenId::CharOneChar
        | TokenId::CharHex
        | TokenId::CharUnicode4
        | TokenId::CharUnicode8
        | TokenId::CharUBraced
        | TokenId::CharPound => {
            let code = char_code(tok)?;
            char::from_u32(code)
                .map(String::from)
                .ok_or_else(|| bad_char_literal(tok))
        }
        _ => Err(unsupported(&format!("String token {:?}", tok.id))),
    }
}

/// Evaluate a single-quoted string: raw `'...'` or C-escaped `$'...'`.
pub fn eval_single_quoted(node: &SingleQuoted) -> Result<String, EvalError> {
    match node.kind {
        QuoteKind::Raw => Ok(node.tokens.iter().map(|t| t.val.as_str()).collect()),
        QuoteKind::CString => {
            let mut s = String::new();
            for tok in &node.tokens {
                s.push_str(&eval_c_string_token(tok)?);
            }
            Ok(s)
        }
    }
}

/// Compile a character literal inside an eggex class `[...]`.
///
/// Byte-valued escapes become a one-element `ByteSet`, unicode escapes a
/// `CodePoint`. Returns `None` for tokens that are not character literals,
/// which leaves the term as written.
pub fn eval_char_literal_for_regex(tok: &Token) -> Result<Option<ClassLiteralTerm>, EvalError> {
    let span = tok.span;
    let term = match tok.id {
        TokenId::CharOneChar | TokenId::CharPound => ClassLiteralTerm::ByteSet {
            bytes: eval_c_string_token(tok)?.into_bytes(),
            span,
        },
        TokenId::CharHex => {
            let byte = u8::try_from(char_code(tok)?).map_err(|_| bad_char_literal(tok))?;
            ClassLiteralTerm::ByteSet {
                bytes: vec![byte],
                span,
            }
        }
        TokenId::CharUnicode4 | TokenId::CharUnicode8 | TokenId::CharUBraced => {
            ClassLiteralTerm::CodePoint {
                code: char_code(tok)?,
                span,
            }
        }
        // A bare letter like the `a` in [a b c]
        TokenId::Name | TokenId::Lit => ClassLiteralTerm::ByteSet {
            bytes: tok.val.as_bytes().to_vec(),
            span,
        },
        _ => return Ok(None),
    };
    Ok(Some(term))
}

/// Numeric value of a character-literal token.
fn char_code(tok: &Token) -> Result<u32, EvalError> {
    let val = tok.val.as_str();
    let code = match tok.id {
        // \n
        TokenId::CharOneChar => val
            .strip_prefix('\\')
            .and_then(|rest| rest.chars().next())
            .and_then(lookup_char_c)
            .map(u32::from),
        // \x7f
        TokenId::CharHex => val.strip_prefix("\\x").and_then(parse_hex),
        // \u00e9
        TokenId::CharUnicode4 => val.strip_prefix("\\u").and_then(parse_hex),
        // \U0001F600
        TokenId::CharUnicode8 => val.strip_prefix("\\U").and_then(parse_hex),
        // \u{3bc}
        TokenId::CharUBraced => val
            .strip_prefix("\\u{")
            .and_then(|rest| rest.strip_suffix('}'))
            .and_then(parse_hex),
        // #'a'
        TokenId::CharPound => val
            .strip_prefix("#'")
            .and_then(|rest| rest.chars().next())
            .map(u32::from),
        _ => None,
    };
    code.ok_or_else(|| bad_char_literal(tok))
}

fn parse_hex(digits: &str) -> Option<u32> {
    u32::from_str_radix(digits, 16).ok()
}

#[cold]
fn bad_char_literal(tok: &Token) -> EvalError {
    lookup_error(&format!("invalid character literal '{}'", tok.val)).with_span(tok.span)
}
