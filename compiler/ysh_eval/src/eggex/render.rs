//! Rendering a compiled eggex as a POSIX extended regular expression.

use ysh_ir::{ClassLiteralTerm, PerlClass, PosixClass, PrimitiveId, Regex, RepeatOp};
use ysh_value::{non_canonical_regex, unsupported, EvalError};

use crate::host::PatternRenderer;

/// Reference [`PatternRenderer`] producing ERE syntax.
///
/// Groups are plain parentheses, as ERE has no non-capturing form, so
/// `(...)` groups count towards match group numbering.
#[derive(Copy, Clone, Debug, Default)]
pub struct PosixEreRenderer;

impl PatternRenderer for PosixEreRenderer {
    fn render(&self, regex: &Regex) -> Result<String, EvalError> {
        let mut out = String::new();
        render_node(regex, &mut out)?;
        Ok(out)
    }
}

fn render_node(node: &Regex, out: &mut String) -> Result<(), EvalError> {
    match node {
        Regex::Primitive { id, .. } => out.push_str(match id {
            PrimitiveId::Dot => ".",
            PrimitiveId::Start => "^",
            PrimitiveId::End => "$",
        }),
        Regex::LiteralChars { s, .. } => {
            for c in s.chars() {
                push_literal(c, out);
            }
        }
        Regex::PosixClass(class) => {
            out.push('[');
            if class.negated {
                out.push('^');
            }
            out.push_str(&format!("[:{}:]", class.name));
            out.push(']');
        }
        Regex::PerlClass(class) => {
            out.push('[');
            if class.negated {
                out.push('^');
            }
            out.push_str(perl_class_body(class)?);
            out.push(']');
        }
        Regex::Seq(children) => {
            for child in children {
                render_wrapped(child, matches!(child, Regex::Alt(_)), out)?;
            }
        }
        Regex::Alt(children) => {
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    out.push('|');
                }
                render_node(child, out)?;
            }
        }
        Regex::Repeat { child, op } => {
            render_wrapped(child, needs_group_for_repeat(child), out)?;
            push_repeat_op(*op, out);
        }
        Regex::Group { child } | Regex::Capture { child, .. } => {
            out.push('(');
            render_node(child, out)?;
            out.push(')');
        }
        Regex::ClassLiteral { negated, terms } => {
            out.push('[');
            if *negated {
                out.push('^');
            }
            for term in terms {
                render_class_term(term, out)?;
            }
            out.push(']');
        }
        Regex::Speck(_) => return Err(non_canonical_regex("Speck")),
        Regex::Token(_) => return Err(non_canonical_regex("Token")),
        Regex::SingleQuoted(_) => return Err(non_canonical_regex("SingleQuoted")),
        Regex::DoubleQuoted(_) => return Err(non_canonical_regex("DoubleQuoted")),
        Regex::BracedVarSub(_) => return Err(non_canonical_regex("BracedVarSub")),
        Regex::SimpleVarSub(_) => return Err(non_canonical_regex("SimpleVarSub")),
        Regex::Splice { .. } => return Err(non_canonical_regex("Splice")),
    }
    Ok(())
}

fn render_wrapped(node: &Regex, wrap: bool, out: &mut String) -> Result<(), EvalError> {
    if wrap {
        out.push('(');
    }
    render_node(node, out)?;
    if wrap {
        out.push(')');
    }
    Ok(())
}

/// A repeat applies to one atom; anything longer needs parentheses.
fn needs_group_for_repeat(child: &Regex) -> bool {
    match child {
        Regex::LiteralChars { s, .. } => s.chars().nth(1).is_some(),
        Regex::Seq(children) => children.len() != 1,
        Regex::Alt(_) | Regex::Repeat { .. } => true,
        _ => false,
    }
}

fn push_repeat_op(op: RepeatOp, out: &mut String) {
    match op {
        RepeatOp::Star => out.push('*'),
        RepeatOp::Plus => out.push('+'),
        RepeatOp::Question => out.push('?'),
        RepeatOp::Num(n) => out.push_str(&format!("{{{n}}}")),
        RepeatOp::Range { lower, upper } => {
            let lower = lower.unwrap_or(0);
            match upper {
                Some(upper) => out.push_str(&format!("{{{lower},{upper}}}")),
                None => out.push_str(&format!("{{{lower},}}")),
            }
        }
    }
}

fn push_literal(c: char, out: &mut String) {
    if matches!(
        c,
        '.' | '[' | ']' | '(' | ')' | '{' | '}' | '*' | '+' | '?' | '^' | '$' | '|' | '\\'
    ) {
        out.push('\\');
    }
    out.push(c);
}

/// Characters that are special inside brackets in ERE or in the reference
/// matcher's class syntax.
fn push_class_char(c: char, out: &mut String) {
    if matches!(c, '\\' | ']' | '[' | '^' | '-' | '&' | '~') {
        out.push('\\');
    }
    out.push(c);
}

fn render_class_term(term: &ClassLiteralTerm, out: &mut String) -> Result<(), EvalError> {
    match term {
        ClassLiteralTerm::Range { start, end } => {
            push_class_char(*start, out);
            out.push('-');
            push_class_char(*end, out);
        }
        ClassLiteralTerm::PosixClass(PosixClass { negated, name }) => {
            if *negated {
                return Err(unsupported("Negated POSIX class inside a class literal"));
            }
            out.push_str(&format!("[:{name}:]"));
        }
        ClassLiteralTerm::PerlClass(class) => {
            if class.negated {
                return Err(unsupported("Negated Perl class inside a class literal"));
            }
            out.push_str(perl_class_body(class)?);
        }
        ClassLiteralTerm::ByteSet { bytes, .. } => match std::str::from_utf8(bytes) {
            Ok(s) => s.chars().for_each(|c| push_class_char(c, out)),
            // A lone high byte from a \xHH literal stands for U+00HH
            Err(_) => bytes
                .iter()
                .for_each(|b| push_class_char(char::from(*b), out)),
        },
        ClassLiteralTerm::CodePoint { code, .. } => {
            let c = char::from_u32(*code)
                .ok_or_else(|| unsupported(&format!("Code point {code:#x} in a class literal")))?;
            push_class_char(c, out);
        }
        ClassLiteralTerm::SingleQuoted(_) => return Err(non_canonical_regex("SingleQuoted")),
        ClassLiteralTerm::DoubleQuoted(_) => return Err(non_canonical_regex("DoubleQuoted")),
        ClassLiteralTerm::BracedVarSub(_) => return Err(non_canonical_regex("BracedVarSub")),
        ClassLiteralTerm::SimpleVarSub(_) => return Err(non_canonical_regex("SimpleVarSub")),
        ClassLiteralTerm::CharLiteral(_) => return Err(non_canonical_regex("CharLiteral")),
    }
    Ok(())
}

/// Bracket-expression body for `d`, `w` and `s`.
fn perl_class_body(class: &PerlClass) -> Result<&'static str, EvalError> {
    match class.name.as_str() {
        "d" => Ok("[:digit:]"),
        "w" => Ok("[:alnum:]_"),
        "s" => Ok("[:space:]"),
        other => Err(unsupported(&format!("Perl class '{other}'"))),
    }
}
