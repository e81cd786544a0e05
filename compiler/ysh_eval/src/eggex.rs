//! Eggex compilation.
//!
//! Compiling rewrites the parser's eggex tree into canonical form:
//!
//! - specks and the `dot`/`%start`/`%end` tokens become primitives
//! - character-literal tokens and quoted or substituted strings become
//!   literal character runs
//! - `@Name` splices are replaced by the referenced eggex's tree
//! - strings inside a class literal become byte sets
//!
//! Composite nodes are mutated in place. Compilation reads the variable
//! store and the word evaluator, so compiling the same source tree twice can
//! give different results; compile once per evaluation.

mod render;

pub use render::PosixEreRenderer;

use ysh_ir::{ClassLiteralTerm, PrimitiveId, Regex, Span, SpeckId, TokenId};
use ysh_value::{ambiguous_class_bytes, cant_splice, unsupported, EvalError};

use crate::interpreter::Evaluator;
use crate::literals::{eval_c_string_token, eval_char_literal_for_regex, eval_single_quoted};
use crate::stack::ensure_sufficient_stack;

/// What to do with one node of the tree.
enum Leaf {
    /// Swap the node for this canonical leaf.
    Replace(Regex),
    /// Not a leaf; compile its children.
    Recurse,
    /// Already canonical.
    Keep,
}

impl Evaluator<'_> {
    /// Compile an eggex tree to canonical form.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn eval_regex(&mut self, mut node: Regex) -> Result<Regex, EvalError> {
        self.replace_or_recurse(&mut node)?;
        debug_assert!(node.is_canonical(), "eggex left uncompiled: {node:?}");
        Ok(node)
    }

    fn replace_or_recurse(&mut self, node: &mut Regex) -> Result<(), EvalError> {
        match self.maybe_replace_leaf(node)? {
            Leaf::Replace(leaf) => *node = leaf,
            Leaf::Recurse => ensure_sufficient_stack(|| self.mutate_subtree(node))?,
            Leaf::Keep => {}
        }
        Ok(())
    }

    fn maybe_replace_leaf(&mut self, node: &Regex) -> Result<Leaf, EvalError> {
        let leaf = match node {
            Regex::Speck(speck) => {
                let id = match speck.id {
                    SpeckId::Dot => PrimitiveId::Dot,
                    SpeckId::Caret => PrimitiveId::Start,
                    SpeckId::Dollar => PrimitiveId::End,
                };
                primitive(id, speck.span)
            }
            Regex::Token(tok) => match tok.id {
                TokenId::Name if tok.val == "dot" => primitive(PrimitiveId::Dot, tok.span),
                TokenId::Symbol if tok.val == "%start" => primitive(PrimitiveId::Start, tok.span),
                TokenId::Symbol if tok.val == "%end" => primitive(PrimitiveId::End, tok.span),
                id if id.is_char() => literal(eval_c_string_token(tok)?, tok.span),
                _ => {
                    return Err(
                        unsupported(&format!("Eggex token '{}'", tok.val)).with_span(tok.span)
                    )
                }
            },
            Regex::SingleQuoted(sq) => literal(eval_single_quoted(sq)?, sq.span),
            Regex::DoubleQuoted(dq) => literal(self.word_ev.eval_double_quoted(dq)?, dq.span),
            Regex::BracedVarSub(sub) => literal(self.word_ev.eval_braced_var_sub(sub)?, sub.span),
            Regex::SimpleVarSub(sub) => {
                literal(self.word_ev.eval_simple_var_sub(sub)?, sub.name.span)
            }
            Regex::Splice { name } => {
                let value = self.lookup_var(&name.val, name.span)?;
                let Some(eggex) = value.as_regex() else {
                    return Err(cant_splice(value.type_name()).with_span(name.span));
                };
                // Flags of the spliced eggex do not carry over
                tracing::trace!(name = %name.val, "splicing eggex");
                eggex.regex.clone()
            }
            Regex::PosixClass(_)
            | Regex::PerlClass(_)
            | Regex::Primitive { .. }
            | Regex::LiteralChars { .. } => return Ok(Leaf::Keep),
            Regex::Seq(_)
            | Regex::Alt(_)
            | Regex::Repeat { .. }
            | Regex::Group { .. }
            | Regex::Capture { .. }
            | Regex::ClassLiteral { .. } => return Ok(Leaf::Recurse),
        };
        Ok(Leaf::Replace(leaf))
    }

    fn mutate_subtree(&mut self, node: &mut Regex) -> Result<(), EvalError> {
        match node {
            Regex::Seq(children) | Regex::Alt(children) => {
                for child in children {
                    self.replace_or_recurse(child)?;
                }
            }
            Regex::Repeat { child, .. } | Regex::Group { child } | Regex::Capture { child, .. } => {
                self.replace_or_recurse(child)?;
            }
            Regex::ClassLiteral { terms, .. } => self.mutate_class_literal(terms)?,
            _ => {}
        }
        Ok(())
    }

    /// Resolve each term of `[...]` on its own.
    fn mutate_class_literal(&mut self, terms: &mut [ClassLiteralTerm]) -> Result<(), EvalError> {
        for term in terms {
            let (s, span) = match term {
                ClassLiteralTerm::SingleQuoted(sq) => (eval_single_quoted(sq)?, sq.span),
                ClassLiteralTerm::DoubleQuoted(dq) => {
                    (self.word_ev.eval_double_quoted(dq)?, dq.span)
                }
                ClassLiteralTerm::BracedVarSub(sub) => {
                    (self.word_ev.eval_braced_var_sub(sub)?, sub.span)
                }
                ClassLiteralTerm::SimpleVarSub(sub) => {
                    (self.word_ev.eval_simple_var_sub(sub)?, sub.name.span)
                }
                ClassLiteralTerm::CharLiteral(tok) => {
                    if let Some(resolved) = eval_char_literal_for_regex(tok)? {
                        *term = resolved;
                    }
                    continue;
                }
                ClassLiteralTerm::Range { .. }
                | ClassLiteralTerm::PosixClass(_)
                | ClassLiteralTerm::PerlClass(_)
                | ClassLiteralTerm::ByteSet { .. }
                | ClassLiteralTerm::CodePoint { .. } => continue,
            };
            check_class_string(&s, span)?;
            *term = ClassLiteralTerm::ByteSet {
                bytes: s.into_bytes(),
                span,
            };
        }
        Ok(())
    }
}

/// A string of several bytes with a non-ASCII byte could mean either
/// encoded characters or raw bytes; reject it. This includes a single
/// multi-byte character such as `'\u{e9}'`, which must be written as a char
/// literal instead.
fn check_class_string(s: &str, span: Span) -> Result<(), EvalError> {
    if s.len() > 1 && !s.is_ascii() {
        return Err(ambiguous_class_bytes().with_span(span));
    }
    Ok(())
}

fn primitive(id: PrimitiveId, span: Span) -> Regex {
    Regex::Primitive { id, span }
}

fn literal(s: String, span: Span) -> Regex {
    Regex::LiteralChars { s, span }
}
