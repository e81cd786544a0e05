//! Test doubles and syntax tree builders.

use rustc_hash::FxHashMap;
use ysh_ir::{
    ArgList, AttrOp, BinaryOp, BracedVarSub, CommandSub, CommandSubKind, CompareOp, CompoundWord,
    DoubleQuoted, Expr, ExprKind, NamedArg, QuoteKind, Regex, SimpleVarSub, SingleQuoted, Span,
    Token, TokenId, UnaryOp, WordPart,
};
use ysh_value::{undefined_variable, EvalError, EvalResult, Value};

use crate::host::{MemoryStore, ProcessExecutor, WordEvaluator};
use crate::interpreter::{Evaluator, EvaluatorBuilder};
use crate::options::{ExprOptions, SharedOptions};

/// Span given to every operator built here.
pub const OP_SPAN: Span = Span::new(10, 11);

/// Word evaluator over a fixed table of string variables.
#[derive(Debug, Default)]
pub struct FakeWords {
    pub vars: FxHashMap<String, String>,
}

impl FakeWords {
    fn var(&self, tok: &Token) -> Result<String, EvalError> {
        self.vars
            .get(&tok.val)
            .cloned()
            .ok_or_else(|| undefined_variable(&tok.val).with_span(tok.span))
    }

    fn parts(&self, parts: &[WordPart]) -> Result<String, EvalError> {
        let mut s = String::new();
        for part in parts {
            match part {
                WordPart::Literal(tok) => s.push_str(&tok.val),
                WordPart::SimpleVarSub(sub) => s.push_str(&self.var(&sub.name)?),
                WordPart::BracedVarSub(sub) => s.push_str(&self.var(&sub.name)?),
            }
        }
        Ok(s)
    }
}

impl WordEvaluator for FakeWords {
    fn eval_double_quoted(&mut self, node: &DoubleQuoted) -> Result<String, EvalError> {
        self.parts(&node.parts)
    }

    fn eval_braced_var_sub(&mut self, node: &BracedVarSub) -> Result<String, EvalError> {
        self.var(&node.name)
    }

    fn eval_simple_var_sub(&mut self, node: &SimpleVarSub) -> Result<String, EvalError> {
        self.var(&node.name)
    }

    fn eval_word_sequence(&mut self, words: &[CompoundWord]) -> Result<Vec<String>, EvalError> {
        words.iter().map(|w| self.parts(&w.parts)).collect()
    }
}

/// Process executor that echoes canned output and records what it ran.
#[derive(Debug, Default)]
pub struct FakeShell {
    pub outputs: FxHashMap<String, String>,
    /// Commands in the order they ran.
    pub ran: Vec<String>,
    /// Whether `COMMAND_SUB_ERREXIT` was set during each run.
    pub errexit_seen: Vec<bool>,
    pub options: Option<SharedOptions>,
}

impl ProcessExecutor for FakeShell {
    fn run_command_sub(&mut self, node: &CommandSub) -> Result<String, EvalError> {
        self.ran.push(node.code.clone());
        if let Some(options) = &self.options {
            self.errexit_seen
                .push(options.is_set(ExprOptions::COMMAND_SUB_ERREXIT));
        }
        Ok(self.outputs.get(&node.code).cloned().unwrap_or_default())
    }
}

/// Owns every collaborator so tests can build short-lived evaluators.
#[derive(Debug, Default)]
pub struct Harness {
    pub mem: MemoryStore,
    pub words: FakeWords,
    pub shell: FakeShell,
    pub options: SharedOptions,
}

impl Harness {
    pub fn new() -> Self {
        let options = SharedOptions::default();
        Harness {
            shell: FakeShell {
                options: Some(options.clone()),
                ..FakeShell::default()
            },
            options,
            ..Harness::default()
        }
    }

    pub fn with<R>(&mut self, f: impl FnOnce(&mut Evaluator<'_>) -> R) -> R {
        let mut ev = EvaluatorBuilder::new(&mut self.mem, &mut self.words, &mut self.shell)
            .options(self.options.clone())
            .build();
        f(&mut ev)
    }

    pub fn eval(&mut self, node: &Expr) -> EvalResult {
        self.with(|ev| ev.eval_expr(node))
    }

    pub fn define(&mut self, name: &str, value: Value) {
        self.mem.define(name, value);
    }
}

// Expression builders

fn node(kind: ExprKind) -> Expr {
    Expr::synthetic(kind)
}

pub fn tok(id: TokenId, val: &str) -> Token {
    Token::synthetic(id, val)
}

pub fn int(n: i64) -> Expr {
    node(ExprKind::Const(tok(TokenId::DecInt, &n.to_string())))
}

pub fn float(text: &str) -> Expr {
    node(ExprKind::Const(tok(TokenId::Float, text)))
}

pub fn constant(id: TokenId, text: &str) -> Expr {
    node(ExprKind::Const(tok(id, text)))
}

pub fn boolean(b: bool) -> Expr {
    if b {
        constant(TokenId::True, "true")
    } else {
        constant(TokenId::False, "false")
    }
}

pub fn null() -> Expr {
    constant(TokenId::Null, "null")
}

pub fn var(name: &str) -> Expr {
    node(ExprKind::Var(tok(TokenId::Name, name)))
}

pub fn single_quoted(s: &str) -> SingleQuoted {
    SingleQuoted {
        kind: QuoteKind::Raw,
        tokens: vec![tok(TokenId::Lit, s)],
        span: Span::DUMMY,
    }
}

pub fn string(s: &str) -> Expr {
    node(ExprKind::SingleQuoted(single_quoted(s)))
}

pub fn double_quoted(parts: Vec<WordPart>) -> DoubleQuoted {
    DoubleQuoted {
        parts,
        span: Span::DUMMY,
    }
}

pub fn simple_var_sub(name: &str) -> SimpleVarSub {
    SimpleVarSub {
        name: tok(TokenId::Name, name),
    }
}

pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    node(ExprKind::Binary {
        op,
        op_span: OP_SPAN,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn unary(op: UnaryOp, child: Expr) -> Expr {
    node(ExprKind::Unary {
        op,
        op_span: OP_SPAN,
        child: Box::new(child),
    })
}

pub fn compare(left: Expr, rest: Vec<(CompareOp, Expr)>) -> Expr {
    let (ops, comparators) = rest.into_iter().map(|(op, e)| ((op, OP_SPAN), e)).unzip();
    node(ExprKind::Compare {
        left: Box::new(left),
        ops,
        comparators,
    })
}

pub fn list(items: Vec<Expr>) -> Expr {
    node(ExprKind::List(items))
}

pub fn tuple(items: Vec<Expr>) -> Expr {
    node(ExprKind::Tuple(items))
}

pub fn dict(entries: Vec<(Expr, Expr)>) -> Expr {
    let (keys, values) = entries.into_iter().unzip();
    node(ExprKind::Dict { keys, values })
}

pub fn implicit() -> Expr {
    node(ExprKind::Implicit)
}

pub fn call(func: Expr, positional: Vec<Expr>, named: Vec<(Option<&str>, Expr)>) -> Expr {
    let named = named
        .into_iter()
        .map(|(name, value)| NamedArg {
            name: name.map(|n| tok(TokenId::Name, n)),
            value,
        })
        .collect();
    node(ExprKind::FuncCall {
        func: Box::new(func),
        args: ArgList { positional, named },
    })
}

pub fn spread(inner: Expr) -> Expr {
    node(ExprKind::Spread(Box::new(inner)))
}

pub fn subscript(obj: Expr, indices: Vec<Expr>) -> Expr {
    node(ExprKind::Subscript {
        obj: Box::new(obj),
        indices,
    })
}

pub fn slice(lower: Option<Expr>, upper: Option<Expr>) -> Expr {
    node(ExprKind::Slice {
        lower: lower.map(Box::new),
        upper: upper.map(Box::new),
    })
}

pub fn range(lower: Expr, upper: Expr) -> Expr {
    node(ExprKind::Range {
        lower: Box::new(lower),
        upper: Box::new(upper),
    })
}

pub fn attribute(obj: Expr, op: AttrOp, name: &str) -> Expr {
    node(ExprKind::Attribute {
        obj: Box::new(obj),
        op,
        op_span: OP_SPAN,
        attr: tok(TokenId::Name, name),
    })
}

pub fn command_sub(kind: CommandSubKind, code: &str) -> Expr {
    node(ExprKind::CommandSub(CommandSub {
        kind,
        code: code.to_string(),
        span: Span::DUMMY,
    }))
}

pub fn if_exp(test: Expr, body: Expr, orelse: Expr) -> Expr {
    node(ExprKind::IfExp {
        test: Box::new(test),
        body: Box::new(body),
        orelse: Box::new(orelse),
    })
}

pub fn regex_literal(regex: Regex) -> Expr {
    node(ExprKind::RegexLiteral {
        regex: Box::new(regex),
        flags: Vec::new(),
    })
}

// Eggex builders

pub fn re_str(s: &str) -> Regex {
    Regex::SingleQuoted(single_quoted(s))
}

pub fn re_splice(name: &str) -> Regex {
    Regex::Splice {
        name: tok(TokenId::Name, name),
    }
}

pub fn literal_chars(s: &str) -> Regex {
    Regex::LiteralChars {
        s: s.to_string(),
        span: Span::DUMMY,
    }
}
