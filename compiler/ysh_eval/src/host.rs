//! Capabilities the evaluator consumes from the rest of the shell.
//!
//! The evaluator does not own variables, words, processes or a regex engine.
//! Each concern is a trait here, handed to [`EvaluatorBuilder`]. Reference
//! implementations cover the pure capabilities (`Fnmatch`,
//! `RegexCrateMatcher`, `IfsSplitter`, `PosixEreRenderer`) and an in-memory
//! variable store for embedding and tests.
//!
//! [`EvaluatorBuilder`]: crate::EvaluatorBuilder

mod fnmatch;
mod memory;
mod regex_matcher;
mod splitter;

use std::fmt;

use ysh_ir::{BracedVarSub, CommandSub, CompoundWord, DoubleQuoted, Regex, SimpleVarSub};
use ysh_value::{EvalError, Place, Value};

pub use fnmatch::Fnmatch;
pub use memory::MemoryStore;
pub use regex_matcher::RegexCrateMatcher;
pub use splitter::IfsSplitter;

/// Which frames a variable lookup or assignment may touch.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Scope {
    /// The innermost frame only.
    LocalOnly,
    /// The global frame only.
    GlobalOnly,
    /// The innermost frame, then the global frame.
    LocalOrGlobal,
    /// Every frame from innermost outwards, then the global frame.
    Dynamic,
}

/// Variable store.
pub trait VarStore {
    /// Look up `name`, or `None` if it is unbound in `scope`.
    fn lookup(&self, name: &str, scope: Scope) -> Option<Value>;

    fn assign(&mut self, place: &Place, value: Value, scope: Scope) -> Result<(), EvalError>;

    /// Record the groups of a successful regex match.
    fn set_match_groups(&mut self, groups: Vec<String>);

    fn clear_match_groups(&mut self);
}

/// Word evaluation: interpolated strings and shell array literals.
pub trait WordEvaluator {
    fn eval_double_quoted(&mut self, node: &DoubleQuoted) -> Result<String, EvalError>;

    fn eval_braced_var_sub(&mut self, node: &BracedVarSub) -> Result<String, EvalError>;

    fn eval_simple_var_sub(&mut self, node: &SimpleVarSub) -> Result<String, EvalError>;

    /// Evaluate the words of `%(...)`, including brace expansion and globbing.
    fn eval_word_sequence(&mut self, words: &[CompoundWord]) -> Result<Vec<String>, EvalError>;
}

/// Runs command substitutions.
pub trait ProcessExecutor {
    /// Run the command and return its captured stdout.
    fn run_command_sub(&mut self, node: &CommandSub) -> Result<String, EvalError>;
}

/// Splits captured output into fields, as for `@(cmd)`.
pub trait FieldSplitter {
    fn split_for_word_eval(&self, s: &str) -> Vec<String>;
}

/// Shell glob matching for `~~` and `!~~`.
pub trait GlobMatcher {
    fn fnmatch(&self, pattern: &str, text: &str) -> bool;
}

/// Regex matching for `~` and `!~`.
pub trait RegexMatcher {
    /// Match `text` against `pattern`.
    ///
    /// On a match, returns every group (group 0 is the whole match); groups
    /// that did not participate are empty strings.
    fn regex_match(&self, pattern: &str, text: &str) -> Result<Option<Vec<String>>, MatchError>;
}

/// Renders a compiled eggex to the pattern syntax the matcher accepts.
pub trait PatternRenderer {
    fn render(&self, regex: &Regex) -> Result<String, EvalError>;
}

/// The match engine rejected a pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchError {
    pub message: String,
}

impl MatchError {
    pub fn new(message: impl Into<String>) -> Self {
        MatchError {
            message: message.into(),
        }
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for MatchError {}
