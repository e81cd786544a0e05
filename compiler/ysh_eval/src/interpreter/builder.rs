//! `EvaluatorBuilder` for assembling an `Evaluator` from its collaborators.

use super::{EvalLimits, Evaluator};
use crate::eggex::PosixEreRenderer;
use crate::host::{
    FieldSplitter, Fnmatch, GlobMatcher, IfsSplitter, PatternRenderer, ProcessExecutor,
    RegexCrateMatcher, RegexMatcher, VarStore, WordEvaluator,
};
use crate::options::SharedOptions;

/// Builder for [`Evaluator`].
///
/// The variable store, word evaluator and process executor are required.
/// Pure capabilities default to the reference implementations:
/// - field splitting: [`IfsSplitter`] on `" \t\n"`
/// - glob matching: [`Fnmatch`]
/// - regex matching: [`RegexCrateMatcher`]
/// - eggex rendering: [`PosixEreRenderer`]
pub struct EvaluatorBuilder<'a> {
    mem: &'a mut dyn VarStore,
    word_ev: &'a mut dyn WordEvaluator,
    shell_ex: &'a mut dyn ProcessExecutor,
    splitter: Option<Box<dyn FieldSplitter + 'a>>,
    glob: Option<Box<dyn GlobMatcher + 'a>>,
    regex: Option<Box<dyn RegexMatcher + 'a>>,
    renderer: Option<Box<dyn PatternRenderer + 'a>>,
    options: Option<SharedOptions>,
    limits: EvalLimits,
}

impl<'a> EvaluatorBuilder<'a> {
    pub fn new(
        mem: &'a mut dyn VarStore,
        word_ev: &'a mut dyn WordEvaluator,
        shell_ex: &'a mut dyn ProcessExecutor,
    ) -> Self {
        Self {
            mem,
            word_ev,
            shell_ex,
            splitter: None,
            glob: None,
            regex: None,
            renderer: None,
            options: None,
            limits: EvalLimits::default(),
        }
    }

    /// Set the splitter used for `@(cmd)`.
    #[must_use]
    pub fn splitter(mut self, splitter: impl FieldSplitter + 'a) -> Self {
        self.splitter = Some(Box::new(splitter));
        self
    }

    #[must_use]
    pub fn glob_matcher(mut self, glob: impl GlobMatcher + 'a) -> Self {
        self.glob = Some(Box::new(glob));
        self
    }

    #[must_use]
    pub fn regex_matcher(mut self, regex: impl RegexMatcher + 'a) -> Self {
        self.regex = Some(Box::new(regex));
        self
    }

    /// Set the renderer that turns a compiled eggex into a matcher pattern.
    #[must_use]
    pub fn renderer(mut self, renderer: impl PatternRenderer + 'a) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Share an option stack with the rest of the shell.
    ///
    /// Without one the evaluator gets a private stack with no flags set.
    #[must_use]
    pub fn options(mut self, options: SharedOptions) -> Self {
        self.options = Some(options);
        self
    }

    #[must_use]
    pub fn limits(mut self, limits: EvalLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Build the evaluator.
    pub fn build(self) -> Evaluator<'a> {
        Evaluator {
            mem: self.mem,
            word_ev: self.word_ev,
            shell_ex: self.shell_ex,
            splitter: self
                .splitter
                .unwrap_or_else(|| Box::new(IfsSplitter::default())),
            glob: self.glob.unwrap_or_else(|| Box::new(Fnmatch)),
            regex: self
                .regex
                .unwrap_or_else(|| Box::new(RegexCrateMatcher::new())),
            renderer: self
                .renderer
                .unwrap_or_else(|| Box::new(PosixEreRenderer)),
            options: self.options.unwrap_or_default(),
            limits: self.limits,
            depth: 0,
        }
    }
}
