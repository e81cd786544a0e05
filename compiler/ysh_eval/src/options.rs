//! Evaluation-mode options and their scoped override stack.
//!
//! Every top-level expression evaluation pushes `COMMAND_SUB_ERREXIT` so that
//! a failing `$(cmd)` inside an expression aborts the expression. The push
//! happens through an [`OptionGuard`], which pops on drop: the stack is
//! restored on success, on error, and on unwinding alike.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use parking_lot::RwLock;

bitflags! {
    /// Option flags in effect during expression evaluation.
    ///
    /// The evaluator itself reads only `COMMAND_SUB_ERREXIT`. The others are
    /// carried on the same stack for the word evaluator and executor, which
    /// read them through [`SharedOptions::is_set`].
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ExprOptions: u8 {
        /// A failing command substitution is a fatal error.
        const COMMAND_SUB_ERREXIT = 1 << 0;
        /// Disallow implicit array-to-string conversion. Read by the word
        /// evaluator.
        const STRICT_ARRAY = 1 << 1;
        /// `@foo` splicing is enabled in words. Read by the executor.
        const PARSE_AT = 1 << 2;
    }
}

/// Base options plus a stack of scoped overrides.
#[derive(Clone, Debug, Default)]
pub struct OptionStack {
    base: ExprOptions,
    overrides: Vec<ExprOptions>,
}

impl OptionStack {
    pub fn new(base: ExprOptions) -> Self {
        OptionStack {
            base,
            overrides: Vec::new(),
        }
    }

    /// Options in effect.
    pub fn current(&self) -> ExprOptions {
        self.overrides.last().copied().unwrap_or(self.base)
    }

    /// Number of active overrides.
    pub fn depth(&self) -> usize {
        self.overrides.len()
    }

    /// Turn `flags` on until the matching [`pop`](Self::pop).
    pub fn push(&mut self, flags: ExprOptions) {
        let next = self.current() | flags;
        self.overrides.push(next);
    }

    pub fn pop(&mut self) -> Option<ExprOptions> {
        self.overrides.pop()
    }

    /// Replace the base options. Active overrides are kept.
    pub fn set_base(&mut self, base: ExprOptions) {
        self.base = base;
    }
}

/// Shared handle to an [`OptionStack`].
///
/// The evaluator and the process executor hold clones of the same handle so
/// that a command substitution can see the options in effect.
#[derive(Clone, Default)]
pub struct SharedOptions(Arc<RwLock<OptionStack>>);

impl SharedOptions {
    pub fn new(base: ExprOptions) -> Self {
        SharedOptions(Arc::new(RwLock::new(OptionStack::new(base))))
    }

    pub fn current(&self) -> ExprOptions {
        self.0.read().current()
    }

    pub fn is_set(&self, flag: ExprOptions) -> bool {
        self.current().contains(flag)
    }

    pub fn depth(&self) -> usize {
        self.0.read().depth()
    }

    pub fn set_base(&self, base: ExprOptions) {
        self.0.write().set_base(base);
    }

    /// Push `flags` for the lifetime of the returned guard.
    #[must_use = "the override is popped as soon as the guard is dropped"]
    pub fn push_scoped(&self, flags: ExprOptions) -> OptionGuard {
        self.0.write().push(flags);
        OptionGuard {
            options: self.clone(),
        }
    }
}

impl fmt::Debug for SharedOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedOptions({:?})", &*self.0.read())
    }
}

/// RAII guard returned by [`SharedOptions::push_scoped`].
pub struct OptionGuard {
    options: SharedOptions,
}

impl Drop for OptionGuard {
    fn drop(&mut self) {
        self.options.0.write().pop();
    }
}
