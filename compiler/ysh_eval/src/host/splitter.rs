//! Field splitting on IFS characters.

use super::FieldSplitter;

const DEFAULT_IFS: &str = " \t\n";

/// Reference [`FieldSplitter`].
///
/// Splits on any IFS character and drops empty fields, which is how
/// whitespace IFS behaves.
#[derive(Clone, Debug)]
pub struct IfsSplitter {
    ifs: String,
}

impl IfsSplitter {
    pub fn new(ifs: impl Into<String>) -> Self {
        IfsSplitter { ifs: ifs.into() }
    }
}

impl Default for IfsSplitter {
    fn default() -> Self {
        IfsSplitter::new(DEFAULT_IFS)
    }
}

impl FieldSplitter for IfsSplitter {
    fn split_for_word_eval(&self, s: &str) -> Vec<String> {
        s.split(|c| self.ifs.contains(c))
            .filter(|field| !field.is_empty())
            .map(str::to_string)
            .collect()
    }
}
