//! Shell-style glob matching.
//!
//! - `*` matches zero or more characters
//! - `?` matches exactly one character
//! - `[abc]`, `[a-z]` match one character in the set
//! - `[!abc]` or `[^abc]` match one character not in the set
//! - `\c` matches `c` literally

use super::GlobMatcher;

/// Reference [`GlobMatcher`].
///
/// Iterative matcher that remembers only the most recent `*`, so matching
/// is O(pattern * text) for any input.
#[derive(Copy, Clone, Debug, Default)]
pub struct Fnmatch;

impl GlobMatcher for Fnmatch {
    fn fnmatch(&self, pattern: &str, text: &str) -> bool {
        let pattern: Vec<char> = pattern.chars().collect();
        let text: Vec<char> = text.chars().collect();
        match_chars(&pattern, &text)
    }
}

fn match_chars(pattern: &[char], text: &[char]) -> bool {
    let (mut pi, mut ti) = (0, 0);
    // Pattern index after the last `*`, and the text index it resumes from.
    let mut star: Option<(usize, usize)> = None;

    while let Some(&c) = text.get(ti) {
        if pattern.get(pi) == Some(&'*') {
            pi += 1;
            star = Some((pi, ti));
            continue;
        }
        if let Some(next) = match_one(pattern, pi, c) {
            pi = next;
            ti += 1;
            continue;
        }
        // Let the last star swallow one more char and retry.
        match star {
            Some((after_star, resume)) => {
                pi = after_star;
                ti = resume + 1;
                star = Some((after_star, ti));
            }
            None => return false,
        }
    }

    pattern[pi.min(pattern.len())..].iter().all(|&p| p == '*')
}

/// Match one text char against the single-char element at `pi`.
///
/// Returns the pattern index after the element, or `None` on a mismatch
/// or at the end of the pattern.
fn match_one(pattern: &[char], pi: usize, c: char) -> Option<usize> {
    let &p = pattern.get(pi)?;
    match p {
        '?' => Some(pi + 1),
        '[' => match match_class(&pattern[pi..], c) {
            Some((true, consumed)) => Some(pi + consumed),
            Some((false, _)) => None,
            // Unclosed bracket is a literal '['
            None => (c == '[').then_some(pi + 1),
        },
        '\\' if pi + 1 < pattern.len() => (pattern[pi + 1] == c).then_some(pi + 2),
        literal => (literal == c).then_some(pi + 1),
    }
}

/// Match `c` against the bracket expression at the start of `pattern`.
///
/// Returns whether it matched and how many pattern chars the expression
/// spans, or `None` if the bracket is never closed.
fn match_class(pattern: &[char], c: char) -> Option<(bool, usize)> {
    let mut idx = 1;
    let negated = matches!(pattern.get(idx), Some('!' | '^'));
    if negated {
        idx += 1;
    }

    let first = idx;
    let mut matched = false;
    loop {
        let &p = pattern.get(idx)?;
        if p == ']' && idx > first {
            return Some((matched != negated, idx + 1));
        }
        match (pattern.get(idx + 1), pattern.get(idx + 2)) {
            (Some('-'), Some(&end)) if end != ']' => {
                matched |= p <= c && c <= end;
                idx += 3;
            }
            _ => {
                matched |= p == c;
                idx += 1;
            }
        }
    }
}
