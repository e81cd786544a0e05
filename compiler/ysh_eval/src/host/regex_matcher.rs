//! Regex matching backed by the `regex` crate.

use parking_lot::Mutex;
use regex::Regex;
use rustc_hash::FxHashMap;

use super::{MatchError, RegexMatcher};

/// Patterns kept compiled before the cache starts over.
const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Reference [`RegexMatcher`]. Compiled patterns are cached by source text.
///
/// The cache holds at most `capacity` patterns and is emptied when full, so
/// patterns built from input cannot grow it without bound.
#[derive(Debug)]
pub struct RegexCrateMatcher {
    cache: Mutex<FxHashMap<String, Regex>>,
    capacity: usize,
}

impl Default for RegexCrateMatcher {
    fn default() -> Self {
        Self::with_cache_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl RegexCrateMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A matcher caching up to `capacity` compiled patterns. Zero disables
    /// the cache.
    pub fn with_cache_capacity(capacity: usize) -> Self {
        RegexCrateMatcher {
            cache: Mutex::new(FxHashMap::default()),
            capacity,
        }
    }

    fn compile(&self, pattern: &str) -> Result<Regex, MatchError> {
        let mut cache = self.cache.lock();
        if let Some(re) = cache.get(pattern) {
            return Ok(re.clone());
        }
        let re = Regex::new(pattern).map_err(|e| MatchError::new(e.to_string()))?;
        if self.capacity == 0 {
            return Ok(re);
        }
        if cache.len() >= self.capacity {
            tracing::debug!(entries = cache.len(), "regex cache full, clearing");
            cache.clear();
        }
        cache.insert(pattern.to_string(), re.clone());
        Ok(re)
    }
}

impl RegexMatcher for RegexCrateMatcher {
    fn regex_match(&self, pattern: &str, text: &str) -> Result<Option<Vec<String>>, MatchError> {
        let re = self.compile(pattern)?;
        let Some(caps) = re.captures(text) else {
            return Ok(None);
        };
        let groups = caps
            .iter()
            .map(|m| m.map_or_else(String::new, |m| m.as_str().to_string()))
            .collect();
        Ok(Some(groups))
    }
}
