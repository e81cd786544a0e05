//! In-memory variable store.

use rustc_hash::FxHashMap;
use ysh_value::{unsupported, EvalError, Place, Value};

use super::{Scope, VarStore};

/// A global frame plus a stack of local frames, with the regex match side
/// channel.
///
/// With no local frame pushed, the global frame is also the local one.
/// Only named places can be assigned; values are shared and immutable, so
/// indexed and attribute assignment are rejected.
#[derive(Debug, Default)]
pub struct MemoryStore {
    globals: FxHashMap<String, Value>,
    frames: Vec<FxHashMap<String, Value>>,
    match_groups: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_frame(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    /// Bind `name` in the innermost frame.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.local_mut().insert(name.into(), value);
    }

    pub fn define_global(&mut self, name: impl Into<String>, value: Value) {
        self.globals.insert(name.into(), value);
    }

    /// Groups of the last successful `~` match; empty after a failed one.
    pub fn match_groups(&self) -> &[String] {
        &self.match_groups
    }

    fn local(&self) -> &FxHashMap<String, Value> {
        self.frames.last().unwrap_or(&self.globals)
    }

    fn local_mut(&mut self) -> &mut FxHashMap<String, Value> {
        match self.frames.last_mut() {
            Some(frame) => frame,
            None => &mut self.globals,
        }
    }

    /// Frame that `name` should be written to under `scope`.
    fn target_frame(&mut self, name: &str, scope: Scope) -> &mut FxHashMap<String, Value> {
        match scope {
            Scope::LocalOnly => self.local_mut(),
            Scope::GlobalOnly => &mut self.globals,
            Scope::LocalOrGlobal => {
                if !self.local().contains_key(name) && self.globals.contains_key(name) {
                    &mut self.globals
                } else {
                    self.local_mut()
                }
            }
            Scope::Dynamic => {
                let found = self.frames.iter().rposition(|f| f.contains_key(name));
                match found {
                    Some(i) => &mut self.frames[i],
                    None if self.globals.contains_key(name) => &mut self.globals,
                    None => self.local_mut(),
                }
            }
        }
    }
}

impl VarStore for MemoryStore {
    fn lookup(&self, name: &str, scope: Scope) -> Option<Value> {
        let found = match scope {
            Scope::LocalOnly => self.local().get(name),
            Scope::GlobalOnly => self.globals.get(name),
            Scope::LocalOrGlobal => self.local().get(name).or_else(|| self.globals.get(name)),
            Scope::Dynamic => self
                .frames
                .iter()
                .rev()
                .find_map(|f| f.get(name))
                .or_else(|| self.globals.get(name)),
        };
        found.cloned()
    }

    fn assign(&mut self, place: &Place, value: Value, scope: Scope) -> Result<(), EvalError> {
        match place {
            Place::Named { name } => {
                self.target_frame(name, scope).insert(name.clone(), value);
                Ok(())
            }
            Place::ObjIndex { .. } => Err(unsupported("Indexed assignment")),
            Place::ObjAttr { .. } => Err(unsupported("Attribute assignment")),
        }
    }

    fn set_match_groups(&mut self, groups: Vec<String>) {
        self.match_groups = groups;
    }

    fn clear_match_groups(&mut self) {
        self.match_groups.clear();
    }
}
