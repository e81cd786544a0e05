//! Assignment targets.

use crate::value::Value;

/// A resolved, not yet assigned location.
///
/// Produced by the place resolver; the assignment itself is carried out by
/// the variable store.
#[derive(Clone, Debug, PartialEq)]
pub enum Place {
    /// `x`
    Named { name: String },
    /// `obj[index]`, and `obj->name` with the name as a string key.
    ObjIndex { obj: Value, index: Value },
    /// `obj.attr`
    ObjAttr { obj: Value, attr: String },
}

impl Place {
    pub fn named(name: impl Into<String>) -> Self {
        Place::Named { name: name.into() }
    }

    /// Variable name for a `Named` place.
    pub fn name(&self) -> Option<&str> {
        match self {
            Place::Named { name } => Some(name),
            Place::ObjIndex { .. } | Place::ObjAttr { .. } => None,
        }
    }
}
