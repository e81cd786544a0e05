//! Subscript and attribute access on evaluated values.

use ysh_value::{
    bad_index_type, dict_entry_not_found, index_out_of_range, no_attribute, not_subscriptable,
    unhashable, DictKey, EvalError, EvalResult, Obj, SliceValue, Value,
};

/// `obj[index]`. Multiple indices arrive already combined into a tuple.
pub fn subscript(obj: &Value, index: &Value) -> EvalResult {
    match obj {
        Value::Obj(Obj::Dict(entries)) => {
            let key = DictKey::from_value(index).ok_or_else(|| unhashable(index.type_name()))?;
            entries.get(&key).cloned().ok_or_else(dict_entry_not_found)
        }
        Value::AssocArray(entries) => {
            let Some(key) = index.as_str() else {
                return Err(bad_index_type(obj.type_name(), index.type_name()));
            };
            entries
                .get(key)
                .map(|s| Value::string(s.clone()))
                .ok_or_else(dict_entry_not_found)
        }
        Value::Obj(Obj::List(items)) => index_sequence(obj, items, index, Value::list),
        Value::Obj(Obj::Tuple(items)) => index_sequence(obj, items, index, Value::tuple),
        Value::StrArray(items) => match index_kind(obj, index)? {
            IndexKind::Position(i) => {
                let i = resolve_position(i, items.len())?;
                Ok(items[i].clone().map_or(Value::NULL, Value::string))
            }
            IndexKind::Slice(slice) => Ok(Value::str_array(items[slice.indices(items.len())].to_vec())),
        },
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            match index_kind(obj, index)? {
                IndexKind::Position(i) => {
                    let i = resolve_position(i, chars.len())?;
                    Ok(Value::string(chars[i].to_string()))
                }
                IndexKind::Slice(slice) => Ok(Value::string(
                    chars[slice.indices(chars.len())].iter().collect::<String>(),
                )),
            }
        }
        _ => Err(not_subscriptable(obj.type_name())),
    }
}

enum IndexKind {
    Position(i64),
    Slice(SliceValue),
}

fn index_kind(obj: &Value, index: &Value) -> Result<IndexKind, EvalError> {
    match index {
        Value::Obj(Obj::Int(n)) => Ok(IndexKind::Position(*n)),
        Value::Obj(Obj::Bool(b)) => Ok(IndexKind::Position(i64::from(*b))),
        Value::Obj(Obj::Slice(slice)) => Ok(IndexKind::Slice(*slice)),
        _ => Err(bad_index_type(obj.type_name(), index.type_name())),
    }
}

/// Map a possibly negative position onto `0..len`.
fn resolve_position(i: i64, len: usize) -> Result<usize, EvalError> {
    let len = i64::try_from(len).map_err(|_| index_out_of_range())?;
    let resolved = if i < 0 { i + len } else { i };
    if (0..len).contains(&resolved) {
        usize::try_from(resolved).map_err(|_| index_out_of_range())
    } else {
        Err(index_out_of_range())
    }
}

fn index_sequence(
    obj: &Value,
    items: &[Value],
    index: &Value,
    rebuild: fn(Vec<Value>) -> Value,
) -> EvalResult {
    match index_kind(obj, index)? {
        IndexKind::Position(i) => Ok(items[resolve_position(i, items.len())?].clone()),
        IndexKind::Slice(slice) => Ok(rebuild(items[slice.indices(items.len())].to_vec())),
    }
}

/// `obj.attr`: member lookup on user objects.
pub fn get_attr(obj: &Value, attr: &str) -> EvalResult {
    match obj {
        Value::Obj(Obj::User(user)) => user
            .attrs
            .get(attr)
            .cloned()
            .ok_or_else(|| no_attribute(&user.type_name, attr)),
        _ => Err(no_attribute(obj.type_name(), attr)),
    }
}
