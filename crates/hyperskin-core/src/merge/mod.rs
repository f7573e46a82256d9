//! Deep merge of a partial value over a complete one.
//!
//! Used to guarantee that every configuration read is schema-complete even
//! when the file on disk is older than the current defaults or only sets a
//! handful of keys.

use crate::jsliteral::{Object, Value};

/// Merge `overlay` over `base`, returning a new value.
///
/// For every key in `overlay`:
/// - both sides plain objects: merged recursively
/// - overlay `undefined`: base value kept
/// - anything else (scalars, arrays, kind mismatch): overlay replaces base
///
/// Arrays are replaced wholesale, never concatenated. Keys only in `base`
/// are kept in their original position; keys only in `overlay` are appended
/// in overlay order. When `overlay` is not an object at all it replaces
/// `base` outright (unless it is `undefined`).
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (_, Value::Undefined) => base.clone(),
        (Value::Object(base_obj), Value::Object(overlay_obj)) => {
            Value::Object(merge_objects(base_obj, overlay_obj))
        }
        _ => overlay.clone(),
    }
}

fn merge_objects(base: &Object, overlay: &Object) -> Object {
    let mut merged = base.clone();

    for (key, overlay_val) in overlay.iter() {
        let next = match merged.get(key) {
            Some(base_val) => deep_merge(base_val, overlay_val),
            None if matches!(overlay_val, Value::Undefined) => continue,
            None => overlay_val.clone(),
        };
        merged.insert(key, next);
    }

    merged
}
