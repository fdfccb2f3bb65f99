use serde_json::{Map, Value};

/// Recursively merges `source` into `dest`.
///
/// Where both sides hold objects, or both hold arrays, at the same position
/// the merge descends and keeps every entry of `dest` that `source` does not
/// mention. Anything else in `source` overwrites. Array elements merge by
/// position; extra source elements are appended.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use nested_attrs_util::json_merge::deep_merge;
///
/// let mut dest = json!({"a": {"b": 1}});
/// deep_merge(&mut dest, json!({"a": {"c": 2}}));
/// assert_eq!(dest, json!({"a": {"b": 1, "c": 2}}));
/// ```
pub fn deep_merge(dest: &mut Value, source: Value) {
    match (dest, source) {
        (Value::Object(dest_map), Value::Object(src_map)) => deep_merge_map(dest_map, src_map),
        (Value::Array(dest_arr), Value::Array(src_arr)) => {
            for (i, src_val) in src_arr.into_iter().enumerate() {
                match dest_arr.get_mut(i) {
                    Some(dest_val) => deep_merge(dest_val, src_val),
                    None => dest_arr.push(src_val),
                }
            }
        }
        (dest, source) => *dest = source,
    }
}

/// [`deep_merge`] for two mappings.
pub fn deep_merge_map(dest: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, src_val) in source {
        match dest.get_mut(&key) {
            Some(dest_val) => deep_merge(dest_val, src_val),
            None => {
                dest.insert(key, src_val);
            }
        }
    }
}
