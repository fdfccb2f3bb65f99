use serde_json::{Map, Value};

/// Creates a deep clone of any JSON value.
///
/// Every object and array is rebuilt at every level, so the result shares
/// no structure with `value`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use nested_attrs_util::json_clone::clone;
///
/// let original = json!({"foo": [1, 2, 3]});
/// let cloned = clone(&original);
///
/// assert_eq!(original, cloned);
/// ```
pub fn clone(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => Value::String(s.clone()),
        Value::Array(arr) => Value::Array(arr.iter().map(clone).collect()),
        Value::Object(obj) => Value::Object(clone_map(obj)),
    }
}

/// Deep clone of a mapping, keeping key order.
pub fn clone_map(map: &Map<String, Value>) -> Map<String, Value> {
    let mut new_obj = Map::with_capacity(map.len());
    for (key, val) in map {
        new_obj.insert(key.clone(), clone(val));
    }
    new_obj
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clone_scalars() {
        for value in [json!(null), json!(true), json!(42), json!(1.5), json!("hello")] {
            assert_eq!(clone(&value), value);
        }
    }

    #[test]
    fn test_clone_nested() {
        let value = json!({
            "array": [1, 2, {"nested": true}],
            "object": {"a": "b"},
            "scalar": 42
        });
        assert_eq!(clone(&value), value);
    }

    #[test]
    fn test_clone_is_deep() {
        let original = json!({"arr": [1, {"x": 2}]});
        let mut cloned = clone(&original);

        cloned["arr"][1]["x"] = json!(3);
        cloned["arr"].as_array_mut().unwrap().push(json!(4));

        assert_eq!(original, json!({"arr": [1, {"x": 2}]}));
        assert_eq!(cloned, json!({"arr": [1, {"x": 3}, 4]}));
    }

    #[test]
    fn test_clone_map_keeps_order() {
        let value = json!({"z": 1, "a": {"m": 2, "b": 3}});
        let cloned = clone_map(value.as_object().unwrap());
        let keys: Vec<&str> = cloned.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a"]);
        let inner: Vec<&str> = cloned["a"].as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(inner, ["m", "b"]);
    }

    #[test]
    fn test_clone_deep_chain() {
        let mut value = json!(0);
        for _ in 0..200 {
            value = json!({ "next": value });
        }
        assert_eq!(clone(&value), value);
    }
}
