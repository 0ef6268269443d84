//! YAML and JSON data handling utilities.

use fanlog_types::Result;
use serde_json::Value;

/// Load YAML from string.
pub fn load_yaml(content: &str) -> Result<Value> {
    Ok(serde_yaml::from_str(content)?)
}

/// Deep merge two values.
/// Recursively merges objects, with overlay values taking precedence.
/// Arrays and scalars in the overlay replace the base value.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_val) => deep_merge(base_val, overlay_val),
                    None => overlay_val,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay_val) => overlay_val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deep_merge() {
        let base = json!({"a": {"x": 1, "y": 2}, "list": [1, 2], "keep": true});
        let overlay = json!({"a": {"y": 3}, "list": [9]});
        assert_eq!(
            deep_merge(base, overlay),
            json!({"a": {"x": 1, "y": 3}, "list": [9], "keep": true})
        );
    }

    #[test]
    fn test_load_yaml_scalars() {
        assert_eq!(load_yaml("3").unwrap(), json!(3));
        assert_eq!(load_yaml("info").unwrap(), json!("info"));
        assert!(load_yaml("{unclosed").is_err());
    }
}
