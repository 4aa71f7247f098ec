//! Shared helpers: fixed-precision rounding and the deep-merge patch utility.
//!
//! All PATCH endpoints funnel through [`apply_patch`]: the current record is
//! serialized to JSON, the patch is merged with [`deep_merge`], and the result
//! is deserialized back into the typed record. Invalid shapes or enum values
//! therefore reject the whole patch without mutating anything.
//!
//! Merge behavior:
//! - objects merge recursively
//! - arrays and scalars replace the target value
//! - explicit `null` clears a field (valid only where the record has an
//!   optional field; elsewhere deserialization fails and the patch is rejected)
//! - missing keys leave the target untouched

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;

/// Round to 1 decimal place. Non-finite inputs collapse to 0.0.
pub(crate) fn round1(v: f64) -> f64 {
    if !v.is_finite() {
        tracing::warn!("round1 received non-finite value {}, defaulting to 0", v);
        return 0.0;
    }
    (v * 10.0).round() / 10.0
}

/// Round to 2 decimal places. Non-finite inputs collapse to 0.0.
pub(crate) fn round2(v: f64) -> f64 {
    if !v.is_finite() {
        tracing::warn!("round2 received non-finite value {}, defaulting to 0", v);
        return 0.0;
    }
    (v * 100.0).round() / 100.0
}

/// Recursively merge `patch` into `target`.
pub(crate) fn deep_merge(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target_map), Value::Object(patch_map)) => {
            for (key, patch_value) in patch_map {
                let both_objects = patch_value.is_object()
                    && target_map.get(key).is_some_and(Value::is_object);
                if both_objects {
                    if let Some(target_value) = target_map.get_mut(key) {
                        deep_merge(target_value, patch_value);
                    }
                } else {
                    target_map.insert(key.clone(), patch_value.clone());
                }
            }
        }
        (target, patch) => {
            *target = patch.clone();
        }
    }
}

/// Apply a JSON patch to a typed record, returning the patched record.
///
/// The original record is untouched on error.
pub(crate) fn apply_patch<T>(current: &T, patch: &Value) -> Result<T, AppError>
where
    T: Serialize + DeserializeOwned,
{
    if !patch.is_object() {
        return Err(AppError::BadRequest(
            "Patch body must be a JSON object".to_string(),
        ));
    }

    let mut merged = serde_json::to_value(current)
        .map_err(|e| AppError::InternalError(format!("State serialization failed: {}", e)))?;
    deep_merge(&mut merged, patch);

    serde_json::from_value(merged)
        .map_err(|e| AppError::BadRequest(format!("Invalid patch: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_round1_normal() {
        assert_eq!(round1(3.14), 3.1);
        assert_eq!(round1(3.16), 3.2);
    }

    #[test]
    fn test_round1_nan() {
        assert_eq!(round1(f64::NAN), 0.0);
    }

    #[test]
    fn test_round2_normal() {
        assert_eq!(round2(0.118), 0.12);
    }

    #[test]
    fn test_round2_infinity() {
        assert_eq!(round2(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_deep_merge_nested_objects() {
        let mut target = json!({"a": {"x": 1, "y": 2}, "b": 3});
        deep_merge(&mut target, &json!({"a": {"y": 9}}));
        assert_eq!(target, json!({"a": {"x": 1, "y": 9}, "b": 3}));
    }

    #[test]
    fn test_deep_merge_arrays_replace() {
        let mut target = json!({"issues": ["a", "b"]});
        deep_merge(&mut target, &json!({"issues": ["c"]}));
        assert_eq!(target, json!({"issues": ["c"]}));
    }

    #[test]
    fn test_deep_merge_null_overwrites() {
        let mut target = json!({"age": 30});
        deep_merge(&mut target, &json!({"age": null}));
        assert_eq!(target, json!({"age": null}));
    }

    #[test]
    fn test_deep_merge_missing_keys_untouched() {
        let mut target = json!({"a": 1, "b": 2});
        deep_merge(&mut target, &json!({}));
        assert_eq!(target, json!({"a": 1, "b": 2}));
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Record {
        name: String,
        age: Option<u32>,
        tags: Vec<String>,
    }

    #[test]
    fn test_apply_patch_partial_update() {
        let current = Record {
            name: "Asha".to_string(),
            age: Some(30),
            tags: vec!["tourer".to_string()],
        };
        let patched = apply_patch(&current, &json!({"age": 31})).unwrap();
        assert_eq!(patched.name, "Asha");
        assert_eq!(patched.age, Some(31));
    }

    #[test]
    fn test_apply_patch_null_clears_option() {
        let current = Record {
            name: "Asha".to_string(),
            age: Some(30),
            tags: vec![],
        };
        let patched = apply_patch(&current, &json!({"age": null})).unwrap();
        assert_eq!(patched.age, None);
    }

    #[test]
    fn test_apply_patch_null_on_required_field_rejected() {
        let current = Record {
            name: "Asha".to_string(),
            age: None,
            tags: vec![],
        };
        let result = apply_patch(&current, &json!({"name": null}));
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_patch_non_object_rejected() {
        let current = Record {
            name: "Asha".to_string(),
            age: None,
            tags: vec![],
        };
        assert!(apply_patch(&current, &json!([1, 2])).is_err());
        assert!(apply_patch(&current, &json!("nope")).is_err());
    }
}
