//! Structural equality validators.

use serde_json::{Map, Number, Value};

use crate::domain::ValidationResult;
use crate::validators::{ValidateOptions, Validator};

const NUMERIC_EPSILON: f64 = 1e-6;

/// Normalize a value so that structurally equivalent answers compare
/// equal: whole floats collapse to integers, strings are trimmed, and
/// containers are normalized recursively.
fn normalize(value: &Value, sort_arrays: bool) -> Value {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Value::Number(Number::from(f as i64))
            }
            _ => value.clone(),
        },
        Value::String(s) => Value::String(s.trim().to_string()),
        Value::Array(items) => {
            let mut normalized: Vec<Value> =
                items.iter().map(|v| normalize(v, sort_arrays)).collect();
            if sort_arrays {
                normalized.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
            }
            Value::Array(normalized)
        }
        Value::Object(map) => {
            let normalized: Map<String, Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), normalize(v, sort_arrays)))
                .collect();
            Value::Object(normalized)
        }
        _ => value.clone(),
    }
}

fn numbers_close(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => (x - y).abs() <= NUMERIC_EPSILON,
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Exact match
// ---------------------------------------------------------------------------

/// Strict structural equality, optionally order-insensitive for lists.
pub struct ExactMatchValidator {
    ignore_order: bool,
}

impl ExactMatchValidator {
    pub fn new(ignore_order: bool) -> Self {
        Self { ignore_order }
    }
}

impl Validator for ExactMatchValidator {
    fn name(&self) -> &'static str {
        "exact_match"
    }

    fn validate(
        &self,
        expected: &Value,
        actual: &Value,
        _opts: &ValidateOptions,
    ) -> ValidationResult {
        let lhs = normalize(expected, self.ignore_order);
        let rhs = normalize(actual, self.ignore_order);

        if lhs == rhs || numbers_close(&lhs, &rhs) {
            return ValidationResult::valid(expected.clone(), actual.clone());
        }

        ValidationResult::invalid(
            "values are not equal",
            expected.clone(),
            actual.clone(),
        )
    }
}

// ---------------------------------------------------------------------------
// Mapping match
// ---------------------------------------------------------------------------

/// Key-by-key comparison of mappings with numeric tolerance on leaf
/// values. Score degrades proportionally with the mismatched keys.
pub struct MappingMatchValidator {
    tolerance: f64,
}

impl Default for MappingMatchValidator {
    fn default() -> Self {
        Self {
            tolerance: NUMERIC_EPSILON,
        }
    }
}

impl MappingMatchValidator {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    fn leaf_equal(&self, expected: &Value, actual: &Value) -> bool {
        if let (Some(x), Some(y)) = (expected.as_f64(), actual.as_f64()) {
            return (x - y).abs() <= self.tolerance;
        }
        normalize(expected, false) == normalize(actual, false)
    }
}

/// Descend through single-key wrappers such as `{"distances": {...}}`
/// until the innermost mapping is reached.
fn unwrap_mapping(value: &Value) -> &Value {
    let mut current = value;
    while let Value::Object(map) = current {
        if map.len() == 1 {
            let inner = map.values().next().unwrap_or(&Value::Null);
            if inner.is_object() {
                current = inner;
                continue;
            }
        }
        break;
    }
    current
}

impl Validator for MappingMatchValidator {
    fn name(&self) -> &'static str {
        "mapping_match"
    }

    fn validate(
        &self,
        expected: &Value,
        actual: &Value,
        _opts: &ValidateOptions,
    ) -> ValidationResult {
        let (lhs, rhs) = (unwrap_mapping(expected), unwrap_mapping(actual));

        let (Some(exp), Some(act)) = (lhs.as_object(), rhs.as_object()) else {
            return ValidationResult::invalid(
                "expected a mapping on both sides",
                expected.clone(),
                actual.clone(),
            );
        };

        let mut keys: Vec<&String> = exp.keys().collect();
        for key in act.keys() {
            if !exp.contains_key(key) {
                keys.push(key);
            }
        }

        if keys.is_empty() {
            return ValidationResult::valid(expected.clone(), actual.clone());
        }

        let mut mismatched: Vec<String> = Vec::new();
        for key in &keys {
            match (exp.get(*key), act.get(*key)) {
                (Some(e), Some(a)) if self.leaf_equal(e, a) => {}
                _ => mismatched.push((*key).clone()),
            }
        }

        if mismatched.is_empty() {
            return ValidationResult::valid(expected.clone(), actual.clone());
        }

        let score = 1.0 - mismatched.len() as f64 / keys.len() as f64;
        ValidationResult::invalid(
            format!("{} of {} keys mismatched", mismatched.len(), keys.len()),
            expected.clone(),
            actual.clone(),
        )
        .with_score(score)
        .with_details(serde_json::json!({ "mismatched_keys": mismatched }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn opts() -> ValidateOptions {
        ValidateOptions::default()
    }

    #[test]
    fn test_exact_integer_float_equivalence() {
        let v = ExactMatchValidator::new(false);
        let result = v.validate(&json!(5), &json!(5.0), &opts());
        assert!(result.is_valid);
    }

    #[test]
    fn test_exact_reflexive_on_nested_value() {
        let v = ExactMatchValidator::new(false);
        let value = json!({ "path": ["A", "B"], "distances": { "A": 0, "B": 5 } });
        assert!(v.validate(&value, &value, &opts()).is_valid);
    }

    #[test]
    fn test_exact_order_sensitivity() {
        let ordered = ExactMatchValidator::new(false);
        let unordered = ExactMatchValidator::new(true);
        let expected = json!([1, 2, 3]);
        let actual = json!([3, 1, 2]);
        assert!(!ordered.validate(&expected, &actual, &opts()).is_valid);
        assert!(unordered.validate(&expected, &actual, &opts()).is_valid);
    }

    #[test]
    fn test_mapping_partial_score() {
        let v = MappingMatchValidator::default();
        let expected = json!({ "A": 0, "B": 5, "C": 2, "D": 5 });
        let actual = json!({ "A": 0, "B": 5, "C": 3, "D": 5 });
        let result = v.validate(&expected, &actual, &opts());
        assert!(!result.is_valid);
        assert!((result.score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_mapping_unwraps_single_key_wrapper() {
        let v = MappingMatchValidator::default();
        let expected = json!({ "distances": { "A": 0, "B": 5 } });
        let actual = json!({ "distances": { "A": 0.0, "B": 5.0 } });
        assert!(v.validate(&expected, &actual, &opts()).is_valid);
    }

    #[test]
    fn test_mapping_extra_key_counts_against() {
        let v = MappingMatchValidator::default();
        let expected = json!({ "A": 0 });
        let actual = json!({ "A": 0, "B": 1 });
        let result = v.validate(&expected, &actual, &opts());
        assert!(!result.is_valid);
        assert!((result.score - 0.5).abs() < 1e-9);
    }
}
