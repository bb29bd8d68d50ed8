//! Numeric validators: tolerance bands, residual checks, and
//! optimization objectives.

use serde_json::Value;

use crate::domain::ValidationResult;
use crate::validators::{ValidateOptions, Validator};

/// Pull a single number out of a possibly wrapped answer. Wrapper keys
/// are tried in order so `{"root": 1.41}` and a bare `1.41` both work.
fn extract_number(value: &Value, keys: &[&str]) -> Option<f64> {
    if let Some(f) = value.as_f64() {
        return Some(f);
    }
    if let Value::String(s) = value {
        return s.trim().parse::<f64>().ok();
    }
    if let Value::Object(map) = value {
        for key in keys {
            if let Some(inner) = map.get(*key) {
                if let Some(f) = extract_number(inner, keys) {
                    return Some(f);
                }
            }
        }
        // Single-key wrappers with an unanticipated name still count.
        if map.len() == 1 {
            if let Some(inner) = map.values().next() {
                return extract_number(inner, keys);
            }
        }
    }
    None
}

const NUMBER_KEYS: &[&str] = &["value", "root", "estimate", "result", "answer"];

// ---------------------------------------------------------------------------
// Numeric tolerance
// ---------------------------------------------------------------------------

/// Accepts `|expected - actual| <= atol + rtol * |expected|`, with the
/// usual carve-outs for NaN and infinities.
pub struct NumericToleranceValidator {
    atol: f64,
    rtol: f64,
}

impl NumericToleranceValidator {
    pub fn new(atol: f64, rtol: f64) -> Self {
        Self { atol, rtol }
    }

    fn check(&self, expected: f64, actual: f64) -> (bool, f64, String) {
        if expected.is_nan() || actual.is_nan() {
            let ok = expected.is_nan() && actual.is_nan();
            let msg = if ok {
                String::new()
            } else {
                "NaN mismatch".to_string()
            };
            return (ok, if ok { 1.0 } else { 0.0 }, msg);
        }

        if expected.is_infinite() || actual.is_infinite() {
            let ok = expected == actual;
            let msg = if ok {
                String::new()
            } else {
                "infinity mismatch".to_string()
            };
            return (ok, if ok { 1.0 } else { 0.0 }, msg);
        }

        let diff = (expected - actual).abs();
        let band = self.atol + self.rtol * expected.abs();
        if diff <= band {
            return (true, 1.0, String::new());
        }

        let rel_err = diff / expected.abs().max(1e-12);
        let score = (1.0 - rel_err).max(0.0);
        (
            false,
            score,
            format!("|{expected} - {actual}| = {diff} exceeds tolerance {band}"),
        )
    }
}

impl Validator for NumericToleranceValidator {
    fn name(&self) -> &'static str {
        "numeric_tolerance"
    }

    fn validate(
        &self,
        expected: &Value,
        actual: &Value,
        _opts: &ValidateOptions,
    ) -> ValidationResult {
        let (Some(e), Some(a)) = (
            extract_number(expected, NUMBER_KEYS),
            extract_number(actual, NUMBER_KEYS),
        ) else {
            return ValidationResult::invalid(
                "expected a numeric value on both sides",
                expected.clone(),
                actual.clone(),
            );
        };

        let (ok, score, message) = self.check(e, a);
        if ok {
            ValidationResult::valid(expected.clone(), actual.clone())
        } else {
            ValidationResult::invalid(message, expected.clone(), actual.clone()).with_score(score)
        }
    }
}

// ---------------------------------------------------------------------------
// Root residual
// ---------------------------------------------------------------------------

/// Accepts any root whose residual `|f(x)|` falls under the tolerance,
/// so alternate roots of the same function pass. Without a residual
/// function it degrades to proximity against the reference root.
pub struct RootValidator {
    tolerance: f64,
}

impl RootValidator {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Validator for RootValidator {
    fn name(&self) -> &'static str {
        "root_residual"
    }

    fn validate(
        &self,
        expected: &Value,
        actual: &Value,
        opts: &ValidateOptions,
    ) -> ValidationResult {
        let Some(candidate) = extract_number(actual, NUMBER_KEYS) else {
            return ValidationResult::invalid(
                "no numeric root extracted",
                expected.clone(),
                actual.clone(),
            );
        };

        if !candidate.is_finite() {
            return ValidationResult::invalid(
                "root is not finite",
                expected.clone(),
                actual.clone(),
            );
        }

        if let Some(residual) = &opts.residual {
            let r = residual(candidate).abs();
            if r <= self.tolerance {
                return ValidationResult::valid(expected.clone(), actual.clone())
                    .with_details(serde_json::json!({ "residual": r }));
            }
            return ValidationResult::invalid(
                format!("residual {r} exceeds tolerance {}", self.tolerance),
                expected.clone(),
                actual.clone(),
            )
            .with_details(serde_json::json!({ "residual": r }));
        }

        NumericToleranceValidator::new(self.tolerance, self.tolerance)
            .validate(expected, actual, opts)
    }
}

// ---------------------------------------------------------------------------
// Optimization
// ---------------------------------------------------------------------------

/// Direction-aware check on the objective value. Overshooting the
/// reference in the improving direction is accepted; the tolerance
/// band is relative, switching to absolute near zero.
pub struct OptimizationValidator {
    tolerance_percent: f64,
    minimize: bool,
}

impl OptimizationValidator {
    pub fn new(tolerance_percent: f64, minimize: bool) -> Self {
        Self {
            tolerance_percent,
            minimize,
        }
    }
}

const OPTIMIZATION_KEYS: &[&str] = &["minimum_value", "value", "minimum"];
const NEAR_ZERO: f64 = 1e-6;

impl Validator for OptimizationValidator {
    fn name(&self) -> &'static str {
        "optimization"
    }

    fn validate(
        &self,
        expected: &Value,
        actual: &Value,
        _opts: &ValidateOptions,
    ) -> ValidationResult {
        let Some(e) = extract_number(expected, OPTIMIZATION_KEYS) else {
            return ValidationResult::invalid(
                "reference objective value is not numeric",
                expected.clone(),
                actual.clone(),
            );
        };
        let Some(a) = extract_number(actual, OPTIMIZATION_KEYS) else {
            return ValidationResult::invalid(
                "no objective value extracted",
                expected.clone(),
                actual.clone(),
            );
        };

        if !a.is_finite() {
            return ValidationResult::invalid(
                "objective value is not finite",
                expected.clone(),
                actual.clone(),
            );
        }

        let band = if e.abs() < NEAR_ZERO {
            self.tolerance_percent / 100.0
        } else {
            e.abs() * self.tolerance_percent / 100.0
        };

        let ok = if self.minimize {
            a <= e + band
        } else {
            a >= e - band
        };

        if ok {
            return ValidationResult::valid(expected.clone(), actual.clone());
        }

        let rel_err = (a - e).abs() / e.abs().max(NEAR_ZERO);
        ValidationResult::invalid(
            format!("objective {a} outside tolerance band around {e}"),
            expected.clone(),
            actual.clone(),
        )
        .with_score((1.0 - rel_err).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn opts() -> ValidateOptions {
        ValidateOptions::default()
    }

    #[test]
    fn test_tolerance_boundary_inclusive() {
        let v = NumericToleranceValidator::new(0.5, 0.0);
        assert!(v.validate(&json!(10.0), &json!(10.5), &opts()).is_valid);
        assert!(!v.validate(&json!(10.0), &json!(10.6), &opts()).is_valid);
    }

    #[test]
    fn test_relative_tolerance_scales() {
        let v = NumericToleranceValidator::new(0.0, 0.01);
        assert!(v.validate(&json!(1000.0), &json!(1009.0), &opts()).is_valid);
        assert!(!v.validate(&json!(1000.0), &json!(1011.0), &opts()).is_valid);
    }

    #[test]
    fn test_partial_score_on_near_miss() {
        let v = NumericToleranceValidator::new(0.0, 0.0);
        let result = v.validate(&json!(100.0), &json!(110.0), &opts());
        assert!(!result.is_valid);
        assert!((result.score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_wrapped_values_unwrap() {
        let v = NumericToleranceValidator::new(0.01, 0.0);
        let result = v.validate(
            &json!({ "estimate": 3.14159 }),
            &json!({ "estimate": 3.1416 }),
            &opts(),
        );
        assert!(result.is_valid);
    }

    #[test]
    fn test_alternate_root_accepted_by_residual() {
        // x^2 - 2 has roots at +/- sqrt(2); either must pass.
        let mut options = ValidateOptions::default();
        options.residual = Some(Arc::new(|x: f64| x * x - 2.0));
        let v = RootValidator::new(1e-6);
        let expected = json!({ "root": std::f64::consts::SQRT_2 });
        let negative = json!({ "root": -std::f64::consts::SQRT_2 });
        assert!(v.validate(&expected, &negative, &options).is_valid);
    }

    #[test]
    fn test_non_root_rejected_by_residual() {
        let mut options = ValidateOptions::default();
        options.residual = Some(Arc::new(|x: f64| x * x - 2.0));
        let v = RootValidator::new(1e-6);
        let result = v.validate(&json!({ "root": 1.414 }), &json!({ "root": 1.0 }), &options);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_root_without_residual_uses_proximity() {
        let v = RootValidator::new(1e-3);
        let result = v.validate(&json!(1.41421), &json!(1.41422), &opts());
        assert!(result.is_valid);
    }

    #[test]
    fn test_optimization_better_minimum_accepted() {
        let v = OptimizationValidator::new(5.0, true);
        // Finding a lower minimum than the reference is never wrong.
        assert!(v.validate(&json!(-1.0), &json!(-1.2), &opts()).is_valid);
    }

    #[test]
    fn test_optimization_worse_minimum_band() {
        let v = OptimizationValidator::new(5.0, true);
        assert!(v.validate(&json!(-1.0), &json!(-0.96), &opts()).is_valid);
        assert!(!v.validate(&json!(-1.0), &json!(-0.9), &opts()).is_valid);
    }

    #[test]
    fn test_optimization_near_zero_absolute_band() {
        let v = OptimizationValidator::new(5.0, true);
        assert!(v.validate(&json!(0.0), &json!(0.04), &opts()).is_valid);
        assert!(!v.validate(&json!(0.0), &json!(0.06), &opts()).is_valid);
    }
}
