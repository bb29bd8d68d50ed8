//! Answer validation against ground truth.
//!
//! Validators are small trait objects selected per algorithm through
//! [`crate::registry::binding`]. They receive both values plus a
//! [`ValidateOptions`] carrying context a bare comparison cannot
//! reconstruct, such as the problem input or a residual function.

mod exact;
mod numeric;
mod sets;

pub use exact::{ExactMatchValidator, MappingMatchValidator};
pub use numeric::{NumericToleranceValidator, OptimizationValidator, RootValidator};
pub use sets::{EdgeSetValidator, MstValidator, PathMatchValidator, SetEquivalenceValidator, SubsetSumValidator};

use std::sync::Arc;

use serde_json::Value;

use crate::domain::ValidationResult;
use crate::registry::ValidatorSpec;

/// Residual of a candidate root, `|f(x)|` evaluated by the caller's
/// objective.
pub type Residual = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Context threaded into validation alongside the two values.
#[derive(Clone, Default)]
pub struct ValidateOptions {
    /// Raw problem input, for validators that must recheck against it.
    pub input: Option<Value>,
    /// Objective function for residual-based root checking.
    pub residual: Option<Residual>,
}

impl ValidateOptions {
    pub fn with_input(input: Value) -> Self {
        Self {
            input: Some(input),
            ..Self::default()
        }
    }
}

pub trait Validator: Send + Sync {
    fn name(&self) -> &'static str;

    fn validate(&self, expected: &Value, actual: &Value, opts: &ValidateOptions)
        -> ValidationResult;
}

/// Instantiate the validator an algorithm binding asks for.
pub fn for_spec(spec: &ValidatorSpec) -> Box<dyn Validator> {
    match *spec {
        ValidatorSpec::Exact { ignore_order } => Box::new(ExactMatchValidator::new(ignore_order)),
        ValidatorSpec::Mapping => Box::new(MappingMatchValidator::default()),
        ValidatorSpec::Path => Box::new(PathMatchValidator::default()),
        ValidatorSpec::Set => Box::new(SetEquivalenceValidator),
        ValidatorSpec::EdgeSet => Box::new(EdgeSetValidator),
        ValidatorSpec::Mst => Box::new(MstValidator),
        ValidatorSpec::Numeric { atol, rtol } => {
            Box::new(NumericToleranceValidator::new(atol, rtol))
        }
        ValidatorSpec::Root { tolerance } => Box::new(RootValidator::new(tolerance)),
        ValidatorSpec::Optimization {
            tolerance_percent,
            minimize,
        } => Box::new(OptimizationValidator::new(tolerance_percent, minimize)),
        ValidatorSpec::SubsetSum => Box::new(SubsetSumValidator),
    }
}

/// Combination mode for [`CompositeValidator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Every member must accept; score is the mean of member scores.
    All,
    /// Any member accepting suffices; score is the maximum.
    Any,
}

/// Runs several validators over the same pair of values.
pub struct CompositeValidator {
    members: Vec<Box<dyn Validator>>,
    mode: CompositeMode,
}

impl CompositeValidator {
    pub fn new(members: Vec<Box<dyn Validator>>, mode: CompositeMode) -> Self {
        Self { members, mode }
    }
}

impl Validator for CompositeValidator {
    fn name(&self) -> &'static str {
        "composite"
    }

    fn validate(
        &self,
        expected: &Value,
        actual: &Value,
        opts: &ValidateOptions,
    ) -> ValidationResult {
        if self.members.is_empty() {
            return ValidationResult::invalid(
                "composite validator has no members",
                expected.clone(),
                actual.clone(),
            );
        }

        let results: Vec<ValidationResult> = self
            .members
            .iter()
            .map(|v| v.validate(expected, actual, opts))
            .collect();

        // Under All the worst member carries the message and mismatch
        // detail; under Any the best one does.
        let pick = match self.mode {
            CompositeMode::All => results
                .iter()
                .min_by(|a, b| a.score.total_cmp(&b.score)),
            CompositeMode::Any => results
                .iter()
                .max_by(|a, b| a.score.total_cmp(&b.score)),
        };

        let (is_valid, score) = match self.mode {
            CompositeMode::All => (
                results.iter().all(|r| r.is_valid),
                results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64,
            ),
            CompositeMode::Any => (
                results.iter().any(|r| r.is_valid),
                results
                    .iter()
                    .map(|r| r.score)
                    .fold(0.0_f64, f64::max),
            ),
        };

        match pick {
            Some(chosen) => {
                let mut out = chosen.clone();
                out.is_valid = is_valid;
                out.score = score;
                out
            }
            None => ValidationResult::invalid(
                "composite validator produced no result",
                expected.clone(),
                actual.clone(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{binding, AlgorithmId};
    use serde_json::json;

    #[test]
    fn test_every_binding_instantiates() {
        for id in AlgorithmId::ALL {
            let spec = binding(id).validator;
            let validator = for_spec(&spec);
            assert!(!validator.name().is_empty());
        }
    }

    #[test]
    fn test_composite_all_averages_member_scores() {
        // Exact match misses (score 0.0) while the tolerant member
        // accepts (score 1.0); conjunction fails with the mean score.
        let composite = CompositeValidator::new(
            vec![
                Box::new(ExactMatchValidator::new(false)),
                Box::new(NumericToleranceValidator::new(10.0, 0.0)),
            ],
            CompositeMode::All,
        );
        let result = composite.validate(&json!(5), &json!(7), &ValidateOptions::default());
        assert!(!result.is_valid);
        assert!((result.score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_composite_all_valid_when_every_member_accepts() {
        let composite = CompositeValidator::new(
            vec![
                Box::new(ExactMatchValidator::new(false)),
                Box::new(NumericToleranceValidator::new(10.0, 0.0)),
            ],
            CompositeMode::All,
        );
        let result = composite.validate(&json!(5), &json!(5), &ValidateOptions::default());
        assert!(result.is_valid);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_composite_any_takes_maximum() {
        let composite = CompositeValidator::new(
            vec![
                Box::new(ExactMatchValidator::new(false)),
                Box::new(NumericToleranceValidator::new(10.0, 0.0)),
            ],
            CompositeMode::Any,
        );
        let result = composite.validate(&json!(5), &json!(7), &ValidateOptions::default());
        assert!(result.is_valid);
        assert_eq!(result.score, 1.0);
    }
}
