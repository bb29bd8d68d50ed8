//! Scaffold verification core.
//!
//! Answer extraction, validation, ground-truth oracles, suite
//! generation, and LLM plumbing for checking that scaffold-guided
//! completions solve their algorithm problems correctly.

pub mod config;
pub mod domain;
pub mod error;
pub mod generator;
pub mod literal;
pub mod llm;
pub mod oracle;
pub mod parser;
pub mod registry;
pub mod reporting;
pub mod rng;
pub mod telemetry;
pub mod validators;

pub use config::{Mode, Settings};
pub use domain::{
    AnswerKind, ParsedAnswer, ScaffoldResults, TestCase, TestResult, TestSuite, Tier,
    ValidationResult,
};
pub use error::{Result, VerifyError};
pub use generator::{SuiteGenerator, SUITE_VERSION};
pub use llm::{
    AnthropicProvider, LlmError, LlmProvider, LlmRequest, LlmResponse, PromptBuilder,
    ResponseCache, ScaffoldParser,
};
pub use oracle::{Oracle, ReferenceOracle, TestFunction};
pub use parser::{parse, parse_named};
pub use registry::{binding, AlgorithmId, Binding, Category, FormatKind, ValidatorSpec};
pub use telemetry::init_tracing;
pub use validators::{
    for_spec, CompositeMode, CompositeValidator, Residual, ValidateOptions, Validator,
};
