//! Domain-level error taxonomy for scaffold verification.
//!
//! Parse failures are deliberately NOT represented here: they are data
//! (`ParsedAnswer::parse_error`) and become failing validation results,
//! never errors. The same holds for malformed validator inputs.

use crate::llm::LlmError;

/// Scaffold verification domain errors.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("scaffold file not found: {0}")]
    ScaffoldNotFound(String),

    #[error("scaffold {name} is missing required section: {section}")]
    MalformedScaffold { name: String, section: String },

    #[error("oracle cannot compute {algorithm}: {reason}")]
    OracleInput { algorithm: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("llm error: {0}")]
    Llm(#[from] LlmError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for scaffold verification operations.
pub type Result<T> = std::result::Result<T, VerifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_error_display() {
        let err = VerifyError::UnknownAlgorithm("quantum_sort".to_string());
        assert!(err.to_string().contains("unknown algorithm"));

        let err = VerifyError::ScaffoldNotFound("dijkstra".to_string());
        assert!(err.to_string().contains("scaffold file not found"));

        let err = VerifyError::MalformedScaffold {
            name: "bfs".to_string(),
            section: "Scaffold Instructions".to_string(),
        };
        assert!(err.to_string().contains("Scaffold Instructions"));
    }

    #[test]
    fn test_llm_error_conversion() {
        let err: VerifyError = LlmError::RateLimit("429".to_string()).into();
        assert!(err.to_string().contains("rate limited"));
    }
}
