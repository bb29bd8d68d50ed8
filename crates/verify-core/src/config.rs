//! Runtime settings, sourced from the environment.
//!
//! Every knob can be overridden with a `VERIFY_`-prefixed variable;
//! unset variables fall back to the documented defaults. Variables
//! that are set but unparsable are reported as errors rather than
//! silently ignored.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, VerifyError};

/// Which model class a run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Fast, cheap model for iterating on scaffolds.
    Dev,
    /// Strong model for certification runs.
    Cert,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Dev => "dev",
            Mode::Cert => "cert",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dev" => Ok(Mode::Dev),
            "cert" => Ok(Mode::Cert),
            other => Err(VerifyError::Config(format!("unknown mode '{other}'"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub dev_model: String,
    pub cert_model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub request_timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub parallel_llm_calls: usize,
    pub enable_cache: bool,
    pub scaffolds_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub results_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dev_model: "claude-3-haiku-20240307".to_string(),
            cert_model: "claude-3-opus-20240229".to_string(),
            temperature: 0.0,
            max_tokens: 4096,
            request_timeout: Duration::from_secs(120),
            max_retries: 3,
            retry_delay: Duration::from_secs_f64(1.0),
            parallel_llm_calls: 5,
            enable_cache: true,
            scaffolds_dir: PathBuf::from("scaffolds"),
            cache_dir: PathBuf::from(".verify-cache"),
            results_dir: PathBuf::from("results"),
        }
    }
}

impl Settings {
    /// Load settings, applying `VERIFY_*` overrides on top of defaults.
    pub fn from_env() -> Result<Self> {
        let mut settings = Settings::default();

        if let Some(model) = read("VERIFY_DEV_MODEL") {
            settings.dev_model = model;
        }
        if let Some(model) = read("VERIFY_CERT_MODEL") {
            settings.cert_model = model;
        }
        if let Some(raw) = read("VERIFY_TEMPERATURE") {
            settings.temperature = parse(&raw, "VERIFY_TEMPERATURE")?;
        }
        if let Some(raw) = read("VERIFY_MAX_TOKENS") {
            settings.max_tokens = parse(&raw, "VERIFY_MAX_TOKENS")?;
        }
        if let Some(raw) = read("VERIFY_TIMEOUT_SECS") {
            settings.request_timeout = Duration::from_secs(parse(&raw, "VERIFY_TIMEOUT_SECS")?);
        }
        if let Some(raw) = read("VERIFY_MAX_RETRIES") {
            settings.max_retries = parse(&raw, "VERIFY_MAX_RETRIES")?;
        }
        if let Some(raw) = read("VERIFY_RETRY_DELAY_SECS") {
            settings.retry_delay =
                Duration::from_secs_f64(parse(&raw, "VERIFY_RETRY_DELAY_SECS")?);
        }
        if let Some(raw) = read("VERIFY_PARALLEL_LLM_CALLS") {
            settings.parallel_llm_calls = parse(&raw, "VERIFY_PARALLEL_LLM_CALLS")?;
        }
        if let Some(raw) = read("VERIFY_ENABLE_CACHE") {
            settings.enable_cache = parse_bool(&raw, "VERIFY_ENABLE_CACHE")?;
        }
        if let Some(dir) = read("VERIFY_SCAFFOLDS_DIR") {
            settings.scaffolds_dir = PathBuf::from(dir);
        }
        if let Some(dir) = read("VERIFY_CACHE_DIR") {
            settings.cache_dir = PathBuf::from(dir);
        }
        if let Some(dir) = read("VERIFY_RESULTS_DIR") {
            settings.results_dir = PathBuf::from(dir);
        }

        Ok(settings)
    }

    /// Model the given mode resolves to.
    pub fn active_model(&self, mode: Mode) -> &str {
        match mode {
            Mode::Dev => &self.dev_model,
            Mode::Cert => &self.cert_model,
        }
    }
}

fn read(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse<T: std::str::FromStr>(raw: &str, name: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| VerifyError::Config(format!("invalid value '{raw}' for {name}")))
}

fn parse_bool(raw: &str, name: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(VerifyError::Config(format!(
            "invalid boolean '{other}' for {name}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.temperature, 0.0);
        assert_eq!(settings.max_tokens, 4096);
        assert_eq!(settings.max_retries, 3);
        assert_eq!(settings.parallel_llm_calls, 5);
        assert!(settings.enable_cache);
    }

    #[test]
    fn test_mode_selects_model() {
        let settings = Settings::default();
        assert_eq!(settings.active_model(Mode::Dev), "claude-3-haiku-20240307");
        assert_eq!(settings.active_model(Mode::Cert), "claude-3-opus-20240229");
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("dev".parse::<Mode>().unwrap(), Mode::Dev);
        assert_eq!("CERT".parse::<Mode>().unwrap(), Mode::Cert);
        assert!("prod".parse::<Mode>().is_err());
    }

    #[test]
    fn test_bool_parsing() {
        assert!(parse_bool("true", "X").unwrap());
        assert!(!parse_bool("0", "X").unwrap());
        assert!(parse_bool("maybe", "X").is_err());
    }
}
