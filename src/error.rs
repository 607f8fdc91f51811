//! Application-wide error types.

use thiserror::Error;

/// A present environment variable whose value does not have the declared shape.
///
/// Absent variables never produce this; they fall back to their default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse {key}={value:?} as {expected}")]
pub struct ConfigParseError {
    pub key: String,
    pub value: String,
    pub expected: &'static str,
}

/// Every semantic rule broken by an assembled configuration, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("configuration validation failed:\n{}", render_violations(.violations))]
pub struct ConfigValidationError {
    pub violations: Vec<String>,
}

fn render_violations(violations: &[String]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config parse error: {0}")]
    Parse(#[from] ConfigParseError),

    #[error(transparent)]
    Validation(#[from] ConfigValidationError),

    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
