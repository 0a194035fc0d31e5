//! CLI error types

use std::io;

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors. Every variant ends the command with a non-zero exit.
#[derive(Debug, Error)]
pub enum CliError {
    /// Projection, validation or schema loading failed
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// Configuration file missing or invalid
    #[error("SHAPE_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// stdin/stdout failure
    #[error("SHAPE_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    /// Input was not valid JSON
    #[error("SHAPE_CLI_JSON_ERROR: {0}")]
    Json(#[from] serde_json::Error),

    /// Arguments are inconsistent
    #[error("SHAPE_CLI_USAGE_ERROR: {0}")]
    Usage(String),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        CliError::Config(msg.into())
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        CliError::Usage(msg.into())
    }

    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Schema(e) => e.code().code(),
            CliError::Config(_) => "SHAPE_CLI_CONFIG_ERROR",
            CliError::Io(_) => "SHAPE_CLI_IO_ERROR",
            CliError::Json(_) => "SHAPE_CLI_JSON_ERROR",
            CliError::Usage(_) => "SHAPE_CLI_USAGE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_code_passes_through() {
        let err: CliError = SchemaError::unknown_fields("User", ["ss"]).into();
        assert_eq!(err.code(), "SHAPE_UNKNOWN_FIELD");
        assert!(err.to_string().contains("ss"));
    }

    #[test]
    fn test_display_has_code() {
        let err = CliError::config_error("bad");
        assert_eq!(err.to_string(), "SHAPE_CLI_CONFIG_ERROR: bad");
        assert_eq!(CliError::usage("x").code(), "SHAPE_CLI_USAGE_ERROR");
    }
}
