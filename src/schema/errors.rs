//! Schema error types
//!
//! Error codes:
//! - SHAPE_UNKNOWN_FIELD: selection names a field the schema does not have
//! - SHAPE_VALIDATION_FAILED: values do not satisfy a schema
//! - SHAPE_DUPLICATE_FIELD: field name declared twice
//! - SHAPE_INVALID_FIELD: field definition is malformed
//! - SHAPE_UNKNOWN_SCHEMA: schema name not registered
//! - SHAPE_SCHEMA_EXISTS: schema name already registered
//! - SHAPE_MALFORMED_SCHEMA: schema file unreadable or invalid
//!
//! Every error is returned to the caller. Nothing here is retried or
//! replaced by a fallback value.

use std::fmt;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Selection references fields absent from the source schema
    UnknownField,
    /// Values violate the schema
    ValidationFailed,
    /// Field name declared more than once
    DuplicateField,
    /// Field definition is malformed
    InvalidField,
    /// Schema name not found
    UnknownSchema,
    /// Schema name already registered
    SchemaExists,
    /// Schema file could not be read or parsed
    MalformedSchema,
}

impl SchemaErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::UnknownField => "SHAPE_UNKNOWN_FIELD",
            SchemaErrorCode::ValidationFailed => "SHAPE_VALIDATION_FAILED",
            SchemaErrorCode::DuplicateField => "SHAPE_DUPLICATE_FIELD",
            SchemaErrorCode::InvalidField => "SHAPE_INVALID_FIELD",
            SchemaErrorCode::UnknownSchema => "SHAPE_UNKNOWN_SCHEMA",
            SchemaErrorCode::SchemaExists => "SHAPE_SCHEMA_EXISTS",
            SchemaErrorCode::MalformedSchema => "SHAPE_MALFORMED_SCHEMA",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Validation failure details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field path (e.g., "user.address.city")
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(field: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "field to be present", "missing")
    }

    pub fn extra_field(field: impl Into<String>) -> Self {
        Self::new(field, "no undeclared fields", "extra field present")
    }

    pub fn type_mismatch(field: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(field, expected, actual)
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self::new(field, "non-null value", "null")
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': expected {}, got {}", self.field, self.expected, self.actual)
    }
}

/// Schema error type with full context
#[derive(Debug, Clone)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    schema_name: Option<String>,
    /// Offending names for SHAPE_UNKNOWN_FIELD, sorted
    unknown_fields: Vec<String>,
    details: Option<ValidationDetails>,
}

impl SchemaError {
    fn new(code: SchemaErrorCode, message: String, schema_name: Option<String>) -> Self {
        Self {
            code,
            message,
            schema_name,
            unknown_fields: Vec::new(),
            details: None,
        }
    }

    /// Create an unknown field error. Names are sorted and deduplicated.
    pub fn unknown_fields<I, S>(schema_name: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = schema_name.into();
        let mut unknown: Vec<String> = names.into_iter().map(Into::into).collect();
        unknown.sort();
        unknown.dedup();

        let mut err = Self::new(
            SchemaErrorCode::UnknownField,
            format!("Fields [{}] do not exist in '{}'", unknown.join(", "), name),
            Some(name),
        );
        err.unknown_fields = unknown;
        err
    }

    /// Create a validation failed error
    pub fn validation_failed(schema_name: impl Into<String>, details: ValidationDetails) -> Self {
        let mut err = Self::new(
            SchemaErrorCode::ValidationFailed,
            format!("Validation failed: {}", details),
            Some(schema_name.into()),
        );
        err.details = Some(details);
        err
    }

    /// Create a duplicate field error
    pub fn duplicate_field(schema_name: impl Into<String>, field: impl Into<String>) -> Self {
        let field = field.into();
        let mut err = Self::new(
            SchemaErrorCode::DuplicateField,
            format!("Field '{}' is declared more than once", field),
            Some(schema_name.into()),
        );
        err.details = Some(ValidationDetails::new(field, "unique field name", "duplicate"));
        err
    }

    /// Create an invalid field definition error
    pub fn invalid_field(
        schema_name: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let field = field.into();
        let reason = reason.into();
        let mut err = Self::new(
            SchemaErrorCode::InvalidField,
            format!("Invalid field '{}': {}", field, reason),
            Some(schema_name.into()),
        );
        err.details = Some(ValidationDetails::new(field, "valid field definition", reason));
        err
    }

    /// Create an unknown schema error
    pub fn unknown_schema(schema_name: impl Into<String>) -> Self {
        let name = schema_name.into();
        Self::new(
            SchemaErrorCode::UnknownSchema,
            format!("Schema '{}' not found", name),
            Some(name),
        )
    }

    /// Create a schema exists error
    pub fn schema_exists(schema_name: impl Into<String>) -> Self {
        let name = schema_name.into();
        Self::new(
            SchemaErrorCode::SchemaExists,
            format!("Schema '{}' is already registered", name),
            Some(name),
        )
    }

    /// Create an error for a malformed schema file
    pub fn malformed_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            SchemaErrorCode::MalformedSchema,
            format!("Malformed schema file '{}': {}", path.into(), reason.into()),
            None,
        )
    }

    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn schema_name(&self) -> Option<&str> {
        self.schema_name.as_deref()
    }

    /// Names the selection referenced that the schema lacks. Empty unless
    /// the code is `UnknownField`.
    pub fn unknown_field_names(&self) -> &[String] {
        &self.unknown_fields
    }

    pub fn details(&self) -> Option<&ValidationDetails> {
        self.details.as_ref()
    }

    pub fn is_unknown_field(&self) -> bool {
        self.code == SchemaErrorCode::UnknownField
    }

    pub fn is_validation(&self) -> bool {
        self.code == SchemaErrorCode::ValidationFailed
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchemaErrorCode::UnknownField.code(), "SHAPE_UNKNOWN_FIELD");
        assert_eq!(SchemaErrorCode::ValidationFailed.code(), "SHAPE_VALIDATION_FAILED");
        assert_eq!(SchemaErrorCode::DuplicateField.code(), "SHAPE_DUPLICATE_FIELD");
        assert_eq!(SchemaErrorCode::InvalidField.code(), "SHAPE_INVALID_FIELD");
        assert_eq!(SchemaErrorCode::UnknownSchema.code(), "SHAPE_UNKNOWN_SCHEMA");
        assert_eq!(SchemaErrorCode::SchemaExists.code(), "SHAPE_SCHEMA_EXISTS");
        assert_eq!(SchemaErrorCode::MalformedSchema.code(), "SHAPE_MALFORMED_SCHEMA");
    }

    #[test]
    fn test_unknown_fields_sorted_and_deduped() {
        let err = SchemaError::unknown_fields("User", ["zz", "ss", "zz"]);
        assert!(err.is_unknown_field());
        assert_eq!(err.unknown_field_names(), &["ss".to_string(), "zz".to_string()]);
        assert_eq!(err.schema_name(), Some("User"));
        assert!(err.message().contains("ss, zz"));
    }

    #[test]
    fn test_validation_details_display() {
        let details = ValidationDetails::type_mismatch("age", "int", "string");
        let display = format!("{}", details);
        assert!(display.contains("age"));
        assert!(display.contains("int"));
        assert!(display.contains("string"));
    }

    #[test]
    fn test_display_includes_code() {
        let err = SchemaError::validation_failed("User", ValidationDetails::missing_field("email"));
        let display = format!("{}", err);
        assert!(display.starts_with("SHAPE_VALIDATION_FAILED"));
        assert!(display.contains("email"));
        assert!(err.unknown_field_names().is_empty());
    }
}
