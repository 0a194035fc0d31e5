//! Value validation against field definitions
//!
//! Validation semantics:
//! - All required fields are present
//! - Undeclared fields are rejected (strict) or dropped (lenient)
//! - Field types exactly match schema types
//! - Absent optional fields take their declared default, if any
//!
//! Forbidden behaviors:
//! - Implicit type coercion
//! - Null values
//! - Passing an undeclared field through to the output
//!
//! Validation never mutates its input. The returned values are a fresh copy
//! holding only declared fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::{SchemaError, SchemaResult, ValidationDetails};
use super::types::{FieldDef, FieldType};
use crate::observability::{log_event_with_fields, Event};

/// What to do with keys a schema does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtraFieldPolicy {
    /// Reject the input
    #[default]
    Strict,
    /// Drop the key and continue
    Lenient,
}

impl ExtraFieldPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtraFieldPolicy::Strict => "strict",
            ExtraFieldPolicy::Lenient => "lenient",
        }
    }
}

/// Validates an object against an ordered field list.
///
/// Returns the declared fields that ended up in the output, in declaration
/// order. Extra keys are checked before declared fields so that a strict
/// rejection always names the stray key. Extra keys are visited in sorted
/// order whatever order the input used.
pub(crate) fn validate_object(
    schema_name: &str,
    obj: &Map<String, Value>,
    fields: &[FieldDef],
    path_prefix: &str,
    policy: ExtraFieldPolicy,
) -> SchemaResult<Vec<(String, Value)>> {
    let mut extras: Vec<&String> = obj
        .keys()
        .filter(|key| !fields.iter().any(|f| &f.name == *key))
        .collect();
    extras.sort();

    for key in extras {
        let field_path = make_path(path_prefix, key);
        match policy {
            ExtraFieldPolicy::Strict => {
                return Err(SchemaError::validation_failed(
                    schema_name,
                    ValidationDetails::extra_field(field_path),
                ));
            }
            ExtraFieldPolicy::Lenient => {
                log_event_with_fields(
                    Event::ExtraFieldDropped,
                    &[("field", field_path.as_str()), ("schema", schema_name)],
                );
            }
        }
    }

    let mut out = Vec::with_capacity(fields.len());

    for field_def in fields {
        let field_path = make_path(path_prefix, &field_def.name);

        match obj.get(&field_def.name) {
            Some(value) => {
                let value = validate_value(schema_name, value, &field_def.field_type, &field_path, policy)?;
                out.push((field_def.name.clone(), value));
            }
            None if field_def.required => {
                return Err(SchemaError::validation_failed(
                    schema_name,
                    ValidationDetails::missing_field(field_path),
                ));
            }
            None => {
                if let Some(default) = &field_def.default {
                    out.push((field_def.name.clone(), default.clone()));
                }
            }
        }
    }

    Ok(out)
}

/// Validates a value against a field type and returns the accepted value.
pub(crate) fn validate_value(
    schema_name: &str,
    value: &Value,
    expected_type: &FieldType,
    field_path: &str,
    policy: ExtraFieldPolicy,
) -> SchemaResult<Value> {
    if value.is_null() {
        return Err(SchemaError::validation_failed(
            schema_name,
            ValidationDetails::null_value(field_path),
        ));
    }

    match expected_type {
        FieldType::String => {
            if !value.is_string() {
                return Err(type_error(schema_name, field_path, "string", value));
            }
        }
        FieldType::Int => {
            // Floats are never truncated into ints
            if value.is_u64() && !value.is_i64() {
                return Err(SchemaError::validation_failed(
                    schema_name,
                    ValidationDetails::type_mismatch(field_path, "int", "int out of i64 range"),
                ));
            }
            if !value.is_i64() {
                return Err(type_error(schema_name, field_path, "int", value));
            }
        }
        FieldType::Bool => {
            if !value.is_boolean() {
                return Err(type_error(schema_name, field_path, "bool", value));
            }
        }
        FieldType::Float => {
            // Accept both integers and floats as float
            if !value.is_number() {
                return Err(type_error(schema_name, field_path, "float", value));
            }
        }
        FieldType::Object { fields } => {
            let obj = value
                .as_object()
                .ok_or_else(|| type_error(schema_name, field_path, "object", value))?;
            // Map keeps insertion order, so nested keys follow declaration order
            let accepted = validate_object(schema_name, obj, fields, field_path, policy)?;
            return Ok(Value::Object(accepted.into_iter().collect()));
        }
        FieldType::Array { element_type } => {
            let arr = value
                .as_array()
                .ok_or_else(|| type_error(schema_name, field_path, "array", value))?;

            let mut accepted = Vec::with_capacity(arr.len());
            for (i, elem) in arr.iter().enumerate() {
                let elem_path = format!("{}[{}]", field_path, i);
                accepted.push(validate_value(schema_name, elem, element_type, &elem_path, policy)?);
            }
            return Ok(Value::Array(accepted));
        }
    }

    Ok(value.clone())
}

/// Returns the JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Creates a field path from prefix and field name.
pub(crate) fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn type_error(schema_name: &str, field_path: &str, expected: &str, actual: &Value) -> SchemaError {
    SchemaError::validation_failed(
        schema_name,
        ValidationDetails::type_mismatch(field_path, expected, json_type_name(actual)),
    )
}
