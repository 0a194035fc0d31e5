//! Record instantiation against a (possibly projected) schema.
//!
//! Semantics:
//! - Input must be a JSON object
//! - Required fields must be present; absent optional fields take their
//!   default or stay absent
//! - Undeclared keys are rejected (strict) or dropped (lenient)
//! - The resulting record never holds a key outside the schema

use serde_json::{Map, Value};

use super::record::Record;
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{
    json_type_name, validate_object, ExtraFieldPolicy, Schema, SchemaError, SchemaResult, ValidationDetails,
};

/// Builds validated records. Carries no per-record state, so one
/// instantiator can serve any number of schemas and records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Instantiator {
    policy: ExtraFieldPolicy,
}

impl Instantiator {
    pub fn new(policy: ExtraFieldPolicy) -> Self {
        Self { policy }
    }

    /// Rejects undeclared keys
    pub fn strict() -> Self {
        Self::new(ExtraFieldPolicy::Strict)
    }

    /// Drops undeclared keys
    pub fn lenient() -> Self {
        Self::new(ExtraFieldPolicy::Lenient)
    }

    pub fn policy(&self) -> ExtraFieldPolicy {
        self.policy
    }

    /// Validates `values` against `schema` and builds a record.
    ///
    /// # Errors
    ///
    /// Returns SHAPE_VALIDATION_FAILED if:
    /// - `values` is not an object
    /// - A required field is missing
    /// - A value is null or has the wrong type
    /// - An undeclared key is present and the policy is strict
    pub fn instantiate<S>(&self, schema: &S, values: &Value) -> SchemaResult<Record>
    where
        S: AsRef<Schema> + ?Sized,
    {
        let schema = schema.as_ref();
        let obj = values.as_object().ok_or_else(|| {
            let err = SchemaError::validation_failed(
                schema.name(),
                ValidationDetails::type_mismatch("$root", "object", json_type_name(values)),
            );
            self.rejected(schema, &err);
            err
        })?;
        self.instantiate_map(schema, obj)
    }

    /// Same as [`Instantiator::instantiate`] for an already-unwrapped object.
    pub fn instantiate_map<S>(&self, schema: &S, values: &Map<String, Value>) -> SchemaResult<Record>
    where
        S: AsRef<Schema> + ?Sized,
    {
        let schema = schema.as_ref();

        match validate_object(schema.name(), values, schema.fields(), "", self.policy) {
            Ok(accepted) => {
                let count = accepted.len().to_string();
                log_event_with_fields(
                    Event::RecordInstantiated,
                    &[("fields", count.as_str()), ("policy", self.policy.as_str()), ("schema", schema.name())],
                );
                Ok(Record::new(schema.name(), accepted))
            }
            Err(err) => {
                self.rejected(schema, &err);
                Err(err)
            }
        }
    }

    fn rejected(&self, schema: &Schema, err: &SchemaError) {
        let field = err.details().map(|d| d.field.as_str()).unwrap_or("");
        log_event_with_fields(
            Event::RecordRejected,
            &[("field", field), ("policy", self.policy.as_str()), ("schema", schema.name())],
        );
    }
}
