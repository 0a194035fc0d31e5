//! Schema type definitions
//!
//! Supported types:
//! - string: UTF-8 string
//! - int: 64-bit signed integer
//! - bool: Boolean
//! - float: 64-bit floating point
//! - object: Nested object with its own ordered field list
//! - array: Homogeneous array with element type
//!
//! A `Schema` can only be obtained through `Schema::new` or checked
//! deserialization, so every live value has unique, non-empty field names
//! and type-correct defaults.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::validator::{self, ExtraFieldPolicy};

/// Supported field types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// Boolean
    Bool,
    /// 64-bit floating point
    Float,
    /// Nested object with its own ordered field list
    Object {
        /// Nested field definitions
        fields: Vec<FieldDef>,
    },
    /// Homogeneous array with single element type
    Array {
        /// Element type (boxed to allow recursive types)
        element_type: Box<FieldType>,
    },
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Bool => "bool",
            FieldType::Float => "float",
            FieldType::Object { .. } => "object",
            FieldType::Array { .. } => "array",
        }
    }
}

/// Field definition: name, declared type and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name, unique within its schema
    pub name: String,
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Whether field must be present
    #[serde(default = "default_required")]
    pub required: bool,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Value used when an optional field is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

fn default_required() -> bool {
    true
}

impl FieldDef {
    /// Create a field with the given type and requiredness
    pub fn new(name: impl Into<String>, field_type: FieldType, required: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            required,
            description: None,
            default: None,
        }
    }

    pub fn required_string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String, true)
    }

    pub fn optional_string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String, false)
    }

    pub fn required_int(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Int, true)
    }

    pub fn optional_int(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Int, false)
    }

    pub fn required_bool(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Bool, true)
    }

    pub fn optional_bool(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Bool, false)
    }

    pub fn required_float(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Float, true)
    }

    pub fn required_object(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self::new(name, FieldType::Object { fields }, true)
    }

    pub fn optional_object(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self::new(name, FieldType::Object { fields }, false)
    }

    pub fn required_array(name: impl Into<String>, element_type: FieldType) -> Self {
        Self::new(
            name,
            FieldType::Array {
                element_type: Box::new(element_type),
            },
            true,
        )
    }

    pub fn optional_array(name: impl Into<String>, element_type: FieldType) -> Self {
        Self::new(
            name,
            FieldType::Array {
                element_type: Box::new(element_type),
            },
            false,
        )
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a default value. Only meaningful on optional fields;
    /// `Schema::new` rejects defaults on required fields.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Complete schema definition: a name and an ordered list of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SchemaDef")]
pub struct Schema {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    fields: Vec<FieldDef>,
}

/// Unchecked wire form of a schema.
#[derive(Deserialize)]
struct SchemaDef {
    name: String,
    #[serde(default)]
    description: Option<String>,
    fields: Vec<FieldDef>,
}

impl TryFrom<SchemaDef> for Schema {
    type Error = SchemaError;

    fn try_from(def: SchemaDef) -> SchemaResult<Self> {
        let mut schema = Schema::new(def.name, def.fields)?;
        schema.description = def.description;
        Ok(schema)
    }
}

impl Schema {
    /// Create a new schema, checking its structure.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if:
    /// - A field name is empty (SHAPE_INVALID_FIELD)
    /// - A field name repeats at the same level (SHAPE_DUPLICATE_FIELD)
    /// - A required field carries a default, or a default does not match
    ///   the declared type (SHAPE_INVALID_FIELD)
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> SchemaResult<Self> {
        let name = name.into();
        check_fields(&name, &fields, "")?;
        Ok(Self {
            name,
            description: None,
            fields,
        })
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Looks up a top-level field by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Builds a schema from fields already known to satisfy the structural
    /// rules (a subset of a checked schema's fields).
    pub(crate) fn derived(name: String, description: Option<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name,
            description,
            fields,
        }
    }
}

impl AsRef<Schema> for Schema {
    fn as_ref(&self) -> &Schema {
        self
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{{}}}", self.name, self.field_names().join(", "))
    }
}

fn check_fields(schema_name: &str, fields: &[FieldDef], path_prefix: &str) -> SchemaResult<()> {
    let mut seen = HashSet::with_capacity(fields.len());

    for field in fields {
        let path = validator::make_path(path_prefix, &field.name);

        if field.name.is_empty() {
            return Err(SchemaError::invalid_field(schema_name, path, "field name must not be empty"));
        }

        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::duplicate_field(schema_name, path));
        }

        if let Some(default) = &field.default {
            if field.required {
                return Err(SchemaError::invalid_field(
                    schema_name,
                    path,
                    "required field cannot have a default",
                ));
            }
            validator::validate_value(
                schema_name,
                default,
                &field.field_type,
                &path,
                ExtraFieldPolicy::Strict,
            )
            .map_err(|e| SchemaError::invalid_field(schema_name, &path, format!("bad default: {}", e.message())))?;
        }

        if let Some(nested) = nested_fields(&field.field_type) {
            check_fields(schema_name, nested, &path)?;
        }
    }

    Ok(())
}

/// Returns the nested field list of an object type, looking through arrays.
fn nested_fields(field_type: &FieldType) -> Option<&[FieldDef]> {
    match field_type {
        FieldType::Object { fields } => Some(fields),
        FieldType::Array { element_type } => nested_fields(element_type),
        _ => None,
    }
}
