//! Schema subsystem for shapeguard
//!
//! Schemas are explicit, immutable values: an ordered list of field
//! definitions built once and checked at construction.
//!
//! # Design Principles
//!
//! - Field names are unique at every nesting level
//! - Defaults are type-checked when the schema is built
//! - No nulls or coercion during validation
//! - Deterministic validation and error reporting

mod errors;
mod loader;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, ValidationDetails};
pub use loader::SchemaLoader;
pub use types::{FieldDef, FieldType, Schema};
pub use validator::ExtraFieldPolicy;

pub(crate) use validator::{json_type_name, validate_object};
