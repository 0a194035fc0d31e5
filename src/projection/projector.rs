//! Schema projection: deriving restricted schemas from a canonical one.
//!
//! A projection removes fields from the schema itself, before any record
//! exists. A record built from a projected schema cannot carry an excluded
//! field, whatever the caller later does with it.

use serde::Serialize;

use super::selection::Selection;
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{FieldDef, Schema, SchemaResult};

/// A schema derived from a source schema by a checked selection.
///
/// Owns its fields outright. Holds the source name and selection for
/// provenance only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedSchema {
    source: String,
    selection: Selection,
    schema: Schema,
}

impl ProjectedSchema {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Name of the schema this was derived from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn name(&self) -> &str {
        self.schema.name()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.schema.field_names()
    }

    pub fn into_schema(self) -> Schema {
        self.schema
    }
}

impl AsRef<Schema> for ProjectedSchema {
    fn as_ref(&self) -> &Schema {
        &self.schema
    }
}

/// Builds projected schemas.
///
/// Every operation checks the whole selection against the source before
/// producing anything, and fails with SHAPE_UNKNOWN_FIELD naming every
/// unknown entry.
pub struct SchemaProjector;

impl SchemaProjector {
    /// Keeps every field of `schema` except `exclude`, in source order.
    pub fn omit<S, I, N>(schema: &S, exclude: I) -> SchemaResult<ProjectedSchema>
    where
        S: AsRef<Schema> + ?Sized,
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self::project(schema, &Selection::omit(exclude))
    }

    /// Keeps only the `include` fields of `schema`, in source order.
    pub fn pick<S, I, N>(schema: &S, include: I) -> SchemaResult<ProjectedSchema>
    where
        S: AsRef<Schema> + ?Sized,
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self::project(schema, &Selection::pick(include))
    }

    /// Applies a selection to `schema`.
    pub fn project<S>(schema: &S, selection: &Selection) -> SchemaResult<ProjectedSchema>
    where
        S: AsRef<Schema> + ?Sized,
    {
        let source = schema.as_ref();

        if let Err(err) = selection.check(source) {
            let unknown = err.unknown_field_names().join(",");
            log_event_with_fields(
                Event::ProjectionRejected,
                &[("mode", selection.mode()), ("schema", source.name()), ("unknown", unknown.as_str())],
            );
            return Err(err);
        }

        let fields: Vec<FieldDef> = source
            .fields()
            .iter()
            .filter(|f| selection.keeps(&f.name))
            .cloned()
            .collect();

        let schema = Schema::derived(
            selection.derived_name(source.name()),
            source.description().map(str::to_string),
            fields,
        );

        let kept = schema.field_names().join(",");
        log_event_with_fields(
            Event::SchemaProjected,
            &[
                ("fields", kept.as_str()),
                ("mode", selection.mode()),
                ("schema", schema.name()),
                ("source", source.name()),
            ],
        );

        Ok(ProjectedSchema {
            source: source.name().to_string(),
            selection: selection.clone(),
            schema,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;
    use serde_json::json;

    fn user_schema() -> Schema {
        Schema::new(
            "User",
            vec![
                FieldDef::required_int("id").with_description("User ID"),
                FieldDef::required_string("username").with_description("Public username"),
                FieldDef::required_string("email").with_description("Email address"),
                FieldDef::required_string("password_hash").with_description("Hashed password"),
                FieldDef::required_string("api_key").with_description("API access key"),
                FieldDef::required_string("ssn").with_description("Social Security Number"),
                FieldDef::required_string("created_at").with_description("Account creation timestamp"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_omit_keeps_order_and_metadata() {
        let schema = user_schema();
        let public = SchemaProjector::omit(&schema, ["password_hash", "api_key", "ssn"]).unwrap();

        assert_eq!(public.field_names(), vec!["id", "username", "email", "created_at"]);
        assert_eq!(public.schema().field("email"), schema.field("email"));
        assert_eq!(public.name(), "UserWithout[api_key,password_hash,ssn]");
        assert_eq!(public.source(), "User");
    }

    #[test]
    fn test_pick_uses_source_order_not_selection_order() {
        let minimal = SchemaProjector::pick(&user_schema(), ["username", "id"]).unwrap();
        assert_eq!(minimal.field_names(), vec!["id", "username"]);
        assert_eq!(minimal.name(), "UserWith[id,username]");
    }

    #[test]
    fn test_typo_rejected() {
        let err = SchemaProjector::omit(&user_schema(), ["password_hash", "api_key", "ss"]).unwrap_err();
        assert!(err.is_unknown_field());
        assert_eq!(err.unknown_field_names(), &["ss".to_string()]);
    }

    #[test]
    fn test_pick_unknown_rejected() {
        let err = SchemaProjector::pick(&user_schema(), ["id", "name", "mail"]).unwrap_err();
        assert_eq!(err.unknown_field_names(), &["mail".to_string(), "name".to_string()]);
    }

    #[test]
    fn test_omit_nothing_is_identity() {
        let schema = user_schema();
        let same = SchemaProjector::omit(&schema, Vec::<String>::new()).unwrap();
        assert_eq!(same.schema().fields(), schema.fields());
    }

    #[test]
    fn test_omit_everything_is_empty() {
        let schema = user_schema();
        let names: Vec<String> = schema.field_names().into_iter().map(String::from).collect();
        let empty = SchemaProjector::omit(&schema, names).unwrap();
        assert!(empty.schema().is_empty());
    }

    #[test]
    fn test_projections_compose() {
        let public = SchemaProjector::omit(&user_schema(), ["password_hash", "api_key", "ssn"]).unwrap();
        let narrow = SchemaProjector::pick(&public, ["id", "email"]).unwrap();
        assert_eq!(narrow.field_names(), vec!["id", "email"]);

        // Fields removed upstream are unknown downstream
        let err = SchemaProjector::pick(&public, ["ssn"]).unwrap_err();
        assert_eq!(err.unknown_field_names(), &["ssn".to_string()]);
    }

    #[test]
    fn test_projection_independent_of_source() {
        let public = {
            let schema = user_schema();
            SchemaProjector::omit(&schema, ["ssn"]).unwrap()
        };
        assert_eq!(public.schema().len(), 6);
    }

    #[test]
    fn test_nested_fields_carried_whole() {
        let schema = Schema::new(
            "Order",
            vec![
                FieldDef::required_int("id"),
                FieldDef::required_object(
                    "shipping",
                    vec![FieldDef::required_string("city"), FieldDef::optional_string("note")],
                ),
                FieldDef::optional_array("tags", FieldType::String).with_default(json!([])),
            ],
        )
        .unwrap();

        let view = SchemaProjector::pick(&schema, ["shipping", "tags"]).unwrap();
        assert_eq!(view.schema().field("shipping"), schema.field("shipping"));
        assert_eq!(view.schema().field("tags").unwrap().default, Some(json!([])));
    }

    #[test]
    fn test_serializes_with_provenance() {
        let view = SchemaProjector::pick(&user_schema(), ["id"]).unwrap();
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["source"], json!("User"));
        assert_eq!(value["selection"], json!({ "mode": "pick", "fields": ["id"] }));
        assert_eq!(value["schema"]["fields"][0]["name"], json!("id"));
    }
}
