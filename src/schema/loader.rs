//! Schema loader for reading schema definitions from disk
//!
//! - Schemas are stored as `<schema_dir>/*.json`, one schema per file
//! - Non-JSON files are ignored
//! - A malformed file or a duplicate schema name aborts the load

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{SchemaError, SchemaResult};
use super::types::Schema;
use crate::observability::{log_event_with_fields, Event};

/// Schema loader that reads schema files and keeps an in-memory registry.
///
/// Registered schemas are immutable: a name can be registered once.
pub struct SchemaLoader {
    schema_dir: PathBuf,
    schemas: BTreeMap<String, Schema>,
}

impl SchemaLoader {
    /// Creates a loader for the given schema directory.
    pub fn new(schema_dir: &Path) -> Self {
        Self {
            schema_dir: schema_dir.to_path_buf(),
            schemas: BTreeMap::new(),
        }
    }

    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads all schema files from the schema directory.
    pub fn load_all(&mut self) -> SchemaResult<()> {
        let entries = fs::read_dir(&self.schema_dir).map_err(|e| {
            SchemaError::malformed_schema(
                self.schema_dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        // Sorted so that duplicate detection reports the same file every run
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed_schema(
                    self.schema_dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            self.load_schema_file(&path)?;
        }

        Ok(())
    }

    /// Loads and registers a single schema file.
    pub fn load_schema_file(&mut self, path: &Path) -> SchemaResult<&Schema> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_schema(path.display().to_string(), format!("Failed to read file: {}", e))
        })?;

        // Structural checks run inside Schema's Deserialize impl
        let schema: Schema = serde_json::from_str(&content)
            .map_err(|e| SchemaError::malformed_schema(path.display().to_string(), format!("Invalid schema: {}", e)))?;

        let shown = path.display().to_string();
        log_event_with_fields(Event::SchemaLoaded, &[("path", shown.as_str()), ("schema", schema.name())]);

        self.register(schema)
    }

    /// Registers a schema directly.
    pub fn register(&mut self, schema: Schema) -> SchemaResult<&Schema> {
        if self.schemas.contains_key(schema.name()) {
            return Err(SchemaError::schema_exists(schema.name()));
        }

        let name = schema.name().to_string();
        Ok(self.schemas.entry(name).or_insert(schema))
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Gets a schema, failing with SHAPE_UNKNOWN_SCHEMA when absent.
    pub fn require(&self, name: &str) -> SchemaResult<&Schema> {
        self.get(name).ok_or_else(|| SchemaError::unknown_schema(name))
    }

    /// Registered schema names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDef, SchemaErrorCode};
    use serde_json::json;
    use tempfile::TempDir;

    fn write_schema(dir: &Path, file: &str, value: serde_json::Value) {
        fs::write(dir.join(file), serde_json::to_string_pretty(&value).unwrap()).unwrap();
    }

    #[test]
    fn test_load_all_reads_json_files() {
        let tmp = TempDir::new().unwrap();
        write_schema(
            tmp.path(),
            "user.json",
            json!({ "name": "User", "fields": [{ "name": "id", "type": "int" }] }),
        );
        write_schema(
            tmp.path(),
            "post.json",
            json!({ "name": "Post", "fields": [{ "name": "title", "type": "string" }] }),
        );
        fs::write(tmp.path().join("README.txt"), "ignored").unwrap();

        let mut loader = SchemaLoader::new(tmp.path());
        loader.load_all().unwrap();

        assert_eq!(loader.names(), vec!["Post", "User"]);
        assert_eq!(loader.require("User").unwrap().field_names(), vec!["id"]);
    }

    #[test]
    fn test_malformed_file_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bad.json"), "{ not json").unwrap();

        let mut loader = SchemaLoader::new(tmp.path());
        let err = loader.load_all().unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::MalformedSchema);
    }

    #[test]
    fn test_duplicate_field_in_file_rejected() {
        let tmp = TempDir::new().unwrap();
        write_schema(
            tmp.path(),
            "user.json",
            json!({ "name": "User", "fields": [
                { "name": "id", "type": "int" },
                { "name": "id", "type": "int" }
            ] }),
        );

        let mut loader = SchemaLoader::new(tmp.path());
        let err = loader.load_all().unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::MalformedSchema);
        assert!(err.message().contains("more than once"));
    }

    #[test]
    fn test_missing_directory_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(&tmp.path().join("nope"));
        assert!(loader.load_all().is_err());
    }

    #[test]
    fn test_register_is_immutable() {
        let tmp = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(tmp.path());
        let schema = Schema::new("User", vec![FieldDef::required_int("id")]).unwrap();

        loader.register(schema.clone()).unwrap();
        let err = loader.register(schema).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::SchemaExists);
        assert_eq!(loader.len(), 1);
    }

    #[test]
    fn test_require_unknown_schema() {
        let tmp = TempDir::new().unwrap();
        let loader = SchemaLoader::new(tmp.path());
        let err = loader.require("Ghost").unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::UnknownSchema);
    }
}
