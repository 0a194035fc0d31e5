//! Validated records.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// A concrete instance validated against a schema.
///
/// Holds exactly the fields validation accepted, in schema order. There is
/// no way to add a field after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema_name: String,
    values: Vec<(String, Value)>,
}

impl Record {
    pub(crate) fn new(schema_name: impl Into<String>, values: Vec<(String, Value)>) -> Self {
        Self {
            schema_name: schema_name.into(),
            values,
        }
    }

    /// Name of the schema this record was validated against
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.iter().find(|(k, _)| k == field).map(|(_, v)| v)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.values.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Converts to a JSON object. Key order follows serde_json's map.
    pub fn to_json(&self) -> Value {
        Value::Object(self.values.iter().cloned().collect::<Map<String, Value>>())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (k, v) in &self.values {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
