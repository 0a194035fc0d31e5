//! Field selections: the set of names a projection omits or picks.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::{Schema, SchemaError, SchemaResult};

/// A named set of fields to exclude or include.
///
/// A selection is not bound to a schema. Its names are checked against the
/// source schema when it is applied, and any name the schema lacks fails the
/// projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "fields", rename_all = "lowercase")]
pub enum Selection {
    /// Keep every field except these
    Omit(BTreeSet<String>),
    /// Keep only these fields
    Pick(BTreeSet<String>),
}

impl Selection {
    pub fn omit<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Omit(names.into_iter().map(Into::into).collect())
    }

    pub fn pick<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Pick(names.into_iter().map(Into::into).collect())
    }

    /// Selected names in sorted order
    pub fn names(&self) -> &BTreeSet<String> {
        match self {
            Selection::Omit(names) | Selection::Pick(names) => names,
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Selection::Omit(_) => "omit",
            Selection::Pick(_) => "pick",
        }
    }

    /// Whether the field survives this selection. Assumes the selection
    /// was already checked against the schema.
    pub fn keeps(&self, field: &str) -> bool {
        match self {
            Selection::Omit(names) => !names.contains(field),
            Selection::Pick(names) => names.contains(field),
        }
    }

    /// Names the schema does not declare, sorted.
    pub fn unknown_in(&self, schema: &Schema) -> Vec<String> {
        self.names()
            .iter()
            .filter(|name| !schema.contains(name))
            .cloned()
            .collect()
    }

    /// Fails with SHAPE_UNKNOWN_FIELD if any name is absent from `schema`.
    pub fn check(&self, schema: &Schema) -> SchemaResult<()> {
        let unknown = self.unknown_in(schema);
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::unknown_fields(schema.name(), unknown))
        }
    }

    /// The opposite-mode selection that keeps the same fields of `schema`.
    ///
    /// `Omit(E)` becomes `Pick(fields − E)` and vice versa.
    pub fn complement(&self, schema: &Schema) -> SchemaResult<Selection> {
        self.check(schema)?;

        let rest: BTreeSet<String> = schema
            .field_names()
            .into_iter()
            .filter(|name| !self.names().contains(*name))
            .map(str::to_string)
            .collect();

        Ok(match self {
            Selection::Omit(_) => Selection::Pick(rest),
            Selection::Pick(_) => Selection::Omit(rest),
        })
    }

    /// Name of the schema this selection derives from `source`, for example
    /// `UserWithout[api_key,ssn]` or `UserWith[id,username]`.
    ///
    /// Names are listed sorted and comma-separated. A name that is not a
    /// plain identifier is written quoted, so distinct selections never
    /// share a derived name.
    pub fn derived_name(&self, source: &str) -> String {
        let infix = match self {
            Selection::Omit(_) => "Without",
            Selection::Pick(_) => "With",
        };
        let names: Vec<String> = self.names().iter().map(|n| name_token(n)).collect();
        format!("{}{}[{}]", source, infix, names.join(","))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.names().iter().map(String::as_str).collect();
        write!(f, "{}({})", self.mode(), names.join(", "))
    }
}

fn name_token(name: &str) -> String {
    let plain = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        name.to_string()
    } else {
        format!("{:?}", name)
    }
}
