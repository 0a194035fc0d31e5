//! shapeguard - construction-time field projection for data schemas
//!
//! Derive "public" views of a schema by omitting or picking fields. Every
//! selected name is checked when the view is built, and records built from
//! a view cannot hold a field the view left out.
//!
//! ```ignore
//! use shapeguard::projection::SchemaProjector;
//! use shapeguard::record::Instantiator;
//!
//! let public = SchemaProjector::omit(&user, ["password_hash", "api_key", "ssn"])?;
//! let record = Instantiator::strict().instantiate(&public, &input)?;
//! ```

pub mod cli;
pub mod observability;
pub mod projection;
pub mod record;
pub mod schema;
