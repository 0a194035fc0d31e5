//! Projection subsystem
//!
//! Derives "view" schemas from a canonical schema by omitting or picking
//! fields. Selections are checked in full when the view is built; a name the
//! source does not declare is an error, never a no-op.

mod projector;
mod selection;

pub use projector::{ProjectedSchema, SchemaProjector};
pub use selection::Selection;
