//! Record subsystem
//!
//! Turns untrusted key/value input into records shaped exactly like a
//! schema. Excluded fields are structurally absent from the result.

mod instantiator;
#[allow(clippy::module_inception)]
mod record;

pub use instantiator::Instantiator;
pub use record::Record;
