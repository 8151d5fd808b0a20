//! Structural validation of catalogue data models.
//!
//! The entry point is [`validate`], which walks a parsed JSON tree and
//! rejects it with the first [`InvalidDataModelError`] it finds. Checks
//! run over the raw tree rather than the typed model so that shape
//! problems are reported with the same messages the catalogue API uses.

mod engine;
mod error;

pub use engine::validate;
pub use error::{InvalidDataModelError, Result};
