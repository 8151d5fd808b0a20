//! Typed data model for the catalogue's hierarchical variable trees.
//!
//! A data model is a versioned tree: the root holds variables and groups,
//! groups nest to arbitrary depth, and every leaf is a common data element
//! with a semantic type, a storage pair, and optional enumerations or
//! numeric bounds.

pub mod element;
pub mod tree;

pub use element::{CdeType, CommonDataElement, EnumerationValue, SqlType};
pub use tree::{DataModel, Group};
