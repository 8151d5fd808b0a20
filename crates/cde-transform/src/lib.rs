//! Conversion between data model trees and the flat variable table.
//!
//! A model tree flattens into one CSV row per variable, with the tree
//! position encoded in the `conceptPath` column. The reverse direction
//! rebuilds the tree from those paths, deriving storage columns from each
//! row's semantic type. [`squash_single_variable_groups`] is the one
//! structural rewrite offered on top: it dissolves groups that wrap a
//! single variable.

mod error;
mod export;
mod import;
mod squash;
mod table;

pub use error::{Result, TransformError};
pub use export::flatten_model;
pub use import::{ImportOptions, build_model};
pub use squash::squash_single_variable_groups;
pub use table::{
    VARIABLE_COLUMNS, VariableRow, read_variable_table, render_variable_table,
    write_variable_table,
};
