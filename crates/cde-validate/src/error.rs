//! Error type for data model validation.

use serde_json::Number;
use thiserror::Error;

use cde_model::{CdeType, SqlType};

/// First rule violation found in a data model tree.
///
/// The rendered messages are stable and are returned to catalogue clients
/// verbatim, so changing a template here is a breaking change.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidDataModelError {
    /// A required top-level field is absent.
    #[error("DataModel is missing the required field '{field}'. Please include it in the input JSON.")]
    MissingField { field: &'static str },

    /// A top-level identity field is not a non-empty string.
    #[error("'{field}' in DataModel must be a non-empty string. Current value: '{value}'.")]
    BlankField { field: &'static str, value: String },

    /// Top-level `variables` is not a non-empty list.
    #[error("'variables' in DataModel must be a non-empty list of dictionaries. Ensure that variables are properly defined.")]
    VariablesNotAList,

    /// Top-level `variables` holds entries that are not objects.
    #[error("'variables' in DataModel must only contain dictionaries. Found invalid entries.")]
    VariablesNotDictionaries,

    /// Top-level `groups` holds entries that are not objects.
    #[error("'groups' in DataModel must only contain dictionaries. Found invalid entries.")]
    GroupsNotDictionaries,

    /// A group has no usable `code` value.
    #[error("Group at path: '{path}' is missing the 'code' field. Please provide a unique code for each group.")]
    GroupMissingCode { path: String },

    /// Two groups under the same parent share a code.
    #[error("Duplicate group code '{code}' detected at path: '{path}'. Group codes must be unique within the data model hierarchy.")]
    DuplicateGroup { code: String, path: String },

    /// Two variables inside one group share a code.
    #[error("Duplicate CommonDataElement code '{code}' detected in group '{group_code}' at path: '{path}'. Ensure all variable codes are unique within their group.")]
    DuplicateElement {
        code: String,
        group_code: String,
        path: String,
    },

    /// A variable lacks one of the required element fields.
    #[error("Missing required field '{field}' in CommonDataElement at path: '{path}'. Please ensure all required fields are provided.")]
    MissingElementField { field: &'static str, path: String },

    /// A variable's `type` is not one of the known semantic types.
    #[error("Invalid 'type' value '{value}' in CommonDataElement at path: '{path}'. Must be one of ['nominal', 'real', 'integer', 'text'].")]
    InvalidType { value: String, path: String },

    /// Declared storage differs from the storage implied by `type`.
    #[error("Incorrect 'sql_type' or 'isCategorical' for type '{cde_type}' in CommonDataElement at path: '{path}'. Expected ('{expected_sql}', {expected_categorical}), but got ('{actual_sql}', {actual_categorical}).")]
    StorageMismatch {
        cde_type: CdeType,
        expected_sql: SqlType,
        expected_categorical: bool,
        actual_sql: String,
        actual_categorical: String,
        path: String,
    },

    /// A categorical variable carries no enumerated values.
    #[error("'enumerations' is required for categorical CommonDataElement at path: '{path}', but it is missing.")]
    MissingEnumerations { path: String },

    /// `minValue` is not strictly below `maxValue`.
    #[error("Invalid range: 'minValue' ({min}) is greater than or equal to 'maxValue' ({max}) in CommonDataElement at path: '{path}'.")]
    InvalidRange {
        min: Number,
        max: Number,
        path: String,
    },

    /// No dataset discriminator variable anywhere in the tree.
    #[error("The DataModel must include at least one dataset CommonDataElement with code 'dataset', 'sql_type' as 'text', and 'isCategorical' set to true.")]
    MissingDatasetElement,

    /// A longitudinal model lacks `subjectid` or `visitid`.
    #[error("Missing '{code}' CommonDataElement required for longitudinal studies at path: '{path}'. Ensure a valid '{code}' is defined.")]
    MissingLongitudinalElement { code: &'static str, path: String },
}

/// Result type alias for validation.
pub type Result<T> = std::result::Result<T, InvalidDataModelError>;
