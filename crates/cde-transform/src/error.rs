use thiserror::Error;

/// Errors raised while converting between model trees and variable tables.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The table header lacks one of the expected columns.
    #[error("missing required column '{column}' in variable table header")]
    MissingColumn {
        /// Name of the absent column.
        column: &'static str,
    },

    /// A row left a required column empty.
    #[error("Missing value for required column '{column}'.")]
    MissingColumnValue {
        /// Name of the column with the empty cell.
        column: &'static str,
    },

    /// The table contains a header but no data rows.
    #[error("variable table contains no rows")]
    EmptyTable,

    /// A concept path holds fewer than a model code and a variable code.
    #[error("concept path '{path}' must contain at least a model code and a variable code")]
    ShortConceptPath {
        /// The offending concept path.
        path: String,
    },

    /// A concept path starts with a different model code than the first row.
    #[error("concept path '{path}' does not start with model code '{expected}'")]
    ForeignConceptPath {
        /// The offending concept path.
        path: String,
        /// Model code taken from the first row.
        expected: String,
    },

    /// A concept path does not end with the row's own variable code.
    #[error("concept path '{path}' does not end with variable code '{code}'")]
    PathCodeMismatch {
        /// The offending concept path.
        path: String,
        /// Variable code from the same row.
        code: String,
    },

    /// The type column holds a value outside the semantic type table.
    #[error("unknown semantic type '{value}' for variable '{code}'")]
    UnknownType {
        /// Raw cell contents.
        value: String,
        /// Variable code from the same row.
        code: String,
    },

    /// The values column could not be parsed as enumerations or bounds.
    #[error("cannot parse values cell '{value}' for variable '{code}'")]
    BadValuesCell {
        /// Raw cell contents.
        value: String,
        /// Variable code from the same row.
        code: String,
    },

    /// CSV layer failure while reading or writing a table.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure while flushing or rendering a table.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the conversion code.
pub type Result<T> = std::result::Result<T, TransformError>;
