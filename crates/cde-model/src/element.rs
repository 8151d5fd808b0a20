use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;
use std::str::FromStr;

/// Semantic type of a common data element.
///
/// The semantic type fixes the storage pair: each variant prescribes the
/// exact `sql_type` and `isCategorical` combination a conforming element
/// must carry. See [`CdeType::storage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CdeType {
    /// Categorical value drawn from an enumeration.
    Nominal,
    /// Floating point measurement.
    Real,
    /// Whole number measurement.
    Integer,
    /// Free text.
    Text,
}

impl CdeType {
    /// All recognized semantic types, in the order diagnostics list them.
    pub const ALL: [CdeType; 4] = [
        CdeType::Nominal,
        CdeType::Real,
        CdeType::Integer,
        CdeType::Text,
    ];

    /// Returns the canonical lowercase name stored in catalogue JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            CdeType::Nominal => "nominal",
            CdeType::Real => "real",
            CdeType::Integer => "integer",
            CdeType::Text => "text",
        }
    }

    /// The storage pair prescribed for this type: (`sql_type`, `isCategorical`).
    pub fn storage(&self) -> (SqlType, bool) {
        match self {
            CdeType::Nominal => (SqlType::Text, true),
            CdeType::Real => (SqlType::Real, false),
            CdeType::Integer => (SqlType::Int, false),
            CdeType::Text => (SqlType::Text, false),
        }
    }
}

impl fmt::Display for CdeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CdeType {
    type Err = String;

    /// Parse a semantic type name. Matching is exact: the catalogue stores
    /// types lowercase, and any other spelling is treated as unknown.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nominal" => Ok(CdeType::Nominal),
            "real" => Ok(CdeType::Real),
            "integer" => Ok(CdeType::Integer),
            "text" => Ok(CdeType::Text),
            _ => Err(format!("Unknown CDE type: {}", s)),
        }
    }
}

/// Storage type of a common data element in the federated database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlType {
    Text,
    Real,
    Int,
}

impl SqlType {
    /// Returns the canonical lowercase name stored in catalogue JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            SqlType::Text => "text",
            SqlType::Real => "real",
            SqlType::Int => "int",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SqlType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(SqlType::Text),
            "real" => Ok(SqlType::Real),
            "int" => Ok(SqlType::Int),
            _ => Err(format!("Unknown SQL type: {}", s)),
        }
    }
}

/// One permitted value of a categorical element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationValue {
    pub code: String,
    pub label: String,
}

/// A leaf variable definition.
///
/// Optional metadata fields are omitted from serialized trees when absent,
/// matching the catalogue's JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonDataElement {
    pub code: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sql_type: SqlType,
    #[serde(rename = "isCategorical")]
    pub is_categorical: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enumerations: Option<Vec<EnumerationValue>>,
    #[serde(rename = "type")]
    pub cde_type: CdeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methodology: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(rename = "minValue", default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<Number>,
    #[serde(rename = "maxValue", default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<Number>,
}

impl CommonDataElement {
    /// True when the element's storage pair matches the pair prescribed by
    /// its semantic type.
    pub fn storage_consistent(&self) -> bool {
        (self.sql_type, self.is_categorical) == self.cde_type.storage()
    }
}
