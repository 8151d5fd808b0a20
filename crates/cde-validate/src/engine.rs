//! Recursive rule walk over a parsed data model tree.
//!
//! Rules run in a fixed order and stop at the first violation, so a
//! message always points at the shallowest offending node.

use std::collections::BTreeSet;

use serde_json::{Number, Value};

use cde_model::CdeType;

use crate::error::{InvalidDataModelError, Result};

/// Fields every data model must carry at the top level.
const ROOT_REQUIRED_FIELDS: [&str; 5] = ["code", "version", "label", "variables", "groups"];

/// Top-level fields that must be non-blank strings.
const ROOT_TEXT_FIELDS: [&str; 3] = ["code", "version", "label"];

/// Fields every CommonDataElement must carry.
const ELEMENT_REQUIRED_FIELDS: [&str; 4] = ["code", "sql_type", "isCategorical", "type"];

/// Variables a longitudinal model must define somewhere in its tree.
const LONGITUDINAL_MARKERS: [&str; 2] = ["subjectid", "visitid"];

/// Validate a data model tree, rejecting on the first rule violation.
///
/// Top-level shape is checked first, then the tree is walked depth-first
/// with variables checked before subgroups. Group and variable codes are
/// deduplicated by their full slash-joined path, so the same code may
/// recur under different parents. A non-list `groups` value is treated
/// as empty rather than rejected.
pub fn validate(data_model: &Value) -> Result<()> {
    for field in ROOT_REQUIRED_FIELDS {
        if data_model.get(field).is_none() {
            return Err(InvalidDataModelError::MissingField { field });
        }
    }

    for field in ROOT_TEXT_FIELDS {
        match data_model.get(field).and_then(Value::as_str) {
            Some(text) if !text.trim().is_empty() => {}
            _ => {
                return Err(InvalidDataModelError::BlankField {
                    field,
                    value: rendered(data_model.get(field)),
                });
            }
        }
    }

    let variables = match data_model.get("variables").and_then(Value::as_array) {
        Some(variables) if !variables.is_empty() => variables.as_slice(),
        _ => return Err(InvalidDataModelError::VariablesNotAList),
    };
    if !variables.iter().all(Value::is_object) {
        return Err(InvalidDataModelError::VariablesNotDictionaries);
    }

    let groups = list_or_empty(data_model.get("groups"));
    if !groups.iter().all(Value::is_object) {
        return Err(InvalidDataModelError::GroupsNotDictionaries);
    }

    tracing::debug!(
        variables = variables.len(),
        groups = groups.len(),
        "Data model shape accepted, walking tree"
    );

    let mut seen_variable_paths = BTreeSet::new();
    let mut seen_group_paths = BTreeSet::new();
    walk_group(data_model, "", &mut seen_variable_paths, &mut seen_group_paths)?;

    if !contains_dataset_element(variables, groups) {
        return Err(InvalidDataModelError::MissingDatasetElement);
    }

    if is_truthy(data_model.get("longitudinal")) {
        for marker in LONGITUDINAL_MARKERS {
            if !contains_marker(variables, groups, marker) {
                return Err(InvalidDataModelError::MissingLongitudinalElement {
                    code: marker,
                    path: "DataModel".to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Walk one group node. The root model is itself the outermost group.
fn walk_group(
    group: &Value,
    parent_path: &str,
    seen_variable_paths: &mut BTreeSet<String>,
    seen_group_paths: &mut BTreeSet<String>,
) -> Result<()> {
    let code = group.get("code");
    if !is_truthy(code) {
        return Err(InvalidDataModelError::GroupMissingCode {
            path: parent_path.to_string(),
        });
    }
    let group_code = rendered(code);
    let group_path = format!("{}/{}", parent_path, group_code);
    if !seen_group_paths.insert(group_path.clone()) {
        return Err(InvalidDataModelError::DuplicateGroup {
            code: group_code,
            path: parent_path.to_string(),
        });
    }

    for variable in list_or_empty(group.get("variables")) {
        let variable_code = rendered(variable.get("code"));
        let variable_path = format!("{}/{}", group_path, variable_code);
        if !seen_variable_paths.insert(variable_path.clone()) {
            return Err(InvalidDataModelError::DuplicateElement {
                code: variable_code,
                group_code,
                path: group_path,
            });
        }
        check_element(variable, &variable_path)?;
    }

    for subgroup in list_or_empty(group.get("groups")) {
        walk_group(subgroup, &group_path, seen_variable_paths, seen_group_paths)?;
    }

    Ok(())
}

/// Check one CommonDataElement at its resolved path.
fn check_element(variable: &Value, path: &str) -> Result<()> {
    for field in ELEMENT_REQUIRED_FIELDS {
        if variable.get(field).is_none() {
            return Err(InvalidDataModelError::MissingElementField {
                field,
                path: path.to_string(),
            });
        }
    }

    let type_value = variable.get("type");
    let Some(cde_type) = type_value
        .and_then(Value::as_str)
        .and_then(|text| text.parse::<CdeType>().ok())
    else {
        return Err(InvalidDataModelError::InvalidType {
            value: rendered(type_value),
            path: path.to_string(),
        });
    };

    let (expected_sql, expected_categorical) = cde_type.storage();
    let sql_value = variable.get("sql_type");
    let categorical_value = variable.get("isCategorical");
    if sql_value.and_then(Value::as_str) != Some(expected_sql.as_str())
        || categorical_value.and_then(Value::as_bool) != Some(expected_categorical)
    {
        return Err(InvalidDataModelError::StorageMismatch {
            cde_type,
            expected_sql,
            expected_categorical,
            actual_sql: rendered(sql_value),
            actual_categorical: rendered(categorical_value),
            path: path.to_string(),
        });
    }

    if is_truthy(categorical_value) && !is_truthy(variable.get("enumerations")) {
        return Err(InvalidDataModelError::MissingEnumerations {
            path: path.to_string(),
        });
    }

    if let (Some(Value::Number(min)), Some(Value::Number(max))) =
        (variable.get("minValue"), variable.get("maxValue"))
        && min_not_below_max(min, max)
    {
        return Err(InvalidDataModelError::InvalidRange {
            min: min.clone(),
            max: max.clone(),
            path: path.to_string(),
        });
    }

    Ok(())
}

fn contains_dataset_element(variables: &[Value], groups: &[Value]) -> bool {
    let found = variables.iter().any(|variable| {
        variable.get("code").and_then(Value::as_str) == Some("dataset")
            && variable.get("sql_type").and_then(Value::as_str) == Some("text")
            && is_truthy(variable.get("isCategorical"))
    });
    if found {
        return true;
    }
    groups.iter().any(|group| {
        contains_dataset_element(
            list_or_empty(group.get("variables")),
            list_or_empty(group.get("groups")),
        )
    })
}

fn contains_marker(variables: &[Value], groups: &[Value], code: &str) -> bool {
    if variables
        .iter()
        .any(|variable| variable.get("code").and_then(Value::as_str) == Some(code))
    {
        return true;
    }
    groups.iter().any(|group| {
        contains_marker(
            list_or_empty(group.get("variables")),
            list_or_empty(group.get("groups")),
            code,
        )
    })
}

/// Whether `min >= max`. Integer pairs compare exactly; only pairs with a
/// float bound go through `f64`.
fn min_not_below_max(min: &Number, max: &Number) -> bool {
    if let (Some(low), Some(high)) = (min.as_i64(), max.as_i64()) {
        return low >= high;
    }
    if let (Some(low), Some(high)) = (min.as_u64(), max.as_u64()) {
        return low >= high;
    }
    // Integer pairs left over straddle the i64 range, so the u64-only side
    // is the larger bound.
    if min.is_u64() && max.is_i64() {
        return true;
    }
    if min.is_i64() && max.is_u64() {
        return false;
    }
    match (min.as_f64(), max.as_f64()) {
        (Some(low), Some(high)) => low >= high,
        _ => false,
    }
}

/// View a value as a list, treating anything else as empty.
fn list_or_empty(value: Option<&Value>) -> &[Value] {
    value.and_then(Value::as_array).map_or(&[], Vec::as_slice)
}

/// Loose truthiness: null, false, zero, and empty containers are falsy.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
    }
}

/// Render a value for an error message: strings bare, others as JSON text.
fn rendered(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
