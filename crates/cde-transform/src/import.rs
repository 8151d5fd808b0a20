use cde_model::{CdeType, CommonDataElement, DataModel, EnumerationValue, Group};
use serde_json::Number;

use crate::error::{Result, TransformError};
use crate::table::VariableRow;

/// Root metadata supplied alongside a variable table on import.
///
/// The table itself only carries concept paths, so the version, label and
/// longitudinal flag of the rebuilt model come from here.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Model version. Defaults to `1.0`.
    pub version: String,
    /// Model label. Falls back to the model code when absent.
    pub label: Option<String>,
    /// Marks the rebuilt model as a longitudinal study.
    pub longitudinal: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            version: "1.0".to_string(),
            label: None,
            longitudinal: false,
        }
    }
}

/// Rebuilds a model tree from variable table rows.
///
/// The model code is the first segment of the first row's concept path and
/// every row must agree on it. Intermediate path segments become groups,
/// created on first use in row order and labeled after their code. Storage
/// columns are derived from the semantic type, so a rebuilt tree always
/// passes the storage pairing rule.
pub fn build_model(rows: &[VariableRow], options: &ImportOptions) -> Result<DataModel> {
    let first = rows.first().ok_or(TransformError::EmptyTable)?;
    let model_code = first
        .concept_path
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string();

    let mut variables: Vec<CommonDataElement> = Vec::new();
    let mut groups: Vec<Group> = Vec::new();

    for row in rows {
        let segments: Vec<&str> = row.concept_path.split('/').collect();
        if segments.len() < 2 {
            return Err(TransformError::ShortConceptPath {
                path: row.concept_path.clone(),
            });
        }
        if segments[0] != model_code {
            return Err(TransformError::ForeignConceptPath {
                path: row.concept_path.clone(),
                expected: model_code,
            });
        }
        if segments[segments.len() - 1] != row.code {
            return Err(TransformError::PathCodeMismatch {
                path: row.concept_path.clone(),
                code: row.code.clone(),
            });
        }

        let variable = element_from_row(row)?;
        let mut target_variables = &mut variables;
        let mut target_groups = &mut groups;
        for &code in &segments[1..segments.len() - 1] {
            let group = ensure_group(target_groups, code);
            target_variables = &mut group.variables;
            target_groups = &mut group.groups;
        }
        target_variables.push(variable);
    }

    let model = DataModel {
        label: options.label.clone().unwrap_or_else(|| model_code.clone()),
        code: model_code,
        version: options.version.clone(),
        longitudinal: Some(options.longitudinal),
        variables,
        groups,
    };
    tracing::debug!(
        model = %model.code,
        variables = model.variable_count(),
        groups = model.group_count(),
        "Rebuilt data model from variable table"
    );
    Ok(model)
}

/// Returns the group with the given code, creating it at the tail if no
/// sibling carries that code yet. New groups are labeled after their code.
fn ensure_group<'a>(groups: &'a mut Vec<Group>, code: &str) -> &'a mut Group {
    let position = match groups.iter().position(|group| group.code == code) {
        Some(position) => position,
        None => {
            groups.push(Group {
                code: code.to_string(),
                label: Some(code.to_string()),
                variables: Vec::new(),
                groups: Vec::new(),
            });
            groups.len() - 1
        }
    };
    &mut groups[position]
}

fn element_from_row(row: &VariableRow) -> Result<CommonDataElement> {
    let cde_type: CdeType = row.cde_type.parse().map_err(|_| TransformError::UnknownType {
        value: row.cde_type.clone(),
        code: row.code.clone(),
    })?;
    let (sql_type, is_categorical) = cde_type.storage();

    let mut enumerations = None;
    let mut min_value = None;
    let mut max_value = None;
    let values = row.values.trim();
    if !values.is_empty() {
        match cde_type {
            CdeType::Nominal => {
                enumerations = Some(parse_enumerations(values, &row.code)?);
            }
            CdeType::Real | CdeType::Integer => {
                let (low, high) = parse_bounds(values, &row.code)?;
                min_value = Some(low);
                max_value = Some(high);
            }
            // Text variables carry no value constraints.
            CdeType::Text => {}
        }
    }

    Ok(CommonDataElement {
        code: row.code.clone(),
        label: row.name.clone(),
        description: optional_cell(&row.description),
        sql_type,
        is_categorical,
        enumerations,
        cde_type,
        methodology: optional_cell(&row.methodology),
        units: optional_cell(&row.unit),
        min_value,
        max_value,
    })
}

/// Parses a cell like `{"0","no"},{"1","yes"}` into enumeration values.
fn parse_enumerations(cell: &str, code: &str) -> Result<Vec<EnumerationValue>> {
    let inner = cell
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| bad_values_cell(cell, code))?;

    let mut values = Vec::new();
    for pair in inner.split("},{") {
        let pair = pair
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .ok_or_else(|| bad_values_cell(cell, code))?;
        let (value_code, label) = pair
            .split_once("\",\"")
            .ok_or_else(|| bad_values_cell(cell, code))?;
        values.push(EnumerationValue {
            code: value_code.to_string(),
            label: label.to_string(),
        });
    }
    Ok(values)
}

/// Parses a `min-max` cell into a pair of JSON numbers.
///
/// The split point is the first `-` that leaves a parseable number on each
/// side, so negative bounds like `-5--2` come through intact.
fn parse_bounds(cell: &str, code: &str) -> Result<(Number, Number)> {
    for (index, _) in cell.match_indices('-') {
        if index == 0 {
            continue;
        }
        let low = cell[..index].trim();
        let high = cell[index + 1..].trim();
        if let (Ok(low), Ok(high)) = (low.parse::<Number>(), high.parse::<Number>()) {
            return Ok((low, high));
        }
    }
    Err(bad_values_cell(cell, code))
}

fn optional_cell(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn bad_values_cell(cell: &str, code: &str) -> TransformError {
    TransformError::BadValuesCell {
        value: cell.to_string(),
        code: code.to_string(),
    }
}
