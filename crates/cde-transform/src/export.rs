use cde_model::{CommonDataElement, DataModel, Group};

use crate::table::VariableRow;

/// Flattens a model tree into variable table rows.
///
/// Rows come out in pre-order: the root's own variables first, then each
/// group in declaration order with its variables before its subgroups.
/// The `name` column carries the element label and `conceptPath` the
/// slash joined chain of codes from the model code down to the variable.
pub fn flatten_model(model: &DataModel) -> Vec<VariableRow> {
    let mut rows = Vec::new();
    collect_rows(&model.variables, &model.groups, &model.code, &mut rows);
    tracing::debug!(model = %model.code, rows = rows.len(), "Flattened data model");
    rows
}

fn collect_rows(
    variables: &[CommonDataElement],
    groups: &[Group],
    path: &str,
    rows: &mut Vec<VariableRow>,
) {
    for variable in variables {
        rows.push(VariableRow {
            name: variable.label.clone(),
            code: variable.code.clone(),
            cde_type: variable.cde_type.as_str().to_string(),
            values: values_cell(variable),
            unit: variable.units.clone().unwrap_or_default(),
            description: variable.description.clone().unwrap_or_default(),
            concept_path: format!("{}/{}", path, variable.code),
            methodology: variable.methodology.clone().unwrap_or_default(),
        });
    }
    for group in groups {
        let group_path = format!("{}/{}", path, group.code);
        collect_rows(&group.variables, &group.groups, &group_path, rows);
    }
}

/// Renders the `values` cell for one element.
///
/// Enumerations become `{"code","label"}` pairs joined by commas; a pair
/// of numeric bounds becomes `min-max`; anything else is left empty.
fn values_cell(variable: &CommonDataElement) -> String {
    if let Some(enumerations) = &variable.enumerations
        && !enumerations.is_empty()
    {
        let pairs: Vec<String> = enumerations
            .iter()
            .map(|value| format!("{{\"{}\",\"{}\"}}", value.code, value.label))
            .collect();
        return pairs.join(",");
    }
    if let (Some(min), Some(max)) = (&variable.min_value, &variable.max_value) {
        return format!("{}-{}", min, max);
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use cde_model::{CdeType, EnumerationValue};

    use super::*;

    fn element(code: &str, cde_type: CdeType) -> CommonDataElement {
        let (sql_type, is_categorical) = cde_type.storage();
        CommonDataElement {
            code: code.to_string(),
            label: code.to_string(),
            description: None,
            sql_type,
            is_categorical,
            enumerations: None,
            cde_type,
            methodology: None,
            units: None,
            min_value: None,
            max_value: None,
        }
    }

    #[test]
    fn test_values_cell_prefers_enumerations() {
        let mut variable = element("status", CdeType::Nominal);
        variable.enumerations = Some(vec![
            EnumerationValue {
                code: "0".to_string(),
                label: "no".to_string(),
            },
            EnumerationValue {
                code: "1".to_string(),
                label: "yes".to_string(),
            },
        ]);
        assert_eq!(values_cell(&variable), "{\"0\",\"no\"},{\"1\",\"yes\"}");
    }

    #[test]
    fn test_values_cell_renders_bounds() {
        let mut variable = element("age", CdeType::Integer);
        variable.min_value = Some(0.into());
        variable.max_value = Some(120.into());
        assert_eq!(values_cell(&variable), "0-120");
    }

    #[test]
    fn test_values_cell_empty_without_metadata() {
        let mut variable = element("note", CdeType::Text);
        assert_eq!(values_cell(&variable), "");
        variable.min_value = Some(0.into());
        assert_eq!(values_cell(&variable), "");
    }
}
