use cde_model::{CdeType, CommonDataElement, DataModel, Group};
use cde_transform::squash_single_variable_groups;

fn variable(code: &str) -> CommonDataElement {
    let (sql_type, is_categorical) = CdeType::Text.storage();
    CommonDataElement {
        code: code.to_string(),
        label: code.to_string(),
        description: None,
        sql_type,
        is_categorical,
        enumerations: None,
        cde_type: CdeType::Text,
        methodology: None,
        units: None,
        min_value: None,
        max_value: None,
    }
}

fn group(code: &str, variables: Vec<CommonDataElement>, groups: Vec<Group>) -> Group {
    Group {
        code: code.to_string(),
        label: Some(code.to_string()),
        variables,
        groups,
    }
}

fn model(variables: Vec<CommonDataElement>, groups: Vec<Group>) -> DataModel {
    DataModel {
        code: "stroke".to_string(),
        version: "1.0".to_string(),
        label: "Stroke".to_string(),
        longitudinal: None,
        variables,
        groups,
    }
}

fn codes(variables: &[CommonDataElement]) -> Vec<&str> {
    variables.iter().map(|v| v.code.as_str()).collect()
}

#[test]
fn single_variable_leaf_groups_dissolve_into_their_parent() {
    let mut model = model(
        vec![variable("dataset")],
        vec![group(
            "ischemic",
            vec![],
            vec![
                group(
                    "etiology",
                    vec![variable("toast_cad"), variable("toast_laa")],
                    vec![group("rare", vec![variable("toast_rareoth")], vec![])],
                ),
                group(
                    "territory",
                    vec![variable("infrat")],
                    vec![group(
                        "arterial",
                        vec![variable("aca_any"), variable("pca_any")],
                        vec![group("mca", vec![variable("mca_side")], vec![])],
                    )],
                ),
            ],
        )],
    );

    squash_single_variable_groups(&mut model);

    let ischemic = &model.groups[0];
    let etiology = &ischemic.groups[0];
    assert_eq!(codes(&etiology.variables), ["toast_cad", "toast_laa", "toast_rareoth"]);
    assert!(etiology.groups.is_empty());

    let territory = &ischemic.groups[1];
    assert_eq!(codes(&territory.variables), ["infrat"]);
    let arterial = &territory.groups[0];
    assert_eq!(codes(&arterial.variables), ["aca_any", "pca_any", "mca_side"]);
    assert!(arterial.groups.is_empty());
}

#[test]
fn dissolving_a_child_can_make_the_parent_eligible() {
    let mut model = model(
        vec![variable("dataset")],
        vec![group(
            "a",
            vec![],
            vec![group("b", vec![], vec![group("c", vec![variable("solo")], vec![])])],
        )],
    );

    squash_single_variable_groups(&mut model);

    assert_eq!(codes(&model.variables), ["dataset", "solo"]);
    assert!(model.groups.is_empty());
}

#[test]
fn hoisted_variables_keep_their_group_order() {
    let mut model = model(
        vec![variable("first")],
        vec![
            group("g1", vec![variable("v1")], vec![]),
            group("g2", vec![variable("v2")], vec![]),
        ],
    );

    squash_single_variable_groups(&mut model);

    assert_eq!(codes(&model.variables), ["first", "v1", "v2"]);
}

#[test]
fn groups_outside_the_exact_condition_are_kept() {
    let mut model = model(
        vec![],
        vec![
            group("pair", vec![variable("x"), variable("y")], vec![]),
            group(
                "wrapper",
                vec![variable("own")],
                vec![group("full", vec![variable("p"), variable("q")], vec![])],
            ),
            group("hollow", vec![], vec![]),
        ],
    );

    squash_single_variable_groups(&mut model);

    let kept: Vec<&str> = model.groups.iter().map(|g| g.code.as_str()).collect();
    assert_eq!(kept, ["pair", "wrapper", "hollow"]);
    assert_eq!(codes(&model.groups[1].variables), ["own"]);
    assert_eq!(model.groups[1].groups.len(), 1);
}
