use cde_model::DataModel;
use cde_transform::{flatten_model, render_variable_table};

fn example_model() -> DataModel {
    let text = r#"{
        "code": "Minimal Example",
        "version": "1.0",
        "label": "Minimal Example",
        "variables": [
            {
                "code": "dataset",
                "label": "Dataset Variable",
                "description": "An example variable description",
                "sql_type": "text",
                "isCategorical": true,
                "enumerations": [
                    {"code": "enum1", "label": "Enumeration 1"}
                ],
                "type": "nominal",
                "methodology": "example methodology",
                "units": "unit"
            }
        ],
        "groups": [
            {
                "code": "Example Group",
                "label": "Example Group",
                "variables": [
                    {
                        "code": "group_variable",
                        "label": "Group Variable",
                        "description": "A variable within a group",
                        "sql_type": "int",
                        "isCategorical": false,
                        "type": "integer",
                        "methodology": "group methodology",
                        "units": "years",
                        "minValue": 0,
                        "maxValue": 100
                    }
                ],
                "groups": [
                    {
                        "code": "Nested Group",
                        "label": "Nested Group",
                        "variables": [
                            {
                                "code": "nested_group_variable",
                                "label": "Nested Group Variable",
                                "description": "A nested group variable",
                                "sql_type": "text",
                                "isCategorical": true,
                                "enumerations": [
                                    {"code": "nested_enum1", "label": "Nested Enumeration 1"}
                                ],
                                "type": "nominal",
                                "methodology": "nested methodology"
                            }
                        ]
                    }
                ]
            }
        ]
    }"#;
    serde_json::from_str(text).unwrap()
}

#[test]
fn rows_come_out_in_depth_first_order() {
    let rows = flatten_model(&example_model());
    let codes: Vec<&str> = rows.iter().map(|row| row.code.as_str()).collect();
    assert_eq!(codes, ["dataset", "group_variable", "nested_group_variable"]);
}

#[test]
fn concept_paths_chain_codes_from_the_model_root() {
    let rows = flatten_model(&example_model());
    let paths: Vec<&str> = rows.iter().map(|row| row.concept_path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "Minimal Example/dataset",
            "Minimal Example/Example Group/group_variable",
            "Minimal Example/Example Group/Nested Group/nested_group_variable",
        ]
    );
}

#[test]
fn cells_carry_labels_values_and_optional_metadata() {
    let rows = flatten_model(&example_model());

    assert_eq!(rows[0].name, "Dataset Variable");
    assert_eq!(rows[0].cde_type, "nominal");
    assert_eq!(rows[0].values, "{\"enum1\",\"Enumeration 1\"}");
    assert_eq!(rows[0].unit, "unit");

    assert_eq!(rows[1].cde_type, "integer");
    assert_eq!(rows[1].values, "0-100");
    assert_eq!(rows[1].unit, "years");

    // The nested variable has no units, so its cell is left empty.
    assert_eq!(rows[2].unit, "");
    assert_eq!(rows[2].methodology, "nested methodology");
}

#[test]
fn rendered_table_quotes_enumeration_cells() {
    let rendered = render_variable_table(&flatten_model(&example_model())).unwrap();
    insta::assert_snapshot!(rendered, @r#"
name,code,type,values,unit,description,conceptPath,methodology
Dataset Variable,dataset,nominal,"{""enum1"",""Enumeration 1""}",unit,An example variable description,Minimal Example/dataset,example methodology
Group Variable,group_variable,integer,0-100,years,A variable within a group,Minimal Example/Example Group/group_variable,group methodology
Nested Group Variable,nested_group_variable,nominal,"{""nested_enum1"",""Nested Enumeration 1""}",,A nested group variable,Minimal Example/Example Group/Nested Group/nested_group_variable,nested methodology
"#);
}
