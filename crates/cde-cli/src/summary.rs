use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cde_model::DataModel;

/// Prints a one-row overview of a model after a conversion command.
pub fn print_model_summary(model: &DataModel) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Model"),
        header_cell("Version"),
        header_cell("Variables"),
        header_cell("Groups"),
        header_cell("Depth"),
        header_cell("Longitudinal"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    table.add_row(vec![
        Cell::new(&model.code)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(&model.version),
        Cell::new(model.variable_count()),
        Cell::new(model.group_count()),
        Cell::new(model.max_depth()),
        longitudinal_cell(model.is_longitudinal()),
    ]);
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn longitudinal_cell(longitudinal: bool) -> Cell {
    if longitudinal {
        Cell::new("yes")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("no").fg(Color::DarkGrey)
    }
}
