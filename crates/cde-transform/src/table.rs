use std::io::{Read, Write};

use crate::error::{Result, TransformError};

/// Column order of the flat variable table.
pub const VARIABLE_COLUMNS: [&str; 8] = [
    "name",
    "code",
    "type",
    "values",
    "unit",
    "description",
    "conceptPath",
    "methodology",
];

/// One row of the flat variable table.
///
/// Cells are kept verbatim as text; an empty string stands for an absent
/// optional cell. Rows appear in the pre-order position of the variable
/// they describe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableRow {
    /// Human readable label shown in the `name` column.
    pub name: String,
    /// Variable code, unique within its group.
    pub code: String,
    /// Semantic type cell.
    pub cde_type: String,
    /// Enumerations or bounds in their cell encoding.
    pub values: String,
    /// Unit of measurement.
    pub unit: String,
    /// Free text description.
    pub description: String,
    /// Slash separated path from model code to variable code.
    pub concept_path: String,
    /// Collection methodology note.
    pub methodology: String,
}

impl VariableRow {
    fn check_required(&self) -> Result<()> {
        for (column, value) in [
            ("name", &self.name),
            ("code", &self.code),
            ("type", &self.cde_type),
            ("conceptPath", &self.concept_path),
        ] {
            if value.is_empty() {
                return Err(TransformError::MissingColumnValue { column });
            }
        }
        Ok(())
    }
}

/// Reads a variable table from CSV text.
///
/// Columns are resolved by header name, so any column order is accepted.
/// Cells are trimmed; rows missing a value in `name`, `code`, `type` or
/// `conceptPath` are rejected.
pub fn read_variable_table<R: Read>(reader: R) -> Result<Vec<VariableRow>> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let name = column_position(&headers, "name")?;
    let code = column_position(&headers, "code")?;
    let cde_type = column_position(&headers, "type")?;
    let values = column_position(&headers, "values")?;
    let unit = column_position(&headers, "unit")?;
    let description = column_position(&headers, "description")?;
    let concept_path = column_position(&headers, "conceptPath")?;
    let methodology = column_position(&headers, "methodology")?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row = VariableRow {
            name: cell(&record, name),
            code: cell(&record, code),
            cde_type: cell(&record, cde_type),
            values: cell(&record, values),
            unit: cell(&record, unit),
            description: cell(&record, description),
            concept_path: cell(&record, concept_path),
            methodology: cell(&record, methodology),
        };
        row.check_required()?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(TransformError::EmptyTable);
    }
    tracing::debug!(rows = rows.len(), "Read variable table");
    Ok(rows)
}

/// Writes a variable table as CSV, header row first.
pub fn write_variable_table<W: Write>(writer: W, rows: &[VariableRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(VARIABLE_COLUMNS)?;
    for row in rows {
        csv_writer.write_record([
            row.name.as_str(),
            row.code.as_str(),
            row.cde_type.as_str(),
            row.values.as_str(),
            row.unit.as_str(),
            row.description.as_str(),
            row.concept_path.as_str(),
            row.methodology.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Renders a variable table to an in-memory CSV string.
pub fn render_variable_table(rows: &[VariableRow]) -> Result<String> {
    let mut buffer = Vec::new();
    write_variable_table(&mut buffer, rows)?;
    let rendered = String::from_utf8(buffer)
        .map_err(|error| std::io::Error::new(std::io::ErrorKind::InvalidData, error))?;
    Ok(rendered)
}

fn column_position(headers: &csv::StringRecord, column: &'static str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim_matches('\u{feff}').trim() == column)
        .ok_or(TransformError::MissingColumn { column })
}

fn cell(record: &csv::StringRecord, position: usize) -> String {
    record.get(position).map(str::trim).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_trims_cells_and_ignores_column_order() {
        let text = "\u{feff}code,name,type,conceptPath,values,unit,description,methodology\n\
                    age, Age ,integer,demo/age,0-120,years,,\n";
        let rows = read_variable_table(text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Age");
        assert_eq!(rows[0].code, "age");
        assert_eq!(rows[0].cde_type, "integer");
        assert_eq!(rows[0].concept_path, "demo/age");
        assert_eq!(rows[0].values, "0-120");
        assert_eq!(rows[0].description, "");
    }

    #[test]
    fn test_read_rejects_missing_header_column() {
        let text = "name,code,type,values,unit,description,conceptPath\nA,a,text,,,,m/a\n";
        let error = read_variable_table(text.as_bytes()).unwrap_err();
        assert!(matches!(error, TransformError::MissingColumn { column: "methodology" }));
    }

    #[test]
    fn test_read_rejects_blank_required_cell() {
        let text = "name,code,type,values,unit,description,conceptPath,methodology\n\
                    Age,,integer,,,,demo/age,\n";
        let error = read_variable_table(text.as_bytes()).unwrap_err();
        assert_eq!(error.to_string(), "Missing value for required column 'code'.");
    }

    #[test]
    fn test_read_rejects_header_only_table() {
        let text = "name,code,type,values,unit,description,conceptPath,methodology\n";
        let error = read_variable_table(text.as_bytes()).unwrap_err();
        assert!(matches!(error, TransformError::EmptyTable));
    }
}
