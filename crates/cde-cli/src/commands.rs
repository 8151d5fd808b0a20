use std::ffi::OsStr;
use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use cde_cli::report::ValidationReport;
use cde_model::DataModel;
use cde_transform::{
    ImportOptions, build_model, flatten_model, read_variable_table, squash_single_variable_groups,
    write_variable_table,
};

use crate::cli::{ExportArgs, ImportArgs, ValidateArgs};
use crate::summary::print_model_summary;

/// Validate one model file. Returns whether the model was valid; operational
/// failures (unreadable file, malformed JSON) surface as errors instead.
pub fn run_validate(args: &ValidateArgs) -> Result<bool> {
    let span = info_span!("validate", model = %args.model.display());
    let _guard = span.enter();

    let text = fs::read_to_string(&args.model)
        .with_context(|| format!("read {}", args.model.display()))?;
    let tree: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parse {}", args.model.display()))?;

    let outcome = cde_validate::validate(&tree);
    match &outcome {
        Ok(()) => println!("Data model is valid."),
        Err(error) => eprintln!("error: {error}"),
    }

    if let Some(report_path) = &args.report {
        let diagnostic = outcome.as_ref().err().map(ToString::to_string);
        ValidationReport::new(&model_stem(&args.model), diagnostic).write(report_path)?;
        info!(report = %report_path.display(), "validation report written");
    }
    Ok(outcome.is_ok())
}

/// Flatten a model file into a variable table CSV.
pub fn run_export(args: &ExportArgs) -> Result<()> {
    let span = info_span!("export", model = %args.model.display());
    let _guard = span.enter();

    let text = fs::read_to_string(&args.model)
        .with_context(|| format!("read {}", args.model.display()))?;
    if !args.no_validate {
        let tree: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("parse {}", args.model.display()))?;
        cde_validate::validate(&tree)?;
    }
    let model: DataModel = serde_json::from_str(&text)
        .with_context(|| format!("decode data model {}", args.model.display()))?;

    let rows = flatten_model(&model);
    let file = File::create(&args.output)
        .with_context(|| format!("create {}", args.output.display()))?;
    write_variable_table(file, &rows).context("write variable table")?;
    info!(rows = rows.len(), output = %args.output.display(), "variable table written");

    print_model_summary(&model);
    Ok(())
}

/// Rebuild a model from a variable table CSV and write it as pretty JSON.
pub fn run_import(args: &ImportArgs) -> Result<()> {
    let span = info_span!("import", table = %args.table.display());
    let _guard = span.enter();

    let file =
        File::open(&args.table).with_context(|| format!("open {}", args.table.display()))?;
    let rows = read_variable_table(file).context("read variable table")?;

    let options = ImportOptions {
        version: args.model_version.clone(),
        label: args.label.clone(),
        longitudinal: args.longitudinal,
    };
    let mut model = build_model(&rows, &options)?;
    if args.squash_single_variable_groups {
        squash_single_variable_groups(&mut model);
    }
    if !args.no_validate {
        let tree = serde_json::to_value(&model).context("encode data model")?;
        cde_validate::validate(&tree)?;
    }

    let json = serde_json::to_string_pretty(&model).context("render data model")?;
    fs::write(&args.output, format!("{json}\n"))
        .with_context(|| format!("write {}", args.output.display()))?;
    info!(model = %model.code, output = %args.output.display(), "data model written");

    print_model_summary(&model);
    Ok(())
}

fn model_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("model")
        .to_string()
}
