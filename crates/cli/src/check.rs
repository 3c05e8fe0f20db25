//! `sffcheck check` / `sffcheck run` — apply both rules and report.

use std::path::{Path, PathBuf};

use sffcheck::{ColumnRoleSelection, SffConfig, Table, ValidationError, ValidationResult};

use crate::exit_codes::{validation_exit_code, EXIT_FINDINGS, EXIT_OUTPUT};
use crate::CliError;

/// How results leave the process.
pub struct ReportOptions {
    pub out_dir: PathBuf,
    pub json: bool,
    pub output: Option<PathBuf>,
    pub strict_exit: bool,
    pub quiet: bool,
}

fn validation_err(err: ValidationError) -> CliError {
    let hint = match &err {
        ValidationError::MissingColumn { .. } | ValidationError::MissingItemColumn { .. } => {
            Some("run `sffcheck columns <FILE>` to list the normalized column names".to_string())
        }
        ValidationError::DuplicateColumn { .. } => {
            Some("column names are compared upper-cased and trimmed".to_string())
        }
        _ => None,
    };
    CliError { code: validation_exit_code(&err), message: err.to_string(), hint }
}

fn output_err(msg: impl Into<String>) -> CliError {
    CliError { code: EXIT_OUTPUT, message: msg.into(), hint: None }
}

pub fn cmd_check(
    file: PathBuf,
    manufacturer: String,
    brand: String,
    subbrand: String,
    opts: ReportOptions,
) -> Result<(), CliError> {
    let table = Table::from_csv_path(&file).map_err(validation_err)?;
    let selection = ColumnRoleSelection::new(manufacturer, brand, subbrand);
    let result = sffcheck::validate(&table, &selection).map_err(validation_err)?;
    report(&result, &opts)
}

pub fn cmd_run(
    config_path: PathBuf,
    json: bool,
    output: Option<PathBuf>,
    strict_exit: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let config = load_config(&config_path)?;

    // Resolve file paths relative to config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    tracing::info!(name = %config.name, "running config");
    let table = Table::from_csv_path(&config.input_path(base_dir)).map_err(validation_err)?;
    let result = sffcheck::validate(&table, &config.columns).map_err(validation_err)?;

    let opts = ReportOptions {
        out_dir: config.output_dir(base_dir),
        json,
        output: output.or_else(|| config.json_path(base_dir)),
        strict_exit,
        quiet,
    };
    report(&result, &opts)
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    eprintln!(
        "config ok: \"{}\" ({} / {} / {})",
        config.name, config.columns.manufacturer, config.columns.brand, config.columns.subbrand
    );
    Ok(())
}

pub fn cmd_columns(file: PathBuf, json: bool) -> Result<(), CliError> {
    let table = Table::from_csv_path(&file).map_err(validation_err)?;
    let has_item = table.column_index(sffcheck::roles::ITEM_COLUMN).is_some();

    if json {
        let value = serde_json::json!({
            "columns": table.columns(),
            "rows": table.len(),
            "has_item": has_item,
        });
        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| output_err(format!("JSON serialization error: {e}")))?;
        println!("{text}");
    } else {
        for column in table.columns() {
            println!("{column}");
        }
    }

    if !has_item {
        eprintln!("warning: no ITEM column; `check` will refuse this file");
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<SffConfig, CliError> {
    let text = std::fs::read_to_string(path).map_err(|e| CliError {
        code: crate::exit_codes::EXIT_CONFIG,
        message: format!("cannot read config {}: {e}", path.display()),
        hint: None,
    })?;
    SffConfig::from_toml(&text).map_err(validation_err)
}

fn report(result: &ValidationResult, opts: &ReportOptions) -> Result<(), CliError> {
    let written = result
        .write_artifacts(&opts.out_dir)
        .map_err(|e| output_err(e.to_string()))?;

    if opts.json || opts.output.is_some() {
        let json_str = result
            .to_json_pretty()
            .map_err(|e| output_err(format!("JSON serialization error: {e}")))?;
        if let Some(ref path) = opts.output {
            std::fs::write(path, &json_str)
                .map_err(|e| output_err(format!("cannot write output: {e}")))?;
            if !opts.quiet {
                eprintln!("wrote {}", path.display());
            }
        }
        if opts.json {
            println!("{json_str}");
        }
    }

    // Human summary to stderr
    if !opts.quiet {
        let s = &result.summary;
        eprintln!(
            "{} rows checked ({} with an item) in {} ms",
            s.total_rows, s.eligible_rows, result.meta.elapsed_ms
        );
        eprintln!("Inconsistent rows (rule 1): {}", s.inconsistent_rows);
        eprintln!("Rows with bad values (rule 2): {}", s.bad_value_rows);
        for path in &written {
            eprintln!("wrote {}", path.display());
        }
    }

    if opts.strict_exit && result.has_findings() {
        return Err(CliError { code: EXIT_FINDINGS, message: String::new(), hint: None });
    }
    Ok(())
}
