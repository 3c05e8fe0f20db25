use std::time::Instant;

use crate::consistency::find_inconsistent;
use crate::error::ValidationError;
use crate::model::{RowSet, ValidationMeta, ValidationResult, ValidationSummary};
use crate::roles::ColumnRoleSelection;
use crate::sentinel::find_bad_values;
use crate::table::Table;

/// Run both rules over `table`. The table is only read; each rule normalizes
/// the cells it needs on its own.
pub fn validate(
    table: &Table,
    selection: &ColumnRoleSelection,
) -> Result<ValidationResult, ValidationError> {
    let start = Instant::now();
    let roles = selection.resolve(table)?;

    let (eligible_rows, inconsistent) = find_inconsistent(table, &roles);
    let bad_values = find_bad_values(table);

    let inconsistent = RowSet::new(table.columns().to_vec(), inconsistent);
    let bad_values = RowSet::new(table.columns().to_vec(), bad_values);

    let flagged_by_both = inconsistent
        .rows
        .iter()
        .filter(|r| bad_values.contains(r.index))
        .count();

    let summary = ValidationSummary {
        total_rows: table.len(),
        eligible_rows,
        inconsistent_rows: inconsistent.len(),
        bad_value_rows: bad_values.len(),
        flagged_by_both,
    };

    let elapsed_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        total = summary.total_rows,
        eligible = summary.eligible_rows,
        inconsistent = summary.inconsistent_rows,
        bad_values = summary.bad_value_rows,
        elapsed_ms,
        "validation complete"
    );

    Ok(ValidationResult {
        meta: ValidationMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            elapsed_ms,
            columns: selection.clone(),
        },
        summary,
        inconsistent,
        bad_values,
    })
}
