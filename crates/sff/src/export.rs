//! CSV and JSON rendering of validation results.

use std::path::{Path, PathBuf};

use crate::error::ValidationError;
use crate::model::{RowSet, ValidationResult};

pub const INCONSISTENT_FILE: &str = "inconsistent_rows.csv";
pub const BAD_VALUE_FILE: &str = "bad_value_rows.csv";

impl<F> RowSet<F> {
    /// Render the set as CSV, header first. `None` when the set is empty.
    pub fn to_csv(&self) -> Result<Option<String>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }

        let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
        writer
            .write_record(&self.columns)
            .map_err(|e| ValidationError::Export(e.to_string()))?;
        for row in &self.rows {
            writer
                .write_record(&row.values)
                .map_err(|e| ValidationError::Export(e.to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ValidationError::Export(e.to_string()))?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| ValidationError::Export(e.to_string()))
    }

    /// Write the CSV rendering to `path`. An empty set leaves no file at
    /// `path`, removing one left by an earlier run. Returns whether a file
    /// was written.
    pub fn write_csv(&self, path: &Path) -> Result<bool, ValidationError> {
        match self.to_csv()? {
            Some(csv) => {
                std::fs::write(path, csv).map_err(|e| {
                    ValidationError::Io(format!("cannot write {}: {e}", path.display()))
                })?;
                Ok(true)
            }
            None => {
                remove_stale(path)?;
                Ok(false)
            }
        }
    }
}

fn remove_stale(path: &Path) -> Result<(), ValidationError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "removed stale artifact");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ValidationError::Io(format!("cannot remove {}: {e}", path.display()))),
    }
}

impl ValidationResult {
    /// Write one CSV per non-empty row set into `dir` and return the paths
    /// written. Artifacts for empty sets are removed if present. The directory
    /// is created only when there is something to write.
    pub fn write_artifacts(&self, dir: &Path) -> Result<Vec<PathBuf>, ValidationError> {
        let mut written = Vec::new();
        if self.has_findings() {
            std::fs::create_dir_all(dir).map_err(|e| {
                ValidationError::Io(format!("cannot create {}: {e}", dir.display()))
            })?;
        } else if !dir.exists() {
            return Ok(written);
        }

        let path = dir.join(INCONSISTENT_FILE);
        if self.inconsistent.write_csv(&path)? {
            written.push(path);
        }
        let path = dir.join(BAD_VALUE_FILE);
        if self.bad_values.write_csv(&path)? {
            written.push(path);
        }

        for path in &written {
            tracing::info!(path = %path.display(), "wrote artifact");
        }
        Ok(written)
    }

    pub fn to_json_pretty(&self) -> Result<String, ValidationError> {
        serde_json::to_string_pretty(self).map_err(|e| ValidationError::Export(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::validate;
    use crate::roles::ColumnRoleSelection;
    use crate::table::Table;

    use super::*;

    fn run(csv: &str) -> ValidationResult {
        let table = Table::from_csv_str(csv).unwrap();
        validate(&table, &ColumnRoleSelection::new("MFR", "BRAND", "SUB")).unwrap()
    }

    #[test]
    fn empty_set_renders_nothing() {
        let result = run("MFR,BRAND,SUB,ITEM\nA,B,C,D\n");
        assert_eq!(result.inconsistent.to_csv().unwrap(), None);
        assert_eq!(result.bad_values.to_csv().unwrap(), None);
    }

    #[test]
    fn csv_keeps_column_order_and_raw_values() {
        let result = run("mfr,brand,sub,item,note\nAll Other,acme,all other,w,\"x, y\"\n");
        let csv = result.inconsistent.to_csv().unwrap().unwrap();
        assert_eq!(csv, "MFR,BRAND,SUB,ITEM,NOTE\nAll Other,acme,all other,w,\"x, y\"\n");
    }

    #[test]
    fn artifacts_only_for_non_empty_sets() {
        let dir = tempfile::tempdir().unwrap();
        let result = run("MFR,BRAND,SUB,ITEM\nA,TBC,C,D\n");
        let written = result.write_artifacts(dir.path()).unwrap();
        assert_eq!(written, vec![dir.path().join(BAD_VALUE_FILE)]);
        assert!(!dir.path().join(INCONSISTENT_FILE).exists());

        let content = std::fs::read_to_string(dir.path().join(BAD_VALUE_FILE)).unwrap();
        assert_eq!(content, "MFR,BRAND,SUB,ITEM\nA,TBC,C,D\n");
    }

    #[test]
    fn rerun_removes_artifacts_of_emptied_sets() {
        let dir = tempfile::tempdir().unwrap();
        let dirty = run("MFR,BRAND,SUB,ITEM\nALL OTHER,ACME,ALL OTHER,W\nA,TBC,C,D\n");
        assert_eq!(dirty.write_artifacts(dir.path()).unwrap().len(), 2);

        let partly_fixed = run("MFR,BRAND,SUB,ITEM\nALL OTHER,ALL OTHER,ALL OTHER,W\nA,TBC,C,D\n");
        let written = partly_fixed.write_artifacts(dir.path()).unwrap();
        assert_eq!(written, vec![dir.path().join(BAD_VALUE_FILE)]);
        assert!(!dir.path().join(INCONSISTENT_FILE).exists());

        let clean = run("MFR,BRAND,SUB,ITEM\nALL OTHER,ALL OTHER,ALL OTHER,W\n");
        assert!(clean.write_artifacts(dir.path()).unwrap().is_empty());
        assert!(!dir.path().join(INCONSISTENT_FILE).exists());
        assert!(!dir.path().join(BAD_VALUE_FILE).exists());
    }

    #[test]
    fn clean_run_creates_no_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let result = run("MFR,BRAND,SUB,ITEM\nA,B,C,D\n");
        assert!(result.write_artifacts(&out).unwrap().is_empty());
        assert!(!out.exists());
    }

    #[test]
    fn json_report_shape() {
        let result = run("MFR,BRAND,SUB,ITEM\nALL OTHER,ACME,ALL OTHER,W\n");
        let json: serde_json::Value =
            serde_json::from_str(&result.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["summary"]["inconsistent_rows"], 1);
        assert_eq!(json["inconsistent"]["rows"][0]["line"], 2);
        assert_eq!(json["inconsistent"]["rows"][0]["finding"]["sibling"], "brand");
        assert_eq!(json["meta"]["columns"]["brand"], "BRAND");
    }
}
