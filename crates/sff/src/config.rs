use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ValidationError;
use crate::normalize::normalize_column_name;
use crate::roles::{ColumnRoleSelection, Role};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// A saved validation run: which file, which columns, where results go.
#[derive(Debug, Clone, Deserialize)]
pub struct SffConfig {
    pub name: String,
    /// Input CSV, relative to the config file's directory.
    pub file: String,
    pub columns: ColumnRoleSelection,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Directory for result CSVs. Defaults to the config's directory.
    #[serde(default)]
    pub dir: Option<String>,
    /// Path for the JSON report, if one is wanted.
    #[serde(default)]
    pub json: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl SffConfig {
    pub fn from_toml(input: &str) -> Result<Self, ValidationError> {
        let config: SffConfig =
            toml::from_str(input).map_err(|e| ValidationError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that need no data: non-empty paths and three distinct, non-empty
    /// role columns. Column presence is checked later against the table.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.file.trim().is_empty() {
            return Err(ValidationError::ConfigValidation("file must not be empty".into()));
        }

        let mut seen: Vec<(Role, String)> = Vec::with_capacity(3);
        for role in Role::ALL {
            let column = normalize_column_name(self.columns.column(role));
            if column.is_empty() {
                return Err(ValidationError::ConfigValidation(format!(
                    "columns.{role} must not be empty"
                )));
            }
            if let Some((prev, _)) = seen.iter().find(|(_, c)| *c == column) {
                return Err(ValidationError::DuplicateRole {
                    column,
                    first: prev.as_str(),
                    second: role.as_str(),
                });
            }
            seen.push((role, column));
        }

        Ok(())
    }

    /// Input path resolved against `base_dir`.
    pub fn input_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.file)
    }

    pub fn output_dir(&self, base_dir: &Path) -> PathBuf {
        match &self.output.dir {
            Some(dir) => base_dir.join(dir),
            None => base_dir.to_path_buf(),
        }
    }

    pub fn json_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.output.json.as_ref().map(|p| base_dir.join(p))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
