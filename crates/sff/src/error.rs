use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    /// Input has no header row at all.
    #[error("input is empty: no header row found")]
    EmptyInput,
    /// A data line cannot be fitted into the table's columns.
    #[error("line {line}: {message}")]
    Ingestion { line: u64, message: String },
    /// Two header cells collapse to the same name after normalization.
    #[error("columns '{first}' and '{second}' both normalize to '{normalized}'")]
    DuplicateColumn {
        first: String,
        second: String,
        normalized: String,
    },
    /// The same column was picked for more than one role.
    #[error("column '{column}' selected for both {first} and {second}")]
    DuplicateRole {
        column: String,
        first: &'static str,
        second: &'static str,
    },
    /// A selected role column is not in the table.
    #[error("{role} column '{column}' not found in table")]
    MissingColumn { role: &'static str, column: String },
    /// The fixed ITEM column is not in the table.
    #[error("required column 'ITEM' not found (columns: {available})")]
    MissingItemColumn { available: String },
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Config parsed but is not usable.
    #[error("config validation error: {0}")]
    ConfigValidation(String),
    /// CSV rendering failed.
    #[error("CSV write error: {0}")]
    Export(String),
    /// IO error (file read, etc.).
    #[error("IO error: {0}")]
    Io(String),
}

impl ValidationError {
    /// True for errors caused by the data itself rather than by how the run was set up.
    pub fn is_ingestion(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::Ingestion { .. } | Self::Io(_))
    }

    /// True for role, schema and config-file errors.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DuplicateColumn { .. }
                | Self::DuplicateRole { .. }
                | Self::MissingColumn { .. }
                | Self::MissingItemColumn { .. }
                | Self::ConfigParse(_)
                | Self::ConfigValidation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(ValidationError::EmptyInput.is_ingestion());
        assert!(!ValidationError::EmptyInput.is_configuration());

        let err = ValidationError::MissingItemColumn { available: "A, B".into() };
        assert!(err.is_configuration());
        assert!(err.to_string().contains("'ITEM'"));
        assert!(err.to_string().contains("A, B"));

        let err = ValidationError::Export("boom".into());
        assert!(!err.is_ingestion());
        assert!(!err.is_configuration());
    }

    #[test]
    fn duplicate_role_message() {
        let err = ValidationError::DuplicateRole {
            column: "BRAND".into(),
            first: "manufacturer",
            second: "brand",
        };
        assert_eq!(
            err.to_string(),
            "column 'BRAND' selected for both manufacturer and brand"
        );
    }
}
