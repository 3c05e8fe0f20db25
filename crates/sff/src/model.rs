use serde::Serialize;

use crate::roles::{ColumnRoleSelection, Role};

// ---------------------------------------------------------------------------
// Sentinel vocabularies
// ---------------------------------------------------------------------------

/// Placeholder labels that stand in for "no specific named entity".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SpecialValue {
    #[serde(rename = "ALL OTHER")]
    AllOther,
    #[serde(rename = "PRIVATE LABEL")]
    PrivateLabel,
}

impl SpecialValue {
    /// Evaluation order of the consistency rule.
    pub const ALL: [SpecialValue; 2] = [SpecialValue::AllOther, SpecialValue::PrivateLabel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllOther => "ALL OTHER",
            Self::PrivateLabel => "PRIVATE LABEL",
        }
    }
}

impl std::fmt::Display for SpecialValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tokens left in cells that were never filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BadValueToken {
    #[serde(rename = "TO BE CHECK")]
    ToBeCheck,
    #[serde(rename = "TO BE CHECKED")]
    ToBeChecked,
    #[serde(rename = "BADVALUE")]
    BadValue,
    #[serde(rename = "TBC")]
    Tbc,
}

impl BadValueToken {
    pub const ALL: [BadValueToken; 4] = [
        BadValueToken::ToBeCheck,
        BadValueToken::ToBeChecked,
        BadValueToken::BadValue,
        BadValueToken::Tbc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToBeCheck => "TO BE CHECK",
            Self::ToBeChecked => "TO BE CHECKED",
            Self::BadValue => "BADVALUE",
            Self::Tbc => "TBC",
        }
    }

    /// Exact match against an already-normalized value.
    pub fn from_normalized(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl std::fmt::Display for BadValueToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Findings
// ---------------------------------------------------------------------------

/// Why a row failed the consistency rule: `role` holds `special_value` but
/// `sibling` holds `sibling_value`, which is neither the same label nor masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inconsistency {
    pub special_value: SpecialValue,
    pub role: Role,
    pub sibling: Role,
    pub sibling_value: String,
}

impl std::fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} is '{}' but {} is '{}'",
            self.role, self.special_value, self.sibling, self.sibling_value
        )
    }
}

/// First cell in a row that holds a bad-value token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadValue {
    pub column: String,
    pub token: BadValueToken,
}

impl std::fmt::Display for BadValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} holds '{}'", self.column, self.token)
    }
}

// ---------------------------------------------------------------------------
// Row sets
// ---------------------------------------------------------------------------

/// A table row selected by a rule, with its original cell text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlaggedRow<F> {
    /// 0-based position in the input table.
    pub index: usize,
    /// Source line the row starts on.
    pub line: u64,
    #[serde(skip)]
    pub values: Vec<String>,
    pub finding: F,
}

/// Rows selected by one rule, in input order, plus the column header needed
/// to render them on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowSet<F> {
    #[serde(skip)]
    pub columns: Vec<String>,
    pub rows: Vec<FlaggedRow<F>>,
}

impl<F> RowSet<F> {
    pub fn new(columns: Vec<String>, rows: Vec<FlaggedRow<F>>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn indices(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.index).collect()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.rows.binary_search_by_key(&index, |r| r.index).is_ok()
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub total_rows: usize,
    /// Rows with a non-blank item; the population of the consistency rule.
    pub eligible_rows: usize,
    pub inconsistent_rows: usize,
    pub bad_value_rows: usize,
    /// Rows flagged by both rules.
    pub flagged_by_both: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationMeta {
    pub engine_version: String,
    pub run_at: String,
    pub elapsed_ms: u64,
    pub columns: ColumnRoleSelection,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub meta: ValidationMeta,
    pub summary: ValidationSummary,
    pub inconsistent: RowSet<Inconsistency>,
    pub bad_values: RowSet<BadValue>,
}

impl ValidationResult {
    pub fn has_findings(&self) -> bool {
        !self.inconsistent.is_empty() || !self.bad_values.is_empty()
    }
}
