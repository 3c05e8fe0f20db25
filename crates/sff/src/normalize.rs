//! Canonical forms for column names and cell values.
//!
//! Every rule comparison runs on normalized text: upper-cased with leading and
//! trailing whitespace removed. Raw cell text is never rewritten.

/// Spellings of a missing cell as dataframe tooling reads them from CSV.
/// Case-sensitive: `None` is missing, `NONE` is a real value.
pub const MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Normalized rendering of a missing cell.
const NAN: &str = "NAN";

/// Upper-case and trim a header cell.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Upper-case and trim a cell value.
pub fn normalize_value(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// True if a raw cell stands for "no value": empty, an exact missing-value
/// spelling, or `NAN` in any case.
pub fn is_blank(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || MISSING_TOKENS.contains(&trimmed) || normalize_value(trimmed) == NAN
}
