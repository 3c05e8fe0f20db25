//! In-memory rectangular table with normalized column names.

use std::collections::HashMap;
use std::path::Path;

use crate::error::ValidationError;
use crate::normalize::normalize_column_name;

/// One data row. Values are positional against [`Table::columns`] and keep
/// their original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line in the source where this row starts (header is line 1).
    pub line: u64,
    pub values: Vec<String>,
}

impl Row {
    pub fn get(&self, idx: usize) -> &str {
        self.values.get(idx).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table from a header and data rows.
    ///
    /// Header cells are normalized; two cells that collapse to the same name
    /// are rejected. Short rows are padded with empty cells, rows wider than
    /// the header are rejected.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, ValidationError> {
        let with_lines = rows
            .into_iter()
            .enumerate()
            .map(|(i, values)| (i as u64 + 2, values))
            .collect();
        Self::from_lined_rows(headers, with_lines)
    }

    fn from_lined_rows(
        headers: Vec<String>,
        rows: Vec<(u64, Vec<String>)>,
    ) -> Result<Self, ValidationError> {
        if headers.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        let mut seen: HashMap<String, String> = HashMap::new();
        let mut columns = Vec::with_capacity(headers.len());
        for raw in &headers {
            let normalized = normalize_column_name(raw);
            if let Some(first) = seen.get(&normalized) {
                return Err(ValidationError::DuplicateColumn {
                    first: first.clone(),
                    second: raw.clone(),
                    normalized,
                });
            }
            seen.insert(normalized.clone(), raw.clone());
            columns.push(normalized);
        }

        let width = columns.len();
        let mut out = Vec::with_capacity(rows.len());
        for (line, mut values) in rows {
            if values.len() > width {
                return Err(ValidationError::Ingestion {
                    line,
                    message: format!("expected {width} fields, saw {}", values.len()),
                });
            }
            values.resize(width, String::new());
            out.push(Row { line, values });
        }

        Ok(Self { columns, rows: out })
    }

    /// Parse CSV text. The first record is the header.
    pub fn from_csv_str(content: &str) -> Result<Self, ValidationError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ValidationError::Ingestion { line: 1, message: e.to_string() })?
            .iter()
            .map(str::to_string)
            .collect();

        // csv reports a single empty field for an empty document
        if headers.len() <= 1 && headers.first().map_or(true, |h| h.trim().is_empty()) {
            return Err(ValidationError::EmptyInput);
        }

        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result.map_err(|e| ValidationError::Ingestion {
                line: e.position().map_or(i as u64 + 2, |p| p.line()),
                message: e.to_string(),
            })?;
            let line = record.position().map_or(i as u64 + 2, |p| p.line());
            rows.push((line, record.iter().map(str::to_string).collect()));
        }

        tracing::debug!(columns = headers.len(), rows = rows.len(), "parsed CSV");
        Self::from_lined_rows(headers, rows)
    }

    /// Parse CSV bytes, falling back to Windows-1252 when they are not UTF-8.
    pub fn from_csv_bytes(bytes: Vec<u8>) -> Result<Self, ValidationError> {
        let content = match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => {
                let bytes = e.into_bytes();
                tracing::info!("input is not UTF-8, decoding as Windows-1252");
                let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
                decoded.into_owned()
            }
        };
        Self::from_csv_str(&content)
    }

    pub fn from_csv_path(path: &Path) -> Result<Self, ValidationError> {
        let bytes = std::fs::read(path)
            .map_err(|e| ValidationError::Io(format!("cannot read {}: {e}", path.display())))?;
        Self::from_csv_bytes(bytes)
    }

    /// Normalized column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, matching on the normalized form of `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = normalize_column_name(name);
        self.columns.iter().position(|c| *c == wanted)
    }
}
