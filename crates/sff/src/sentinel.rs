//! Bad-value scan: any cell in any column holding a "to be checked" token.

use crate::model::{BadValue, BadValueToken, FlaggedRow};
use crate::normalize::normalize_value;
use crate::table::{Row, Table};

/// First bad-value cell of a row, in column order.
pub fn scan_row(row: &Row, columns: &[String]) -> Option<BadValue> {
    row.values.iter().enumerate().find_map(|(idx, raw)| {
        BadValueToken::from_normalized(&normalize_value(raw)).map(|token| BadValue {
            column: columns.get(idx).cloned().unwrap_or_default(),
            token,
        })
    })
}

/// Scan every row of the table, blank items included.
pub fn find_bad_values(table: &Table) -> Vec<FlaggedRow<BadValue>> {
    let mut flagged = Vec::new();

    for (index, row) in table.rows().iter().enumerate() {
        if let Some(finding) = scan_row(row, table.columns()) {
            tracing::debug!(line = row.line, %finding, "bad value row");
            flagged.push(FlaggedRow {
                index,
                line: row.line,
                values: row.values.clone(),
                finding,
            });
        }
    }

    flagged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> Table {
        Table::from_csv_str(csv).unwrap()
    }

    #[test]
    fn flags_any_column() {
        let t = table("ITEM,BRAND,NOTES\nA,ACME,\nB,ACME, tbc \nC,ACME,ok\n");
        let flagged = find_bad_values(&t);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].index, 1);
        assert_eq!(flagged[0].finding.column, "NOTES");
        assert_eq!(flagged[0].finding.token, BadValueToken::Tbc);
        assert_eq!(flagged[0].values[2], " tbc ");
    }

    #[test]
    fn blank_item_rows_are_scanned() {
        let t = table("ITEM,BRAND\n,To Be Checked\n");
        assert_eq!(find_bad_values(&t).len(), 1);
    }

    #[test]
    fn tokens_must_match_whole_cell() {
        let t = table("ITEM,BRAND\nTBC123,TO BE CHECKING\nX,BAD VALUE\n");
        assert!(find_bad_values(&t).is_empty());
    }

    #[test]
    fn first_column_wins() {
        let t = table("A,B,C\nx,badvalue,to be check\n");
        let flagged = find_bad_values(&t);
        assert_eq!(flagged[0].finding.column, "B");
        assert_eq!(flagged[0].finding.token, BadValueToken::BadValue);
    }

    #[test]
    fn every_token_is_recognized() {
        for token in BadValueToken::ALL {
            let t = table(&format!("ITEM\n{}\n", token.as_str().to_lowercase()));
            assert_eq!(find_bad_values(&t).len(), 1, "token {token}");
        }
    }
}
