//! Consistency rule: placeholder labels must be applied across the whole
//! manufacturer / brand / subbrand hierarchy of a row.

use crate::model::{FlaggedRow, Inconsistency, SpecialValue};
use crate::normalize::{is_blank, normalize_value};
use crate::roles::{ResolvedRoles, Role};
use crate::table::{Row, Table};

/// Suffix marking a value that was redacted on purpose.
pub const MASKED_SUFFIX: &str = " MASKED";

/// `value` agrees with `special` if it is the same label or a masked value.
pub fn is_valid_for(value: &str, special: SpecialValue) -> bool {
    value == special.as_str() || value.ends_with(MASKED_SUFFIX)
}

/// Normalized manufacturer / brand / subbrand of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleValues {
    values: [String; 3],
}

impl RoleValues {
    pub fn new(manufacturer: &str, brand: &str, subbrand: &str) -> Self {
        Self {
            values: [
                normalize_value(manufacturer),
                normalize_value(brand),
                normalize_value(subbrand),
            ],
        }
    }

    pub fn from_row(row: &Row, roles: &ResolvedRoles) -> Self {
        Self::new(
            row.get(roles.index(Role::Manufacturer)),
            row.get(roles.index(Role::Brand)),
            row.get(roles.index(Role::Subbrand)),
        )
    }

    pub fn get(&self, role: Role) -> &str {
        match role {
            Role::Manufacturer => &self.values[0],
            Role::Brand => &self.values[1],
            Role::Subbrand => &self.values[2],
        }
    }
}

/// Evaluate the rule on one row's role values.
///
/// Checks run special value first, then role, in declaration order; the first
/// failing check is returned.
pub fn check(values: &RoleValues) -> Option<Inconsistency> {
    for special in SpecialValue::ALL {
        for role in Role::ALL {
            if values.get(role) != special.as_str() {
                continue;
            }
            let failing = role
                .siblings()
                .into_iter()
                .find(|sibling| !is_valid_for(values.get(*sibling), special));
            if let Some(sibling) = failing {
                return Some(Inconsistency {
                    special_value: special,
                    role,
                    sibling,
                    sibling_value: values.get(sibling).to_string(),
                });
            }
        }
    }
    None
}

/// True if the row has a real item and so is subject to the rule.
pub fn has_item(row: &Row, roles: &ResolvedRoles) -> bool {
    !is_blank(row.get(roles.item))
}

/// Apply the rule to every row with a non-blank item.
///
/// Returns the number of eligible rows and the inconsistent ones in table order.
pub fn find_inconsistent(
    table: &Table,
    roles: &ResolvedRoles,
) -> (usize, Vec<FlaggedRow<Inconsistency>>) {
    let mut eligible = 0;
    let mut flagged = Vec::new();

    for (index, row) in table.rows().iter().enumerate() {
        if !has_item(row, roles) {
            continue;
        }
        eligible += 1;

        if let Some(finding) = check(&RoleValues::from_row(row, roles)) {
            tracing::debug!(line = row.line, %finding, "inconsistent row");
            flagged.push(FlaggedRow {
                index,
                line: row.line,
                values: row.values.clone(),
                finding,
            });
        }
    }

    (eligible, flagged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check3(m: &str, b: &str, s: &str) -> Option<Inconsistency> {
        check(&RoleValues::new(m, b, s))
    }

    #[test]
    fn valid_for() {
        assert!(is_valid_for("ALL OTHER", SpecialValue::AllOther));
        assert!(is_valid_for("ALL OTHER MASKED", SpecialValue::AllOther));
        assert!(is_valid_for("ACME MASKED", SpecialValue::AllOther));
        assert!(!is_valid_for("MASKED", SpecialValue::AllOther));
        assert!(!is_valid_for("ACME", SpecialValue::AllOther));
        assert!(!is_valid_for("PRIVATE LABEL", SpecialValue::AllOther));
    }

    #[test]
    fn all_special_is_consistent() {
        assert_eq!(check3("ALL OTHER", "ALL OTHER", "ALL OTHER"), None);
        assert_eq!(check3("private label", " Private Label ", "PRIVATE LABEL"), None);
    }

    #[test]
    fn masked_siblings_are_consistent() {
        assert_eq!(check3("ALL OTHER", "ALL OTHER MASKED", "ALL OTHER"), None);
        assert_eq!(check3("PRIVATE LABEL", "PRIVATE LABEL MASKED", "PRIVATE LABEL"), None);
    }

    #[test]
    fn no_special_value_is_consistent() {
        assert_eq!(check3("ACME", "WIDGETCO", "GIZMO"), None);
        assert_eq!(check3("", "", ""), None);
    }

    #[test]
    fn special_manufacturer_with_real_brand() {
        let finding = check3("ALL OTHER", "SOME REAL BRAND", "ALL OTHER").unwrap();
        assert_eq!(finding.special_value, SpecialValue::AllOther);
        assert_eq!(finding.role, Role::Manufacturer);
        assert_eq!(finding.sibling, Role::Brand);
        assert_eq!(finding.sibling_value, "SOME REAL BRAND");
    }

    #[test]
    fn each_role_can_trigger() {
        let f = check3("ACME", "ALL OTHER", "ALL OTHER").unwrap();
        assert_eq!((f.role, f.sibling), (Role::Brand, Role::Manufacturer));

        let f = check3("ACME", "ACME", "PRIVATE LABEL").unwrap();
        assert_eq!((f.role, f.sibling), (Role::Subbrand, Role::Manufacturer));

        let f = check3("PRIVATE LABEL", "PRIVATE LABEL", "X").unwrap();
        assert_eq!((f.role, f.sibling), (Role::Manufacturer, Role::Subbrand));
    }

    #[test]
    fn mixed_special_values_conflict() {
        let f = check3("ALL OTHER", "PRIVATE LABEL", "ALL OTHER").unwrap();
        assert_eq!(f.special_value, SpecialValue::AllOther);
        assert_eq!(f.sibling_value, "PRIVATE LABEL");
    }

    #[test]
    fn masked_holder_does_not_trigger() {
        // Only an exact special value in a role arms the rule.
        assert_eq!(check3("ALL OTHER MASKED", "ACME", "GIZMO"), None);
    }

    #[test]
    fn item_filter_and_population() {
        let table = Table::from_csv_str(
            "MANUFACTURER,BRAND,SUBBRAND,ITEM\n\
             ALL OTHER,ACME,ALL OTHER,WIDGET\n\
             ALL OTHER,ACME,ALL OTHER,\n\
             ALL OTHER,ACME,ALL OTHER,nan\n\
             ALL OTHER,ACME,ALL OTHER,  \n",
        )
        .unwrap();
        let roles = ResolvedRoles { manufacturer: 0, brand: 1, subbrand: 2, item: 3 };
        let (eligible, flagged) = find_inconsistent(&table, &roles);
        assert_eq!(eligible, 1);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].index, 0);
        assert_eq!(flagged[0].line, 2);
        assert_eq!(flagged[0].values[1], "ACME");
    }

    #[test]
    fn upper_case_null_words_are_real_items() {
        let table = Table::from_csv_str(
            "MANUFACTURER,BRAND,SUBBRAND,ITEM\n\
             ALL OTHER,ACME,ALL OTHER,None\n\
             ALL OTHER,ACME,ALL OTHER,NONE\n\
             ALL OTHER,ACME,ALL OTHER,Null\n",
        )
        .unwrap();
        let roles = ResolvedRoles { manufacturer: 0, brand: 1, subbrand: 2, item: 3 };
        let (eligible, flagged) = find_inconsistent(&table, &roles);
        assert_eq!(eligible, 2);
        let indices: Vec<usize> = flagged.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![1, 2]);
    }
}
