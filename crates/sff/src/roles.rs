use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::table::Table;

/// Fixed name of the item column, after normalization.
pub const ITEM_COLUMN: &str = "ITEM";

/// A hierarchy level the consistency rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Manufacturer,
    Brand,
    Subbrand,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Manufacturer, Role::Brand, Role::Subbrand];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manufacturer => "manufacturer",
            Self::Brand => "brand",
            Self::Subbrand => "subbrand",
        }
    }

    /// The two other roles, in hierarchy order.
    pub fn siblings(&self) -> [Role; 2] {
        match self {
            Self::Manufacturer => [Role::Brand, Role::Subbrand],
            Self::Brand => [Role::Manufacturer, Role::Subbrand],
            Self::Subbrand => [Role::Manufacturer, Role::Brand],
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which table columns hold manufacturer, brand and subbrand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoleSelection {
    pub manufacturer: String,
    pub brand: String,
    pub subbrand: String,
}

impl ColumnRoleSelection {
    pub fn new(
        manufacturer: impl Into<String>,
        brand: impl Into<String>,
        subbrand: impl Into<String>,
    ) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            brand: brand.into(),
            subbrand: subbrand.into(),
        }
    }

    pub fn column(&self, role: Role) -> &str {
        match role {
            Role::Manufacturer => &self.manufacturer,
            Role::Brand => &self.brand,
            Role::Subbrand => &self.subbrand,
        }
    }

    /// Check the selection against a table and pin each role to a column index.
    ///
    /// Fails if two roles name the same column, a role column is absent, or
    /// the table has no ITEM column.
    pub fn resolve(&self, table: &Table) -> Result<ResolvedRoles, ValidationError> {
        let mut indices = [0usize; 3];
        for (slot, role) in Role::ALL.iter().enumerate() {
            let column = self.column(*role);
            let idx = table
                .column_index(column)
                .ok_or_else(|| ValidationError::MissingColumn {
                    role: role.as_str(),
                    column: column.to_string(),
                })?;
            if let Some(prev) = indices[..slot].iter().position(|&i| i == idx) {
                return Err(ValidationError::DuplicateRole {
                    column: table.columns()[idx].clone(),
                    first: Role::ALL[prev].as_str(),
                    second: role.as_str(),
                });
            }
            indices[slot] = idx;
        }

        let item = table
            .column_index(ITEM_COLUMN)
            .ok_or_else(|| ValidationError::MissingItemColumn {
                available: table.columns().join(", "),
            })?;

        Ok(ResolvedRoles {
            manufacturer: indices[0],
            brand: indices[1],
            subbrand: indices[2],
            item,
        })
    }
}

/// Column indices for each role, valid for the table they were resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRoles {
    pub manufacturer: usize,
    pub brand: usize,
    pub subbrand: usize,
    pub item: usize,
}

impl ResolvedRoles {
    pub fn index(&self, role: Role) -> usize {
        match role {
            Role::Manufacturer => self.manufacturer,
            Role::Brand => self.brand,
            Role::Subbrand => self.subbrand,
        }
    }
}
