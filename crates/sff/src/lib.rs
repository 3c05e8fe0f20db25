//! `sffcheck` — Rule engine for product-hierarchy (SFF) reference data.
//!
//! Pure engine crate: receives a parsed table and a column role selection,
//! returns the rows that break the consistency rule and the rows holding
//! bad-value tokens. No CLI dependencies.

pub mod config;
pub mod consistency;
pub mod engine;
pub mod error;
pub mod export;
pub mod model;
pub mod normalize;
pub mod roles;
pub mod sentinel;
pub mod table;

pub use config::SffConfig;
pub use engine::validate;
pub use error::ValidationError;
pub use model::{BadValue, BadValueToken, Inconsistency, RowSet, SpecialValue, ValidationResult};
pub use roles::{ColumnRoleSelection, Role};
pub use table::{Row, Table};
