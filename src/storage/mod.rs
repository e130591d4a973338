//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - drugs(name, mechanism, indication, half_life, pharmacodynamics)
//! - interactions(drug_name, interacts_with, description)

pub mod schema;
pub mod sqlite;

pub use sqlite::{SqliteStore, DbStats};
