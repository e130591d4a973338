//! # DrugQry - Drug interaction checker
//!
//! Imports a DrugBank XML export into SQLite and answers one question:
//! which documented interactions exist among a list of drugs.
//!
//! DrugQry provides:
//! - Streaming importer mapping drug records onto two relational tables
//! - SQLite-backed storage
//! - Pairwise interaction query over a list of drug names

pub mod record;
pub mod normalize;
pub mod importer;
pub mod storage;
pub mod query;
pub mod config;
pub mod ui;


// Re-exports for convenient access
pub use record::{Drug, Interaction};
pub use normalize::normalize_name;
pub use importer::{Importer, ImportSummary};
pub use query::{QueryEngine, QueryOutcome};
pub use storage::SqliteStore;

/// Result type alias for DrugQry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for DrugQry operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Table '{0}' already exists; import requires a fresh database")]
    SchemaExists(String),
}
