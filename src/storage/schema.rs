//! Database schema definitions
//!
//! Tables are created without `IF NOT EXISTS`: import runs once against a
//! fresh database and must fail if the schema is already present.

/// Name of the drugs table
pub const DRUGS_TABLE: &str = "drugs";

/// Name of the interactions table
pub const INTERACTIONS_TABLE: &str = "interactions";

/// SQL to create the drugs table
pub const CREATE_DRUGS_TABLE: &str = r#"
CREATE TABLE drugs (
    name TEXT PRIMARY KEY,
    mechanism TEXT,
    indication TEXT,
    half_life TEXT,
    pharmacodynamics TEXT
)
"#;

/// SQL to create the interactions table
/// No foreign key to drugs: counterpart names are stored as found in the source
pub const CREATE_INTERACTIONS_TABLE: &str = r#"
CREATE TABLE interactions (
    drug_name TEXT,
    interacts_with TEXT,
    description TEXT
)
"#;

/// All schema creation statements, paired with the table they create
pub fn all_schema_statements() -> [(&'static str, &'static str); 2] {
    [
        (DRUGS_TABLE, CREATE_DRUGS_TABLE),
        (INTERACTIONS_TABLE, CREATE_INTERACTIONS_TABLE),
    ]
}

/// Build `?start, ?start+1, ...` for `count` positional parameters.
///
/// Used for `IN (...)` clauses whose length follows the caller's input.
pub fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}
