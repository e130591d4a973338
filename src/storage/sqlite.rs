//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params, params_from_iter};
use crate::{Result, Error};
use crate::record::{Drug, Interaction};
use super::schema;

/// SQLite-backed storage for drugs and their interactions
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file for writing (creates if doesn't exist)
    ///
    /// The schema is not created here; call [`SqliteStore::create_schema`].
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an existing database file for queries only
    pub fn open_read_only(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create both tables, failing if either already exists.
    ///
    /// Existence is checked for every table before anything is created, so a
    /// populated store is left untouched.
    pub fn create_schema(&self) -> Result<()> {
        let statements = schema::all_schema_statements();
        for (table, _) in &statements {
            if self.table_exists(table)? {
                return Err(Error::SchemaExists(table.to_string()));
            }
        }
        for (table, stmt) in &statements {
            self.conn.execute(stmt, [])?;
            tracing::debug!("Created table {}", table);
        }
        Ok(())
    }

    /// Check whether a table is present
    pub fn table_exists(&self, table: &str) -> Result<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    // ========== Drug Operations ==========

    /// Insert a drug row. Runs in autocommit mode, so the row is durable on return.
    pub fn insert_drug(&self, drug: &Drug) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO drugs (name, mechanism, indication, half_life, pharmacodynamics)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                drug.name,
                drug.mechanism,
                drug.indication,
                drug.half_life,
                drug.pharmacodynamics,
            ],
        )?;
        Ok(())
    }

    /// True when exactly one drug row carries this name
    pub fn drug_exists(&self, name: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM drugs WHERE name = ?1",
            [name],
            |row| row.get(0),
        )?;
        Ok(count == 1)
    }

    /// Get a drug by name, without its interactions
    pub fn get_drug(&self, name: &str) -> Result<Option<Drug>> {
        self.conn
            .query_row(
                "SELECT name, mechanism, indication, half_life, pharmacodynamics FROM drugs WHERE name = ?1",
                [name],
                |row| {
                    Ok(Drug {
                        name: row.get(0)?,
                        mechanism: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                        indication: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                        half_life: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                        pharmacodynamics: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                        interactions: Vec::new(),
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// Count all drugs
    pub fn count_drugs(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM drugs", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Interaction Operations ==========

    /// Insert an interaction row. Duplicates are accepted as-is.
    pub fn insert_interaction(&self, interaction: &Interaction) -> Result<()> {
        self.conn.execute(
            "INSERT INTO interactions (drug_name, interacts_with, description) VALUES (?1, ?2, ?3)",
            params![
                interaction.drug_name,
                interaction.interacts_with,
                interaction.description,
            ],
        )?;
        Ok(())
    }

    /// Interactions recorded for `drug_name` whose counterpart is any of `targets`.
    ///
    /// Rows come back in table order; no sorting is applied.
    pub fn find_interactions(&self, drug_name: &str, targets: &[String]) -> Result<Vec<Interaction>> {
        if targets.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT drug_name, interacts_with, description FROM interactions \
             WHERE drug_name = ?1 AND interacts_with IN ({})",
            schema::placeholders(2, targets.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let values = std::iter::once(drug_name).chain(targets.iter().map(String::as_str));
        let interactions = stmt
            .query_map(params_from_iter(values), |row| self.row_to_interaction(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(interactions)
    }

    /// All interactions owned by one drug
    pub fn get_interactions_of(&self, drug_name: &str) -> Result<Vec<Interaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT drug_name, interacts_with, description FROM interactions WHERE drug_name = ?1",
        )?;

        let interactions = stmt
            .query_map([drug_name], |row| self.row_to_interaction(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(interactions)
    }

    /// Count all interactions
    pub fn count_interactions(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM interactions", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Helper to convert a row to an Interaction
    fn row_to_interaction(&self, row: &rusqlite::Row) -> rusqlite::Result<Interaction> {
        Ok(Interaction {
            drug_name: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
            interacts_with: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        })
    }

    // ========== Statistics ==========

    /// Row counts for both tables
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            drugs: self.count_drugs()?,
            interactions: self.count_interactions()?,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbStats {
    pub drugs: usize,
    pub interactions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.create_schema().unwrap();
        store
    }

    #[test]
    fn test_create_schema_twice_fails() {
        let store = fresh_store();
        match store.create_schema() {
            Err(Error::SchemaExists(table)) => assert_eq!(table, "drugs"),
            other => panic!("expected SchemaExists, got {:?}", other),
        }
    }

    #[test]
    fn test_drug_crud() {
        let store = fresh_store();
        let drug = Drug::new("Aspirin")
            .with_mechanism("COX inhibitor")
            .with_indication("Pain");
        store.insert_drug(&drug).unwrap();

        let retrieved = store.get_drug("Aspirin").unwrap().unwrap();
        assert_eq!(retrieved.mechanism, "COX inhibitor");
        assert_eq!(retrieved.indication, "Pain");
        assert_eq!(retrieved.half_life, "");
        assert!(store.get_drug("aspirin").unwrap().is_none());
        assert!(store.drug_exists("Aspirin").unwrap());
        assert!(!store.drug_exists("Warfarin").unwrap());
    }

    #[test]
    fn test_duplicate_drug_rejected() {
        let store = fresh_store();
        store.insert_drug(&Drug::new("Aspirin")).unwrap();
        assert!(matches!(store.insert_drug(&Drug::new("Aspirin")), Err(Error::Storage(_))));
        assert_eq!(store.count_drugs().unwrap(), 1);
    }

    #[test]
    fn test_find_interactions_filters_targets() {
        let store = fresh_store();
        store.insert_interaction(&Interaction::new("Aspirin", "Warfarin", "Bleeding")).unwrap();
        store.insert_interaction(&Interaction::new("Aspirin", "Ibuprofen", "GI upset")).unwrap();
        store.insert_interaction(&Interaction::new("Aspirin", "Lithium", "Toxicity")).unwrap();
        store.insert_interaction(&Interaction::new("Warfarin", "Aspirin", "Bleeding")).unwrap();

        let targets = vec!["Warfarin".to_string(), "Lithium".to_string()];
        let found = store.find_interactions("Aspirin", &targets).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].interacts_with, "Warfarin");
        assert_eq!(found[1].interacts_with, "Lithium");

        assert!(store.find_interactions("Aspirin", &[]).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_interactions_kept() {
        let store = fresh_store();
        let interaction = Interaction::new("Aspirin", "Warfarin", "Bleeding");
        store.insert_interaction(&interaction).unwrap();
        store.insert_interaction(&interaction).unwrap();

        assert_eq!(store.get_interactions_of("Aspirin").unwrap().len(), 2);
        let stats = store.stats().unwrap();
        assert_eq!(stats.interactions, 2);
        assert_eq!(stats.drugs, 0);
    }

    #[test]
    fn test_find_interactions_is_parameterized() {
        let store = fresh_store();
        store.insert_interaction(&Interaction::new("Aspirin", "Warfarin", "Bleeding")).unwrap();

        let targets = vec!["x') OR 1=1 --".to_string()];
        assert!(store.find_interactions("Aspirin", &targets).unwrap().is_empty());
    }
}
