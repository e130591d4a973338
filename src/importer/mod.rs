//! Importer - DrugBank XML to SQLite
//!
//! Each drug element is mapped to a [`Drug`] and written straight away: the
//! drug row first, then one row per interaction. Every statement commits on
//! its own, so an aborted import keeps everything written before the failure.

pub mod document;
pub mod mapping;

pub use document::{DocumentReader, Element, DRUGBANK_NAMESPACE};

use std::io::BufRead;
use std::path::Path;
use std::time::{Duration, Instant};
use crate::Result;
use crate::record::Drug;
use crate::storage::SqliteStore;

/// Outcome of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    pub drugs: usize,
    pub interactions: usize,
    pub elapsed: Duration,
}

/// Loads a drug dataset into a fresh store
pub struct Importer<'a> {
    store: &'a SqliteStore,
    namespace: String,
}

impl<'a> Importer<'a> {
    pub fn new(store: &'a SqliteStore) -> Self {
        Self {
            store,
            namespace: DRUGBANK_NAMESPACE.to_string(),
        }
    }

    /// Builder: match tags against a different namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Import a document from disk.
    ///
    /// `on_progress` receives the number of drugs imported so far after each drug.
    pub fn import_file(&self, path: &Path, on_progress: impl FnMut(usize)) -> Result<ImportSummary> {
        let reader = DocumentReader::from_path(path, &self.namespace)?;
        tracing::info!("Importing {}", path.display());
        self.import(reader, on_progress)
    }

    /// Import a document held in memory
    pub fn import_str(&self, xml: &str, on_progress: impl FnMut(usize)) -> Result<ImportSummary> {
        self.import(DocumentReader::from_xml(xml, &self.namespace), on_progress)
    }

    fn import<R: BufRead>(
        &self,
        reader: DocumentReader<R>,
        mut on_progress: impl FnMut(usize),
    ) -> Result<ImportSummary> {
        self.store.create_schema()?;

        let started = Instant::now();
        let mut summary = ImportSummary::default();

        for element in reader {
            let drug = mapping::drug_from_element(&element?);
            if drug.name.is_empty() {
                tracing::warn!("Drug record #{} has no name", summary.drugs + 1);
            }

            self.persist(&drug)?;
            summary.drugs += 1;
            summary.interactions += drug.interactions.len();
            on_progress(summary.drugs);
        }

        summary.elapsed = started.elapsed();
        tracing::info!(
            "Imported {} drugs and {} interactions",
            summary.drugs,
            summary.interactions
        );
        Ok(summary)
    }

    /// Write one drug and its interactions, drug row first
    pub fn persist(&self, drug: &Drug) -> Result<()> {
        tracing::debug!("Persisting {} ({} interactions)", drug.name, drug.interactions.len());
        self.store.insert_drug(drug)?;
        for interaction in &drug.interactions {
            self.store.insert_interaction(interaction)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<drugbank xmlns="http://www.drugbank.ca" version="5.1">
  <drug>
    <name>Aspirin</name>
    <mechanism>COX inhibitor</mechanism>
    <drug-interactions>
      <drug-interaction>
        <name>Warfarin</name>
        <description>Increases bleeding risk</description>
      </drug-interaction>
    </drug-interactions>
  </drug>
  <drug>
    <name>Warfarin</name>
    <drug-interactions>
      <drug-interaction>
        <name>Aspirin</name>
        <description>Increases bleeding risk</description>
      </drug-interaction>
    </drug-interactions>
  </drug>
</drugbank>"#;

    #[test]
    fn test_import_populates_both_tables() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut counts = Vec::new();
        let summary = Importer::new(&store)
            .import_str(SAMPLE, |n| counts.push(n))
            .unwrap();

        assert_eq!(summary.drugs, 2);
        assert_eq!(summary.interactions, 2);
        assert_eq!(counts, vec![1, 2]);
        assert_eq!(store.get_drug("Aspirin").unwrap().unwrap().mechanism, "COX inhibitor");
        assert_eq!(store.get_interactions_of("Warfarin").unwrap()[0].interacts_with, "Aspirin");
    }

    #[test]
    fn test_reimport_fails_before_writing() {
        let store = SqliteStore::open_in_memory().unwrap();
        Importer::new(&store).import_str(SAMPLE, |_| {}).unwrap();

        let extra = r#"<drugbank xmlns="http://www.drugbank.ca"><drug><name>Ibuprofen</name></drug></drugbank>"#;
        let result = Importer::new(&store).import_str(extra, |_| {});
        assert!(matches!(result, Err(Error::SchemaExists(_))));
        assert_eq!(store.count_drugs().unwrap(), 2);
        assert!(store.get_drug("Ibuprofen").unwrap().is_none());
    }

    #[test]
    fn test_malformed_document_keeps_committed_rows() {
        let store = SqliteStore::open_in_memory().unwrap();
        let broken = r#"<drugbank xmlns="http://www.drugbank.ca">
            <drug><name>Aspirin</name></drug>
            <drug><name>Warfarin</name></oops>
        </drugbank>"#;

        let result = Importer::new(&store).import_str(broken, |_| {});
        assert!(result.is_err());
        assert_eq!(store.count_drugs().unwrap(), 1);
        assert!(store.drug_exists("Aspirin").unwrap());
    }

    #[test]
    fn test_duplicate_drug_aborts_import() {
        let store = SqliteStore::open_in_memory().unwrap();
        let doubled = r#"<drugbank xmlns="http://www.drugbank.ca">
            <drug><name>Aspirin</name></drug>
            <drug><name>Aspirin</name></drug>
        </drugbank>"#;

        let result = Importer::new(&store).import_str(doubled, |_| {});
        assert!(matches!(result, Err(Error::Storage(_))));
        assert_eq!(store.count_drugs().unwrap(), 1);
    }

    #[test]
    fn test_interaction_names_stored_verbatim() {
        let store = SqliteStore::open_in_memory().unwrap();
        let xml = r#"<drugbank xmlns="http://www.drugbank.ca"><drug>
            <name>ASPIRIN</name>
            <drug-interactions><drug-interaction><name>warfarin</name></drug-interaction></drug-interactions>
        </drug></drugbank>"#;
        Importer::new(&store).import_str(xml, |_| {}).unwrap();

        assert!(store.drug_exists("ASPIRIN").unwrap());
        assert_eq!(store.get_interactions_of("ASPIRIN").unwrap()[0].interacts_with, "warfarin");
    }

    #[test]
    fn test_custom_namespace() {
        let store = SqliteStore::open_in_memory().unwrap();
        let xml = r#"<db xmlns="urn:example:drugs"><drug><name>Aspirin</name></drug></db>"#;
        Importer::new(&store)
            .with_namespace("urn:example:drugs")
            .import_str(xml, |_| {})
            .unwrap();
        assert!(store.drug_exists("Aspirin").unwrap());
    }
}
