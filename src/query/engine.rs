//! Query engine implementation
//!
//! Validates the requested names, then walks them in a triangular sweep:
//! each drug is checked only against the drugs listed after it. Interactions
//! recorded in both directions are therefore reported once, while one
//! recorded solely as "later drug interacts with earlier drug" is not seen.

use serde::Serialize;
use crate::Result;
use crate::normalize::parse_drug_list;
use crate::record::Interaction;
use crate::storage::SqliteStore;
use super::report;

/// Result of an interaction query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryOutcome {
    /// All matched interactions in sweep order (possibly none)
    Interactions(Vec<Interaction>),
    /// The first requested name missing from the store
    UnknownDrug(String),
}

impl QueryOutcome {
    /// Text shown to the user: the report, or the unknown-drug message
    pub fn render(&self) -> String {
        match self {
            QueryOutcome::Interactions(interactions) => report::render_report(interactions),
            QueryOutcome::UnknownDrug(name) => report::unknown_drug_message(name),
        }
    }
}

/// Left-side drug paired with every name after it.
///
/// Lists shorter than two names produce no entries.
pub fn sweep(names: &[String]) -> impl Iterator<Item = (&String, &[String])> {
    (0..names.len().saturating_sub(1)).map(move |i| (&names[i], &names[i + 1..]))
}

/// Query engine over a drug store
pub struct QueryEngine<'a> {
    store: &'a SqliteStore,
}

impl<'a> QueryEngine<'a> {
    /// Create a new query engine
    pub fn new(store: &'a SqliteStore) -> Self {
        Self { store }
    }

    /// First name without exactly one matching drug row, if any
    pub fn first_unknown(&self, names: &[String]) -> Result<Option<String>> {
        for name in names {
            if !self.store.drug_exists(name)? {
                return Ok(Some(name.clone()));
            }
        }
        Ok(None)
    }

    /// Check already-normalized names for pairwise interactions
    pub fn check(&self, names: &[String]) -> Result<QueryOutcome> {
        if let Some(unknown) = self.first_unknown(names)? {
            tracing::debug!("Unknown drug: {}", unknown);
            return Ok(QueryOutcome::UnknownDrug(unknown));
        }

        let mut interactions = Vec::new();
        for (left, rest) in sweep(names) {
            let found = self.store.find_interactions(left, rest)?;
            tracing::debug!("{} against {} later drugs: {} matches", left, rest.len(), found.len());
            interactions.extend(found);
        }

        Ok(QueryOutcome::Interactions(interactions))
    }

    /// Split, normalize and check a comma-separated list
    pub fn check_list(&self, list: &str) -> Result<QueryOutcome> {
        let names = parse_drug_list(list);
        self.check(&names)
    }

    /// Rendered text for a comma-separated list
    pub fn run(&self, list: &str) -> Result<String> {
        Ok(self.check_list(list)?.render())
    }
}
