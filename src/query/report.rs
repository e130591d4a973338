//! Plain-text rendering of query results

use crate::record::Interaction;

/// Two lines per interaction followed by a blank line; empty when there are none
pub fn render_report(interactions: &[Interaction]) -> String {
    interactions
        .iter()
        .map(|interaction| format!("{}\n", interaction))
        .collect()
}

pub fn unknown_drug_message(name: &str) -> String {
    format!("{} is not in database. Remove it/fix spelling and try again.", name)
}
