//! Record types - the two entities held in the store
//!
//! - `Drug`: one substance and its descriptive metadata
//! - `Interaction`: a directed note that one drug interacts with another

use serde::{Deserialize, Serialize};

/// A drug record.
///
/// Every text field defaults to the empty string; the importer leaves a
/// field empty when the source document does not carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drug {
    /// Primary key in the `drugs` table
    pub name: String,
    pub mechanism: String,
    pub indication: String,
    pub half_life: String,
    pub pharmacodynamics: String,
    /// Interactions owned by this drug, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interactions: Vec<Interaction>,
}

impl Drug {
    /// Create a drug with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder: set the mechanism of action
    pub fn with_mechanism(mut self, mechanism: impl Into<String>) -> Self {
        self.mechanism = mechanism.into();
        self
    }

    /// Builder: set the indication
    pub fn with_indication(mut self, indication: impl Into<String>) -> Self {
        self.indication = indication.into();
        self
    }

    /// Builder: attach an interaction, stamped with this drug's name
    pub fn with_interaction(mut self, interacts_with: impl Into<String>, description: impl Into<String>) -> Self {
        let interaction = Interaction::new(self.name.clone(), interacts_with, description);
        self.interactions.push(interaction);
        self
    }

    /// Stamp every interaction with this drug's name
    pub fn stamp_interactions(&mut self) {
        for interaction in &mut self.interactions {
            interaction.drug_name.clone_from(&self.name);
        }
    }
}

/// A directed interaction edge.
///
/// `interacts_with` holds the counterpart name exactly as it appeared in
/// the source document; it is not normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interaction {
    pub drug_name: String,
    pub interacts_with: String,
    pub description: String,
}

impl Interaction {
    pub fn new(
        drug_name: impl Into<String>,
        interacts_with: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            drug_name: drug_name.into(),
            interacts_with: interacts_with.into(),
            description: description.into(),
        }
    }
}

impl std::fmt::Display for Interaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} interacts with {}", self.drug_name, self.interacts_with)?;
        writeln!(f, "{}", self.description)
    }
}
