//! Record extraction from element trees
//!
//! Tags are mapped onto record fields through fixed tables. Only direct
//! children of a record are consulted, and only tags in the vendor
//! namespace; anything else is ignored.

use crate::record::{Drug, Interaction};
use super::document::Element;

/// Fields of a drug record reachable from a drug element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrugField {
    Name,
    Mechanism,
    Indication,
    HalfLife,
    Pharmacodynamics,
    /// Container of interaction elements
    Interactions,
}

/// Fields of an interaction record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionField {
    InteractsWith,
    Description,
}

pub const DRUG_FIELDS: &[(&str, DrugField)] = &[
    ("name", DrugField::Name),
    ("mechanism", DrugField::Mechanism),
    ("indication", DrugField::Indication),
    ("half-life", DrugField::HalfLife),
    ("pharmacodynamics", DrugField::Pharmacodynamics),
    ("drug-interactions", DrugField::Interactions),
];

pub const INTERACTION_FIELDS: &[(&str, InteractionField)] = &[
    ("name", InteractionField::InteractsWith),
    ("description", InteractionField::Description),
];

fn lookup<F: Copy>(table: &[(&str, F)], element: &Element) -> Option<F> {
    if !element.in_namespace {
        return None;
    }
    table
        .iter()
        .find(|(tag, _)| *tag == element.local_name)
        .map(|(_, field)| *field)
}

/// Build a drug from its element. Interactions are stamped with the drug's name.
pub fn drug_from_element(element: &Element) -> Drug {
    let mut drug = Drug::default();

    for child in &element.children {
        match lookup(DRUG_FIELDS, child) {
            Some(DrugField::Name) => drug.name.clone_from(&child.text),
            Some(DrugField::Mechanism) => drug.mechanism.clone_from(&child.text),
            Some(DrugField::Indication) => drug.indication.clone_from(&child.text),
            Some(DrugField::HalfLife) => drug.half_life.clone_from(&child.text),
            Some(DrugField::Pharmacodynamics) => drug.pharmacodynamics.clone_from(&child.text),
            Some(DrugField::Interactions) => {
                drug.interactions
                    .extend(child.children.iter().map(interaction_from_element));
            }
            None => {}
        }
    }

    drug.stamp_interactions();
    drug
}

/// Build an interaction from its element.
///
/// A childless element is read as a single bare field, so a `name` or
/// `description` appearing without a wrapper still yields a record.
pub fn interaction_from_element(element: &Element) -> Interaction {
    let mut interaction = Interaction::default();

    if element.is_leaf() {
        apply_interaction_field(&mut interaction, element);
    } else {
        for child in &element.children {
            apply_interaction_field(&mut interaction, child);
        }
    }

    interaction
}

fn apply_interaction_field(interaction: &mut Interaction, element: &Element) {
    match lookup(INTERACTION_FIELDS, element) {
        Some(InteractionField::InteractsWith) => interaction.interacts_with.clone_from(&element.text),
        Some(InteractionField::Description) => interaction.description.clone_from(&element.text),
        None => {}
    }
}
