//! Contact details for the people named in the rule table.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::{Person, PersonContact, TableError};

use super::rules::all_rules;

const EMBEDDED_CONTACTS: &str = include_str!("../../data/contacts.json");

/// Contact records keyed by display name.
#[derive(Debug, Clone, Default)]
pub struct ContactBook {
    contacts: HashMap<String, PersonContact>,
}

impl ContactBook {
    /// Load the contacts embedded in the binary.
    pub fn embedded() -> Result<Self, TableError> {
        Self::from_json(EMBEDDED_CONTACTS)
    }

    /// Load contacts from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse contacts from JSON: `[{"name": "...", "position": "...", "email": "..."}, ...]`.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let records: Vec<PersonContact> = serde_json::from_str(json)?;
        Self::from_contacts(records)
    }

    /// Build a contact book. Names must be unique.
    pub fn from_contacts(
        records: impl IntoIterator<Item = PersonContact>,
    ) -> Result<Self, TableError> {
        let mut contacts = HashMap::new();
        for record in records {
            let name = record.name.trim().to_string();
            if name.is_empty() {
                return Err(TableError::Invalid("contact without a name".to_string()));
            }
            if contacts.contains_key(&name) {
                return Err(TableError::Invalid(format!("duplicate contact \"{name}\"")));
            }
            contacts.insert(name, record);
        }
        Ok(Self { contacts })
    }

    /// Contact record for a person.
    pub fn contact(&self, person: Person) -> Option<&PersonContact> {
        self.contacts.get(person.name())
    }

    /// Check that every person named by the rule table has a contact.
    pub fn validate_rules(&self) -> Result<(), TableError> {
        for (digit, rule) in all_rules() {
            for person in rule.outcome.persons() {
                if self.contact(*person).is_none() {
                    return Err(TableError::Invalid(format!(
                        "no contact for {person}, needed by postal codes starting with {digit}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Number of contacts.
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether the book is empty.
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}
