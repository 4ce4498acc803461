//! Sales contacts.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// A person who can be responsible for a postal code region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Person {
    MattiasHerbst,
    AnnaKropfitsch,
    CarmenBergar,
}

impl Person {
    /// Every person referenced by the routing rules.
    pub const ALL: [Person; 3] = [
        Person::MattiasHerbst,
        Person::AnnaKropfitsch,
        Person::CarmenBergar,
    ];

    /// Full display name, also used as the key into the contact table.
    pub fn name(&self) -> &'static str {
        match self {
            Person::MattiasHerbst => "Mattias Herbst",
            Person::AnnaKropfitsch => "Anna Kropfitsch",
            Person::CarmenBergar => "Carmen Bergar",
        }
    }

    /// Look up a person by their exact display name (surrounding whitespace ignored).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Person {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Contact record for a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonContact {
    pub name: String,
    pub position: String,
    pub email: String,
}
