//! German city reference table.
//!
//! Maps lowercase city names to the postal codes of that city. The first
//! code listed for a city is treated as its representative code; this is
//! a deterministic convention, not a geographic centre.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{Confidence, PostalCode, Resolution, Source, TableError};

/// The table shipped with the binary.
const EMBEDDED_CITIES: &str = include_str!("../../data/cities.json");

/// Spa-town prefix that is often dropped or added by users.
const SPA_PREFIX: &str = "bad ";

/// One record of the JSON table file.
#[derive(Debug, Deserialize)]
struct CityRecord {
    city: String,
    postal_codes: Vec<String>,
}

/// A city and its postal codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityEntry {
    /// Lowercase city name.
    pub name: String,
    /// Postal codes of the city; never empty.
    pub postal_codes: Vec<PostalCode>,
}

impl CityEntry {
    /// The representative postal code (the first one listed).
    pub fn representative_code(&self) -> PostalCode {
        self.postal_codes[0]
    }
}

/// A successful local lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityMatch<'a> {
    pub entry: &'a CityEntry,
    pub confidence: Confidence,
    pub source: Source,
}

impl CityMatch<'_> {
    /// Turn the match into a resolution for the name the user typed.
    pub fn into_resolution(self, extracted: &str) -> Resolution {
        Resolution::found(self.entry.representative_code(), self.confidence, self.source)
            .with_city(extracted)
    }
}

/// Immutable, insertion-ordered city table.
///
/// Order matters: partial matching scans the table front to back and takes
/// the first hit.
#[derive(Debug, Clone)]
pub struct CityTable {
    entries: Vec<CityEntry>,
    index: HashMap<String, usize>,
}

impl CityTable {
    /// Load the table embedded in the binary.
    pub fn embedded() -> Result<Self, TableError> {
        Self::from_json(EMBEDDED_CITIES)
    }

    /// Load a table from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse a table from JSON: `[{"city": "...", "postal_codes": ["..."]}, ...]`.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let records: Vec<CityRecord> = serde_json::from_str(json)?;
        Self::from_entries(records.into_iter().map(|r| (r.city, r.postal_codes)))
    }

    /// Build a table from `(city, postal codes)` pairs.
    ///
    /// Names are trimmed and lowercased. A repeated name keeps the position
    /// and codes of its first occurrence.
    pub fn from_entries<N, C, S>(entries: impl IntoIterator<Item = (N, C)>) -> Result<Self, TableError>
    where
        N: AsRef<str>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };

        for (name, codes) in entries {
            let name = name.as_ref().trim().to_lowercase();
            if name.is_empty() {
                return Err(TableError::Invalid("empty city name".to_string()));
            }

            let postal_codes = codes
                .into_iter()
                .map(|c| {
                    PostalCode::parse(c.as_ref())
                        .map_err(|e| TableError::Invalid(format!("{name}: {e}")))
                })
                .collect::<Result<Vec<_>, _>>()?;

            if postal_codes.is_empty() {
                return Err(TableError::Invalid(format!(
                    "city \"{name}\" has no postal codes"
                )));
            }

            if table.index.contains_key(&name) {
                continue;
            }

            table.index.insert(name.clone(), table.entries.len());
            table.entries.push(CityEntry { name, postal_codes });
        }

        Ok(table)
    }

    /// Exact lookup by lowercase name.
    pub fn get(&self, name: &str) -> Option<&CityEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// First city (in table order) whose name contains `name` or is contained in it.
    pub fn find_containing(&self, name: &str) -> Option<&CityEntry> {
        self.entries
            .iter()
            .find(|e| name.contains(e.name.as_str()) || e.name.contains(name))
    }

    /// Find a city for an extracted name, trying each strategy in turn.
    ///
    /// 1. exact key (high)
    /// 2. containment either way (medium)
    /// 3. part before the first hyphen, exact then containment (medium)
    /// 4. "bad " prefix dropped (medium), or kept as an exact key (high)
    pub fn lookup(&self, name: &str) -> Option<CityMatch<'_>> {
        self.exact_match(name)
            .or_else(|| self.partial_match(name))
            .or_else(|| self.district_match(name))
            .or_else(|| self.spa_prefix_match(name))
    }

    fn exact_match(&self, name: &str) -> Option<CityMatch<'_>> {
        let entry = self.get(name)?;
        Some(CityMatch {
            entry,
            confidence: Confidence::High,
            source: Source::DirectMatch(entry.name.clone()),
        })
    }

    fn partial_match(&self, name: &str) -> Option<CityMatch<'_>> {
        let entry = self.find_containing(name)?;
        Some(CityMatch {
            entry,
            confidence: Confidence::Medium,
            source: Source::PartialMatch(entry.name.clone()),
        })
    }

    fn district_match(&self, name: &str) -> Option<CityMatch<'_>> {
        let (base, _) = name.split_once('-')?;
        let base = base.trim();
        if base.is_empty() {
            return None;
        }
        let entry = self.get(base).or_else(|| self.find_containing(base))?;
        Some(CityMatch {
            entry,
            confidence: Confidence::Medium,
            source: Source::DistrictMatch(entry.name.clone()),
        })
    }

    fn spa_prefix_match(&self, name: &str) -> Option<CityMatch<'_>> {
        let stripped = name.strip_prefix(SPA_PREFIX)?;
        if let Some(entry) = self.get(stripped) {
            return Some(CityMatch {
                entry,
                confidence: Confidence::Medium,
                source: Source::BadPrefix(entry.name.clone()),
            });
        }
        self.exact_match(name)
    }

    /// Iterate over entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &CityEntry> {
        self.entries.iter()
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
