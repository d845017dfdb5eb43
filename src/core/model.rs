// CompanyScope - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants::{SEARCH_FIELD_INDENT, UNKNOWN_INDUSTRY};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

// =============================================================================
// Record
// =============================================================================

/// One company entry as delivered by the data source.
///
/// This is the core data unit that flows through filtering, sorting,
/// pagination, aggregation and export. Records are never mutated once the
/// store is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Company name. Trimmed and case-folded it is the dedup key for the
    /// unique-company statistic.
    pub name: String,

    /// Country. Missing or `null` in the payload becomes the empty string.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub country: String,

    /// Industry. May be empty or the "n/a" sentinel.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub industry: String,

    /// Head count.
    pub number_of_employees: u64,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Record {
    /// Convenience constructor, mostly for tests and fixtures.
    pub fn new(name: &str, country: &str, industry: &str, number_of_employees: u64) -> Self {
        Self {
            name: name.to_string(),
            country: country.to_string(),
            industry: industry.to_string(),
            number_of_employees,
        }
    }

    /// Lowercased text matched by the free-text search.
    ///
    /// Every field sits on its own line behind the same indentation, so a
    /// term with leading whitespace (" acme") still matches the start of a
    /// field and a whitespace-only term matches every record.
    pub fn search_text(&self) -> String {
        let indent = SEARCH_FIELD_INDENT;
        format!(
            "\n{indent}{}\n{indent}{}\n{indent}{}\n{indent}{}\n    ",
            self.name, self.country, self.industry, self.number_of_employees
        )
        .to_lowercase()
    }

    /// Trimmed, case-folded name.
    pub fn dedup_key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

/// Returns true if `industry` is the "unknown" sentinel (any case, any
/// surrounding whitespace).
pub fn is_unknown_industry(industry: &str) -> bool {
    industry.trim().eq_ignore_ascii_case(UNKNOWN_INDUSTRY)
}

// =============================================================================
// Record Store
// =============================================================================

/// The fetched record collection. Set once per fetch; a fresh fetch builds
/// a new store rather than mutating this one.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// A store with no records (the state after a failed fetch).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct country and industry values available for selection.
    pub fn facets(&self) -> Facets {
        Facets {
            countries: distinct_sorted(self.records.iter().map(|r| r.country.as_str())),
            industries: distinct_sorted(self.records.iter().map(|r| r.industry.as_str())),
        }
    }
}

// =============================================================================
// Facets
// =============================================================================

/// Selectable filter values, one list per filter dimension.
///
/// Values are the raw strings from the records (no trimming or folding), so
/// a selection made from these lists matches records exactly. The empty
/// value is listed too when a record has it, so every selection the
/// dashboard can hold survives a round trip through the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub countries: Vec<String>,
    pub industries: Vec<String>,
}

impl Facets {
    pub fn has_country(&self, country: &str) -> bool {
        self.countries.iter().any(|c| c == country)
    }

    pub fn has_industry(&self, industry: &str) -> bool {
        self.industries.iter().any(|i| i == industry)
    }
}

/// Collect distinct values, ordered case-insensitively with the raw string
/// as tie-break so the order is total.
fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let unique: HashSet<&str> = values.collect();
    let mut sorted: Vec<String> = unique.into_iter().map(str::to_string).collect();
    sorted.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    sorted
}
