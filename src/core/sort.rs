// CompanyScope - core/sort.rs
//
// Column sort for the filtered view.
// Core layer: pure logic, operates on record indices.

use crate::core::model::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sortable record columns. Identifiers match the JSON field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Name,
    Country,
    Industry,
    NumberOfEmployees,
}

impl SortKey {
    /// Returns all variants in column order.
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::Name,
            SortKey::Country,
            SortKey::Industry,
            SortKey::NumberOfEmployees,
        ]
    }

    /// Column identifier, as used by table headers.
    pub fn id(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Country => "country",
            SortKey::Industry => "industry",
            SortKey::NumberOfEmployees => "numberOfEmployees",
        }
    }

    /// Compare two records on this column using the field's natural order.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Country => a.country.cmp(&b.country),
            SortKey::Industry => a.industry.cmp(&b.industry),
            SortKey::NumberOfEmployees => a.number_of_employees.cmp(&b.number_of_employees),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::all()
            .iter()
            .copied()
            .find(|key| key.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("unknown sort column '{s}' (expected name, country, industry or numberOfEmployees)")
            })
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{other}' (expected asc or desc)")),
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Comparison outcome for two records, reversed for descending order.
    ///
    /// Equal keys always compare `Equal` in both directions, which keeps the
    /// stable sort from reordering them.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ordering = self.key.compare(a, b);
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Stable-sort `indices` (into `records`) by `sort`. `None` leaves them as-is.
pub fn sort_indices(records: &[Record], indices: &mut [usize], sort: Option<SortSpec>) {
    let Some(spec) = sort else {
        return;
    };
    indices.sort_by(|&a, &b| spec.compare(&records[a], &records[b]));
}
