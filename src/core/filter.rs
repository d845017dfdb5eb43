// CompanyScope - core/filter.rs
//
// Filter engine for company records.
// All active filters are AND-combined.
// Core layer: pure logic, no I/O dependencies.

use crate::core::model::Record;
use serde::Serialize;
use std::collections::BTreeSet;

/// Filter selections and search term. All fields are AND-combined when applied.
///
/// Sets are ordered so that the URL produced from a state is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    /// Countries to include (empty = all). Matched exactly against the raw value.
    pub countries: BTreeSet<String>,

    /// Industries to include (empty = all). Matched exactly against the raw value.
    pub industries: BTreeSet<String>,

    /// Substring text search (case-insensitive). Empty = no filter.
    pub search: String,
}

impl FilterState {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty() && self.industries.is_empty() && self.search.is_empty()
    }
}

/// Apply filters to a slice of records, returning indices of matching records.
///
/// Indices point into the original slice and are in ascending order, so the
/// source order is preserved until the sort engine runs.
pub fn apply_filters(records: &[Record], filter: &FilterState) -> Vec<usize> {
    if filter.is_empty() {
        return (0..records.len()).collect();
    }

    let search_lower = filter.search.to_lowercase();

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_all(record, filter, &search_lower))
        .map(|(idx, _)| idx)
        .collect()
}

/// Check if a single record matches all active filters.
fn matches_all(record: &Record, filter: &FilterState, search_lower: &str) -> bool {
    if !filter.countries.is_empty() && !filter.countries.contains(&record.country) {
        return false;
    }

    if !filter.industries.is_empty() && !filter.industries.contains(&record.industry) {
        return false;
    }

    if !search_lower.is_empty() && !record.search_text().contains(search_lower) {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("Acme Corp", "USA", "Tech", 500),
            Record::new("Globex", "UK", "Finance", 1200),
            Record::new("Initech", "USA", "Finance", 80),
            Record::new("Umbrella", "Germany", "n/a", 3000),
            Record::new("Hooli", "", "", 42),
        ]
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_empty_filter_returns_all_in_order() {
        let records = sample();
        let result = apply_filters(&records, &FilterState::default());
        assert_eq!(result, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_country_filter() {
        let records = sample();
        let filter = FilterState {
            countries: set(&["USA"]),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records, &filter), vec![0, 2]);
    }

    #[test]
    fn test_country_match_is_exact() {
        let records = sample();
        let filter = FilterState {
            countries: set(&["usa"]),
            ..Default::default()
        };
        assert!(apply_filters(&records, &filter).is_empty());
    }

    #[test]
    fn test_country_and_industry_are_and_combined() {
        let records = sample();
        let filter = FilterState {
            countries: set(&["USA", "UK"]),
            industries: set(&["Finance"]),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records, &filter), vec![1, 2]);
    }

    #[test]
    fn test_search_case_insensitive_across_fields() {
        let records = sample();
        let by_name = FilterState {
            search: "GLOBEX".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records, &by_name), vec![1]);

        let by_country = FilterState {
            search: "germ".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records, &by_country), vec![3]);

        let by_count = FilterState {
            search: "120".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records, &by_count), vec![1]);
    }

    #[test]
    fn test_search_with_leading_space_matches_field_start() {
        let records = vec![
            Record::new("Acme Corp", "USA", "Tech", 500),
            Record::new("Globex", "UK", "Finance", 1200),
        ];
        let leading = FilterState {
            search: " acme".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records, &leading), vec![0]);

        let blank = FilterState {
            search: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records, &blank), vec![0, 1]);
    }

    #[test]
    fn test_search_combined_with_selection() {
        let records = sample();
        let filter = FilterState {
            countries: set(&["USA"]),
            search: "init".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records, &filter), vec![2]);
    }

    #[test]
    fn test_empty_country_selectable() {
        let records = sample();
        let filter = FilterState {
            countries: set(&[""]),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records, &filter), vec![4]);
    }

    #[test]
    fn test_empty_store_yields_nothing() {
        let filter = FilterState {
            search: "acme".to_string(),
            ..Default::default()
        };
        assert!(apply_filters(&[], &filter).is_empty());
        assert!(apply_filters(&[], &FilterState::default()).is_empty());
    }
}
