// CompanyScope - core/aggregate.rs
//
// Summary statistics over the filtered view.
//
// Deduplication by name applies to the company count only. Every other
// figure is computed over all filtered records, duplicates included.
// Order of the input does not change any count or total; it only decides
// the order of the per-industry chart series.

use crate::core::model::{is_unknown_industry, Record};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Employees summed for one raw industry value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndustryTotal {
    /// Industry exactly as it appears in the records (not trimmed or folded;
    /// "n/a" and the empty string are their own buckets).
    pub industry: String,
    pub employees: u64,
}

/// Figures shown on the stat cards and the industry chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsBundle {
    /// Records remaining after name-based deduplication.
    pub unique_company_count: usize,

    /// Sum of employees over every filtered record.
    pub total_employees: u64,

    /// Distinct non-empty countries, compared trimmed and case-folded.
    pub unique_country_count: usize,

    /// Distinct non-empty industries, compared trimmed and case-folded,
    /// excluding the "n/a" sentinel.
    pub unique_industry_count: usize,

    /// Chart series, in order of first appearance.
    pub employees_per_industry: Vec<IndustryTotal>,
}

impl StatsBundle {
    /// Employee total for a raw industry value, if it appears in the view.
    pub fn employees_for(&self, industry: &str) -> Option<u64> {
        self.employees_per_industry
            .iter()
            .find(|total| total.industry == industry)
            .map(|total| total.employees)
    }
}

/// Keep the first record for each trimmed, case-folded name.
pub fn dedupe_by_name<'a, I>(records: I) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.dedup_key()))
        .collect()
}

/// Compute the stats bundle for the filtered records.
pub fn aggregate<'a, I>(records: I) -> StatsBundle
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut company_keys: HashSet<String> = HashSet::new();
    let mut countries: HashSet<String> = HashSet::new();
    let mut industries: HashSet<String> = HashSet::new();
    let mut total_employees: u64 = 0;

    let mut per_industry: Vec<IndustryTotal> = Vec::new();
    let mut bucket_index: HashMap<&'a str, usize> = HashMap::new();

    for record in records {
        company_keys.insert(record.dedup_key());
        total_employees = total_employees.saturating_add(record.number_of_employees);

        let country = record.country.trim().to_lowercase();
        if !country.is_empty() {
            countries.insert(country);
        }

        let industry = record.industry.trim().to_lowercase();
        if !industry.is_empty() && !is_unknown_industry(&industry) {
            industries.insert(industry);
        }

        match bucket_index.get(record.industry.as_str()) {
            Some(&idx) => {
                let bucket = &mut per_industry[idx];
                bucket.employees = bucket.employees.saturating_add(record.number_of_employees);
            }
            None => {
                bucket_index.insert(record.industry.as_str(), per_industry.len());
                per_industry.push(IndustryTotal {
                    industry: record.industry.clone(),
                    employees: record.number_of_employees,
                });
            }
        }
    }

    StatsBundle {
        unique_company_count: company_keys.len(),
        total_employees,
        unique_country_count: countries.len(),
        unique_industry_count: industries.len(),
        employees_per_industry: per_industry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_names_counted_once_but_employees_summed() {
        let records = vec![
            Record::new("Acme", "USA", "Tech", 100),
            Record::new(" acme ", "USA", "Tech", 50),
            Record::new("Other", "UK", "Finance", 7),
        ];
        let stats = aggregate(&records);
        assert_eq!(stats.unique_company_count, 2);
        assert_eq!(stats.total_employees, 157);
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let records = vec![
            Record::new("Acme", "USA", "Tech", 100),
            Record::new("Other", "UK", "Finance", 7),
            Record::new("ACME", "UK", "Tech", 50),
        ];
        let unique = dedupe_by_name(&records);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].number_of_employees, 100);
        assert_eq!(unique[1].name, "Other");
    }

    #[test]
    fn test_industry_count_excludes_sentinel() {
        let records: Vec<Record> = ["Tech", "n/a", "N/A", "Finance"]
            .iter()
            .enumerate()
            .map(|(i, ind)| Record::new(&format!("C{i}"), "USA", ind, 1))
            .collect();
        let stats = aggregate(&records);
        assert_eq!(stats.unique_industry_count, 2);
    }

    #[test]
    fn test_country_count_trims_and_folds() {
        let records = vec![
            Record::new("A", "USA", "Tech", 1),
            Record::new("B", " usa ", "Tech", 1),
            Record::new("C", "", "Tech", 1),
            Record::new("D", "   ", "Tech", 1),
            Record::new("E", "UK", "Tech", 1),
        ];
        let stats = aggregate(&records);
        assert_eq!(stats.unique_country_count, 2);
    }

    #[test]
    fn test_per_industry_uses_raw_keys_in_first_seen_order() {
        let records = vec![
            Record::new("A", "USA", "Tech", 10),
            Record::new("B", "USA", "n/a", 5),
            Record::new("C", "USA", "tech", 3),
            Record::new("D", "USA", "Tech", 2),
            Record::new("E", "USA", "", 4),
        ];
        let stats = aggregate(&records);
        let keys: Vec<&str> = stats
            .employees_per_industry
            .iter()
            .map(|t| t.industry.as_str())
            .collect();
        assert_eq!(keys, vec!["Tech", "n/a", "tech", ""]);
        assert_eq!(stats.employees_for("Tech"), Some(12));
        assert_eq!(stats.employees_for("n/a"), Some(5));
        assert_eq!(stats.employees_for(""), Some(4));
        assert_eq!(stats.employees_for("Retail"), None);
        // Normalised count folds "Tech"/"tech" and drops "n/a" and "".
        assert_eq!(stats.unique_industry_count, 1);
    }

    #[test]
    fn test_order_does_not_change_figures() {
        let records = vec![
            Record::new("A", "USA", "Tech", 10),
            Record::new("B", "UK", "Finance", 5),
            Record::new("a", "DE", "Tech", 3),
        ];
        let forward = aggregate(&records);
        let backward = aggregate(records.iter().rev());
        assert_eq!(forward.unique_company_count, backward.unique_company_count);
        assert_eq!(forward.total_employees, backward.total_employees);
        assert_eq!(forward.unique_country_count, backward.unique_country_count);
        assert_eq!(backward.employees_for("Tech"), Some(13));
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let stats = aggregate(&Vec::<Record>::new());
        assert_eq!(stats, StatsBundle::default());
    }
}
