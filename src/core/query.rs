// CompanyScope - core/query.rs
//
// The user's current view parameters and the state transitions the UI can
// request. Every transition reports what it changed so the caller re-runs
// only the affected part of the pipeline.
//
// Invariant: the page is reset to 1 whenever the filter selections or the
// search term change, and only then.

use crate::core::filter::FilterState;
use crate::core::sort::{SortKey, SortOrder, SortSpec};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// What a state transition changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Selections or search term changed: filter, sort, paginate, aggregate.
    Filters,
    /// Sort column or direction changed: sort and paginate.
    Sort,
    /// Page changed: paginate only.
    Page,
    /// Nothing changed.
    None,
}

/// Filter, sort and page selection for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryState {
    pub filters: FilterState,

    /// Active sort. `None` keeps the source order.
    pub sort: Option<SortSpec>,

    /// 1-based page number.
    pub page: usize,

    /// Direction each column header last applied. A header that was never
    /// clicked starts ascending, whatever the active sort is.
    #[serde(skip)]
    header_orders: HashMap<SortKey, SortOrder>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            filters: FilterState::default(),
            sort: Some(SortSpec::default()),
            page: 1,
            header_orders: HashMap::new(),
        }
    }
}

impl QueryState {
    /// Start from the given sort with no filters on page 1.
    pub fn with_sort(sort: Option<SortSpec>) -> Self {
        Self {
            sort,
            ..Default::default()
        }
    }

    fn filters_changed(&mut self) -> Change {
        self.page = 1;
        Change::Filters
    }

    pub fn set_countries(&mut self, countries: BTreeSet<String>) -> Change {
        if self.filters.countries == countries {
            return Change::None;
        }
        self.filters.countries = countries;
        self.filters_changed()
    }

    pub fn set_industries(&mut self, industries: BTreeSet<String>) -> Change {
        if self.filters.industries == industries {
            return Change::None;
        }
        self.filters.industries = industries;
        self.filters_changed()
    }

    /// Flip a single country checkbox.
    pub fn toggle_country(&mut self, country: &str) -> Change {
        if !self.filters.countries.remove(country) {
            self.filters.countries.insert(country.to_string());
        }
        self.filters_changed()
    }

    /// Flip a single industry checkbox.
    pub fn toggle_industry(&mut self, industry: &str) -> Change {
        if !self.filters.industries.remove(industry) {
            self.filters.industries.insert(industry.to_string());
        }
        self.filters_changed()
    }

    /// Replace the search term. Every input event counts as a change, even
    /// when the text is the same, so the page still returns to 1.
    pub fn set_search(&mut self, term: &str) -> Change {
        self.filters.search = term.to_string();
        self.filters_changed()
    }

    /// Replace all filter selections and the search term at once.
    pub fn set_filters(&mut self, filters: FilterState) -> Change {
        self.filters = filters;
        self.filters_changed()
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> Change {
        if self.sort == sort {
            return Change::None;
        }
        self.sort = sort;
        Change::Sort
    }

    /// Column header click. Each header flips its own remembered direction;
    /// the first click on a header sorts ascending.
    pub fn click_sort_header(&mut self, key: SortKey) -> Change {
        let order = self
            .header_orders
            .get(&key)
            .map_or(SortOrder::Asc, |last| last.toggled());
        self.header_orders.insert(key, order);
        self.sort = Some(SortSpec::new(key, order));
        Change::Sort
    }

    /// Jump to a page. 0 is clamped to 1; pages past the end are allowed and
    /// show an empty slice.
    pub fn set_page(&mut self, page: usize) -> Change {
        let page = page.max(1);
        if self.page == page {
            return Change::None;
        }
        self.page = page;
        Change::Page
    }

    /// Clear every selection and the search term. Sort is kept.
    pub fn reset(&mut self) -> Change {
        self.filters = FilterState::default();
        self.filters_changed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page_three() -> QueryState {
        QueryState {
            page: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_sorts_by_name_ascending() {
        let state = QueryState::default();
        assert_eq!(state.sort, Some(SortSpec::new(SortKey::Name, SortOrder::Asc)));
        assert_eq!(state.page, 1);
        assert!(state.filters.is_empty());
    }

    #[test]
    fn test_search_change_resets_page() {
        let mut state = on_page_three();
        assert_eq!(state.set_search("acme"), Change::Filters);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_selection_change_resets_page() {
        let mut state = on_page_three();
        assert_eq!(state.toggle_country("USA"), Change::Filters);
        assert_eq!(state.page, 1);
        assert!(state.filters.countries.contains("USA"));

        state.page = 2;
        state.toggle_country("USA");
        assert!(state.filters.countries.is_empty());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_unchanged_set_keeps_page() {
        let mut state = on_page_three();
        assert_eq!(state.set_industries(BTreeSet::new()), Change::None);
        assert_eq!(state.page, 3);
    }

    #[test]
    fn test_sort_and_page_changes_keep_page() {
        let mut state = on_page_three();
        assert_eq!(state.click_sort_header(SortKey::Country), Change::Sort);
        assert_eq!(state.page, 3);
        assert_eq!(state.set_page(4), Change::Page);
        assert_eq!(state.page, 4);
    }

    #[test]
    fn test_header_click_toggles_same_column() {
        let mut state = QueryState::default();
        state.click_sort_header(SortKey::Name);
        assert_eq!(state.sort, Some(SortSpec::new(SortKey::Name, SortOrder::Asc)));
        state.click_sort_header(SortKey::Name);
        assert_eq!(state.sort, Some(SortSpec::new(SortKey::Name, SortOrder::Desc)));
        state.click_sort_header(SortKey::Industry);
        assert_eq!(
            state.sort,
            Some(SortSpec::new(SortKey::Industry, SortOrder::Asc))
        );
    }

    #[test]
    fn test_each_header_remembers_its_direction() {
        let mut state = QueryState::default();
        state.click_sort_header(SortKey::Name);
        state.click_sort_header(SortKey::Country);
        state.click_sort_header(SortKey::Name);
        assert_eq!(state.sort, Some(SortSpec::new(SortKey::Name, SortOrder::Desc)));
        state.click_sort_header(SortKey::Country);
        assert_eq!(
            state.sort,
            Some(SortSpec::new(SortKey::Country, SortOrder::Desc))
        );
    }

    #[test]
    fn test_explicit_sort_does_not_move_header_direction() {
        let mut state = QueryState::default();
        state.set_sort(Some(SortSpec::new(SortKey::Industry, SortOrder::Desc)));
        state.click_sort_header(SortKey::Industry);
        assert_eq!(
            state.sort,
            Some(SortSpec::new(SortKey::Industry, SortOrder::Asc))
        );
    }

    #[test]
    fn test_set_page_clamps_zero() {
        let mut state = on_page_three();
        state.set_page(0);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_reset_clears_filters_keeps_sort() {
        let mut state = on_page_three();
        state.set_search("x");
        state.toggle_industry("Tech");
        state.set_sort(Some(SortSpec::new(SortKey::Country, SortOrder::Desc)));
        state.set_page(2);
        assert_eq!(state.reset(), Change::Filters);
        assert!(state.filters.is_empty());
        assert_eq!(state.page, 1);
        assert_eq!(
            state.sort,
            Some(SortSpec::new(SortKey::Country, SortOrder::Desc))
        );
    }
}
