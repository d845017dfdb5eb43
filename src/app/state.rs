// CompanyScope - app/state.rs
//
// Dashboard state management. Holds the record store, the query state and
// everything derived from them (ordered view, page window, stats, URL).
//
// Every UI event goes through `dispatch`, which mutates the query state and
// then runs one synchronous recompute pass before returning. Events are
// processed one at a time; nothing here is shared across threads.

use crate::core::aggregate::{self, StatsBundle};
use crate::core::filter::{self, FilterState};
use crate::core::model::{Facets, Record, RecordStore};
use crate::core::paginate::{self, PageInfo};
use crate::core::query::{Change, QueryState};
use crate::core::sort::{self, SortKey, SortSpec};
use crate::core::url_codec;
use crate::util::constants::DEFAULT_PAGE_SIZE;
use serde::Serialize;
use std::collections::BTreeSet;

/// Events the UI collaborator can send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetCountries(BTreeSet<String>),
    SetIndustries(BTreeSet<String>),
    ToggleCountry(String),
    ToggleIndustry(String),
    SetSearch(String),
    SetSort(Option<SortSpec>),
    ClickSortHeader(SortKey),
    SetPage(usize),
    NextPage,
    PrevPage,
    Reset,
}

/// Everything a renderer needs after a recompute.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub page: PageInfo,
    pub rows: Vec<Record>,
    pub stats: StatsBundle,
    pub query_string: String,
}

/// Top-level dashboard state.
#[derive(Debug)]
pub struct Dashboard {
    store: RecordStore,
    query: QueryState,
    page_size: usize,

    /// Filter option lists, rebuilt when the store is replaced.
    facets: Facets,

    /// Indices into the store of the filtered records, in source order.
    filtered: Vec<usize>,

    /// `filtered` after sorting; this is the displayed order.
    ordered: Vec<usize>,

    page_info: PageInfo,
    stats: StatsBundle,

    /// Query string mirroring the current filters.
    query_string: String,
}

impl Dashboard {
    /// Build a dashboard over `store` and run the first recompute.
    pub fn new(store: RecordStore, page_size: usize) -> Self {
        Self::with_query(store, page_size, QueryState::default())
    }

    /// Build with an explicit starting query (e.g. a configured sort).
    pub fn with_query(store: RecordStore, page_size: usize, query: QueryState) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        let mut dashboard = Self {
            facets: store.facets(),
            store,
            query,
            page_size,
            filtered: Vec::new(),
            ordered: Vec::new(),
            page_info: paginate::paginate(0, 1, page_size),
            stats: StatsBundle::default(),
            query_string: String::new(),
        };
        dashboard.refilter();
        dashboard
    }

    /// Swap in a freshly fetched store and recompute everything.
    ///
    /// The query state is kept; selections that no longer match any record
    /// simply filter to nothing until the user changes them.
    pub fn replace_store(&mut self, store: RecordStore) {
        self.facets = store.facets();
        self.store = store;
        self.query.page = 1;
        self.refilter();
    }

    /// Restore filters from a query string at startup.
    ///
    /// Selected values that do not exist in the data have no checkbox to tick
    /// and are dropped. The search term is taken as-is.
    pub fn apply_location(&mut self, query: &str) {
        let decoded = url_codec::decode(query);
        let facets = &self.facets;

        let (countries, unknown_countries): (BTreeSet<String>, BTreeSet<String>) = decoded
            .countries
            .into_iter()
            .partition(|c| facets.has_country(c));
        let (industries, unknown_industries): (BTreeSet<String>, BTreeSet<String>) = decoded
            .industries
            .into_iter()
            .partition(|i| facets.has_industry(i));

        if !unknown_countries.is_empty() || !unknown_industries.is_empty() {
            tracing::debug!(
                countries = ?unknown_countries,
                industries = ?unknown_industries,
                "Dropping URL selections with no matching records"
            );
        }

        self.query.set_filters(FilterState {
            countries,
            industries,
            search: decoded.search,
        });
        self.refilter();
    }

    /// Apply one UI event and recompute what it affects.
    pub fn dispatch(&mut self, command: Command) -> Change {
        tracing::debug!(?command, "Dashboard command");
        let change = match command {
            Command::SetCountries(countries) => self.query.set_countries(countries),
            Command::SetIndustries(industries) => self.query.set_industries(industries),
            Command::ToggleCountry(country) => self.query.toggle_country(&country),
            Command::ToggleIndustry(industry) => self.query.toggle_industry(&industry),
            Command::SetSearch(term) => self.query.set_search(&term),
            Command::SetSort(sort) => self.query.set_sort(sort),
            Command::ClickSortHeader(key) => self.query.click_sort_header(key),
            Command::SetPage(page) => self.query.set_page(page),
            Command::NextPage if self.page_info.has_next => {
                self.query.set_page(self.query.page + 1)
            }
            Command::PrevPage if self.page_info.has_prev => {
                self.query.set_page(self.query.page - 1)
            }
            Command::NextPage | Command::PrevPage => Change::None,
            Command::Reset => self.query.reset(),
        };

        match change {
            Change::Filters => self.refilter(),
            Change::Sort => self.resort(),
            Change::Page => self.repaginate(),
            Change::None => {}
        }
        change
    }

    // -------------------------------------------------------------------------
    // Recompute passes
    // -------------------------------------------------------------------------

    /// Filter -> sort -> paginate + aggregate, and re-serialise the URL.
    fn refilter(&mut self) {
        let records = self.store.records();
        self.filtered = filter::apply_filters(records, &self.query.filters);
        self.stats = aggregate::aggregate(self.filtered.iter().map(|&idx| &records[idx]));
        self.query_string = url_codec::encode(&self.query.filters);
        self.resort();

        tracing::debug!(
            matched = self.filtered.len(),
            total = self.store.len(),
            companies = self.stats.unique_company_count,
            query = %self.query_string,
            "Filters applied"
        );
    }

    /// Sort always starts from source order, so clearing the sort restores it.
    fn resort(&mut self) {
        self.ordered.clone_from(&self.filtered);
        sort::sort_indices(self.store.records(), &mut self.ordered, self.query.sort);
        self.repaginate();
    }

    fn repaginate(&mut self) {
        self.page_info = paginate::paginate(self.ordered.len(), self.query.page, self.page_size);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn page_info(&self) -> &PageInfo {
        &self.page_info
    }

    pub fn stats(&self) -> &StatsBundle {
        &self.stats
    }

    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    /// Number of records in the filtered view.
    pub fn filtered_len(&self) -> usize {
        self.ordered.len()
    }

    /// The whole filtered view in display order.
    pub fn filtered_records(&self) -> impl Iterator<Item = &Record> + '_ {
        let records = self.store.records();
        self.ordered.iter().map(move |&idx| &records[idx])
    }

    /// Records on the current page.
    pub fn page_rows(&self) -> Vec<&Record> {
        let records = self.store.records();
        paginate::page_slice(&self.ordered, &self.page_info)
            .iter()
            .map(|&idx| &records[idx])
            .collect()
    }

    /// Snapshot for the rendering collaborator.
    pub fn view(&self) -> DashboardView {
        DashboardView {
            page: self.page_info,
            rows: self.page_rows().into_iter().cloned().collect(),
            stats: self.stats.clone(),
            query_string: self.query_string.clone(),
        }
    }
}
