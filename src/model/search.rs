//! Search session: query text, debounce token, sequence-guarded results
//!
//! The session is plain state. Timers and channel calls live in the
//! controller, which hands back the tokens issued here so late completions
//! can be recognized and dropped.

use std::time::Duration;

use super::content::CatalogItem;
use super::types::Category;

/// Everything needed to issue one search call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchDispatch {
    pub seq: u64,
    pub category: Category,
    pub query: String,
}

/// What the controller must do after the query text changed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryChange {
    /// Query too short: results were cleared, nothing is scheduled
    Cleared,
    /// Start a debounce timer carrying this token
    Debounce { token: u64, delay: Duration },
    /// Same trimmed text as before: results, pending timer and statuses stay
    Unchanged,
}

/// Outcome of selecting a tab
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategorySwitch {
    /// Already on that tab
    Unchanged,
    /// Results were dropped; run the dispatch right away if there is one
    Switched(Option<SearchDispatch>),
}

#[derive(Clone, Debug)]
pub struct SearchSession {
    category: Category,
    query: String,
    sequence: u64,
    debounce_token: u64,
    results: Vec<CatalogItem>,
    loading: bool,
    debounce: Duration,
    min_query_len: usize,
}

impl SearchSession {
    pub fn new(category: Category, debounce: Duration, min_query_len: usize) -> Self {
        Self {
            category,
            query: String::new(),
            sequence: 0,
            debounce_token: 0,
            results: Vec::new(),
            loading: false,
            debounce,
            min_query_len,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[CatalogItem] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn has_active_query(&self) -> bool {
        self.query.trim().chars().count() >= self.min_query_len
    }

    pub fn set_query(&mut self, text: &str) -> QueryChange {
        let same_text = self.query.trim() == text.trim();
        self.query = text.to_string();
        if same_text && self.has_active_query() {
            return QueryChange::Unchanged;
        }

        // Any pending timer is superseded either way
        self.debounce_token += 1;

        if !self.has_active_query() {
            self.invalidate_in_flight();
            self.results.clear();
            return QueryChange::Cleared;
        }

        QueryChange::Debounce { token: self.debounce_token, delay: self.debounce }
    }

    /// Called when a debounce timer fires. Only the most recently scheduled
    /// timer may dispatch.
    pub fn debounce_elapsed(&mut self, token: u64) -> Option<SearchDispatch> {
        if token != self.debounce_token || !self.has_active_query() {
            return None;
        }
        Some(self.begin_dispatch())
    }

    pub fn begin_dispatch(&mut self) -> SearchDispatch {
        self.sequence += 1;
        self.loading = true;
        SearchDispatch {
            seq: self.sequence,
            category: self.category,
            query: self.query.trim().to_string(),
        }
    }

    /// Accepts the response of dispatch `seq` unless a newer one was issued.
    /// Returns whether the result set was replaced.
    pub fn complete(&mut self, seq: u64, results: Vec<CatalogItem>) -> bool {
        if seq != self.sequence {
            return false;
        }
        self.results = results;
        self.loading = false;
        true
    }

    /// Switches tab, handing back the search to run right away when a usable
    /// query is active.
    pub fn switch_category(&mut self, category: Category) -> CategorySwitch {
        if category == self.category {
            return CategorySwitch::Unchanged;
        }

        self.category = category;
        self.debounce_token += 1;
        self.invalidate_in_flight();
        self.results.clear();

        if self.has_active_query() {
            CategorySwitch::Switched(Some(self.begin_dispatch()))
        } else {
            CategorySwitch::Switched(None)
        }
    }

    /// Makes every search already dispatched stale
    fn invalidate_in_flight(&mut self) {
        self.sequence += 1;
        self.loading = false;
    }
}
