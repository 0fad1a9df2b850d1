use contracts::shared::query::{
    search_params, FilterValue, Filters, Query, QueryState, SortDirection, SortField, SortFields,
};

use super::url_store::UrlStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestStateOptions {
    /// Read the initial state from, and mirror changes into, the URL
    pub with_query_string: bool,
    /// Query parameter that carries the encoded state
    pub query_key: &'static str,
}

impl Default for RequestStateOptions {
    fn default() -> Self {
        Self {
            with_query_string: true,
            query_key: "q",
        }
    }
}

impl RequestStateOptions {
    pub fn without_query_string() -> Self {
        Self {
            with_query_string: false,
            ..Default::default()
        }
    }
}

/// Starting state of a list page.
///
/// Defaults, overridden by `initial`, overridden by whatever the URL token carries.
/// A token that fails to decode is logged and ignored.
pub fn initial_query_state(
    initial: Option<QueryState>,
    options: &RequestStateOptions,
    store: &dyn UrlStore,
) -> QueryState {
    let base = initial.unwrap_or_default();
    if !options.with_query_string {
        return base;
    }

    let Some(token) = store
        .read(options.query_key)
        .filter(|token| !token.trim().is_empty())
    else {
        return base;
    };

    match search_params::decode_patch(&token) {
        Ok(patch) => {
            log::debug!("Restored list state from `{}`: {:?}", options.query_key, patch);
            patch.apply_to(base)
        }
        Err(e) => {
            log::warn!(
                "Ignoring malformed `{}` query parameter: {}",
                options.query_key,
                e
            );
            base
        }
    }
}

/// Состояние запроса списка: пагинация, поиск, сортировка, фильтры
///
/// Plain data; the reactive wrapper lives in `use_request_state`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState {
    page: u32,
    limit: u32,
    phrase: Option<String>,
    filters: Option<Filters>,
    sorts: SortFields,
}

impl RequestState {
    pub fn new(initial: QueryState) -> Self {
        Self {
            page: initial.page,
            limit: initial.limit,
            phrase: initial.phrase,
            filters: initial.filters,
            sorts: SortFields::from_sorts(&initial.sorts),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn phrase(&self) -> Option<&str> {
        self.phrase.as_deref()
    }

    pub fn filters(&self) -> Option<&Filters> {
        self.filters.as_ref()
    }

    pub fn sorts(&self) -> &SortFields {
        &self.sorts
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    pub fn reset_page(&mut self) {
        self.page = contracts::shared::query::DEFAULT_PAGE;
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit;
    }

    pub fn set_phrase(&mut self, phrase: impl Into<String>) {
        self.phrase = Some(phrase.into());
    }

    pub fn set_filters(&mut self, filters: Option<Filters>) {
        self.filters = filters;
    }

    /// Sets or clears a single filter
    pub fn set_filter(&mut self, key: &str, value: Option<FilterValue>) {
        match value {
            Some(value) => self
                .filters
                .get_or_insert_with(Filters::new)
                .set(key, value),
            None => {
                if let Some(filters) = self.filters.as_mut() {
                    filters.remove(key);
                }
            }
        }
    }

    pub fn set_sorts(&mut self, sorts: &[SortField]) {
        self.sorts = SortFields::from_sorts(sorts);
    }

    pub fn toggle_sort(&mut self, key: &str) -> Option<SortDirection> {
        self.sorts.toggle(key)
    }

    /// Snapshot persisted in the URL
    pub fn search_params(&self) -> QueryState {
        QueryState {
            page: self.page,
            limit: self.limit,
            phrase: self.phrase.clone(),
            sorts: self.sorts.parsed_sorts(),
            filters: self.filters.clone(),
        }
    }

    /// Snapshot sent to the server
    pub fn query(&self) -> Query {
        Query::from_state(&self.search_params())
    }
}

/// Mirrors `search_params` into the URL, skipping the very first run.
///
/// The first run happens right after mount with the state that was just read from
/// the URL; writing it back would only churn history. One `UrlSync` per mounted hook.
#[derive(Debug, Clone)]
pub struct UrlSync {
    options: RequestStateOptions,
    armed: bool,
}

impl UrlSync {
    pub fn new(options: RequestStateOptions) -> Self {
        Self {
            options,
            armed: false,
        }
    }

    /// Returns `true` when the URL was written.
    pub fn run(&mut self, params: &QueryState, store: &dyn UrlStore) -> bool {
        if !self.armed {
            self.armed = true;
            return false;
        }
        if !self.options.with_query_string {
            return false;
        }

        match search_params::encode(params) {
            Ok(token) => {
                log::debug!("{}={}", self.options.query_key, token);
                store.write(self.options.query_key, &token);
                true
            }
            Err(e) => {
                log::warn!("Failed to encode list state: {}", e);
                false
            }
        }
    }
}
