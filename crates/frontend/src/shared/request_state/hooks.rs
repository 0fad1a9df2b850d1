//! Reactive hooks over [`RequestState`] and [`SortFields`]
//!
//! # Пример
//!
//! ```rust,ignore
//! let rs = use_request_state(None, RequestStateOptions::default());
//!
//! let items = LocalResource::new(move || {
//!     let query = rs.query.get();
//!     async move { fetch_page::<ArticleListItemDto>("/api/a001/article/list", &query).await }
//! });
//!
//! view! {
//!     <SearchInput value=rs.phrase_text() on_change=rs.set_phrase />
//!     <SortableHeaderCell label="Заголовок" sort_field="title" sorts=rs.sorts on_sort=rs.toggle_sort />
//! }
//! ```

use contracts::shared::query::{FilterValue, Filters, Query, QueryState, SortField, SortFields};
use leptos::prelude::*;
use std::sync::Arc;

use super::state::{initial_query_state, RequestState, RequestStateOptions, UrlSync};
use super::url_store::{BrowserUrlStore, UrlStore};

/// Return type of [`use_table_sorts`]
#[derive(Clone, Copy)]
pub struct UseTableSortsReturn {
    pub sorts: RwSignal<SortFields>,
    /// Sorts in priority order
    pub parsed_sorts: Memo<Vec<SortField>>,
    pub toggle_sort: Callback<String>,
    pub set_sorts: Callback<Vec<SortField>>,
}

/// Multi-column sort state for a table sorted on the client.
pub fn use_table_sorts(initial: Vec<SortField>) -> UseTableSortsReturn {
    let sorts = RwSignal::new(SortFields::from_sorts(&initial));
    let parsed_sorts = Memo::new(move |_| sorts.with(SortFields::parsed_sorts));

    let toggle_sort = Callback::new(move |key: String| {
        sorts.update(|s| {
            s.toggle(&key);
        });
    });
    let set_sorts = Callback::new(move |next: Vec<SortField>| {
        sorts.set(SortFields::from_sorts(&next));
    });

    UseTableSortsReturn {
        sorts,
        parsed_sorts,
        toggle_sort,
        set_sorts,
    }
}

/// Return type of [`use_request_state`]
#[derive(Clone, Copy)]
pub struct UseRequestStateReturn {
    pub limit: Memo<u32>,
    pub set_limit: Callback<u32>,
    pub page: Memo<u32>,
    pub set_page: Callback<u32>,
    pub reset_page: Callback<()>,
    pub phrase: Memo<Option<String>>,
    pub set_phrase: Callback<String>,
    pub filters: Memo<Option<Filters>>,
    pub set_filters: Callback<Option<Filters>>,
    /// `(key, None)` clears the filter
    pub set_filter: Callback<(String, Option<FilterValue>)>,
    pub sorts: Memo<SortFields>,
    pub parsed_sorts: Memo<Vec<SortField>>,
    pub set_sorts: Callback<Vec<SortField>>,
    pub toggle_sort: Callback<String>,
    /// UI-shaped snapshot, mirrored into the URL
    pub search_params: Memo<QueryState>,
    /// Server-shaped snapshot, use it as the fetch key
    pub query: Memo<Query>,
}

impl UseRequestStateReturn {
    /// Phrase as plain text for inputs
    pub fn phrase_text(&self) -> Signal<String> {
        let phrase = self.phrase;
        Signal::derive(move || phrase.get().unwrap_or_default())
    }
}

/// List-page request state synced with the browser URL (`?q=...`).
pub fn use_request_state(
    initial: Option<QueryState>,
    options: RequestStateOptions,
) -> UseRequestStateReturn {
    use_request_state_with_store(initial, options, Arc::new(BrowserUrlStore))
}

pub fn use_request_state_with_store(
    initial: Option<QueryState>,
    options: RequestStateOptions,
    store: Arc<dyn UrlStore>,
) -> UseRequestStateReturn {
    let seed = initial_query_state(initial, &options, store.as_ref());
    let state = RwSignal::new(RequestState::new(seed));

    let limit = Memo::new(move |_| state.with(RequestState::limit));
    let page = Memo::new(move |_| state.with(RequestState::page));
    let phrase = Memo::new(move |_| state.with(|s| s.phrase().map(str::to_string)));
    let filters = Memo::new(move |_| state.with(|s| s.filters().cloned()));
    let sorts = Memo::new(move |_| state.with(|s| s.sorts().clone()));
    let parsed_sorts = Memo::new(move |_| sorts.with(SortFields::parsed_sorts));
    let search_params = Memo::new(move |_| state.with(RequestState::search_params));
    let query = Memo::new(move |_| search_params.with(Query::from_state));

    let sync = StoredValue::new(UrlSync::new(options));
    Effect::new(move |_| {
        let params = search_params.get();
        sync.update_value(|sync| {
            sync.run(&params, store.as_ref());
        });
    });

    UseRequestStateReturn {
        limit,
        set_limit: Callback::new(move |v: u32| state.update(|s| s.set_limit(v))),
        page,
        set_page: Callback::new(move |v: u32| state.update(|s| s.set_page(v))),
        reset_page: Callback::new(move |_: ()| state.update(RequestState::reset_page)),
        phrase,
        set_phrase: Callback::new(move |v: String| state.update(|s| s.set_phrase(v))),
        filters,
        set_filters: Callback::new(move |v: Option<Filters>| state.update(|s| s.set_filters(v))),
        set_filter: Callback::new(move |(key, value): (String, Option<FilterValue>)| {
            state.update(|s| s.set_filter(&key, value))
        }),
        sorts,
        parsed_sorts,
        set_sorts: Callback::new(move |v: Vec<SortField>| state.update(|s| s.set_sorts(&v))),
        toggle_sort: Callback::new(move |key: String| {
            state.update(|s| {
                s.toggle_sort(&key);
            })
        }),
        search_params,
        query,
    }
}
