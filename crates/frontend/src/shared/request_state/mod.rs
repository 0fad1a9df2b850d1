//! Состояние запросов списков (пагинация, поиск, сортировка, фильтры) с синхронизацией в URL
//!
//! - [`RequestState`] / [`UrlSync`]: plain state and the URL write gate;
//! - [`use_request_state`] / [`use_table_sorts`]: Leptos hooks for list pages;
//! - [`UrlStore`]: the URL itself, swappable for [`MemoryUrlStore`].

mod hooks;
mod state;
mod url_store;

pub use hooks::{
    use_request_state, use_request_state_with_store, use_table_sorts, UseRequestStateReturn,
    UseTableSortsReturn,
};
pub use state::{initial_query_state, RequestState, RequestStateOptions, UrlSync};
pub use url_store::{BrowserUrlStore, MemoryUrlStore, UrlStore};
