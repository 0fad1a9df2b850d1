//! List-page query state shared by every paged list in the admin UI
//!
//! A list page keeps its pagination, free-text search, multi-column sort and
//! filters in a [`QueryState`]. The state travels two ways:
//!
//! - to the server as a flat [`Query`] (select options unwrapped to raw values);
//! - into the browser URL as an opaque token produced by [`search_params::encode`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contracts::shared::query::{search_params, FilterValue, QueryState, SelectOption};
//!
//! let mut state = QueryState::default();
//! state.filters_mut().set("category_id", SelectOption::new("News", 42));
//!
//! let token = search_params::encode(&state)?;
//! let restored = search_params::decode(&token)?;
//! assert_eq!(state, restored);
//! ```

mod error;
mod filter;
mod option;
mod sort;
mod state;

pub mod search_params;

pub use error::CodecError;
pub use filter::{FilterValue, Filters};
pub use option::{OptionValue, SelectOption};
pub use sort::{SortDirection, SortField, SortFields};
pub use state::{PagedResult, Query, QueryState, QueryStatePatch, DEFAULT_LIMIT, DEFAULT_PAGE};
