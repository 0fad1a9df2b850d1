use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::filter::Filters;
use super::sort::SortField;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Top-level names of [`Query`]; a filter with one of these names is not sent
const RESERVED_KEYS: [&str; 4] = ["limit", "page", "phrase", "sorts"];

/// UI-side state of a paged list: what the user sees in the toolbar and table header
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
    pub phrase: Option<String>,
    pub sorts: Vec<SortField>,
    pub filters: Option<Filters>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            phrase: None,
            sorts: Vec::new(),
            filters: None,
        }
    }
}

impl QueryState {
    pub fn filters_mut(&mut self) -> &mut Filters {
        self.filters.get_or_insert_with(Filters::new)
    }

    pub fn query(&self) -> Query {
        Query::from_state(self)
    }
}

/// Partial [`QueryState`]: only the fields that were actually present in a URL token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryStatePatch {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub phrase: Option<String>,
    pub sorts: Option<Vec<SortField>>,
    pub filters: Option<Filters>,
}

impl QueryStatePatch {
    /// Overrides `base` field by field wherever the patch carries a value.
    pub fn apply_to(self, base: QueryState) -> QueryState {
        QueryState {
            page: self.page.unwrap_or(base.page),
            limit: self.limit.unwrap_or(base.limit),
            phrase: self.phrase.or(base.phrase),
            sorts: self.sorts.unwrap_or(base.sorts),
            filters: self.filters.or(base.filters),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Server-side request parameters of a paged list.
///
/// Filters are flattened next to the pagination fields and carry raw values only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub limit: u32,
    pub page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phrase: Option<String>,
    #[serde(default)]
    pub sorts: Vec<SortField>,
    #[serde(flatten)]
    pub filters: BTreeMap<String, Value>,
}

impl Query {
    pub fn from_state(state: &QueryState) -> Self {
        let mut filters = state
            .filters
            .as_ref()
            .map(Filters::unwrap_values)
            .unwrap_or_default();
        filters.retain(|key, _| !RESERVED_KEYS.contains(&key.as_str()));

        Self {
            limit: state.limit,
            page: state.page,
            phrase: state.phrase.clone().filter(|phrase| !phrase.is_empty()),
            sorts: state.sorts.clone(),
            filters,
        }
    }

    /// Rows to skip for this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// Одна страница результата списка
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> PagedResult<T> {
    pub fn total_pages(&self) -> u32 {
        if self.limit == 0 {
            return 0;
        }
        let pages = self.total.div_ceil(u64::from(self.limit));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::query::SelectOption;
    use serde_json::json;

    #[test]
    fn test_empty_phrase_is_not_sent() {
        let mut state = QueryState {
            phrase: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(state.query().phrase, None);

        state.phrase = Some("abc".to_string());
        assert_eq!(state.query().phrase.as_deref(), Some("abc"));

        // no trimming
        state.phrase = Some(" abc ".to_string());
        assert_eq!(state.query().phrase.as_deref(), Some(" abc "));
    }

    #[test]
    fn test_filters_are_unwrapped_and_flattened() {
        let mut state = QueryState::default();
        state
            .filters_mut()
            .set("category_id", SelectOption::new("Cat", 42));
        state.sorts = vec![SortField::asc("name")];

        let query = state.query();
        assert_eq!(query.filters["category_id"], json!(42));

        // the UI state still holds the option itself
        let filters = state.filters.as_ref().unwrap();
        assert_eq!(
            filters.get("category_id").and_then(|v| v.as_option()),
            Some(&SelectOption::new("Cat", 42))
        );

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "limit": 10,
                "page": 1,
                "sorts": [{"field": "name", "direction": "asc"}],
                "category_id": 42
            })
        );
    }

    #[test]
    fn test_reserved_filter_names_are_dropped() {
        let mut state = QueryState::default();
        state.filters_mut().set("page", "7");
        state.filters_mut().set("status", "active");

        let query = state.query();
        assert_eq!(query.page, 1);
        assert!(!query.filters.contains_key("page"));
        assert_eq!(query.filters["status"], json!("active"));
    }

    #[test]
    fn test_patch_overrides_only_present_fields() {
        let base = QueryState {
            limit: 25,
            phrase: Some("doctor".to_string()),
            ..Default::default()
        };
        let patch = QueryStatePatch {
            page: Some(3),
            ..Default::default()
        };
        let merged = patch.apply_to(base);
        assert_eq!(merged.page, 3);
        assert_eq!(merged.limit, 25);
        assert_eq!(merged.phrase.as_deref(), Some("doctor"));
    }

    #[test]
    fn test_offset_and_total_pages() {
        let query = QueryState {
            page: 3,
            limit: 20,
            ..Default::default()
        }
        .query();
        assert_eq!(query.offset(), 40);

        let result: PagedResult<()> = PagedResult {
            items: Vec::new(),
            total: 41,
            page: 1,
            limit: 20,
        };
        assert_eq!(result.total_pages(), 3);
    }
}
