//! Доступ к query string текущего URL
//!
//! The browser URL is one global resource shared by the whole app. List pages never
//! touch it directly: they go through [`UrlStore`], so that the request-state hook
//! can be driven by [`MemoryUrlStore`] outside the browser.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};
use web_sys::window;

pub trait UrlStore: Send + Sync {
    /// Value of the query parameter `key`, if present
    fn read(&self, key: &str) -> Option<String>;

    /// Sets `key`, keeping the other parameters, without adding a history entry
    fn write(&self, key: &str, value: &str);
}

/// `window.location` + `history.replaceState`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserUrlStore;

impl BrowserUrlStore {
    fn current_params() -> BTreeMap<String, String> {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default()
    }
}

impl UrlStore for BrowserUrlStore {
    fn read(&self, key: &str) -> Option<String> {
        Self::current_params().remove(key)
    }

    fn write(&self, key: &str, value: &str) {
        let Some(w) = window() else {
            return;
        };

        let mut params = Self::current_params();
        params.insert(key.to_string(), value.to_string());
        let query_string = serde_qs::to_string(&params).unwrap_or_default();

        let location = w.location();
        let pathname = location.pathname().unwrap_or_default();
        let hash = location.hash().unwrap_or_default();
        let new_url = format!("{}?{}{}", pathname, query_string, hash);

        if let Ok(history) = w.history() {
            if let Err(e) =
                history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url))
            {
                log::warn!("replaceState failed for {}: {:?}", new_url, e);
            }
        }
    }
}

/// In-memory query string; records every write
#[derive(Debug, Default)]
pub struct MemoryUrlStore {
    params: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String)>>,
}

impl MemoryUrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(self, key: &str, value: &str) -> Self {
        self.params
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Writes in call order
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl UrlStore for MemoryUrlStore {
    fn read(&self, key: &str) -> Option<String> {
        self.params
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.params
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((key.to_string(), value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_read_write() {
        let store = MemoryUrlStore::new().with_param("tab", "articles");
        assert_eq!(store.read("tab").as_deref(), Some("articles"));
        assert_eq!(store.read("q"), None);

        store.write("q", "abc");
        store.write("q", "def");
        assert_eq!(store.read("q").as_deref(), Some("def"));
        assert_eq!(
            store.writes(),
            vec![
                ("q".to_string(), "abc".to_string()),
                ("q".to_string(), "def".to_string())
            ]
        );
    }
}
