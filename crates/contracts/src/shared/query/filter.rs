use serde_json::Value;
use std::collections::BTreeMap;

use super::option::SelectOption;

/// Значение одного фильтра списка
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Plain JSON data (strings, numbers, dates, nested objects)
    Value(Value),
    Option(SelectOption),
    Options(Vec<SelectOption>),
}

impl FilterValue {
    /// The value the server expects: options are replaced by their raw `value`.
    pub fn unwrap_value(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Option(option) => option.value.to_json(),
            Self::Options(options) => {
                Value::Array(options.iter().map(|o| o.value.to_json()).collect())
            }
        }
    }

    pub fn as_option(&self) -> Option<&SelectOption> {
        match self {
            Self::Option(option) => Some(option),
            _ => None,
        }
    }

    pub fn as_options(&self) -> Option<&[SelectOption]> {
        match self {
            Self::Options(options) => Some(options),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Value(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl From<SelectOption> for FilterValue {
    fn from(option: SelectOption) -> Self {
        Self::Option(option)
    }
}

impl From<Vec<SelectOption>> for FilterValue {
    fn from(options: Vec<SelectOption>) -> Self {
        Self::Options(options)
    }
}

impl From<Value> for FilterValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_string()))
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Value(Value::String(value))
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Value(Value::Bool(value))
    }
}

/// Filters of a list page, keyed by the server-side parameter name.
///
/// An unset filter has no key at all; there is no "undefined" placeholder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters(BTreeMap<String, FilterValue>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// `None` clears the filter.
    pub fn set_opt<V: Into<FilterValue>>(&mut self, key: impl Into<String>, value: Option<V>) {
        let key = key.into();
        match value {
            Some(value) => {
                self.0.insert(key, value.into());
            }
            None => {
                self.0.remove(&key);
            }
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn unwrap_values(&self) -> BTreeMap<String, Value> {
        self.0
            .iter()
            .map(|(key, value)| (key.clone(), value.unwrap_value()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for Filters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_values() {
        let filters = Filters::new()
            .with("category_id", SelectOption::new("Cat", 42))
            .with(
                "tag_ids",
                vec![SelectOption::new("A", "a"), SelectOption::new("B", "b")],
            )
            .with("status", "active")
            .with("range", json!({"from": "2024-01-01", "to": null}));

        let raw = filters.unwrap_values();
        assert_eq!(raw["category_id"], json!(42));
        assert_eq!(raw["tag_ids"], json!(["a", "b"]));
        assert_eq!(raw["status"], json!("active"));
        assert_eq!(raw["range"], json!({"from": "2024-01-01", "to": null}));
    }

    #[test]
    fn test_set_opt_none_removes_key() {
        let mut filters = Filters::new().with("status", "active");
        filters.set_opt::<FilterValue>("status", None);
        assert!(!filters.contains_key("status"));

        filters.set_opt("status", Some("draft"));
        assert_eq!(filters.get("status").and_then(FilterValue::as_str), Some("draft"));
    }

    #[test]
    fn test_null_is_a_value_not_an_absence() {
        let filters = Filters::new().with("archived_at", Value::Null);
        assert!(filters.contains_key("archived_at"));
        assert_eq!(filters.unwrap_values()["archived_at"], Value::Null);
    }
}
