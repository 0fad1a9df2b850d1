use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::error::CodecError;

/// Примитивный идентификатор выбранного элемента (строка, число или флаг)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl OptionValue {
    /// Reads a bare JSON primitive. Arrays, objects and `null` are rejected.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float)),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            // NaN/inf have no JSON form
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Text(s) => Value::String(s.clone()),
        }
    }

    /// `false` for NaN and ±inf, which JSON cannot carry
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Float(f) => f.is_finite(),
            _ => true,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Выбранный элемент select-контрола: подпись + значение
///
/// Used for single/multi-select form fields and for list filters. Two options
/// denote the same entity when their `value`s match (see [`SelectOption::same_value`]);
/// the derived `PartialEq` compares every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub label: String,
    pub value: OptionValue,

    /// Fixed options cannot be removed from a multi-select
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_fixed: Option<bool>,

    /// Arbitrary payload carried along with the choice (usually the source entity)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            is_fixed: None,
            data: None,
        }
    }

    pub fn fixed(mut self, is_fixed: bool) -> Self {
        self.is_fixed = Some(is_fixed);
        self
    }

    /// Attach a payload. A payload that fails to serialize is dropped.
    pub fn with_data<T: Serialize>(mut self, data: &T) -> Self {
        self.data = serde_json::to_value(data).ok();
        self
    }

    pub fn data_as<T: DeserializeOwned>(&self) -> Option<T> {
        self.data
            .as_ref()
            .and_then(|data| serde_json::from_value(data.clone()).ok())
    }

    pub fn is_fixed(&self) -> bool {
        self.is_fixed.unwrap_or(false)
    }

    pub fn same_value(&self, other: &SelectOption) -> bool {
        self.value == other.value
    }

    /// Builds an option from any serializable entity by naming its id and label fields.
    ///
    /// Returns `None` when the id field is missing or is not a primitive. A missing
    /// label falls back to the id's text.
    ///
    /// ```rust,ignore
    /// let option = SelectOption::from_object(&category, "id", "name");
    /// ```
    pub fn from_object<T: Serialize>(entity: &T, id_key: &str, label_key: &str) -> Option<Self> {
        let object = serde_json::to_value(entity).ok()?;
        let value = object.get(id_key).and_then(OptionValue::from_json)?;
        let label = match object.get(label_key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => value.to_string(),
            Some(other) => other.to_string(),
        };
        Some(Self::new(label, value))
    }

    /// Compact positional form `[label, value, isFixed, data]`.
    ///
    /// The tuple always has four slots; absent fields are `null`. New fields may only
    /// be appended, otherwise tokens already sitting in bookmarked URLs stop decoding.
    pub fn encode_values(&self) -> Value {
        Value::Array(vec![
            Value::String(self.label.clone()),
            self.value.to_json(),
            self.is_fixed.map(Value::Bool).unwrap_or(Value::Null),
            self.data.clone().unwrap_or(Value::Null),
        ])
    }

    /// Inverse of [`SelectOption::encode_values`]. Trailing slots may be missing.
    pub fn from_values(values: &Value) -> Result<Self, CodecError> {
        let Value::Array(items) = values else {
            return Err(CodecError::InvalidOption(values.to_string()));
        };

        let value = items
            .get(1)
            .and_then(OptionValue::from_json)
            .ok_or_else(|| CodecError::InvalidOption(values.to_string()))?;

        let label = match items.first() {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        Ok(Self {
            label,
            value,
            is_fixed: items.get(2).and_then(Value::as_bool),
            data: items.get(3).filter(|data| !data.is_null()).cloned(),
        })
    }
}
