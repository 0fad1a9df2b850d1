//! Кодирование состояния списка в один параметр URL
//!
//! `QueryState` → JSON → percent-encoding → base64. The token is opaque to the user
//! but it is NOT protected against editing: anyone can decode, change and re-encode
//! it. Decoded data is not validated; unknown filter keys are passed through.
//!
//! Select options are stored positionally under an `o:` prefixed key so that the
//! decoder knows to rebuild them:
//!
//! ```text
//! {"page":2,"limit":10,"sorts":[["name","asc"]],"filters":{"o:category_id":["Cat",42,null,null]}}
//! ```

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::CodecError;
use super::filter::{FilterValue, Filters};
use super::option::SelectOption;
use super::sort::{SortDirection, SortField};
use super::state::{QueryState, QueryStatePatch};

const OPTION_PREFIX: &str = "o:";

#[derive(Debug, Default, Serialize, Deserialize)]
struct EncodedQueryState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sorts: Option<Vec<(String, SortDirection)>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filters: Option<Map<String, Value>>,
}

pub fn encode(state: &QueryState) -> Result<String, CodecError> {
    let payload = EncodedQueryState {
        page: Some(state.page),
        limit: Some(state.limit),
        phrase: state.phrase.clone(),
        sorts: (!state.sorts.is_empty()).then(|| {
            state
                .sorts
                .iter()
                .map(|sort| (sort.field.clone(), sort.direction))
                .collect()
        }),
        filters: state.filters.as_ref().map(encode_filters).transpose()?,
    };

    let json = serde_json::to_string(&payload)?;
    let escaped = urlencoding::encode(&json);
    Ok(URL_SAFE_NO_PAD.encode(escaped.as_bytes()))
}

fn encode_filters(filters: &Filters) -> Result<Map<String, Value>, CodecError> {
    filters
        .iter()
        .map(|(key, value)| match value {
            FilterValue::Value(value) => {
                // иначе decode прочитает его как опцию под другим ключом
                if let Some(stripped) = key.strip_prefix(OPTION_PREFIX) {
                    let clashes = filters
                        .get(stripped)
                        .is_some_and(|other| !matches!(other, FilterValue::Value(_)));
                    if clashes || decode_option_entry(value).is_ok() {
                        return Err(CodecError::AmbiguousFilterKey(key.clone()));
                    }
                }
                Ok((key.clone(), value.clone()))
            }
            FilterValue::Option(option) => {
                Ok((format!("{OPTION_PREFIX}{key}"), encode_option(option)?))
            }
            FilterValue::Options(options) => {
                let tuples = options
                    .iter()
                    .map(encode_option)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((format!("{OPTION_PREFIX}{key}"), Value::Array(tuples)))
            }
        })
        .collect()
}

fn encode_option(option: &SelectOption) -> Result<Value, CodecError> {
    if !option.value.is_finite() {
        return Err(CodecError::NonFiniteValue(option.label.clone()));
    }
    Ok(option.encode_values())
}

/// Decodes a token into a full state, filling absent fields with defaults.
pub fn decode(token: &str) -> Result<QueryState, CodecError> {
    Ok(decode_patch(token)?.apply_to(QueryState::default()))
}

/// Decodes a token keeping track of which fields it actually carried.
pub fn decode_patch(token: &str) -> Result<QueryStatePatch, CodecError> {
    let bytes = URL_SAFE_NO_PAD.decode(normalize_alphabet(token))?;
    let escaped = String::from_utf8(bytes)?;
    let json = urlencoding::decode(&escaped)?;
    let payload: EncodedQueryState = serde_json::from_str(&json)?;

    let filters = payload.filters.map(decode_filters);
    let sorts = payload.sorts.map(|sorts| {
        sorts
            .into_iter()
            .map(|(field, direction)| SortField::new(field, direction))
            .collect()
    });

    Ok(QueryStatePatch {
        page: payload.page,
        limit: payload.limit,
        phrase: payload.phrase,
        sorts,
        filters,
    })
}

/// Accepts standard and URL-safe base64, padded or not.
fn normalize_alphabet(token: &str) -> String {
    token
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            // form decoding turns '+' into ' '
            '+' | ' ' => '-',
            '/' => '_',
            c => c,
        })
        .collect()
}

fn decode_filters(raw: Map<String, Value>) -> Filters {
    let mut filters = Filters::new();
    for (key, value) in raw {
        // `o:` entry that is not an option tuple stays a plain value under its full key
        let option = key
            .strip_prefix(OPTION_PREFIX)
            .and_then(|original| Some((original.to_string(), decode_option_entry(&value).ok()?)));
        match option {
            Some((original, option)) => filters.set(original, option),
            None => filters.set(key, FilterValue::Value(value)),
        }
    }
    filters
}

fn decode_option_entry(value: &Value) -> Result<FilterValue, CodecError> {
    match value {
        // list of tuples (or an emptied multi-select)
        Value::Array(items) if items.first().map_or(true, Value::is_array) => {
            let options = items
                .iter()
                .map(SelectOption::from_values)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(FilterValue::Options(options))
        }
        _ => Ok(FilterValue::Option(SelectOption::from_values(value)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde_json::json;

    fn payload_of(token: &str) -> Value {
        let bytes = URL_SAFE_NO_PAD.decode(token).unwrap();
        let escaped = String::from_utf8(bytes).unwrap();
        serde_json::from_str(&urlencoding::decode(&escaped).unwrap()).unwrap()
    }

    #[test]
    fn test_end_to_end_plain_filters() {
        let state = QueryState {
            page: 2,
            limit: 10,
            phrase: Some("foo".to_string()),
            sorts: vec![SortField::asc("name")],
            filters: Some(Filters::new().with("status", "active")),
        };
        let token = encode(&state).unwrap();
        assert_eq!(decode(&token).unwrap(), state);
        assert_eq!(
            payload_of(&token),
            json!({
                "page": 2,
                "limit": 10,
                "phrase": "foo",
                "sorts": [["name", "asc"]],
                "filters": {"status": "active"}
            })
        );
    }

    #[test]
    fn test_options_round_trip() {
        let state = QueryState {
            filters: Some(
                Filters::new()
                    .with("category_id", SelectOption::new("Cat", 42))
                    .with(
                        "doctor_ids",
                        vec![
                            SelectOption::new("Dr. Who", "d-1").fixed(true),
                            SelectOption::new("Dr. No", "d-2").with_data(&json!({"team": 3})),
                        ],
                    )
                    .with("empty_multi", Vec::<SelectOption>::new()),
            ),
            ..Default::default()
        };
        let token = encode(&state).unwrap();
        assert_eq!(decode(&token).unwrap(), state);

        let payload = payload_of(&token);
        assert_eq!(payload["filters"]["o:category_id"], json!(["Cat", 42, null, null]));
        assert_eq!(
            payload["filters"]["o:doctor_ids"],
            json!([["Dr. Who", "d-1", true, null], ["Dr. No", "d-2", null, {"team": 3}]])
        );
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let mut filters = Filters::new().with("status", "active");
        filters.set_opt::<FilterValue>("category_id", None);
        let state = QueryState {
            filters: Some(filters),
            ..Default::default()
        };

        let token = encode(&state).unwrap();
        let payload = payload_of(&token);
        assert_eq!(payload, json!({"page": 1, "limit": 10, "filters": {"status": "active"}}));

        let decoded = decode(&token).unwrap();
        assert!(!decoded.filters.unwrap().contains_key("category_id"));
    }

    #[test]
    fn test_token_is_url_safe() {
        let state = QueryState {
            phrase: Some("a&b=c?d/é+ü~".to_string()),
            ..Default::default()
        };
        let token = encode(&state).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(decode(&token).unwrap(), state);
    }

    #[test]
    fn test_decode_accepts_standard_padded_base64() {
        let json = r#"{"page":3,"limit":25,"sorts":[["title","DESC"]]}"#;
        let token = STANDARD.encode(urlencoding::encode(json).as_bytes());

        let decoded = decode(&token).unwrap();
        assert_eq!(decoded.page, 3);
        assert_eq!(decoded.limit, 25);
        assert_eq!(decoded.sorts, vec![SortField::desc("title")]);
        assert_eq!(decoded.filters, None);
    }

    #[test]
    fn test_decode_tolerates_missing_sections() {
        let token = URL_SAFE_NO_PAD.encode(urlencoding::encode("{}").as_bytes());
        let patch = decode_patch(&token).unwrap();
        assert!(patch.is_empty());
        assert_eq!(decode(&token).unwrap(), QueryState::default());
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let json = r#"{"page":1,"limit":10,"legacy":true,"filters":{"removed_filter":"x"}}"#;
        let token = URL_SAFE_NO_PAD.encode(urlencoding::encode(json).as_bytes());

        let decoded = decode(&token).unwrap();
        let filters = decoded.filters.unwrap();
        assert_eq!(filters.get("removed_filter"), Some(&FilterValue::Value(json!("x"))));
    }

    #[test]
    fn test_malformed_tokens_are_errors() {
        assert!(matches!(decode("***"), Err(CodecError::Base64(_))));

        let not_json = URL_SAFE_NO_PAD.encode(b"hello");
        assert!(matches!(decode(&not_json), Err(CodecError::Json(_))));
    }

    #[test]
    fn test_prefixed_entry_that_is_not_an_option_stays_a_value() {
        let json = r#"{"page":3,"sorts":[["title","asc"]],"filters":{"o:x":{"label":"X"},"o:y":["a"]}}"#;
        let token = URL_SAFE_NO_PAD.encode(urlencoding::encode(json).as_bytes());

        let decoded = decode(&token).unwrap();
        assert_eq!(decoded.page, 3);
        assert_eq!(decoded.sorts, vec![SortField::asc("title")]);
        let filters = decoded.filters.unwrap();
        assert_eq!(filters.get("o:x"), Some(&FilterValue::Value(json!({"label": "X"}))));
        assert_eq!(filters.get("o:y"), Some(&FilterValue::Value(json!(["a"]))));
        assert!(!filters.contains_key("x"));
    }

    #[test]
    fn test_plain_filter_with_option_prefix_round_trips() {
        let state = QueryState {
            page: 3,
            filters: Some(
                Filters::new()
                    .with("o:legacy", "x")
                    .with("o:ids", json!(["a"]))
                    .with("status", SelectOption::new("Draft", "draft")),
            ),
            ..Default::default()
        };
        let token = encode(&state).unwrap();
        assert_eq!(decode(&token).unwrap(), state);
    }

    #[test]
    fn test_plain_filter_that_reads_back_as_option_is_rejected() {
        let looks_like_tuple = QueryState {
            filters: Some(Filters::new().with("o:pair", json!(["a", 1]))),
            ..Default::default()
        };
        assert!(matches!(
            encode(&looks_like_tuple),
            Err(CodecError::AmbiguousFilterKey(key)) if key == "o:pair"
        ));

        // "o:status" and the option under "status" would share one encoded key
        let clash = QueryState {
            filters: Some(
                Filters::new()
                    .with("status", SelectOption::new("Draft", "draft"))
                    .with("o:status", "x"),
            ),
            ..Default::default()
        };
        assert!(matches!(encode(&clash), Err(CodecError::AmbiguousFilterKey(_))));
    }

    #[test]
    fn test_non_finite_option_value_is_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let state = QueryState {
                page: 3,
                filters: Some(Filters::new().with("rate", SelectOption::new("n", value))),
                ..Default::default()
            };
            assert!(matches!(encode(&state), Err(CodecError::NonFiniteValue(label)) if label == "n"));
        }

        let multi = QueryState {
            filters: Some(Filters::new().with(
                "rates",
                vec![SelectOption::new("ok", 1.5), SelectOption::new("bad", f64::NAN)],
            )),
            ..Default::default()
        };
        assert!(matches!(encode(&multi), Err(CodecError::NonFiniteValue(label)) if label == "bad"));

        let finite = QueryState {
            filters: Some(Filters::new().with("rate", SelectOption::new("half", 0.5))),
            ..Default::default()
        };
        assert_eq!(decode(&encode(&finite).unwrap()).unwrap(), finite);
    }

    #[test]
    fn test_unknown_top_level_keys_are_ignored() {
        let json = r#"{"page":4,"limit":20,"legacy":true,"view":{"mode":"grid"}}"#;
        let token = URL_SAFE_NO_PAD.encode(urlencoding::encode(json).as_bytes());

        let patch = decode_patch(&token).unwrap();
        assert_eq!(patch.page, Some(4));
        assert_eq!(patch.limit, Some(20));
        assert_eq!(patch.filters, None);

        let state = patch.apply_to(QueryState::default());
        let payload = payload_of(&encode(&state).unwrap());
        assert_eq!(payload, json!({"page": 4, "limit": 20}));
    }
}
