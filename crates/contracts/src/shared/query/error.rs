use std::string::FromUtf8Error;
use thiserror::Error;

/// Ошибки кодирования/декодирования состояния списка в URL
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid base64 token: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid option tuple: {0}")]
    InvalidOption(String),

    #[error("option `{0}` has a non-finite value")]
    NonFiniteValue(String),

    #[error("plain filter `{0}` would be read back as a select option")]
    AmbiguousFilterKey(String),
}
