pub mod api_utils;
pub mod components;
pub mod list_utils;
pub mod request_state;
