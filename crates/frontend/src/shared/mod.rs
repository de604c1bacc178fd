pub mod api_utils;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod downloads;
pub mod export;
pub mod list_utils;
