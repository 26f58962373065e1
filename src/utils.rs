pub mod app_state;
pub mod config;
pub mod dog_store;
pub mod errors;
pub mod hx_utils;
pub mod selection;
pub mod templates;
