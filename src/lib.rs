pub mod collectors;
pub mod config;
pub mod error;
pub mod menu;
pub mod models;
pub mod query;
pub mod store;
