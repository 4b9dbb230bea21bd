pub mod listing;
pub mod raw;
