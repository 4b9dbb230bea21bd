// Listing sources: the trait every remote source implements, plus the
// paging runner that feeds fetched listings into the shelf.

pub mod hh;
pub mod runner;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::Config;
use crate::error::AppError;
use crate::models::listing::Listing;

/// Query for a single page. Built fresh for every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub text: String,
    pub page: u32,
    pub per_page: u32,
}

/// Trait that all listing sources must implement.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Human-readable source name.
    fn name(&self) -> &str;

    /// Fetch one page and normalize its items.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Listing>, AppError>;
}

/// Look up a listing source by name.
pub fn get_source(name: &str, config: &Config) -> Result<Option<Box<dyn ListingSource>>, AppError> {
    let source: Box<dyn ListingSource> = match name {
        "hh" => Box::new(hh::HeadHunter::new(&config.api_url, &config.user_agent)?),
        _ => return Ok(None),
    };
    Ok(Some(source))
}
