use async_trait::async_trait;
use serde_json::Value;

use crate::collectors::{ListingSource, PageRequest};
use crate::error::AppError;
use crate::models::listing::Listing;
use crate::models::raw::RawListing;

pub const DEFAULT_API_URL: &str = "https://api.hh.ru/vacancies";
pub const DEFAULT_USER_AGENT: &str = "HH-User-Agent";

/// HeadHunter vacancies API.
pub struct HeadHunter {
    client: reqwest::Client,
    base_url: String,
}

impl HeadHunter {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }
}

#[async_trait]
impl ListingSource for HeadHunter {
    fn name(&self) -> &str {
        "hh"
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Listing>, AppError> {
        let resp = self
            .client
            .get(&self.base_url)
            .header("Accept", "application/json")
            .query(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AppError::UpstreamStatus(resp.status().as_u16()));
        }

        let data: Value = resp.json().await?;
        Ok(parse_items(&data))
    }
}

/// Normalize the `items` array of a response body. A missing array is an
/// empty page; items that fail to decode are skipped.
pub fn parse_items(data: &Value) -> Vec<Listing> {
    let Some(items) = data.get("items").and_then(|v| v.as_array()) else {
        return Vec::new();
    };

    let mut listings = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<RawListing>(item.clone()) {
            Ok(raw) => listings.push(Listing::from(raw)),
            Err(e) => tracing::warn!("Skipping undecodable listing: {e}"),
        }
    }
    listings
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_items_is_empty_page() {
        assert!(parse_items(&json!({ "found": 0 })).is_empty());
    }

    #[test]
    fn bad_items_are_skipped() {
        let body = json!({
            "items": [
                { "name": "No id" },
                {
                    "id": "1",
                    "name": "Rust engineer",
                    "alternate_url": "https://hh.ru/vacancy/1",
                    "salary": { "from": 200000 }
                }
            ]
        });

        let listings = parse_items(&body);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, "1");
        assert_eq!(listings[0].salary, 200000);
    }

    #[test]
    fn float_salary_keeps_the_item() {
        let body = json!({
            "items": [{
                "id": "5",
                "name": "Data engineer",
                "alternate_url": "https://hh.ru/vacancy/5",
                "salary": { "from": 120000.0, "to": null }
            }]
        });

        let listings = parse_items(&body);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].salary, 120000);
    }

    #[test]
    fn page_request_serializes_as_query() {
        let request = PageRequest {
            text: "rust".to_string(),
            page: 3,
            per_page: 100,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({ "text": "rust", "page": 3, "per_page": 100 }));
    }
}
