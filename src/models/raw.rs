use serde::Deserialize;

use crate::models::listing::{Listing, NO_DESCRIPTION};

/// One item of the listings API `items` array.
#[derive(Debug, Deserialize)]
pub struct RawListing {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub alternate_url: Option<String>,
    #[serde(default)]
    pub salary: Option<RawSalary>,
    #[serde(default)]
    pub snippet: Option<RawSnippet>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSalary {
    #[serde(default)]
    pub from: Option<f64>,
    #[serde(default)]
    pub to: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RawSnippet {
    #[serde(default)]
    pub requirement: Option<String>,
}

/// Upper bound wins when present and non-zero, then the lower bound, then 0.
/// Non-positive bounds count as absent.
pub fn normalize_salary(salary: Option<&RawSalary>) -> u64 {
    let Some(salary) = salary else {
        return 0;
    };
    let positive = |v: Option<f64>| v.filter(|v| *v >= 1.0).map(|v| v as u64);
    positive(salary.to).or(positive(salary.from)).unwrap_or(0)
}

impl From<RawListing> for Listing {
    fn from(raw: RawListing) -> Self {
        let salary = normalize_salary(raw.salary.as_ref());
        let description = raw
            .snippet
            .and_then(|s| s.requirement)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        Listing {
            id: raw.id,
            title: raw.name,
            link: raw.alternate_url.unwrap_or_default(),
            salary,
            description,
        }
    }
}
