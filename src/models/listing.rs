use std::fmt;

use uuid::Uuid;

/// Placeholder used when a listing carries no requirement text.
pub const NO_DESCRIPTION: &str = "Description not specified";

/// A normalized job listing as the rest of the crate sees it.
///
/// The on-disk shape lives in [`crate::store`]; this type never touches serde
/// so the field names here stay independent of the file format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub link: String,
    /// 0 means the salary was not given.
    pub salary: u64,
    pub description: String,
}

/// User-entered listing before defaults are applied.
#[derive(Debug, Default, Clone)]
pub struct CreateListing {
    pub id: Option<String>,
    pub title: String,
    pub link: String,
    pub salary: u64,
    pub description: String,
}

impl From<CreateListing> for Listing {
    fn from(input: CreateListing) -> Self {
        let id = input
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let link = if input.link.trim().is_empty() {
            "#".to_string()
        } else {
            input.link
        };

        let description = if input.description.trim().is_empty() {
            NO_DESCRIPTION.to_string()
        } else {
            input.description
        };

        Listing {
            id,
            title: input.title,
            link,
            salary: input.salary,
            description,
        }
    }
}

impl Listing {
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "{rule}")?;
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "URL: {}", self.link)?;
        if self.salary > 0 {
            writeln!(f, "Salary: {}", self.salary)?;
        } else {
            writeln!(f, "Salary: not specified")?;
        }
        writeln!(f, "Description: {}", self.description)?;
        write!(f, "{rule}")
    }
}
