//! JSON file shelf holding every saved listing.
//!
//! Each operation reads the whole array, works on it in memory and, for
//! mutations, writes the whole array back. There is no locking: two processes
//! writing the same file concurrently can lose updates (last writer wins).
//!
//! Elements that do not decode as a listing are hidden from reads but kept
//! as-is when the array is written back.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::models::listing::Listing;

/// On-disk record. `name`/`url`/`requirement` are the file's field names.
#[derive(Debug, Serialize, Deserialize)]
struct StoredListing {
    id: String,
    name: String,
    url: String,
    #[serde(default, deserialize_with = "salary_or_zero")]
    salary: u64,
    #[serde(default)]
    requirement: String,
}

fn salary_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let salary = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    Ok(if salary > 0.0 { salary as u64 } else { 0 })
}

impl From<StoredListing> for Listing {
    fn from(s: StoredListing) -> Self {
        Listing {
            id: s.id,
            title: s.name,
            link: s.url,
            salary: s.salary,
            description: s.requirement,
        }
    }
}

impl From<&Listing> for StoredListing {
    fn from(l: &Listing) -> Self {
        StoredListing {
            id: l.id.clone(),
            name: l.title.clone(),
            url: l.link.clone(),
            salary: l.salary,
            requirement: l.description.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append unless a listing with the same id is already stored.
    /// Returns whether the listing was written.
    pub fn append(&self, listing: &Listing) -> Result<bool, AppError> {
        let mut entries = self.load();
        if entries.iter().any(|e| entry_id(e) == Some(listing.id.as_str())) {
            tracing::debug!("Listing {} already stored, skipping", listing.id);
            return Ok(false);
        }
        entries.push(serde_json::to_value(StoredListing::from(listing))?);
        self.save(&entries)?;
        Ok(true)
    }

    /// Listings matching `predicate`, in file order.
    pub fn filter<F>(&self, predicate: F) -> Vec<Listing>
    where
        F: Fn(&Listing) -> bool,
    {
        self.load()
            .iter()
            .filter_map(decode)
            .filter(|l| predicate(l))
            .collect()
    }

    pub fn all(&self) -> Vec<Listing> {
        self.filter(|_| true)
    }

    /// Remove every listing with `id`. The file is rewritten only when
    /// something was removed.
    pub fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut entries = self.load();
        let before = entries.len();
        entries.retain(|e| entry_id(e) != Some(id));
        if entries.len() == before {
            return Ok(false);
        }
        self.save(&entries)?;
        tracing::info!("Deleted listing {id} from {}", self.path.display());
        Ok(true)
    }

    /// Raw array elements. Empty when the file is absent, unreadable, or not
    /// a JSON array.
    fn load(&self) -> Vec<Value> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}", self.path.display());
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Value>>(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "Ignoring malformed store {}: {e}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    fn save(&self, entries: &[Value]) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}

fn decode(entry: &Value) -> Option<Listing> {
    match StoredListing::deserialize(entry) {
        Ok(stored) => Some(stored.into()),
        Err(e) => {
            tracing::warn!("Skipping undecodable stored listing: {e}");
            None
        }
    }
}
