use crate::error::AppError;
use crate::models::listing::Listing;
use crate::store::RecordStore;

/// Search and ranking over the shelf, used by the front end.
#[derive(Debug, Clone)]
pub struct Shelf {
    store: RecordStore,
}

impl Shelf {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Listings whose title or description contains `keyword`, ignoring case.
    pub fn search(&self, keyword: &str) -> Vec<Listing> {
        self.store.filter(|l| l.matches_keyword(keyword))
    }

    /// The `n` best-paid listings. Equal salaries keep insertion order.
    pub fn top_by_salary(&self, n: usize) -> Vec<Listing> {
        if n == 0 {
            return Vec::new();
        }
        let mut listings = self.store.all();
        listings.sort_by(|a, b| b.salary.cmp(&a.salary));
        listings.truncate(n);
        listings
    }

    pub fn add(&self, listing: &Listing) -> Result<bool, AppError> {
        self.store.append(listing)
    }

    pub fn delete(&self, id: &str) -> Result<bool, AppError> {
        self.store.delete(id)
    }
}
