use crate::collectors::{ListingSource, PageRequest};
use crate::error::AppError;
use crate::models::listing::Listing;
use crate::store::RecordStore;

/// Hard cap on pages fetched per search, whatever the caller asks for.
pub const MAX_PAGES: u32 = 20;

/// Outcome of a fetch: listings collected before paging stopped, and the
/// error that stopped it early, if any.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub listings: Vec<Listing>,
    pub new: usize,
    pub aborted: Option<String>,
}

/// Fetch up to `pages` pages (capped at [`MAX_PAGES`]) for `keyword`, saving
/// every listing to `store` as soon as its page arrives.
///
/// A transport failure stops paging; listings from earlier pages are kept.
/// Any other error, including a failed store write, is returned.
///
/// Store calls are plain blocking file I/O; the shelf is a small single-user
/// file.
pub async fn collect(
    source: &dyn ListingSource,
    store: &RecordStore,
    keyword: &str,
    pages: u32,
    per_page: u32,
) -> Result<FetchReport, AppError> {
    let mut report = FetchReport::default();

    for page in 0..pages.min(MAX_PAGES) {
        let request = PageRequest {
            text: keyword.to_string(),
            page,
            per_page,
        };

        let listings = match source.fetch_page(&request).await {
            Ok(listings) => listings,
            Err(e) if e.is_transport() => {
                tracing::warn!("{} page {page} failed, stopping: {e}", source.name());
                report.aborted = Some(e.to_string());
                break;
            }
            Err(e) => return Err(e),
        };
        tracing::debug!("{} page {page}: {} listings", source.name(), listings.len());

        for listing in listings {
            if store.append(&listing)? {
                report.new += 1;
            }
            report.listings.push(listing);
        }
    }

    tracing::info!(
        "Fetched {} listings for '{keyword}' from {} ({} new)",
        report.listings.len(),
        source.name(),
        report.new
    );
    Ok(report)
}
