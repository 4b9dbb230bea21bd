//! Interactive text menu over the shelf and a listing source.
//!
//! Every action reports its own failure and returns to the menu; only a
//! broken terminal (I/O error on the menu streams) or end of input ends the
//! loop.

use std::io::{self, BufRead, Write};

use crate::collectors::ListingSource;
use crate::collectors::runner;
use crate::models::listing::{CreateListing, Listing};
use crate::query::Shelf;

const MENU: &str = "\nJob listings shelf
1. Add a listing
2. Search listings by keyword
3. Show top N listings by salary
4. Delete a listing
5. Fetch listings from the API
6. Exit";

pub struct Menu<'a, R, W> {
    shelf: &'a Shelf,
    source: &'a dyn ListingSource,
    per_page: u32,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(
        shelf: &'a Shelf,
        source: &'a dyn ListingSource,
        per_page: u32,
        input: R,
        output: W,
    ) -> Self {
        Self {
            shelf,
            source,
            per_page,
            input,
            output,
        }
    }

    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("\nChoose an action: ")? else {
                return Ok(());
            };

            let keep_going = match choice.as_str() {
                "1" => self.add()?,
                "2" => self.search()?,
                "3" => self.top()?,
                "4" => self.delete()?,
                "5" => self.fetch().await?,
                "6" => {
                    writeln!(self.output, "Bye.")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Unknown choice, try again.")?;
                    true
                }
            };
            if !keep_going {
                return Ok(());
            }
        }
    }

    /// Print `message` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn print_listings(&mut self, heading: &str, listings: &[Listing]) -> io::Result<()> {
        if listings.is_empty() {
            return writeln!(self.output, "No listings found.");
        }
        writeln!(self.output, "\n{heading}")?;
        for listing in listings {
            writeln!(self.output, "\n{listing}")?;
        }
        Ok(())
    }

    // Each action returns Ok(false) when input ran out mid-dialog.

    fn add(&mut self) -> io::Result<bool> {
        let Some(title) = self.prompt("Title: ")? else {
            return Ok(false);
        };
        let Some(link) = self.prompt("URL: ")? else {
            return Ok(false);
        };
        let Some(salary) = self.prompt("Salary (0 if not specified): ")? else {
            return Ok(false);
        };
        let salary = match salary.parse::<u64>() {
            Ok(salary) => salary,
            Err(e) => {
                writeln!(self.output, "Invalid salary '{salary}': {e}")?;
                return Ok(true);
            }
        };
        let Some(description) = self.prompt("Description: ")? else {
            return Ok(false);
        };
        let Some(id) = self.prompt("Unique id (blank to generate): ")? else {
            return Ok(false);
        };

        let listing = Listing::from(CreateListing {
            id: Some(id),
            title,
            link,
            salary,
            description,
        });
        match self.shelf.add(&listing) {
            Ok(true) => writeln!(self.output, "Listing {} added.", listing.id)?,
            Ok(false) => writeln!(self.output, "A listing with id {} already exists.", listing.id)?,
            Err(e) => writeln!(self.output, "Failed to add listing: {e}")?,
        }
        Ok(true)
    }

    fn search(&mut self) -> io::Result<bool> {
        let Some(keyword) = self.prompt("Keyword: ")? else {
            return Ok(false);
        };
        let found = self.shelf.search(&keyword);
        self.print_listings("Found listings:", &found)?;
        Ok(true)
    }

    fn top(&mut self) -> io::Result<bool> {
        let Some(raw) = self.prompt("How many listings to show? ")? else {
            return Ok(false);
        };
        let Some(n) = self.positive_number(&raw)? else {
            return Ok(true);
        };
        let top = self.shelf.top_by_salary(n as usize);
        self.print_listings("Top listings by salary:", &top)?;
        Ok(true)
    }

    fn delete(&mut self) -> io::Result<bool> {
        let Some(id) = self.prompt("Id of the listing to delete: ")? else {
            return Ok(false);
        };
        match self.shelf.delete(&id) {
            Ok(true) => writeln!(self.output, "Listing deleted.")?,
            Ok(false) => writeln!(self.output, "Listing not found.")?,
            Err(e) => writeln!(self.output, "Failed to delete listing: {e}")?,
        }
        Ok(true)
    }

    async fn fetch(&mut self) -> io::Result<bool> {
        let Some(keyword) = self.prompt("Search keyword: ")? else {
            return Ok(false);
        };
        let Some(raw) = self.prompt(&format!(
            "How many pages to fetch ({} listings per page)? ",
            self.per_page
        ))?
        else {
            return Ok(false);
        };
        let Some(pages) = self.positive_number(&raw)? else {
            return Ok(true);
        };

        let report = match runner::collect(
            self.source,
            self.shelf.store(),
            &keyword,
            pages,
            self.per_page,
        )
        .await
        {
            Ok(report) => report,
            Err(e) => {
                writeln!(self.output, "Failed to fetch listings: {e}")?;
                return Ok(true);
            }
        };
        if let Some(reason) = &report.aborted {
            writeln!(self.output, "Fetching stopped early: {reason}")?;
        }
        writeln!(
            self.output,
            "Loaded {} listings ({} new).",
            report.listings.len(),
            report.new
        )?;
        Ok(true)
    }

    /// Parse a count that must be at least 1, reporting bad input to the user.
    fn positive_number(&mut self, raw: &str) -> io::Result<Option<u32>> {
        match raw.parse::<i64>() {
            Ok(n) if n > 0 => Ok(Some(u32::try_from(n).unwrap_or(u32::MAX))),
            Ok(_) => {
                writeln!(self.output, "The number must be positive.")?;
                Ok(None)
            }
            Err(e) => {
                writeln!(self.output, "Invalid number '{raw}': {e}")?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use async_trait::async_trait;
    use tempfile::TempDir;

    use super::*;
    use crate::collectors::PageRequest;
    use crate::error::AppError;
    use crate::store::RecordStore;

    struct OnePage;

    #[async_trait]
    impl ListingSource for OnePage {
        fn name(&self) -> &str {
            "one-page"
        }

        async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Listing>, AppError> {
            if request.page > 0 {
                return Err(AppError::UpstreamStatus(500));
            }
            Ok(vec![Listing {
                id: "remote-1".to_string(),
                title: format!("{} developer", request.text),
                link: "https://example.com/remote-1".to_string(),
                salary: 300,
                description: "Remote".to_string(),
            }])
        }
    }

    async fn run_script(script: &str) -> (TempDir, Shelf, String) {
        let dir = TempDir::new().unwrap();
        let shelf = Shelf::new(RecordStore::new(dir.path().join("vacancies.json")));
        let out = run_on(&shelf, script).await;
        (dir, shelf, out)
    }

    async fn run_on(shelf: &Shelf, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(shelf, &OnePage, 10, Cursor::new(script.to_string()), &mut output)
            .run()
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn add_then_search_and_top() {
        let script = "1\nRust dev\nhttps://a\n500\nTokio\nr1\n\
                      1\nGo dev\n\n700\n\ng1\n\
                      2\nrust\n\
                      3\n1\n\
                      6\n";
        let (_dir, shelf, out) = run_script(script).await;

        assert_eq!(shelf.store().all().len(), 2);
        assert!(out.contains("Listing r1 added."));
        assert!(out.contains("Title: Rust dev"));
        let top = out.split("Top listings by salary:").nth(1).unwrap();
        assert!(top.contains("Title: Go dev"));
        assert!(!top.contains("Title: Rust dev"));
        assert!(out.ends_with("Bye.\n"));
    }

    #[tokio::test]
    async fn bad_numbers_do_not_stop_the_loop() {
        let script = "1\nTitle\nurl\nlots\n3\nabc\n3\n-2\n5\nrust\n0\nx\n6\n";
        let (_dir, shelf, out) = run_script(script).await;

        assert!(shelf.store().all().is_empty());
        assert!(out.contains("Invalid salary 'lots'"));
        assert!(out.contains("Invalid number 'abc'"));
        assert_eq!(out.matches("The number must be positive.").count(), 2);
        assert!(out.contains("Unknown choice"));
        assert!(out.ends_with("Bye.\n"));
    }

    #[tokio::test]
    async fn delete_reports_missing() {
        let script = "1\nT\nu\n1\nd\nx1\n4\nx1\n4\nx1\n6\n";
        let (_dir, _shelf, out) = run_script(script).await;

        assert!(out.contains("Listing deleted."));
        assert!(out.contains("Listing not found."));
    }

    #[tokio::test]
    async fn fetch_reports_partial_results() {
        let (_dir, shelf, out) = run_script("5\nrust\n3\n").await;

        assert!(out.contains("Fetching stopped early"));
        assert!(out.contains("Loaded 1 listings (1 new)."));
        assert_eq!(shelf.search("rust").len(), 1);
    }

    #[tokio::test]
    async fn end_of_input_exits() {
        let (_dir, _shelf, out) = run_script("1\nOnly a title\n").await;
        assert!(out.contains("URL: "));
    }

    #[tokio::test]
    async fn store_failures_are_reported_and_loop_continues() {
        let dir = TempDir::new().unwrap();
        let shelf = Shelf::new(RecordStore::new(dir.path().join("missing").join("v.json")));

        let out = run_on(&shelf, "5\nrust\n1\n1\nT\nu\n1\nd\nx\n6\n").await;

        assert!(out.contains("Failed to fetch listings: Storage error"));
        assert!(out.contains("Failed to add listing: Storage error"));
        assert!(out.ends_with("Bye.\n"));
    }
}
