use std::io;

use clap::Parser;
use jobshelf::collectors::{get_source, runner};
use jobshelf::config::{Command, Config};
use jobshelf::error::AppError;
use jobshelf::menu::Menu;
use jobshelf::models::listing::{CreateListing, Listing};
use jobshelf::query::Shelf;
use jobshelf::store::RecordStore;
use tracing_subscriber::EnvFilter;

fn print_listings(listings: &[Listing]) {
    if listings.is_empty() {
        println!("No listings found.");
    }
    for listing in listings {
        println!("{listing}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jobshelf=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::parse();
    let shelf = Shelf::new(RecordStore::new(&config.store));
    let source = get_source("hh", &config)?
        .ok_or_else(|| anyhow::anyhow!("Unknown listing source: hh"))?;

    tracing::info!("Using store {}", shelf.store().path().display());

    match config.resolved_command() {
        Command::Menu => {
            let stdin = io::stdin();
            Menu::new(&shelf, &*source, config.per_page, stdin.lock(), io::stdout())
                .run()
                .await?;
        }
        Command::Fetch { keyword, pages } => {
            let report =
                runner::collect(&*source, shelf.store(), &keyword, pages, config.per_page).await?;
            if let Some(reason) = &report.aborted {
                eprintln!("Fetching stopped early: {reason}");
            }
            println!(
                "Loaded {} listings ({} new).",
                report.listings.len(),
                report.new
            );
        }
        Command::Search { keyword } => print_listings(&shelf.search(&keyword)),
        Command::Top { n } => print_listings(&shelf.top_by_salary(n)),
        Command::Add {
            title,
            url,
            salary,
            description,
            id,
        } => {
            let listing = Listing::from(CreateListing {
                id,
                title,
                link: url,
                salary,
                description,
            });
            if shelf.add(&listing)? {
                println!("Listing {} added.", listing.id);
            } else {
                println!("A listing with id {} already exists.", listing.id);
            }
        }
        Command::Delete { id } => {
            if !shelf.delete(&id)? {
                return Err(AppError::NotFound(format!("Listing {id}")).into());
            }
            println!("Listing deleted.");
        }
    }

    Ok(())
}
