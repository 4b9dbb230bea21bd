use clap::Parser;

use crate::collectors::hh::{DEFAULT_API_URL, DEFAULT_USER_AGENT};

#[derive(Parser, Debug, Clone)]
#[command(name = "jobshelf", about = "Fetch job listings and keep them on a local shelf")]
pub struct Config {
    /// Path of the JSON file holding saved listings
    #[arg(long, env = "JOBSHELF_STORE", default_value = "vacancies.json")]
    pub store: String,

    /// Listings API endpoint
    #[arg(long, env = "JOBSHELF_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Listings requested per page
    #[arg(long, env = "JOBSHELF_PER_PAGE", default_value = "100")]
    pub per_page: u32,

    /// User-Agent header sent to the listings API
    #[arg(long, env = "JOBSHELF_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive menu (default when no subcommand given)
    Menu,
    /// Fetch listings from the API and save them
    Fetch {
        keyword: String,

        /// Number of pages to fetch (at most 20 are fetched)
        #[arg(long, default_value = "1")]
        pages: u32,
    },
    /// Search saved listings by keyword
    Search { keyword: String },
    /// Show the best-paid saved listings
    Top { n: usize },
    /// Save a listing by hand
    Add {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        url: String,

        #[arg(long, default_value = "0")]
        salary: u64,

        #[arg(long, default_value = "")]
        description: String,

        /// Generated when omitted
        #[arg(long)]
        id: Option<String>,
    },
    /// Delete a saved listing by id
    Delete { id: String },
}

impl Config {
    /// Resolve the command, defaulting to Menu if none specified.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_menu() {
        let config = Config::try_parse_from(["jobshelf", "--store", "x.json"]).unwrap();
        assert_eq!(config.resolved_command(), Command::Menu);
        assert_eq!(config.store, "x.json");
    }

    #[test]
    fn parses_fetch() {
        let config = Config::try_parse_from(["jobshelf", "fetch", "rust", "--pages", "3"]).unwrap();
        assert_eq!(
            config.resolved_command(),
            Command::Fetch {
                keyword: "rust".to_string(),
                pages: 3
            }
        );
    }

    #[test]
    fn rejects_negative_top() {
        assert!(Config::try_parse_from(["jobshelf", "top", "-1"]).is_err());
    }
}
