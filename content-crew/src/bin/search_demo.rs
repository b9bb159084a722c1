//! Try the search and scrape tools without running the crew
//!
//! Searches for a query, lists the results and optionally scrapes one of them
//! into `scraped_content_<query>.txt`.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;

use content_crew::config;
use content_crew::crew::{cli::Prompter, output};
use content_crew::tools::{search::render_results, PageScraper, SearchProvider, SerperSearch, WebScraper};
use content_crew_sdk::{log_file_saved, log_info, log_warning};

#[derive(Parser, Debug)]
#[command(name = "search-demo")]
struct DemoArgs {
    /// Query to search for (prompted when omitted)
    query: Option<String>,

    /// Number of results to show
    #[arg(short, long, default_value = "5")]
    num_results: usize,

    /// Directory for the scraped text file
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = DemoArgs::parse();

    config::load_dotenv()?;
    config::init_tracing("warn");
    content_crew_sdk::set_event_output(false);
    let serper_key = config::serper_key_from_env()?;

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let query = match args.query {
        Some(query) => query,
        None => prompter.ask_required("Enter your search query: ")?,
    };

    log_info!("Searching for: {}", query);
    let search = SerperSearch::new(serper_key)?;
    let results = search.search(&query, args.num_results).await?;

    println!("\n=== Search Results ===\n");
    println!("{}", render_results(&results));

    let choice =
        prompter.ask("\nEnter the number of the result you want to scrape (or press Enter to skip): ")?;
    if choice.is_empty() {
        return Ok(());
    }

    let selected = choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| results.get(index));
    let Some(result) = selected else {
        log_warning!("Invalid result number.");
        return Ok(());
    };

    log_info!("Scraping website: {}", result.link);
    let content = WebScraper::new()?.scrape(&result.link).await?;

    println!("\n=== Scraped Content Preview ===");
    println!("{}\n", output::preview(&content));

    tokio::fs::create_dir_all(&args.output_dir).await?;
    let path = args.output_dir.join(output::scraped_filename(&query));
    tokio::fs::write(&path, &content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log_file_saved!(path.display());

    Ok(())
}
