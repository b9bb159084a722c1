//! HTTP front end for the content crew
//!
//! ```text
//! cargo run --bin content-api -- --port 5000
//! curl -X POST localhost:5000/api/generate-content \
//!   -H 'Content-Type: application/json' \
//!   -d '{"contentType":"blog","topic":"Rust","targetAudience":"developers","tone":"casual"}'
//! ```

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use content_crew::config::{self, ApiKeys};
use content_crew::crew::{ContentCrew, CrewConfig};
use content_crew::server::{self, ServeArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServeArgs::parse();

    config::load_dotenv()?;
    config::init_tracing("info,tower_http=debug");

    // The terminal belongs to tracing here.
    content_crew_sdk::set_event_output(false);
    content_crew_sdk::set_console_output(false);

    let keys = ApiKeys::from_env()?;
    let crew_config = CrewConfig {
        model: args.model.clone(),
        base_url: args.base_url.clone(),
        ..CrewConfig::default()
    };
    let crew = Arc::new(ContentCrew::from_config(&keys, &crew_config)?);

    let listener = args.bind().await?;
    server::serve(crew, listener).await
}
