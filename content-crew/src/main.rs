/*
  CONTENT CREATION CREW

  Stage 1: RESEARCH       Research Specialist   search + scrape top results
  Stage 2: WRITE          Content Writer        draft in the requested format
  Stage 3: EDIT           Content Editor        polish, with change notes
  Stage 4: OPTIMIZE       SEO Specialist        keyword search + SEO report

  Output: <type>_<topic>_<timestamp>.md in --output-dir
          content_run_<timestamp>.yaml with --save-stages

EXAMPLE COMMANDS:

  # Interactive: answer four questions
  cargo run

  # Fully specified
  cargo run -- -t blog --topic "Home composting" -a "urban gardeners" --tone casual

  # Local Ollama model
  cargo run -- --base-url http://localhost:11434/v1 --model llama3.2

  # Field schema as JSON
  cargo run -- --workflow-metadata
*/

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::io;
use std::process::ExitCode;

use content_crew::config::{self, ApiKeys};
use content_crew::crew::{
    cli::{error_kind, Args, Prompter},
    output, ContentCrew, CrewConfig,
};
use content_crew_sdk::{log_error, log_file_saved, log_state_file, WorkflowDefinition};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Handle workflow metadata flag
    if args.workflow_metadata {
        args.print_metadata();
        return ExitCode::SUCCESS;
    }

    if let Err(e) = config::load_dotenv() {
        log_error!("{:#}", e);
        return ExitCode::FAILURE;
    }
    config::init_tracing("warn");
    content_crew_sdk::set_event_output(args.events);

    let keys = match ApiKeys::from_env() {
        Ok(keys) => keys,
        Err(e) => {
            log_error!(e);
            return ExitCode::FAILURE;
        }
    };

    match run(args, keys).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n❌ Error occurred: {}", error_kind(&e));
            eprintln!("Error message: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, keys: ApiKeys) -> Result<()> {
    println!("\n=== Content Creation Crew ===");
    println!("This application will generate a blog post or marketing material on your chosen topic.");

    let request = {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        prompter.collect_request(&args)?
    };

    let crew_config = CrewConfig::from(&args);
    let crew = ContentCrew::from_config(&keys, &crew_config)?;

    println!(
        "\nThe content creation crew is now working on your request with {}. This may take a few minutes...\n",
        crew.model_name()
    );
    let result = crew.kickoff(&request).await?;

    let now = Local::now();
    let path = output::save_content(&args.output_dir, &request, &result.raw, now)
        .await
        .context("Failed to save content")?;
    log_state_file!(path.display(), "Generated content");

    if args.save_stages {
        let record = output::save_run_record(&args.output_dir, &result, now).await?;
        log_state_file!(record.display(), "Stage outputs");
        log_file_saved!(record.display());
    }

    println!(
        "\nContent creation complete! Your content has been saved to {}",
        path.display()
    );
    println!("\nFinal Result:");
    println!("{}", result);

    Ok(())
}
