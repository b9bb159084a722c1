// Environment, dotenv and tracing setup
pub mod config;

// Content crew: personas, stage prompts, pipeline, output
pub mod crew;

// Chat model client
pub mod llm;

// HTTP API
pub mod server;

// Search and scrape tools
pub mod tools;

// Stage/agent/batch execution helpers
pub mod workflow_utils;
