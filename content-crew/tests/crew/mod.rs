//! Integration tests for the content crew
//!
//! Every external collaborator (chat model, search, scraper) is replaced by
//! the stubs in `common`, so these tests never touch the network.

mod common;
mod test_cli;
mod test_config;
mod test_output;
mod test_pipeline;
mod test_server;
