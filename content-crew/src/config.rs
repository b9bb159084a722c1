//! Environment and process setup shared by the binaries

use std::fmt;
use thiserror::Error;
use tracing_subscriber::{fmt as tracing_fmt, prelude::*, EnvFilter};

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const SERPER_API_KEY: &str = "SERPER_API_KEY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not found in environment variables. Please check your .env file.")]
    MissingVar(&'static str),
}

/// The two credentials every binary needs before it does anything else.
#[derive(Clone)]
pub struct ApiKeys {
    pub openai: String,
    pub serper: String,
}

impl ApiKeys {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve keys through `lookup`. Absent and blank values are both rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai = required(&lookup, OPENAI_API_KEY)?;
        let serper = required(&lookup, SERPER_API_KEY)?;
        Ok(Self { openai, serper })
    }
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeys")
            .field("openai", &"<redacted>")
            .field("serper", &"<redacted>")
            .finish()
    }
}

/// Only the search key, for binaries that never call the model.
pub fn serper_key_from_env() -> Result<String, ConfigError> {
    required(&|name: &str| std::env::var(name).ok(), SERPER_API_KEY)
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

/// Load `.env` from the working directory. A missing file is not an error.
pub fn load_dotenv() -> anyhow::Result<()> {
    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(anyhow::anyhow!("Failed to load .env file: {}", e)),
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(tracing_fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
