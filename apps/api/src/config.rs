use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Optional JSON seed file for the furniture catalog (storage-side records).
    pub catalog_seed_path: Option<String>,
    /// Optional path for the persisted project session state.
    pub state_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            catalog_seed_path: std::env::var("CATALOG_SEED_PATH").ok(),
            state_path: std::env::var("STATE_PATH").ok(),
        })
    }
}
