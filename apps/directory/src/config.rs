use std::path::PathBuf;

use anyhow::{Context, Result};
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:5240/api";
const DEFAULT_SITE_URL: &str = "http://localhost:5240/";
const DEFAULT_EMAIL_DOMAINS: &str = "gmail.com";
const DEFAULT_STORAGE_PATH: &str = ".directory/local-storage.json";

/// Client configuration loaded from environment variables.
/// Every variable has a default; malformed URLs fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base of the backend API, e.g. `http://localhost:5240/api`.
    pub api_url: Url,
    /// Base that share and detail links are resolved against.
    pub site_url: Url,
    /// Email domains accepted by the editor's locate step.
    pub email_domains: Vec<String>,
    /// File standing in for browser local storage.
    pub storage_path: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_url = env_or("DIRECTORY_API_URL", DEFAULT_API_URL);
        let site_url = env_or("DIRECTORY_SITE_URL", DEFAULT_SITE_URL);

        Ok(Config {
            api_url: Url::parse(&api_url)
                .with_context(|| format!("DIRECTORY_API_URL '{api_url}' is not a valid URL"))?,
            site_url: Url::parse(&site_url)
                .with_context(|| format!("DIRECTORY_SITE_URL '{site_url}' is not a valid URL"))?,
            email_domains: parse_domains(&env_or("DIRECTORY_EMAIL_DOMAINS", DEFAULT_EMAIL_DOMAINS)),
            storage_path: PathBuf::from(env_or("DIRECTORY_STORAGE_PATH", DEFAULT_STORAGE_PATH)),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Splits a comma list of domains, dropping any leading `@` and blanks.
fn parse_domains(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|d| d.trim().trim_start_matches('@').to_lowercase())
        .filter(|d| !d.is_empty())
        .collect()
}
