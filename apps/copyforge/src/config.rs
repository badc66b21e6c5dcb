use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str = "https://api.intelligence.io.solutions/api/v1/chat/completions";
pub const DEFAULT_TEXT_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct";
pub const DEFAULT_VISION_MODEL: &str = "meta-llama/Llama-3.2-90B-Vision-Instruct";

/// Application configuration loaded from environment variables.
///
/// The API key is optional at load time so that history commands work offline.
/// Generation commands fail with a configuration error when it is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_url: String,
    pub text_model: String,
    pub vision_model: String,
    /// No timeout unless explicitly configured.
    pub request_timeout_secs: Option<u64>,
    pub history_path: PathBuf,
    pub export_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let request_timeout_secs = match get("IO_REQUEST_TIMEOUT_SECS") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .context("IO_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => None,
        };

        let history_path = match get("COPYFORGE_HISTORY_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_history_path(),
        };

        Ok(Config {
            api_key: get("IO_INTELLIGENCE_API_KEY"),
            api_url: get("IO_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            text_model: get("IO_MODEL_ID").unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            vision_model: get("IO_VISION_MODEL_ID")
                .unwrap_or_else(|| DEFAULT_VISION_MODEL.to_string()),
            request_timeout_secs,
            history_path,
            export_dir: get("COPYFORGE_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn default_history_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("copyforge")
        .join("history.json")
}
