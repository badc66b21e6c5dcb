use crate::config::Config;
use crate::errors::AppError;
use crate::history::{HistoryStore, JsonFileStorage};
use crate::llm_client::LlmClient;

/// Everything a command needs, built once per invocation.
pub struct AppState {
    pub config: Config,
    /// `None` when no API key is configured. History commands still work.
    pub llm: Option<LlmClient>,
    pub history: HistoryStore,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let llm = LlmClient::from_config(&config)?;
        let history = HistoryStore::open(Box::new(JsonFileStorage::new(&config.history_path)));

        Ok(Self {
            config,
            llm,
            history,
        })
    }

    /// The LLM client, or the missing-key configuration error.
    pub fn llm(&self) -> Result<&LlmClient, AppError> {
        self.llm.as_ref().ok_or_else(AppError::missing_api_key)
    }
}
