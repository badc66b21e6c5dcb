use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
///
/// Every variant maps to a stable code, a user-facing message, and a process exit
/// code so the CLI can report failures the same way regardless of where they arose.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// What the CLI shows for a failed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub code: &'static str,
    pub message: String,
    pub exit_code: u8,
}

impl AppError {
    pub fn missing_api_key() -> Self {
        AppError::Config(
            "API key not configured. Please add IO_INTELLIGENCE_API_KEY to your .env file."
                .to_string(),
        )
    }

    /// Maps the error to its user-facing report. Internal details are logged, not shown.
    pub fn report(&self) -> ErrorReport {
        let (code, message, exit_code) = match self {
            AppError::Config(msg) => ("CONFIG_ERROR", msg.clone(), 78),
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone(), 65),
            AppError::NotFound(msg) => ("NOT_FOUND", msg.clone(), 66),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                let message = match e {
                    LlmError::Api { status, .. } | LlmError::MissingCompletion { status } => {
                        format!(
                            "Failed to generate content (API status {status}). \
                            Please check your API key and try again."
                        )
                    }
                    LlmError::Http(_) => {
                        "Failed to reach the AI service. Please check your connection and try again."
                            .to_string()
                    }
                    LlmError::Parse(_) => {
                        "The AI returned a response that was not in the expected JSON format."
                            .to_string()
                    }
                };
                ("LLM_ERROR", message, 69)
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                ("STORAGE_ERROR", msg.clone(), 74)
            }
            AppError::Export(msg) => {
                tracing::error!("Export error: {msg}");
                ("EXPORT_ERROR", msg.clone(), 74)
            }
            AppError::Clipboard(msg) => ("CLIPBOARD_ERROR", msg.clone(), 74),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    70,
                )
            }
        };

        ErrorReport {
            code,
            message,
            exit_code,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}
