use tracing::{debug, warn};

use crate::errors::AppError;

/// Places `text` on the system clipboard.
///
/// Opening a display connection can block for seconds on a headless machine, so
/// the work runs on the blocking pool. On X11/Wayland arboard hands the selection
/// to a running clipboard manager when the handle is dropped.
pub async fn copy_to_clipboard(text: String) -> Result<(), AppError> {
    tokio::task::spawn_blocking(move || set_clipboard_text(&text))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in clipboard copy: {e}")))?
}

/// Clipboard copy as a side step of another command: failure is logged, not returned.
/// Returns whether the text was copied.
pub async fn copy_best_effort(text: String) -> bool {
    report_copy(copy_to_clipboard(text).await)
}

fn report_copy(result: Result<(), AppError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("Output was not copied: {e}");
            false
        }
    }
}

fn set_clipboard_text(text: &str) -> Result<(), AppError> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| AppError::Clipboard(format!("Clipboard unavailable: {e}")))?;

    clipboard
        .set_text(text.to_owned())
        .map_err(|e| AppError::Clipboard(format!("Failed to copy: {e}")))?;

    debug!("Copied {} bytes to clipboard", text.len());
    Ok(())
}
