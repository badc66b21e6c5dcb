// Export: PDF reports and the system clipboard.
// PDF layout and rendering are CPU-bound and run inside tokio::task::spawn_blocking.

pub mod clipboard;
pub mod metrics;
pub mod pdf;

pub use clipboard::{copy_best_effort, copy_to_clipboard};
pub use pdf::export_pdf;
