// Terminal rendering: markdown-light text, platform previews, brand kit display,
// clipboard formatting, and the history listing. Pure functions over strings.

pub mod brand_kit;
pub mod clipboard_text;
pub mod history;
pub mod markdown;
pub mod previews;

pub use brand_kit::render_brand_kit;
pub use clipboard_text::clipboard_text;
pub use markdown::render_markdown;
pub use previews::preview_for;
