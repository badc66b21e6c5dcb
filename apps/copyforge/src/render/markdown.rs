//! Markdown-light rendering of model output for the terminal.
//!
//! Only the handful of constructs the prompts ask for are recognized: headers,
//! numbered items, bullets and inline `**bold**` / `__bold__`. Everything else is
//! passed through as a paragraph.

use std::sync::LazyLock;

use regex::Regex;

static DOUBLE_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("invalid regex"));

static DOUBLE_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.*?)__").expect("invalid regex"));

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n+").expect("invalid regex"));

static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s*(.*)$").expect("invalid regex"));

static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*•]\s+(.*)$").expect("invalid regex"));

/// Leading emoji the brand kit template puts on its section headers.
pub const SECTION_EMOJI: [&str; 5] = ["🎨", "🎯", "🧾", "🗣️", "📢"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Blank,
    Header(String),
    Numbered { number: String, text: String },
    Bullet(String),
    Paragraph(String),
}

/// Classifies one line of model output. Inline emphasis is stripped from the text.
pub fn classify_line(line: &str) -> Block {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Block::Blank;
    }

    if trimmed.starts_with('#') {
        let title = trimmed.trim_start_matches('#').trim();
        return Block::Header(strip_bold(title));
    }
    if let Some(emoji) = SECTION_EMOJI.iter().find(|e| trimmed.starts_with(**e)) {
        let title = trimmed[emoji.len()..].trim();
        return Block::Header(strip_bold(title));
    }

    if let Some(caps) = NUMBERED.captures(trimmed) {
        return Block::Numbered {
            number: caps[1].to_string(),
            text: strip_bold(&caps[2]),
        };
    }
    if let Some(caps) = BULLET.captures(trimmed) {
        return Block::Bullet(strip_bold(&caps[1]));
    }

    Block::Paragraph(strip_bold(trimmed))
}

/// Removes `**x**` and `__x__` markers, keeping the inner text.
pub fn strip_bold(text: &str) -> String {
    let text = DOUBLE_STAR.replace_all(text, "$1");
    DOUBLE_UNDERSCORE.replace_all(&text, "$1").into_owned()
}

/// Strips bold markers, collapses runs of blank lines to one, and trims.
pub fn strip_emphasis(text: &str) -> String {
    collapse_blank_lines(&strip_bold(text), "\n\n")
}

/// Replaces every run of two or more newlines with `separator`, then trims.
pub(crate) fn collapse_blank_lines(text: &str, separator: &str) -> String {
    BLANK_RUN.replace_all(text, separator).trim().to_string()
}

/// Renders model output as plain terminal text.
pub fn render_markdown(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut last_blank = true;

    for line in text.lines() {
        let block = classify_line(line);
        match block {
            Block::Blank => {
                if !last_blank {
                    out.push(String::new());
                }
                last_blank = true;
                continue;
            }
            Block::Header(title) => {
                if !last_blank {
                    out.push(String::new());
                }
                let underline = "─".repeat(title.chars().count().max(3));
                out.push(title);
                out.push(underline);
            }
            Block::Numbered { number, text } => out.push(format!("  {number}. {text}")),
            Block::Bullet(text) => out.push(format!("  • {text}")),
            Block::Paragraph(text) => out.push(text),
        }
        last_blank = false;
    }

    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}
