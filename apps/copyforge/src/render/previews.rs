//! Platform mock-ups for generated copy: an Instagram post, a sponsored Facebook
//! post, and a Gmail message. Landing pages and brand kits have no preview.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::generation::content_type::ContentType;
use crate::render::markdown::{collapse_blank_lines, strip_bold, strip_emphasis};

pub const DEFAULT_SENDER_NAME: &str = "Your Name";
pub const DEFAULT_SENDER_EMAIL: &str = "you@company.com";
pub const DEFAULT_RECIPIENT_EMAIL: &str = "prospect@company.com";

static SUBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Subject:\s*(.+)").expect("invalid regex"));

static SUBJECT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Subject:\s*.+\n?").expect("invalid regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Instagram {
        username: String,
        caption: String,
    },
    Facebook {
        page_name: String,
        body: String,
    },
    Gmail {
        sender_name: String,
        sender_email: String,
        recipient_email: String,
        subject: String,
        body: String,
    },
}

/// Picks the preview for a content type, if it has one.
pub fn preview_for(
    content_type: ContentType,
    product_name: &str,
    content: &str,
) -> Option<Preview> {
    match content_type {
        ContentType::InstagramCaption => Some(Preview::Instagram {
            username: instagram_username(product_name),
            caption: instagram_caption(content),
        }),
        ContentType::FacebookAd => Some(Preview::Facebook {
            page_name: product_name.to_string(),
            body: strip_emphasis(content),
        }),
        ContentType::ColdEmail => Some(Preview::Gmail {
            sender_name: DEFAULT_SENDER_NAME.to_string(),
            sender_email: DEFAULT_SENDER_EMAIL.to_string(),
            recipient_email: DEFAULT_RECIPIENT_EMAIL.to_string(),
            subject: extract_subject(content, product_name),
            body: extract_email_body(content),
        }),
        ContentType::LandingPage | ContentType::BrandKit => None,
    }
}

/// Lowercased product name with whitespace runs replaced by `_`.
pub fn instagram_username(product_name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&product_name.to_lowercase(), "_")
        .into_owned()
}

/// The first line or sentence of the caption, emphasis removed.
pub fn instagram_caption(content: &str) -> String {
    let cleaned = collapse_blank_lines(&strip_bold(content), "\n");
    cleaned
        .split('\n')
        .flat_map(|line| line.split(". "))
        .find(|fragment| !fragment.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Text after the first `Subject:`, or a subject built from the product name.
pub fn extract_subject(content: &str, product_name: &str) -> String {
    match SUBJECT.captures(content) {
        Some(caps) => caps[1].trim().to_string(),
        None => format!("Introducing {product_name} - Perfect Solution for Your Business"),
    }
}

/// The email with its first subject line removed and emphasis stripped.
pub fn extract_email_body(content: &str) -> String {
    let body = SUBJECT_LINE.replace(content, "");
    strip_emphasis(&body)
}

/// First letter of each space-separated word, uppercased.
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

fn avatar_letter(name: &str) -> String {
    name.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default()
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preview::Instagram { username, caption } => {
                writeln!(f, "┌ Instagram")?;
                writeln!(f, "│ ({}) {username}", avatar_letter(username))?;
                writeln!(f, "│ [ product image ]")?;
                writeln!(f, "│ ♡  💬  ➤")?;
                write!(f, "└ {username} {caption}")
            }
            Preview::Facebook { page_name, body } => {
                writeln!(f, "┌ Facebook")?;
                writeln!(f, "│ ({}) {page_name}", avatar_letter(page_name))?;
                writeln!(f, "│ Sponsored")?;
                for line in body.lines() {
                    writeln!(f, "│ {line}")?;
                }
                write!(f, "└ Like · Comment · Share")
            }
            Preview::Gmail {
                sender_name,
                sender_email,
                recipient_email,
                subject,
                body,
            } => {
                writeln!(f, "┌ Gmail")?;
                writeln!(f, "│ Subject: {subject}")?;
                writeln!(
                    f,
                    "│ ({}) {sender_name} <{sender_email}>",
                    initials(sender_name)
                )?;
                writeln!(f, "│ to {recipient_email}")?;
                writeln!(f, "│")?;
                for line in body.lines() {
                    writeln!(f, "│ {line}")?;
                }
                write!(f, "└ Reply · Forward")
            }
        }
    }
}
