use chrono::{DateTime, Local, TimeZone, Utc};

use crate::history::HistoryItem;

pub const EMPTY_HISTORY: &str = "No History Yet\n\
    Your generated content will appear here. Run `copyforge copy` or `copyforge brand-kit` to get started.";

/// `Oct 16, 14:05` style listing date, in the given zone.
pub fn listing_date<Tz: TimeZone>(item: &HistoryItem, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match item.created_at() {
        Some(at) => at.with_timezone(tz).format("%b %-d, %H:%M").to_string(),
        None => "unknown date".to_string(),
    }
}

/// The `history list` output.
pub fn render_history_list(items: &[HistoryItem]) -> String {
    render_history_list_in(items, &Local)
}

pub fn render_history_list_in<Tz: TimeZone>(items: &[HistoryItem], tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if items.is_empty() {
        return EMPTY_HISTORY.to_string();
    }

    let mut out = vec![format!("{} item(s) saved locally", items.len()), String::new()];
    for item in items {
        out.push(format!(
            "{}  [{}]  {}  id:{}",
            item.product_name,
            item.content_type.label(),
            listing_date(item, tz),
            item.id
        ));
    }
    out.join("\n")
}

/// The header block of `history show`.
pub fn render_item_header(item: &HistoryItem) -> String {
    let date = item
        .created_at()
        .map(|at: DateTime<Utc>| at.with_timezone(&Local).format("%B %-d, %Y %H:%M").to_string())
        .unwrap_or_else(|| "unknown date".to_string());
    format!(
        "{}\n{} · {}\nid:{}",
        item.product_name,
        item.content_type.label(),
        date,
        item.id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::content_type::ContentType;
    use crate::history::NewHistoryItem;

    fn item(name: &str, content_type: ContentType, ms: i64) -> HistoryItem {
        NewHistoryItem::new(name, content_type, "content").stamp(Utc.timestamp_millis_opt(ms).unwrap())
    }

    #[test]
    fn test_empty_history_guidance() {
        assert!(render_history_list(&[]).starts_with("No History Yet"));
    }

    #[test]
    fn test_listing_shows_count_label_date_and_id() {
        // 2024-03-05 09:07 UTC
        let items = vec![
            item("Glow", ContentType::BrandKit, 1_709_629_620_000),
            item("Lamp", ContentType::ColdEmail, 1_709_629_620_000),
        ];
        let listing = render_history_list_in(&items, &Utc);
        assert!(listing.starts_with("2 item(s) saved locally\n\n"));
        assert!(listing.contains("Glow  [Brand Kit]  Mar 5, 09:07  id:1709629620000"));
        assert!(listing.contains("Lamp  [Cold Email]"));
    }
}
