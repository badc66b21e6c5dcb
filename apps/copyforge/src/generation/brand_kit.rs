//! Brand Kit Parser — turns free-form model output into a typed `BrandKitData`.
//!
//! The model is asked for `###` headers carrying the keywords THEME, AUDIENCE,
//! COLOR, VOICE, TAGLINE and MARKETING, but compliance is not guaranteed. Sections
//! are therefore located by keyword rather than position, and a missing section is
//! a normal outcome that yields an empty list. Nothing in this module fails.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A header line: two or three `#`, whitespace, then the header text.
static HEADER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{2,3}\s+(.*)$").expect("invalid header regex"));

static BULLET_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*•]\s*").expect("invalid bullet regex"));

/// `<label>: #RRGGBB`. The lazy label means the leftmost label that can reach the
/// hex code wins, so `Primary: Ocean Blue: #1E3A8A` yields `Ocean Blue`.
static COLOR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([A-Za-z0-9_\s]+?):\s*(#[A-F0-9]{6})\b").expect("invalid color regex")
});

pub const THEME_KEYWORD: &str = "THEME";
pub const AUDIENCE_KEYWORD: &str = "AUDIENCE";
pub const COLOR_KEYWORD: &str = "COLOR";
pub const VOICE_KEYWORD: &str = "VOICE";
pub const TAGLINE_KEYWORD: &str = "TAGLINE";
pub const MARKETING_KEYWORD: &str = "MARKETING";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSwatch {
    pub name: String,
    pub hex: String,
}

/// Structured brand kit. Every field is always present; an empty list means the
/// model produced nothing usable for that section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandKitData {
    pub theme: Vec<String>,
    pub audience: Vec<String>,
    pub colors: Vec<ColorSwatch>,
    pub voice: Vec<String>,
    pub taglines: Vec<String>,
    pub marketing: Vec<String>,
}

impl BrandKitData {
    pub fn is_empty(&self) -> bool {
        self.theme.is_empty()
            && self.audience.is_empty()
            && self.colors.is_empty()
            && self.voice.is_empty()
            && self.taglines.is_empty()
            && self.marketing.is_empty()
    }
}

/// Returns the body lines of the first `##`/`###` header whose text contains
/// `keyword` (case-insensitive).
///
/// The body runs until the next line starting with `##` or the end of the text.
/// Each body line has one leading bullet marker (`-`, `*`, `•`) removed and is
/// trimmed; blank lines are dropped.
pub fn extract_section(text: &str, keyword: &str) -> Vec<String> {
    let needle = keyword.to_lowercase();
    let mut lines = text.lines();

    let found = lines.by_ref().any(|line| {
        header_text(line).is_some_and(|header| header.to_lowercase().contains(&needle))
    });
    if !found {
        return Vec::new();
    }

    lines
        .take_while(|line| !starts_new_section(line))
        .filter_map(clean_line)
        .collect()
}

/// Extracts `name`/`hex` pairs from color section lines. Lines without a
/// `label: #RRGGBB` pattern (explanatory prose, psychology notes) are skipped.
pub fn parse_colors<S: AsRef<str>>(lines: &[S]) -> Vec<ColorSwatch> {
    lines
        .iter()
        .filter_map(|line| {
            let caps = COLOR_LINE.captures(line.as_ref())?;
            Some(ColorSwatch {
                name: caps[1].trim().to_string(),
                hex: caps[2].trim().to_string(),
            })
        })
        .collect()
}

/// Parses a generated brand kit. Garbage or empty input yields empty fields.
pub fn parse_brand_kit(content: &str) -> BrandKitData {
    let color_lines = extract_section(content, COLOR_KEYWORD);

    BrandKitData {
        theme: extract_section(content, THEME_KEYWORD),
        audience: extract_section(content, AUDIENCE_KEYWORD),
        colors: parse_colors(&color_lines),
        voice: extract_section(content, VOICE_KEYWORD),
        taglines: extract_section(content, TAGLINE_KEYWORD),
        marketing: extract_section(content, MARKETING_KEYWORD),
    }
}

fn header_text(line: &str) -> Option<&str> {
    HEADER_LINE
        .captures(line.trim_start())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn starts_new_section(line: &str) -> bool {
    line.trim_start().starts_with("##")
}

fn clean_line(line: &str) -> Option<String> {
    let stripped = BULLET_MARKER.replace(line, "");
    let trimmed = stripped.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLIANT_KIT: &str = "\
### 🎨 BRAND THEME & MOOD
- **Keywords:** Bold, Fresh, Playful
- **Visual Style:** Bright flat illustrations
- **Personality:** Witty, Warm

### 🎯 TARGET AUDIENCE
- **Demographic:** Urban millennials
- **Pain Points:** No time to cook

### 🎨 COLOR PALETTE
- Primary: #FF6B35
- Secondary: #004E89
- Accent: #F7C59F
- **Psychology:** Orange signals appetite and energy.

### 🧾 BRAND VOICE & TONE
- **Style:** Friendly, direct
- **Pillars:** Speed, Freshness

### 🗣️ TAGLINE SUGGESTIONS
- Dinner, done.
- Fresh in fifteen.
- Cook less, live more.

### 📢 MARKETING STRATEGIES
- **Online:** Instagram recipe reels
- **Offline:** Farmers market pop-ups
";

    #[test]
    fn test_missing_keyword_yields_empty_section() {
        let text = "### THEME\n- Bold\n### AUDIENCE\n- Everyone";
        assert!(extract_section(text, "MARKETING").is_empty());
        assert!(extract_section("no headers at all", "THEME").is_empty());
        assert!(extract_section("", "THEME").is_empty());
    }

    #[test]
    fn test_keyword_in_body_text_is_not_a_header() {
        let text = "Our THEME is great\n- not a section";
        assert!(extract_section(text, "THEME").is_empty());
    }

    #[test]
    fn test_last_section_runs_to_end_of_text() {
        let text = "### THEME\n- Bold\n### MARKETING STRATEGIES\n- Reels\n- Pop-ups\n\nFinal note";
        assert_eq!(
            extract_section(text, "MARKETING"),
            vec!["Reels", "Pop-ups", "Final note"]
        );
    }

    #[test]
    fn test_header_followed_by_header_is_empty() {
        let text = "### THEME\n### AUDIENCE\n- Students";
        assert!(extract_section(text, "THEME").is_empty());
        assert_eq!(extract_section(text, "AUDIENCE"), vec!["Students"]);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let text = "## Target audience\n- Students";
        assert_eq!(extract_section(text, "AUDIENCE"), vec!["Students"]);
    }

    #[test]
    fn test_two_and_three_hash_headers_both_anchor_and_terminate() {
        let text = "## THEME\n- Bold\n### AUDIENCE\n- Students\n## VOICE\n- Calm";
        assert_eq!(extract_section(text, "THEME"), vec!["Bold"]);
        assert_eq!(extract_section(text, "AUDIENCE"), vec!["Students"]);
        assert_eq!(extract_section(text, "VOICE"), vec!["Calm"]);
    }

    #[test]
    fn test_single_hash_is_not_a_header() {
        let text = "# THEME\n- Bold";
        assert!(extract_section(text, "THEME").is_empty());
    }

    #[test]
    fn test_first_matching_header_wins() {
        let text = "### COLOR PALETTE\n- Primary: #111111\n### COLOR NOTES\n- Secondary: #222222";
        assert_eq!(extract_section(text, "COLOR"), vec!["Primary: #111111"]);
    }

    #[test]
    fn test_bullet_markers_stripped_and_blank_lines_dropped() {
        let text = "### TAGLINE SUGGESTIONS\n-   Dinner, done.\n* Fresh in fifteen.\n•Cook less\n\n   \nPlain line  ";
        assert_eq!(
            extract_section(text, "TAGLINE"),
            vec!["Dinner, done.", "Fresh in fifteen.", "Cook less", "Plain line"]
        );
    }

    #[test]
    fn test_only_one_bullet_marker_is_stripped() {
        let text = "### THEME\n- - nested";
        assert_eq!(extract_section(text, "THEME"), vec!["- nested"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "### THEME\r\n- Bold\r\n### AUDIENCE\r\n- Students\r\n";
        assert_eq!(extract_section(text, "THEME"), vec!["Bold"]);
    }

    #[test]
    fn test_parse_colors_keeps_only_matching_lines() {
        let lines = vec![
            "Primary: #1E3A8A".to_string(),
            "Psychology: calming blues".to_string(),
            "Accent:#f59e0b".to_string(),
            "Neutral: #12345".to_string(),
        ];
        assert_eq!(
            parse_colors(&lines),
            vec![
                ColorSwatch {
                    name: "Primary".to_string(),
                    hex: "#1E3A8A".to_string()
                },
                ColorSwatch {
                    name: "Accent".to_string(),
                    hex: "#f59e0b".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_parse_colors_with_two_labels_takes_label_nearest_hex() {
        let swatches = parse_colors(&["Primary: Ocean Blue: #1E3A8A"]);
        assert_eq!(swatches.len(), 1);
        assert_eq!(swatches[0].name, "Ocean Blue");
        assert_eq!(swatches[0].hex, "#1E3A8A");
    }

    #[test]
    fn test_parse_colors_requires_six_digit_boundary() {
        assert!(parse_colors(&["Overlay: #1E3A8AFF"]).is_empty());
    }

    #[test]
    fn test_bold_labels_do_not_match_color_pattern() {
        // "**Primary:** #..." puts `**` between the colon and the hash.
        assert!(parse_colors(&["**Primary:** #1E3A8A"]).is_empty());
    }

    #[test]
    fn test_end_to_end_color_fixture() {
        let input = "### 🎨 COLOR PALETTE\n- Primary: Ocean Blue: #1E3A8A\n- Secondary: #F59E0B\n- Psychology: calming\n### 🧾 BRAND VOICE";
        let kit = parse_brand_kit(input);
        assert_eq!(
            kit.colors,
            vec![
                ColorSwatch {
                    name: "Ocean Blue".to_string(),
                    hex: "#1E3A8A".to_string()
                },
                ColorSwatch {
                    name: "Secondary".to_string(),
                    hex: "#F59E0B".to_string()
                },
            ]
        );
        assert!(kit.voice.is_empty());
        assert!(kit.theme.is_empty());
    }

    #[test]
    fn test_compliant_document_fills_every_field() {
        let kit = parse_brand_kit(COMPLIANT_KIT);
        assert_eq!(kit.theme.len(), 3);
        assert_eq!(kit.audience.len(), 2);
        assert_eq!(kit.colors.len(), 3);
        assert_eq!(kit.voice.len(), 2);
        assert_eq!(
            kit.taglines,
            vec!["Dinner, done.", "Fresh in fifteen.", "Cook less, live more."]
        );
        assert_eq!(kit.marketing.len(), 2);
        assert_eq!(kit.theme[0], "**Keywords:** Bold, Fresh, Playful");
        assert_eq!(kit.colors[0].hex, "#FF6B35");
    }

    #[test]
    fn test_empty_input_yields_all_empty_fields() {
        let kit = parse_brand_kit("");
        assert_eq!(kit, BrandKitData::default());
        assert!(kit.is_empty());
    }

    #[test]
    fn test_garbage_input_never_panics() {
        let kit = parse_brand_kit("#####\n## \n###\u{0}COLOR\n: #\n- \n•");
        assert!(kit.colors.is_empty());
    }

    #[test]
    fn test_reordered_sections_still_parse() {
        let text = "## MARKETING\n- Reels\n## THEME\n- Bold";
        let kit = parse_brand_kit(text);
        assert_eq!(kit.marketing, vec!["Reels"]);
        assert_eq!(kit.theme, vec!["Bold"]);
    }

    #[test]
    fn test_brand_kit_serializes_every_field() {
        let value = serde_json::to_value(BrandKitData::default()).unwrap();
        for field in ["theme", "audience", "colors", "voice", "taglines", "marketing"] {
            assert!(value[field].as_array().unwrap().is_empty(), "{field}");
        }
    }
}
