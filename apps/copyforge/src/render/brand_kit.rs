use crate::generation::brand_kit::{BrandKitData, ColorSwatch};
use crate::render::markdown::strip_bold;

pub const EMPTY_SECTION: &str = "No data generated for this section.";

/// One displayable brand kit section, in fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Theme,
    Audience,
    Colors,
    Voice,
    Taglines,
    Marketing,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Theme,
        Section::Audience,
        Section::Colors,
        Section::Voice,
        Section::Taglines,
        Section::Marketing,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Theme => "Brand Theme & Mood",
            Section::Audience => "Target Audience",
            Section::Colors => "Color Palette",
            Section::Voice => "Brand Voice & Tone",
            Section::Taglines => "Tagline Suggestions",
            Section::Marketing => "Marketing Strategies",
        }
    }

    /// The section's lines as plain text. Colors render as `name  hex`.
    pub fn lines(self, kit: &BrandKitData) -> Vec<String> {
        match self {
            Section::Theme => text_lines(&kit.theme),
            Section::Audience => text_lines(&kit.audience),
            Section::Colors => kit.colors.iter().map(swatch_line).collect(),
            Section::Voice => text_lines(&kit.voice),
            Section::Taglines => text_lines(&kit.taglines),
            Section::Marketing => text_lines(&kit.marketing),
        }
    }
}

fn text_lines(lines: &[String]) -> Vec<String> {
    lines.iter().map(|l| strip_bold(l)).collect()
}

fn swatch_line(swatch: &ColorSwatch) -> String {
    format!("{}  {}", swatch.name, swatch.hex)
}

/// Renders every section with its title; empty sections get a placeholder line.
pub fn render_brand_kit(kit: &BrandKitData) -> String {
    Section::ALL
        .iter()
        .map(|section| {
            let lines = section.lines(kit);
            let body = if lines.is_empty() {
                format!("  {EMPTY_SECTION}")
            } else {
                lines
                    .iter()
                    .map(|l| format!("  • {l}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            format!("{}\n{body}", section.title().to_uppercase())
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
