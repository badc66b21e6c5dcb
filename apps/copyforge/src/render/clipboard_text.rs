use crate::generation::brand_kit::parse_brand_kit;
use crate::generation::content_type::ContentType;
use crate::render::brand_kit::Section;

/// Text placed on the clipboard for a saved item.
///
/// Copy is returned verbatim. A brand kit is re-parsed and laid out as
/// `TITLE:` blocks with indented lines, separated by blank lines; sections with
/// nothing in them are left out.
pub fn clipboard_text(content_type: ContentType, content: &str) -> String {
    if content_type != ContentType::BrandKit {
        return content.to_string();
    }

    let kit = parse_brand_kit(content);
    if kit.is_empty() {
        return content.to_string();
    }

    Section::ALL
        .iter()
        .filter_map(|section| {
            let lines = section.lines(&kit);
            if lines.is_empty() {
                return None;
            }
            let body = lines
                .iter()
                .map(|l| format!("  {l}"))
                .collect::<Vec<_>>()
                .join("\n");
            Some(format!("{}:\n{body}", section.title().to_uppercase()))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
