//! PDF export of a saved generation.
//!
//! Layout (wrapping, pagination, positions) is computed up front as plain data so
//! it can be tested without a PDF backend; `render_pdf` only draws it. Both run on
//! the blocking pool.

use std::path::{Path, PathBuf};

use chrono::Local;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};
use tracing::info;

use crate::errors::AppError;
use crate::export::metrics::{a4_page_config, paginate, wrap_text, PageConfig, HELVETICA};
use crate::history::HistoryItem;
use crate::render::clipboard_text;
use crate::render::markdown::strip_bold;

pub const REPORT_TITLE: &str = "FOUNDRY.AI";
pub const REPORT_SUBTITLE: &str = "Content Generation Report";
pub const FOOTER_TEXT: &str = "Generated by FOUNDRY.AI";

const BACKGROUND: (u8, u8, u8) = (0x11, 0x18, 0x27);
const TITLE_COLOR: (u8, u8, u8) = (0xF9, 0xFA, 0xFB);
const MUTED_COLOR: (u8, u8, u8) = (0x9C, 0xA3, 0xAF);
const BODY_COLOR: (u8, u8, u8) = (0xCB, 0xD5, 0xE1);
const FOOTER_COLOR: (u8, u8, u8) = (0x4B, 0x55, 0x63);

/// Distance from the top edge where body text starts on the first page.
const FIRST_PAGE_BODY_TOP_MM: f32 = 75.0;

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x_mm: f32,
    /// Distance from the top edge of the page.
    pub top_mm: f32,
    pub size_pt: f32,
    pub bold: bool,
    pub color: (u8, u8, u8),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub config: PageConfig,
    /// Drawn on the first page only.
    pub header: Vec<TextRun>,
    /// Body text per page.
    pub pages: Vec<Vec<TextRun>>,
    /// Drawn on the last page only.
    pub footer: TextRun,
}

/// `foundry-ai-<slug>.pdf`
pub fn export_file_name(product_name: &str) -> String {
    format!("foundry-ai-{}.pdf", slugify(product_name))
}

/// Replaces every run of non-alphanumeric characters with `-` and trims dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

/// Reduces text to what the built-in Helvetica font can show: typographic
/// punctuation becomes its ASCII form, other non-ASCII letters become `?`,
/// and everything else non-ASCII (emoji, symbols) is dropped.
pub fn pdf_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push('\n'),
            '\t' | '\u{a0}' => out.push(' '),
            ' '..='~' => out.push(c),
            '‘' | '’' | '′' => out.push('\''),
            '“' | '”' | '″' => out.push('"'),
            '–' | '—' | '−' => out.push('-'),
            '•' | '·' => out.push('-'),
            '…' => out.push_str("..."),
            c if c.is_alphabetic() => out.push('?'),
            _ => {}
        }
    }
    out
}

/// Computes the full report layout for a history item.
pub fn layout_report(item: &HistoryItem, config: &PageConfig) -> ReportLayout {
    let margin = config.margin_mm;
    let date = item
        .created_at()
        .map(|at| at.with_timezone(&Local).format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    let run = |text: String, top_mm: f32, size_pt: f32, bold: bool, color| TextRun {
        text: pdf_safe(&text),
        x_mm: margin,
        top_mm,
        size_pt,
        bold,
        color,
    };

    let header = vec![
        run(REPORT_TITLE.to_string(), margin + 8.0, 24.0, true, TITLE_COLOR),
        run(REPORT_SUBTITLE.to_string(), margin + 16.0, 12.0, false, MUTED_COLOR),
        run(
            format!("Product/Brand: {}", item.product_name),
            margin + 30.0,
            10.0,
            false,
            BODY_COLOR,
        ),
        run(
            format!("Content Type: {}", item.content_type.label()),
            margin + 36.0,
            10.0,
            false,
            BODY_COLOR,
        ),
        run(
            format!("Date Generated: {date}"),
            margin + 42.0,
            10.0,
            false,
            BODY_COLOR,
        ),
    ];

    let body = pdf_safe(&strip_bold(&clipboard_text(item.content_type, &item.content)));
    let lines = wrap_text(&body, &HELVETICA, config);
    let first_page = config.lines_below(FIRST_PAGE_BODY_TOP_MM);
    let per_page = config.lines_below(margin);

    let pages = paginate(lines, first_page, per_page)
        .into_iter()
        .enumerate()
        .map(|(index, page_lines)| {
            let top = if index == 0 { FIRST_PAGE_BODY_TOP_MM } else { margin };
            page_lines
                .into_iter()
                .enumerate()
                .filter(|(_, line)| !line.is_empty())
                .map(|(row, line)| TextRun {
                    text: line,
                    x_mm: margin,
                    top_mm: top + (row as f32 + 1.0) * config.line_height_mm,
                    size_pt: config.font_size_pt,
                    bold: false,
                    color: BODY_COLOR,
                })
                .collect()
        })
        .collect();

    let footer_width_mm = text_width_mm(FOOTER_TEXT, 10.0);
    let footer = TextRun {
        text: FOOTER_TEXT.to_string(),
        x_mm: (config.page_width_mm - footer_width_mm) / 2.0,
        top_mm: config.page_height_mm - 10.0,
        size_pt: 10.0,
        bold: false,
        color: FOOTER_COLOR,
    };

    ReportLayout {
        config: config.clone(),
        header,
        pages,
        footer,
    }
}

fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    HELVETICA.measure_str(text) * size_pt * 25.4 / 72.0
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn draw_background(layer: &PdfLayerReference, config: &PageConfig) {
    layer.set_fill_color(rgb(BACKGROUND));
    let rect = Rect::new(
        Mm(0.0),
        Mm(0.0),
        Mm(config.page_width_mm),
        Mm(config.page_height_mm),
    )
    .with_mode(PaintMode::Fill);
    layer.add_rect(rect);
}

fn draw_run(layer: &PdfLayerReference, run: &TextRun, fonts: &Fonts, config: &PageConfig) {
    let font = if run.bold { &fonts.bold } else { &fonts.regular };
    layer.set_fill_color(rgb(run.color));
    layer.use_text(
        run.text.as_str(),
        run.size_pt,
        Mm(run.x_mm),
        Mm(config.page_height_mm - run.top_mm),
        font,
    );
}

/// Draws a computed layout into PDF bytes.
pub fn render_pdf(layout: &ReportLayout, title: &str) -> Result<Vec<u8>, AppError> {
    let config = &layout.config;
    let page_w = Mm(config.page_width_mm);
    let page_h = Mm(config.page_height_mm);

    let (doc, first_page, first_layer) = PdfDocument::new(title, page_w, page_h, "Layer 1");
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::Export(format!("Failed to load font: {e}")))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::Export(format!("Failed to load font: {e}")))?,
    };

    let last = layout.pages.len().saturating_sub(1);
    for (index, runs) in layout.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(page_w, page_h, "Layer 1");
            doc.get_page(page).get_layer(layer)
        };

        draw_background(&layer, config);
        if index == 0 {
            for run in &layout.header {
                draw_run(&layer, run, &fonts, config);
            }
        }
        for run in runs {
            draw_run(&layer, run, &fonts, config);
        }
        if index == last {
            draw_run(&layer, &layout.footer, &fonts, config);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| AppError::Export(format!("Failed to write PDF: {e}")))
}

/// Builds the PDF for a history item.
pub fn build_pdf(item: &HistoryItem) -> Result<Vec<u8>, AppError> {
    let layout = layout_report(item, &a4_page_config());
    render_pdf(&layout, &format!("{REPORT_TITLE} - {}", pdf_safe(&item.product_name)))
}

/// Writes `foundry-ai-<slug>.pdf` for the item into `dir` and returns its path.
pub async fn export_pdf(item: &HistoryItem, dir: &Path) -> Result<PathBuf, AppError> {
    let owned = item.clone();
    let bytes = tokio::task::spawn_blocking(move || build_pdf(&owned))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF export: {e}")))??;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Export(format!("Failed to create {}: {e}", dir.display())))?;

    let path = dir.join(export_file_name(&item.product_name));
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| AppError::Export(format!("Failed to write {}: {e}", path.display())))?;

    info!("Exported '{}' to {}", item.product_name, path.display());
    Ok(path)
}
