//! Static Helvetica width table and greedy line wrapping for PDF export.
//!
//! Widths are in em units (AFM widths / 1000) and cover ASCII 0x20..=0x7E.
//! Index = (char as usize) - 32. PDF text is sanitized to ASCII before it is
//! measured, so the fallback width only matters for direct callers.

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

const PT_PER_MM: f32 = 72.0 / 25.4;

/// Page geometry and body text settings, in millimetres and points.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub font_size_pt: f32,
    pub line_height_mm: f32,
    /// Space kept clear at the bottom of every page for the footer.
    pub footer_mm: f32,
}

impl PageConfig {
    /// Usable text width in em units at the body font size.
    pub fn text_width_em(&self) -> f32 {
        let width_mm = self.page_width_mm - 2.0 * self.margin_mm;
        width_mm * PT_PER_MM / self.font_size_pt
    }

    /// Body lines that fit between `top_mm` (distance from the top edge) and the footer.
    pub fn lines_below(&self, top_mm: f32) -> usize {
        let usable = self.page_height_mm - top_mm - self.margin_mm - self.footer_mm;
        (usable / self.line_height_mm).floor().max(1.0) as usize
    }
}

/// A4 portrait, 20 mm margins, 10 pt body text.
pub fn a4_page_config() -> PageConfig {
    PageConfig {
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        margin_mm: 20.0,
        font_size_pt: 10.0,
        line_height_mm: 5.0,
        footer_mm: 10.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

pub struct FontMetricTable {
    widths: [f32; 95],
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    pub fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }
}

/// Helvetica (PDF base-14), regular weight.
pub static HELVETICA: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};

// ────────────────────────────────────────────────────────────────────────────
// Wrapping
// ────────────────────────────────────────────────────────────────────────────

/// Greedy word-wrap of one paragraph to `max_width_em`.
///
/// Whitespace runs collapse to single spaces. A word wider than the line is
/// split across lines at character boundaries. An empty paragraph yields no lines.
pub fn wrap_paragraph(text: &str, metrics: &FontMetricTable, max_width_em: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = metrics.measure_str(word);
        let space_w = if current.is_empty() { 0.0 } else { metrics.space_width };

        if current_width + space_w + word_w <= max_width_em {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width += space_w + word_w;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }

        if word_w <= max_width_em {
            current.push_str(word);
            current_width = word_w;
        } else {
            for c in word.chars() {
                let c_w = metrics.char_width(c);
                if !current.is_empty() && current_width + c_w > max_width_em {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(c);
                current_width += c_w;
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wraps multi-line text. Blank input lines are kept as empty lines, with runs
/// of them collapsed to one.
pub fn wrap_text(text: &str, metrics: &FontMetricTable, config: &PageConfig) -> Vec<String> {
    let max_width = config.text_width_em();
    let mut out: Vec<String> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if out.last().is_some_and(|l| !l.is_empty()) {
                out.push(String::new());
            }
            continue;
        }
        out.extend(wrap_paragraph(line, metrics, max_width));
    }

    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out
}

/// Splits lines into pages: `first_page` lines on the first, `per_page` after.
/// Always returns at least one (possibly empty) page.
pub fn paginate(lines: Vec<String>, first_page: usize, per_page: usize) -> Vec<Vec<String>> {
    let first_page = first_page.max(1);
    let per_page = per_page.max(1);

    let mut iter = lines.into_iter();
    let mut pages = vec![iter.by_ref().take(first_page).collect::<Vec<_>>()];
    loop {
        let page: Vec<String> = iter.by_ref().take(per_page).collect();
        if page.is_empty() {
            break;
        }
        pages.push(page);
    }
    pages
}
