//! Text layout for the printable report: sanitization, two-stage wrapping and
//! pagination into fixed-height rows. Pure; the PDF adapter only draws.

use super::entities::Report;

pub const TITLE: &str = "Discharge Instruction Summary";
pub const ITEMS_HEADING: &str = "Simplified & Categorized Instructions";
pub const SUMMARY_HEADING: &str = "Grouped Summary";

/// Longest run of non-space characters left intact by the token pass.
pub const MAX_TOKEN_CHARS: usize = 50;
/// Longest display line.
pub const MAX_LINE_CHARS: usize = 100;

/// Substitute for characters outside the single-byte set.
const REPLACEMENT: char = '?';

/// Row kinds, each with its own font and fixed height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Title,
    Heading,
    Body,
}

impl RowStyle {
    pub fn font_size_pt(self) -> f32 {
        match self {
            RowStyle::Title => 14.0,
            RowStyle::Heading => 12.0,
            RowStyle::Body => 11.0,
        }
    }

    pub fn height_mm(self) -> f32 {
        match self {
            RowStyle::Title | RowStyle::Heading => 10.0,
            RowStyle::Body => 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub style: RowStyle,
    pub text: String,
}

impl Row {
    fn new(style: RowStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

/// A row with its baseline on a page, measured from the page bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRow {
    pub row: Row,
    pub baseline_mm: f32,
}

/// Page size and printable area, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_left_mm: f32,
    pub margin_top_mm: f32,
    pub margin_bottom_mm: f32,
}

impl PageGeometry {
    pub fn a4() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_left_mm: 10.0,
            margin_top_mm: 10.0,
            margin_bottom_mm: 15.0,
        }
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Replace typographic quotes and dashes with ASCII, then map every character
/// outside printable Latin-1 to `?`. The C1 controls (U+0080..U+009F) count as
/// unprintable; builtin-font encoding drops them silently. Idempotent.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{80}'..='\u{9F}' => REPLACEMENT,
            c if (c as u32) <= 0xFF => c,
            _ => REPLACEMENT,
        })
        .collect()
}

/// Split every run of `MAX_TOKEN_CHARS` or more non-space characters into
/// space-separated chunks of at most `MAX_TOKEN_CHARS`.
pub fn break_long_tokens(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut token = String::new();
    for c in text.chars() {
        if c.is_whitespace() {
            flush_token(&mut out, &mut token);
            out.push(c);
        } else {
            token.push(c);
        }
    }
    flush_token(&mut out, &mut token);
    out
}

fn flush_token(out: &mut String, token: &mut String) {
    let chars: Vec<char> = token.chars().collect();
    for (i, chunk) in chars.chunks(MAX_TOKEN_CHARS).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.extend(chunk);
    }
    token.clear();
}

/// Greedy word wrap on character counts. Whitespace runs collapse to one space;
/// a word longer than `width` is hard-broken. Always returns at least one line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        for piece in chars.chunks(width) {
            let piece_len = piece.len();
            if current_len > 0 && current_len + 1 + piece_len > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(piece);
            current_len += piece_len;
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Sanitize, break long tokens, then wrap to display lines.
pub fn display_lines(text: &str) -> Vec<String> {
    wrap_text(&break_long_tokens(&sanitize(text)), MAX_LINE_CHARS)
}

/// Lay the report out as a flat sequence of rows, top to bottom.
pub fn layout_rows(report: &Report) -> Vec<Row> {
    let mut rows = vec![
        Row::new(RowStyle::Title, TITLE),
        Row::new(RowStyle::Heading, ITEMS_HEADING),
    ];

    for item in &report.items {
        let flattened = item.simplified_text.replace('\n', " ");
        let body = break_long_tokens(&sanitize(flattened.trim()));
        let line = format!("- {} {}", item.category.label(), body);
        rows.extend(
            wrap_text(&line, MAX_LINE_CHARS)
                .into_iter()
                .map(|l| Row::new(RowStyle::Body, l)),
        );
    }

    rows.push(Row::new(RowStyle::Heading, SUMMARY_HEADING));
    for source_line in report.grouped_summary.trim().lines() {
        if source_line.trim().is_empty() {
            continue;
        }
        rows.extend(
            display_lines(source_line)
                .into_iter()
                .map(|l| Row::new(RowStyle::Body, l)),
        );
    }
    rows
}

/// Assign rows to pages top-down, starting a new page whenever the next row
/// would cross the bottom margin. Never returns zero pages.
pub fn paginate(rows: Vec<Row>, geometry: &PageGeometry) -> Vec<Vec<PlacedRow>> {
    let top = geometry.height_mm - geometry.margin_top_mm;
    let mut pages: Vec<Vec<PlacedRow>> = vec![Vec::new()];
    let mut cursor = top;

    for row in rows {
        let height = row.style.height_mm();
        let fits = cursor - height >= geometry.margin_bottom_mm;
        let page_has_rows = pages.last().is_some_and(|p| !p.is_empty());
        if !fits && page_has_rows {
            pages.push(Vec::new());
            cursor = top;
        }
        cursor -= height;
        if let Some(page) = pages.last_mut() {
            page.push(PlacedRow {
                row,
                baseline_mm: cursor,
            });
        }
    }
    pages
}
