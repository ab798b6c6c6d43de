//! Table of contents: reserve a page after the cover, record one entry per
//! section while content is drawn, then revisit the reserved page and fill
//! it in once every page number is known.
//!
//! [`TableOfContents::back_fill`] consumes the coordinator, so the summary
//! page can only be drawn once and no entry can be recorded afterwards.

use serde::{Deserialize, Serialize};

use crate::context::{Align, LayoutContext, TextStyle, CONTENT_BOTTOM, CONTENT_WIDTH, HEADER_BOTTOM, MARGIN_X};
use crate::fonts::{self, Font};
use crate::primitives::{self, rule_stroke};
use crate::style;

pub const TOC_TITLE: &str = "Table of Contents";
const ROW_PADDING: f32 = 1.5;
const BASE_SIZE: f32 = 10.0;
const MIN_SIZE: f32 = 6.5;
const STEP_COLUMN: f32 = 14.0;
const PAGE_COLUMN: f32 = 18.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TocEntry {
    pub step_number: i64,
    /// Canonical template name.
    pub name: String,
    /// 1-based page holding the section title.
    pub page: usize,
}

#[derive(Debug)]
pub struct TableOfContents {
    page_index: usize,
    entries: Vec<TocEntry>,
}

/// How many rows fit on the reserved page and at what font size.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RowFit {
    size: f32,
    /// Entries drawn; the rest are summarised on one extra line.
    visible: usize,
}

fn row_height(size: f32) -> f32 {
    fonts::line_height(size) + 2.0 * ROW_PADDING
}

fn fit_rows(count: usize, available: f32) -> RowFit {
    let needed = count as f32 * row_height(BASE_SIZE);
    if needed <= available {
        return RowFit {
            size: BASE_SIZE,
            visible: count,
        };
    }
    // Row height is linear in font size apart from the padding.
    let per_row = available / count as f32 - 2.0 * ROW_PADDING;
    let size = per_row / (fonts::LINE_HEIGHT_FACTOR * fonts::PT_TO_MM);
    if size >= MIN_SIZE {
        return RowFit {
            size: size.min(BASE_SIZE),
            visible: count,
        };
    }
    let capacity = (available / row_height(MIN_SIZE)).floor() as usize;
    RowFit {
        size: MIN_SIZE,
        visible: capacity.saturating_sub(1),
    }
}

/// First wrapped line of `text`, with an ellipsis when more was cut.
fn single_line(text: &str, style: &TextStyle, width: f32) -> String {
    let lines = style.wrap(text, width);
    match lines.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, ..] => format!("{first}..."),
    }
}

impl TableOfContents {
    /// Append the blank page that will hold the table of contents.
    pub fn reserve(ctx: &mut LayoutContext) -> Self {
        primitives::new_page(ctx);
        let page_index = ctx.surface.current_index();
        log::debug!("reserved page {} for the table of contents", page_index + 1);
        Self {
            page_index,
            entries: Vec::new(),
        }
    }

    /// 1-based number of the reserved page.
    pub fn page_number(&self) -> usize {
        self.page_index + 1
    }

    pub fn record(&mut self, step_number: i64, name: &str, page: usize) {
        self.entries.push(TocEntry {
            step_number,
            name: name.to_string(),
            page,
        });
    }

    /// Draw the entries on the reserved page, then return to the last page.
    pub fn back_fill(self, ctx: &mut LayoutContext) -> Vec<TocEntry> {
        let resume_y = ctx.cursor_y;
        ctx.surface.select_page(self.page_index);
        ctx.cursor_y = HEADER_BOTTOM;
        primitives::title(ctx, TOC_TITLE);

        if self.entries.is_empty() {
            primitives::placeholder(ctx, "This report has no sections.");
        } else {
            self.draw_rows(ctx);
        }

        ctx.surface.select_last_page();
        ctx.cursor_y = resume_y;
        self.entries
    }

    fn draw_rows(&self, ctx: &mut LayoutContext) {
        let fit = fit_rows(self.entries.len(), CONTENT_BOTTOM - ctx.cursor_y);
        if fit.visible < self.entries.len() {
            log::warn!(
                "table of contents holds {} of {} entries",
                fit.visible,
                self.entries.len()
            );
        }
        let text = TextStyle::new(Font::Regular, fit.size, style::TEXT);
        let bold = text.with_font(Font::Bold);
        let name_width = CONTENT_WIDTH - STEP_COLUMN - PAGE_COLUMN;
        let height = row_height(fit.size);
        let rule = rule_stroke();
        let page_x = MARGIN_X + CONTENT_WIDTH - PAGE_COLUMN;

        for entry in &self.entries[..fit.visible] {
            let y = ctx.cursor_y;
            let text_y = y + ROW_PADDING;
            ctx.text(MARGIN_X, text_y, &entry.step_number.to_string(), &bold);
            let name = single_line(&entry.name, &text, name_width - 2.0);
            ctx.text(MARGIN_X + STEP_COLUMN, text_y, &name, &text);
            let page = vec![entry.page.to_string()];
            ctx.text_lines(page_x, text_y, PAGE_COLUMN, &page, &text, Align::Right);
            ctx.line(MARGIN_X, y + height, MARGIN_X + CONTENT_WIDTH, y + height, rule.width, rule.color);
            ctx.advance(height);
        }

        let hidden = self.entries.len() - fit.visible;
        if hidden > 0 {
            let muted = TextStyle::new(Font::Italic, fit.size, style::MUTED);
            let y = ctx.cursor_y + ROW_PADDING;
            ctx.text(MARGIN_X + STEP_COLUMN, y, &format!("and {hidden} more"), &muted);
            ctx.advance(height);
        }
    }
}
