//! Grid layout engine – arranges a homogeneous list of items into a wrapping
//! multi-column grid.
//!
//! Measuring and drawing share one [`plan`], so the height a caller reserves
//! before drawing (for a page-break decision) is exactly the height the grid
//! then occupies.

use crate::context::{LayoutContext, CONTENT_WIDTH, MARGIN_X};
use crate::primitives::check_page_break;

/// Height reported for a grid with no items.
pub const EMPTY_GRID_HEIGHT: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOptions {
    pub columns: usize,
    /// Horizontal and vertical space between cells.
    pub gap: f32,
    pub min_row_height: f32,
    /// Extra space left below the grid by [`draw_and_advance`].
    pub padding: f32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            columns: 3,
            gap: 4.0,
            min_row_height: 12.0,
            padding: 4.0,
        }
    }
}

impl GridOptions {
    pub fn columns(columns: usize) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    fn column_count(&self) -> usize {
        self.columns.max(1)
    }
}

/// Where one item is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowPlan {
    /// Index of the row's first item.
    pub start: usize,
    pub len: usize,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridPlan {
    pub cell_width: f32,
    pub gap: f32,
    pub rows: Vec<RowPlan>,
}

impl GridPlan {
    /// Sum of row heights plus the gaps between rows.
    pub fn total_height(&self) -> f32 {
        if self.rows.is_empty() {
            return EMPTY_GRID_HEIGHT;
        }
        let rows: f32 = self.rows.iter().map(|r| r.height).sum();
        rows + self.gap * (self.rows.len() - 1) as f32
    }
}

/// Width of one cell when `width` is split into the configured columns.
pub fn cell_width(width: f32, options: &GridOptions) -> f32 {
    let cols = options.column_count() as f32;
    ((width - options.gap * (cols - 1.0)) / cols).max(1.0)
}

/// Partition `items` into rows and size each row.
///
/// `measure_item(item, cell_width)` returns the height an item needs; a row
/// is as tall as its tallest item, floored at `min_row_height`.
pub fn plan<T>(items: &[T], width: f32, options: &GridOptions, measure_item: impl Fn(&T, f32) -> f32) -> GridPlan {
    let cell_w = cell_width(width, options);
    let rows = items
        .chunks(options.column_count())
        .enumerate()
        .map(|(i, row)| RowPlan {
            start: i * options.column_count(),
            len: row.len(),
            height: row
                .iter()
                .map(|item| measure_item(item, cell_w))
                .fold(options.min_row_height, f32::max),
        })
        .collect();
    GridPlan {
        cell_width: cell_w,
        gap: options.gap,
        rows,
    }
}

/// Total height the grid will occupy.
pub fn measure<T>(items: &[T], width: f32, options: &GridOptions, measure_item: impl Fn(&T, f32) -> f32) -> f32 {
    plan(items, width, options, measure_item).total_height()
}

fn draw_row<T>(
    ctx: &mut LayoutContext,
    x: f32,
    y: f32,
    items: &[T],
    row: &RowPlan,
    grid: &GridPlan,
    draw_item: &mut impl FnMut(&mut LayoutContext, &T, GridCell),
) {
    for (col, item) in items[row.start..row.start + row.len].iter().enumerate() {
        let cell = GridCell {
            x: x + col as f32 * (grid.cell_width + grid.gap),
            y,
            width: grid.cell_width,
            height: row.height,
        };
        draw_item(ctx, item, cell);
    }
}

/// Draw the grid with its top-left corner at `(x, y)`. No page breaks.
#[allow(clippy::too_many_arguments)]
pub fn render_at<T>(
    ctx: &mut LayoutContext,
    x: f32,
    y: f32,
    width: f32,
    items: &[T],
    options: &GridOptions,
    measure_item: impl Fn(&T, f32) -> f32,
    mut draw_item: impl FnMut(&mut LayoutContext, &T, GridCell),
) {
    let grid = plan(items, width, options, measure_item);
    let mut row_y = y;
    for row in &grid.rows {
        draw_row(ctx, x, row_y, items, row, &grid, &mut draw_item);
        row_y += row.height + grid.gap;
    }
}

/// Draw the grid at the cursor across the full content width and advance
/// past it. Each row is page-break-checked on its own.
pub fn draw_and_advance<T>(
    ctx: &mut LayoutContext,
    items: &[T],
    options: &GridOptions,
    measure_item: impl Fn(&T, f32) -> f32,
    mut draw_item: impl FnMut(&mut LayoutContext, &T, GridCell),
) {
    if items.is_empty() {
        ctx.advance(EMPTY_GRID_HEIGHT + options.padding);
        return;
    }
    let grid = plan(items, CONTENT_WIDTH, options, measure_item);
    for (i, row) in grid.rows.iter().enumerate() {
        check_page_break(ctx, row.height);
        let y = ctx.cursor_y;
        draw_row(ctx, MARGIN_X, y, items, row, &grid, &mut draw_item);
        let gap = if i + 1 < grid.rows.len() { grid.gap } else { 0.0 };
        ctx.advance(row.height + gap);
    }
    ctx.advance(options.padding);
}
