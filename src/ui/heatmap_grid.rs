use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::heatmap::HeatmapBlock;

/// Horizontal pixels represented by one terminal column.
pub const PX_PER_COL: f64 = 5.0;
/// Vertical pixels represented by one terminal row.
pub const PX_PER_ROW: f64 = 25.0;

/// Terminal cell footprint `(columns, rows)` of a block of `size_px`.
pub fn cell_size(size_px: f64) -> (u16, u16) {
    let cols = (size_px / PX_PER_COL).round().clamp(1.0, u16::MAX as f64) as u16;
    let rows = (size_px / PX_PER_ROW).round().clamp(1.0, u16::MAX as f64) as u16;
    (cols, rows)
}

/// Flow layout: left to right, wrapping to a new row when the next block
/// would overflow. Blocks that do not fit vertically are left out.
///
/// Returns `(block index, cell rect)` pairs.
pub fn layout_blocks(blocks: &[HeatmapBlock], area: Rect) -> Vec<(usize, Rect)> {
    let mut placed = Vec::with_capacity(blocks.len());
    if area.width == 0 || area.height == 0 {
        return placed;
    }

    let mut x = area.x;
    let mut y = area.y;
    let mut row_h: u16 = 0;

    for (i, block) in blocks.iter().enumerate() {
        let (w, h) = cell_size(block.size_px);
        let w = w.min(area.width);
        let h = h.min(area.height);

        if x > area.x && x + w > area.right() {
            x = area.x;
            y = y.saturating_add(row_h);
            row_h = 0;
        }
        if y + h > area.bottom() {
            continue;
        }

        placed.push((i, Rect::new(x, y, w, h)));
        x += w;
        row_h = row_h.max(h);
    }
    placed
}

pub struct HeatmapGrid<'a> {
    blocks: &'a [HeatmapBlock],
}

impl<'a> HeatmapGrid<'a> {
    pub fn new(blocks: &'a [HeatmapBlock]) -> Self {
        Self { blocks }
    }
}

impl Widget for HeatmapGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame = Block::default()
            .title(" Crypto Market Performance ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = frame.inner(area);
        frame.render(area, buf);

        if self.blocks.is_empty() {
            Paragraph::new("Loading data...")
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }

        for (i, cell) in layout_blocks(self.blocks, inner) {
            let block = &self.blocks[i];
            let (r, g, b) = block.color.over_black();
            // One column of gutter between neighbours.
            let paint = Rect::new(cell.x, cell.y, cell.width.saturating_sub(1).max(1), cell.height);
            let style = Style::default().bg(Color::Rgb(r, g, b)).fg(Color::White);
            buf.set_style(paint, style);

            buf.set_stringn(
                paint.x,
                paint.y,
                &block.symbol,
                paint.width as usize,
                style.add_modifier(Modifier::BOLD),
            );
            if paint.height >= 2 {
                buf.set_stringn(paint.x, paint.y + 1, &block.label, paint.width as usize, style);
            }
        }
    }
}
