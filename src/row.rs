//! Vertical assembly of rendered cells into rectangular row blocks.
//!
//! A row's cells wrap to different heights; the assembler pads every column
//! with blank lines of its full width so the block is rectangular, and adds
//! top/bottom padding lines for body rows.

use crate::cell::{RenderedCellBlock, RowKind};

/// One logical table row, height-synchronized across columns.
///
/// `lines[i][col]` is column `col`'s slice of physical line `i`.
#[derive(Debug, Clone)]
pub struct RowBlock {
    pub lines: Vec<Vec<String>>,
}

impl RowBlock {
    /// Number of physical text lines in this block.
    #[must_use]
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Join each line's cells with the vertical border glyph, behind the
    /// left margin.
    #[must_use]
    pub fn join(&self, vertical: &str, margin: &str) -> Vec<String> {
        self.lines
            .iter()
            .map(|cells| format!("{margin}{vertical}{}{vertical}", cells.join(vertical)))
            .collect()
    }
}

/// Combine per-cell blocks into one rectangular row block.
///
/// Height is the tallest cell's line count, plus `padding_top` and
/// `padding_bottom` for body rows. Shorter cells fill with blank lines of
/// the column width: after content for header and footer rows; between the
/// vertical padding for body rows.
#[must_use]
pub fn assemble(
    cells: &[RenderedCellBlock],
    widths: &[usize],
    kind: RowKind,
    padding_top: usize,
    padding_bottom: usize,
) -> RowBlock {
    let content_height = cells.iter().map(|c| c.lines.len()).max().unwrap_or(0);
    let (pad_top, pad_bottom) = match kind {
        RowKind::Body => (padding_top, padding_bottom),
        RowKind::Header | RowKind::Footer => (0, 0),
    };
    let height = content_height + pad_top + pad_bottom;

    let mut lines = vec![Vec::with_capacity(cells.len()); height];

    for (col, block) in cells.iter().enumerate() {
        let blank = " ".repeat(widths[col]);
        for (i, line) in lines.iter_mut().enumerate() {
            let slice = if i < pad_top {
                &blank
            } else {
                block.lines.get(i - pad_top).unwrap_or(&blank)
            };
            line.push(slice.clone());
        }
    }

    RowBlock { lines }
}
