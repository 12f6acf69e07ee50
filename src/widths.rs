//! Column width resolution.
//!
//! Widths come from each column's explicit `width` or its resolved
//! `max_width` default. When the total (including the left margin) exceeds
//! the terminal width, every column shrinks by the same proportion.

use num_rational::Ratio;

use crate::options::ResolvedColumnOptions;
use crate::table::Diagnostic;

/// Resolve the printable width of every column.
///
/// With a terminal width hint, a total overrun scales each width by
/// `terminal / total` (exact rational arithmetic, floored). A width that
/// scales to zero is clamped to 1 and reported. No hint means widths are
/// used as specified.
#[must_use]
pub fn resolve(
    columns: &[ResolvedColumnOptions],
    margin_left: usize,
    terminal_width: Option<usize>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<usize> {
    let mut widths: Vec<usize> = columns
        .iter()
        .map(|column| column.width.unwrap_or(column.max_width))
        .collect();

    let total: usize = widths.iter().sum::<usize>() + margin_left;

    if let Some(terminal) = terminal_width
        && total > terminal
    {
        let scale = Ratio::new(terminal, total);
        log::debug!("shrinking columns: total {total} exceeds terminal {terminal}");
        for (i, width) in widths.iter_mut().enumerate() {
            let scaled = (Ratio::from_integer(*width) * scale).floor().to_integer();
            if scaled == 0 {
                log::warn!("column {i} width clamped to 1 after proportional shrink");
                diagnostics.push(Diagnostic::WidthClamped { column: i });
            }
            *width = scaled.max(1);
        }
    }

    widths
}
