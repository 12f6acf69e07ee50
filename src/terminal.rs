//! Terminal width detection.
//!
//! The renderer takes the terminal width as an optional hint; this module
//! supplies that hint for the convenience entry point. No hint is produced
//! when stdout is not attached to a terminal, which disables proportional
//! column shrinking.

use std::io::IsTerminal;

/// Get the terminal size (width, height) in cells.
///
/// Returns `None` if the terminal size cannot be determined.
#[must_use]
pub fn size_hint() -> Option<(usize, usize)> {
    crossterm::terminal::size()
        .ok()
        .map(|(w, h)| (w as usize, h as usize))
}

/// Get the terminal width in cells, or `None` without an attached terminal.
#[must_use]
pub fn width_hint() -> Option<usize> {
    if !std::io::stdout().is_terminal() {
        return None;
    }
    size_hint().map(|(w, _)| w)
}
