//! Border lattice construction.
//!
//! A border character set holds three glyph groups, one per border role
//! (top, middle, bottom). Each group carries the vertical, left corner,
//! junction, horizontal and right corner glyphs for that role. Sets are
//! selected by style index; index 0 is the blank set, which keeps column
//! geometry while drawing nothing visible.

use crate::color::Paint;

/// Glyphs for one border role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub vertical: char,
    pub left: char,
    pub junction: char,
    pub horizontal: char,
    pub right: char,
}

const fn glyphs(vertical: char, left: char, junction: char, horizontal: char, right: char) -> BorderGlyphs {
    BorderGlyphs {
        vertical,
        left,
        junction,
        horizontal,
        right,
    }
}

/// One border style: glyph groups for the top, middle and bottom roles.
pub type BorderSet = [BorderGlyphs; 3];

/// Style 0: invisible borders that preserve column spacing.
pub const BLANK: BorderSet = [glyphs(' ', ' ', ' ', ' ', ' '); 3];

/// Style 1: Unicode box-drawing borders.
pub const BOX_DRAWING: BorderSet = [
    glyphs('│', '┌', '┬', '─', '┐'),
    glyphs('│', '├', '┼', '─', '┤'),
    glyphs('│', '└', '┴', '─', '┘'),
];

/// Style 2: plain ASCII borders.
pub const ASCII: BorderSet = [glyphs('|', '+', '+', '-', '+'); 3];

/// The built-in style table, indexed by `border_style`.
#[must_use]
pub fn default_sets() -> Vec<BorderSet> {
    vec![BLANK, BOX_DRAWING, ASCII]
}

/// The three border strings for one table render.
#[derive(Debug, Clone)]
pub struct Borders {
    pub top: String,
    pub middle: String,
    pub bottom: String,
}

/// Build the top/middle/bottom border strings for the given column widths.
///
/// Each border is the left corner, then per column the horizontal glyph
/// repeated `width` times followed by a junction (interior boundary) or the
/// right corner (last column), all behind `margin_left` spaces. `paint`
/// colors the lattice but not the margin.
#[must_use]
pub fn build(set: &BorderSet, widths: &[usize], margin_left: usize, paint: Option<&Paint>) -> Borders {
    Borders {
        top: build_role(&set[0], widths, margin_left, paint),
        middle: build_role(&set[1], widths, margin_left, paint),
        bottom: build_role(&set[2], widths, margin_left, paint),
    }
}

/// The vertical glyph used between cells, painted like the lattice.
#[must_use]
pub fn vertical(set: &BorderSet, paint: Option<&Paint>) -> String {
    let glyph = set[1].vertical.to_string();
    match paint {
        Some(p) => p.apply(&glyph),
        None => glyph,
    }
}

fn build_role(group: &BorderGlyphs, widths: &[usize], margin_left: usize, paint: Option<&Paint>) -> String {
    let mut lattice = String::new();
    lattice.push(group.left);

    let last = widths.len().saturating_sub(1);
    for (i, &width) in widths.iter().enumerate() {
        for _ in 0..width {
            lattice.push(group.horizontal);
        }
        lattice.push(if i == last { group.right } else { group.junction });
    }

    let lattice = match paint {
        Some(p) => p.apply(&lattice),
        None => lattice,
    };

    format!("{}{lattice}", " ".repeat(margin_left))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::NamedColor;
    use crate::measure;

    #[test]
    fn test_box_drawing_roles() {
        let borders = build(&BOX_DRAWING, &[3, 2], 0, None);
        assert_eq!(borders.top, "┌───┬──┐");
        assert_eq!(borders.middle, "├───┼──┤");
        assert_eq!(borders.bottom, "└───┴──┘");
    }

    #[test]
    fn test_ascii_roles() {
        let borders = build(&ASCII, &[2], 0, None);
        assert_eq!(borders.top, "+--+");
        assert_eq!(borders.middle, "+--+");
        assert_eq!(borders.bottom, "+--+");
    }

    #[test]
    fn test_blank_set_preserves_geometry() {
        let blank = build(&BLANK, &[3, 2], 0, None);
        let drawn = build(&BOX_DRAWING, &[3, 2], 0, None);
        assert_eq!(blank.top, "        ");
        assert_eq!(blank.top.chars().count(), drawn.top.chars().count());
    }

    #[test]
    fn test_margin_prefix() {
        let borders = build(&ASCII, &[1], 2, None);
        assert_eq!(borders.top, "  +-+");
    }

    #[test]
    fn test_border_width_matches_content_line() {
        // Lattice width is sum(widths) + widths.len() + 1
        let widths = [4, 7, 2];
        let borders = build(&BOX_DRAWING, &widths, 0, None);
        let expected = widths.iter().sum::<usize>() + widths.len() + 1;
        assert_eq!(measure::visible_width(&borders.top), expected);
        assert_eq!(measure::visible_width(&borders.middle), expected);
        assert_eq!(measure::visible_width(&borders.bottom), expected);
    }

    #[test]
    fn test_painted_lattice_keeps_width() {
        let paint = Paint::plain().color(NamedColor::Gray);
        let plain = build(&BOX_DRAWING, &[3], 2, None);
        let painted = build(&BOX_DRAWING, &[3], 2, Some(&paint));
        assert_ne!(plain.top, painted.top);
        assert_eq!(
            measure::visible_width(&plain.top),
            measure::visible_width(&painted.top)
        );
        assert!(painted.top.starts_with("  \x1b[90m"));
    }

    #[test]
    fn test_vertical_glyph() {
        assert_eq!(vertical(&BOX_DRAWING, None), "│");
        let paint = Paint::plain().color(NamedColor::Red);
        assert_eq!(vertical(&ASCII, Some(&paint)), "\x1b[31m|\x1b[39m");
    }
}
