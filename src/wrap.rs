//! Word wrapping against visible width.
//!
//! Widths are compared via [`crate::measure`], so strings carrying ANSI
//! sequences wrap by what the terminal will actually display.

use crate::measure;

/// Word wrap text to fit within `width` visible cells.
///
/// Embedded newlines are preserved as hard breaks, and lines that already
/// fit pass through with only trailing whitespace trimmed; wrapping its own
/// output at the same width is therefore a fixed point. Words wider than
/// `width` hard-break at exactly `width` visible cells.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();

    for line in text.split('\n') {
        if measure::visible_width(line) <= width {
            lines.push(line.trim_end().to_string());
        } else {
            wrap_line(line, width, &mut lines);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Wrap and rejoin with newlines.
#[must_use]
pub fn fill(text: &str, width: usize) -> String {
    wrap(text, width).join("\n")
}

/// Rebuild one overlong line greedily, breaking at whitespace.
fn wrap_line(line: &str, width: usize, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0;

    for word in line.split_whitespace() {
        let word_width = measure::visible_width(word);

        if word_width > width {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_width = 0;
            }
            let (tail, tail_width) = hard_break(word, width, out);
            current.push_str(tail);
            current_width = tail_width;
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            out.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        out.push(current);
    } else if out.is_empty() {
        out.push(String::new());
    }
}

/// Emit full-width chunks of an overlong word; return the leftover chunk.
fn hard_break<'a>(word: &'a str, width: usize, out: &mut Vec<String>) -> (&'a str, usize) {
    let mut rest = word;

    loop {
        let (head, tail) = measure::split_at_visible(rest, width);
        if tail.is_empty() {
            return (head, measure::visible_width(head));
        }
        if head.is_empty() {
            // A single cell that cannot fit (wide char at width 1); emit
            // it whole rather than loop forever.
            out.push(tail.to_string());
            return ("", 0);
        }
        out.push(head.to_string());
        rest = tail;
    }
}
