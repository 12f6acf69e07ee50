//! Visible width measurement for strings that may carry ANSI sequences.
//!
//! Layout decisions throughout the crate are made against the width a string
//! occupies on screen, not its byte or char count: escape sequences occupy
//! zero cells, wide characters (CJK, some emoji) occupy two.

use std::borrow::Cow;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::UnicodeWidthChar;

/// Minimum string length to cache (shorter strings have minimal overhead).
const CACHE_MIN_LEN: usize = 8;

/// Matches ANSI/VT100 control sequences, CSI color codes included.
static ANSI_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x1b\u{9b}][\[()#;?]*(?:[0-9]{1,4}(?:;[0-9]{0,4})*)?[0-9A-ORZcf-nqry=><]")
        .expect("ANSI pattern is valid")
});

/// LRU cache for `visible_width` results on longer strings.
static VISIBLE_WIDTH_CACHE: Lazy<Mutex<LruCache<String, usize>>> =
    Lazy::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(1024).expect("non-zero"))));

/// Get the cell width of a single character.
///
/// Most characters are 1 cell wide; CJK characters and some emoji are 2.
/// Control characters have 0 width.
#[must_use]
pub fn char_cell_size(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Remove all ANSI control sequences from a string.
#[must_use]
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_PATTERN.replace_all(text, "")
}

/// Check whether a string contains any ANSI control sequence.
#[must_use]
pub fn has_ansi(text: &str) -> bool {
    ANSI_PATTERN.is_match(text)
}

#[inline]
fn compute_visible_width(text: &str) -> usize {
    strip_ansi(text).chars().map(char_cell_size).sum()
}

/// Get the visible cell width of a string, ignoring ANSI sequences.
///
/// Results for strings of 8+ bytes are memoized in an LRU cache; cell
/// content is measured repeatedly during wrapping and alignment.
#[must_use]
pub fn visible_width(text: &str) -> usize {
    if text.len() < CACHE_MIN_LEN {
        return compute_visible_width(text);
    }

    if let Ok(mut cache) = VISIBLE_WIDTH_CACHE.lock()
        && let Some(&cached) = cache.get(text)
    {
        return cached;
    }

    let width = compute_visible_width(text);

    if let Ok(mut cache) = VISIBLE_WIDTH_CACHE.lock() {
        cache.put(text.to_string(), width);
    }

    width
}

/// Split a string so the left part occupies at most `max_size` visible cells.
///
/// ANSI sequences are kept intact and travel with the left part while content
/// before the split point continues; a wide character that would straddle the
/// boundary goes entirely to the right part.
#[must_use]
pub fn split_at_visible(text: &str, max_size: usize) -> (&str, &str) {
    let mut width = 0;
    let mut byte_pos = 0;

    while byte_pos < text.len() {
        let rest = &text[byte_pos..];
        if let Some(m) = ANSI_PATTERN.find(rest)
            && m.start() == 0
        {
            byte_pos += m.end();
            continue;
        }
        let c = rest.chars().next().expect("non-empty remainder");
        let char_width = char_cell_size(c);
        if width + char_width > max_size {
            break;
        }
        width += char_width;
        byte_pos += c.len_utf8();
    }

    (&text[..byte_pos], &text[byte_pos..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        assert_eq!(visible_width("hello"), 5);
        assert_eq!(visible_width("Hello, World!"), 13);
        assert_eq!(visible_width(""), 0);
    }

    #[test]
    fn test_cjk_width() {
        assert_eq!(visible_width("日本語"), 6);
        assert_eq!(visible_width("Hello日本"), 9);
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[31mred\x1b[39m"), "red");
        assert_eq!(strip_ansi("plain"), "plain");
        assert_eq!(strip_ansi("\x1b[1;31mbold red\x1b[0m"), "bold red");
    }

    #[test]
    fn test_has_ansi() {
        assert!(has_ansi("\x1b[31mred\x1b[39m"));
        assert!(!has_ansi("red"));
    }

    #[test]
    fn test_visible_width_ignores_ansi() {
        assert_eq!(visible_width("\x1b[31mred\x1b[39m"), 3);
        assert_eq!(visible_width("\x1b[42;1m"), 0);
        // Longer than the cache threshold
        let long = "\x1b[36ma cached colored string\x1b[39m";
        assert_eq!(visible_width(long), 23);
        assert_eq!(visible_width(long), 23);
    }

    #[test]
    fn test_split_at_visible_ascii() {
        let (left, right) = split_at_visible("hello world", 5);
        assert_eq!(left, "hello");
        assert_eq!(right, " world");
    }

    #[test]
    fn test_split_at_visible_wide_chars() {
        // A wide character never straddles the boundary
        let (left, right) = split_at_visible("日本語", 3);
        assert_eq!(left, "日");
        assert_eq!(right, "本語");
    }

    #[test]
    fn test_split_at_visible_keeps_sequences() {
        let (left, right) = split_at_visible("\x1b[31mabcdef", 3);
        assert_eq!(left, "\x1b[31mabc");
        assert_eq!(right, "def");
        assert_eq!(visible_width(left), 3);
    }

    #[test]
    fn test_split_at_visible_zero() {
        let (left, right) = split_at_visible("hello", 0);
        assert_eq!(left, "");
        assert_eq!(right, "hello");
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(char_cell_size('\0'), 0);
        assert_eq!(char_cell_size('\x1b'), 0);
        assert_eq!(char_cell_size('a'), 1);
        assert_eq!(char_cell_size('日'), 2);
    }
}
