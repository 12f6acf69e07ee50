//! Named colors and text attributes rendered as ANSI escape sequences.
//!
//! A [`Paint`] is parsed from a spec string such as `"red"`, `"bgBlue"`,
//! `"on red"` or `"bold red"` and applied by wrapping text in SGR open/close
//! pairs. Application never changes a string's visible width.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;
use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

bitflags::bitflags! {
    /// Text attribute set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attributes: u8 {
        const BOLD          = 1;
        const DIM           = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINE     = 1 << 3;
        const INVERSE       = 1 << 4;
        const HIDDEN        = 1 << 5;
        const STRIKETHROUGH = 1 << 6;
    }
}

impl Attributes {
    fn from_attr_name(name: &str) -> Option<Self> {
        match name {
            "bold" => Some(Self::BOLD),
            "dim" => Some(Self::DIM),
            "italic" => Some(Self::ITALIC),
            "underline" => Some(Self::UNDERLINE),
            "inverse" => Some(Self::INVERSE),
            "hidden" => Some(Self::HIDDEN),
            "strikethrough" | "strike" => Some(Self::STRIKETHROUGH),
            _ => None,
        }
    }

    /// SGR (open, close) code pairs for each set attribute.
    fn sgr_pairs(self) -> SmallVec<[(u8, u8); 4]> {
        const TABLE: [(Attributes, u8, u8); 7] = [
            (Attributes::BOLD, 1, 22),
            (Attributes::DIM, 2, 22),
            (Attributes::ITALIC, 3, 23),
            (Attributes::UNDERLINE, 4, 24),
            (Attributes::INVERSE, 7, 27),
            (Attributes::HIDDEN, 8, 28),
            (Attributes::STRIKETHROUGH, 9, 29),
        ];

        let mut pairs = SmallVec::new();
        for (flag, open, close) in TABLE {
            if self.contains(flag) {
                pairs.push((open, close));
            }
        }
        pairs
    }
}

/// The sixteen-color terminal palette, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
}

impl NamedColor {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "black" => Some(Self::Black),
            "red" => Some(Self::Red),
            "green" => Some(Self::Green),
            "yellow" => Some(Self::Yellow),
            "blue" => Some(Self::Blue),
            "magenta" => Some(Self::Magenta),
            "cyan" => Some(Self::Cyan),
            "white" => Some(Self::White),
            "gray" | "grey" => Some(Self::Gray),
            _ => None,
        }
    }

    /// SGR foreground code.
    fn fg_code(self) -> u8 {
        match self {
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
            Self::Gray => 90,
        }
    }

    /// SGR background code.
    fn bg_code(self) -> u8 {
        self.fg_code() + 10
    }
}

/// Error type for color spec parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    UnknownName(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color spec"),
            Self::UnknownName(s) => write!(f, "Unknown color or attribute: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

/// A parsed color/attribute combination ready to be applied to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Paint {
    color: Option<NamedColor>,
    background: Option<NamedColor>,
    attributes: Attributes,
}

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("word pattern is valid"));

impl Paint {
    /// A paint with no color and no attributes; applying it is a no-op.
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// Check whether applying this paint would leave text unchanged.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.color.is_none() && self.background.is_none() && self.attributes.is_empty()
    }

    /// Set the foreground color.
    #[must_use]
    pub fn color(mut self, color: NamedColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn background(mut self, color: NamedColor) -> Self {
        self.background = Some(color);
        self
    }

    /// Add text attributes.
    #[must_use]
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes |= attributes;
        self
    }

    /// Parse a paint spec (cached).
    ///
    /// Supported forms, whitespace-separated and case-insensitive:
    /// - Color name: `"red"`, `"gray"`/`"grey"`
    /// - Background: `"bgRed"` or `"on red"`
    /// - Attribute: `"bold"`, `"underline"`, ...
    /// - Combined: `"bold red on white"`
    pub fn parse(spec: &str) -> Result<Self, ColorParseError> {
        static CACHE: Lazy<Mutex<LruCache<String, Paint>>> =
            Lazy::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(512).expect("non-zero"))));

        let normalized = spec.trim().to_lowercase();

        if let Ok(mut cache) = CACHE.lock()
            && let Some(cached) = cache.get(&normalized)
        {
            return Ok(*cached);
        }

        let parsed = Self::parse_uncached(&normalized)?;

        if let Ok(mut cache) = CACHE.lock() {
            cache.put(normalized, parsed);
        }

        Ok(parsed)
    }

    fn parse_uncached(normalized: &str) -> Result<Self, ColorParseError> {
        if normalized.is_empty() {
            return Err(ColorParseError::Empty);
        }

        let mut paint = Self::default();
        let mut expect_background = false;

        for token in normalized.split_whitespace() {
            if token == "on" {
                expect_background = true;
                continue;
            }
            if expect_background {
                let color = NamedColor::from_name(token)
                    .ok_or_else(|| ColorParseError::UnknownName(token.to_string()))?;
                paint.background = Some(color);
                expect_background = false;
                continue;
            }
            if let Some(rest) = token.strip_prefix("bg")
                && let Some(color) = NamedColor::from_name(rest)
            {
                paint.background = Some(color);
                continue;
            }
            if let Some(attr) = Attributes::from_attr_name(token) {
                paint.attributes |= attr;
                continue;
            }
            if let Some(color) = NamedColor::from_name(token) {
                paint.color = Some(color);
                continue;
            }
            return Err(ColorParseError::UnknownName(token.to_string()));
        }

        if expect_background {
            return Err(ColorParseError::UnknownName("on".to_string()));
        }

        Ok(paint)
    }

    fn open_codes(&self) -> SmallVec<[u8; 4]> {
        let mut codes = SmallVec::new();
        for (open, _) in self.attributes.sgr_pairs() {
            codes.push(open);
        }
        if let Some(color) = self.color {
            codes.push(color.fg_code());
        }
        if let Some(background) = self.background {
            codes.push(background.bg_code());
        }
        codes
    }

    fn close_codes(&self) -> SmallVec<[u8; 4]> {
        let mut codes = SmallVec::new();
        for (_, close) in self.attributes.sgr_pairs() {
            if !codes.contains(&close) {
                codes.push(close);
            }
        }
        if self.color.is_some() {
            codes.push(39);
        }
        if self.background.is_some() {
            codes.push(49);
        }
        codes
    }

    /// Wrap text in this paint's SGR open/close sequences.
    ///
    /// Plain paints return the text unchanged; no sequences are emitted.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_string();
        }

        let open = join_codes(&self.open_codes());
        let close = join_codes(&self.close_codes());
        format!("\x1b[{open}m{text}\x1b[{close}m")
    }

    /// Apply this paint to each word of a string, leaving whitespace bare.
    ///
    /// Painting per word keeps color intact when the string is later broken
    /// across lines at whitespace.
    #[must_use]
    pub fn apply_words(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_string();
        }

        WORD_PATTERN
            .replace_all(text, |caps: &regex::Captures<'_>| self.apply(&caps[0]))
            .into_owned()
    }
}

fn join_codes(codes: &[u8]) -> String {
    codes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure;

    #[test]
    fn test_parse_color_names() {
        assert_eq!(Paint::parse("red").unwrap(), Paint::plain().color(NamedColor::Red));
        assert_eq!(Paint::parse("grey").unwrap(), Paint::plain().color(NamedColor::Gray));
        assert_eq!(Paint::parse("gray").unwrap(), Paint::plain().color(NamedColor::Gray));
    }

    #[test]
    fn test_parse_background() {
        let expected = Paint::plain().background(NamedColor::Blue);
        assert_eq!(Paint::parse("bgBlue").unwrap(), expected);
        assert_eq!(Paint::parse("on blue").unwrap(), expected);
    }

    #[test]
    fn test_parse_combined() {
        let paint = Paint::parse("bold red on white").unwrap();
        assert_eq!(
            paint,
            Paint::plain()
                .color(NamedColor::Red)
                .background(NamedColor::White)
                .attributes(Attributes::BOLD)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Paint::parse(""), Err(ColorParseError::Empty));
        assert_eq!(
            Paint::parse("chartreuse"),
            Err(ColorParseError::UnknownName("chartreuse".to_string()))
        );
        assert!(Paint::parse("red on").is_err());
    }

    #[test]
    fn test_apply_codes() {
        let paint = Paint::plain().color(NamedColor::Red);
        assert_eq!(paint.apply("hi"), "\x1b[31mhi\x1b[39m");

        let paint = Paint::parse("bold green").unwrap();
        assert_eq!(paint.apply("ok"), "\x1b[1;32mok\x1b[22;39m");

        let paint = Paint::plain().background(NamedColor::Cyan);
        assert_eq!(paint.apply("x"), "\x1b[46mx\x1b[49m");
    }

    #[test]
    fn test_apply_plain_is_noop() {
        assert_eq!(Paint::plain().apply("text"), "text");
        assert_eq!(Paint::plain().apply_words("two words"), "two words");
    }

    #[test]
    fn test_apply_preserves_visible_width() {
        let paint = Paint::parse("bold magenta").unwrap();
        let painted = paint.apply("a colored value");
        assert_eq!(measure::visible_width(&painted), 15);
    }

    #[test]
    fn test_apply_words() {
        let paint = Paint::plain().color(NamedColor::Red);
        let painted = paint.apply_words("ab cd");
        assert_eq!(painted, "\x1b[31mab\x1b[39m \x1b[31mcd\x1b[39m");
        assert_eq!(measure::visible_width(&painted), 5);
    }

    #[test]
    fn test_gray_uses_bright_code() {
        let paint = Paint::plain().color(NamedColor::Gray);
        assert_eq!(paint.apply("g"), "\x1b[90mg\x1b[39m");
    }
}
