//! Cell values and the cell rendering pipeline.
//!
//! One raw value plus its resolved column options becomes a
//! [`RenderedCellBlock`]: formatted, wrapped, colorized, padded, and
//! horizontally aligned lines, each exactly the column's visible width.

use crate::color::Paint;
use crate::measure;
use crate::options::{
    Align, CellOverrides, ConfigurationError, ResolvedColumnOptions, ResolvedTableOptions,
};
use crate::wrap;

/// Cells share one glyph of border gutter with the next column.
const GUTTER: usize = 1;

/// Which logical row a cell belongs to; selects alignment and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Body,
    Footer,
}

/// A raw cell value.
#[derive(Debug, Clone, Default)]
pub enum CellValue {
    /// Rendered as the configured placeholder value.
    #[default]
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// A value carrying inline style overrides.
    Styled {
        value: Box<CellValue>,
        overrides: CellOverrides,
    },
}

impl CellValue {
    /// Attach inline overrides to a value.
    #[must_use]
    pub fn styled(value: impl Into<CellValue>, overrides: CellOverrides) -> Self {
        Self::Styled {
            value: Box::new(value.into()),
            overrides,
        }
    }

    /// The value beneath any style wrapper.
    #[must_use]
    pub fn unstyled(&self) -> &CellValue {
        match self {
            Self::Styled { value, .. } => value.unstyled(),
            other => other,
        }
    }

    /// Inline overrides, if this is a styled value.
    #[must_use]
    pub fn overrides(&self) -> Option<&CellOverrides> {
        match self {
            Self::Styled { overrides, .. } => Some(overrides),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self.unstyled(), Self::Null)
    }

    /// Canonical string form, used when no formatter applies.
    #[must_use]
    pub fn display(&self) -> String {
        match self.unstyled() {
            Self::Null => String::new(),
            Self::Text(s) => s.clone(),
            Self::Int(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Styled { .. } => unreachable!("unstyled never returns Styled"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// The output of cell rendering.
#[derive(Debug, Clone)]
pub struct RenderedCellBlock {
    /// Lines of identical visible width (the column width).
    pub lines: Vec<String>,
    /// Width available to wrapped text after padding and border gutter.
    pub inner_width: usize,
}

/// Error from rendering a single cell; the orchestrator attaches indices.
#[derive(Debug, Clone)]
pub enum CellError {
    /// A caller-supplied formatter returned an error.
    Formatter(String),
    /// An inline override carried an invalid color spec.
    Config(ConfigurationError),
}

/// Render one cell value into a block of column-width lines.
pub fn render(
    value: &CellValue,
    kind: RowKind,
    width: usize,
    column: &ResolvedColumnOptions,
    table: &ResolvedTableOptions,
) -> Result<RenderedCellBlock, CellError> {
    let overrides = value.overrides();

    let mut align = match kind {
        RowKind::Header => column.header_align,
        RowKind::Body => column.align,
        RowKind::Footer => column.footer_align,
    };
    let mut paint = match kind {
        RowKind::Header => column.header_color.or(column.color),
        RowKind::Body => column.color,
        RowKind::Footer => column.footer_color.or(column.color),
    };
    let mut padding_left = column.padding_left;
    let mut padding_right = column.padding_right;
    let mut formatter = column.formatter.as_ref();

    if let Some(o) = overrides {
        if let Some(a) = o.align {
            align = a;
        }
        if let Some(spec) = &o.color {
            paint = Some(Paint::parse(spec).map_err(|source| {
                CellError::Config(ConfigurationError::InvalidColor {
                    spec: spec.clone(),
                    source,
                })
            })?);
        }
        if let Some(p) = o.padding_left {
            padding_left = p;
        }
        if let Some(p) = o.padding_right {
            padding_right = p;
        }
        if let Some(f) = &o.formatter {
            formatter = Some(f);
        }
    }

    let display = if value.is_null() {
        if table.error_on_null {
            table.default_error_value.clone()
        } else {
            table.default_value.clone()
        }
    } else if kind == RowKind::Body
        && let Some(formatter) = formatter
    {
        formatter.format(value).map_err(CellError::Formatter)?
    } else {
        value.display()
    };

    let inner_width = width
        .saturating_sub(padding_left + padding_right + GUTTER)
        .max(1);

    let lines = wrap::wrap(&display, inner_width)
        .into_iter()
        .map(|line| {
            let line = match &paint {
                Some(p) => p.apply(&line),
                None => line,
            };
            let padded = format!(
                "{}{line}{}",
                " ".repeat(padding_left),
                " ".repeat(padding_right)
            );
            align_to_width(padded, width, align)
        })
        .collect();

    Ok(RenderedCellBlock { lines, inner_width })
}

/// Pad a line out to `width` visible cells according to `align`.
fn align_to_width(line: String, width: usize, align: Align) -> String {
    let visible = measure::visible_width(&line);
    if visible >= width {
        return line;
    }
    let space = width - visible;
    match align {
        Align::Center => {
            let left = space / 2;
            format!("{}{line}{}", " ".repeat(left), " ".repeat(space - left))
        }
        Align::Right => format!("{}{line}", " ".repeat(space)),
        Align::Left => format!("{line}{}", " ".repeat(space)),
    }
}
