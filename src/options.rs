//! Table and column configuration.
//!
//! Callers describe a table with [`TableOptions`] (table-wide defaults) and
//! one [`ColumnSpec`] per header entry. At setup the two layers are overlaid
//! into per-column [`ResolvedColumnOptions`] and color names are parsed, so
//! every configuration error surfaces before any row is rendered. Inline
//! cell overrides ([`CellOverrides`]) form a third, winning layer applied
//! per cell.

use std::fmt;
use std::sync::Arc;

use crate::border::{self, BorderSet};
use crate::cell::CellValue;
use crate::color::{ColorParseError, Paint};

/// Horizontal alignment within a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Leftover space goes to the right.
    Left,
    /// Leftover space splits evenly; an odd cell goes to the right.
    #[default]
    Center,
    /// Leftover space goes to the left.
    Right,
}

/// A caller-supplied cell formatter.
///
/// Runs against each body cell value of the owning column; the returned
/// string replaces the value's canonical form. Returning `Err` aborts the
/// render with the offending row and column attached.
#[derive(Clone)]
pub struct CellFormatter(Arc<dyn Fn(&CellValue) -> Result<String, String> + Send + Sync>);

impl CellFormatter {
    pub fn new<F>(format: F) -> Self
    where
        F: Fn(&CellValue) -> Result<String, String> + Send + Sync + 'static,
    {
        Self(Arc::new(format))
    }

    pub(crate) fn format(&self, value: &CellValue) -> Result<String, String> {
        (self.0)(value)
    }
}

impl fmt::Debug for CellFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CellFormatter(..)")
    }
}

/// Error type for table configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `border_style` does not index a configured glyph set.
    InvalidBorderStyle { index: usize, available: usize },
    /// A color spec (table, column, or inline cell override) failed to parse.
    InvalidColor { spec: String, source: ColorParseError },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBorderStyle { index, available } => write!(
                f,
                "Border style {index} is out of range ({available} sets configured)"
            ),
            Self::InvalidColor { spec, source } => {
                write!(f, "Invalid color spec {spec:?}: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidColor { source, .. } => Some(source),
            Self::InvalidBorderStyle { .. } => None,
        }
    }
}

fn parse_color(spec: &Option<String>) -> Result<Option<Paint>, ConfigurationError> {
    match spec {
        None => Ok(None),
        Some(name) => Paint::parse(name)
            .map(Some)
            .map_err(|source| ConfigurationError::InvalidColor {
                spec: name.clone(),
                source,
            }),
    }
}

/// Table-wide defaults.
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Default printable column width when a column has no explicit width.
    pub max_width: usize,
    /// Blank lines emitted above the table.
    pub margin_top: usize,
    /// Spaces emitted to the left of every line.
    pub margin_left: usize,
    pub align: Align,
    pub header_align: Align,
    pub footer_align: Align,
    pub padding_left: usize,
    pub padding_right: usize,
    pub padding_top: usize,
    pub padding_bottom: usize,
    pub color: Option<String>,
    pub header_color: Option<String>,
    pub footer_color: Option<String>,
    pub border_color: Option<String>,
    /// Index into `border_characters`.
    pub border_style: usize,
    pub border_characters: Vec<BorderSet>,
    pub formatter: Option<CellFormatter>,
    /// Placeholder rendered for missing cells and (by default) null cells.
    pub default_value: String,
    /// Rendered for null cells when `error_on_null` is set.
    pub default_error_value: String,
    pub error_on_null: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            max_width: 20,
            margin_top: 1,
            margin_left: 2,
            align: Align::Center,
            header_align: Align::Center,
            footer_align: Align::Center,
            padding_left: 0,
            padding_right: 0,
            padding_top: 0,
            padding_bottom: 0,
            color: None,
            header_color: None,
            footer_color: None,
            border_color: None,
            border_style: 1,
            border_characters: border::default_sets(),
            formatter: None,
            default_value: "?".to_string(),
            default_error_value: "ERROR!".to_string(),
            error_on_null: false,
        }
    }
}

impl TableOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    #[must_use]
    pub fn margin_top(mut self, margin: usize) -> Self {
        self.margin_top = margin;
        self
    }

    #[must_use]
    pub fn margin_left(mut self, margin: usize) -> Self {
        self.margin_left = margin;
        self
    }

    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Historical spelling of [`Self::align`].
    #[must_use]
    pub fn alignment(self, align: Align) -> Self {
        self.align(align)
    }

    #[must_use]
    pub fn header_align(mut self, align: Align) -> Self {
        self.header_align = align;
        self
    }

    /// Historical spelling of [`Self::header_align`].
    #[must_use]
    pub fn header_alignment(self, align: Align) -> Self {
        self.header_align(align)
    }

    #[must_use]
    pub fn footer_align(mut self, align: Align) -> Self {
        self.footer_align = align;
        self
    }

    #[must_use]
    pub fn padding(mut self, left: usize, right: usize, top: usize, bottom: usize) -> Self {
        self.padding_left = left;
        self.padding_right = right;
        self.padding_top = top;
        self.padding_bottom = bottom;
        self
    }

    #[must_use]
    pub fn color(mut self, spec: impl Into<String>) -> Self {
        self.color = Some(spec.into());
        self
    }

    #[must_use]
    pub fn header_color(mut self, spec: impl Into<String>) -> Self {
        self.header_color = Some(spec.into());
        self
    }

    #[must_use]
    pub fn footer_color(mut self, spec: impl Into<String>) -> Self {
        self.footer_color = Some(spec.into());
        self
    }

    #[must_use]
    pub fn border_color(mut self, spec: impl Into<String>) -> Self {
        self.border_color = Some(spec.into());
        self
    }

    #[must_use]
    pub fn border_style(mut self, index: usize) -> Self {
        self.border_style = index;
        self
    }

    #[must_use]
    pub fn border_characters(mut self, sets: Vec<BorderSet>) -> Self {
        self.border_characters = sets;
        self
    }

    #[must_use]
    pub fn formatter(mut self, formatter: CellFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    #[must_use]
    pub fn default_error_value(mut self, value: impl Into<String>) -> Self {
        self.default_error_value = value.into();
        self
    }

    #[must_use]
    pub fn error_on_null(mut self, error: bool) -> Self {
        self.error_on_null = error;
        self
    }
}

/// One header entry: label plus optional per-column style overrides.
#[derive(Debug, Clone, Default)]
pub struct ColumnSpec {
    /// Header label.
    pub value: String,
    /// Display label override.
    pub alias: Option<String>,
    /// Explicit printable width.
    pub width: Option<usize>,
    pub max_width: Option<usize>,
    pub align: Option<Align>,
    pub header_align: Option<Align>,
    pub footer_align: Option<Align>,
    pub padding_left: Option<usize>,
    pub padding_right: Option<usize>,
    pub color: Option<String>,
    pub header_color: Option<String>,
    pub footer_color: Option<String>,
    pub formatter: Option<CellFormatter>,
}

impl ColumnSpec {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    /// Historical spelling of [`Self::align`].
    #[must_use]
    pub fn alignment(self, align: Align) -> Self {
        self.align(align)
    }

    #[must_use]
    pub fn header_align(mut self, align: Align) -> Self {
        self.header_align = Some(align);
        self
    }

    /// Historical spelling of [`Self::header_align`].
    #[must_use]
    pub fn header_alignment(self, align: Align) -> Self {
        self.header_align(align)
    }

    #[must_use]
    pub fn footer_align(mut self, align: Align) -> Self {
        self.footer_align = Some(align);
        self
    }

    #[must_use]
    pub fn padding_left(mut self, padding: usize) -> Self {
        self.padding_left = Some(padding);
        self
    }

    #[must_use]
    pub fn padding_right(mut self, padding: usize) -> Self {
        self.padding_right = Some(padding);
        self
    }

    #[must_use]
    pub fn color(mut self, spec: impl Into<String>) -> Self {
        self.color = Some(spec.into());
        self
    }

    #[must_use]
    pub fn header_color(mut self, spec: impl Into<String>) -> Self {
        self.header_color = Some(spec.into());
        self
    }

    #[must_use]
    pub fn footer_color(mut self, spec: impl Into<String>) -> Self {
        self.footer_color = Some(spec.into());
        self
    }

    #[must_use]
    pub fn formatter(mut self, formatter: CellFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }
}

/// Inline overrides carried by a single cell; the final, winning merge layer.
#[derive(Debug, Clone, Default)]
pub struct CellOverrides {
    pub align: Option<Align>,
    pub color: Option<String>,
    pub padding_left: Option<usize>,
    pub padding_right: Option<usize>,
    pub formatter: Option<CellFormatter>,
}

impl CellOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    #[must_use]
    pub fn color(mut self, spec: impl Into<String>) -> Self {
        self.color = Some(spec.into());
        self
    }

    #[must_use]
    pub fn padding_left(mut self, padding: usize) -> Self {
        self.padding_left = Some(padding);
        self
    }

    #[must_use]
    pub fn padding_right(mut self, padding: usize) -> Self {
        self.padding_right = Some(padding);
        self
    }

    #[must_use]
    pub fn formatter(mut self, formatter: CellFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }
}

/// Table options after validation, with colors parsed and the border set
/// selected. Computed once per table.
#[derive(Debug, Clone)]
pub struct ResolvedTableOptions {
    pub max_width: usize,
    pub margin_top: usize,
    pub margin_left: usize,
    pub align: Align,
    pub header_align: Align,
    pub footer_align: Align,
    pub padding_left: usize,
    pub padding_right: usize,
    pub padding_top: usize,
    pub padding_bottom: usize,
    pub color: Option<Paint>,
    pub header_color: Option<Paint>,
    pub footer_color: Option<Paint>,
    pub border_set: BorderSet,
    pub border_paint: Option<Paint>,
    pub formatter: Option<CellFormatter>,
    pub default_value: String,
    pub default_error_value: String,
    pub error_on_null: bool,
}

/// The overlay of one [`ColumnSpec`] over the resolved table options;
/// computed once per column and reused for every cell in that column.
#[derive(Debug, Clone)]
pub struct ResolvedColumnOptions {
    /// Display label (alias over value).
    pub label: String,
    pub width: Option<usize>,
    pub max_width: usize,
    pub align: Align,
    pub header_align: Align,
    pub footer_align: Align,
    pub padding_left: usize,
    pub padding_right: usize,
    pub color: Option<Paint>,
    pub header_color: Option<Paint>,
    pub footer_color: Option<Paint>,
    pub formatter: Option<CellFormatter>,
}

/// Validate table options and parse every table-level color.
pub fn resolve_table(options: &TableOptions) -> Result<ResolvedTableOptions, ConfigurationError> {
    let available = options.border_characters.len();
    let border_set = *options.border_characters.get(options.border_style).ok_or(
        ConfigurationError::InvalidBorderStyle {
            index: options.border_style,
            available,
        },
    )?;

    Ok(ResolvedTableOptions {
        max_width: options.max_width,
        margin_top: options.margin_top,
        margin_left: options.margin_left,
        align: options.align,
        header_align: options.header_align,
        footer_align: options.footer_align,
        padding_left: options.padding_left,
        padding_right: options.padding_right,
        padding_top: options.padding_top,
        padding_bottom: options.padding_bottom,
        color: parse_color(&options.color)?,
        header_color: parse_color(&options.header_color)?,
        footer_color: parse_color(&options.footer_color)?,
        border_set,
        border_paint: parse_color(&options.border_color)?,
        formatter: options.formatter.clone(),
        default_value: options.default_value.clone(),
        default_error_value: options.default_error_value.clone(),
        error_on_null: options.error_on_null,
    })
}

/// Overlay a column spec over the resolved table options.
pub fn resolve_column(
    spec: &ColumnSpec,
    table: &ResolvedTableOptions,
) -> Result<ResolvedColumnOptions, ConfigurationError> {
    let color = parse_color(&spec.color)?.or(table.color);
    let header_color = parse_color(&spec.header_color)?.or(table.header_color);
    let footer_color = parse_color(&spec.footer_color)?.or(table.footer_color);

    Ok(ResolvedColumnOptions {
        label: spec.alias.clone().unwrap_or_else(|| spec.value.clone()),
        width: spec.width,
        max_width: spec.max_width.unwrap_or(table.max_width),
        align: spec.align.unwrap_or(table.align),
        header_align: spec.header_align.unwrap_or(table.header_align),
        footer_align: spec.footer_align.unwrap_or(table.footer_align),
        padding_left: spec.padding_left.unwrap_or(table.padding_left),
        padding_right: spec.padding_right.unwrap_or(table.padding_right),
        color,
        header_color,
        footer_color,
        formatter: spec.formatter.clone().or_else(|| table.formatter.clone()),
    })
}
