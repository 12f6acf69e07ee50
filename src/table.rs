//! Table orchestration: configuration, layout, and final string assembly.
//!
//! A [`Table`] is built once from a header specification, body rows, and
//! options; configuration problems surface at construction. Rendering is a
//! pure computation over the immutable table: widths are resolved once per
//! call, header/body/footer blocks are built once each, and the output is
//! assembled with borders interleaved. Nothing is shared across render
//! calls, so independent tables render safely in parallel.

use std::fmt;

use crate::border;
use crate::cell::{self, CellError, CellValue, RowKind};
use crate::color::Paint;
use crate::options::{
    self, ColumnSpec, ConfigurationError, ResolvedColumnOptions, ResolvedTableOptions,
    TableOptions,
};
use crate::row::{self, RowBlock};
use crate::terminal;
use crate::widths;

/// Error type for a render call.
#[derive(Debug, Clone)]
pub enum RenderError {
    Config(ConfigurationError),
    /// A caller-supplied formatter returned an error; `row` is `None` when
    /// the failing cell was not in a body row.
    Formatter {
        row: Option<usize>,
        column: usize,
        message: String,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::Formatter {
                row: Some(row),
                column,
                message,
            } => write!(f, "Cell formatter failed at row {row}, column {column}: {message}"),
            Self::Formatter {
                row: None,
                column,
                message,
            } => write!(f, "Cell formatter failed at column {column}: {message}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Formatter { .. } => None,
        }
    }
}

impl From<ConfigurationError> for RenderError {
    fn from(error: ConfigurationError) -> Self {
        Self::Config(error)
    }
}

/// A recoverable layout condition, reported but not fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A body row's cell count differed from the column count; missing
    /// cells were padded with the placeholder, extra cells dropped.
    RowArity {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A column width fell to zero under proportional shrink and was
    /// clamped to 1.
    WidthClamped { column: usize },
    /// A null cell was substituted while `error_on_null` is set.
    NullCell { row: usize, column: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowArity {
                row,
                expected,
                found,
            } => write!(f, "Row {row} has {found} cells, expected {expected}"),
            Self::WidthClamped { column } => {
                write!(f, "Column {column} width clamped to 1 after shrinking")
            }
            Self::NullCell { row, column } => {
                write!(f, "Null cell at row {row}, column {column}")
            }
        }
    }
}

/// An immutable table ready to render.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<ResolvedColumnOptions>,
    has_header: bool,
    rows: Vec<Vec<CellValue>>,
    footer: Option<Vec<CellValue>>,
    options: ResolvedTableOptions,
}

impl Table {
    /// Build a table from a header specification, body rows, and options.
    ///
    /// All configuration is validated here: the border style index, every
    /// color spec (table-wide, per-column, and inline cell overrides). An
    /// empty header is legal; the column count then falls back to the
    /// widest body row with `max_width` applied uniformly, and no header
    /// row is rendered.
    pub fn new(
        header: Vec<ColumnSpec>,
        rows: Vec<Vec<CellValue>>,
        options: TableOptions,
    ) -> Result<Self, ConfigurationError> {
        let resolved = options::resolve_table(&options)?;

        let has_header = !header.is_empty();
        let specs = if has_header {
            header
        } else {
            let count = rows.iter().map(Vec::len).max().unwrap_or(0);
            vec![ColumnSpec::default(); count]
        };

        let columns = specs
            .iter()
            .map(|spec| options::resolve_column(spec, &resolved))
            .collect::<Result<Vec<_>, _>>()?;

        for row in &rows {
            validate_row(row)?;
        }

        Ok(Self {
            columns,
            has_header,
            rows,
            footer: None,
            options: resolved,
        })
    }

    /// Attach a footer row, rendered after the last body row behind one
    /// more separator.
    pub fn with_footer(mut self, footer: Vec<CellValue>) -> Result<Self, ConfigurationError> {
        validate_row(&footer)?;
        self.footer = Some(footer);
        Ok(self)
    }

    /// Number of resolved columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of body rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Render to a string, shrinking to the detected terminal width.
    pub fn render(&self) -> Result<String, RenderError> {
        self.render_to_width(terminal::width_hint())
    }

    /// Render to a string against an explicit terminal width hint.
    ///
    /// `None` disables proportional shrinking.
    pub fn render_to_width(&self, terminal_width: Option<usize>) -> Result<String, RenderError> {
        self.render_report(terminal_width).map(|(output, _)| output)
    }

    /// Render, returning the output together with any layout diagnostics.
    pub fn render_report(
        &self,
        terminal_width: Option<usize>,
    ) -> Result<(String, Vec<Diagnostic>), RenderError> {
        let mut diagnostics = Vec::new();

        if self.columns.is_empty() {
            return Ok((String::new(), diagnostics));
        }

        let opts = &self.options;
        let widths = widths::resolve(&self.columns, opts.margin_left, terminal_width, &mut diagnostics);
        let blocks = self.build_blocks(&widths, &mut diagnostics)?;

        let borders = border::build(
            &opts.border_set,
            &widths,
            opts.margin_left,
            opts.border_paint.as_ref(),
        );
        let vertical = border::vertical(&opts.border_set, opts.border_paint.as_ref());
        let margin = " ".repeat(opts.margin_left);

        let mut output = String::new();
        output.push_str(&"\n".repeat(opts.margin_top));
        output.push_str(&borders.top);
        output.push('\n');

        for (i, block) in blocks.iter().enumerate() {
            for line in block.join(&vertical, &margin) {
                output.push_str(&line);
                output.push('\n');
            }
            if i + 1 < blocks.len() {
                output.push_str(&borders.middle);
                output.push('\n');
            }
        }

        output.push_str(&borders.bottom);
        output.push('\n');

        Ok((output, diagnostics))
    }

    /// Render to raw per-row line arrays: margins and vertical glyphs
    /// included, border rows and the top margin excluded.
    pub fn render_rows(
        &self,
        terminal_width: Option<usize>,
    ) -> Result<Vec<Vec<String>>, RenderError> {
        let mut diagnostics = Vec::new();

        if self.columns.is_empty() {
            return Ok(Vec::new());
        }

        let opts = &self.options;
        let widths = widths::resolve(&self.columns, opts.margin_left, terminal_width, &mut diagnostics);
        let blocks = self.build_blocks(&widths, &mut diagnostics)?;

        let vertical = border::vertical(&opts.border_set, opts.border_paint.as_ref());
        let margin = " ".repeat(opts.margin_left);

        Ok(blocks.iter().map(|b| b.join(&vertical, &margin)).collect())
    }

    /// Build the header, body, and footer blocks in order.
    fn build_blocks(
        &self,
        widths: &[usize],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<RowBlock>, RenderError> {
        let opts = &self.options;
        let expected = self.columns.len();
        let mut blocks = Vec::with_capacity(self.rows.len() + 2);

        if self.has_header {
            let mut rendered = Vec::with_capacity(expected);
            for (ci, column) in self.columns.iter().enumerate() {
                let label = CellValue::Text(column.label.clone());
                rendered.push(
                    cell::render(&label, RowKind::Header, widths[ci], column, opts)
                        .map_err(|e| attach(e, None, ci))?,
                );
            }
            blocks.push(row::assemble(&rendered, widths, RowKind::Header, 0, 0));
        }

        for (ri, values) in self.rows.iter().enumerate() {
            if values.len() != expected {
                log::warn!(
                    "row {ri} has {} cells, expected {expected}; padding with placeholder",
                    values.len()
                );
                diagnostics.push(Diagnostic::RowArity {
                    row: ri,
                    expected,
                    found: values.len(),
                });
            }

            let mut rendered = Vec::with_capacity(expected);
            for (ci, column) in self.columns.iter().enumerate() {
                let placeholder;
                let value = match values.get(ci) {
                    Some(value) => value,
                    None => {
                        placeholder = CellValue::Text(opts.default_value.clone());
                        &placeholder
                    }
                };
                if value.is_null() && opts.error_on_null {
                    log::warn!("null cell at row {ri}, column {ci}");
                    diagnostics.push(Diagnostic::NullCell { row: ri, column: ci });
                }
                rendered.push(
                    cell::render(value, RowKind::Body, widths[ci], column, opts)
                        .map_err(|e| attach(e, Some(ri), ci))?,
                );
            }
            blocks.push(row::assemble(
                &rendered,
                widths,
                RowKind::Body,
                opts.padding_top,
                opts.padding_bottom,
            ));
        }

        if let Some(footer) = &self.footer {
            let mut rendered = Vec::with_capacity(expected);
            for (ci, column) in self.columns.iter().enumerate() {
                let placeholder;
                let value = match footer.get(ci) {
                    Some(value) => value,
                    None => {
                        placeholder = CellValue::Text(opts.default_value.clone());
                        &placeholder
                    }
                };
                rendered.push(
                    cell::render(value, RowKind::Footer, widths[ci], column, opts)
                        .map_err(|e| attach(e, None, ci))?,
                );
            }
            blocks.push(row::assemble(&rendered, widths, RowKind::Footer, 0, 0));
        }

        Ok(blocks)
    }
}

fn attach(error: CellError, row: Option<usize>, column: usize) -> RenderError {
    match error {
        CellError::Config(e) => RenderError::Config(e),
        CellError::Formatter(message) => RenderError::Formatter {
            row,
            column,
            message,
        },
    }
}

fn validate_row(row: &[CellValue]) -> Result<(), ConfigurationError> {
    for value in row {
        if let Some(overrides) = value.overrides()
            && let Some(spec) = &overrides.color
        {
            Paint::parse(spec).map_err(|source| ConfigurationError::InvalidColor {
                spec: spec.clone(),
                source,
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Align, CellFormatter};

    fn cells(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|&v| CellValue::from(v)).collect()
    }

    #[test]
    fn test_basic_render_golden() {
        let table = Table::new(
            vec![
                ColumnSpec::new("Name").width(10),
                ColumnSpec::new("Age").width(5),
            ],
            vec![vec![CellValue::from("Alice"), CellValue::from(30)]],
            TableOptions::default(),
        )
        .unwrap();

        let output = table.render_to_width(None).unwrap();
        let expected = concat!(
            "\n",
            "  ┌──────────┬─────┐\n",
            "  │   Name   │ Age │\n",
            "  ├──────────┼─────┤\n",
            "  │  Alice   │ 30  │\n",
            "  └──────────┴─────┘\n",
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_no_middle_border_for_empty_body() {
        let table = Table::new(
            vec![ColumnSpec::new("Only").width(6)],
            Vec::new(),
            TableOptions::default().margin_top(0).margin_left(0),
        )
        .unwrap();
        let output = table.render_to_width(None).unwrap();
        assert_eq!(output, "┌──────┐\n│ Only │\n└──────┘\n");
    }

    #[test]
    fn test_zero_columns_render_empty() {
        let table = Table::new(Vec::new(), Vec::new(), TableOptions::default()).unwrap();
        assert_eq!(table.render_to_width(None).unwrap(), "");
        assert!(table.render_rows(None).unwrap().is_empty());
    }

    #[test]
    fn test_empty_header_uses_body_arity() {
        let table = Table::new(
            Vec::new(),
            vec![cells(&["a", "b"]), cells(&["c", "d"])],
            TableOptions::default()
                .margin_top(0)
                .margin_left(0)
                .max_width(4),
        )
        .unwrap();
        assert_eq!(table.column_count(), 2);

        let output = table.render_to_width(None).unwrap();
        // No header block: top border, two body rows with one separator
        assert_eq!(
            output,
            "┌────┬────┐\n│ a  │ b  │\n├────┼────┤\n│ c  │ d  │\n└────┴────┘\n"
        );
    }

    #[test]
    fn test_row_arity_diagnostics() {
        let table = Table::new(
            vec![ColumnSpec::new("A").width(5), ColumnSpec::new("B").width(5)],
            vec![cells(&["only"])],
            TableOptions::default().margin_top(0).margin_left(0),
        )
        .unwrap();
        let (output, diagnostics) = table.render_report(None).unwrap();
        assert_eq!(
            diagnostics,
            vec![Diagnostic::RowArity {
                row: 0,
                expected: 2,
                found: 1
            }]
        );
        // The missing cell renders the placeholder
        assert!(output.contains('?'));
    }

    #[test]
    fn test_invalid_border_style_at_setup() {
        let err = Table::new(
            vec![ColumnSpec::new("A")],
            Vec::new(),
            TableOptions::default().border_style(9),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidBorderStyle { index: 9, .. }));
    }

    #[test]
    fn test_inline_override_color_validated_at_setup() {
        let rows = vec![vec![CellValue::styled(
            "x",
            crate::options::CellOverrides::new().color("sparkle"),
        )]];
        let err = Table::new(vec![ColumnSpec::new("A")], rows, TableOptions::default())
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidColor { ref spec, .. } if spec == "sparkle"));
    }

    #[test]
    fn test_formatter_error_carries_indices() {
        let failing = CellFormatter::new(|_| Err("boom".to_string()));
        let table = Table::new(
            vec![
                ColumnSpec::new("A").width(5),
                ColumnSpec::new("B").width(5).formatter(failing),
            ],
            vec![cells(&["x", "y"]), cells(&["x", "y"])],
            TableOptions::default(),
        )
        .unwrap();
        let err = table.render_to_width(None).unwrap_err();
        match err {
            RenderError::Formatter { row, column, message } => {
                assert_eq!(row, Some(0));
                assert_eq!(column, 1);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_footer_renders_after_separator() {
        let table = Table::new(
            vec![ColumnSpec::new("N").width(5)],
            vec![cells(&["a"])],
            TableOptions::default().margin_top(0).margin_left(0),
        )
        .unwrap()
        .with_footer(cells(&["sum"]))
        .unwrap();
        let output = table.render_to_width(None).unwrap();
        assert_eq!(
            output,
            "┌─────┐\n│  N  │\n├─────┤\n│  a  │\n├─────┤\n│ sum │\n└─────┘\n"
        );
    }

    #[test]
    fn test_render_rows_excludes_borders() {
        let table = Table::new(
            vec![ColumnSpec::new("N").width(5)],
            vec![cells(&["a"]), cells(&["b"])],
            TableOptions::default().margin_top(0).margin_left(0),
        )
        .unwrap();
        let rows = table.render_rows(None).unwrap();
        assert_eq!(rows.len(), 3); // header + two body rows
        assert_eq!(rows[1], vec!["│  a  │"]);
    }

    #[test]
    fn test_margins() {
        let table = Table::new(
            vec![ColumnSpec::new("N").width(3)],
            Vec::new(),
            TableOptions::default().margin_top(2).margin_left(1),
        )
        .unwrap();
        let output = table.render_to_width(None).unwrap();
        assert!(output.starts_with("\n\n ┌"));
        for line in output.lines().skip(2) {
            assert!(line.starts_with(' '));
        }
    }

    #[test]
    fn test_vertical_padding_adds_blank_lines() {
        let table = Table::new(
            vec![ColumnSpec::new("N").width(5)],
            vec![cells(&["a"])],
            TableOptions::default()
                .margin_top(0)
                .margin_left(0)
                .padding(0, 0, 1, 1),
        )
        .unwrap();
        let output = table.render_to_width(None).unwrap();
        assert_eq!(
            output,
            "┌─────┐\n│  N  │\n├─────┤\n│     │\n│  a  │\n│     │\n└─────┘\n"
        );
    }

    #[test]
    fn test_header_alignment_independent_of_body() {
        let table = Table::new(
            vec![ColumnSpec::new("H")
                .width(6)
                .align(Align::Left)
                .header_align(Align::Right)],
            vec![cells(&["b"])],
            TableOptions::default().margin_top(0).margin_left(0),
        )
        .unwrap();
        let output = table.render_to_width(None).unwrap();
        assert!(output.contains("│     H│"));
        assert!(output.contains("│b     │"));
    }

    #[test]
    fn test_render_is_repeatable() {
        let table = Table::new(
            vec![ColumnSpec::new("N").width(4)],
            vec![cells(&["v"])],
            TableOptions::default(),
        )
        .unwrap();
        let first = table.render_to_width(None).unwrap();
        let second = table.render_to_width(None).unwrap();
        assert_eq!(first, second);
    }
}
