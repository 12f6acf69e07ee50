//! # termgrid
//!
//! Fixed-width, bordered, colorized tables for character terminals.
//!
//! A table is described by a header specification (one [`ColumnSpec`] per
//! column), a matrix of body rows, and a [`TableOptions`] record of
//! table-wide defaults. Rendering word-wraps each cell to its column's
//! inner width, aligns and pads it, synchronizes cell heights within each
//! row, and frames everything in a border lattice.
//!
//! ## Quick Start
//!
//! ```rust
//! use termgrid::prelude::*;
//!
//! let table = Table::new(
//!     vec![
//!         ColumnSpec::new("Name").width(12),
//!         ColumnSpec::new("Age").width(6),
//!     ],
//!     vec![
//!         vec![CellValue::from("Alice"), CellValue::from(30)],
//!         vec![CellValue::from("Bob"), CellValue::from(25)],
//!     ],
//!     TableOptions::default(),
//! )
//! .expect("valid configuration");
//!
//! println!("{}", table.render_to_width(None).expect("render"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Visible width**: all layout is computed against on-screen cell
//!   counts, with ANSI sequences measuring zero ([`measure`])
//! - **Paint**: a named color/attribute combination applied as SGR
//!   open/close pairs ([`color`])
//! - **Column width**: the printable width of a column including padding
//!   and one shared border glyph; the wrapped text gets what remains
//! - **Diagnostics**: recoverable layout conditions (row arity mismatch,
//!   clamped widths, null substitution) are reported, never fatal

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod border;
pub mod cell;
pub mod color;
pub mod measure;
pub mod options;
pub mod row;
pub mod table;
pub mod terminal;
pub mod widths;
pub mod wrap;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::border::{ASCII, BLANK, BOX_DRAWING, BorderGlyphs, BorderSet, Borders};
    pub use crate::cell::{CellValue, RenderedCellBlock, RowKind};
    pub use crate::color::{Attributes, ColorParseError, NamedColor, Paint};
    pub use crate::options::{
        Align, CellFormatter, CellOverrides, ColumnSpec, ConfigurationError, TableOptions,
    };
    pub use crate::row::RowBlock;
    pub use crate::table::{Diagnostic, RenderError, Table};
}

// Re-export key types at crate root
pub use cell::CellValue;
pub use options::{Align, CellOverrides, ColumnSpec, ConfigurationError, TableOptions};
pub use table::{Diagnostic, RenderError, Table};
