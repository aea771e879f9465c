//! Chart output for filtered tables.
//!
//! Charts are self-contained SVG documents written to
//! `<SYMBOL>_stock_chart.svg` in the configured output directory.

mod svg;

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use crate::domain::{FilteredTable, Symbol};
use crate::error::ChartError;

pub use svg::{render_svg, SERIES_NAMES};

/// Chart style picked by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Bar,
    Line,
}

impl ChartKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
        }
    }
}

impl Display for ChartKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File name used for a symbol's chart.
pub fn chart_file_name(symbol: &Symbol) -> String {
    format!("{}_stock_chart.svg", symbol.as_str())
}

/// Writes chart files into one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartWriter {
    output_dir: PathBuf,
}

impl ChartWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Renders and writes the chart, returning the file path.
    pub fn write(
        &self,
        table: &FilteredTable,
        kind: ChartKind,
        symbol: &Symbol,
    ) -> Result<PathBuf, ChartError> {
        if table.is_empty() {
            return Err(ChartError::EmptyTable);
        }

        let path = self.output_dir.join(chart_file_name(symbol));
        let document = render_svg(table, kind, &format!("{symbol} Stock Data"));
        std::fs::write(&path, document).map_err(|source| ChartError::Io {
            path: path.display().to_string(),
            source,
        })?;

        tracing::info!(path = %path.display(), %kind, rows = table.len(), "chart written");
        Ok(path)
    }
}

impl Default for ChartWriter {
    fn default() -> Self {
        Self::new(".")
    }
}
