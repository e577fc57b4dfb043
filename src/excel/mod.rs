//! Spreadsheet codec
//!
//! Converts a `CellGrid` to and from a workbook file:
//! - Decode: first worksheet (.xlsx, .xlsm, .xlsb, .xls, .ods) → grid of display text
//! - Encode: grid → single-sheet .xlsx, no header row, no index column

mod exporter;
mod extent;
mod importer;

pub use exporter::ExcelExporter;
pub use importer::{render_cell, ExcelImporter};

use crate::config::ExchangeConfig;
use crate::error::GridxResult;
use crate::grid::CellGrid;
use std::path::Path;
use tracing::debug;

/// Extensions decode accepts (file picker filter for opening)
pub const OPEN_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Extensions encode produces (file picker filter for saving)
pub const SAVE_EXTENSIONS: &[&str] = &["xlsx"];

/// Shortest text that parses back to the same number (1.0 → "1", 2.5 → "2.5")
pub(crate) fn render_number(n: f64) -> String {
    n.to_string()
}

/// Pure grid ↔ workbook conversion, parameterized by configuration
#[derive(Debug, Clone, Default)]
pub struct SpreadsheetCodec {
    config: ExchangeConfig,
}

impl SpreadsheetCodec {
    pub fn new(config: ExchangeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// Read the first worksheet of `path` into a grid. All-or-nothing.
    pub fn decode(&self, path: &Path) -> GridxResult<CellGrid> {
        debug!(path = %path.display(), "Decoding workbook");
        let grid = ExcelImporter::new(path).import()?;
        debug!(
            rows = grid.rows(),
            columns = grid.columns(),
            "Decoded workbook"
        );
        Ok(grid)
    }

    /// Write `grid` to `path` as a single-sheet workbook
    pub fn encode(&self, grid: &CellGrid, path: &Path) -> GridxResult<()> {
        debug!(
            path = %path.display(),
            rows = grid.rows(),
            columns = grid.columns(),
            atomic = self.config.atomic_save,
            "Encoding workbook"
        );
        ExcelExporter::new(grid, &self.config).export(path)
    }
}
