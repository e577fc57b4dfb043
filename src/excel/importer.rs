//! Excel importer implementation - workbook → CellGrid

use crate::error::{GridxError, GridxResult};
use crate::excel::{extent, render_number};
use crate::grid::CellGrid;
use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader};
use chrono::Timelike;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Reads the first worksheet of a workbook as display text
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    /// Create a new Excel importer
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Import the first worksheet into a grid
    pub fn import(&self) -> GridxResult<CellGrid> {
        // Format is chosen by extension; unknown extensions fail here
        let mut workbook = open_workbook_auto(&self.path)
            .map_err(|e| GridxError::read(&self.path, format!("failed to open workbook: {}", e)))?;

        let recorded = extent::recorded(workbook.defined_names());

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| GridxError::read(&self.path, "workbook has no worksheets"))?
            .map_err(|e| GridxError::read(&self.path, format!("failed to read worksheet: {}", e)))?;

        match recorded {
            Some(shape) => self.anchored_grid(&range, shape),
            None => Self::populated_grid(&range),
        }
    }

    /// Grid anchored at A1 with a recorded shape (workbooks written by the exporter)
    fn anchored_grid(&self, range: &Range<Data>, shape: (usize, usize)) -> GridxResult<CellGrid> {
        let (mut rows, mut columns) = shape;

        // Cells added after export must not be dropped
        if let Some((end_row, end_col)) = range.end() {
            let (used_rows, used_cols) = (end_row as usize + 1, end_col as usize + 1);
            if used_rows > rows || used_cols > columns {
                warn!(
                    path = %self.path.display(),
                    recorded = ?shape,
                    used = ?(used_rows, used_cols),
                    "Worksheet content extends past recorded extent"
                );
                rows = rows.max(used_rows);
                columns = columns.max(used_cols);
            }
        }

        // The marker comes from the file; a shape the cell limit refuses is not trusted
        let mut grid = match CellGrid::try_new(rows, columns) {
            Ok(grid) => grid,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    recorded = ?shape,
                    error = %e,
                    "Ignoring grid extent marker, using populated range"
                );
                return Self::populated_grid(range);
            }
        };
        if let Some((start_row, start_col)) = range.start() {
            for (row, col, value) in range.used_cells() {
                grid.set(
                    start_row as usize + row,
                    start_col as usize + col,
                    render_cell(value),
                )?;
            }
        }

        Ok(grid)
    }

    /// Grid covering the populated range, from its top-left to bottom-right cell
    fn populated_grid(range: &Range<Data>) -> GridxResult<CellGrid> {
        let cells = range
            .rows()
            .map(|row| row.iter().map(render_cell).collect())
            .collect();

        CellGrid::from_rows(cells)
    }
}

/// Display text for a single cell value, regardless of its stored type
pub fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => render_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::Error(e) => e.to_string(),
        Data::DateTime(dt) => render_datetime(dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Calendar text for date cells; durations and out-of-range serials stay numeric
fn render_datetime(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        return render_number(dt.as_f64());
    }

    match dt.as_datetime() {
        Some(ndt) if ndt.time().num_seconds_from_midnight() == 0 => {
            ndt.format("%Y-%m-%d").to_string()
        }
        Some(ndt) => ndt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => render_number(dt.as_f64()),
    }
}
