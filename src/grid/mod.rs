//! In-memory cell grid
//!
//! A `CellGrid` is a rectangular table of text values addressed by zero-based
//! (row, column). Every in-bounds coordinate has a value; unset cells are `""`.

pub mod address;

use crate::error::{GridxError, GridxResult};
use serde::{Deserialize, Serialize};

pub use address::{cell_reference, column_index, column_letter};

/// Largest row count a worksheet can hold
pub const MAX_ROWS: usize = 1_048_576;

/// Largest column count a worksheet can hold
pub const MAX_COLUMNS: usize = 16_384;

/// Largest number of cells a grid built from an untrusted shape may allocate
pub const MAX_CELLS: usize = 1 << 24;

/// Rows in a freshly created grid
pub const DEFAULT_ROWS: usize = 100;

/// Columns in a freshly created grid
pub const DEFAULT_COLUMNS: usize = 20;

//==============================================================================
// Cell Grid
//==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridDocument", into = "GridDocument")]
pub struct CellGrid {
    rows: usize,
    columns: usize,
    /// Row-major, always `rows * columns` long
    cells: Vec<String>,
}

impl CellGrid {
    /// Create an all-empty grid of the given shape
    ///
    /// Shapes read from files or command lines go through [`CellGrid::try_new`].
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![String::new(); rows * columns],
        }
    }

    /// Create an all-empty grid, refusing shapes past the sheet or cell limits
    pub fn try_new(rows: usize, columns: usize) -> GridxResult<Self> {
        if rows > MAX_ROWS || columns > MAX_COLUMNS {
            return Err(GridxError::Shape(format!(
                "{}x{} exceeds the sheet limit of {}x{}",
                rows, columns, MAX_ROWS, MAX_COLUMNS
            )));
        }

        match rows.checked_mul(columns) {
            Some(cells) if cells <= MAX_CELLS => Ok(Self::new(rows, columns)),
            _ => Err(GridxError::Shape(format!(
                "{}x{} exceeds the limit of {} cells",
                rows, columns, MAX_CELLS
            ))),
        }
    }

    /// Build a grid from row vectors, rejecting ragged input
    pub fn from_rows(rows: Vec<Vec<String>>) -> GridxResult<Self> {
        let columns = rows.first().map(|r| r.len()).unwrap_or(0);

        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns) {
            return Err(GridxError::Shape(format!(
                "row {} has {} cells, expected {}",
                idx,
                row.len(),
                columns
            )));
        }

        let row_count = rows.len();
        let cells = rows.into_iter().flatten().collect();

        Ok(Self {
            rows: row_count,
            columns,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// True when the grid has no cells at all (zero rows or zero columns)
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.offset(row, col).map(|i| self.cells[i].as_str())
    }

    /// Overwrite a single cell
    pub fn set(&mut self, row: usize, col: usize, value: impl Into<String>) -> GridxResult<()> {
        let idx = self.offset(row, col).ok_or_else(|| {
            GridxError::Shape(format!(
                "cell ({}, {}) is outside a {}x{} grid",
                row, col, self.rows, self.columns
            ))
        })?;
        self.cells[idx] = value.into();
        Ok(())
    }

    pub fn row(&self, row: usize) -> Option<&[String]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.columns;
        Some(&self.cells[start..start + self.columns])
    }

    /// Iterate rows top to bottom. Yields `rows()` slices even when there are no columns.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[String]> + '_ {
        (0..self.rows).filter_map(move |r| self.row(r))
    }

    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.iter_rows().map(|r| r.to_vec()).collect()
    }

    /// Number of cells holding non-empty text
    pub fn populated_cells(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.columns).then(|| row * self.columns + col)
    }
}

impl Default for CellGrid {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLUMNS)
    }
}

//==============================================================================
// Serialized form
//==============================================================================

/// On-disk grid document. The explicit shape keeps Nx0 grids representable.
#[derive(Debug, Serialize, Deserialize)]
struct GridDocument {
    rows: usize,
    columns: usize,
    #[serde(default)]
    cells: Vec<Vec<String>>,
}

impl TryFrom<GridDocument> for CellGrid {
    type Error = GridxError;

    fn try_from(doc: GridDocument) -> GridxResult<Self> {
        if doc.cells.len() != doc.rows {
            return Err(GridxError::Shape(format!(
                "document declares {} rows but holds {}",
                doc.rows,
                doc.cells.len()
            )));
        }
        if let Some((idx, row)) = doc
            .cells
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != doc.columns)
        {
            return Err(GridxError::Shape(format!(
                "row {} has {} cells, document declares {} columns",
                idx,
                row.len(),
                doc.columns
            )));
        }

        Ok(Self {
            rows: doc.rows,
            columns: doc.columns,
            cells: doc.cells.into_iter().flatten().collect(),
        })
    }
}

impl From<CellGrid> for GridDocument {
    fn from(grid: CellGrid) -> Self {
        GridDocument {
            rows: grid.rows,
            columns: grid.columns,
            cells: grid.to_rows(),
        }
    }
}
