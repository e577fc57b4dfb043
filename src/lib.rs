//! GridX - tabular exchange between text grids and Excel workbooks
//!
//! This library moves a rectangular grid of text cells in and out of
//! spreadsheet files without losing its shape.
//!
//! # Features
//!
//! - `CellGrid`: always-rectangular table of text addressed by (row, column)
//! - Decode any workbook calamine reads (.xlsx, .xlsm, .xlsb, .xls, .ods)
//! - Encode to .xlsx with no header row and no index column
//! - Exact shape round trip, including empty edge rows and columns
//! - User-cancel aware import/export adapter
//!
//! # Example
//!
//! ```no_run
//! use royalbit_gridx::exchange::{ExchangeAdapter, ExchangeOutcome};
//! use royalbit_gridx::grid::CellGrid;
//! use std::path::PathBuf;
//!
//! let adapter = ExchangeAdapter::default();
//! let mut grid = CellGrid::default();
//!
//! let outcome = adapter.import(&mut grid, || Some(PathBuf::from("positions.xlsx")))?;
//! if outcome == ExchangeOutcome::Completed {
//!     println!("Loaded {}x{}", grid.rows(), grid.columns());
//! }
//! # Ok::<(), royalbit_gridx::error::GridxError>(())
//! ```

pub mod background;
pub mod cli;
pub mod config;
pub mod error;
pub mod excel;
pub mod exchange;
pub mod grid;

// Re-export commonly used types
pub use config::{CellTyping, ExchangeConfig};
pub use error::{GridxError, GridxResult};
pub use excel::SpreadsheetCodec;
pub use exchange::{ExchangeAdapter, ExchangeOutcome, FilePicker, GridView, PresetPicker};
pub use grid::CellGrid;
