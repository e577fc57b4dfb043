//! Excel exporter implementation - CellGrid → .xlsx

use crate::config::{CellTyping, ExchangeConfig};
use crate::error::{GridxError, GridxResult};
use crate::excel::{extent, render_number, SAVE_EXTENSIONS};
use crate::grid::{CellGrid, MAX_COLUMNS, MAX_ROWS};
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Excel exporter for a single grid snapshot
pub struct ExcelExporter<'a> {
    grid: &'a CellGrid,
    sheet_name: String,
    cell_typing: CellTyping,
    atomic_save: bool,
}

impl<'a> ExcelExporter<'a> {
    /// Create a new Excel exporter
    pub fn new(grid: &'a CellGrid, config: &ExchangeConfig) -> Self {
        Self {
            grid,
            sheet_name: config.sheet_name.clone(),
            cell_typing: config.cell_typing,
            atomic_save: config.atomic_save,
        }
    }

    /// Export the grid to an Excel .xlsx file
    pub fn export(&self, output_path: &Path) -> GridxResult<()> {
        self.check_destination(output_path)?;

        let mut workbook = self
            .build_workbook()
            .map_err(|e| GridxError::write(output_path, e))?;

        if self.atomic_save {
            let buffer = workbook
                .save_to_buffer()
                .map_err(|e| GridxError::write(output_path, e))?;
            write_atomically(output_path, &buffer)
        } else {
            workbook
                .save(output_path)
                .map_err(|e| GridxError::write(output_path, e))
        }
    }

    /// Reject paths and shapes that cannot produce a readable workbook
    fn check_destination(&self, output_path: &Path) -> GridxResult<()> {
        let extension = output_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension {
            Some(ext) if SAVE_EXTENSIONS.contains(&ext.as_str()) => {}
            _ => {
                return Err(GridxError::write(
                    output_path,
                    format!("expected a .{} file", SAVE_EXTENSIONS.join(" or .")),
                ))
            }
        }

        let (rows, columns) = self.grid.shape();
        if rows > MAX_ROWS || columns > MAX_COLUMNS {
            return Err(GridxError::write(
                output_path,
                format!(
                    "grid {}x{} exceeds the sheet limit of {}x{}",
                    rows, columns, MAX_ROWS, MAX_COLUMNS
                ),
            ));
        }

        Ok(())
    }

    fn build_workbook(&self) -> Result<Workbook, XlsxError> {
        let mut workbook = Workbook::new();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        // Row 0 is data; no header row, no index column
        for (row_idx, row) in self.grid.iter_rows().enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                // Empty cells stay blank, never a placeholder token
                if value.is_empty() {
                    continue;
                }
                self.write_cell(worksheet, row_idx as u32, col_idx as u16, value)?;
            }
        }

        extent::record(&mut workbook, self.grid.shape())?;

        Ok(workbook)
    }

    fn write_cell(
        &self,
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &str,
    ) -> Result<(), XlsxError> {
        match (self.cell_typing, exact_number(value)) {
            (CellTyping::Inferred, Some(n)) => {
                worksheet.write_number(row, col, n)?;
            }
            _ => {
                worksheet.write_string(row, col, value)?;
            }
        }
        Ok(())
    }
}

/// The number `text` spells, if decoding that number yields `text` again
///
/// "42" and "2.5" qualify; "007", "1.0", "1e3" and "NaN" stay text.
fn exact_number(text: &str) -> Option<f64> {
    let n: f64 = text.parse().ok()?;
    (n.is_finite() && render_number(n) == text).then_some(n)
}

/// Write bytes to a sibling temp file and rename it over `path`
///
/// An existing file at `path` is untouched unless the rename succeeds.
fn write_atomically(path: &Path, bytes: &[u8]) -> GridxResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| GridxError::write(path, e))?;
    temp.write_all(bytes)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| GridxError::write(path, e))?;

    // Temp files are created owner-only; keep the target's mode or use the usual default
    let permissions = match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => default_permissions(),
    };
    if let Some(permissions) = permissions {
        temp.as_file()
            .set_permissions(permissions)
            .map_err(|e| GridxError::write(path, e))?;
    }

    temp.persist(path)
        .map_err(|e| GridxError::write(path, e.error))?;
    Ok(())
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
