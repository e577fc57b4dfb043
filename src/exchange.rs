//! Exchange adapter
//!
//! Bridges "import now" / "export now" requests to the codec. The caller owns
//! the grid; a declined file prompt is a distinct, error-free outcome.

use crate::error::GridxResult;
use crate::excel::SpreadsheetCodec;
use crate::grid::CellGrid;
use std::path::PathBuf;
use tracing::{info, warn};

/// How a single import or export request ended (errors travel in the `Result`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// The prompt returned no path; nothing was read or written
    Cancelled,
    Completed,
}

impl ExchangeOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExchangeOutcome::Cancelled)
    }
}

/// Source of file paths, typically a dialog filtered to spreadsheet extensions
pub trait FilePicker {
    fn prompt_open_path(&mut self) -> Option<PathBuf>;
    fn prompt_save_path(&mut self) -> Option<PathBuf>;
}

/// Something that displays a grid and can hand over or take a full copy of it
pub trait GridView {
    fn snapshot(&self) -> CellGrid;
    fn replace(&mut self, grid: CellGrid);
}

impl GridView for CellGrid {
    fn snapshot(&self) -> CellGrid {
        self.clone()
    }

    fn replace(&mut self, grid: CellGrid) {
        *self = grid;
    }
}

/// Non-interactive picker answering with preset paths (`None` = user cancelled)
#[derive(Debug, Clone, Default)]
pub struct PresetPicker {
    pub open_path: Option<PathBuf>,
    pub save_path: Option<PathBuf>,
}

impl PresetPicker {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            open_path: Some(path.into()),
            save_path: None,
        }
    }

    pub fn save(path: impl Into<PathBuf>) -> Self {
        Self {
            open_path: None,
            save_path: Some(path.into()),
        }
    }

    pub fn cancelled() -> Self {
        Self::default()
    }
}

impl FilePicker for PresetPicker {
    fn prompt_open_path(&mut self) -> Option<PathBuf> {
        self.open_path.clone()
    }

    fn prompt_save_path(&mut self) -> Option<PathBuf> {
        self.save_path.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExchangeAdapter {
    codec: SpreadsheetCodec,
}

impl ExchangeAdapter {
    pub fn new(codec: SpreadsheetCodec) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &SpreadsheetCodec {
        &self.codec
    }

    /// Replace `grid` with the contents of the prompted workbook
    ///
    /// On cancel or on a read failure `grid` is left exactly as it was.
    pub fn import<F>(&self, grid: &mut CellGrid, prompt: F) -> GridxResult<ExchangeOutcome>
    where
        F: FnOnce() -> Option<PathBuf>,
    {
        let Some(path) = prompt() else {
            info!("Import cancelled, grid unchanged");
            return Ok(ExchangeOutcome::Cancelled);
        };

        let decoded = self.codec.decode(&path).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "Import failed, grid unchanged");
        })?;

        info!(
            path = %path.display(),
            rows = decoded.rows(),
            columns = decoded.columns(),
            "Imported workbook"
        );
        *grid = decoded;
        Ok(ExchangeOutcome::Completed)
    }

    /// Write `grid` to the prompted path. Never touches `grid`.
    pub fn export<F>(&self, grid: &CellGrid, prompt: F) -> GridxResult<ExchangeOutcome>
    where
        F: FnOnce() -> Option<PathBuf>,
    {
        let Some(path) = prompt() else {
            info!("Export cancelled, nothing written");
            return Ok(ExchangeOutcome::Cancelled);
        };

        self.codec.encode(grid, &path).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "Export failed");
        })?;

        info!(
            path = %path.display(),
            rows = grid.rows(),
            columns = grid.columns(),
            "Exported workbook"
        );
        Ok(ExchangeOutcome::Completed)
    }

    /// Import through collaborator interfaces
    pub fn import_with<V, P>(&self, view: &mut V, picker: &mut P) -> GridxResult<ExchangeOutcome>
    where
        V: GridView + ?Sized,
        P: FilePicker + ?Sized,
    {
        let mut grid = CellGrid::new(0, 0);
        let outcome = self.import(&mut grid, || picker.prompt_open_path())?;
        if outcome == ExchangeOutcome::Completed {
            view.replace(grid);
        }
        Ok(outcome)
    }

    /// Export through collaborator interfaces
    pub fn export_with<V, P>(&self, view: &V, picker: &mut P) -> GridxResult<ExchangeOutcome>
    where
        V: GridView + ?Sized,
        P: FilePicker + ?Sized,
    {
        self.export(&view.snapshot(), || picker.prompt_save_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use tempfile::TempDir;

    fn grid(data: &[&[&str]]) -> CellGrid {
        CellGrid::from_rows(
            data.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_import_cancelled_leaves_grid() {
        let adapter = ExchangeAdapter::default();
        let mut target = grid(&[&["keep", "me"]]);
        let before = target.clone();

        let outcome = adapter.import(&mut target, || None).unwrap();
        assert_eq!(outcome, ExchangeOutcome::Cancelled);
        assert!(outcome.is_cancelled());
        assert_eq!(target, before);
    }

    fn listing(dir: &std::path::Path) -> Vec<std::ffi::OsString> {
        let mut names: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_export_cancelled_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let declined = temp_dir.path().join("declined.xlsx");
        std::fs::write(temp_dir.path().join("notes.txt"), "keep").unwrap();
        let before = listing(temp_dir.path());

        // Only the open prompt has an answer; the save prompt is declined
        let mut picker = PresetPicker::open(&declined);
        let adapter = ExchangeAdapter::default();

        let outcome = adapter
            .export_with(&grid(&[&["a"]]), &mut picker)
            .unwrap();
        assert_eq!(outcome, ExchangeOutcome::Cancelled);
        assert!(!declined.exists());
        assert_eq!(listing(temp_dir.path()), before);
    }

    #[test]
    fn test_prompt_called_once() {
        let adapter = ExchangeAdapter::default();
        let calls = Cell::new(0);
        let mut target = CellGrid::default();

        adapter
            .import(&mut target, || {
                calls.set(calls.get() + 1);
                None
            })
            .unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_import_missing_file_is_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let adapter = ExchangeAdapter::default();
        let mut target = grid(&[&["x"]]);
        let before = target.clone();

        let err = adapter
            .import(&mut target, || Some(temp_dir.path().join("missing.xlsx")))
            .unwrap_err();
        assert!(err.is_read());
        assert_eq!(target, before);
    }

    #[test]
    fn test_export_then_import() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.xlsx");
        let adapter = ExchangeAdapter::default();
        let source = grid(&[&["1", "2"], &["3", "4"]]);

        let outcome = adapter.export(&source, || Some(path.clone())).unwrap();
        assert_eq!(outcome, ExchangeOutcome::Completed);

        let mut target = CellGrid::default();
        let outcome = adapter.import(&mut target, || Some(path.clone())).unwrap();
        assert_eq!(outcome, ExchangeOutcome::Completed);
        assert_eq!(target, source);
    }

    #[test]
    fn test_collaborator_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("view.xlsx");
        let adapter = ExchangeAdapter::default();

        let mut view = CellGrid::new(3, 2);
        view.set(2, 1, "last").unwrap();

        let outcome = adapter
            .export_with(&view, &mut PresetPicker::save(&path))
            .unwrap();
        assert_eq!(outcome, ExchangeOutcome::Completed);

        let mut restored = CellGrid::default();
        let outcome = adapter
            .import_with(&mut restored, &mut PresetPicker::open(&path))
            .unwrap();
        assert_eq!(outcome, ExchangeOutcome::Completed);
        assert_eq!(restored, view);
    }

    #[test]
    fn test_collaborator_cancel() {
        let adapter = ExchangeAdapter::default();
        let mut view = grid(&[&["a", "b"]]);
        let before = view.clone();

        let mut picker = PresetPicker::cancelled();
        assert!(adapter.import_with(&mut view, &mut picker).unwrap().is_cancelled());
        assert!(adapter.export_with(&view, &mut picker).unwrap().is_cancelled());
        assert_eq!(view, before);
    }
}
