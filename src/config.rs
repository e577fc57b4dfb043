//! Exchange configuration
//!
//! Loaded from an optional YAML file; every field has a default so an empty
//! file (or no file) yields a working configuration.

use crate::error::{GridxError, GridxResult};
use crate::grid::{DEFAULT_COLUMNS, DEFAULT_ROWS, MAX_CELLS, MAX_COLUMNS, MAX_ROWS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Characters Excel refuses in worksheet names
const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// How non-empty cells are stored when encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellTyping {
    /// Every cell is written as a string
    #[default]
    Text,
    /// Cells whose text is an exact number rendering are written as numbers
    Inferred,
}

impl std::str::FromStr for CellTyping {
    type Err = GridxError;

    fn from_str(s: &str) -> GridxResult<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(CellTyping::Text),
            "inferred" => Ok(CellTyping::Inferred),
            other => Err(GridxError::Config(format!(
                "unknown cell typing '{}' (expected 'text' or 'inferred')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExchangeConfig {
    /// Name of the single worksheet written on export
    pub sheet_name: String,
    pub cell_typing: CellTyping,
    /// Write to a temp file and rename over the target
    pub atomic_save: bool,
    pub default_rows: usize,
    pub default_columns: usize,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            cell_typing: CellTyping::Text,
            atomic_save: true,
            default_rows: DEFAULT_ROWS,
            default_columns: DEFAULT_COLUMNS,
        }
    }
}

impl ExchangeConfig {
    /// Read and validate a YAML configuration file
    pub fn load(path: &Path) -> GridxResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GridxError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> GridxResult<Self> {
        // An empty file deserializes to unit, not a mapping
        let config: ExchangeConfig = if content.trim().is_empty() {
            ExchangeConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GridxResult<()> {
        validate_sheet_name(&self.sheet_name)?;

        if self.default_rows > MAX_ROWS || self.default_columns > MAX_COLUMNS {
            return Err(GridxError::Config(format!(
                "default grid {}x{} exceeds the sheet limit of {}x{}",
                self.default_rows, self.default_columns, MAX_ROWS, MAX_COLUMNS
            )));
        }
        if self.default_rows.saturating_mul(self.default_columns) > MAX_CELLS {
            return Err(GridxError::Config(format!(
                "default grid {}x{} exceeds the limit of {} cells",
                self.default_rows, self.default_columns, MAX_CELLS
            )));
        }

        Ok(())
    }
}

/// Check a worksheet name against Excel's naming rules
pub fn validate_sheet_name(name: &str) -> GridxResult<()> {
    let len = name.chars().count();
    if len == 0 || len > 31 {
        return Err(GridxError::Config(format!(
            "sheet name '{}' must be 1-31 characters",
            name
        )));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_CHARS.contains(c)) {
        return Err(GridxError::Config(format!(
            "sheet name '{}' contains forbidden character '{}'",
            name, c
        )));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(GridxError::Config(format!(
            "sheet name '{}' cannot start or end with an apostrophe",
            name
        )));
    }
    Ok(())
}
