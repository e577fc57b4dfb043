use std::path::{Path, PathBuf};
use thiserror::Error;

pub type GridxResult<T> = Result<T, GridxError>;

#[derive(Error, Debug)]
pub enum GridxError {
    /// Workbook missing, unsupported or corrupt. Decode never returns a partial grid.
    #[error("Read error: {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    /// Destination unwritable, path invalid, or grid too large for a sheet.
    #[error("Write error: {}: {reason}", .path.display())]
    Write { path: PathBuf, reason: String },

    #[error("Shape error: {0}")]
    Shape(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GridxError {
    pub fn read(path: &Path, reason: impl ToString) -> Self {
        GridxError::Read {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn write(path: &Path, reason: impl ToString) -> Self {
        GridxError::Write {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn is_read(&self) -> bool {
        matches!(self, GridxError::Read { .. })
    }

    pub fn is_write(&self) -> bool {
        matches!(self, GridxError::Write { .. })
    }
}
