//! Worker offload for long-running decode/encode
//!
//! The codec is synchronous. Interactive front ends keep the file prompt on
//! their own thread and hand the path here; the work runs on tokio's blocking
//! pool and the finished grid comes back through the returned future.

use crate::error::{GridxError, GridxResult};
use crate::excel::SpreadsheetCodec;
use crate::grid::CellGrid;
use std::path::PathBuf;
use tokio::task;
use tracing::debug;

/// Decode `path` on the blocking pool
pub async fn decode_in_background(codec: SpreadsheetCodec, path: PathBuf) -> GridxResult<CellGrid> {
    debug!(path = %path.display(), "Scheduling background decode");
    let worker_path = path.clone();
    task::spawn_blocking(move || codec.decode(&worker_path))
        .await
        .map_err(|e| GridxError::read(&path, format!("decode worker failed: {}", e)))?
}

/// Encode a grid snapshot to `path` on the blocking pool
pub async fn encode_in_background(
    codec: SpreadsheetCodec,
    grid: CellGrid,
    path: PathBuf,
) -> GridxResult<()> {
    debug!(path = %path.display(), "Scheduling background encode");
    let worker_path = path.clone();
    task::spawn_blocking(move || codec.encode(&grid, &worker_path))
        .await
        .map_err(|e| GridxError::write(&path, format!("encode worker failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_background_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bg.xlsx");
        let codec = SpreadsheetCodec::default();

        let mut grid = CellGrid::new(2, 3);
        grid.set(0, 0, "top").unwrap();
        grid.set(1, 2, "bottom").unwrap();

        encode_in_background(codec.clone(), grid.clone(), path.clone())
            .await
            .unwrap();
        let decoded = decode_in_background(codec, path).await.unwrap();
        assert_eq!(decoded, grid);
    }

    #[tokio::test]
    async fn test_background_decode_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = decode_in_background(
            SpreadsheetCodec::default(),
            temp_dir.path().join("absent.xlsx"),
        )
        .await
        .unwrap_err();
        assert!(err.is_read());
    }
}
