//! Workbook-level extent marker
//!
//! A worksheet only remembers populated cells, so a grid whose edge rows or
//! columns are empty would shrink on the way back in. Encode records the grid
//! shape as two named constants; decode uses them to restore the exact shape.

use crate::grid::{MAX_COLUMNS, MAX_ROWS};
use rust_xlsxwriter::{Workbook, XlsxError};
use tracing::warn;

pub(crate) const ROWS_NAME: &str = "GridRows";
pub(crate) const COLUMNS_NAME: &str = "GridColumns";

/// Store the grid shape as workbook-scoped defined names
pub(crate) fn record(workbook: &mut Workbook, shape: (usize, usize)) -> Result<(), XlsxError> {
    let (rows, columns) = shape;
    workbook.define_name(ROWS_NAME, &format!("={}", rows))?;
    workbook.define_name(COLUMNS_NAME, &format!("={}", columns))?;
    Ok(())
}

/// Read a recorded shape back from a workbook's defined names
///
/// Both names must be present and hold in-range integers; anything else is
/// treated as a foreign workbook.
pub(crate) fn recorded(names: &[(String, String)]) -> Option<(usize, usize)> {
    let lookup = |key: &str| {
        names
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, formula)| formula.trim().trim_start_matches('=').trim().to_string())
    };

    match (lookup(ROWS_NAME), lookup(COLUMNS_NAME)) {
        (None, None) => None,
        (Some(rows), Some(columns)) => match (rows.parse::<usize>(), columns.parse::<usize>()) {
            (Ok(r), Ok(c)) if r <= MAX_ROWS && c <= MAX_COLUMNS => Some((r, c)),
            _ => {
                warn!(%rows, %columns, "Ignoring malformed grid extent marker");
                None
            }
        },
        _ => {
            warn!("Ignoring incomplete grid extent marker");
            None
        }
    }
}
