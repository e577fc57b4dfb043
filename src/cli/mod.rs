//! CLI command handlers

pub mod commands;

pub use commands::{export, import, inspect, load_config, new_workbook, GlobalOptions};
