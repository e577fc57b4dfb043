use crate::config::{CellTyping, ExchangeConfig};
use crate::error::{GridxError, GridxResult};
use crate::excel::SpreadsheetCodec;
use crate::exchange::{ExchangeAdapter, ExchangeOutcome};
use crate::grid::{column_letter, CellGrid, MAX_COLUMNS, MAX_ROWS};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Columns shown in a terminal preview before eliding
const PREVIEW_COLUMNS: usize = 8;

/// Widest a preview cell gets before truncation
const PREVIEW_CELL_WIDTH: usize = 16;

/// Options shared by every subcommand
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub sheet_name: Option<String>,
    pub typing: Option<CellTyping>,
    pub no_atomic: bool,
}

/// Resolve configuration: file (if any), then command-line overrides
pub fn load_config(options: &GlobalOptions) -> GridxResult<ExchangeConfig> {
    let mut config = match &options.config {
        Some(path) => ExchangeConfig::load(path)?,
        None => ExchangeConfig::default(),
    };

    if let Some(name) = &options.sheet_name {
        config.sheet_name = name.clone();
    }
    if let Some(typing) = options.typing {
        config.cell_typing = typing;
    }
    if options.no_atomic {
        config.atomic_save = false;
    }

    config.validate()?;
    Ok(config)
}

fn adapter_for(config: ExchangeConfig) -> ExchangeAdapter {
    ExchangeAdapter::new(SpreadsheetCodec::new(config))
}

/// Execute the import command
pub fn import(
    input: PathBuf,
    output: Option<PathBuf>,
    options: &GlobalOptions,
    verbose: bool,
) -> GridxResult<()> {
    println!("{}", "🔥 GridX - Excel Import".bold().green());
    println!("   Input:  {}", input.display());
    if let Some(ref out) = output {
        println!("   Output: {}", out.display());
    }
    println!();

    let config = load_config(options)?;
    let adapter = adapter_for(config);

    if verbose {
        println!("{}", "📖 Reading workbook...".cyan());
    }

    let mut grid = CellGrid::new(0, 0);
    adapter.import(&mut grid, || Some(input.clone()))?;

    if verbose {
        println!(
            "   {} rows, {} columns, {} populated cells\n",
            grid.rows(),
            grid.columns(),
            grid.populated_cells()
        );
    }

    match output {
        Some(out) => {
            if verbose {
                println!("{}", "💾 Writing grid document...".cyan());
            }
            write_grid_document(&grid, &out)?;
            println!("{}", "✅ Import Complete!".bold().green());
            println!("   Grid document: {}\n", out.display());
        }
        None => {
            println!("{}", render_preview(&grid, grid.rows()));
        }
    }

    Ok(())
}

/// Execute the export command
pub fn export(
    input: PathBuf,
    output: PathBuf,
    options: &GlobalOptions,
    verbose: bool,
) -> GridxResult<()> {
    println!("{}", "🔥 GridX - Excel Export".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    let config = load_config(options)?;

    if verbose {
        println!("{}", "📖 Reading grid document...".cyan());
    }

    let grid = read_grid_document(&input)?;

    if verbose {
        println!("   {} rows, {} columns\n", grid.rows(), grid.columns());
        println!(
            "{}",
            format!(
                "📊 Writing sheet '{}' ({} cells)...",
                config.sheet_name,
                format!("{:?}", config.cell_typing).to_lowercase()
            )
            .cyan()
        );
    }

    adapter_for(config).export(&grid, || Some(output.clone()))?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   Excel file: {}\n", output.display());

    Ok(())
}

/// Execute the inspect command - shape and preview of a workbook
pub fn inspect(input: PathBuf, limit: usize, options: &GlobalOptions) -> GridxResult<()> {
    let config = load_config(options)?;
    let grid = SpreadsheetCodec::new(config).decode(&input)?;

    println!("{}", "🔍 GridX - Inspect".bold().green());
    println!("   File:    {}", input.display());
    println!("   Shape:   {} rows x {} columns", grid.rows(), grid.columns());
    println!("   Filled:  {} cells\n", grid.populated_cells());
    println!("{}", render_preview(&grid, limit));

    Ok(())
}

/// Execute the new command - write a blank grid
pub fn new_workbook(
    output: PathBuf,
    rows: Option<usize>,
    columns: Option<usize>,
    options: &GlobalOptions,
) -> GridxResult<()> {
    let config = load_config(options)?;
    let rows = rows.unwrap_or(config.default_rows);
    let columns = columns.unwrap_or(config.default_columns);

    if rows > MAX_ROWS || columns > MAX_COLUMNS {
        return Err(GridxError::Config(format!(
            "requested grid {}x{} exceeds the sheet limit of {}x{}",
            rows, columns, MAX_ROWS, MAX_COLUMNS
        )));
    }
    let grid = CellGrid::try_new(rows, columns).map_err(|e| match e {
        GridxError::Shape(reason) => GridxError::Config(reason),
        other => other,
    })?;

    let outcome = adapter_for(config).export(&grid, || Some(output.clone()))?;
    if outcome == ExchangeOutcome::Completed {
        println!(
            "{} {} ({} x {})",
            "✅ Created".bold().green(),
            output.display(),
            grid.rows(),
            grid.columns()
        );
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Json,
    Yaml,
}

fn document_format(path: &Path) -> GridxResult<DocumentFormat> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("json") => Ok(DocumentFormat::Json),
        Some("yaml") | Some("yml") => Ok(DocumentFormat::Yaml),
        _ => Err(GridxError::Config(format!(
            "{}: grid documents must be .json, .yaml or .yml",
            path.display()
        ))),
    }
}

/// Load a grid document (`{rows, columns, cells}`) from JSON or YAML
pub fn read_grid_document(path: &Path) -> GridxResult<CellGrid> {
    let format = document_format(path)?;
    let content = fs::read_to_string(path)?;

    let grid = match format {
        DocumentFormat::Json => serde_json::from_str(&content)?,
        DocumentFormat::Yaml => serde_yaml::from_str(&content)?,
    };
    Ok(grid)
}

/// Save a grid document as JSON or YAML, chosen by extension
pub fn write_grid_document(grid: &CellGrid, path: &Path) -> GridxResult<()> {
    let content = match document_format(path)? {
        DocumentFormat::Json => serde_json::to_string_pretty(grid)?,
        DocumentFormat::Yaml => serde_yaml::to_string(grid)?,
    };
    fs::write(path, content)?;
    Ok(())
}

/// Plain-text table of the first `limit` rows, with A1-style headings
pub fn render_preview(grid: &CellGrid, limit: usize) -> String {
    if grid.is_empty() {
        return format!("   (empty grid, {} x {})", grid.rows(), grid.columns());
    }

    let shown_cols = grid.columns().min(PREVIEW_COLUMNS);
    let shown_rows = grid.rows().min(limit);
    let label_width = shown_rows.max(1).to_string().len();

    let clip = |s: &str| -> String {
        if s.chars().count() > PREVIEW_CELL_WIDTH {
            let head: String = s.chars().take(PREVIEW_CELL_WIDTH - 1).collect();
            format!("{}…", head)
        } else {
            s.to_string()
        }
    };

    let mut widths: Vec<usize> = (0..shown_cols).map(|c| column_letter(c).len()).collect();
    for row in grid.iter_rows().take(shown_rows) {
        for (c, width) in widths.iter_mut().enumerate() {
            *width = (*width).max(clip(&row[c]).chars().count());
        }
    }

    let mut lines = Vec::with_capacity(shown_rows + 2);

    let mut heading = format!("   {:>w$} │", "", w = label_width);
    for (c, width) in widths.iter().enumerate() {
        heading.push_str(&format!(" {:<w$}", column_letter(c), w = *width));
    }
    if grid.columns() > shown_cols {
        heading.push_str(&format!(" … (+{} columns)", grid.columns() - shown_cols));
    }
    lines.push(heading);

    for (r, row) in grid.iter_rows().take(shown_rows).enumerate() {
        let mut line = format!("   {:>w$} │", r + 1, w = label_width);
        for (c, width) in widths.iter().enumerate() {
            let text = clip(&row[c]);
            let pad = width - text.chars().count();
            line.push(' ');
            line.push_str(&text);
            line.push_str(&" ".repeat(pad));
        }
        lines.push(line.trim_end().to_string());
    }

    if grid.rows() > shown_rows {
        lines.push(format!("   … (+{} rows)", grid.rows() - shown_rows));
    }

    lines.join("\n")
}
