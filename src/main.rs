use clap::{Args, Parser, Subcommand};
use royalbit_gridx::cli::{self, GlobalOptions};
use royalbit_gridx::config::CellTyping;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridx")]
#[command(about = "Move text grids in and out of Excel workbooks without losing shape.")]
#[command(long_about = "GridX - Tabular exchange for Excel workbooks

Cells are positional: row 1 is data, not a header, and no index column is
added. Every value is read back as its display text.

COMMANDS:
  import   - Workbook to grid document (.json/.yaml) or terminal preview
  export   - Grid document to Excel (.xlsx)
  inspect  - Shape and preview of a workbook
  new      - Blank grid workbook

EXAMPLES:
  gridx import positions.xlsx -o positions.json
  gridx export positions.json positions.xlsx
  gridx --typing inferred export positions.yaml out.xlsx
  gridx inspect positions.xlsx --limit 20

LOGGING:
  RUST_LOG=royalbit_gridx=debug gridx import positions.xlsx")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// YAML configuration file
    #[arg(long, global = true, env = "GRIDX_CONFIG")]
    config: Option<PathBuf>,

    /// Worksheet name used on export (default: Sheet1)
    #[arg(long, global = true)]
    sheet_name: Option<String>,

    /// Cell typing on export: text | inferred
    #[arg(long, global = true)]
    typing: Option<CellTyping>,

    /// Write workbooks in place instead of temp file + rename
    #[arg(long, global = true)]
    no_atomic: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Import the first worksheet of a workbook.

Reads .xlsx, .xlsm, .xlsb, .xls and .ods. Numbers, dates and booleans are
converted to their display text. Workbooks written by 'gridx export' keep
their exact shape, including empty edge rows and columns.

Without --output the grid is printed as a table.

EXAMPLE:
  gridx import quarterly.xlsx -o quarterly.yaml")]
    /// Import a workbook into a grid document
    Import {
        /// Path to workbook
        input: PathBuf,

        /// Grid document to write (.json, .yaml or .yml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show verbose import steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Export a grid document to Excel .xlsx.

The document holds the shape and the cells:

  rows: 2
  columns: 2
  cells:
    - [\"1\", \"2\"]
    - [\"3\", \"4\"]

Empty cells are left blank. With --typing inferred, cells that spell a
number exactly (\"42\", \"2.5\") are stored as numbers.

EXAMPLE:
  gridx export grid.json grid.xlsx")]
    /// Export a grid document to Excel .xlsx
    Export {
        /// Grid document (.json, .yaml or .yml)
        input: PathBuf,

        /// Output Excel file path (.xlsx)
        output: PathBuf,

        /// Show verbose export steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show shape and a preview of a workbook
    Inspect {
        /// Path to workbook
        input: PathBuf,

        /// Rows to preview
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Create a workbook holding a blank grid
    New {
        /// Output Excel file path (.xlsx)
        output: PathBuf,

        /// Row count (default from config: 100)
        #[arg(short, long)]
        rows: Option<usize>,

        /// Column count (default from config: 20)
        #[arg(short, long)]
        columns: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "royalbit_gridx=info,gridx=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = GlobalOptions {
        config: cli.global.config,
        sheet_name: cli.global.sheet_name,
        typing: cli.global.typing,
        no_atomic: cli.global.no_atomic,
    };

    match cli.command {
        Commands::Import {
            input,
            output,
            verbose,
        } => cli::import(input, output, &options, verbose)?,

        Commands::Export {
            input,
            output,
            verbose,
        } => cli::export(input, output, &options, verbose)?,

        Commands::Inspect { input, limit } => cli::inspect(input, limit, &options)?,

        Commands::New {
            output,
            rows,
            columns,
        } => cli::new_workbook(output, rows, columns, &options)?,
    }

    Ok(())
}
