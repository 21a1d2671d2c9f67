use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::data::clean::CleanReport;
use crate::data::export;
use crate::data::filter::select_records;
use crate::data::loader::load_file;
use crate::data::model::Dataset;
use crate::data::schema::{ColumnKind, TableSchema};

// ---------------------------------------------------------------------------
// Argument definitions
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "turbine-atlas")]
#[command(author, version, about = "Load, clean and slice the wind turbine table")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load and clean a source file, then report what was repaired
    Summary(SummaryArgs),
    /// Show the turbines at the given row positions
    Select(SelectArgs),
    /// Write the cleaned dataset, or a selection of it, as CSV
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    /// Path to the turbine CSV
    pub file: PathBuf,

    /// Emit the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct SelectArgs {
    /// Path to the turbine CSV
    pub file: PathBuf,

    /// Row positions (0-based), in the order the selection was made
    pub positions: Vec<usize>,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Path to the turbine CSV
    pub file: PathBuf,

    /// Output path (stdout when omitted)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Comma-separated row positions to export instead of the full table
    #[arg(long, value_delimiter = ',')]
    pub select: Option<Vec<usize>>,
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Summary(args) => summary(args),
        Commands::Select(args) => select(args),
        Commands::Export(args) => export(args),
    }
}

fn load(path: &Path) -> Result<(Dataset, CleanReport)> {
    load_file(path, &TableSchema::turbine())
        .with_context(|| format!("loading {}", path.display()))
}

// ---------------------------------------------------------------------------
// summary
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct Summary {
    rows: usize,
    columns: Vec<ColumnSummary>,
}

#[derive(Serialize)]
struct ColumnSummary {
    name: String,
    kind: ColumnKind,
    filled: usize,
    fill: Option<String>,
}

fn summary(args: SummaryArgs) -> Result<()> {
    let (dataset, report) = load(&args.file)?;

    let columns: Vec<ColumnSummary> = dataset
        .columns
        .iter()
        .map(|spec| {
            let fill = report.fills.get(&spec.name);
            ColumnSummary {
                name: spec.name.clone(),
                kind: spec.kind,
                filled: fill.map_or(0, |f| f.replaced),
                fill: fill.map(|f| f.value.to_string()),
            }
        })
        .collect();
    let summary = Summary {
        rows: dataset.len(),
        columns,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["COLUMN", "KIND", "FILLED", "FILL VALUE"]);
    for col in &summary.columns {
        builder.push_record([
            col.name.clone(),
            col.kind.to_string(),
            col.filled.to_string(),
            col.fill.clone().unwrap_or_else(|| "-".into()),
        ]);
    }
    println!(
        "{} turbine(s), {} imputed cell(s)",
        summary.rows,
        report.replaced_total()
    );
    println!("{}", builder.build().with(Style::sharp()));
    Ok(())
}

// ---------------------------------------------------------------------------
// select
// ---------------------------------------------------------------------------

fn select(args: SelectArgs) -> Result<()> {
    let (dataset, _) = load(&args.file)?;

    if args.positions.is_empty() {
        // Same branch the map view takes when the lasso comes back empty.
        println!(
            "Nothing selected. Pass one or more row positions to see turbine details."
        );
        return Ok(());
    }

    let selected = select_records(&dataset, &args.positions)?;

    let mut builder = Builder::default();
    builder.push_record(dataset.column_names());
    for record in &selected {
        builder.push_record(
            dataset
                .columns
                .iter()
                .map(|spec| record.get(&spec.name).map_or(String::new(), |c| c.to_string())),
        );
    }
    println!("{}", builder.build().with(Style::sharp()));
    println!("{} turbine(s) selected", selected.len());
    Ok(())
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

fn export(args: ExportArgs) -> Result<()> {
    let (dataset, _) = load(&args.file)?;

    let subset;
    let to_write = match &args.select {
        Some(positions) => {
            subset = dataset.subset(positions)?;
            &subset
        }
        None => &dataset,
    };

    match &args.output {
        Some(path) => {
            export::write_csv(to_write, path)?;
            println!("wrote {} row(s) to {}", to_write.len(), path.display());
        }
        None => {
            print!("{}", export::to_csv_string(to_write)?);
        }
    }
    Ok(())
}
