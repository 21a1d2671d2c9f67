use std::path::Path;

use anyhow::{Context, Result};

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Serialize the dataset to a CSV file, columns in source header order.
///
/// The output re-loads through the loader with identical values: numbers
/// print in `f64` shortest round-trip form and dates as `YYYY-MM-DD`, so a
/// second cleaning pass finds nothing to do.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_records(dataset, writer)
        .with_context(|| format!("writing {}", path.display()))
}

/// Serialize the dataset to an in-memory CSV string (stdout export, tests).
pub fn to_csv_string(dataset: &Dataset) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(dataset, csv::Writer::from_writer(&mut buffer))
        .context("writing CSV to memory")?;
    String::from_utf8(buffer).context("CSV output was not valid UTF-8")
}

fn write_records<W: std::io::Write>(dataset: &Dataset, mut writer: csv::Writer<W>) -> Result<()> {
    writer.write_record(dataset.column_names())?;

    for record in &dataset.records {
        let row: Vec<String> = dataset
            .columns
            .iter()
            .map(|spec| record.get(&spec.name).map_or_else(String::new, field))
            .collect();
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

fn field(cell: &CellValue) -> String {
    match cell {
        CellValue::Text(s) => s.clone(),
        CellValue::Number(n) => n.to_string(),
        CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        CellValue::Missing => String::new(),
    }
}
