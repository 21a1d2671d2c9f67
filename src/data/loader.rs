use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use super::clean::{impute, CleanReport, ValidationError};
use super::model::{CellValue, Dataset, TurbineRecord};
use super::schema::{ColumnKind, ColumnSpec, TableSchema};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A source file that cannot be turned into a dataset. Fatal at startup; no
/// partial dataset is ever handed out.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to read header row: {source}")]
    Header {
        #[source]
        source: csv::Error,
    },
    #[error("source is missing required column '{0}'")]
    MissingColumn(String),
    #[error("failed to read row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error(transparent)]
    Unimputable(#[from] ValidationError),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a turbine table from a comma-delimited file and repair its gaps.
///
/// Every column the schema declares must be present in the header. Cells
/// are coerced to the declared kind; a value that fails coercion counts as
/// missing rather than failing the load. Columns the schema does not
/// declare pass through with a kind inferred from their data. The returned
/// dataset contains no missing cells; the report says what was filled in.
pub fn load_file(
    path: &Path,
    schema: &TableSchema,
) -> Result<(Dataset, CleanReport), LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| LoadError::Header { source })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    for spec in &schema.columns {
        if !headers.iter().any(|h| h == &spec.name) {
            return Err(LoadError::MissingColumn(spec.name.clone()));
        }
    }

    let mut raw_rows: Vec<csv::StringRecord> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|source| LoadError::Row { row: row_no, source })?;
        raw_rows.push(record);
    }

    // Resolve a kind for every header column. Declared columns keep their
    // declared kind; the rest are inferred from the data the way the source
    // table's reader would type them.
    let columns: Vec<ColumnSpec> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let kind = schema
                .kind_of(name)
                .unwrap_or_else(|| infer_kind(&raw_rows, idx));
            ColumnSpec::new(name.clone(), kind)
        })
        .collect();

    let mut records: Vec<TurbineRecord> = raw_rows
        .iter()
        .map(|row| {
            let mut cells = BTreeMap::new();
            for (idx, spec) in columns.iter().enumerate() {
                let raw = row.get(idx).unwrap_or("");
                cells.insert(spec.name.clone(), parse_cell(raw, spec.kind));
            }
            TurbineRecord { cells }
        })
        .collect();

    let report = impute(&mut records, &columns)?;

    log::info!(
        "loaded {} turbine(s) from {} ({} cell(s) imputed)",
        records.len(),
        path.display(),
        report.replaced_total()
    );

    Ok((Dataset { records, columns }, report))
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Markers the source uses for an absent value, besides the empty cell.
const MISSING_MARKERS: [&str; 4] = ["na", "n/a", "null", "nan"];

fn is_missing(raw: &str) -> bool {
    raw.is_empty()
        || MISSING_MARKERS
            .iter()
            .any(|m| raw.eq_ignore_ascii_case(m))
}

/// Coerce one raw cell to the column's kind. Failed coercions become
/// missing; they are repaired by the imputation pass, never surfaced as
/// parse errors.
fn parse_cell(raw: &str, kind: ColumnKind) -> CellValue {
    let raw = raw.trim();
    if is_missing(raw) {
        return CellValue::Missing;
    }
    match kind {
        ColumnKind::Numeric => raw
            .parse::<f64>()
            .map(CellValue::Number)
            .unwrap_or(CellValue::Missing),
        ColumnKind::Date => parse_date(raw)
            .map(CellValue::Date)
            .unwrap_or(CellValue::Missing),
        ColumnKind::Categorical | ColumnKind::Text => CellValue::Text(raw.to_string()),
    }
}

/// Accepted date shapes: `YYYY-MM-DD`, `YYYY/MM/DD`, bare `YYYY` (January
/// 1st). The source's commissioning dates mix all three.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    raw.parse::<i32>()
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
}

/// Type an undeclared column from its data: numeric when every non-missing
/// cell parses as a float, categorical otherwise.
fn infer_kind(rows: &[csv::StringRecord], idx: usize) -> ColumnKind {
    let numeric = rows
        .iter()
        .map(|row| row.get(idx).unwrap_or("").trim())
        .filter(|raw| !is_missing(raw))
        .all(|raw| raw.parse::<f64>().is_ok());
    if numeric {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}
