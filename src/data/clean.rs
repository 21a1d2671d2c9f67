use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use super::model::{CellValue, TurbineRecord};
use super::schema::{ColumnKind, ColumnSpec};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A column cannot be imputed: every cell in it is missing, so there is no
/// mean or mode to fill with.
#[derive(Debug, Error)]
#[error("column '{column}' has no non-missing values to impute from")]
pub struct ValidationError {
    pub column: String,
}

// ---------------------------------------------------------------------------
// Clean report
// ---------------------------------------------------------------------------

/// The substitute chosen for one column and how many cells received it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub value: CellValue,
    pub replaced: usize,
}

/// Per-column record of what the cleaning pass changed. Columns with no
/// missing cells do not appear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanReport {
    pub fills: BTreeMap<String, Fill>,
}

impl CleanReport {
    /// Total number of cells replaced across all columns.
    pub fn replaced_total(&self) -> usize {
        self.fills.values().map(|f| f.replaced).sum()
    }
}

// ---------------------------------------------------------------------------
// Imputation pass
// ---------------------------------------------------------------------------

/// Fill every missing cell in `records`, column by column.
///
/// Numeric and Date columns fill with the arithmetic mean of the column's
/// non-missing values (dates average their day numbers, rounded to the
/// nearest day). Categorical and Text columns fill with the most frequent
/// value; ties break to the first value in the column's natural ordering.
/// All statistics are computed over the whole dataset before any cell is
/// rewritten.
pub fn impute(
    records: &mut [TurbineRecord],
    columns: &[ColumnSpec],
) -> Result<CleanReport, ValidationError> {
    let mut report = CleanReport::default();

    for spec in columns {
        let missing = records
            .iter()
            .filter(|r| r.get(&spec.name).is_none_or(CellValue::is_missing))
            .count();
        if missing == 0 {
            continue;
        }

        let fill = match spec.kind {
            ColumnKind::Numeric => number_mean(records, &spec.name)?,
            ColumnKind::Date => date_mean(records, &spec.name)?,
            ColumnKind::Categorical | ColumnKind::Text => mode(records, &spec.name)?,
        };

        for record in records.iter_mut() {
            let cell = record
                .cells
                .entry(spec.name.clone())
                .or_insert(CellValue::Missing);
            if cell.is_missing() {
                *cell = fill.clone();
            }
        }

        log::debug!("column '{}': filled {missing} cell(s) with {fill}", spec.name);
        report.fills.insert(
            spec.name.clone(),
            Fill {
                value: fill,
                replaced: missing,
            },
        );
    }

    Ok(report)
}

fn number_mean(records: &[TurbineRecord], column: &str) -> Result<CellValue, ValidationError> {
    let values: Vec<f64> = records
        .iter()
        .filter_map(|r| r.get(column).and_then(CellValue::as_f64))
        .collect();
    if values.is_empty() {
        return Err(ValidationError {
            column: column.to_string(),
        });
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Ok(CellValue::Number(mean))
}

fn date_mean(records: &[TurbineRecord], column: &str) -> Result<CellValue, ValidationError> {
    let days: Vec<i64> = records
        .iter()
        .filter_map(|r| r.get(column).and_then(CellValue::as_date))
        .map(|d| i64::from(d.num_days_from_ce()))
        .collect();
    if days.is_empty() {
        return Err(ValidationError {
            column: column.to_string(),
        });
    }
    let mean = days.iter().sum::<i64>() as f64 / days.len() as f64;
    NaiveDate::from_num_days_from_ce_opt(mean.round() as i32)
        .map(CellValue::Date)
        .ok_or_else(|| ValidationError {
            column: column.to_string(),
        })
}

fn mode(records: &[TurbineRecord], column: &str) -> Result<CellValue, ValidationError> {
    // BTreeMap iterates in the column's natural ordering, so keeping the
    // running best only on a strictly greater count breaks ties toward the
    // first value in that ordering.
    let mut counts: BTreeMap<&CellValue, usize> = BTreeMap::new();
    for record in records {
        match record.get(column) {
            Some(CellValue::Missing) | None => {}
            Some(value) => *counts.entry(value).or_default() += 1,
        }
    }

    let mut best: Option<(&CellValue, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((value, count));
        }
    }

    best.map(|(value, _)| value.clone())
        .ok_or_else(|| ValidationError {
            column: column.to_string(),
        })
}
