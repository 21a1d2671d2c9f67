use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use super::filter::{select_records, OutOfRangeError};
use super::schema::ColumnSpec;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value covering the column kinds the source
/// table carries. Mode counting keys a `BTreeMap` by cell value, so
/// `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    /// A cell the source left blank or that failed coercion. Never present
    /// in a dataset once cleaning has run.
    Missing,
}

// -- Manual Eq/Ord so we can use CellValue as a BTreeMap key --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Missing => 0,
                Number(_) => 1,
                Date(_) => 2,
                Text(_) => 3,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Missing, Missing) => std::cmp::Ordering::Equal,
            (Number(a), Number(b)) => a.total_cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Number(n) => n.to_bits().hash(state),
            CellValue::Date(d) => d.hash(state),
            CellValue::Missing => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Missing => write!(f, "<missing>"),
        }
    }
}

impl CellValue {
    /// Whether this cell still needs imputation.
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Try to interpret the value as an `f64` (bubble sizing, averaging).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to interpret the value as a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// TurbineRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single turbine (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct TurbineRecord {
    /// Dynamic columns: column_name → value.
    pub cells: BTreeMap<String, CellValue>,
}

impl TurbineRecord {
    /// Look up a cell by column name.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The canonical cleaned table. Rows keep their source order for the whole
/// process lifetime; every consumer addresses them by position. Treated as
/// read-only once the loader has produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// All turbines (rows), in source order.
    pub records: Vec<TurbineRecord>,
    /// Resolved column specs, in source header order.
    pub columns: Vec<ColumnSpec>,
}

impl Dataset {
    /// Number of turbines.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column names in source header order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Build a sub-dataset holding the rows at `positions`, in that order.
    /// The result shares the column layout so it can be re-serialized
    /// through the same export path as the full table.
    pub fn subset(&self, positions: &[usize]) -> Result<Dataset, OutOfRangeError> {
        let records = select_records(self, positions)?;
        Ok(Dataset {
            records,
            columns: self.columns.clone(),
        })
    }
}
