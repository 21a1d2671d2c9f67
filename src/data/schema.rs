use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Column names of the turbine source table
// ---------------------------------------------------------------------------

// The header names are fixed string literals; the loader rejects a source
// that lacks any of them.
pub const IDENTIFIER: &str = "Turbine identifier";
pub const CAPACITY_KW: &str = "Turbine rated capacity (kW)";
pub const COMMISSIONING_DATE: &str = "Commissioning date";
pub const MANUFACTURER: &str = "Manufacturer";
pub const MODEL: &str = "Model";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";

// ---------------------------------------------------------------------------
// Column kinds and specs
// ---------------------------------------------------------------------------

/// How a column is parsed and which imputation strategy applies to it.
/// Numeric and Date columns fill gaps with the column mean, Categorical and
/// Text columns with the column mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Date,
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
            ColumnKind::Date => "date",
            ColumnKind::Text => "text",
        };
        write!(f, "{s}")
    }
}

/// One column: its header name and declared kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        ColumnSpec {
            name: name.into(),
            kind,
        }
    }
}

// ---------------------------------------------------------------------------
// TableSchema – declared columns of a source table
// ---------------------------------------------------------------------------

/// The declared column set supplied alongside a source file. Every declared
/// column must be present in the source header; columns the source carries
/// beyond the declaration pass through with a kind inferred from their data.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub columns: Vec<ColumnSpec>,
}

impl TableSchema {
    /// Schema of the wind-turbine source table.
    pub fn turbine() -> Self {
        TableSchema {
            columns: vec![
                ColumnSpec::new(IDENTIFIER, ColumnKind::Text),
                ColumnSpec::new(CAPACITY_KW, ColumnKind::Numeric),
                ColumnSpec::new(COMMISSIONING_DATE, ColumnKind::Date),
                ColumnSpec::new(MANUFACTURER, ColumnKind::Categorical),
                ColumnSpec::new(MODEL, ColumnKind::Categorical),
                ColumnSpec::new(LATITUDE, ColumnKind::Numeric),
                ColumnSpec::new(LONGITUDE, ColumnKind::Numeric),
            ],
        }
    }

    /// Declared kind of a column, if any.
    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turbine_schema_declares_all_required_columns() {
        let schema = TableSchema::turbine();
        for name in [
            IDENTIFIER,
            CAPACITY_KW,
            COMMISSIONING_DATE,
            MANUFACTURER,
            MODEL,
            LATITUDE,
            LONGITUDE,
        ] {
            assert!(schema.kind_of(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn turbine_schema_kinds() {
        let schema = TableSchema::turbine();
        assert_eq!(schema.kind_of(CAPACITY_KW), Some(ColumnKind::Numeric));
        assert_eq!(schema.kind_of(COMMISSIONING_DATE), Some(ColumnKind::Date));
        assert_eq!(schema.kind_of(MANUFACTURER), Some(ColumnKind::Categorical));
        assert_eq!(schema.kind_of(IDENTIFIER), Some(ColumnKind::Text));
        assert_eq!(schema.kind_of("Total project capacity (MW)"), None);
    }
}
