/// Data layer: core types, loading/cleaning, selection, and export.
///
/// Architecture:
/// ```text
///  turbine_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + coerce + impute → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<TurbineRecord>, resolved column specs
///   └──────────┘
///     │       │
///     ▼       ▼
///   ┌────────┐ ┌────────┐
///   │ filter  │ │ export  │  positions → rows   Dataset → CSV
///   └────────┘ └────────┘
/// ```
pub mod clean;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
