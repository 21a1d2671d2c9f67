//! Loader, cleaner and selection pipeline for the Canadian Wind Turbine
//! Database. The map and table views consume the [`data::model::Dataset`]
//! this crate produces; they never see a missing value.

pub mod cli;
pub mod data;
