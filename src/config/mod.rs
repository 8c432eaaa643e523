//! Rule configuration for the roster and payroll engine.
//!
//! This module provides the strongly-typed rule set the engine runs
//! under, including overtime thresholds, the progressive tax bracket
//! table, superannuation, timeclock windows, reconciliation rounding,
//! and default pay rates. Rules can be loaded from a YAML file or used
//! directly via `EngineRules::default()`, which carries the statutory
//! values.
//!
//! # Example
//!
//! ```no_run
//! use farmtime_engine::config::EngineRules;
//!
//! let rules = EngineRules::load("./config/engine.yaml").unwrap();
//! println!("Standard week: {} hours", rules.overtime.standard_weekly_hours);
//! ```

mod loader;
mod types;

pub use types::{
    DefaultPayRate, EngineRules, OvertimeRules, ReconciliationRules, SuperannuationRules,
    TaxBracket, TaxRules, TimeclockRules,
};
