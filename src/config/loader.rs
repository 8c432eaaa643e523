//! Configuration loading functionality.
//!
//! This module provides the loading entry points for [`EngineRules`],
//! reading a single YAML file and falling back to the built-in defaults
//! for any section the file leaves out.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::EngineRules;

impl EngineRules {
    /// Loads the rule set from a YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file (e.g., "./config/engine.yaml")
    ///
    /// # Returns
    ///
    /// Returns the parsed rules on success, or an error if the file is
    /// missing ([`EngineError::ConfigNotFound`]) or contains invalid
    /// YAML ([`EngineError::ConfigParseError`]).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use farmtime_engine::config::EngineRules;
    ///
    /// let rules = EngineRules::load("./config/engine.yaml")?;
    /// # Ok::<(), farmtime_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse(&content, &path_str)
    }

    /// Parses the rule set from a YAML string.
    ///
    /// Sections absent from the document keep their default values.
    ///
    /// # Example
    ///
    /// ```
    /// use farmtime_engine::config::EngineRules;
    ///
    /// let rules = EngineRules::from_yaml_str("superannuation:\n  sg_rate: 0.115\n").unwrap();
    /// assert_eq!(rules.superannuation.sg_rate.to_string(), "0.115");
    /// ```
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, path: &str) -> EngineResult<Self> {
        let mut rules: Self =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        // The bracket walk requires ascending thresholds.
        rules
            .tax
            .brackets
            .sort_by(|a, b| a.threshold.cmp(&b.threshold));

        // Both values end up as divisors in the calculation layer.
        if rules.tax.weeks_per_year == 0 {
            return Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message: "tax.weeks_per_year must be at least 1".to_string(),
            });
        }
        if rules.reconciliation.rounding_increment_minutes == 0 {
            return Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message: "reconciliation.rounding_increment_minutes must be at least 1".to_string(),
            });
        }

        Ok(rules)
    }
}
