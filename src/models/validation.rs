//! Roster-timing validation result types.
//!
//! This module defines the transient ValidationResult produced by each
//! clock-attempt check, and the ValidationCode enum carrying the outcome.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome code of a roster-timing validation.
///
/// Serialized in the wire form used by clock devices (`SUCCESS`,
/// `NO_ROSTER`, `OUTSIDE_WINDOW`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    /// The attempt falls inside the allowed window.
    Success,
    /// No shift is rostered for the staff member on the attempt date.
    NoRoster,
    /// The attempt falls outside the allowed window around the shift.
    OutsideWindow,
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ValidationCode::Success => "SUCCESS",
            ValidationCode::NoRoster => "NO_ROSTER",
            ValidationCode::OutsideWindow => "OUTSIDE_WINDOW",
        };
        write!(f, "{}", code)
    }
}

/// The result of validating one clock attempt against the roster.
///
/// Produced per validation call and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the attempt is allowed.
    pub is_valid: bool,
    /// A human-readable summary of the outcome.
    pub message: String,
    /// The outcome code.
    pub validation_code: ValidationCode,
    /// A summary of the scheduled shift the attempt was checked against,
    /// when one was found.
    pub roster_info: Option<String>,
}

impl ValidationResult {
    /// Builds a successful result.
    pub fn success(message: impl Into<String>, roster_info: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            message: message.into(),
            validation_code: ValidationCode::Success,
            roster_info: Some(roster_info.into()),
        }
    }

    /// Builds a failure for a staff member with no rostered shift.
    pub fn no_roster(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
            validation_code: ValidationCode::NoRoster,
            roster_info: None,
        }
    }

    /// Builds a failure for an attempt outside the allowed window.
    pub fn outside_window(message: impl Into<String>, roster_info: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
            validation_code: ValidationCode::OutsideWindow,
            roster_info: Some(roster_info.into()),
        }
    }
}
