//! Roster and payroll engine for farm time and attendance management
//!
//! This crate provides functionality for assigning rostered shifts, validating
//! clock-in/clock-out attempts against the roster, reconciling clock events into
//! worked hours, and calculating weekly pay with overtime classification, PAYG
//! withholding, and employer superannuation.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
