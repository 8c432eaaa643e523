//! Clock event model and related types.
//!
//! This module defines the ClockEvent struct for timestamped attendance
//! records, the EventKind enum, and the AdminOverride value carried when
//! an administrator bypasses roster-timing validation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of attendance record a clock event carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A worker started work.
    ClockIn,
    /// A worker finished work.
    ClockOut,
    /// A worker started an unpaid break.
    Break,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventKind::ClockIn => "clock-in",
            EventKind::ClockOut => "clock-out",
            EventKind::Break => "break",
        };
        write!(f, "{}", label)
    }
}

/// Represents a timestamped attendance record from a device or manual
/// entry.
///
/// Events are append-only: reconciliation never mutates them, and admin
/// corrections (update/delete) happen outside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockEvent {
    /// Unique identifier for the event, assigned by the store.
    pub event_id: i64,
    /// The staff member the event belongs to.
    pub staff_id: i64,
    /// The device that recorded the event, if any.
    pub device_id: Option<i64>,
    /// When the event occurred.
    pub timestamp: NaiveDateTime,
    /// The kind of attendance record.
    pub kind: EventKind,
    /// Free-text reason, set for admin overrides.
    pub reason: Option<String>,
    /// The administrator who authorized the event, when validation was
    /// bypassed.
    pub admin_id: Option<i64>,
}

impl ClockEvent {
    /// Returns true if the event was recorded under an admin override.
    pub fn is_override(&self) -> bool {
        self.admin_id.is_some()
    }
}

/// Input for persisting a new clock event; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClockEvent {
    /// The staff member the event belongs to.
    pub staff_id: i64,
    /// The device that recorded the event, if any.
    pub device_id: Option<i64>,
    /// When the event occurred.
    pub timestamp: NaiveDateTime,
    /// The kind of attendance record.
    pub kind: EventKind,
    /// Free-text reason, set for admin overrides.
    pub reason: Option<String>,
    /// The administrator who authorized the event, when validation was
    /// bypassed.
    pub admin_id: Option<i64>,
}

/// Authorization to record a clock event without consulting the
/// roster-timing validator.
///
/// The role check is the caller's responsibility: whoever constructs an
/// `AdminOverride` must already have verified the actor holds the Admin
/// role. The engine stamps the resulting event with the admin id and
/// reason and emits an override audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminOverride {
    /// The administrator authorizing the bypass.
    pub admin_id: i64,
    /// Why validation was bypassed.
    pub reason: String,
}
