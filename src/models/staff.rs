//! Staff model and related types.
//!
//! This module defines the Staff struct, the Role and ContractType enums,
//! and the Caller value used to pass the requesting identity into
//! admin-gated operations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents the role a staff member holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Administrators may manage rosters, override clock validation,
    /// and delete payslips.
    Admin,
    /// Workers clock in and out and view their own roster.
    Worker,
}

/// Represents the type of employment arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// Full-time employment (38 hours per week).
    FullTime,
    /// Part-time employment (less than 38 hours per week).
    PartTime,
    /// Casual employment (no guaranteed hours, loaded hourly rate).
    Casual,
}

/// Represents a rostered staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    /// Unique identifier for the staff member.
    pub staff_id: i64,
    /// The staff member's given name.
    pub first_name: String,
    /// The staff member's family name.
    pub last_name: String,
    /// The role the staff member holds.
    pub role: Role,
    /// The type of employment arrangement.
    pub contract_type: ContractType,
    /// Whether the staff member is currently active.
    pub is_active: bool,
    /// The base hourly pay rate in dollars.
    pub standard_pay_rate: Decimal,
}

impl Staff {
    /// Returns the staff member's full display name.
    ///
    /// # Examples
    ///
    /// ```
    /// use farmtime_engine::models::{ContractType, Role, Staff};
    /// use rust_decimal::Decimal;
    ///
    /// let staff = Staff {
    ///     staff_id: 7,
    ///     first_name: "May".to_string(),
    ///     last_name: "Tran".to_string(),
    ///     role: Role::Worker,
    ///     contract_type: ContractType::FullTime,
    ///     is_active: true,
    ///     standard_pay_rate: Decimal::new(2500, 2),
    /// };
    /// assert_eq!(staff.full_name(), "May Tran");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns true if the staff member holds the Admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A staff member that has not been stored yet.
///
/// The store assigns the id on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStaff {
    /// The staff member's given name.
    pub first_name: String,
    /// The staff member's family name.
    pub last_name: String,
    /// The role the staff member holds.
    pub role: Role,
    /// The type of employment arrangement.
    pub contract_type: ContractType,
    /// Whether the staff member is currently active.
    pub is_active: bool,
    /// The base hourly pay rate in dollars.
    pub standard_pay_rate: Decimal,
}

/// The identity of the party invoking an operation.
///
/// Caller-role resolution happens outside the engine (authentication is an
/// external collaborator); the resolved identity is passed in as this plain
/// value. Admin-gated operations check it and fail with
/// [`Unauthorized`](crate::error::EngineError::Unauthorized) when the role
/// is insufficient. The engine never reads ambient request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// The staff id of the caller.
    pub staff_id: i64,
    /// The caller's resolved role.
    pub role: Role,
}

impl Caller {
    /// Builds a caller value for the given staff id and role.
    pub fn new(staff_id: i64, role: Role) -> Self {
        Self { staff_id, role }
    }

    /// Returns true if the caller holds the Admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
