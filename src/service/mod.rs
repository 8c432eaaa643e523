//! Service layer wiring storage and calculation into the engine's
//! operations.
//!
//! Each service takes its stores as `Arc<dyn Trait>` handles plus the
//! shared rules, so one [`MemoryStore`](crate::store::MemoryStore) (or
//! any other backend implementing the store traits) can serve all
//! three:
//!
//! ```
//! use std::sync::Arc;
//!
//! use farmtime_engine::config::EngineRules;
//! use farmtime_engine::service::{PayrollService, RosterService, TimeclockService};
//! use farmtime_engine::store::{MemoryAuditLog, MemoryStore};
//!
//! let store = Arc::new(MemoryStore::new());
//! let audit = Arc::new(MemoryAuditLog::new());
//! let rules = Arc::new(EngineRules::default());
//!
//! let roster = RosterService::new(store.clone(), audit.clone());
//! let timeclock =
//!     TimeclockService::new(store.clone(), store.clone(), audit.clone(), rules.clone());
//! let payroll =
//!     PayrollService::new(store.clone(), store.clone(), store.clone(), audit, rules);
//! ```

use crate::error::{EngineError, EngineResult};
use crate::models::Caller;

mod payroll;
mod roster;
mod timeclock;

pub use payroll::PayrollService;
pub use roster::{DEFAULT_WEEKS_AHEAD, RosterService};
pub use timeclock::{ClockConfirmation, TimeclockService};

/// Fails with `Unauthorized` unless the caller holds the Admin role.
fn require_admin(caller: &Caller, action: &str) -> EngineResult<()> {
    if caller.is_admin() {
        return Ok(());
    }
    Err(EngineError::Unauthorized {
        action: action.to_string(),
    })
}
