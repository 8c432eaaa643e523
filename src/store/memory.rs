//! In-memory storage backend.
//!
//! A [`MemoryStore`] keeps everything behind one mutex, assigns ids
//! monotonically, and enforces the one-payslip-per-week index the same
//! way a database unique constraint would. It backs the test suites and
//! small single-process deployments.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{NaiveDate, NaiveDateTime, Utc};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    ClockEvent, NewClockEvent, NewPayslip, NewShift, NewStaff, Payslip, Shift, Staff,
};

use super::{AuditLog, AuditRecord, EventStore, PayslipStore, ShiftStore, StaffStore};

#[derive(Debug, Default)]
struct StoreInner {
    staff: BTreeMap<i64, Staff>,
    shifts: BTreeMap<i64, Shift>,
    events: BTreeMap<i64, ClockEvent>,
    payslips: BTreeMap<i64, Payslip>,
    next_staff_id: i64,
    next_shift_id: i64,
    next_event_id: i64,
    next_payslip_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// Thread-safe in-memory implementation of every store trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<StoreInner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> EngineResult<MutexGuard<'_, StoreInner>> {
        self.inner.lock().map_err(|_| EngineError::Storage {
            message: "in-memory store mutex poisoned".to_string(),
        })
    }
}

impl StaffStore for MemoryStore {
    fn insert_staff(&self, staff: NewStaff) -> EngineResult<Staff> {
        let mut inner = self.lock()?;
        let staff_id = next_id(&mut inner.next_staff_id);
        let stored = Staff {
            staff_id,
            first_name: staff.first_name,
            last_name: staff.last_name,
            role: staff.role,
            contract_type: staff.contract_type,
            is_active: staff.is_active,
            standard_pay_rate: staff.standard_pay_rate,
        };
        inner.staff.insert(staff_id, stored.clone());
        Ok(stored)
    }

    fn staff_by_id(&self, staff_id: i64) -> EngineResult<Option<Staff>> {
        Ok(self.lock()?.staff.get(&staff_id).cloned())
    }

    fn list_staff(&self) -> EngineResult<Vec<Staff>> {
        Ok(self.lock()?.staff.values().cloned().collect())
    }

    fn update_staff(&self, staff: &Staff) -> EngineResult<bool> {
        let mut inner = self.lock()?;
        match inner.staff.get_mut(&staff.staff_id) {
            Some(existing) => {
                *existing = staff.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl ShiftStore for MemoryStore {
    fn insert_shift(&self, shift: NewShift) -> EngineResult<Shift> {
        let mut inner = self.lock()?;
        let shift_id = next_id(&mut inner.next_shift_id);
        let stored = Shift {
            shift_id,
            staff_id: shift.staff_id,
            start_time: shift.start_time,
            end_time: shift.end_time,
            schedule_hours: shift.schedule_hours,
        };
        inner.shifts.insert(shift_id, stored.clone());
        Ok(stored)
    }

    fn shift_by_id(&self, shift_id: i64) -> EngineResult<Option<Shift>> {
        Ok(self.lock()?.shifts.get(&shift_id).cloned())
    }

    fn shifts_for_staff_on(&self, staff_id: i64, date: NaiveDate) -> EngineResult<Vec<Shift>> {
        let inner = self.lock()?;
        let mut shifts: Vec<Shift> = inner
            .shifts
            .values()
            .filter(|shift| shift.staff_id == staff_id && shift.start_date() == date)
            .cloned()
            .collect();
        shifts.sort_by_key(|shift| shift.start_time);
        Ok(shifts)
    }

    fn shifts_for_staff_between(
        &self,
        staff_id: i64,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> EngineResult<Vec<Shift>> {
        let inner = self.lock()?;
        let mut shifts: Vec<Shift> = inner
            .shifts
            .values()
            .filter(|shift| {
                shift.staff_id == staff_id && shift.start_time >= from && shift.start_time < to
            })
            .cloned()
            .collect();
        shifts.sort_by_key(|shift| shift.start_time);
        Ok(shifts)
    }

    fn shifts_between(&self, from: NaiveDateTime, to: NaiveDateTime) -> EngineResult<Vec<Shift>> {
        let inner = self.lock()?;
        let mut shifts: Vec<Shift> = inner
            .shifts
            .values()
            .filter(|shift| shift.start_time >= from && shift.start_time < to)
            .cloned()
            .collect();
        shifts.sort_by_key(|shift| shift.start_time);
        Ok(shifts)
    }

    fn next_shift_for_staff(
        &self,
        staff_id: i64,
        from: NaiveDateTime,
    ) -> EngineResult<Option<Shift>> {
        let inner = self.lock()?;
        Ok(inner
            .shifts
            .values()
            .filter(|shift| shift.staff_id == staff_id && shift.start_time >= from)
            .min_by_key(|shift| shift.start_time)
            .cloned())
    }

    fn update_shift(&self, shift: &Shift) -> EngineResult<bool> {
        let mut inner = self.lock()?;
        match inner.shifts.get_mut(&shift.shift_id) {
            Some(existing) => {
                *existing = shift.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_shift(&self, shift_id: i64) -> EngineResult<bool> {
        Ok(self.lock()?.shifts.remove(&shift_id).is_some())
    }
}

impl EventStore for MemoryStore {
    fn insert_event(&self, event: NewClockEvent) -> EngineResult<ClockEvent> {
        let mut inner = self.lock()?;
        let event_id = next_id(&mut inner.next_event_id);
        let stored = ClockEvent {
            event_id,
            staff_id: event.staff_id,
            device_id: event.device_id,
            timestamp: event.timestamp,
            kind: event.kind,
            reason: event.reason,
            admin_id: event.admin_id,
        };
        inner.events.insert(event_id, stored.clone());
        Ok(stored)
    }

    fn events_for_staff_between(
        &self,
        staff_id: i64,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> EngineResult<Vec<ClockEvent>> {
        let inner = self.lock()?;
        let mut events: Vec<ClockEvent> = inner
            .events
            .values()
            .filter(|event| {
                event.staff_id == staff_id && event.timestamp >= from && event.timestamp < to
            })
            .cloned()
            .collect();
        events.sort_by_key(|event| event.timestamp);
        Ok(events)
    }
}

impl PayslipStore for MemoryStore {
    fn insert_payslip(&self, payslip: NewPayslip) -> EngineResult<Payslip> {
        let mut inner = self.lock()?;

        // Unique index on (staff_id, week_start_date).
        let duplicate = inner.payslips.values().any(|existing| {
            existing.staff_id == payslip.staff_id
                && existing.week_start_date == payslip.week_start_date
        });
        if duplicate {
            return Err(EngineError::AlreadyExists {
                staff_id: payslip.staff_id,
                week_start: payslip.week_start_date,
            });
        }

        let payslip_id = next_id(&mut inner.next_payslip_id);
        let stored = Payslip {
            payslip_id,
            staff_id: payslip.staff_id,
            standard_pay_rate: payslip.standard_pay_rate,
            week_start_date: payslip.week_start_date,
            total_hours_worked: payslip.total_hours_worked,
            gross_weekly_pay: payslip.gross_weekly_pay,
            annual_income: payslip.annual_income,
            annual_tax: payslip.annual_tax,
            weekly_payg: payslip.weekly_payg,
            net_pay: payslip.net_pay,
            employer_superannuation: payslip.employer_superannuation,
            date_created: Utc::now().naive_utc(),
        };
        inner.payslips.insert(payslip_id, stored.clone());
        Ok(stored)
    }

    fn payslip_by_id(&self, payslip_id: i64) -> EngineResult<Option<Payslip>> {
        Ok(self.lock()?.payslips.get(&payslip_id).cloned())
    }

    fn payslip_for_week(
        &self,
        staff_id: i64,
        week_start: NaiveDate,
    ) -> EngineResult<Option<Payslip>> {
        let inner = self.lock()?;
        Ok(inner
            .payslips
            .values()
            .find(|payslip| {
                payslip.staff_id == staff_id && payslip.week_start_date == week_start
            })
            .cloned())
    }

    fn payslips_for_staff(&self, staff_id: i64) -> EngineResult<Vec<Payslip>> {
        let inner = self.lock()?;
        let mut payslips: Vec<Payslip> = inner
            .payslips
            .values()
            .filter(|payslip| payslip.staff_id == staff_id)
            .cloned()
            .collect();
        payslips.sort_by(|a, b| b.week_start_date.cmp(&a.week_start_date));
        Ok(payslips)
    }

    fn delete_payslip(&self, payslip_id: i64) -> EngineResult<bool> {
        Ok(self.lock()?.payslips.remove(&payslip_id).is_some())
    }
}

/// In-memory audit sink that keeps records in insertion order.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditLog {
    /// Creates an empty audit log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every record written so far.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl AuditLog for MemoryAuditLog {
    fn record(&self, record: AuditRecord) -> EngineResult<()> {
        let mut records = self.records.lock().map_err(|_| EngineError::Storage {
            message: "audit log mutex poisoned".to_string(),
        })?;
        records.push(record);
        Ok(())
    }
}
