//! Shift interval overlap detection.
//!
//! Intervals are half-open: a shift ending at 17:00 does not overlap a
//! shift starting at 17:00, so back-to-back rostering is always allowed.

use chrono::NaiveDateTime;

use crate::models::Shift;

/// Returns true if the half-open intervals `[a_start, a_end)` and
/// `[b_start, b_end)` share any time.
pub fn intervals_overlap(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Finds the first candidate shift that overlaps `[start, end)`.
///
/// `exclude_shift_id` skips one shift, so an update can be checked
/// against everything except the shift being replaced. The candidates
/// are expected to be the proposed staff member's own shifts; the
/// interval must already be validated (`end` after `start`).
pub fn find_conflict<'a, I>(
    candidates: I,
    start: NaiveDateTime,
    end: NaiveDateTime,
    exclude_shift_id: Option<i64>,
) -> Option<&'a Shift>
where
    I: IntoIterator<Item = &'a Shift>,
{
    candidates.into_iter().find(|shift| {
        exclude_shift_id != Some(shift.shift_id)
            && intervals_overlap(start, end, shift.start_time, shift.end_time)
    })
}
