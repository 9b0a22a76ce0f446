//! Admission rules for blocking a table over a time window.
//!
//! The handler resolves the table, loads candidate shifts and the table's
//! upcoming reservations, then runs the checks below in order:
//!
//! 1. [`BlockWindow::new`]: temporal well-formedness against restaurant-local today.
//! 2. [`BlockWindow::ensure_within_shift`]: the window fits one shift on the start date.
//! 3. [`BlockWindow::ensure_no_reservation_conflict`]: no upcoming reservation
//!    falls inside the window's time-of-day range.
//!
//! Every check returns the first violation; no state is touched here.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::CoreError;
use crate::time::at;

/// Service hours of a shift, as loaded from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftHours {
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl ShiftHours {
    /// Absolute `[start, end)` of this shift when served on `date`.
    ///
    /// A shift whose end is not after its start runs past midnight, so its
    /// end lands on the following day.
    pub fn bounds_on(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let start = at(date, self.start_time);
        let mut end = at(date, self.end_time);
        if end <= start {
            end += Duration::days(1);
        }
        (start, end)
    }
}

/// Date and time of an upcoming reservation already seated on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationSlot {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// A temporally valid block request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockWindow {
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    pub end_time: NaiveTime,
}

impl BlockWindow {
    /// Validate the raw bounds.
    ///
    /// `today` is the current date in the restaurant's time zone.
    pub fn new(
        start_date: NaiveDate,
        start_time: NaiveTime,
        end_date: NaiveDate,
        end_time: NaiveTime,
        today: NaiveDate,
    ) -> Result<Self, CoreError> {
        if start_date == end_date && end_time <= start_time {
            return Err(CoreError::invalid(format!(
                "Block end time {} must be after start time {} on the same day",
                end_time.format("%H:%M"),
                start_time.format("%H:%M"),
            )));
        }
        if end_date < start_date {
            return Err(CoreError::invalid(format!(
                "Block end date {end_date} precedes start date {start_date}"
            )));
        }
        if start_date < today {
            return Err(CoreError::invalid(format!(
                "Cannot block a table in the past ({start_date} is before {today})"
            )));
        }

        Ok(Self {
            start_date,
            start_time,
            end_date,
            end_time,
        })
    }

    pub fn start_at(&self) -> NaiveDateTime {
        at(self.start_date, self.start_time)
    }

    pub fn end_at(&self) -> NaiveDateTime {
        at(self.end_date, self.end_time)
    }

    /// Require the whole window to sit inside at least one shift served on
    /// the start date. Returns the first containing shift.
    ///
    /// Multi-day windows are still only compared against the start date's
    /// shift bounds.
    pub fn ensure_within_shift<'a>(&self, shifts: &'a [ShiftHours]) -> Result<&'a ShiftHours, CoreError> {
        let (start, end) = (self.start_at(), self.end_at());

        shifts
            .iter()
            .find(|shift| {
                let (shift_start, shift_end) = shift.bounds_on(self.start_date);
                shift_start <= start && end <= shift_end
            })
            .ok_or_else(|| {
                CoreError::invalid(format!(
                    "Block {} - {} is outside shift hours",
                    start.format("%Y-%m-%d %H:%M"),
                    end.format("%Y-%m-%d %H:%M"),
                ))
            })
    }

    /// Reject the window if an upcoming reservation on a date inside
    /// `[start_date, end_date]` starts at a time within
    /// `[start_time, end_time]`. Both time bounds are inclusive.
    pub fn ensure_no_reservation_conflict(&self, reservations: &[ReservationSlot]) -> Result<(), CoreError> {
        let clash = reservations.iter().find(|slot| {
            (self.start_date..=self.end_date).contains(&slot.date)
                && self.start_time <= slot.time
                && slot.time <= self.end_time
        });

        match clash {
            Some(slot) => Err(CoreError::conflict(format!(
                "Table has an upcoming reservation on {} at {} within the requested block",
                slot.date,
                slot.time.format("%H:%M"),
            ))),
            None => Ok(()),
        }
    }
}
