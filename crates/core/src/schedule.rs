//! Date arithmetic and urgency classification.
//!
//! All functions work on calendar-day granularity: `start_date` and
//! `deadline` are [`Date`]s with no time component, so "deadline is today"
//! yields zero days remaining with no sub-day truncation artifacts.

use crate::project::{Priority, ProjectStatus, Urgency};
use crate::types::{Date, Timestamp};

/// Days-to-deadline at or below which a project is Critical.
pub const CRITICAL_WINDOW_DAYS: i64 = 2;

/// Days-to-deadline at or below which a project is Urgent.
pub const URGENT_WINDOW_DAYS: i64 = 5;

// ---------------------------------------------------------------------------
// ProjectSchedule trait
// ---------------------------------------------------------------------------

/// Read-only view of the scheduling fields of a project record.
///
/// This is the seam between the pure derivation layer and whatever produced
/// the records (the sqlx row model in production, plain structs in tests).
/// Implementations must be cheap accessors; nothing here may touch I/O.
pub trait ProjectSchedule {
    fn status(&self) -> ProjectStatus;
    fn priority(&self) -> Priority;
    fn assigned_to(&self) -> &str;
    fn start_date(&self) -> Date;
    fn deadline(&self) -> Date;
    fn hours_allocated(&self) -> i32;
    fn hours_used(&self) -> i32;
    fn completed_at(&self) -> Option<Timestamp>;
    fn updated_at(&self) -> Timestamp;

    /// Remaining budget in hours. Negative when over budget -- callers must
    /// not clamp, over-budget projects count against weekly capacity.
    fn hours_remaining(&self) -> i32 {
        self.hours_allocated() - self.hours_used()
    }

    /// Whether more hours have been booked than were allocated. Allowed,
    /// not an error; feeds the Critical urgency tier.
    fn is_over_budget(&self) -> bool {
        self.hours_used() > self.hours_allocated()
    }
}

// ---------------------------------------------------------------------------
// Date utilities
// ---------------------------------------------------------------------------

/// Whole calendar days from `today` until `deadline`.
///
/// Negative means overdue; the deadline day itself is 0.
pub fn days_until(deadline: Date, today: Date) -> i64 {
    (deadline - today).num_days()
}

/// Inclusive day count of `[start, deadline]`.
///
/// A project starting and ending on the same day spans 1 day.
pub fn duration_days(start: Date, deadline: Date) -> i64 {
    (deadline - start).num_days() + 1
}

// ---------------------------------------------------------------------------
// Urgency classification
// ---------------------------------------------------------------------------

/// Classify a project's urgency as of `today`.
///
/// Precedence is strictly ordered: Completed, then Overdue, then Critical
/// (over budget or deadline within 2 days), then Urgent (deadline within
/// 5 days or High priority), then Normal. A project that is both overdue
/// and over budget is Overdue, not Critical.
pub fn classify_urgency<T: ProjectSchedule>(project: &T, today: Date) -> Urgency {
    if project.status() == ProjectStatus::Completed {
        return Urgency::Completed;
    }

    let days_left = days_until(project.deadline(), today);
    if days_left < 0 {
        return Urgency::Overdue;
    }
    if project.is_over_budget() || days_left <= CRITICAL_WINDOW_DAYS {
        return Urgency::Critical;
    }
    if days_left <= URGENT_WINDOW_DAYS || project.priority() == Priority::High {
        return Urgency::Urgent;
    }
    Urgency::Normal
}
