//! Per-fabricator weekly workload aggregation for the calendar view.
//!
//! Weeks are locale-fixed to start on Sunday. All aggregation is over a
//! caller-supplied snapshot; nothing here queries a store.

use chrono::{Datelike, Duration};

use crate::project::ProjectStatus;
use crate::schedule::ProjectSchedule;
use crate::types::Date;

/// Total remaining hours above which a fabricator's week is flagged as
/// overloaded in the calendar view.
pub const OVERLOADED_HOURS_THRESHOLD: i32 = 40;

// ---------------------------------------------------------------------------
// Week arithmetic
// ---------------------------------------------------------------------------

/// The Sunday of the week containing `date`.
pub fn week_start(date: Date) -> Date {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// The 7 consecutive days of the week beginning at `start`.
pub fn week_days(start: Date) -> [Date; 7] {
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

// ---------------------------------------------------------------------------
// Span tests
// ---------------------------------------------------------------------------

/// Whether `[start_date, deadline]` overlaps the week `[week_start, week_start+6]`.
pub fn project_spans_week<T: ProjectSchedule>(project: &T, week_start: Date) -> bool {
    let week_end = week_start + Duration::days(6);
    project.start_date() <= week_end && project.deadline() >= week_start
}

/// Whether `day` falls within `[start_date, deadline]` inclusive.
pub fn project_on_day<T: ProjectSchedule>(project: &T, day: Date) -> bool {
    day >= project.start_date() && day <= project.deadline()
}

// ---------------------------------------------------------------------------
// Workload aggregation
// ---------------------------------------------------------------------------

/// A fabricator's load for one week.
#[derive(Debug)]
pub struct FabricatorWorkload<'a, T> {
    /// Non-completed projects assigned to the fabricator that span the week,
    /// in input order.
    pub projects: Vec<&'a T>,
    /// Sum of remaining hours (`hours_allocated - hours_used`) across those
    /// projects. Unclamped: an over-budget project contributes negatively.
    pub hours: i32,
}

impl<T> FabricatorWorkload<'_, T> {
    /// Whether the week's remaining hours exceed the display threshold.
    pub fn is_overloaded(&self) -> bool {
        self.hours > OVERLOADED_HOURS_THRESHOLD
    }
}

/// Compute one fabricator's workload for the week starting at `week_start`.
pub fn fabricator_workload<'a, T: ProjectSchedule>(
    name: &str,
    week_start: Date,
    projects: &[&'a T],
) -> FabricatorWorkload<'a, T> {
    let matching: Vec<&T> = projects
        .iter()
        .copied()
        .filter(|p| {
            p.status() != ProjectStatus::Completed
                && p.assigned_to() == name
                && project_spans_week(*p, week_start)
        })
        .collect();
    let hours = matching.iter().map(|p| p.hours_remaining()).sum();
    FabricatorWorkload {
        projects: matching,
        hours,
    }
}
