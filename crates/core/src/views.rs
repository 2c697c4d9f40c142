//! Sort & filter engine for the dashboard views.
//!
//! Everything here consumes a snapshot slice of project records and returns
//! vectors of references into it -- no record is copied, no ambient state is
//! read. Views are recomputed on every read; nothing derived is persisted.

use chrono::Duration;

use crate::project::{ProjectStatus, UNASSIGNED};
use crate::schedule::{classify_urgency, ProjectSchedule};
use crate::types::Date;
use crate::workload::week_start;

/// Number of projects shown in the "up next" queue slice.
pub const UP_NEXT_COUNT: usize = 3;

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Fabricator scoping for list views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FabricatorFilter {
    /// No scoping; every project passes.
    All,
    /// Exact match on `assigned_to`.
    Name(String),
}

impl FabricatorFilter {
    /// Parse the query-string form: `"all"` (case-insensitive) or a name.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Name(value.to_string())
        }
    }
}

/// Scope `projects` to a fabricator. `All` is the identity.
pub fn filter_by_fabricator<'a, T: ProjectSchedule>(
    projects: &[&'a T],
    filter: &FabricatorFilter,
) -> Vec<&'a T> {
    match filter {
        FabricatorFilter::All => projects.to_vec(),
        FabricatorFilter::Name(name) => projects
            .iter()
            .copied()
            .filter(|p| p.assigned_to() == name)
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Partitioning
// ---------------------------------------------------------------------------

/// The three mutually exclusive, collectively exhaustive dashboard buckets.
#[derive(Debug)]
pub struct Partition<'a, T> {
    /// Non-completed, `assigned_to == "Unassigned"` -- awaiting triage.
    pub unassigned: Vec<&'a T>,
    /// Non-completed with a fabricator assigned.
    pub active: Vec<&'a T>,
    /// Status Completed, regardless of assignment.
    pub completed: Vec<&'a T>,
}

/// Split a snapshot into unassigned / active / completed buckets.
///
/// Every project lands in exactly one bucket; input relative order is
/// preserved within each.
pub fn partition<'a, T: ProjectSchedule>(projects: &[&'a T]) -> Partition<'a, T> {
    let mut result = Partition {
        unassigned: Vec::new(),
        active: Vec::new(),
        completed: Vec::new(),
    };
    for &p in projects {
        if p.status() == ProjectStatus::Completed {
            result.completed.push(p);
        } else if p.assigned_to() == UNASSIGNED {
            result.unassigned.push(p);
        } else {
            result.active.push(p);
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Order active projects by (urgency rank, deadline ascending).
///
/// The sort is stable: equal-rank, equal-deadline projects keep their input
/// relative order, so repeated application is idempotent.
pub fn sort_active<'a, T: ProjectSchedule>(projects: &[&'a T], today: Date) -> Vec<&'a T> {
    let mut sorted = projects.to_vec();
    sorted.sort_by_key(|p| (classify_urgency(*p, today).rank(), p.deadline()));
    sorted
}

/// Order completed projects most-recently-completed first.
///
/// Falls back to `updated_at` for rows missing `completed_at` (legacy data
/// completed before the timestamp existed).
pub fn sort_completed<'a, T: ProjectSchedule>(projects: &[&'a T]) -> Vec<&'a T> {
    let mut sorted = projects.to_vec();
    sorted.sort_by_key(|p| std::cmp::Reverse(p.completed_at().unwrap_or_else(|| p.updated_at())));
    sorted
}

/// Order the unassigned queue by (priority rank, deadline ascending).
pub fn sort_unassigned<'a, T: ProjectSchedule>(projects: &[&'a T]) -> Vec<&'a T> {
    let mut sorted = projects.to_vec();
    sorted.sort_by_key(|p| (p.priority().rank(), p.deadline()));
    sorted
}

/// Prefix slice of an already-sorted view, used as the "up next" queue.
/// Not a persisted queue -- recomputed on every read.
pub fn top_n<'a, 'b, T>(sorted: &'b [&'a T], n: usize) -> &'b [&'a T] {
    &sorted[..sorted.len().min(n)]
}

// ---------------------------------------------------------------------------
// Aggregate statistics
// ---------------------------------------------------------------------------

/// Headline counts shown above the dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct DashboardStats {
    pub unassigned: usize,
    pub active: usize,
    pub completed: usize,
    /// Non-completed projects currently past their deadline.
    pub overdue: usize,
    /// Projects completed during the week (Sunday-anchored) containing `today`.
    pub completed_this_week: usize,
}

impl DashboardStats {
    pub fn compute<T: ProjectSchedule>(projects: &[&T], today: Date) -> Self {
        let parts = partition(projects);
        let overdue = parts
            .unassigned
            .iter()
            .chain(parts.active.iter())
            .filter(|p| crate::schedule::days_until(p.deadline(), today) < 0)
            .count();

        let week = week_start(today);
        let week_end = week + Duration::days(6);
        let completed_this_week = parts
            .completed
            .iter()
            .filter(|p| {
                p.completed_at()
                    .map(|at| {
                        let day = at.date_naive();
                        day >= week && day <= week_end
                    })
                    .unwrap_or(false)
            })
            .count();

        Self {
            unassigned: parts.unassigned.len(),
            active: parts.active.len(),
            completed: parts.completed.len(),
            overdue,
            completed_this_week,
        }
    }
}
