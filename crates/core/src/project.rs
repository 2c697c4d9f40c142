//! Project status, priority, and urgency vocabulary plus the status state
//! machine.
//!
//! The wire/database form of [`ProjectStatus`] and [`Priority`] is the
//! display string (`"Not Started"`, `"High"`, ...), matching the `projects`
//! table TEXT columns. `TryFrom<String>` exists so sqlx row decoding can use
//! `#[sqlx(try_from = "String")]` without this crate depending on sqlx.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Sentinel value of `assigned_to` for projects awaiting fabricator triage.
pub const UNASSIGNED: &str = "Unassigned";

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl ProjectStatus {
    /// The display/storage string for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProjectStatus {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Not Started" => Ok(Self::NotStarted),
            "In Progress" => Ok(Self::InProgress),
            "Completed" => Ok(Self::Completed),
            other => Err(CoreError::Validation(format!(
                "Unknown project status: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Manager-assigned priority. Ranks High before Medium before Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Sort rank: lower sorts first (High=0, Medium=1, Low=2).
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            other => Err(CoreError::Validation(format!("Unknown priority: {other}"))),
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

// ---------------------------------------------------------------------------
// Urgency
// ---------------------------------------------------------------------------

/// Derived urgency tier. Never persisted; recomputed on every read from
/// status, deadline proximity, budget, and priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Overdue,
    Critical,
    Urgent,
    Normal,
    Completed,
}

impl Urgency {
    /// Sort rank for active views (Overdue=0 < Critical=1 < Urgent=2 <
    /// Normal=3). Completed sorts after everything.
    pub fn rank(self) -> u8 {
        match self {
            Self::Overdue => 0,
            Self::Critical => 1,
            Self::Urgent => 2,
            Self::Normal => 3,
            Self::Completed => 4,
        }
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Status transition rules for a project.
///
/// Fields (hours, progress, assignment, notes) are freely editable while a
/// project is not Completed; only the status value itself is gated. The one
/// special transition, "mark complete", also forces progress to 100 and
/// `hours_used` to `hours_allocated` -- that write is owned by the repository
/// layer, this module only answers whether a status change is legal.
pub mod state_machine {
    use super::ProjectStatus;

    /// Returns the set of valid target statuses reachable from `from`.
    ///
    /// Completed is terminal: no transition out of it is exposed.
    pub fn valid_transitions(from: ProjectStatus) -> &'static [ProjectStatus] {
        match from {
            ProjectStatus::NotStarted => &[ProjectStatus::InProgress, ProjectStatus::Completed],
            ProjectStatus::InProgress => &[ProjectStatus::NotStarted, ProjectStatus::Completed],
            ProjectStatus::Completed => &[],
        }
    }

    /// Check whether a transition from `from` to `to` is valid.
    pub fn can_transition(from: ProjectStatus, to: ProjectStatus) -> bool {
        valid_transitions(from).contains(&to)
    }

    /// Validate a status transition, returning an error message for invalid
    /// ones.
    pub fn validate_transition(from: ProjectStatus, to: ProjectStatus) -> Result<(), String> {
        if can_transition(from, to) {
            Ok(())
        } else {
            Err(format!("Invalid transition: {from} -> {to}"))
        }
    }
}
