//! Accountability tasks, optionally linked to a lead.
//!
//! Task status follows a small set of transitions:
//!
//!   PENDING ───────> COMPLETED
//!      |                 ^
//!      v                 |
//!   OVERDUE ─────────────+
//!
//! - PENDING → OVERDUE (due date passed)
//! - PENDING → COMPLETED, OVERDUE → COMPLETED (complete)
//! - COMPLETED → COMPLETED (completing again is a no-op)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::lead::{normalize_label, LeadPriority};

/// Task status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// Waiting to be done (initial state)
    Pending,
    /// Done (terminal state)
    Completed,
    /// Past its due date and still open
    Overdue,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Pending, TaskStatus::Completed, TaskStatus::Overdue];

    /// Check if a transition is valid.
    pub fn can_transition_to(&self, to: &TaskStatus) -> bool {
        match self {
            TaskStatus::Pending => matches!(to, TaskStatus::Completed | TaskStatus::Overdue),
            TaskStatus::Overdue => matches!(to, TaskStatus::Completed),
            TaskStatus::Completed => matches!(to, TaskStatus::Completed),
        }
    }

    /// Anything not yet completed still needs attention.
    pub fn is_open(&self) -> bool {
        !matches!(self, TaskStatus::Completed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Completed => "Completed",
            TaskStatus::Overdue => "Overdue",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| normalize_label(status.label()) == normalize_label(s))
            .ok_or_else(|| {
                ValidationError::invalid(
                    "task status",
                    format!("'{s}' is not one of Pending, Completed, Overdue"),
                )
            })
    }
}

/// An actionable accountability item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier
    pub id: String,
    /// Linked lead, if any
    #[serde(default)]
    pub lead_id: Option<String>,
    /// Linked lead's name (for display)
    #[serde(default)]
    pub lead_name: Option<String>,
    pub title: String,
    pub description: String,
    /// Display name of the assignee
    pub assigned_to: String,
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
    pub priority: LeadPriority,
}

impl Task {
    /// Transition to a new status.
    ///
    /// Returns an error if the transition is invalid.
    pub fn transition_to(&mut self, new_status: TaskStatus) -> Result<(), TaskTransitionError> {
        if !self.status.can_transition_to(&new_status) {
            return Err(TaskTransitionError {
                from: self.status,
                to: new_status,
            });
        }
        self.status = new_status;
        Ok(())
    }

    /// Mark the task done. Completing twice leaves it completed.
    pub fn complete(&mut self) {
        self.status = TaskStatus::Completed;
    }

    /// Open task whose due date is before `now`.
    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        self.status.is_open() && self.due_date < now
    }
}

/// Error returned when an invalid status transition is attempted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskTransitionError {
    pub from: TaskStatus,
    pub to: TaskStatus,
}

impl fmt::Display for TaskTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid status transition: {} → {}", self.from, self.to)
    }
}

impl std::error::Error for TaskTransitionError {}

/// Partially filled task as entered on the assign form.
///
/// Unset fields are filled in by [`crate::store::LeadStore::create_task`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<LeadPriority>,
    pub lead_id: Option<String>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        TaskDraft {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}
