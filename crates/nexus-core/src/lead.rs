//! Lead records tracked through the sales pipeline.
//!
//! A lead carries a lifecycle [`LeadStatus`] and an independent
//! [`LeadPriority`]. Only those two fields feed the suggestion engine; the
//! rest (contact details, value, activity history) is carried for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::suggestion::{approach_suggestions, Suggestion};

/// Lowercases and folds `-`/`_` to spaces so "in-progress", "in_progress"
/// and "In Progress" all compare equal.
pub(crate) fn normalize_label(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Pipeline stage of a lead. Stages are mutually exclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LeadStatus {
    /// Freshly captured, not yet attended
    New,
    /// Being worked by its owner
    #[serde(rename = "In Progress")]
    InProgress,
    /// Deal won
    Closed,
    /// Deal lost
    Lost,
}

impl LeadStatus {
    /// All stages in pipeline order.
    pub const ALL: [LeadStatus; 4] = [
        LeadStatus::New,
        LeadStatus::InProgress,
        LeadStatus::Closed,
        LeadStatus::Lost,
    ];

    /// Display label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::InProgress => "In Progress",
            LeadStatus::Closed => "Closed",
            LeadStatus::Lost => "Lost",
        }
    }
}

impl Default for LeadStatus {
    fn default() -> Self {
        LeadStatus::New
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LeadStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::ALL
            .into_iter()
            .find(|status| normalize_label(status.label()) == normalize_label(s))
            .ok_or_else(|| {
                ValidationError::invalid(
                    "status",
                    format!("'{s}' is not one of New, In Progress, Closed, Lost"),
                )
            })
    }
}

/// Urgency classification. Independent of [`LeadStatus`]; tasks reuse it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LeadPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl LeadPriority {
    pub const ALL: [LeadPriority; 4] = [
        LeadPriority::Low,
        LeadPriority::Medium,
        LeadPriority::High,
        LeadPriority::Urgent,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LeadPriority::Low => "Low",
            LeadPriority::Medium => "Medium",
            LeadPriority::High => "High",
            LeadPriority::Urgent => "Urgent",
        }
    }

    /// High and Urgent leads warrant escalation.
    pub fn is_escalated(&self) -> bool {
        matches!(self, LeadPriority::High | LeadPriority::Urgent)
    }
}

impl Default for LeadPriority {
    fn default() -> Self {
        LeadPriority::Medium
    }
}

impl fmt::Display for LeadPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LeadPriority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadPriority::ALL
            .into_iter()
            .find(|priority| normalize_label(priority.label()) == normalize_label(s))
            .ok_or_else(|| {
                ValidationError::invalid(
                    "priority",
                    format!("'{s}' is not one of Low, Medium, High, Urgent"),
                )
            })
    }
}

/// Kind of entry in a lead's activity timeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Note,
    StatusChange,
    Call,
    Email,
    Task,
}

/// One entry in a lead's activity timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: String,
    pub kind: ActivityKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Display name of whoever recorded the entry
    pub user: String,
}

impl Activity {
    /// Timeline entry recorded when a manager enters a lead by hand.
    pub fn manual_creation(now: DateTime<Utc>) -> Self {
        Activity {
            id: format!("activity-{}", uuid::Uuid::new_v4().simple()),
            kind: ActivityKind::StatusChange,
            content: "Lead manually created".to_string(),
            timestamp: now,
            user: "Manager".to_string(),
        }
    }
}

/// A prospective customer tracked through the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    /// Unique identifier
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: LeadStatus,
    pub priority: LeadPriority,
    /// Salesperson responsible for the lead
    pub owner: String,
    /// Acquisition channel (e.g. "Website Form", "Manual Entry")
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    /// Agreed follow-up time (null if none scheduled)
    #[serde(default)]
    pub follow_up_date: Option<DateTime<Utc>>,
    /// Expected deal value in whole currency units
    pub value: u64,
    /// Why the deal was lost (only meaningful for Lost leads)
    #[serde(default)]
    pub loss_reason: Option<String>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl Lead {
    /// True when a follow-up was scheduled before `now`, regardless of status.
    pub fn follow_up_lapsed(&self, now: DateTime<Utc>) -> bool {
        self.follow_up_date.is_some_and(|due| due < now)
    }

    /// A lapsed follow-up on a lead that is still open for business.
    /// Closed leads are never overdue; Lost leads still are.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.follow_up_lapsed(now) && self.status != LeadStatus::Closed
    }

    /// Recommended next actions for this lead. Recomputed on every call.
    pub fn suggestions(&self) -> Vec<Suggestion> {
        approach_suggestions(self.status, self.priority)
    }
}

/// Partially filled lead as entered on the create form.
///
/// Unset fields are filled in by [`crate::store::LeadStore::create_lead`].
/// There is no status field: new leads always start as [`LeadStatus::New`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub priority: Option<LeadPriority>,
    pub owner: Option<String>,
    pub value: Option<u64>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl LeadDraft {
    pub fn new(name: impl Into<String>) -> Self {
        LeadDraft {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn lead(status: LeadStatus, follow_up: Option<DateTime<Utc>>) -> Lead {
        let at = Utc.with_ymd_and_hms(2024, 5, 15, 9, 0, 0).unwrap();
        Lead {
            id: "l1".into(),
            name: "Test".into(),
            email: String::new(),
            phone: String::new(),
            status,
            priority: LeadPriority::Medium,
            owner: "Alex Rivera".into(),
            source: "Referral".into(),
            created_at: at,
            last_activity: at,
            follow_up_date: follow_up,
            value: 0,
            loss_reason: None,
            activities: Vec::new(),
        }
    }

    #[test]
    fn status_parses_loose_spellings() {
        assert_eq!("in-progress".parse::<LeadStatus>().unwrap(), LeadStatus::InProgress);
        assert_eq!("In Progress".parse::<LeadStatus>().unwrap(), LeadStatus::InProgress);
        assert_eq!("in_progress".parse::<LeadStatus>().unwrap(), LeadStatus::InProgress);
        assert_eq!("LOST".parse::<LeadStatus>().unwrap(), LeadStatus::Lost);
        assert!("won".parse::<LeadStatus>().is_err());
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("urgent".parse::<LeadPriority>().unwrap(), LeadPriority::Urgent);
        assert_eq!(" High ".parse::<LeadPriority>().unwrap(), LeadPriority::High);
        let err = "critical".parse::<LeadPriority>().unwrap_err();
        assert!(err.to_string().contains("priority"));
    }

    #[test]
    fn status_serializes_as_display_label() {
        let json = serde_json::to_string(&LeadStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let back: LeadStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LeadStatus::InProgress);
    }

    #[test]
    fn activity_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ActivityKind::StatusChange).unwrap();
        assert_eq!(json, "\"status_change\"");
    }

    #[test]
    fn escalated_priorities() {
        assert!(LeadPriority::Urgent.is_escalated());
        assert!(LeadPriority::High.is_escalated());
        assert!(!LeadPriority::Medium.is_escalated());
        assert!(!LeadPriority::Low.is_escalated());
    }

    #[test]
    fn overdue_requires_lapsed_follow_up() {
        let now = Utc.with_ymd_and_hms(2024, 5, 16, 0, 0, 0).unwrap();
        assert!(!lead(LeadStatus::New, None).is_overdue(now));
        assert!(!lead(LeadStatus::New, Some(now + Duration::hours(1))).is_overdue(now));
        assert!(lead(LeadStatus::New, Some(now - Duration::hours(1))).is_overdue(now));
    }

    #[test]
    fn closed_leads_are_never_overdue() {
        let now = Utc.with_ymd_and_hms(2024, 5, 16, 0, 0, 0).unwrap();
        let closed = lead(LeadStatus::Closed, Some(now - Duration::days(2)));
        assert!(closed.follow_up_lapsed(now));
        assert!(!closed.is_overdue(now));

        let lost = lead(LeadStatus::Lost, Some(now - Duration::days(2)));
        assert!(lost.is_overdue(now));
    }

    #[test]
    fn lead_suggestions_follow_status_and_priority() {
        let mut l = lead(LeadStatus::Closed, None);
        assert!(l.suggestions().is_empty());
        l.priority = LeadPriority::Urgent;
        assert_eq!(l.suggestions().len(), 2);
    }

    #[test]
    fn manual_creation_activity() {
        let now = Utc.with_ymd_and_hms(2024, 5, 16, 0, 0, 0).unwrap();
        let activity = Activity::manual_creation(now);
        assert_eq!(activity.kind, ActivityKind::StatusChange);
        assert_eq!(activity.content, "Lead manually created");
        assert_eq!(activity.user, "Manager");
        assert_eq!(activity.timestamp, now);
    }
}
