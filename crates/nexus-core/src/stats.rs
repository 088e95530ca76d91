//! Dashboard counters over a set of leads.
//!
//! Callers pass the leads visible to the current role, so a Sales session
//! gets counters for its own pipeline only.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::lead::{Lead, LeadStatus};
use crate::task::Task;

/// Headline numbers shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_leads: usize,
    /// Leads that have moved past New
    pub attended: usize,
    /// Leads whose follow-up time has passed (any status)
    pub overdue: usize,
    pub lost: usize,
    /// Closed leads as a whole-number percentage of all leads
    pub success_rate: u32,
}

impl DashboardStats {
    pub fn compute<'a, I>(leads: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a Lead>,
    {
        let mut stats = DashboardStats {
            total_leads: 0,
            attended: 0,
            overdue: 0,
            lost: 0,
            success_rate: 0,
        };
        let mut closed = 0usize;

        for lead in leads {
            stats.total_leads += 1;
            if lead.status != LeadStatus::New {
                stats.attended += 1;
            }
            if lead.follow_up_lapsed(now) {
                stats.overdue += 1;
            }
            match lead.status {
                LeadStatus::Lost => stats.lost += 1,
                LeadStatus::Closed => closed += 1,
                _ => {}
            }
        }

        let denominator = stats.total_leads.max(1) as f64;
        stats.success_rate = (closed as f64 / denominator * 100.0).round() as u32;
        stats
    }
}

/// Lead count for one pipeline stage.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StatusCount {
    pub status: LeadStatus,
    pub count: usize,
}

/// Lead counts per stage in pipeline order (New, In Progress, Closed, Lost).
/// Every stage is present, including empty ones.
pub fn status_breakdown<'a, I>(leads: I) -> Vec<StatusCount>
where
    I: IntoIterator<Item = &'a Lead>,
{
    let mut counts = LeadStatus::ALL.map(|status| StatusCount { status, count: 0 });
    for lead in leads {
        if let Some(entry) = counts.iter_mut().find(|c| c.status == lead.status) {
            entry.count += 1;
        }
    }
    counts.to_vec()
}

/// First `limit` open tasks, in the given order.
pub fn task_preview<'a, I>(tasks: I, limit: usize) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|t| t.status.is_open())
        .take(limit)
        .collect()
}
