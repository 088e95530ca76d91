//! In-memory lead and task store.
//!
//! The store is the single owner of all leads and tasks. Mutation goes
//! through `&mut self`; there is one implicit actor so the last write wins.
//! Newly created records are placed first, matching the pipeline's
//! newest-first listing.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::StoreError;
use crate::lead::{Lead, LeadDraft, LeadPriority, LeadStatus};
use crate::sample;
use crate::task::{Task, TaskDraft, TaskStatus};

/// Fallback identities used when a draft leaves them unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDefaults {
    pub owner: String,
    pub assignee: String,
}

impl Default for StoreDefaults {
    fn default() -> Self {
        Self {
            owner: "Alex Rivera".to_string(),
            assignee: "Unassigned".to_string(),
        }
    }
}

/// Criteria for [`LeadStore::leads_matching`]. Unset fields match anything.
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    pub status: Option<LeadStatus>,
    pub priority: Option<LeadPriority>,
    pub owner: Option<String>,
    /// Keep only leads overdue at this instant
    pub overdue_at: Option<DateTime<Utc>>,
}

impl LeadFilter {
    pub fn matches(&self, lead: &Lead) -> bool {
        if self.status.is_some_and(|s| s != lead.status) {
            return false;
        }
        if self.priority.is_some_and(|p| p != lead.priority) {
            return false;
        }
        if let Some(ref owner) = self.owner {
            if &lead.owner != owner {
                return false;
            }
        }
        if let Some(now) = self.overdue_at {
            if !lead.is_overdue(now) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct LeadStore {
    leads: Vec<Lead>,
    tasks: Vec<Task>,
    defaults: StoreDefaults,
}

impl LeadStore {
    /// Empty store.
    pub fn new(defaults: StoreDefaults) -> Self {
        LeadStore {
            leads: Vec::new(),
            tasks: Vec::new(),
            defaults,
        }
    }

    /// Store seeded with the demo pipeline.
    pub fn with_sample_data(defaults: StoreDefaults) -> Self {
        LeadStore {
            leads: sample::leads(),
            tasks: sample::tasks(),
            defaults,
        }
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn lead(&self, id: &str) -> Option<&Lead> {
        self.leads.iter().find(|l| l.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn leads_matching(&self, filter: &LeadFilter) -> Vec<&Lead> {
        self.leads.iter().filter(|l| filter.matches(l)).collect()
    }

    /// Leads with a lapsed follow-up that are not closed.
    pub fn overdue_leads(&self, now: DateTime<Utc>) -> Vec<&Lead> {
        self.leads.iter().filter(|l| l.is_overdue(now)).collect()
    }

    /// Create a lead from a draft, filling unset fields with defaults.
    ///
    /// New leads always start as [`LeadStatus::New`] from "Manual Entry".
    pub fn create_lead(&mut self, draft: LeadDraft, now: DateTime<Utc>) -> Lead {
        let lead = Lead {
            id: Uuid::new_v4().to_string(),
            name: draft.name.unwrap_or_else(|| "Unknown".to_string()),
            email: draft.email.unwrap_or_default(),
            phone: draft.phone.unwrap_or_default(),
            status: LeadStatus::New,
            priority: draft.priority.unwrap_or_default(),
            owner: draft.owner.unwrap_or_else(|| self.defaults.owner.clone()),
            source: "Manual Entry".to_string(),
            created_at: now,
            last_activity: now,
            follow_up_date: None,
            value: draft.value.unwrap_or(0),
            loss_reason: None,
            activities: draft.activities,
        };

        tracing::info!(id = %lead.id, owner = %lead.owner, priority = %lead.priority, "lead created");
        self.leads.insert(0, lead.clone());
        lead
    }

    /// Create a task from a draft, filling unset fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LeadNotFound`] if the draft links a lead id
    /// that is not in the store.
    pub fn create_task(&mut self, draft: TaskDraft, now: DateTime<Utc>) -> Result<Task, StoreError> {
        let lead_name = match draft.lead_id {
            Some(ref id) => Some(
                self.lead(id)
                    .ok_or_else(|| StoreError::LeadNotFound(id.clone()))?
                    .name
                    .clone(),
            ),
            None => None,
        };

        let task = Task {
            id: Uuid::new_v4().to_string(),
            lead_id: draft.lead_id,
            lead_name,
            title: draft.title.unwrap_or_else(|| "Untitled Task".to_string()),
            description: draft.description.unwrap_or_default(),
            assigned_to: draft.assigned_to.unwrap_or_else(|| self.defaults.assignee.clone()),
            due_date: draft.due_date.unwrap_or(now),
            status: draft.status.unwrap_or_default(),
            priority: draft.priority.unwrap_or_default(),
        };

        tracing::info!(id = %task.id, assigned_to = %task.assigned_to, "task created");
        self.tasks.insert(0, task.clone());
        Ok(task)
    }

    /// Mark a task completed. Completing an already completed task is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] for an unknown id.
    pub fn complete_task(&mut self, id: &str) -> Result<Task, StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))?;
        task.complete();
        tracing::info!(id, "task completed");
        Ok(task.clone())
    }

    /// Flip pending tasks whose due date has passed to Overdue.
    /// Returns how many changed.
    pub fn refresh_overdue_tasks(&mut self, now: DateTime<Utc>) -> usize {
        let mut changed = 0;
        for task in self
            .tasks
            .iter_mut()
            .filter(|t| t.status == TaskStatus::Pending && t.due_date < now)
        {
            if task.transition_to(TaskStatus::Overdue).is_ok() {
                changed += 1;
            }
        }
        if changed > 0 {
            tracing::debug!(changed, "tasks marked overdue");
        }
        changed
    }
}
