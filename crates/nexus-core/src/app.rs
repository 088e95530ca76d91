//! Application state: one session over one store.
//!
//! [`CrmApp`] is what a front end drives. It applies role gating on top of
//! [`LeadStore`] so callers only ever see the records the logged-in role is
//! allowed to see.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::lead::{Lead, LeadDraft};
use crate::session::{Session, UserRole, View};
use crate::stats::{status_breakdown, task_preview, DashboardStats, StatusCount};
use crate::store::{LeadFilter, LeadStore};
use crate::suggestion::LeadAnalysis;
use crate::task::{Task, TaskDraft};

/// Everything the dashboard view renders.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary<'a> {
    pub title: &'static str,
    pub greeting: String,
    pub stats: DashboardStats,
    pub status_breakdown: Vec<StatusCount>,
    pub open_tasks: Vec<&'a Task>,
}

#[derive(Debug, Clone)]
pub struct CrmApp {
    config: Config,
    session: Session,
    store: LeadStore,
}

impl CrmApp {
    /// App seeded with the demo pipeline, nobody logged in.
    pub fn new(config: Config) -> Self {
        CrmApp {
            session: Session::new(config.identity.clone()),
            store: LeadStore::with_sample_data(config.store_defaults()),
            config,
        }
    }

    /// App over an existing store.
    pub fn with_store(config: Config, store: LeadStore) -> Self {
        CrmApp {
            session: Session::new(config.identity.clone()),
            store,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &LeadStore {
        &self.store
    }

    /// Log in as `role`, or the configured default role.
    pub fn login(&mut self, role: Option<UserRole>) -> UserRole {
        self.session
            .login(Some(role.unwrap_or(self.config.session.default_role)))
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    pub fn open_view(&mut self, view: View) -> Result<()> {
        Ok(self.session.switch_view(view)?)
    }

    /// Visible leads narrowed by `filter`.
    pub fn leads(&self, filter: &LeadFilter) -> Result<Vec<&Lead>> {
        Ok(self
            .session
            .visible_leads(&self.store)?
            .into_iter()
            .filter(|l| filter.matches(l))
            .collect())
    }

    /// A visible lead. Leads outside the role's scope report as not found.
    pub fn lead(&self, id: &str) -> Result<&Lead> {
        self.session
            .visible_leads(&self.store)?
            .into_iter()
            .find(|l| l.id == id)
            .ok_or_else(|| StoreError::LeadNotFound(id.to_string()).into())
    }

    pub fn analyze_lead(&self, id: &str, now: DateTime<Utc>) -> Result<LeadAnalysis<'_>> {
        Ok(LeadAnalysis::of(self.lead(id)?, now))
    }

    pub fn tasks(&self, open_only: bool) -> Result<Vec<&Task>> {
        Ok(self
            .session
            .visible_tasks(&self.store)?
            .into_iter()
            .filter(|t| !open_only || t.status.is_open())
            .collect())
    }

    /// Any logged-in role may add leads.
    pub fn create_lead(&mut self, draft: LeadDraft, now: DateTime<Utc>) -> Result<Lead> {
        self.session.current_role()?;
        Ok(self.store.create_lead(draft, now))
    }

    /// Owner only.
    pub fn assign_task(&mut self, draft: TaskDraft, now: DateTime<Utc>) -> Result<Task> {
        self.session.ensure_can_assign_tasks()?;
        Ok(self.store.create_task(draft, now)?)
    }

    /// Complete a visible task.
    pub fn complete_task(&mut self, id: &str) -> Result<Task> {
        let visible = self
            .session
            .visible_tasks(&self.store)?
            .iter()
            .any(|t| t.id == id);
        if !visible {
            return Err(StoreError::TaskNotFound(id.to_string()).into());
        }
        Ok(self.store.complete_task(id)?)
    }

    /// Mark pending tasks past their due date as Overdue.
    pub fn refresh_overdue_tasks(&mut self, now: DateTime<Utc>) -> usize {
        self.store.refresh_overdue_tasks(now)
    }

    pub fn dashboard(&self, now: DateTime<Utc>) -> Result<DashboardSummary<'_>> {
        let leads = self.session.visible_leads(&self.store)?;
        let tasks = self.session.visible_tasks(&self.store)?;
        Ok(DashboardSummary {
            title: View::Dashboard.title(),
            greeting: self.session.greeting()?,
            stats: DashboardStats::compute(leads.iter().copied(), now),
            status_breakdown: status_breakdown(leads.iter().copied()),
            open_tasks: task_preview(tasks, self.config.dashboard.task_preview_limit),
        })
    }
}
