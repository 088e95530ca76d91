//! Role selection and role-gated views.
//!
//! Logging in only picks a [`UserRole`]; there are no credentials. The role
//! decides which views are offered and which leads and tasks are visible.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::IdentityConfig;
use crate::error::{AccessError, ValidationError};
use crate::lead::{normalize_label, Lead};
use crate::store::LeadStore;
use crate::task::Task;

/// Who is using the dashboard.
///
/// Serializes as `OWNER`/`SALES`; deserializes through [`FromStr`], so any
/// casing is accepted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum UserRole {
    /// Business owner: sees everything, assigns tasks, opens analytics
    Owner,
    /// Salesperson: scoped to their own leads and tasks
    Sales,
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Owner
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UserRole::Owner => "OWNER",
            UserRole::Sales => "SALES",
        })
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "owner" => Ok(UserRole::Owner),
            "sales" => Ok(UserRole::Sales),
            _ => Err(ValidationError::invalid(
                "role",
                format!("'{s}' is not one of owner, sales"),
            )),
        }
    }
}

impl TryFrom<String> for UserRole {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Dashboard tab.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Dashboard,
    Leads,
    Tasks,
    Analytics,
}

impl View {
    pub const ALL: [View; 4] = [View::Dashboard, View::Leads, View::Tasks, View::Analytics];

    pub fn allows(&self, role: UserRole) -> bool {
        match self {
            View::Dashboard | View::Leads | View::Tasks => true,
            View::Analytics => role == UserRole::Owner,
        }
    }

    /// Views offered to `role`, in menu order.
    pub fn menu_for(role: UserRole) -> Vec<View> {
        View::ALL.into_iter().filter(|v| v.allows(role)).collect()
    }

    /// Page heading.
    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Business Intelligence",
            View::Leads => "Lead Pipeline",
            View::Tasks => "Accountability Hub",
            View::Analytics => "Market Analytics",
        }
    }
}

impl Default for View {
    fn default() -> Self {
        View::Dashboard
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            View::Dashboard => "Dashboard",
            View::Leads => "Leads",
            View::Tasks => "Tasks",
            View::Analytics => "Analytics",
        })
    }
}

/// Local UI session: selected role and active view.
#[derive(Debug, Clone, Default)]
pub struct Session {
    role: Option<UserRole>,
    active_view: View,
    identity: IdentityConfig,
}

impl Session {
    pub fn new(identity: IdentityConfig) -> Self {
        Session {
            role: None,
            active_view: View::Dashboard,
            identity,
        }
    }

    /// Select a role. With no choice the session falls back to Owner.
    pub fn login(&mut self, role: Option<UserRole>) -> UserRole {
        let role = role.unwrap_or(UserRole::Owner);
        tracing::info!(%role, "session started");
        self.role = Some(role);
        role
    }

    pub fn logout(&mut self) {
        if let Some(role) = self.role.take() {
            tracing::info!(%role, "session ended");
        }
        self.active_view = View::Dashboard;
    }

    pub fn role(&self) -> Option<UserRole> {
        self.role
    }

    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }

    pub fn active_view(&self) -> View {
        self.active_view
    }

    pub fn current_role(&self) -> Result<UserRole, AccessError> {
        self.role.ok_or(AccessError::NotLoggedIn)
    }

    /// Open `view` if the current role may see it.
    pub fn switch_view(&mut self, view: View) -> Result<(), AccessError> {
        let role = self.current_role()?;
        if !view.allows(role) {
            tracing::warn!(%role, %view, "view denied");
            return Err(AccessError::ViewForbidden { role, view });
        }
        self.active_view = view;
        Ok(())
    }

    /// Only owners hand out tasks.
    pub fn ensure_can_assign_tasks(&self) -> Result<(), AccessError> {
        let role = self.current_role()?;
        if role != UserRole::Owner {
            tracing::warn!(%role, "task assignment denied");
            return Err(AccessError::ActionForbidden {
                role,
                action: "assign tasks".to_string(),
            });
        }
        Ok(())
    }

    pub fn greeting(&self) -> Result<String, AccessError> {
        let name = match self.current_role()? {
            UserRole::Owner => &self.identity.owner_display_name,
            UserRole::Sales => &self.identity.sales_display_name,
        };
        Ok(format!("Welcome back, {name}."))
    }

    /// Leads the current role may see, in store order.
    pub fn visible_leads<'a>(&self, store: &'a LeadStore) -> Result<Vec<&'a Lead>, AccessError> {
        let role = self.current_role()?;
        Ok(store
            .leads()
            .iter()
            .filter(|lead| role == UserRole::Owner || lead.owner == self.identity.sales_identity)
            .collect())
    }

    /// Tasks the current role may see, in store order.
    pub fn visible_tasks<'a>(&self, store: &'a LeadStore) -> Result<Vec<&'a Task>, AccessError> {
        let role = self.current_role()?;
        Ok(store
            .tasks()
            .iter()
            .filter(|task| role == UserRole::Owner || task.assigned_to == self.identity.sales_identity)
            .collect())
    }
}
