pub mod config;
pub mod dashboard;
pub mod lead;
pub mod suggest;
pub mod task;

use chrono::Utc;
use nexus_core::{Config, CrmApp, UserRole};

/// Fresh demo app with `role` (or the configured default) logged in and
/// lapsed tasks marked overdue.
pub fn open_app(role: Option<UserRole>) -> Result<CrmApp, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut app = CrmApp::new(config);
    let role = app.login(role);
    let overdue = app.refresh_overdue_tasks(Utc::now());
    tracing::debug!(%role, overdue, "session opened");
    Ok(app)
}
