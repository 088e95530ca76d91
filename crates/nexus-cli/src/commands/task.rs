//! Task management commands for CLI.

use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;
use nexus_core::{LeadPriority, TaskDraft, UserRole};

use super::open_app;

#[derive(Subcommand)]
pub enum TaskAction {
    /// List visible tasks
    List {
        /// Hide completed tasks
        #[arg(long)]
        open: bool,
    },
    /// Assign a new task (owner only)
    Create {
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Assignee (default: identity.default_assignee)
        #[arg(long)]
        assigned_to: Option<String>,
        /// Due date as YYYY-MM-DD or RFC 3339 (default: now)
        #[arg(long, value_parser = parse_due_date)]
        due: Option<DateTime<Utc>>,
        /// Priority (default: Medium)
        #[arg(long)]
        priority: Option<LeadPriority>,
        /// Lead ID to link
        #[arg(long)]
        lead_id: Option<String>,
    },
    /// Mark a task completed
    Complete {
        /// Task ID
        id: String,
    },
}

fn parse_due_date(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("invalid due date '{s}': expected YYYY-MM-DD or RFC 3339"))
}

pub fn run(action: TaskAction, role: Option<UserRole>) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = open_app(role)?;

    match action {
        TaskAction::List { open } => {
            let tasks = app.tasks(open)?;
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Create {
            title,
            description,
            assigned_to,
            due,
            priority,
            lead_id,
        } => {
            let draft = TaskDraft {
                title: Some(title),
                description,
                assigned_to,
                due_date: due,
                status: None,
                priority,
                lead_id,
            };
            let task = app.assign_task(draft, Utc::now())?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Complete { id } => {
            let task = app.complete_task(&id)?;
            println!("Task completed:");
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
    }
    Ok(())
}
