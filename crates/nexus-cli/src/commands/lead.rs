//! Lead pipeline commands for CLI.
//!
//! Every invocation starts from the demo pipeline; created leads are printed
//! but not kept.

use chrono::Utc;
use clap::Subcommand;
use nexus_core::{Activity, LeadDraft, LeadFilter, LeadPriority, LeadStatus, UserRole};

use super::open_app;

#[derive(Subcommand)]
pub enum LeadAction {
    /// List visible leads
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<LeadStatus>,
        /// Filter by priority
        #[arg(long)]
        priority: Option<LeadPriority>,
        /// Filter by owner name
        #[arg(long)]
        owner: Option<String>,
        /// Only leads with a lapsed follow-up that are not closed
        #[arg(long)]
        overdue: bool,
    },
    /// Get lead details
    Get {
        /// Lead ID
        id: String,
    },
    /// Lead details with overdue flag and suggested next actions
    Analyze {
        /// Lead ID
        id: String,
    },
    /// Create a new lead
    Create {
        /// Lead name
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Priority (default: Medium)
        #[arg(long)]
        priority: Option<LeadPriority>,
        /// Owner (default: identity.default_owner)
        #[arg(long)]
        owner: Option<String>,
        /// Deal value
        #[arg(long)]
        value: Option<u64>,
    },
}

pub fn run(action: LeadAction, role: Option<UserRole>) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = open_app(role)?;
    let now = Utc::now();

    match action {
        LeadAction::List {
            status,
            priority,
            owner,
            overdue,
        } => {
            let filter = LeadFilter {
                status,
                priority,
                owner,
                overdue_at: overdue.then_some(now),
            };
            let leads = app.leads(&filter)?;
            println!("{}", serde_json::to_string_pretty(&leads)?);
        }
        LeadAction::Get { id } => {
            let lead = app.lead(&id)?;
            println!("{}", serde_json::to_string_pretty(lead)?);
        }
        LeadAction::Analyze { id } => {
            let analysis = app.analyze_lead(&id, now)?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        LeadAction::Create {
            name,
            email,
            phone,
            priority,
            owner,
            value,
        } => {
            let draft = LeadDraft {
                name: Some(name),
                email,
                phone,
                priority,
                owner,
                value,
                activities: vec![Activity::manual_creation(now)],
            };
            let lead = app.create_lead(draft, now)?;
            println!("Lead created: {}", lead.id);
            println!("{}", serde_json::to_string_pretty(&lead)?);
        }
    }
    Ok(())
}
