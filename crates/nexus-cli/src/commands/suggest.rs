use nexus_core::{approach_suggestions, LeadPriority, LeadStatus};

pub fn run(status: LeadStatus, priority: LeadPriority) -> Result<(), Box<dyn std::error::Error>> {
    let suggestions = approach_suggestions(status, priority);
    println!("{}", serde_json::to_string_pretty(&suggestions)?);
    Ok(())
}
