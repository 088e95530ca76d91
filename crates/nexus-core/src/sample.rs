//! Demo pipeline the dashboard starts with.

use chrono::{DateTime, TimeZone, Utc};

use crate::lead::{Activity, ActivityKind, Lead, LeadPriority, LeadStatus};
use crate::task::{Task, TaskStatus};

fn at(month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn activity(id: &str, kind: ActivityKind, content: &str, timestamp: DateTime<Utc>, user: &str) -> Activity {
    Activity {
        id: id.to_string(),
        kind,
        content: content.to_string(),
        timestamp,
        user: user.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn lead(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    status: LeadStatus,
    priority: LeadPriority,
    owner: &str,
    source: &str,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
    follow_up_date: Option<DateTime<Utc>>,
    value: u64,
    activities: Vec<Activity>,
) -> Lead {
    Lead {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        status,
        priority,
        owner: owner.to_string(),
        source: source.to_string(),
        created_at,
        last_activity,
        follow_up_date,
        value,
        loss_reason: None,
        activities,
    }
}

pub(crate) fn leads() -> Vec<Lead> {
    let mut wilson = lead(
        "4",
        "David Wilson",
        "david.w@global.net",
        "+1 555-0104",
        LeadStatus::Lost,
        LeadPriority::Low,
        "Jordan Smith",
        "Google Ads",
        at(5, 8, 10, 0),
        at(5, 12, 9, 0),
        None,
        3000,
        vec![activity("a4", ActivityKind::StatusChange, "Lost: Pricing concerns", at(5, 12, 9, 0), "Jordan Smith")],
    );
    wilson.loss_reason = Some("Price too high".to_string());

    vec![
        lead(
            "1",
            "Sarah Jenkins",
            "sarah.j@example.com",
            "+1 555-0101",
            LeadStatus::New,
            LeadPriority::Urgent,
            "Alex Rivera",
            "Website Form",
            at(5, 15, 9, 0),
            at(5, 15, 9, 0),
            Some(at(5, 15, 11, 0)),
            2500,
            vec![activity("a1", ActivityKind::StatusChange, "Lead created via Website Form", at(5, 15, 9, 0), "System")],
        ),
        lead(
            "2",
            "Michael Chen",
            "m.chen@techcorp.io",
            "+1 555-0102",
            LeadStatus::InProgress,
            LeadPriority::High,
            "Jordan Smith",
            "LinkedIn",
            at(5, 14, 14, 30),
            at(5, 15, 10, 15),
            Some(at(5, 14, 16, 0)),
            5000,
            vec![activity("a2", ActivityKind::Note, "Customer interested in annual package.", at(5, 15, 10, 15), "Jordan Smith")],
        ),
        lead(
            "3",
            "Elena Rodriguez",
            "elena.r@designhub.com",
            "+1 555-0103",
            LeadStatus::Closed,
            LeadPriority::Medium,
            "Alex Rivera",
            "Referral",
            at(5, 10, 11, 0),
            at(5, 13, 15, 0),
            None,
            1200,
            vec![activity("a3", ActivityKind::StatusChange, "Closed deal - Paid in full", at(5, 13, 15, 0), "Alex Rivera")],
        ),
        wilson,
        lead(
            "5",
            "Samantha Blair",
            "sam@fashion.co",
            "+1 555-0105",
            LeadStatus::InProgress,
            LeadPriority::High,
            "Alex Rivera",
            "Instagram",
            at(5, 15, 8, 0),
            at(5, 15, 12, 0),
            Some(at(5, 16, 10, 0)),
            4500,
            vec![activity("a5", ActivityKind::Call, "Initial discovery call successful", at(5, 15, 12, 0), "Alex Rivera")],
        ),
    ]
}

pub(crate) fn tasks() -> Vec<Task> {
    vec![
        Task {
            id: "t1".to_string(),
            lead_id: Some("1".to_string()),
            lead_name: Some("Sarah Jenkins".to_string()),
            title: "Review proposal requirements".to_string(),
            description: "Sarah requested a detailed breakdown of service fees.".to_string(),
            assigned_to: "Alex Rivera".to_string(),
            due_date: at(5, 20, 17, 0),
            status: TaskStatus::Pending,
            priority: LeadPriority::Urgent,
        },
        Task {
            id: "t2".to_string(),
            lead_id: Some("2".to_string()),
            lead_name: Some("Michael Chen".to_string()),
            title: "Call to discuss pricing".to_string(),
            description: "Address concerns about the implementation timeline.".to_string(),
            assigned_to: "Jordan Smith".to_string(),
            due_date: at(5, 14, 10, 0),
            status: TaskStatus::Overdue,
            priority: LeadPriority::High,
        },
    ]
}
