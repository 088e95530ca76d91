//! Rule-based approach suggestions.
//!
//! Maps a lead's status and priority to an ordered list of recommended next
//! actions. The rules are independent guards evaluated in a fixed order and
//! their outputs are concatenated, so one lead can collect advice from
//! several categories (a new urgent lead gets both welcome and escalation
//! steps). Output order is display order.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::lead::{Lead, LeadPriority, LeadStatus};

/// Intent of a suggestion. Each rule produces exactly one category.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    /// Act now on a fresh lead
    Immediate,
    /// Keep an active conversation warm
    Nurture,
    /// Bring in more senior attention
    Escalation,
    /// Win back a lost lead
    Retention,
}

impl fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SuggestionCategory::Immediate => "immediate",
            SuggestionCategory::Nurture => "nurture",
            SuggestionCategory::Escalation => "escalation",
            SuggestionCategory::Retention => "retention",
        })
    }
}

/// A recommended next action for engaging a lead.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Suggestion {
    pub title: &'static str,
    pub description: &'static str,
    pub category: SuggestionCategory,
}

const WELCOME: [Suggestion; 2] = [
    Suggestion {
        title: "Immediate Welcome",
        description: "Send an automated welcome message with a link to your portfolio or services list.",
        category: SuggestionCategory::Immediate,
    },
    Suggestion {
        title: "Quick Intro Call",
        description: "Schedule a 5-minute introduction call to qualify their needs immediately.",
        category: SuggestionCategory::Immediate,
    },
];

const NURTURE: [Suggestion; 2] = [
    Suggestion {
        title: "Share Product Demo",
        description: "Provide a personalized video demo or case study relevant to their industry.",
        category: SuggestionCategory::Nurture,
    },
    Suggestion {
        title: "Schedule Follow-up",
        description: "The last activity was a while ago. A gentle nudge via WhatsApp or email is recommended.",
        category: SuggestionCategory::Nurture,
    },
];

const ESCALATION: [Suggestion; 2] = [
    Suggestion {
        title: "Owner Involvement",
        description: "Escalate to the business owner for a \"Specialist\" touch to increase trust.",
        category: SuggestionCategory::Escalation,
    },
    Suggestion {
        title: "Priority Support",
        description: "Offer a direct line for any immediate questions to bypass standard queues.",
        category: SuggestionCategory::Escalation,
    },
];

const RETENTION: [Suggestion; 2] = [
    Suggestion {
        title: "Limited-Time Deal",
        description: "Offer a 10% discount if they re-consider within the next 48 hours.",
        category: SuggestionCategory::Retention,
    },
    Suggestion {
        title: "Feedback Request",
        description: "Ask for specific reasons for dropping to improve future sales processes.",
        category: SuggestionCategory::Retention,
    },
];

/// Recommended next actions for a lead with the given status and priority.
///
/// Rules, concatenated in this order:
/// 1. New: welcome steps (immediate)
/// 2. In Progress: nurture steps
/// 3. High or Urgent priority: escalation steps
/// 4. Lost: retention steps
///
/// Closed leads below High priority get nothing.
pub fn approach_suggestions(status: LeadStatus, priority: LeadPriority) -> Vec<Suggestion> {
    let mut suggestions = Vec::with_capacity(4);

    if status == LeadStatus::New {
        suggestions.extend(WELCOME);
    }
    if status == LeadStatus::InProgress {
        suggestions.extend(NURTURE);
    }
    if priority.is_escalated() {
        suggestions.extend(ESCALATION);
    }
    if status == LeadStatus::Lost {
        suggestions.extend(RETENTION);
    }

    suggestions
}

/// What the lead detail panel shows: the lead, the accountability alert
/// and the suggestions.
#[derive(Debug, Clone, Serialize)]
pub struct LeadAnalysis<'a> {
    pub lead: &'a Lead,
    pub overdue: bool,
    pub suggestions: Vec<Suggestion>,
}

impl<'a> LeadAnalysis<'a> {
    pub fn of(lead: &'a Lead, now: DateTime<Utc>) -> Self {
        LeadAnalysis {
            lead,
            overdue: lead.is_overdue(now),
            suggestions: lead.suggestions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn titles(status: LeadStatus, priority: LeadPriority) -> Vec<&'static str> {
        approach_suggestions(status, priority)
            .iter()
            .map(|s| s.title)
            .collect()
    }

    #[test]
    fn new_low_gets_welcome_only() {
        assert_eq!(
            titles(LeadStatus::New, LeadPriority::Low),
            vec!["Immediate Welcome", "Quick Intro Call"]
        );
    }

    #[test]
    fn in_progress_high_nurtures_then_escalates() {
        assert_eq!(
            titles(LeadStatus::InProgress, LeadPriority::High),
            vec![
                "Share Product Demo",
                "Schedule Follow-up",
                "Owner Involvement",
                "Priority Support"
            ]
        );
    }

    #[test]
    fn closed_medium_gets_nothing() {
        assert!(approach_suggestions(LeadStatus::Closed, LeadPriority::Medium).is_empty());
        assert!(approach_suggestions(LeadStatus::Closed, LeadPriority::Low).is_empty());
    }

    #[test]
    fn lost_urgent_escalates_before_retention() {
        assert_eq!(
            titles(LeadStatus::Lost, LeadPriority::Urgent),
            vec![
                "Owner Involvement",
                "Priority Support",
                "Limited-Time Deal",
                "Feedback Request"
            ]
        );
    }

    #[test]
    fn new_urgent_mixes_immediate_and_escalation() {
        let categories: Vec<_> = approach_suggestions(LeadStatus::New, LeadPriority::Urgent)
            .iter()
            .map(|s| s.category)
            .collect();
        assert_eq!(
            categories,
            vec![
                SuggestionCategory::Immediate,
                SuggestionCategory::Immediate,
                SuggestionCategory::Escalation,
                SuggestionCategory::Escalation,
            ]
        );
    }

    #[test]
    fn closed_high_only_escalates() {
        assert_eq!(
            titles(LeadStatus::Closed, LeadPriority::High),
            vec!["Owner Involvement", "Priority Support"]
        );
    }

    #[test]
    fn analysis_of_sample_lead() {
        use crate::store::{LeadStore, StoreDefaults};
        use chrono::TimeZone;

        let store = LeadStore::with_sample_data(StoreDefaults::default());
        let now = Utc.with_ymd_and_hms(2024, 5, 16, 12, 0, 0).unwrap();
        let analysis = LeadAnalysis::of(store.lead("1").unwrap(), now);
        assert!(analysis.overdue);
        assert_eq!(analysis.suggestions.len(), 4);

        let closed = LeadAnalysis::of(store.lead("3").unwrap(), now);
        assert!(!closed.overdue);
        assert!(closed.suggestions.is_empty());
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_value(WELCOME[0]).unwrap();
        assert_eq!(json["category"], "immediate");
        assert_eq!(json["title"], "Immediate Welcome");
    }

    fn any_status() -> impl Strategy<Value = LeadStatus> {
        prop::sample::select(LeadStatus::ALL.to_vec())
    }

    fn any_priority() -> impl Strategy<Value = LeadPriority> {
        prop::sample::select(LeadPriority::ALL.to_vec())
    }

    fn expected_category(title: &str) -> SuggestionCategory {
        match title {
            "Immediate Welcome" | "Quick Intro Call" => SuggestionCategory::Immediate,
            "Share Product Demo" | "Schedule Follow-up" => SuggestionCategory::Nurture,
            "Owner Involvement" | "Priority Support" => SuggestionCategory::Escalation,
            "Limited-Time Deal" | "Feedback Request" => SuggestionCategory::Retention,
            other => panic!("unexpected suggestion {other}"),
        }
    }

    proptest! {
        #[test]
        fn repeated_calls_are_identical(status in any_status(), priority in any_priority()) {
            prop_assert_eq!(
                approach_suggestions(status, priority),
                approach_suggestions(status, priority)
            );
        }

        #[test]
        fn category_is_fixed_by_rule(status in any_status(), priority in any_priority()) {
            for s in approach_suggestions(status, priority) {
                prop_assert_eq!(s.category, expected_category(s.title));
            }
        }

        #[test]
        fn output_size_counts_matching_rules(status in any_status(), priority in any_priority()) {
            let matched = [
                status == LeadStatus::New,
                status == LeadStatus::InProgress,
                priority.is_escalated(),
                status == LeadStatus::Lost,
            ]
            .iter()
            .filter(|m| **m)
            .count();
            prop_assert_eq!(approach_suggestions(status, priority).len(), matched * 2);
        }
    }
}
