//! # Nexus CRM Core Library
//!
//! This library provides the business logic behind the Nexus CRM lead and
//! task dashboard. All state lives in memory; the CLI binary is a thin
//! presentation layer over the same core.
//!
//! ## Architecture
//!
//! - **Suggestion Engine**: a pure function from a lead's status and
//!   priority to an ordered list of recommended next actions
//! - **Store**: in-memory leads and tasks with create/complete operations
//!   that fill in defaults for unset fields
//! - **Session**: role selection and role-gated views and visibility
//! - **Stats**: dashboard counters over the visible pipeline
//! - **Config**: TOML-based identity and dashboard preferences
//!
//! ## Key Components
//!
//! - [`approach_suggestions`]: the suggestion engine
//! - [`CrmApp`]: session and store together, as a front end drives them
//! - [`LeadStore`]: lead and task collections
//! - [`Session`]: who is logged in and what they may see
//! - [`Config`]: application configuration

pub mod app;
pub mod config;
pub mod error;
pub mod lead;
mod sample;
pub mod session;
pub mod stats;
pub mod store;
pub mod suggestion;
pub mod task;

pub use app::{CrmApp, DashboardSummary};
pub use config::Config;
pub use error::{AccessError, ConfigError, CoreError, StoreError, ValidationError};
pub use lead::{Activity, ActivityKind, Lead, LeadDraft, LeadPriority, LeadStatus};
pub use session::{Session, UserRole, View};
pub use stats::{status_breakdown, task_preview, DashboardStats, StatusCount};
pub use store::{LeadFilter, LeadStore, StoreDefaults};
pub use suggestion::{approach_suggestions, LeadAnalysis, Suggestion, SuggestionCategory};
pub use task::{Task, TaskDraft, TaskStatus, TaskTransitionError};
