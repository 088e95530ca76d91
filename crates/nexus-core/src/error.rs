//! Core error types for nexus-core.
//!
//! This module defines the error hierarchy using thiserror. The suggestion
//! engine is total and never fails; everything else that can go wrong
//! (unknown record ids, role-gated actions, configuration and text parsing)
//! is reported through these types.

use std::path::PathBuf;
use thiserror::Error;

use crate::session::{UserRole, View};

/// Core error type for nexus-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// In-memory store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Role-gating errors
    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by [`crate::store::LeadStore`] lookups and mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No lead with the given id
    #[error("Lead not found: {0}")]
    LeadNotFound(String),

    /// No task with the given id
    #[error("Task not found: {0}")]
    TaskNotFound(String),
}

/// Errors raised when the session role does not allow an operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// No role has been selected yet
    #[error("No role selected; log in first")]
    NotLoggedIn,

    /// The view is not offered to this role
    #[error("The {view} view is not available to the {role} role")]
    ViewForbidden { role: UserRole, view: View },

    /// The action is reserved for another role
    #[error("The {role} role may not {action}")]
    ActionForbidden { role: UserRole, action: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Config file exists but is not valid TOML for [`crate::Config`]
    #[error("Failed to parse configuration at {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
