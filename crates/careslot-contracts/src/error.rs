//! Error types for the CARESLOT runtime.
//!
//! All fallible operations return `CareResult<T>`. Nothing here is fatal to
//! the application: every variant degrades to a destructive `Notice` via
//! [`CareError::notice`].

use chrono::NaiveDate;
use thiserror::Error;

use crate::{activity::ActionKind, notice::Notice};

/// The unified error type for CARESLOT.
#[derive(Debug, Error)]
pub enum CareError {
    /// One or more required selections were absent. No state changed.
    #[error("missing information for {action}: {}", .fields.join(", "))]
    MissingInformation {
        action: ActionKind,
        fields: Vec<&'static str>,
    },

    /// No user matches the supplied email.
    #[error("invalid credentials for '{email}'")]
    InvalidCredentials { email: String },

    /// The date is in the past or outside the provider's working days.
    #[error("provider '{provider}' is not available on {date}")]
    DateUnavailable { provider: String, date: NaiveDate },

    /// The slot is not in the master list or is already taken.
    #[error("slot '{slot}' on {date} is not available for provider '{provider}'")]
    SlotUnavailable {
        provider: String,
        date: NaiveDate,
        slot: String,
    },

    #[error("appointment '{id}' not found")]
    AppointmentNotFound { id: String },

    /// The appointment was cancelled and can no longer be changed.
    #[error("appointment '{id}' is already cancelled")]
    AppointmentCancelled { id: String },

    /// A dialog workflow received an event its current state does not accept.
    #[error("{workflow} workflow cannot handle '{event}' while {from}")]
    InvalidTransition {
        workflow: ActionKind,
        from: String,
        event: String,
    },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The appointment store could not be read or written.
    #[error("appointment store failed: {reason}")]
    StoreFailed { reason: String },

    /// The session record could not be read, written, or cleared.
    #[error("session store failed: {reason}")]
    SessionStoreFailed { reason: String },

    /// The activity trail could not record an action.
    #[error("audit write failed: {reason}")]
    AuditWriteFailed { reason: String },
}

impl CareError {
    /// Shorthand for a missing-information error.
    pub fn missing(action: ActionKind, fields: Vec<&'static str>) -> Self {
        CareError::MissingInformation { action, fields }
    }

    /// Render this error as the notification the user sees.
    pub fn notice(&self) -> Notice {
        match self {
            CareError::MissingInformation { action, .. } => {
                let description = match action {
                    ActionKind::Book => {
                        "Please fill out all required fields to book an appointment."
                    }
                    ActionKind::Reschedule => {
                        "Please select a new date and time for your appointment."
                    }
                    ActionKind::Login => "Please enter your email and password.",
                    _ => "Please fill out all required fields.",
                };
                Notice::destructive("Missing Information", description)
            }
            CareError::InvalidCredentials { .. } => {
                Notice::destructive("Login Failed", "Invalid credentials")
            }
            CareError::DateUnavailable { date, .. } => Notice::destructive(
                "Date Unavailable",
                format!(
                    "The selected provider is not available on {date}. Please choose another date."
                ),
            ),
            CareError::SlotUnavailable { date, slot, .. } => Notice::destructive(
                "Time Slot Unavailable",
                format!(
                    "The {slot} slot on {date} is no longer available. Please choose another time."
                ),
            ),
            CareError::AppointmentNotFound { .. } => Notice::destructive(
                "Appointment Not Found",
                "The selected appointment no longer exists.",
            ),
            CareError::AppointmentCancelled { .. } => Notice::destructive(
                "Appointment Already Cancelled",
                "This appointment has been cancelled and can no longer be changed.",
            ),
            other => Notice::destructive("Something Went Wrong", other.to_string()),
        }
    }
}

/// Convenience alias used throughout the CARESLOT crates.
pub type CareResult<T> = Result<T, CareError>;
