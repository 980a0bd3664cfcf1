//! Booked appointments and booking requests.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{AppointmentTypeId, LocationId, ProviderId};

/// Identifier of a single appointment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppointmentId(pub String);

impl AppointmentId {
    /// Allocate a fresh, unique identifier for a new booking.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a patient (matches the patient user's id).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(pub String);

impl PatientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl AppointmentStatus {
    pub fn label(self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }
}

/// A booked appointment.
///
/// `date` serializes as `YYYY-MM-DD` and `time` is a slot label from the
/// clinic's master slot list (e.g. "09:00 AM").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_id: PatientId,
    pub patient_name: String,
    pub provider_id: ProviderId,
    pub location_id: LocationId,
    pub date: NaiveDate,
    pub time: String,
    pub type_id: AppointmentTypeId,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

impl Appointment {
    /// True while the appointment occupies its (provider, date, slot).
    ///
    /// Cancelled appointments release their slot.
    pub fn holds_slot(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }

    /// True if this appointment occupies `time` for `provider` on `date`.
    pub fn occupies(&self, provider: &ProviderId, date: NaiveDate, time: &str) -> bool {
        self.holds_slot() && &self.provider_id == provider && self.date == date && self.time == time
    }
}

/// How the patient wants to be reminded of an upcoming appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderChannel {
    #[default]
    Email,
    Sms,
}

impl ReminderChannel {
    pub fn label(self) -> &'static str {
        match self {
            ReminderChannel::Email => "Email",
            ReminderChannel::Sms => "SMS",
        }
    }
}

/// A prospective booking as collected from the booking form.
///
/// Every selection is optional because the form can be submitted half
/// filled; the booking desk rejects requests with missing selections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingRequest {
    pub date: Option<NaiveDate>,
    pub provider_id: Option<ProviderId>,
    pub location_id: Option<LocationId>,
    pub type_id: Option<AppointmentTypeId>,
    pub time_slot: Option<String>,
    pub patient_id: PatientId,
    pub patient_name: String,
    pub reminder: ReminderChannel,
    pub notes: Option<String>,
}

/// A fully validated booking, ready to be inserted into a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub patient_id: PatientId,
    pub patient_name: String,
    pub provider_id: ProviderId,
    pub location_id: LocationId,
    pub date: NaiveDate,
    pub time: String,
    pub type_id: AppointmentTypeId,
    pub notes: Option<String>,
}
