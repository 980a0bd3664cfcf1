//! Lookup over the static reference data.
//!
//! Unknown ids never fail: they render as fallback labels so a stale
//! reference degrades to "Unknown provider" instead of an error.

use careslot_contracts::{
    appointment::Appointment,
    catalog::{AppointmentType, AppointmentTypeId, Location, LocationId, Provider, ProviderId},
};

/// Providers, locations, and appointment types for one practice.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub providers: Vec<Provider>,
    pub locations: Vec<Location>,
    pub appointment_types: Vec<AppointmentType>,
}

/// An appointment with every reference resolved to display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentView {
    pub id: String,
    pub date: String,
    pub time: String,
    pub patient_name: String,
    pub provider_name: String,
    pub location_name: String,
    pub location_address: String,
    pub type_name: String,
    pub type_description: String,
    pub status: String,
    pub notes: Option<String>,
}

impl Catalog {
    pub const UNKNOWN_PROVIDER: &'static str = "Unknown provider";
    pub const UNKNOWN_LOCATION: &'static str = "Unknown location";
    pub const UNKNOWN_TYPE: &'static str = "Unknown appointment type";

    pub fn provider(&self, id: &ProviderId) -> Option<&Provider> {
        self.providers.iter().find(|p| &p.id == id)
    }

    pub fn location(&self, id: &LocationId) -> Option<&Location> {
        self.locations.iter().find(|l| &l.id == id)
    }

    pub fn appointment_type(&self, id: &AppointmentTypeId) -> Option<&AppointmentType> {
        self.appointment_types.iter().find(|t| &t.id == id)
    }

    pub fn provider_name(&self, id: &ProviderId) -> &str {
        self.provider(id)
            .map(|p| p.name.as_str())
            .unwrap_or(Self::UNKNOWN_PROVIDER)
    }

    pub fn location_name(&self, id: &LocationId) -> &str {
        self.location(id)
            .map(|l| l.name.as_str())
            .unwrap_or(Self::UNKNOWN_LOCATION)
    }

    pub fn type_name(&self, id: &AppointmentTypeId) -> &str {
        self.appointment_type(id)
            .map(|t| t.name.as_str())
            .unwrap_or(Self::UNKNOWN_TYPE)
    }

    /// Resolve every reference on `appointment` for display.
    pub fn describe(&self, appointment: &Appointment) -> AppointmentView {
        let location = self.location(&appointment.location_id);
        let kind = self.appointment_type(&appointment.type_id);

        AppointmentView {
            id: appointment.id.0.clone(),
            date: appointment.date.format("%Y-%m-%d").to_string(),
            time: appointment.time.clone(),
            patient_name: appointment.patient_name.clone(),
            provider_name: self.provider_name(&appointment.provider_id).to_string(),
            location_name: location
                .map(|l| l.name.clone())
                .unwrap_or_else(|| Self::UNKNOWN_LOCATION.to_string()),
            location_address: location.map(|l| l.address.clone()).unwrap_or_default(),
            type_name: kind
                .map(|t| t.name.clone())
                .unwrap_or_else(|| Self::UNKNOWN_TYPE.to_string()),
            type_description: kind.map(|t| t.description.clone()).unwrap_or_default(),
            status: appointment.status.label().to_string(),
            notes: appointment.notes.clone(),
        }
    }
}
