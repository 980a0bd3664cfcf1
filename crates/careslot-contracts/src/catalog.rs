//! Static reference data: providers, locations, and appointment types.
//!
//! These records are loaded once and never change for the lifetime of a
//! session.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Identifier of a bookable clinician.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderId(pub String);

/// Identifier of a practice location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(pub String);

/// Identifier of an appointment type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppointmentTypeId(pub String);

macro_rules! string_id {
    ($($ty:ident),*) => {
        $(
            impl $ty {
                /// Construct an identifier from any string-like value.
                pub fn new(id: impl Into<String>) -> Self {
                    Self(id.into())
                }

                /// Borrow the raw identifier.
                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )*
    };
}

string_id!(ProviderId, LocationId, AppointmentTypeId);

/// A clinician or resource that can be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    /// Display name, e.g. "Dr. James Smith".
    pub name: String,
    pub specialty: String,
    /// Weekdays the provider sees patients, numbered from Sunday = 0.
    pub available_days: Vec<u8>,
    /// Name of the provider's home location, if any.
    pub location: Option<String>,
}

impl Provider {
    /// Return true if the provider works on `weekday`.
    pub fn works_on(&self, weekday: Weekday) -> bool {
        let day = weekday.num_days_from_sunday() as u8;
        self.available_days.contains(&day)
    }
}

/// A practice location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub address: String,
}

/// A kind of visit, with its nominal length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentType {
    pub id: AppointmentTypeId,
    pub name: String,
    pub duration_minutes: u32,
    pub description: String,
}
