//! Access-control roles.
//!
//! A closed set: every redirect, tab, and feature decision in CARESLOT is a
//! function of one of these values. Earlier deployments only knew `admin` and
//! `doctor`; `doctor` is still accepted on input and maps to `ClinicalStaff`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The access-control classification of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Admin,
    FrontOffice,
    BackOffice,
    #[serde(alias = "doctor")]
    ClinicalStaff,
    Patient,
}

impl Role {
    /// Every role, in display order.
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::FrontOffice,
        Role::BackOffice,
        Role::ClinicalStaff,
        Role::Patient,
    ];

    /// The wire name used in policy files and serialized sessions.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::FrontOffice => "frontOffice",
            Role::BackOffice => "backOffice",
            Role::ClinicalStaff => "clinicalStaff",
            Role::Patient => "patient",
        }
    }

    /// Human-readable label for menus and headers.
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::FrontOffice => "Front Office",
            Role::BackOffice => "Back Office",
            Role::ClinicalStaff => "Doctor",
            Role::Patient => "Patient",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
