//! Simulated practice data for the reference clinic.
//!
//! All data in this module is hardcoded and fictional. It stands in for the
//! practice-management database a production deployment would query.

use chrono::NaiveDate;

use careslot_contracts::{
    appointment::{Appointment, AppointmentId, AppointmentStatus, PatientId},
    catalog::{AppointmentType, AppointmentTypeId, Location, LocationId, Provider, ProviderId},
    role::Role,
    session::{User, UserId},
};
use careslot_core::Catalog;

// ── Providers ─────────────────────────────────────────────────────────────────

/// (id, name, specialty, home location, weekdays from Sunday = 0)
const PROVIDERS: [(&str, &str, &str, &str, &[u8]); 8] = [
    ("1", "Dr. James Smith", "Cardiology", "Main Hospital", &[1, 2, 3]),
    ("2", "Dr. Emily Brown", "Neurology", "North Clinic", &[2, 3, 4]),
    ("3", "Dr. Maria Rodriguez", "Family Medicine", "South Clinic", &[0, 4, 5]),
    ("4", "Dr. Robert Johnson", "Dermatology", "West Medical Center", &[1, 3, 5]),
    ("5", "Dr. Sarah Wilson", "Pediatrics", "Children's Hospital", &[0, 1, 4]),
    ("6", "Dr. Michael Chen", "Orthopedics", "Sports Medicine Center", &[2, 3, 5]),
    ("7", "Dr. Olivia Taylor", "Obstetrics & Gynecology", "Women's Health Center", &[1, 2, 4]),
    ("8", "Dr. David Garcia", "Psychiatry", "Mental Health Clinic", &[0, 3, 5]),
];

pub fn providers() -> Vec<Provider> {
    PROVIDERS
        .iter()
        .map(|(id, name, specialty, location, days)| Provider {
            id: ProviderId::new(*id),
            name: name.to_string(),
            specialty: specialty.to_string(),
            available_days: days.to_vec(),
            location: Some(location.to_string()),
        })
        .collect()
}

// ── Locations ─────────────────────────────────────────────────────────────────

const LOCATIONS: [(&str, &str, &str); 8] = [
    ("1", "Main Hospital", "123 Main Street, Cityville"),
    ("2", "North Clinic", "456 North Avenue, Townsville"),
    ("3", "South Clinic", "789 South Boulevard, Villageton"),
    ("4", "West Medical Center", "321 West Road, Boroughford"),
    ("5", "Children's Hospital", "555 Pediatric Lane, Kidstown"),
    ("6", "Sports Medicine Center", "777 Athletic Drive, Sportsville"),
    ("7", "Women's Health Center", "888 Wellness Way, Careville"),
    ("8", "Mental Health Clinic", "999 Mindful Street, Peacetown"),
];

pub fn locations() -> Vec<Location> {
    LOCATIONS
        .iter()
        .map(|(id, name, address)| Location {
            id: LocationId::new(*id),
            name: name.to_string(),
            address: address.to_string(),
        })
        .collect()
}

// ── Appointment types ─────────────────────────────────────────────────────────

const APPOINTMENT_TYPES: [(&str, &str, u32, &str); 10] = [
    ("1", "New Patient Consultation", 60, "Initial consultation for new patients"),
    ("2", "Follow-up Visit", 30, "Regular follow-up appointment"),
    ("3", "Annual Exam", 45, "Yearly comprehensive examination"),
    ("4", "Urgent Care", 30, "Immediate care for non-emergency issues"),
    ("5", "Specialist Consultation", 60, "Consultation with a specialist"),
    ("6", "Vaccination", 15, "Quick appointment for vaccinations"),
    ("7", "Physical Therapy", 45, "Rehabilitation and physical therapy session"),
    ("8", "Telehealth Consultation", 30, "Virtual appointment via video call"),
    ("9", "Mental Health Session", 50, "Counseling or therapy session"),
    ("10", "Prenatal Check-up", 40, "Regular monitoring for expectant mothers"),
];

pub fn appointment_types() -> Vec<AppointmentType> {
    APPOINTMENT_TYPES
        .iter()
        .map(|(id, name, duration, description)| AppointmentType {
            id: AppointmentTypeId::new(*id),
            name: name.to_string(),
            duration_minutes: *duration,
            description: description.to_string(),
        })
        .collect()
}

pub fn catalog() -> Catalog {
    Catalog {
        providers: providers(),
        locations: locations(),
        appointment_types: appointment_types(),
    }
}

// ── Slots ─────────────────────────────────────────────────────────────────────

/// The clinic's bookable slot labels, in display order.
pub fn time_slots() -> Vec<String> {
    [
        "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
        "01:00 PM", "01:30 PM", "02:00 PM", "02:30 PM", "03:00 PM", "03:30 PM",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// ── Booked appointments ───────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn booked(
    id: &str,
    patient_id: &str,
    patient_name: &str,
    provider_id: &str,
    location_id: &str,
    date: NaiveDate,
    time: &str,
    type_id: &str,
    notes: &str,
) -> Appointment {
    Appointment {
        id: AppointmentId::new(id),
        patient_id: PatientId::new(patient_id),
        patient_name: patient_name.to_string(),
        provider_id: ProviderId::new(provider_id),
        location_id: LocationId::new(location_id),
        date,
        time: time.to_string(),
        type_id: AppointmentTypeId::new(type_id),
        status: AppointmentStatus::Confirmed,
        notes: Some(notes.to_string()),
    }
}

pub fn booked_appointments() -> Vec<Appointment> {
    let mut rows = Vec::new();
    if let Some(date) = NaiveDate::from_ymd_opt(2025, 5, 21) {
        rows.push(booked(
            "1", "p1", "John Doe", "1", "1", date, "09:00 AM", "1",
            "First visit for heart palpitations",
        ));
    }
    if let Some(date) = NaiveDate::from_ymd_opt(2025, 5, 22) {
        rows.push(booked(
            "2", "p2", "Jane Smith", "2", "2", date, "10:30 AM", "3",
            "Annual check-up",
        ));
    }
    rows
}

// ── User directory ────────────────────────────────────────────────────────────

fn user(id: &str, name: &str, email: &str, role: Role) -> User {
    User {
        id: UserId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        role,
        facility_id: None,
        specialization: None,
        provider_id: None,
    }
}

/// Accounts that can log in to the reference clinic.
pub fn users() -> Vec<User> {
    vec![
        user("1", "Admin User", "admin@healthprovider.com", Role::Admin),
        user("2", "Front Office Staff", "frontoffice@healthprovider.com", Role::FrontOffice),
        user("3", "Back Office Staff", "backoffice@healthprovider.com", Role::BackOffice),
        User {
            facility_id: Some("facility-001".to_string()),
            specialization: Some("Cardiology".to_string()),
            provider_id: Some(ProviderId::new("1")),
            ..user("4", "Dr. Smith", "doctor@healthprovider.com", Role::ClinicalStaff)
        },
        user("p1", "John Doe", "patient@example.com", Role::Patient),
    ]
}

/// Case-insensitive lookup in the user directory.
pub fn find_user(email: &str) -> Option<User> {
    users().into_iter().find(|u| u.email.eq_ignore_ascii_case(email.trim()))
}
