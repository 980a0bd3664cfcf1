//! Scenario 1: Front office books an appointment
//!
//! A front-office user logs in, picks Dr. James Smith at Main Hospital, and
//! books the first open slot on the next working day. Shows:
//!
//! - an incomplete form rejected before anything is written
//! - a weekend date rejected for a Monday-to-Wednesday provider
//! - the confirmation notice for a successful booking
//! - a second attempt at the same slot rejected as taken

use chrono::{NaiveDate, Utc};

use careslot_contracts::{
    appointment::{BookingRequest, PatientId, ReminderChannel},
    catalog::{AppointmentTypeId, LocationId, ProviderId},
    error::{CareError, CareResult},
};

use crate::{clinic::ReferenceClinic, config::ClinicConfig};

use super::print_trail_summary;

pub fn run_scenario(config: &ClinicConfig, today: NaiveDate) -> CareResult<()> {
    println!("=== Scenario 1: Booking an Appointment ===");
    println!();

    let mut clinic = ReferenceClinic::in_memory(config.clone())?;
    let landing = clinic.sessions.login("frontoffice@healthprovider.com", "demo", Utc::now())?;
    println!("  Logged in as:           Front Office Staff (landing {})", landing);

    let provider = ProviderId::new("1");
    let Some(date) = clinic.next_available_date(&provider, today, today) else {
        println!("  No open date for provider 1 within the booking horizon.");
        return Ok(());
    };
    let slots = clinic.desk.available_time_slots(Some(date), Some(&provider))?;
    let Some(slot) = slots.first().cloned() else {
        println!("  No open slot for provider 1 on {}.", date);
        return Ok(());
    };
    println!("  Next available date:    {} ({} open slot(s))", date, slots.len());

    let actor = clinic.actor();

    // ── Step 1: incomplete form ───────────────────────────────────────────────
    let partial = BookingRequest {
        provider_id: Some(provider.clone()),
        date: Some(date),
        ..Default::default()
    };
    match clinic.desk.book(&partial, &actor, today) {
        Err(e @ CareError::MissingInformation { .. }) => {
            println!("  Incomplete form:        REJECTED ({})", e);
        }
        other => println!("  Incomplete form:        unexpected {:?}", other.map(|c| c.notice)),
    }

    let request = BookingRequest {
        date: Some(date),
        provider_id: Some(provider.clone()),
        location_id: Some(LocationId::new("1")),
        type_id: Some(AppointmentTypeId::new("2")),
        time_slot: Some(slot.clone()),
        patient_id: PatientId::new("p2"),
        patient_name: "Jane Smith".to_string(),
        reminder: ReminderChannel::Sms,
        notes: Some("Follow-up on test results".to_string()),
    };

    // ── Step 2: weekend date ──────────────────────────────────────────────────
    let weekend = (0..7)
        .map(|offset| date + chrono::Duration::days(offset))
        .find(|d| clinic.desk.is_date_disabled(*d, Some(&provider), today));
    if let Some(weekend) = weekend {
        let off_day = BookingRequest { date: Some(weekend), ..request.clone() };
        match clinic.desk.book(&off_day, &actor, today) {
            Err(e) => println!("  Off-day {}:       REJECTED ({})", weekend, e.notice().title),
            Ok(_) => println!("  Off-day {}:       unexpectedly booked", weekend),
        }
    }

    // ── Step 3: successful booking ────────────────────────────────────────────
    let confirmation = clinic.desk.book(&request, &actor, today)?;
    println!("  Booking:                {}", confirmation.notice.title);
    println!("    {}", confirmation.notice.description);

    // ── Step 4: the same slot again ───────────────────────────────────────────
    match clinic.desk.book(&request, &actor, today) {
        Err(e @ CareError::SlotUnavailable { .. }) => {
            println!("  Second booking:         REJECTED ({})", e.notice().title);
        }
        other => println!("  Second booking:         unexpected {:?}", other.map(|c| c.notice)),
    }

    let remaining = clinic.desk.available_time_slots(Some(date), Some(&provider))?;
    println!("  Open slots on {}: {} (was {})", date, remaining.len(), slots.len());

    clinic.sessions.logout()?;
    print_trail_summary(&clinic)?;
    println!();
    println!("  Scenario 1 complete.");
    println!();
    Ok(())
}
