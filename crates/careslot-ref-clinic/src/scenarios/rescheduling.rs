//! Scenario 3: Patient reschedules and cancels through dialogs
//!
//! The demo patient opens the reschedule dialog for their booked
//! appointment, submits it without a slot (the dialog stays open), then
//! completes it. Finally they cancel through the two-step cancel dialog and
//! the original slot becomes bookable again.

use chrono::{NaiveDate, Utc};

use careslot_contracts::{
    appointment::AppointmentId,
    error::CareResult,
};
use careslot_core::{calendar, AppointmentDialogs};

use crate::{clinic::ReferenceClinic, config::ClinicConfig};

use super::print_trail_summary;

pub fn run_scenario(config: &ClinicConfig, today: NaiveDate) -> CareResult<()> {
    println!("=== Scenario 3: Rescheduling and Cancelling ===");
    println!();

    let mut clinic = ReferenceClinic::in_memory(config.clone())?;
    clinic.sessions.login("patient@example.com", "demo", Utc::now())?;
    let actor = clinic.actor();

    let mine = clinic.visible_appointments()?;
    println!("  Patient sees:           {} appointment(s)", mine.len());
    let Some(appointment) = mine.first().cloned() else {
        println!("  Nothing to reschedule.");
        return Ok(());
    };
    let id: AppointmentId = appointment.id.clone();
    let mut dialogs = AppointmentDialogs::new();

    // ── Reschedule ────────────────────────────────────────────────────────────
    let view = clinic.desk.request_reschedule(&mut dialogs.reschedule, &id)?;
    println!(
        "  Reschedule dialog:      {} with {} on {} at {}",
        view.type_name, view.provider_name, view.date, view.time
    );

    let Some(new_date) = clinic.next_available_date(&appointment.provider_id, today, today) else {
        println!("  No open date within the booking horizon.");
        return Ok(());
    };

    if let Err(e) = clinic
        .desk
        .confirm_reschedule(&mut dialogs.reschedule, Some(new_date), None, &actor, today)
    {
        println!(
            "  Submit without slot:    {} (dialog {})",
            e.notice().title,
            dialogs.reschedule.state().name()
        );
    }

    let slots = clinic
        .desk
        .available_time_slots(Some(new_date), Some(&appointment.provider_id))?;
    let Some(slot) = slots.last().cloned() else {
        println!("  No open slot on {}.", new_date);
        return Ok(());
    };
    let moved = clinic
        .desk
        .confirm_reschedule(&mut dialogs.reschedule, Some(new_date), Some(&slot), &actor, today)?;
    println!("  Rescheduled:            {}", moved.notice.description);
    let header = calendar::date_range_text(new_date, calendar::CalendarView::Week);
    println!("  Calendar header:        {}", header);

    // ── Cancel ────────────────────────────────────────────────────────────────
    clinic.desk.request_cancel(&mut dialogs.cancel, &id)?;
    let cancelled = clinic.desk.confirm_cancel(&mut dialogs.cancel, &actor)?;
    println!("  Cancelled:              {}", cancelled.notice.description);

    let reopened = clinic
        .desk
        .available_time_slots(Some(new_date), Some(&appointment.provider_id))?
        .contains(&slot);
    println!("  {} {} free again:      {}", new_date, slot, if reopened { "YES" } else { "NO" });

    clinic.sessions.logout()?;
    print_trail_summary(&clinic)?;
    println!();
    println!("  Scenario 3 complete.");
    println!();
    Ok(())
}
