//! The booking desk: action handlers for booking, cancelling, rescheduling
//! and calendar integration.
//!
//! Every action follows the same order:
//!
//!   Validate selections → Check availability → Write store → Audit → Notice
//!
//! Validation failures return `CareError::MissingInformation` before anything
//! else happens: no store write, no audit record. Availability is checked
//! against the current store contents, and the store re-checks the slot
//! under its own lock when it writes.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use careslot_contracts::{
    activity::{ActionKind, ActivityRecord, Actor},
    appointment::{Appointment, AppointmentId, AppointmentStatus, BookingRequest, NewAppointment},
    catalog::ProviderId,
    error::{CareError, CareResult},
    notice::Notice,
};

use crate::{
    availability,
    calendar::long_date,
    catalog::{AppointmentView, Catalog},
    traits::{AppointmentStore, AuditWriter},
    workflow::Workflow,
};

/// The outcome of a successful appointment action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// The appointment as stored after the action.
    pub appointment: Appointment,
    pub notice: Notice,
}

pub struct BookingDesk {
    catalog: Catalog,
    store: Box<dyn AppointmentStore>,
    audit: Box<dyn AuditWriter>,
    master_slots: Vec<String>,
}

impl BookingDesk {
    pub fn new(
        catalog: Catalog,
        store: Box<dyn AppointmentStore>,
        audit: Box<dyn AuditWriter>,
        master_slots: Vec<String>,
    ) -> Self {
        Self { catalog, store, audit, master_slots }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn master_slots(&self) -> &[String] {
        &self.master_slots
    }

    pub fn appointments(&self) -> CareResult<Vec<Appointment>> {
        self.store.list()
    }

    pub fn describe(&self, appointment: &Appointment) -> AppointmentView {
        self.catalog.describe(appointment)
    }

    /// Calendar predicate for the booking form. An unknown provider id is
    /// treated like no provider.
    pub fn is_date_disabled(
        &self,
        date: NaiveDate,
        provider: Option<&ProviderId>,
        today: NaiveDate,
    ) -> bool {
        let provider = provider.and_then(|id| self.catalog.provider(id));
        availability::is_date_disabled(date, provider, today)
    }

    /// Open slots for the booking form's current selection.
    pub fn available_time_slots(
        &self,
        date: Option<NaiveDate>,
        provider: Option<&ProviderId>,
    ) -> CareResult<Vec<String>> {
        let booked = self.store.list()?;
        Ok(availability::available_time_slots(date, provider, &self.master_slots, &booked))
    }

    fn existing(&self, id: &AppointmentId) -> CareResult<Appointment> {
        self.store
            .get(id)?
            .ok_or_else(|| CareError::AppointmentNotFound { id: id.to_string() })
    }

    /// An existing appointment that still holds its slot.
    fn active(&self, id: &AppointmentId) -> CareResult<Appointment> {
        let appointment = self.existing(id)?;
        if appointment.status == AppointmentStatus::Cancelled {
            warn!(appointment_id = %id, "appointment already cancelled");
            return Err(CareError::AppointmentCancelled { id: id.to_string() });
        }
        Ok(appointment)
    }

    fn check_slot(
        &self,
        provider: &ProviderId,
        date: NaiveDate,
        slot: &str,
        ignore: Option<&AppointmentId>,
    ) -> CareResult<()> {
        let booked: Vec<Appointment> = self
            .store
            .list()?
            .into_iter()
            .filter(|a| Some(&a.id) != ignore)
            .collect();
        let open = availability::available_time_slots(
            Some(date),
            Some(provider),
            &self.master_slots,
            &booked,
        );
        if open.iter().any(|s| s == slot) {
            Ok(())
        } else {
            warn!(provider = %provider, date = %date, slot = %slot, "slot not available");
            Err(CareError::SlotUnavailable {
                provider: provider.to_string(),
                date,
                slot: slot.to_string(),
            })
        }
    }

    fn check_date(
        &self,
        provider: &ProviderId,
        date: NaiveDate,
        today: NaiveDate,
    ) -> CareResult<()> {
        if self.is_date_disabled(date, Some(provider), today) {
            warn!(provider = %provider, date = %date, "date not selectable");
            return Err(CareError::DateUnavailable {
                provider: provider.to_string(),
                date,
            });
        }
        Ok(())
    }

    // ── Booking ──────────────────────────────────────────────────────────────

    /// Book a new appointment from a (possibly half-filled) form.
    ///
    /// # Errors
    ///
    /// - `MissingInformation` listing every absent selection, with no effect
    /// - `DateUnavailable` if the date is in the past or the provider is off
    /// - `SlotUnavailable` if the slot is taken or not on the master list
    pub fn book(
        &self,
        request: &BookingRequest,
        actor: &Actor,
        today: NaiveDate,
    ) -> CareResult<Confirmation> {
        let (Some(date), Some(provider_id), Some(location_id), Some(type_id), Some(slot)) = (
            request.date,
            request.provider_id.as_ref(),
            request.location_id.as_ref(),
            request.type_id.as_ref(),
            request.time_slot.as_deref(),
        ) else {
            let mut fields = Vec::new();
            if request.date.is_none() {
                fields.push("date");
            }
            if request.provider_id.is_none() {
                fields.push("provider");
            }
            if request.location_id.is_none() {
                fields.push("location");
            }
            if request.type_id.is_none() {
                fields.push("appointment type");
            }
            if request.time_slot.is_none() {
                fields.push("time slot");
            }
            debug!(actor = %actor.id, missing = ?fields, "booking request incomplete");
            return Err(CareError::missing(ActionKind::Book, fields));
        };

        self.check_date(provider_id, date, today)?;
        self.check_slot(provider_id, date, slot, None)?;

        let appointment = self.store.book(NewAppointment {
            patient_id: request.patient_id.clone(),
            patient_name: request.patient_name.clone(),
            provider_id: provider_id.clone(),
            location_id: location_id.clone(),
            date,
            time: slot.to_string(),
            type_id: type_id.clone(),
            notes: request.notes.clone(),
        })?;

        info!(
            appointment_id = %appointment.id,
            provider = %provider_id,
            date = %date,
            slot = %slot,
            "appointment booked"
        );

        let description = format!(
            "Your appointment with {} at {} on {} at {} has been scheduled. \
             {} reminder will be sent.",
            self.catalog.provider_name(provider_id),
            self.catalog.location_name(location_id),
            long_date(date),
            slot,
            request.reminder.label(),
        );
        let record = ActivityRecord::now(
            actor,
            ActionKind::Book,
            appointment.id.to_string(),
            format!("{} {} with {}", date, slot, provider_id),
        );
        if let Err(e) = self.audit.write(&record) {
            // An unaudited booking must not keep its slot.
            warn!(appointment_id = %appointment.id, error = %e, "audit failed, releasing booking");
            if let Err(undo) = self.store.cancel(&appointment.id) {
                warn!(appointment_id = %appointment.id, error = %undo, "could not release booking");
            }
            return Err(e);
        }

        Ok(Confirmation {
            appointment,
            notice: Notice::info("Appointment Scheduled", description),
        })
    }

    // ── Cancellation ─────────────────────────────────────────────────────────

    pub fn cancel(&self, id: &AppointmentId, actor: &Actor) -> CareResult<Confirmation> {
        self.active(id)?;
        let appointment = self.store.cancel(id)?;

        info!(appointment_id = %id, actor = %actor.id, "appointment cancelled");
        self.audit.write(&ActivityRecord::now(
            actor,
            ActionKind::Cancel,
            id.to_string(),
            format!("released {} {}", appointment.date, appointment.time),
        ))?;

        Ok(Confirmation {
            appointment,
            notice: Notice::info(
                "Appointment Cancelled",
                "Your appointment has been successfully cancelled.",
            ),
        })
    }

    // ── Rescheduling ─────────────────────────────────────────────────────────

    /// Move an appointment to a new date and slot with the same provider.
    ///
    /// The appointment's current slot counts as free, so rescheduling onto
    /// itself succeeds.
    pub fn reschedule(
        &self,
        id: &AppointmentId,
        new_date: Option<NaiveDate>,
        new_slot: Option<&str>,
        actor: &Actor,
        today: NaiveDate,
    ) -> CareResult<Confirmation> {
        let (Some(date), Some(slot)) = (new_date, new_slot) else {
            let mut fields = Vec::new();
            if new_date.is_none() {
                fields.push("date");
            }
            if new_slot.is_none() {
                fields.push("time slot");
            }
            debug!(appointment_id = %id, missing = ?fields, "reschedule request incomplete");
            return Err(CareError::missing(ActionKind::Reschedule, fields));
        };

        let current = self.active(id)?;
        self.check_date(&current.provider_id, date, today)?;
        self.check_slot(&current.provider_id, date, slot, Some(id))?;

        let appointment = self.store.reschedule(id, date, slot)?;

        info!(
            appointment_id = %id,
            from_date = %current.date,
            from_slot = %current.time,
            to_date = %date,
            to_slot = %slot,
            "appointment rescheduled"
        );
        self.audit.write(&ActivityRecord::now(
            actor,
            ActionKind::Reschedule,
            id.to_string(),
            format!("{} {} -> {} {}", current.date, current.time, date, slot),
        ))?;

        Ok(Confirmation {
            appointment,
            notice: Notice::info(
                "Appointment Rescheduled",
                format!(
                    "Your appointment has been rescheduled to {} at {}.",
                    long_date(date),
                    slot
                ),
            ),
        })
    }

    // ── Calendar integration ─────────────────────────────────────────────────

    pub fn connect_calendar(&self, actor: &Actor) -> CareResult<Notice> {
        info!(actor = %actor.id, "calendar connected");
        self.audit.write(&ActivityRecord::now(
            actor,
            ActionKind::ConnectCalendar,
            "calendar",
            "external calendar linked",
        ))?;
        Ok(Notice::info(
            "Calendar Integration",
            "Your calendar has been successfully connected. \
             Appointments will be synchronized automatically.",
        ))
    }

    // ── Dialog-driven variants ───────────────────────────────────────────────
    //
    // The `request_*` / `open_*` methods put a dialog into Confirming; the
    // `confirm_*` methods submit it, run the action, and settle the dialog
    // into Done or Failed (or back to Confirming on missing information).

    pub fn open_booking(
        &self,
        dialog: &mut Workflow,
        provider: Option<&ProviderId>,
    ) -> CareResult<()> {
        dialog.open(provider.map(|p| p.to_string()).unwrap_or_else(|| "new".to_string()))
    }

    pub fn confirm_booking(
        &self,
        dialog: &mut Workflow,
        request: &BookingRequest,
        actor: &Actor,
        today: NaiveDate,
    ) -> CareResult<Confirmation> {
        dialog.submit()?;
        let result = self.book(request, actor, today);
        settle(dialog, result, |c| c.notice.clone())
    }

    /// Open the cancel dialog for `id`, returning the appointment to show.
    pub fn request_cancel(
        &self,
        dialog: &mut Workflow,
        id: &AppointmentId,
    ) -> CareResult<AppointmentView> {
        let appointment = self.active(id)?;
        dialog.open(id.to_string())?;
        Ok(self.catalog.describe(&appointment))
    }

    pub fn confirm_cancel(&self, dialog: &mut Workflow, actor: &Actor) -> CareResult<Confirmation> {
        let target = AppointmentId::new(dialog.submit()?);
        let result = self.cancel(&target, actor);
        settle(dialog, result, |c| c.notice.clone())
    }

    /// Open the reschedule dialog for `id`, returning the appointment to show.
    pub fn request_reschedule(
        &self,
        dialog: &mut Workflow,
        id: &AppointmentId,
    ) -> CareResult<AppointmentView> {
        let appointment = self.active(id)?;
        dialog.open(id.to_string())?;
        Ok(self.catalog.describe(&appointment))
    }

    pub fn confirm_reschedule(
        &self,
        dialog: &mut Workflow,
        new_date: Option<NaiveDate>,
        new_slot: Option<&str>,
        actor: &Actor,
        today: NaiveDate,
    ) -> CareResult<Confirmation> {
        let target = AppointmentId::new(dialog.submit()?);
        let result = self.reschedule(&target, new_date, new_slot, actor, today);
        settle(dialog, result, |c| c.notice.clone())
    }

    pub fn confirm_calendar(&self, dialog: &mut Workflow, actor: &Actor) -> CareResult<Notice> {
        dialog.submit()?;
        let result = self.connect_calendar(actor);
        settle(dialog, result, Notice::clone)
    }
}

fn settle<T>(
    dialog: &mut Workflow,
    result: CareResult<T>,
    notice: impl FnOnce(&T) -> Notice,
) -> CareResult<T> {
    match result {
        Ok(value) => {
            dialog.complete(notice(&value))?;
            Ok(value)
        }
        Err(err) => {
            dialog.reject(&err)?;
            Err(err)
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
