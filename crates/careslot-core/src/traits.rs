//! Core trait definitions for CARESLOT.
//!
//! These four traits are the seams between the scheduling logic and the
//! outside world:
//!
//! - `AppointmentStore`: where booked appointments live
//! - `SessionStore`: where the logged-in user is remembered
//! - `AccessPolicy`: which roles may open which routes
//! - `AuditWriter`: the append-only activity trail
//!
//! The reference clinic backs them with in-memory implementations. A real
//! deployment would back `AppointmentStore` with a database.

use std::sync::Arc;

use chrono::NaiveDate;

use careslot_contracts::{
    access::{AccessRequest, RouteDecision},
    activity::ActivityRecord,
    appointment::{Appointment, AppointmentId, NewAppointment},
    error::CareResult,
    session::Session,
};

/// Storage for booked appointments.
///
/// Implementations must guarantee at most one slot-holding appointment per
/// (provider, date, slot): `book` and `reschedule` check and write under the
/// same critical section and fail with `CareError::SlotUnavailable` on
/// conflict.
pub trait AppointmentStore: Send + Sync {
    /// Every appointment, in insertion order.
    fn list(&self) -> CareResult<Vec<Appointment>>;

    fn get(&self, id: &AppointmentId) -> CareResult<Option<Appointment>>;

    /// Insert a confirmed appointment built from `draft`.
    fn book(&self, draft: NewAppointment) -> CareResult<Appointment>;

    /// Mark the appointment cancelled, releasing its slot.
    ///
    /// A cancelled appointment is final: cancelling it again fails with
    /// `AppointmentCancelled`.
    fn cancel(&self, id: &AppointmentId) -> CareResult<Appointment>;

    /// Move the appointment to `date` at `time`. Fails with
    /// `AppointmentCancelled` for a cancelled appointment.
    fn reschedule(
        &self,
        id: &AppointmentId,
        date: NaiveDate,
        time: &str,
    ) -> CareResult<Appointment>;
}

/// Storage for the single serialized session record.
pub trait SessionStore: Send + Sync {
    /// Read the stored session, if any.
    fn load(&self) -> CareResult<Option<Session>>;

    /// Replace the stored session.
    fn save(&self, session: &Session) -> CareResult<()>;

    /// Remove the stored session. Clearing an empty store succeeds.
    fn clear(&self) -> CareResult<()>;
}

/// Route guard: decides what happens when a user navigates to a path.
///
/// Implementations must be deterministic and free of I/O.
pub trait AccessPolicy: Send + Sync {
    fn decide(&self, request: &AccessRequest) -> CareResult<RouteDecision>;
}

/// The activity trail.
///
/// Every completed action is appended here. A failed write is reported to
/// the caller, but the action itself has already happened.
pub trait AuditWriter: Send + Sync {
    /// Append one record. Records are never modified or deleted.
    fn write(&self, record: &ActivityRecord) -> CareResult<()>;

    /// Seal the trail for a session. Called on logout.
    fn finalize(&self, session_id: &str) -> CareResult<()>;
}

impl<T: AppointmentStore + ?Sized> AppointmentStore for Arc<T> {
    fn list(&self) -> CareResult<Vec<Appointment>> {
        (**self).list()
    }

    fn get(&self, id: &AppointmentId) -> CareResult<Option<Appointment>> {
        (**self).get(id)
    }

    fn book(&self, draft: NewAppointment) -> CareResult<Appointment> {
        (**self).book(draft)
    }

    fn cancel(&self, id: &AppointmentId) -> CareResult<Appointment> {
        (**self).cancel(id)
    }

    fn reschedule(
        &self,
        id: &AppointmentId,
        date: NaiveDate,
        time: &str,
    ) -> CareResult<Appointment> {
        (**self).reschedule(id, date, time)
    }
}

impl<T: AuditWriter + ?Sized> AuditWriter for Arc<T> {
    fn write(&self, record: &ActivityRecord) -> CareResult<()> {
        (**self).write(record)
    }

    fn finalize(&self, session_id: &str) -> CareResult<()> {
        (**self).finalize(session_id)
    }
}
