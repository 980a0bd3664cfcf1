//! In-memory appointment store.
//!
//! One `Mutex` guards the whole table. `book` and `reschedule` check for a
//! conflicting appointment and write under the same guard, so two callers
//! racing for one slot cannot both succeed.

use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use tracing::{debug, warn};

use careslot_contracts::{
    appointment::{Appointment, AppointmentId, AppointmentStatus, NewAppointment},
    catalog::ProviderId,
    error::{CareError, CareResult},
};
use careslot_core::traits::AppointmentStore;

use crate::mock_data;

pub struct InMemoryAppointmentStore {
    rows: Mutex<Vec<Appointment>>,
}

impl InMemoryAppointmentStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// A store holding the clinic's booked appointments.
    pub fn seeded() -> Self {
        Self::with_rows(mock_data::booked_appointments())
    }

    pub fn with_rows(rows: Vec<Appointment>) -> Self {
        Self { rows: Mutex::new(rows) }
    }

    fn lock(&self) -> CareResult<MutexGuard<'_, Vec<Appointment>>> {
        self.rows.lock().map_err(|e| CareError::StoreFailed {
            reason: format!("appointment store lock poisoned: {}", e),
        })
    }
}

impl Default for InMemoryAppointmentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn conflict(
    rows: &[Appointment],
    provider: &ProviderId,
    date: NaiveDate,
    time: &str,
    ignore: Option<&AppointmentId>,
) -> CareResult<()> {
    let taken = rows
        .iter()
        .filter(|a| Some(&a.id) != ignore)
        .any(|a| a.occupies(provider, date, time));
    if taken {
        warn!(provider = %provider, date = %date, slot = %time, "slot already held");
        return Err(CareError::SlotUnavailable {
            provider: provider.to_string(),
            date,
            slot: time.to_string(),
        });
    }
    Ok(())
}

fn not_found(id: &AppointmentId) -> CareError {
    CareError::AppointmentNotFound { id: id.to_string() }
}

fn already_cancelled(id: &AppointmentId) -> CareError {
    CareError::AppointmentCancelled { id: id.to_string() }
}

impl AppointmentStore for InMemoryAppointmentStore {
    fn list(&self) -> CareResult<Vec<Appointment>> {
        Ok(self.lock()?.clone())
    }

    fn get(&self, id: &AppointmentId) -> CareResult<Option<Appointment>> {
        Ok(self.lock()?.iter().find(|a| &a.id == id).cloned())
    }

    fn book(&self, draft: NewAppointment) -> CareResult<Appointment> {
        let mut rows = self.lock()?;
        conflict(&rows, &draft.provider_id, draft.date, &draft.time, None)?;

        let appointment = Appointment {
            id: AppointmentId::generate(),
            patient_id: draft.patient_id,
            patient_name: draft.patient_name,
            provider_id: draft.provider_id,
            location_id: draft.location_id,
            date: draft.date,
            time: draft.time,
            type_id: draft.type_id,
            status: AppointmentStatus::Confirmed,
            notes: draft.notes,
        };
        debug!(appointment_id = %appointment.id, "appointment stored");
        rows.push(appointment.clone());
        Ok(appointment)
    }

    fn cancel(&self, id: &AppointmentId) -> CareResult<Appointment> {
        let mut rows = self.lock()?;
        let row = rows.iter_mut().find(|a| &a.id == id).ok_or_else(|| not_found(id))?;
        if !row.holds_slot() {
            return Err(already_cancelled(id));
        }
        row.status = AppointmentStatus::Cancelled;
        Ok(row.clone())
    }

    fn reschedule(
        &self,
        id: &AppointmentId,
        date: NaiveDate,
        time: &str,
    ) -> CareResult<Appointment> {
        let mut rows = self.lock()?;
        let current = rows.iter().find(|a| &a.id == id).ok_or_else(|| not_found(id))?;
        if !current.holds_slot() {
            return Err(already_cancelled(id));
        }
        let provider = current.provider_id.clone();
        conflict(&rows, &provider, date, time, Some(id))?;

        let row = rows.iter_mut().find(|a| &a.id == id).ok_or_else(|| not_found(id))?;
        row.date = date;
        row.time = time.to_string();
        Ok(row.clone())
    }
}
