//! Availability calculator.
//!
//! Two questions, both pure functions over static data:
//!
//! 1. Can this calendar date be selected for this provider?
//! 2. Which slots on that date are still open?
//!
//! Weekdays are numbered from Sunday = 0, matching `Provider::available_days`.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use careslot_contracts::{
    appointment::Appointment,
    catalog::{Provider, ProviderId},
};

/// Weekday of `date` as 0 (Sunday) through 6 (Saturday).
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Return true if `date` cannot be selected.
///
/// Dates before `today` are always disabled. Without a provider nothing else
/// is disabled; with one, dates outside the provider's working days are.
pub fn is_date_disabled(date: NaiveDate, provider: Option<&Provider>, today: NaiveDate) -> bool {
    if date < today {
        return true;
    }
    match provider {
        None => false,
        Some(provider) => !provider.works_on(date.weekday()),
    }
}

/// Slot labels already held for `provider` on `date`.
pub fn booked_slots<'a>(
    provider: &ProviderId,
    date: NaiveDate,
    booked: &'a [Appointment],
) -> HashSet<&'a str> {
    booked
        .iter()
        .filter(|a| a.holds_slot() && &a.provider_id == provider && a.date == date)
        .map(|a| a.time.as_str())
        .collect()
}

/// Open slots for `provider` on `date`, in master-list order.
///
/// With no date or no provider the full master list is returned. The result
/// is always a subsequence of `master`.
pub fn available_time_slots(
    date: Option<NaiveDate>,
    provider: Option<&ProviderId>,
    master: &[String],
    booked: &[Appointment],
) -> Vec<String> {
    let (Some(date), Some(provider)) = (date, provider) else {
        return master.to_vec();
    };

    let taken = booked_slots(provider, date, booked);
    master
        .iter()
        .filter(|slot| !taken.contains(slot.as_str()))
        .cloned()
        .collect()
}

/// First selectable date for `provider` on or after `from`, looking at most
/// `horizon_days` ahead.
pub fn next_available_date(
    from: NaiveDate,
    provider: &Provider,
    today: NaiveDate,
    horizon_days: u32,
) -> Option<NaiveDate> {
    let start = from.max(today);
    start
        .iter_days()
        .take(horizon_days as usize)
        .find(|date| !is_date_disabled(*date, Some(provider), today))
}
