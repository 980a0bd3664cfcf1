//! Reference clinic walkthroughs.
//!
//! Each scenario builds a fresh `ReferenceClinic` from the given
//! configuration and drives it through one user journey, printing what
//! happens at every step.

pub mod access_control;
pub mod booking;
pub mod rescheduling;

use careslot_contracts::error::CareResult;

use crate::clinic::ReferenceClinic;

fn print_trail_summary(clinic: &ReferenceClinic) -> CareResult<()> {
    let trail = clinic.trail();
    println!(
        "  Activity trail:         {} ({} record(s))",
        if trail.verify_integrity() { "VERIFIED" } else { "BROKEN" },
        trail.len()?
    );
    Ok(())
}
