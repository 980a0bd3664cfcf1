//! careslot-core: scheduling logic for CARESLOT.
//!
//! This crate holds everything that decides what a user may see and do:
//! the trait seams to storage and audit, the availability calculator, role
//! visibility rules, and the booking desk that runs user actions through
//! the dialog workflow.

pub mod availability;
pub mod calendar;
pub mod catalog;
pub mod desk;
pub mod traits;
pub mod visibility;
pub mod workflow;

pub use catalog::{AppointmentView, Catalog};
pub use desk::{BookingDesk, Confirmation};
pub use traits::{AccessPolicy, AppointmentStore, AuditWriter, SessionStore};
pub use workflow::{AppointmentDialogs, Workflow, WorkflowState};
