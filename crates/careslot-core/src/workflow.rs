//! Dialog workflow state machine.
//!
//! Each user action that goes through a dialog (booking, cancellation,
//! rescheduling, calendar integration) is driven by one `Workflow`:
//!
//! ```text
//!   Idle ──open──▶ Confirming ──submit──▶ Submitting ──complete──▶ Done
//!    ▲                 ▲  │                    │
//!    │                 │  └─dismiss──▶ Idle    ├──reject(missing info)──▶ Confirming
//!    └──dismiss── Done / Failed                └──reject(other)─────────▶ Failed
//! ```
//!
//! The workflow is keyed by its target entity id (an appointment id, or a
//! provider id for new bookings), so there is never a "dialog open" flag
//! without knowing what it is open for.

use careslot_contracts::{
    activity::ActionKind,
    error::{CareError, CareResult},
    notice::Notice,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Confirming { target: String },
    Submitting { target: String },
    Done { target: String, notice: Notice },
    Failed { target: String, notice: Notice },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Confirming { .. } => "confirming",
            WorkflowState::Submitting { .. } => "submitting",
            WorkflowState::Done { .. } => "done",
            WorkflowState::Failed { .. } => "failed",
        }
    }
}

/// One dialog-driven action.
#[derive(Debug, Clone)]
pub struct Workflow {
    kind: ActionKind,
    state: WorkflowState,
}

impl Workflow {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            state: WorkflowState::Idle,
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// The entity this workflow is acting on, if any.
    pub fn target(&self) -> Option<&str> {
        match &self.state {
            WorkflowState::Idle => None,
            WorkflowState::Confirming { target }
            | WorkflowState::Submitting { target }
            | WorkflowState::Done { target, .. }
            | WorkflowState::Failed { target, .. } => Some(target),
        }
    }

    /// True while the dialog is on screen.
    pub fn is_open(&self) -> bool {
        matches!(
            self.state,
            WorkflowState::Confirming { .. } | WorkflowState::Submitting { .. }
        )
    }

    /// The outcome notice of the last submission, if it has settled.
    pub fn outcome(&self) -> Option<&Notice> {
        match &self.state {
            WorkflowState::Done { notice, .. } | WorkflowState::Failed { notice, .. } => {
                Some(notice)
            }
            _ => None,
        }
    }

    fn illegal(&self, event: &str) -> CareError {
        CareError::InvalidTransition {
            workflow: self.kind,
            from: self.state.name().to_string(),
            event: event.to_string(),
        }
    }

    /// Open the dialog for `target`. Re-opening for another target while
    /// confirming retargets the dialog.
    pub fn open(&mut self, target: impl Into<String>) -> CareResult<()> {
        if let WorkflowState::Submitting { .. } = self.state {
            return Err(self.illegal("open"));
        }
        self.state = WorkflowState::Confirming {
            target: target.into(),
        };
        Ok(())
    }

    /// Confirm the dialog. Returns the target to act on.
    pub fn submit(&mut self) -> CareResult<String> {
        match &self.state {
            WorkflowState::Confirming { target } => {
                let target = target.clone();
                self.state = WorkflowState::Submitting {
                    target: target.clone(),
                };
                Ok(target)
            }
            _ => Err(self.illegal("submit")),
        }
    }

    /// Record a successful submission.
    pub fn complete(&mut self, notice: Notice) -> CareResult<()> {
        match &self.state {
            WorkflowState::Submitting { target } => {
                self.state = WorkflowState::Done {
                    target: target.clone(),
                    notice,
                };
                Ok(())
            }
            _ => Err(self.illegal("complete")),
        }
    }

    /// Record a failed submission.
    ///
    /// Missing information keeps the dialog open so the user can fill in the
    /// gap; any other failure closes it.
    pub fn reject(&mut self, error: &CareError) -> CareResult<()> {
        match &self.state {
            WorkflowState::Submitting { target } => {
                let target = target.clone();
                self.state = match error {
                    CareError::MissingInformation { .. } => WorkflowState::Confirming { target },
                    other => WorkflowState::Failed {
                        target,
                        notice: other.notice(),
                    },
                };
                Ok(())
            }
            _ => Err(self.illegal("reject")),
        }
    }

    /// Close the dialog without acting.
    pub fn dismiss(&mut self) -> CareResult<()> {
        if let WorkflowState::Submitting { .. } = self.state {
            return Err(self.illegal("dismiss"));
        }
        self.state = WorkflowState::Idle;
        Ok(())
    }
}

/// The four dialogs on the appointments page.
#[derive(Debug, Clone)]
pub struct AppointmentDialogs {
    pub booking: Workflow,
    pub cancel: Workflow,
    pub reschedule: Workflow,
    pub calendar: Workflow,
}

impl AppointmentDialogs {
    pub fn new() -> Self {
        Self {
            booking: Workflow::new(ActionKind::Book),
            cancel: Workflow::new(ActionKind::Cancel),
            reschedule: Workflow::new(ActionKind::Reschedule),
            calendar: Workflow::new(ActionKind::ConnectCalendar),
        }
    }

    /// The dialog currently on screen, if any.
    pub fn active(&self) -> Option<&Workflow> {
        [&self.booking, &self.cancel, &self.reschedule, &self.calendar]
            .into_iter()
            .find(|w| w.is_open())
    }
}

impl Default for AppointmentDialogs {
    fn default() -> Self {
        Self::new()
    }
}
