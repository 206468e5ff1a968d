/// Participant hooks and ordered broadcast
///
/// Participants are the step owners and bystanders that want a say in the
/// wizard lifecycle. Every hook has a default body, so implementors only
/// override what they care about; a participant without an override behaves
/// exactly like one that lacks the capability.

use std::sync::Arc;

use super::descriptor::StepDescriptor;

/// Reply to a veto-style hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    /// Let the transition or finish proceed.
    Allow,

    /// Hold the wizard where it is.
    Veto,
}

impl Default for Vote {
    fn default() -> Self {
        Vote::Allow
    }
}

/// Reply to the finish hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishSignal {
    /// Nothing further needed from this participant.
    Done,

    /// The host should reload its frontend once the wizard has closed.
    Reload,
}

impl Default for FinishSignal {
    fn default() -> Self {
        FinishSignal::Done
    }
}

/// Hooks a wizard participant may implement.
///
/// All hooks default to no-ops that count as approval, so the minimal
/// participant is `impl WizardParticipant for MyType {}`.
pub trait WizardParticipant: Send + Sync {
    /// Full descriptor, delivered right after it has been fetched.
    fn on_wizard_details(&self, _descriptor: &StepDescriptor) {}

    /// Veto gate for leaving the step `current` towards `next`.
    fn on_wizard_tab_change(&self, _current: &str, _next: &str) -> Vote {
        Vote::Allow
    }

    /// Informational, after `current` became the visible step.
    fn on_after_wizard_tab_change(&self, _current: &str) {}

    /// Veto gate for the finish button.
    fn on_before_wizard_finish(&self) -> Vote {
        Vote::Allow
    }

    /// Fired during finalization; reply `Reload` to request a frontend
    /// reload once the wizard has closed.
    fn on_wizard_finish(&self) -> FinishSignal {
        FinishSignal::Done
    }
}

/// Ordered broadcast over a fixed participant list.
///
/// The list is handed over at construction and never changes afterwards,
/// so invocation order is the registration order for the whole session.
pub struct ParticipantBus {
    participants: Vec<Arc<dyn WizardParticipant>>,
}

impl ParticipantBus {
    /// Create a bus over the given participants, in invocation order.
    pub fn new(participants: Vec<Arc<dyn WizardParticipant>>) -> Self {
        Self { participants }
    }

    /// Number of participants on the bus.
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Invoke `hook` on every participant in order and collect each reply.
    ///
    /// Aggregation happens on the returned list, never inside the loop:
    /// a veto from an early participant cannot hide the event from the
    /// participants behind it.
    pub fn broadcast<R>(&self, mut hook: impl FnMut(&dyn WizardParticipant) -> R) -> Vec<R> {
        self.participants
            .iter()
            .map(|participant| hook(participant.as_ref()))
            .collect()
    }

    /// Fire-and-forget broadcast for informational hooks.
    pub fn notify(&self, mut hook: impl FnMut(&dyn WizardParticipant)) {
        for participant in &self.participants {
            hook(participant.as_ref());
        }
    }
}

/// True unless at least one participant vetoed.
pub fn votes_allow(votes: &[Vote]) -> bool {
    votes.iter().all(|vote| *vote != Vote::Veto)
}

/// True if at least one participant asked for a reload.
pub fn reload_requested(signals: &[FinishSignal]) -> bool {
    signals.iter().any(|signal| *signal == FinishSignal::Reload)
}
