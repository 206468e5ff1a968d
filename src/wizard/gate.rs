/// Navigation veto gate
///
/// Evaluates step transitions against the participants and tracks where in
/// the step sequence the dialog currently is.

use std::sync::Arc;

use tracing::debug;

use crate::host::StepDialog;

use super::participant::{votes_allow, ParticipantBus};

/// Position of the dialog within the step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    index: usize,
    previous: Option<usize>,
    terminal: bool,
}

impl NavigationState {
    /// Index of the step currently shown.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Index shown before the last committed arrival, if any.
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    /// Whether the dialog sits on the last step.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            index: 0,
            previous: None,
            terminal: false,
        }
    }
}

/// Gatekeeper for step-to-step movement.
///
/// Widget callbacks funnel through here: `can_leave` before a transition,
/// `on_arrive` once a step is actually shown. State only changes on arrival,
/// a denied transition leaves everything untouched.
pub struct NavigationGate {
    dialog: Arc<dyn StepDialog>,
    participants: Arc<ParticipantBus>,
    state: NavigationState,
}

impl NavigationGate {
    /// Create a gate at the initial position.
    pub fn new(dialog: Arc<dyn StepDialog>, participants: Arc<ParticipantBus>) -> Self {
        Self {
            dialog,
            participants,
            state: NavigationState::default(),
        }
    }

    /// Get navigation state
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Whether the dialog may move from `current` to `next`.
    ///
    /// Either side missing means the widget fired on something that is not
    /// a real step; that is allowed without asking anyone. The same holds
    /// for a transition onto the step already shown. Everything else is put
    /// to a vote, and every participant gets asked even after a veto.
    pub fn can_leave(
        &self,
        current: Option<(usize, &str)>,
        next: Option<(usize, &str)>,
    ) -> bool {
        let ((current_index, current_id), (next_index, next_id)) = match (current, next) {
            (Some(current), Some(next)) => (current, next),
            // Missing tab metadata on either side: nothing to evaluate.
            _ => return true,
        };

        if current_index == next_index {
            return true;
        }

        let votes = self
            .participants
            .broadcast(|p| p.on_wizard_tab_change(current_id, next_id));
        let allowed = votes_allow(&votes);

        if !allowed {
            debug!("Transition from '{}' to '{}' vetoed", current_id, next_id);
        }

        allowed
    }

    /// Commit an arrival on the step the widget just made visible.
    ///
    /// Toggles the finish/next affordances depending on whether this is the
    /// last step, records the new position and tells the participants about
    /// the step that is now showing.
    pub fn on_arrive(&mut self, active: Option<(usize, &str)>) {
        let (index, id) = match active {
            Some(active) => active,
            None => return,
        };

        let terminal = index == self.dialog.navigation_length();
        if terminal {
            self.dialog.show_finish_affordance();
        } else {
            self.dialog.show_next_affordance();
        }

        self.state = NavigationState {
            index,
            previous: Some(self.state.index),
            terminal,
        };

        debug!("Wizard now on step '{}' (index {})", id, index);
        self.participants.notify(|p| p.on_after_wizard_tab_change(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::participant::{Vote, WizardParticipant};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct FakeDialog {
        length: usize,
        affordances: Mutex<Vec<&'static str>>,
    }

    impl FakeDialog {
        fn with_length(length: usize) -> Self {
            Self {
                length,
                affordances: Mutex::new(Vec::new()),
            }
        }
    }

    impl StepDialog for FakeDialog {
        fn show(&self) {}
        fn hide(&self) {}
        fn is_visible(&self) -> bool {
            true
        }
        fn navigation_length(&self) -> usize {
            self.length
        }
        fn show_finish_affordance(&self) {
            self.affordances.lock().push("finish");
        }
        fn show_next_affordance(&self) {
            self.affordances.lock().push("next");
        }
    }

    struct CountingParticipant {
        vote: Vote,
        tab_calls: Mutex<Vec<(String, String)>>,
        arrivals: Mutex<Vec<String>>,
    }

    impl CountingParticipant {
        fn voting(vote: Vote) -> Self {
            Self {
                vote,
                tab_calls: Mutex::new(Vec::new()),
                arrivals: Mutex::new(Vec::new()),
            }
        }
    }

    impl WizardParticipant for CountingParticipant {
        fn on_wizard_tab_change(&self, current: &str, next: &str) -> Vote {
            self.tab_calls
                .lock()
                .push((current.to_string(), next.to_string()));
            self.vote
        }

        fn on_after_wizard_tab_change(&self, current: &str) {
            self.arrivals.lock().push(current.to_string());
        }
    }

    fn gate_with(
        length: usize,
        participants: Vec<Arc<dyn WizardParticipant>>,
    ) -> (NavigationGate, Arc<FakeDialog>) {
        let dialog = Arc::new(FakeDialog::with_length(length));
        let gate = NavigationGate::new(
            Arc::clone(&dialog) as Arc<dyn StepDialog>,
            Arc::new(ParticipantBus::new(participants)),
        );
        (gate, dialog)
    }

    #[test]
    fn test_missing_tabs_allow_without_broadcast() {
        let participant = Arc::new(CountingParticipant::voting(Vote::Veto));
        let (gate, _dialog) = gate_with(3, vec![Arc::clone(&participant) as _]);

        assert!(gate.can_leave(None, Some((1, "b"))));
        assert!(gate.can_leave(Some((0, "a")), None));
        assert!(gate.can_leave(None, None));
        assert!(participant.tab_calls.lock().is_empty());
    }

    #[test]
    fn test_self_transition_is_silent_noop() {
        let participant = Arc::new(CountingParticipant::voting(Vote::Veto));
        let (gate, dialog) = gate_with(3, vec![Arc::clone(&participant) as _]);

        assert!(gate.can_leave(Some((2, "c")), Some((2, "c"))));
        assert!(participant.tab_calls.lock().is_empty());
        assert!(dialog.affordances.lock().is_empty());
        assert_eq!(gate.state().index(), 0);
    }

    #[test]
    fn test_single_veto_blocks_but_everyone_is_asked() {
        let vetoer = Arc::new(CountingParticipant::voting(Vote::Veto));
        let late = Arc::new(CountingParticipant::voting(Vote::Allow));
        let (gate, _dialog) = gate_with(3, vec![Arc::clone(&vetoer) as _, Arc::clone(&late) as _]);

        assert!(!gate.can_leave(Some((0, "a")), Some((1, "b"))));
        assert_eq!(vetoer.tab_calls.lock().len(), 1);
        assert_eq!(late.tab_calls.lock().len(), 1);
        assert_eq!(
            late.tab_calls.lock()[0],
            ("a".to_string(), "b".to_string())
        );
    }

    #[test]
    fn test_unanimous_allow_passes() {
        let a = Arc::new(CountingParticipant::voting(Vote::Allow));
        let b = Arc::new(CountingParticipant::voting(Vote::Allow));
        let (gate, _dialog) = gate_with(3, vec![Arc::clone(&a) as _, Arc::clone(&b) as _]);

        assert!(gate.can_leave(Some((0, "a")), Some((1, "b"))));
    }

    #[test]
    fn test_denied_transition_leaves_state_untouched() {
        let vetoer = Arc::new(CountingParticipant::voting(Vote::Veto));
        let (gate, _dialog) = gate_with(3, vec![Arc::clone(&vetoer) as _]);

        let before = *gate.state();
        gate.can_leave(Some((0, "a")), Some((1, "b")));
        assert_eq!(*gate.state(), before);
    }

    #[test]
    fn test_arrival_commits_state_and_notifies() {
        let participant = Arc::new(CountingParticipant::voting(Vote::Allow));
        let (mut gate, _dialog) = gate_with(3, vec![Arc::clone(&participant) as _]);

        gate.on_arrive(Some((1, "b")));

        assert_eq!(gate.state().index(), 1);
        assert_eq!(gate.state().previous(), Some(0));
        assert!(!gate.state().is_terminal());
        assert_eq!(*participant.arrivals.lock(), ["b"]);
    }

    #[test]
    fn test_terminal_arrival_shows_finish_affordance() {
        let (mut gate, dialog) = gate_with(2, Vec::new());

        gate.on_arrive(Some((1, "b")));
        gate.on_arrive(Some((2, "c")));

        assert!(gate.state().is_terminal());
        assert_eq!(gate.state().previous(), Some(1));
        assert_eq!(*dialog.affordances.lock(), ["next", "finish"]);
    }

    #[test]
    fn test_leaving_terminal_restores_next_affordance() {
        let (mut gate, dialog) = gate_with(2, Vec::new());

        gate.on_arrive(Some((2, "c")));
        gate.on_arrive(Some((1, "b")));

        assert!(!gate.state().is_terminal());
        assert_eq!(*dialog.affordances.lock(), ["finish", "next"]);
    }

    #[test]
    fn test_arrival_without_tab_is_ignored() {
        let participant = Arc::new(CountingParticipant::voting(Vote::Allow));
        let (mut gate, dialog) = gate_with(3, vec![Arc::clone(&participant) as _]);

        gate.on_arrive(None);

        assert_eq!(gate.state().index(), 0);
        assert!(dialog.affordances.lock().is_empty());
        assert!(participant.arrivals.lock().is_empty());
    }
}
