/// Wizard session orchestration
///
/// Owns the session: fetches the descriptor, decides dialog visibility,
/// routes widget callbacks into the navigation gate and hands the finish
/// button to the completion coordinator.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::api::SetupBackend;
use crate::error::WizardResult;
use crate::host::{HostFlags, LoginState, SettingsBridge, StepDialog};

use super::coordinator::{CompletionCoordinator, FinishOutcome};
use super::gate::{NavigationGate, NavigationState};
use super::participant::{ParticipantBus, WizardParticipant};
use super::registry::StepRegistry;

/// Orchestrator for one wizard session.
///
/// The participant list is fixed at construction; there is no way to join a
/// running session. The descriptor is fetched exactly once, in `start`.
pub struct WizardController {
    flags: HostFlags,
    dialog: Arc<dyn StepDialog>,
    settings: Arc<dyn SettingsBridge>,
    login: Arc<dyn LoginState>,
    backend: Arc<dyn SetupBackend>,
    participants: Arc<ParticipantBus>,
    registry: Arc<RwLock<StepRegistry>>,
    gate: NavigationGate,
    coordinator: CompletionCoordinator,
    started: bool,
}

impl WizardController {
    pub fn new(
        flags: HostFlags,
        backend: Arc<dyn SetupBackend>,
        dialog: Arc<dyn StepDialog>,
        settings: Arc<dyn SettingsBridge>,
        login: Arc<dyn LoginState>,
        participants: Vec<Arc<dyn WizardParticipant>>,
    ) -> Self {
        let participants = Arc::new(ParticipantBus::new(participants));
        let registry = Arc::new(RwLock::new(StepRegistry::new()));
        let finishing = Arc::new(AtomicBool::new(false));

        let gate = NavigationGate::new(Arc::clone(&dialog), Arc::clone(&participants));
        let coordinator = CompletionCoordinator::new(
            Arc::clone(&participants),
            Arc::clone(&backend),
            Arc::clone(&settings),
            Arc::clone(&registry),
            finishing,
        );

        Self {
            flags,
            dialog,
            settings,
            login,
            backend,
            participants,
            registry,
            gate,
            coordinator,
            started: false,
        }
    }

    /// Begin the wizard session.
    ///
    /// Fetches the descriptor, loads the active step set, hands the full
    /// descriptor to the participants and shows the dialog when the host
    /// flags and login state allow it. A fetch failure is returned to the
    /// caller; the dialog stays hidden and nothing retries on its own.
    pub fn start(&mut self) -> WizardResult<()> {
        let descriptor = self.backend.fetch_descriptor()?;
        self.registry.write().load(&descriptor);
        self.participants
            .notify(|p| p.on_wizard_details(&descriptor));
        self.started = true;

        if self.flags.show_allowed(self.login.as_ref()) {
            info!(
                "Showing setup wizard ({} active steps)",
                self.registry.read().len()
            );
            self.dialog.show();
        } else {
            debug!("Setup wizard suppressed for this session");
        }

        Ok(())
    }

    /// Re-evaluate dialog visibility after a login.
    ///
    /// The descriptor is per-session and not fetched again; only the show
    /// decision can change, typically because a privileged user logged in
    /// outside of first launch.
    pub fn on_user_authenticated(&self) {
        if !self.started {
            return;
        }

        if !self.dialog.is_visible() && self.flags.show_allowed(self.login.as_ref()) {
            info!("Showing setup wizard after login");
            self.dialog.show();
        }
    }

    /// Whether the wizard dialog is currently visible.
    pub fn is_active(&self) -> bool {
        self.dialog.is_visible()
    }

    /// Hide the dialog unconditionally.
    pub fn close(&self) {
        self.dialog.hide();
    }

    /// Whether a finish attempt is currently finalizing.
    pub fn is_finishing(&self) -> bool {
        self.coordinator.is_finishing()
    }

    /// Active step ids of this session, in id order.
    pub fn active_steps(&self) -> Vec<String> {
        self.registry.read().active_steps().iter().cloned().collect()
    }

    /// Widget callback: may the dialog move from `current` to `next`?
    pub fn handle_tab_change(
        &self,
        current: Option<(usize, &str)>,
        next: Option<(usize, &str)>,
    ) -> bool {
        self.gate.can_leave(current, next)
    }

    /// Widget callback: a step has become visible.
    pub fn handle_tab_shown(&mut self, active: Option<(usize, &str)>) {
        self.gate.on_arrive(active);
    }

    /// Current navigation position.
    pub fn navigation(&self) -> &NavigationState {
        self.gate.state()
    }

    /// Run the finish protocol.
    ///
    /// On a completed finish the dialog is hidden and the reload request is
    /// handed back to the host; actually reloading the frontend is the
    /// host's job. A veto or a failed submission leaves the dialog open.
    pub fn finish_wizard(&self) -> WizardResult<FinishOutcome> {
        let outcome = self.coordinator.run()?;

        if let FinishOutcome::Completed { .. } = outcome {
            self.dialog.hide();
        }

        Ok(outcome)
    }

    /// Guard the host against treating mid-finish settings saves as foreign
    /// changes.
    ///
    /// Returns true, after surfacing the host's unsaved-changes prompt, when
    /// the wizard is visible, not finalizing, and local settings changes are
    /// pending.
    pub fn check_unsaved_changes(&self) -> bool {
        if self.coordinator.is_finishing() || !self.dialog.is_visible() {
            return false;
        }

        if !self.settings.has_local_changes() {
            return false;
        }

        self.settings.prompt_unsaved_changes();
        true
    }
}
