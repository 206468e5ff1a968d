/// Two-phase finish coordination
///
/// Runs the finish protocol: poll the participants for objections, then
/// finalize by broadcasting the finish hook, saving settings and reporting
/// the handled steps to the setup endpoint.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::api::SetupBackend;
use crate::error::WizardResult;
use crate::host::SettingsBridge;

use super::participant::{reload_requested, votes_allow, ParticipantBus};
use super::registry::StepRegistry;

/// How a finish attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishOutcome {
    /// A participant refused to let the wizard close. Nothing was saved or
    /// submitted.
    Vetoed,

    /// Finish ran to completion. `reload` is true when at least one
    /// participant asked the host to reload its frontend.
    Completed { reload: bool },
}

/// Coordinator for the finish protocol.
///
/// The finishing flag goes up when finalization starts and comes down once
/// the submission has settled, on the failure path too. While it is up the
/// host must not treat pending settings changes as foreign.
pub struct CompletionCoordinator {
    participants: Arc<ParticipantBus>,
    backend: Arc<dyn SetupBackend>,
    settings: Arc<dyn SettingsBridge>,
    registry: Arc<RwLock<StepRegistry>>,
    finishing: Arc<AtomicBool>,
}

impl CompletionCoordinator {
    pub fn new(
        participants: Arc<ParticipantBus>,
        backend: Arc<dyn SetupBackend>,
        settings: Arc<dyn SettingsBridge>,
        registry: Arc<RwLock<StepRegistry>>,
        finishing: Arc<AtomicBool>,
    ) -> Self {
        Self {
            participants,
            backend,
            settings,
            registry,
            finishing,
        }
    }

    /// Whether a finalization is currently in flight.
    pub fn is_finishing(&self) -> bool {
        self.finishing.load(Ordering::SeqCst)
    }

    /// Run one finish attempt.
    ///
    /// Phase one polls `on_before_wizard_finish` on every participant; a
    /// single veto ends the attempt with `Vetoed` and no side effects.
    /// Phase two raises the finishing flag, broadcasts `on_wizard_finish`,
    /// saves settings and submits the handled steps. A failed submission
    /// surfaces as an error with the flag reset, so the user can try again.
    pub fn run(&self) -> WizardResult<FinishOutcome> {
        let votes = self
            .participants
            .broadcast(|p| p.on_before_wizard_finish());
        if !votes_allow(&votes) {
            info!("Wizard finish vetoed, dialog stays open");
            return Ok(FinishOutcome::Vetoed);
        }

        self.finishing.store(true, Ordering::SeqCst);

        let signals = self.participants.broadcast(|p| p.on_wizard_finish());
        let reload = reload_requested(&signals);

        self.settings.save();

        // Snapshot the ids; the registry lock must not be held across the
        // blocking request.
        let handled = self.registry.read().active_steps().clone();
        let result = self.backend.submit_handled(&handled);

        self.finishing.store(false, Ordering::SeqCst);

        match result {
            Ok(()) => {
                if reload {
                    info!("Wizard requested reloading");
                }
                Ok(FinishOutcome::Completed { reload })
            }
            Err(err) => {
                warn!("Reporting handled wizard steps failed: {}", err);
                Err(err)
            }
        }
    }
}
