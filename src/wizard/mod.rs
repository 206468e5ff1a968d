/// Setup wizard orchestration module
///
/// Coordinates a first-run setup session between the step descriptor served
/// by the setup endpoint, the participants that own individual steps, and
/// the host's dialog.
///
/// ## Architecture
///
/// ```text
/// WizardController
///   ├── StepRegistry (active step set computed from the descriptor)
///   ├── ParticipantBus (ordered hook broadcast over a fixed list)
///   ├── NavigationGate (tab-change vetoes, affordances, position)
///   └── CompletionCoordinator (two-phase finish, handled report)
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// use setup_wizard::{HostFlags, SetupApi, WizardController};
///
/// let backend = Arc::new(SetupApi::new("http://localhost:5000"));
/// let mut controller = WizardController::new(
///     HostFlags { setup_required: true, first_run: true },
///     backend,
///     dialog,
///     settings,
///     login,
///     participants,
/// );
///
/// controller.start()?;
///
/// // Wire the navigation widget callbacks:
/// //   tab change  -> controller.handle_tab_change(current, next)
/// //   tab shown   -> controller.handle_tab_shown(active)
/// //   finish      -> controller.finish_wizard()
/// ```
///
/// ## Lifecycle
///
/// 1. **start** - fetch descriptor, load the step registry, broadcast
///    details, maybe show the dialog
/// 2. **navigate** - every transition is put to a participant vote
/// 3. **finish** - veto poll, then finalize and report handled steps
/// 4. **close** - dialog hidden, reload request handed to the host

pub mod controller;
pub mod coordinator;
pub mod descriptor;
pub mod gate;
pub mod participant;
pub mod registry;

// Re-export commonly used types
pub use controller::WizardController;
pub use coordinator::{CompletionCoordinator, FinishOutcome};
pub use descriptor::{StepDescriptor, StepEntry};
pub use gate::{NavigationGate, NavigationState};
pub use participant::{FinishSignal, ParticipantBus, Vote, WizardParticipant};
pub use registry::StepRegistry;
