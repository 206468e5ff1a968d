//! Setup wizard orchestration core.
//!
//! Drives a browser-style first-run setup dialog without rendering any of
//! it: the host supplies the dialog, settings and login seams, the setup
//! endpoint supplies the step descriptor, and participants hook into the
//! lifecycle through [`WizardParticipant`].

pub mod api;
pub mod error;
pub mod host;
pub mod wizard;

pub use api::{SetupApi, SetupBackend};
pub use error::{WizardError, WizardResult};
pub use host::{HostFlags, LoginState, SettingsBridge, StepDialog};
pub use wizard::{
    CompletionCoordinator, FinishOutcome, FinishSignal, NavigationGate, NavigationState,
    ParticipantBus, StepDescriptor, StepEntry, StepRegistry, Vote, WizardController,
    WizardParticipant,
};
