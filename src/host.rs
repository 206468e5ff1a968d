/// Host integration seams for the wizard core.
///
/// The wizard never renders anything itself. It drives the embedding
/// application through these traits: a dialog that can be shown and asked
/// about its navigation widget, a settings bridge, and the login state.
/// Hosts wire in their own implementations; tests use recording fakes.

/// Dialog surface owned by the host.
pub trait StepDialog: Send + Sync {
    /// Make the wizard dialog visible.
    fn show(&self);

    /// Hide the wizard dialog.
    fn hide(&self);

    /// Whether the dialog is currently visible.
    fn is_visible(&self) -> bool;

    /// Highest step index the navigation widget reports.
    fn navigation_length(&self) -> usize;

    /// Show the finish affordance and hide the next affordance.
    fn show_finish_affordance(&self);

    /// Show the next affordance and hide the finish affordance.
    fn show_next_affordance(&self);
}

/// Bridge to the host's settings layer.
pub trait SettingsBridge: Send + Sync {
    /// Push pending local settings to persistent storage.
    fn save(&self);

    /// Whether local settings changes have not been persisted yet.
    fn has_local_changes(&self) -> bool;

    /// Surface the host's unsaved-changes dialog.
    fn prompt_unsaved_changes(&self);
}

/// Live view of the authenticated user.
pub trait LoginState: Send + Sync {
    /// Whether the current user may run the wizard outside of first launch.
    fn is_privileged(&self) -> bool;
}

/// Launch-time facts the host passes in explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostFlags {
    /// Unfinished mandatory setup steps exist.
    pub setup_required: bool,

    /// First launch of the application.
    pub first_run: bool,
}

impl HostFlags {
    /// Whether the dialog may be shown for the given login state.
    ///
    /// Setup must be pending, and outside of first launch only a privileged
    /// user gets the wizard.
    pub fn show_allowed(&self, login: &dyn LoginState) -> bool {
        self.setup_required && (self.first_run || login.is_privileged())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLogin {
        privileged: bool,
    }

    impl LoginState for FixedLogin {
        fn is_privileged(&self) -> bool {
            self.privileged
        }
    }

    #[test]
    fn test_show_requires_pending_setup() {
        let flags = HostFlags {
            setup_required: false,
            first_run: true,
        };
        assert!(!flags.show_allowed(&FixedLogin { privileged: true }));
    }

    #[test]
    fn test_first_run_shows_without_privilege() {
        let flags = HostFlags {
            setup_required: true,
            first_run: true,
        };
        assert!(flags.show_allowed(&FixedLogin { privileged: false }));
    }

    #[test]
    fn test_later_runs_require_privilege() {
        let flags = HostFlags {
            setup_required: true,
            first_run: false,
        };
        assert!(!flags.show_allowed(&FixedLogin { privileged: false }));
        assert!(flags.show_allowed(&FixedLogin { privileged: true }));
    }
}
