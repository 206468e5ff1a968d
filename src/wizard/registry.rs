/// Active step registry
///
/// Computes and holds the set of steps the wizard session has to run.

use std::collections::BTreeSet;

use tracing::debug;

use super::descriptor::StepDescriptor;

/// Set of active step ids for the current wizard session.
///
/// Loaded once from the descriptor when the session starts and frozen until
/// the next `load`. The set is what gets reported back as handled when the
/// wizard finishes.
#[derive(Debug, Clone, Default)]
pub struct StepRegistry {
    active: BTreeSet<String>,
}

impl StepRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            active: BTreeSet::new(),
        }
    }

    /// Recompute the active set from a freshly fetched descriptor.
    ///
    /// A step is kept when its entry says required and not ignored; null
    /// entries drop out. An empty descriptor yields an empty set.
    pub fn load(&mut self, descriptor: &StepDescriptor) {
        self.active = descriptor
            .iter()
            .filter(|(_, entry)| entry.map(|entry| entry.is_active()).unwrap_or(false))
            .map(|(id, _)| id.to_string())
            .collect();

        debug!("Active setup steps: {:?}", self.active);
    }

    /// Read-only view of the active step ids, in id order.
    pub fn active_steps(&self) -> &BTreeSet<String> {
        &self.active
    }

    /// Whether the given step is part of the session.
    pub fn is_active(&self, id: &str) -> bool {
        self.active.contains(id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor(value: serde_json::Value) -> StepDescriptor {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_active_step_filtering() {
        let mut registry = StepRegistry::new();
        registry.load(&descriptor(json!({
            "a": {"required": true, "ignored": false},
            "b": {"required": true, "ignored": true},
            "c": {"required": false, "ignored": false},
            "d": null
        })));

        assert_eq!(registry.len(), 1);
        assert!(registry.is_active("a"));
        assert!(!registry.is_active("b"));
        assert!(!registry.is_active("c"));
        assert!(!registry.is_active("d"));
    }

    #[test]
    fn test_empty_descriptor_yields_empty_set() {
        let mut registry = StepRegistry::new();
        registry.load(&descriptor(json!({})));

        assert!(registry.is_empty());
        assert!(registry.active_steps().is_empty());
    }

    #[test]
    fn test_load_replaces_previous_set() {
        let mut registry = StepRegistry::new();
        registry.load(&descriptor(json!({
            "a": {"required": true, "ignored": false}
        })));
        assert!(registry.is_active("a"));

        registry.load(&descriptor(json!({
            "b": {"required": true, "ignored": false}
        })));
        assert!(!registry.is_active("a"));
        assert!(registry.is_active("b"));
    }

    #[test]
    fn test_set_is_ordered() {
        let mut registry = StepRegistry::new();
        registry.load(&descriptor(json!({
            "zeta": {"required": true},
            "alpha": {"required": true},
            "mid": {"required": true}
        })));

        let ids: Vec<&String> = registry.active_steps().iter().collect();
        assert_eq!(ids, ["alpha", "mid", "zeta"]);
    }
}
