/// Step descriptor data model
///
/// Typed view of the JSON the setup endpoint serves: a map from step id to
/// the step's activity flags.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Activity flags of a single setup step.
///
/// The endpoint attaches more fields per step (templates, display names);
/// only the two that decide activity matter here, everything else is
/// ignored during decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEntry {
    /// The step still needs to run.
    #[serde(default)]
    pub required: bool,

    /// The step asked to be skipped despite being required.
    #[serde(default)]
    pub ignored: bool,
}

impl StepEntry {
    /// A step is active when it is required and not ignored.
    pub fn is_active(&self) -> bool {
        self.required && !self.ignored
    }
}

/// Step descriptor as fetched from the setup endpoint.
///
/// Fetched once per wizard session and treated as immutable afterwards.
/// Entries may be `null` in the wire format; a null step counts as
/// not required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepDescriptor {
    pub steps: BTreeMap<String, Option<StepEntry>>,
}

impl StepDescriptor {
    /// Look up a step, treating null entries as absent.
    pub fn get(&self, id: &str) -> Option<&StepEntry> {
        self.steps.get(id).and_then(|entry| entry.as_ref())
    }

    /// Iterate over all steps in id order, null entries included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&StepEntry>)> {
        self.steps
            .iter()
            .map(|(id, entry)| (id.as_str(), entry.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
