use serde::{Deserialize, Serialize};

/// A short human-readable note tied to an orchestrator step.
///
/// Used both for the live progress log and for the partial-results notes in
/// the response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub step: u32,
    pub info: String,
}

impl ProgressEvent {
    pub fn new(step: u32, info: impl Into<String>) -> Self {
        Self {
            step,
            info: info.into(),
        }
    }
}
