//! Chat submission state.

use serde::{Deserialize, Serialize};

/// State of the single-flight assistant turn.
///
/// `Idle` is both the initial and the only resting state; every
/// `Submitting` turn returns to `Idle` through either the success or the
/// failure path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChatMode {
    /// No assistant request is outstanding.
    #[default]
    Idle,
    /// One assistant request is in flight; further submissions are ignored.
    Submitting,
}

impl ChatMode {
    pub fn is_submitting(self) -> bool {
        self == ChatMode::Submitting
    }

    /// Whether a submission of `input` would start a turn.
    pub fn accepts(self, input: &str) -> bool {
        self == ChatMode::Idle && !input.trim().is_empty()
    }
}
