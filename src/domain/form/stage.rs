//! Lifecycle of a single form generation run.

use std::fmt;

use serde::Serialize;

use crate::domain::foundation::StateMachine;

/// Pipeline stage of a generation run.
///
/// Stages only move forward. Any non-terminal stage may fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStage {
    Composing,
    AwaitingBackend,
    Extracting,
    Sanitizing,
    Decoding,
    Validating,
    Succeeded,
    Failed,
}

impl GenerationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStage::Composing => "composing",
            GenerationStage::AwaitingBackend => "awaiting_backend",
            GenerationStage::Extracting => "extracting",
            GenerationStage::Sanitizing => "sanitizing",
            GenerationStage::Decoding => "decoding",
            GenerationStage::Validating => "validating",
            GenerationStage::Succeeded => "succeeded",
            GenerationStage::Failed => "failed",
        }
    }

    fn next(&self) -> Option<GenerationStage> {
        use GenerationStage::*;
        match self {
            Composing => Some(AwaitingBackend),
            AwaitingBackend => Some(Extracting),
            Extracting => Some(Sanitizing),
            Sanitizing => Some(Decoding),
            Decoding => Some(Validating),
            Validating => Some(Succeeded),
            Succeeded | Failed => None,
        }
    }
}

impl StateMachine for GenerationStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self.next() {
            Some(next) => vec![next, GenerationStage::Failed],
            None => vec![],
        }
    }
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Follows one run through its stages, logging each transition.
#[derive(Debug)]
pub struct StageTracker {
    current: GenerationStage,
}

impl StageTracker {
    pub fn new() -> Self {
        Self {
            current: GenerationStage::Composing,
        }
    }

    pub fn current(&self) -> GenerationStage {
        self.current
    }

    /// Moves to `target` if the transition is valid.
    ///
    /// An invalid transition is logged and leaves the tracker where it is.
    pub fn advance(&mut self, target: GenerationStage) -> GenerationStage {
        match self.current.transition_to(target) {
            Ok(next) => {
                tracing::debug!(from = %self.current, to = %next, "generation stage");
                self.current = next;
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejected generation stage transition");
            }
        }
        self.current
    }

    /// Marks the run failed and returns the stage the failure came from.
    pub fn fail(&mut self) -> GenerationStage {
        let origin = self.current;
        self.advance(GenerationStage::Failed);
        origin
    }
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}
