//! Error types for stepper construction and playback control.
//!
//! This module defines [`EngineError`], covering everything a caller can
//! get wrong: bad input at construction time and re-entrant control calls
//! at the playback layer. Broken internal invariants (a non-contiguous
//! step sequence, an unsorted final snapshot) are not represented here —
//! those are programming errors and abort the run via assertions.
//!
//! Every error is returned synchronously from the call that caused it;
//! none are delivered through the step stream.

use std::fmt;

/// Errors surfaced to callers of the stepper and playback APIs.
#[derive(Debug, Clone)]
pub enum EngineError {
    /// Input was malformed, non-numeric, or larger than the configured
    /// maximum. Raised at construction; no run is produced.
    InvalidInput { reason: String },

    /// The algorithm name is not in the recognized set.
    UnknownAlgorithm { name: String },

    /// A start was attempted while a run is active and the playback
    /// policy rejects re-entrant starts.
    AlreadyRunning,

    /// An input mutation (reverse, replace) was attempted while a run is
    /// active.
    RunInProgress,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidInput { reason } => {
                write!(f, "Invalid input: {}", reason)
            }
            EngineError::UnknownAlgorithm { name } => {
                write!(f, "Unknown algorithm '{}'", name)
            }
            EngineError::AlreadyRunning => {
                write!(f, "A run is already in progress")
            }
            EngineError::RunInProgress => {
                write!(f, "Input cannot change while a run is in progress")
            }
        }
    }
}

impl std::error::Error for EngineError {}
