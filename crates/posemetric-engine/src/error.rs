//! Error types for the posemetric-engine crate.

use posemetric_core::error::{CaptureError, DetectionError};
use thiserror::Error;

/// Errors surfaced by the session lifecycle (`start`/`run`).
///
/// Per-frame detection failures never appear here: inside a running session
/// they degrade to a "no result" tick and the loop continues. Only failures
/// that prevent a session from starting (device acquisition, model load) or
/// a lifecycle misuse are reported.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SessionError {
    /// The capture device could not be acquired
    #[error("capture error: {0}")]
    Capture(#[from] CaptureError),

    /// The pose model could not be loaded
    #[error("detection error: {0}")]
    Detection(#[from] DetectionError),

    /// A lifecycle call arrived in the wrong state
    #[error("invalid session state: expected {expected}, found {actual}")]
    InvalidState {
        /// The state the call requires
        expected: &'static str,
        /// The state the scheduler was actually in
        actual: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_capture_errors() {
        let err = SessionError::from(CaptureError::PermissionDenied);
        assert!(matches!(err, SessionError::Capture(_)));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn invalid_state_names_both_states() {
        let err = SessionError::InvalidState {
            expected: "idle",
            actual: "detecting",
        };
        let msg = err.to_string();
        assert!(msg.contains("idle"));
        assert!(msg.contains("detecting"));
    }
}
