//! Capture-session lifecycle and frame scheduling.
//!
//! [`FrameScheduler`] owns one session's loop state and drives the
//! capture -> detect -> extract -> score -> publish cycle. It is constructed
//! per session with its collaborators injected; nothing about a session
//! lives in ambient global state.

pub mod scheduler;

pub use scheduler::{
    FrameScheduler, SchedulerConfig, SessionHandle, SessionLoopState, SessionPhase, TickOutcome,
};
