//! # posemetric-engine
//!
//! The biomechanical pose-analysis engine: per-frame joint-angle extraction,
//! posture/biomarker scoring, and the cooperative capture-session scheduler.
//!
//! This crate implements the **pose analysis** bounded context, providing:
//!
//! - **Ports**: [`CaptureSourcePort`], [`PoseDetectorPort`], [`AnalysisSink`]
//!   -- traits abstracting the capture device, the external pose model, and
//!   the presentation layer.
//! - **Adapters**: [`SyntheticSource`], [`ScriptedDetector`],
//!   [`ChannelSink`], [`CollectingSink`] -- in-process implementations used
//!   by tests and the demo CLI.
//! - **Pipeline**: [`JointAngleExtractor`], [`BiomarkerScorer`],
//!   [`FrameAnalyzer`] -- the pure per-frame measurement path.
//! - **Session**: [`FrameScheduler`] -- the capture -> detect -> extract ->
//!   score -> publish loop with start/stop lifecycle and stall recovery.
//!
//! Data flows one direction: capture source -> pose detector -> extractor ->
//! scorer -> sink. Nothing is retained across frames except the scheduler's
//! own loop bookkeeping, so memory stays O(1) for arbitrarily long sessions.

#![forbid(unsafe_code)]

pub mod adapter;
pub mod error;
pub mod pipeline;
pub mod port;
pub mod session;

// Re-export key types at the crate root for convenience.
pub use adapter::{ChannelSink, CollectingSink, ScriptedDetector, SyntheticFrame, SyntheticSource};
pub use error::SessionError;
pub use pipeline::{
    AnalyzerConfig, BiomarkerScorer, ExtractorConfig, FrameAnalyzer, JointAngleExtractor,
    ScorerConfig,
};
pub use port::{AnalysisSink, CaptureSourcePort, PoseDetectorPort, SourceStatus};
pub use session::{FrameScheduler, SchedulerConfig, SessionHandle, SessionLoopState, SessionPhase, TickOutcome};
