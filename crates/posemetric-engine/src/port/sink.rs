//! The presentation-layer port.

use posemetric_core::types::FrameAnalysis;

/// Receives the per-frame analysis output.
///
/// Publishing must not block the frame loop; adapters that cross a thread
/// or task boundary should drop rather than wait when the consumer falls
/// behind (the next frame supersedes the current one anyway).
pub trait AnalysisSink: Send {
    /// Hands one frame's angles and biomarkers to the consumer.
    fn publish(&mut self, analysis: FrameAnalysis);
}
