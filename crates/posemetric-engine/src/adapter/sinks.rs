//! Sink adapters for the presentation boundary.

use posemetric_core::types::FrameAnalysis;
use tokio::sync::mpsc;
use tracing::debug;

use crate::port::AnalysisSink;

/// Buffers every published analysis in memory.
///
/// Intended for tests and short demo sessions; a long-running host should
/// prefer [`ChannelSink`], which keeps memory bounded.
#[derive(Debug, Default)]
pub struct CollectingSink {
    frames: Vec<FrameAnalysis>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All analyses published so far, in order.
    #[must_use]
    pub fn frames(&self) -> &[FrameAnalysis] {
        &self.frames
    }

    /// Number of analyses published.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether nothing has been published yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl AnalysisSink for CollectingSink {
    fn publish(&mut self, analysis: FrameAnalysis) {
        self.frames.push(analysis);
    }
}

/// Forwards analyses over a bounded tokio channel.
///
/// Publishing never blocks the frame loop: when the consumer falls behind,
/// the frame is dropped (the next frame supersedes it).
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::Sender<FrameAnalysis>,
}

impl ChannelSink {
    /// Creates a sink and the receiving half, with the given channel
    /// capacity.
    #[must_use]
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<FrameAnalysis>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

impl AnalysisSink for ChannelSink {
    fn publish(&mut self, analysis: FrameAnalysis) {
        if let Err(err) = self.tx.try_send(analysis) {
            debug!(frame_index = analysis.frame_index, %err, "dropping frame analysis");
        }
    }
}
