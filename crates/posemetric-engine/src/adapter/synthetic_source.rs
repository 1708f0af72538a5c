//! Deterministic capture source for tests and demos.

use std::collections::BTreeSet;

use async_trait::async_trait;
use posemetric_core::error::CaptureError;

use crate::port::{CaptureSourcePort, SourceStatus};

/// Opaque frame payload produced by [`SyntheticSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticFrame {
    /// Ordinal of the frame within the session.
    pub index: u64,
}

/// A capture source that manufactures frames on demand.
///
/// Stalls can be scripted per frame index: the source reports `Paused`
/// until the loop's resume attempt clears the stall, which exercises the
/// scheduler's recovery path without a real device.
#[derive(Debug, Default)]
pub struct SyntheticSource {
    acquired: bool,
    next_index: u64,
    stalled_frames: BTreeSet<u64>,
    acquire_failure: Option<CaptureError>,
}

impl SyntheticSource {
    /// Creates a source that delivers frames indefinitely.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source whose acquisition fails with the given error.
    #[must_use]
    pub fn failing_acquisition(error: CaptureError) -> Self {
        Self {
            acquire_failure: Some(error),
            ..Self::default()
        }
    }

    /// Scripts a stall at each of the given frame indices.
    #[must_use]
    pub fn stall_on(mut self, frames: impl IntoIterator<Item = u64>) -> Self {
        self.stalled_frames.extend(frames);
        self
    }

    /// Whether the device handle is currently held.
    #[must_use]
    pub fn is_acquired(&self) -> bool {
        self.acquired
    }

    /// Number of frames read so far.
    #[must_use]
    pub fn frames_read(&self) -> u64 {
        self.next_index
    }
}

#[async_trait]
impl CaptureSourcePort for SyntheticSource {
    type Frame = SyntheticFrame;

    async fn acquire(&mut self) -> Result<(), CaptureError> {
        if let Some(failure) = &self.acquire_failure {
            return Err(failure.clone());
        }
        self.acquired = true;
        Ok(())
    }

    async fn release(&mut self) {
        self.acquired = false;
    }

    fn status(&self) -> SourceStatus {
        if self.stalled_frames.contains(&self.next_index) {
            SourceStatus::Paused
        } else {
            SourceStatus::Ready
        }
    }

    async fn resume(&mut self) -> Result<(), CaptureError> {
        self.stalled_frames.remove(&self.next_index);
        Ok(())
    }

    async fn read_frame(&mut self) -> Result<Self::Frame, CaptureError> {
        if !self.acquired {
            return Err(CaptureError::read_failed("source not acquired"));
        }
        let frame = SyntheticFrame {
            index: self.next_index,
        };
        self.next_index += 1;
        Ok(frame)
    }
}
