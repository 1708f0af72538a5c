//! The capture-device port (driving side of the frame loop).

use async_trait::async_trait;
use posemetric_core::error::CaptureError;

/// Readiness of a capture source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceStatus {
    /// Frames are available to read.
    Ready,
    /// Delivery is suspended (device paused); [`CaptureSourcePort::resume`]
    /// may bring it back.
    Paused,
    /// The stream has ended; a resume attempt may restart it.
    Ended,
}

/// Port abstracting the capture device.
///
/// The device handle is a single exclusively-owned resource per session.
/// Implementations must make `release` safe to call when nothing is held,
/// and `acquire` must release any prior handle before taking a new one so a
/// restart never leaks the device.
#[async_trait]
pub trait CaptureSourcePort: Send {
    /// The per-frame payload handed to the pose detector. The engine never
    /// inspects it.
    type Frame: Send;

    /// Acquires the device.
    ///
    /// # Errors
    ///
    /// Returns a non-recoverable [`CaptureError`] (acquisition failure or
    /// permission denial); these are fatal to session start.
    async fn acquire(&mut self) -> Result<(), CaptureError>;

    /// Releases the device. Idempotent.
    async fn release(&mut self);

    /// Current readiness, checked at the top of every tick.
    fn status(&self) -> SourceStatus;

    /// Attempts to resume a paused or ended source.
    ///
    /// # Errors
    ///
    /// Returns a recoverable [`CaptureError`] if the source stays stalled;
    /// the loop records the stall and retries on the next tick.
    async fn resume(&mut self) -> Result<(), CaptureError>;

    /// Reads one frame from an acquired, ready source.
    ///
    /// # Errors
    ///
    /// Returns a recoverable [`CaptureError`] if no frame could be read.
    async fn read_frame(&mut self) -> Result<Self::Frame, CaptureError>;
}
