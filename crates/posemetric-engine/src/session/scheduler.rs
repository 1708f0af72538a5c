//! The cooperative frame scheduler.
//!
//! One logical tick runs per display-refresh interval and never overlaps
//! with itself: the capture read and the detection call are the only
//! suspension points, and both are awaited before the next tick is
//! scheduled, so the loop cannot run ahead of the device's actual frame
//! availability. Cancellation is cooperative -- `stop()` only prevents the
//! *next* tick; an in-flight tick always runs to completion.

use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::pipeline::{AnalyzerConfig, FrameAnalyzer};
use crate::port::{AnalysisSink, CaptureSourcePort, PoseDetectorPort, SourceStatus};

/// Lifecycle phase of a capture session.
///
/// `Detecting` and `Rendering` alternate every analyzed frame while the
/// session runs; `Stopped` is terminal until the session is explicitly
/// restarted via [`FrameScheduler::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No session has started.
    Idle,
    /// Acquiring the capture device and loading the pose model.
    CaptureStarting,
    /// Waiting on or running pose detection for the current frame.
    Detecting,
    /// Publishing the current frame's analysis.
    Rendering,
    /// The session has ended and the device is released.
    Stopped,
}

impl SessionPhase {
    /// Phase name for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CaptureStarting => "capture_starting",
            Self::Detecting => "detecting",
            Self::Rendering => "rendering",
            Self::Stopped => "stopped",
        }
    }
}

/// Per-session loop bookkeeping.
///
/// Holds no pose data; together with the scheduler's frame counter this is
/// the only state that survives a tick, which bounds session memory to
/// O(1) regardless of duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionLoopState {
    /// Whether the loop is currently between `start()` and shutdown.
    pub is_running: bool,
    /// When the last frame was successfully read.
    pub last_frame_timestamp: Option<Instant>,
    /// Ticks in a row that found the source stalled.
    pub consecutive_stall_count: u32,
}

/// Configuration for the frame scheduler.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SchedulerConfig {
    /// Tick interval in milliseconds. The default approximates a 60 Hz
    /// display refresh cadence.
    pub tick_interval_ms: u64,
    /// Measurement pipeline settings.
    pub analyzer: AnalyzerConfig,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 16,
            analyzer: AnalyzerConfig::default(),
        }
    }
}

impl SchedulerConfig {
    /// Tick interval as a [`Duration`].
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// What a single tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A pose was detected and its analysis published.
    Analyzed,
    /// The frame was read but the model produced no result; nothing was
    /// published and the loop continues.
    NoDetection,
    /// The source was stalled (or the read failed); a resume was attempted
    /// and detection skipped.
    Stalled,
}

/// Cloneable handle for requesting a stop from outside the running loop.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    stop: Arc<watch::Sender<bool>>,
}

impl SessionHandle {
    /// Requests that the session stop at the next tick boundary.
    ///
    /// Idempotent and safe to call at any time, including before the
    /// session has started or from a teardown path.
    pub fn stop(&self) {
        let _ = self.stop.send(true);
    }

    /// Whether a stop has been requested.
    #[must_use]
    pub fn is_stop_requested(&self) -> bool {
        *self.stop.borrow()
    }

    /// Clears a pending stop when a new session starts.
    fn reset(&self) {
        let _ = self.stop.send(false);
    }
}

/// Drives one capture session: a continuous
/// capture -> detect -> extract -> score -> publish cycle at the configured
/// cadence, with start/stop lifecycle and stall recovery.
///
/// The scheduler is built per session and owns its collaborators: the
/// capture source, the pose detector, and the analysis sink are injected at
/// construction. Only device-acquisition and model-load failures are fatal
/// (surfaced from [`start`](Self::start)); everything that can go wrong on
/// an individual frame degrades to a skipped update and the loop keeps
/// going.
pub struct FrameScheduler<S, D, K>
where
    S: CaptureSourcePort,
    D: PoseDetectorPort<S::Frame>,
    K: AnalysisSink,
{
    source: S,
    detector: D,
    sink: K,
    analyzer: FrameAnalyzer,
    config: SchedulerConfig,
    phase: SessionPhase,
    loop_state: SessionLoopState,
    frame_index: u64,
    handle: SessionHandle,
    stop_rx: watch::Receiver<bool>,
}

impl<S, D, K> FrameScheduler<S, D, K>
where
    S: CaptureSourcePort,
    S::Frame: Sync,
    D: PoseDetectorPort<S::Frame>,
    K: AnalysisSink,
{
    /// Creates a scheduler with the default configuration.
    #[must_use]
    pub fn new(source: S, detector: D, sink: K) -> Self {
        Self::with_config(source, detector, sink, SchedulerConfig::default())
    }

    /// Creates a scheduler with a custom configuration.
    #[must_use]
    pub fn with_config(source: S, detector: D, sink: K, config: SchedulerConfig) -> Self {
        let (stop_tx, stop_rx) = watch::channel(false);
        Self {
            source,
            detector,
            sink,
            analyzer: FrameAnalyzer::with_config(config.analyzer.clone()),
            config,
            phase: SessionPhase::Idle,
            loop_state: SessionLoopState::default(),
            frame_index: 0,
            handle: SessionHandle {
                stop: Arc::new(stop_tx),
            },
            stop_rx,
        }
    }

    /// Starts a session: acquires the capture device and loads the pose
    /// model, then enters `Detecting`.
    ///
    /// On any failure the device handle is released before returning, the
    /// phase reverts to `Idle`, and the session never begins -- this is the
    /// only place errors are fatal.
    ///
    /// # Errors
    ///
    /// [`SessionError::Capture`] if the device cannot be acquired,
    /// [`SessionError::Detection`] if the model fails to load, or
    /// [`SessionError::InvalidState`] when a session is already running.
    pub async fn start(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Idle => {}
            SessionPhase::Stopped => {
                // Restarting: clear the previous session's stop request and
                // make sure no stale device handle is carried over.
                self.handle.reset();
                self.source.release().await;
            }
            _ => {
                return Err(SessionError::InvalidState {
                    expected: "idle or stopped",
                    actual: self.phase.name(),
                })
            }
        }

        self.phase = SessionPhase::CaptureStarting;

        if let Err(err) = self.source.acquire().await {
            self.phase = SessionPhase::Idle;
            return Err(err.into());
        }

        if !self.detector.is_ready() {
            if let Err(err) = self.detector.load().await {
                self.source.release().await;
                self.phase = SessionPhase::Idle;
                return Err(err.into());
            }
        }

        self.loop_state = SessionLoopState {
            is_running: true,
            ..SessionLoopState::default()
        };
        self.frame_index = 0;
        self.phase = SessionPhase::Detecting;
        info!(tick_interval_ms = self.config.tick_interval_ms, "capture session started");
        Ok(())
    }

    /// Runs the tick loop until a stop is requested, then releases the
    /// device and transitions to `Stopped`.
    ///
    /// The loop is self-throttling: each tick awaits the capture read and
    /// the detection before the next tick is scheduled, and a missed
    /// deadline delays rather than bursts.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidState`] if called without a successful
    /// [`start`](Self::start).
    pub async fn run(&mut self) -> Result<(), SessionError> {
        if !matches!(
            self.phase,
            SessionPhase::Detecting | SessionPhase::Rendering
        ) {
            return Err(SessionError::InvalidState {
                expected: "detecting",
                actual: self.phase.name(),
            });
        }

        let mut interval = tokio::time::interval(self.config.tick_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut stop_rx = self.stop_rx.clone();

        loop {
            if *stop_rx.borrow() {
                break;
            }
            tokio::select! {
                _ = interval.tick() => {
                    self.tick().await;
                }
                changed = stop_rx.changed() => {
                    if changed.is_err() || *stop_rx.borrow() {
                        break;
                    }
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Executes one tick of the capture loop.
    ///
    /// Public so hosts with their own frame pacing (and tests) can drive
    /// the per-frame logic directly without the timer.
    pub async fn tick(&mut self) -> TickOutcome {
        match self.source.status() {
            SourceStatus::Ready => {}
            status @ (SourceStatus::Paused | SourceStatus::Ended) => {
                return self.handle_stall(status).await;
            }
        }

        let frame = match self.source.read_frame().await {
            Ok(frame) => frame,
            Err(err) => {
                self.loop_state.consecutive_stall_count += 1;
                warn!(
                    %err,
                    stalls = self.loop_state.consecutive_stall_count,
                    "frame read failed"
                );
                return TickOutcome::Stalled;
            }
        };
        self.loop_state.consecutive_stall_count = 0;
        self.loop_state.last_frame_timestamp = Some(Instant::now());

        let index = self.frame_index;
        self.frame_index += 1;

        self.phase = SessionPhase::Detecting;
        let pose = match self.detector.detect(&frame).await {
            Ok(Some(pose)) => pose,
            Ok(None) => {
                debug!(frame_index = index, "no pose detected");
                return TickOutcome::NoDetection;
            }
            Err(err) => {
                warn!(frame_index = index, %err, "detection failed");
                return TickOutcome::NoDetection;
            }
        };

        let analysis = self.analyzer.process(index, &pose);
        self.phase = SessionPhase::Rendering;
        self.sink.publish(analysis);
        TickOutcome::Analyzed
    }

    /// Requests a stop at the next tick boundary. Idempotent; see
    /// [`SessionHandle::stop`].
    pub fn stop(&self) {
        self.handle.stop();
    }

    /// Returns a cloneable handle for stopping the session from outside
    /// the loop (e.g. a teardown path holding no scheduler reference).
    #[must_use]
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Releases the capture device and marks the session `Stopped`.
    ///
    /// Invoked automatically when [`run`](Self::run) exits; exposed for
    /// hosts that called [`start`](Self::start) but never entered the
    /// loop. Idempotent.
    pub async fn shutdown(&mut self) {
        self.source.release().await;
        self.loop_state.is_running = false;
        if self.phase != SessionPhase::Idle {
            self.phase = SessionPhase::Stopped;
        }
        debug!("capture session shut down");
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Current loop bookkeeping.
    #[must_use]
    pub fn loop_state(&self) -> &SessionLoopState {
        &self.loop_state
    }

    /// Scheduler configuration.
    #[must_use]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Number of frames read so far this session.
    #[must_use]
    pub fn frames_processed(&self) -> u64 {
        self.frame_index
    }

    /// The analysis sink, for inspection after a session.
    #[must_use]
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Consumes the scheduler and returns its collaborators.
    #[must_use]
    pub fn into_parts(self) -> (S, D, K) {
        (self.source, self.detector, self.sink)
    }

    async fn handle_stall(&mut self, status: SourceStatus) -> TickOutcome {
        self.loop_state.consecutive_stall_count += 1;
        warn!(
            ?status,
            stalls = self.loop_state.consecutive_stall_count,
            "capture stalled, attempting resume"
        );
        if let Err(err) = self.source.resume().await {
            warn!(%err, "resume attempt failed");
        }
        TickOutcome::Stalled
    }
}
