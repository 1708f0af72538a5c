//! In-process adapters for the engine's ports.
//!
//! The real capture device and pose model live outside this repository;
//! these adapters stand in for them in tests, benches, and the demo CLI.
//! The sink adapters are also the supported way to wire the engine into a
//! host application.

pub mod scripted_detector;
pub mod sinks;
pub mod synthetic_source;

pub use scripted_detector::ScriptedDetector;
pub use sinks::{ChannelSink, CollectingSink};
pub use synthetic_source::{SyntheticFrame, SyntheticSource};
