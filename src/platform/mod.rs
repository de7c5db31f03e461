//! Platform abstraction layer
//!
//! The simulation is frame-locked; the presentation side measures wall time
//! and asks the clock how many frames to run.

pub mod clock;

pub use clock::FrameClock;
