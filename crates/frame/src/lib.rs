//! Frame loop: poll input → elapsed time → move camera → transform → render.
//!
//! # Invariants
//! - Single-threaded and synchronous; one `step` is one frame.
//! - Cancellation is the snapshot's quit flag, checked once per step.
//! - A degenerate viewport skips rendering; `perspective` is never called with
//!   a zero height.

mod clock;
mod config;
mod frame_loop;
mod provider;

pub use clock::FrameClock;
pub use config::{ClockConfig, ConfigError, SessionConfig, WindowConfig};
pub use frame_loop::{FrameLoop, FrameOutcome, RunSummary};
pub use provider::{FrameSnapshot, InputProvider, ParseStepError, ScriptStep, ScriptedInput};
