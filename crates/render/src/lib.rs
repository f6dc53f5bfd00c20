//! Rendering Adapter: the boundary between the transform core and a GPU backend.
//!
//! # Invariants
//! - Renderers consume a `FrameSubmission`; they never mutate camera or scene state.
//! - Matrices stay row-major until a backend encodes them with its `UniformLayout`.
//!
//! # Workaround
//! Ships a debug text renderer and a recording renderer so the frame loop can
//! run headless. The wgpu backend lives in its own crate behind the same trait.

mod convention;
mod renderer;
mod viewport;

pub use convention::{ClipSpace, UniformLayout};
pub use renderer::{DebugTextRenderer, FrameSubmission, RecordedFrame, RecordingRenderer, Renderer};
pub use viewport::Viewport;

pub fn crate_info() -> &'static str {
    "fluids-render v0.1.0"
}
