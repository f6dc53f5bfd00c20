//! wgpu render backend.
//!
//! Draws a scene's static mesh once per instance, transformed by the camera
//! uniform. Owns the surface, device and queue for one window.
//!
//! # Invariants
//! - The camera matrix arrives row-major in OpenGL-style clip space; it is
//!   remapped with `ClipSpace::ZeroToOne` and uploaded column-major.
//! - Depth is reversed (near = 1), so the depth test is `Greater` against 0.
//! - Renderer never mutates camera or scene state.

mod gpu;
mod shaders;

pub use gpu::{RenderError, WgpuRenderer};
