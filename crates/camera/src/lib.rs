//! Camera: position/rotation state driven by a keymap, and the per-frame
//! transform handed to the renderer as a uniform.
//!
//! # Invariants
//! - `transform` composes perspective · translation · Rx · Ry · Rz, in that
//!   order. Against a column vector, Z rotation applies first.
//! - `move_with` touches only the camera's own fields and is additive across
//!   simultaneously held keys.

mod camera;

pub use camera::{Camera, CameraConfig, CameraError};
