//! Transform math: a small row-major 4x4 matrix value type.
//!
//! # Invariants
//! - `data[row][col]` indexing; `multiply` is the mathematical product `self * other`.
//! - Every operation returns a fresh matrix. Nothing is mutated in place.
//! - No required dependencies. `serde` and `glam` interop are opt-in features.

mod axis;
mod matrix;

pub use axis::Axis;
pub use matrix::Matrix4f;

pub fn crate_info() -> &'static str {
    "fluids-math v0.1.0"
}
