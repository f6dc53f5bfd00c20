//! Input: an explicit per-frame key snapshot and a key → camera-effect table.
//!
//! # Invariants
//! - No process-wide input state. The windowing layer fills an `InputState`
//!   and hands it to the frame update.
//! - Control schemes are data (`KeyMap`), never branches in camera code.

mod key;
mod keymap;
mod state;

pub use key::{Key, ParseKeyError};
pub use keymap::{
    CameraChannel, CameraEffect, Direction, KeyBinding, KeyMap, KeymapConfig, KeymapError,
    KeymapPreset,
};
pub use state::InputState;

pub fn crate_info() -> &'static str {
    "fluids-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
