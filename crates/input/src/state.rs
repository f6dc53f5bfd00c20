use std::collections::BTreeSet;

use crate::key::Key;

/// Snapshot of the keyboard for one frame plus the termination request.
///
/// Replaces a global key table: the windowing layer owns one of these,
/// updates it from its event callbacks, and passes it to the frame update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: BTreeSet<Key>,
    quit_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot with exactly `keys` held.
    pub fn with_keys<I: IntoIterator<Item = Key>>(keys: I) -> Self {
        Self {
            held: keys.into_iter().collect(),
            quit_requested: false,
        }
    }

    /// Mark `key` as held. Returns false if it already was.
    pub fn press(&mut self, key: Key) -> bool {
        self.held.insert(key)
    }

    /// Mark `key` as released. Returns false if it was not held.
    pub fn release(&mut self, key: Key) -> bool {
        self.held.remove(&key)
    }

    /// Apply a press or release.
    pub fn set(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Held keys in a stable order.
    pub fn held(&self) -> impl Iterator<Item = Key> + '_ {
        self.held.iter().copied()
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Release every key. The quit request is sticky and survives.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}
